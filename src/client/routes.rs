//! Symbolic route names and the table resolving them to URL paths.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A symbolic Noren operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Route {
    /// Standard login with a second factor
    Login,
    /// Login with a previously registered PIN
    PinAuth,
    /// End the server-side session
    Logout,
    /// Register a login PIN
    SetPin,
    /// Demat holdings
    Holdings,
    /// Cash and margin limits
    Limits,
    /// Net position book
    Positions,
}

impl Route {
    /// The symbolic name used in route configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "login",
            Route::PinAuth => "pinAuth",
            Route::Logout => "logout",
            Route::SetPin => "setPin",
            Route::Holdings => "holdings",
            Route::Limits => "limits",
            Route::Positions => "positions",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable mapping from [`Route`] to the path appended to the base URL.
///
/// Every route always has a path; tables loaded from JSON are rejected
/// unless they name all of them. Extra entries in the JSON are ignored so
/// a full upstream route file can be used as-is.
///
/// # Example
///
/// ```
/// use shoonya_rs::client::{Route, RouteTable};
///
/// let table = RouteTable::default();
/// assert_eq!(table.path(Route::Holdings), "/Holdings");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTable {
    login: String,
    pin_auth: String,
    logout: String,
    set_pin: String,
    holdings: String,
    limits: String,
    positions: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            login: "/QuickAuth".to_string(),
            pin_auth: "/PinAuth".to_string(),
            logout: "/Logout".to_string(),
            set_pin: "/SetPin".to_string(),
            holdings: "/Holdings".to_string(),
            limits: "/Limits".to_string(),
            positions: "/PositionBook".to_string(),
        }
    }
}

impl RouteTable {
    /// Load a route table from a JSON object of `name -> path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the document is not an object of strings
    /// or a route is missing.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: RouteTable = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid route table: {}", e)))?;

        for route in table.iter_routes() {
            if !table.path(route).starts_with('/') {
                return Err(Error::Config(format!(
                    "Route '{}' must start with '/': {}",
                    route,
                    table.path(route)
                )));
            }
        }

        Ok(table)
    }

    /// Resolve a route to its path.
    pub fn path(&self, route: Route) -> &str {
        match route {
            Route::Login => &self.login,
            Route::PinAuth => &self.pin_auth,
            Route::Logout => &self.logout,
            Route::SetPin => &self.set_pin,
            Route::Holdings => &self.holdings,
            Route::Limits => &self.limits,
            Route::Positions => &self.positions,
        }
    }

    fn iter_routes(&self) -> impl Iterator<Item = Route> {
        [
            Route::Login,
            Route::PinAuth,
            Route::Logout,
            Route::SetPin,
            Route::Holdings,
            Route::Limits,
            Route::Positions,
        ]
        .into_iter()
    }
}

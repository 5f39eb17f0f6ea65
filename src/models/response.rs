//! Generic response envelopes: status objects, login, and list replies.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

use super::de::null_as_default;

/// `stat` value of a successful call.
pub const STAT_OK: &str = "Ok";
/// `stat` value of a rejected call.
pub const STAT_NOT_OK: &str = "Not_Ok";

const REQUEST_TIME_FORMAT: &str = "%H:%M:%S %d-%m-%Y";

/// Status-only reply, returned by logout, set-PIN, and by list endpoints
/// that have nothing to return.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// `"Ok"` or `"Not_Ok"`
    #[serde(default)]
    pub stat: Option<String>,
    /// Error message when rejected
    #[serde(default)]
    pub emsg: Option<String>,
    /// Server clock, `HH:MM:SS DD-MM-YYYY`
    #[serde(default)]
    pub request_time: Option<String>,
    /// Any other fields the server sent
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl StatusResponse {
    /// Whether the server reported success.
    pub fn is_ok(&self) -> bool {
        self.stat.as_deref() == Some(STAT_OK)
    }

    /// Parsed `request_time`.
    pub fn request_time(&self) -> Option<NaiveDateTime> {
        parse_request_time(self.request_time.as_deref())
    }
}

/// Reply to a successful login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// `"Ok"` or `"Not_Ok"`
    #[serde(default)]
    pub stat: Option<String>,
    /// Error message when rejected
    #[serde(default)]
    pub emsg: Option<String>,
    /// Session token for subsequent requests
    #[serde(default)]
    pub susertoken: Option<String>,
    /// Canonical account id
    #[serde(default)]
    pub actid: Option<String>,
    /// Display name of the user
    #[serde(default)]
    pub uname: Option<String>,
    /// Registered email address
    #[serde(default)]
    pub email: Option<String>,
    /// Broker name
    #[serde(default)]
    pub brkname: Option<String>,
    /// Exchanges the account may trade on
    #[serde(default, deserialize_with = "null_as_default")]
    pub exarr: Vec<String>,
    /// Products enabled for the account
    #[serde(default, deserialize_with = "null_as_default")]
    pub prarr: Vec<Value>,
    /// Server clock, `HH:MM:SS DD-MM-YYYY`
    #[serde(default)]
    pub request_time: Option<String>,
    /// Any other fields the server sent
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl LoginResponse {
    /// Parsed `request_time`.
    pub fn request_time(&self) -> Option<NaiveDateTime> {
        parse_request_time(self.request_time.as_deref())
    }
}

/// Reply from an endpoint that returns a list of records.
///
/// Noren answers with a bare array on success and with a status object
/// when there is nothing to return (`"emsg": "no data"`) or the call was
/// refused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    /// The records
    Records(Vec<T>),
    /// The status object the server sent instead
    Rejected(StatusResponse),
}

impl<T> ListResponse<T> {
    /// Whether the server returned records.
    pub fn is_ok(&self) -> bool {
        matches!(self, ListResponse::Records(_))
    }

    /// The records, or an empty slice if the call was rejected.
    pub fn records(&self) -> &[T] {
        match self {
            ListResponse::Records(records) => records,
            ListResponse::Rejected(_) => &[],
        }
    }

    /// Convert into the records, turning a rejection into [`Error::Rejected`].
    pub fn into_result(self) -> Result<Vec<T>> {
        match self {
            ListResponse::Records(records) => Ok(records),
            ListResponse::Rejected(status) => {
                let body = serde_json::to_value(&status)?;
                Err(Error::rejected(body))
            }
        }
    }
}

fn parse_request_time(raw: Option<&str>) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw?.trim(), REQUEST_TIME_FORMAT).ok()
}

//! Login credentials and the login request payload.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::{Error, Result};

use super::hash::{app_key_hash, sha256_hex};

/// Value of the `source` field identifying API clients.
pub(crate) const SOURCE: &str = "API";

/// Device identifier sent when the caller does not supply one.
pub const DEFAULT_IMEI: &str = "api";

/// Credentials for [`Session::login`](crate::Session::login).
///
/// A login needs a second factor: either a one-time password (`factor2`)
/// or a previously registered PIN. Empty strings count as absent.
///
/// # Example
///
/// ```
/// use shoonya_rs::LoginCredentials;
///
/// let creds = LoginCredentials::new("password", "FA12345_U", "api-key")
///     .factor2("123456")
///     .imei("abc1234");
/// ```
#[derive(Clone)]
pub struct LoginCredentials {
    password: SecretString,
    vendor_code: String,
    api_key: SecretString,
    factor2: Option<SecretString>,
    pin: Option<SecretString>,
    imei: Option<String>,
}

/// Which login route a set of credentials selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthMethod {
    /// Password plus one-time second factor
    Factor2,
    /// Password plus registered PIN
    Pin,
}

impl LoginCredentials {
    /// Create credentials from the password, vendor code and API key.
    pub fn new(
        password: impl Into<String>,
        vendor_code: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            password: SecretString::from(password.into()),
            vendor_code: vendor_code.into(),
            api_key: SecretString::from(api_key.into()),
            factor2: None,
            pin: None,
            imei: None,
        }
    }

    /// Set the OTP or TOTP second factor.
    pub fn factor2(mut self, factor2: impl Into<String>) -> Self {
        self.factor2 = non_empty(factor2.into()).map(SecretString::from);
        self
    }

    /// Set the PIN.
    pub fn pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = non_empty(pin.into()).map(SecretString::from);
        self
    }

    /// Set the IMEI of the mobile device or MAC address of the desktop.
    pub fn imei(mut self, imei: impl Into<String>) -> Self {
        self.imei = non_empty(imei.into());
        self
    }

    /// Whether a second factor was supplied.
    pub fn has_factor2(&self) -> bool {
        self.factor2.is_some()
    }

    /// Whether a PIN was supplied.
    pub fn has_pin(&self) -> bool {
        self.pin.is_some()
    }

    pub(crate) fn pin_secret(&self) -> Option<&SecretString> {
        self.pin.as_ref()
    }

    pub(crate) fn imei_or_default(&self) -> &str {
        self.imei.as_deref().unwrap_or(DEFAULT_IMEI)
    }

    /// Pick the login route. A PIN is only used when no second factor was
    /// given.
    pub(crate) fn auth_method(&self) -> Result<AuthMethod> {
        match (&self.factor2, &self.pin) {
            (None, None) => Err(Error::InvalidInput(
                "either factor2 or pin is required".to_string(),
            )),
            (None, Some(_)) => Ok(AuthMethod::Pin),
            (Some(_), _) => Ok(AuthMethod::Factor2),
        }
    }

    pub(crate) fn to_payload(
        &self,
        user_id: &str,
        app_version: &str,
        method: AuthMethod,
    ) -> LoginPayload {
        let (factor2, dpin) = match method {
            AuthMethod::Factor2 => (
                self.factor2.as_ref().map(|f| f.expose_secret().to_string()),
                None,
            ),
            AuthMethod::Pin => (
                None,
                self.pin.as_ref().map(|p| sha256_hex(p.expose_secret())),
            ),
        };

        LoginPayload {
            source: SOURCE,
            apkversion: app_version.to_string(),
            uid: user_id.to_string(),
            pwd: sha256_hex(self.password.expose_secret()),
            vc: self.vendor_code.clone(),
            appkey: app_key_hash(user_id, self.api_key.expose_secret()),
            imei: self.imei_or_default().to_string(),
            factor2,
            dpin,
        }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("password", &"[REDACTED]")
            .field("vendor_code", &self.vendor_code)
            .field("api_key", &"[REDACTED]")
            .field("factor2", &self.factor2.as_ref().map(|_| "[REDACTED]"))
            .field("pin", &self.pin.as_ref().map(|_| "[REDACTED]"))
            .field("imei", &self.imei)
            .finish()
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Body of a login or PIN-auth request.
#[derive(Debug, Serialize)]
pub(crate) struct LoginPayload {
    pub source: &'static str,
    pub apkversion: String,
    pub uid: String,
    pub pwd: String,
    pub vc: String,
    pub appkey: String,
    pub imei: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpin: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> LoginCredentials {
        LoginCredentials::new("secret", "FA12345_U", "key")
    }

    #[test]
    fn test_missing_factors_rejected() {
        let err = base().auth_method().unwrap_err();
        assert!(err.is_validation_error());
        assert!(err.to_string().contains("either factor2 or pin is required"));

        let err = base().factor2("").pin("").auth_method().unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_auth_method_selection() {
        assert_eq!(base().factor2("123456").auth_method().unwrap(), AuthMethod::Factor2);
        assert_eq!(base().pin("1234").auth_method().unwrap(), AuthMethod::Pin);
        assert_eq!(
            base().factor2("123456").pin("1234").auth_method().unwrap(),
            AuthMethod::Factor2
        );
    }

    #[test]
    fn test_factor2_payload() {
        let creds = base().factor2("123456").pin("1234");
        let payload = creds.to_payload("FA12345", "rust:0.1.0", AuthMethod::Factor2);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["source"], "API");
        assert_eq!(json["apkversion"], "rust:0.1.0");
        assert_eq!(json["uid"], "FA12345");
        assert_eq!(json["pwd"], sha256_hex("secret"));
        assert_eq!(json["vc"], "FA12345_U");
        assert_eq!(json["appkey"], sha256_hex("FA12345|key"));
        assert_eq!(json["imei"], DEFAULT_IMEI);
        assert_eq!(json["factor2"], "123456");
        assert!(json.get("dpin").is_none());
    }

    #[test]
    fn test_pin_payload() {
        let creds = base().pin("1234").imei("mac-addr");
        let payload = creds.to_payload("FA12345", "rust:0.1.0", AuthMethod::Pin);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["dpin"], sha256_hex("1234"));
        assert_eq!(json["imei"], "mac-addr");
        assert!(json.get("factor2").is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug_str = format!("{:?}", base().factor2("987654").pin("4321"));
        assert!(!debug_str.contains("secret"));
        assert!(!debug_str.contains("987654"));
        assert!(!debug_str.contains("4321"));
        assert!(debug_str.contains("REDACTED"));
    }
}

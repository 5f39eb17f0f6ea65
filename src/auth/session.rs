//! Session management for Shoonya API authentication.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::api::PortfolioService;
use crate::client::{ClientConfig, HttpTransport, RequestChannel, Route, Transport};
use crate::models::{LoginResponse, StatusResponse, STAT_NOT_OK};
use crate::{Error, Result};

use super::credentials::{AuthMethod, LoginCredentials};

/// Identity and token shared between a [`Session`] and its request channel.
///
/// Both fields are only ever written together, under one write lock.
pub(crate) struct SessionState {
    pub(crate) user_id: String,
    pub(crate) access_token: Option<SecretString>,
}

pub(crate) type SharedState = Arc<RwLock<SessionState>>;

/// An authenticated (or not yet authenticated) Shoonya user context.
///
/// A session starts unauthenticated unless it was built with a token from
/// an earlier login. [`login`](Self::login) stores the issued token and the
/// canonical account id; every later request carries that token.
///
/// # Thread Safety
///
/// `Session` is cheap to clone and can be shared across tasks. Concurrent
/// logins race: whichever finishes last wins.
///
/// # Example
///
/// ```no_run
/// use shoonya_rs::{LoginCredentials, Session};
///
/// # async fn example() -> shoonya_rs::Result<()> {
/// let session = Session::new("FA12345")?;
///
/// let creds = LoginCredentials::new("password", "FA12345_U", "api-key")
///     .factor2("123456");
/// session.login(&creds).await?;
///
/// let positions = session.portfolio().positions().await?;
/// println!("{} open positions", positions.records().len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Session {
    pub(crate) inner: Arc<SessionInner>,
}

pub(crate) struct SessionInner {
    pub(crate) channel: RequestChannel,
    pub(crate) state: SharedState,
    pub(crate) config: ClientConfig,
    debug: bool,
}

impl SessionInner {
    /// Current `(user_id, account_id)`. The account id always mirrors the
    /// user id.
    pub(crate) async fn identity(&self) -> (String, String) {
        let user_id = self.state.read().await.user_id.clone();
        (user_id.clone(), user_id)
    }
}

/// Builder for [`Session`].
///
/// # Example
///
/// ```
/// use shoonya_rs::Session;
///
/// let session = Session::builder("FA12345")
///     .access_token("token-from-an-earlier-login")
///     .debug(true)
///     .build()
///     .expect("valid session");
/// ```
pub struct SessionBuilder {
    user_id: String,
    access_token: Option<String>,
    debug: bool,
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl SessionBuilder {
    /// Resume with a token issued by an earlier login.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Log every request and response through `tracing`.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Use a custom configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Send requests through a custom transport instead of the default
    /// `reqwest`-backed one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the user id is empty, the base URL does not
    /// parse, or the HTTP client cannot be created.
    pub fn build(self) -> Result<Session> {
        if self.user_id.trim().is_empty() {
            return Err(Error::InvalidInput("user id must not be empty".to_string()));
        }
        url::Url::parse(&self.config.base_url)?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.config)?),
        };

        let state = Arc::new(RwLock::new(SessionState {
            user_id: self.user_id,
            access_token: self
                .access_token
                .filter(|t| !t.is_empty())
                .map(SecretString::from),
        }));
        let channel = RequestChannel::new(&self.config, transport, state.clone(), self.debug);

        Ok(Session {
            inner: Arc::new(SessionInner {
                channel,
                state,
                config: self.config,
                debug: self.debug,
            }),
        })
    }
}

impl Session {
    /// Start building a session for `user_id`.
    pub fn builder(user_id: impl Into<String>) -> SessionBuilder {
        SessionBuilder {
            user_id: user_id.into(),
            access_token: None,
            debug: false,
            config: ClientConfig::default(),
            transport: None,
        }
    }

    /// Create an unauthenticated session with default configuration.
    pub fn new(user_id: impl Into<String>) -> Result<Self> {
        Self::builder(user_id).build()
    }

    /// The current user id. Replaced by the canonical id after login.
    pub async fn user_id(&self) -> String {
        self.inner.state.read().await.user_id.clone()
    }

    /// The account id; always equal to [`user_id`](Self::user_id).
    pub async fn account_id(&self) -> String {
        self.inner.identity().await.1
    }

    /// Whether a session token is held.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.state.read().await.access_token.is_some()
    }

    /// The current session token, for persisting across restarts.
    pub async fn access_token(&self) -> Option<SecretString> {
        self.inner.state.read().await.access_token.clone()
    }

    /// Whether request/response logging is enabled.
    pub fn is_debug(&self) -> bool {
        self.inner.debug
    }

    /// The configuration this session was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Log in and store the issued session token.
    ///
    /// A PIN is used only when no `factor2` was supplied; otherwise the
    /// standard login route is taken and the PIN is ignored. Use
    /// [`login_and_register_pin`](Self::login_and_register_pin) to log in
    /// with `factor2` and register the PIN in one call.
    ///
    /// On success the token and the server's canonical account id replace
    /// the session's current ones. On any failure neither is touched. A
    /// reply without a usable token, whatever its shape, is an
    /// authentication failure.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if neither `factor2` nor a PIN was given;
    ///   nothing is sent in that case
    /// - a transport error if the request could not be completed
    /// - [`Error::Authentication`] if the server refused the login or did
    ///   not issue a token
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse> {
        let method = credentials.auth_method()?;
        let route = match method {
            AuthMethod::Factor2 => Route::Login,
            AuthMethod::Pin => Route::PinAuth,
        };

        let user_id = self.user_id().await;
        let payload = credentials.to_payload(&user_id, &self.inner.config.app_version, method);
        let reply = self.inner.channel.send(route, &payload).await?;
        let field = |name: &str| {
            reply
                .get(name)
                .and_then(Value::as_str)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let rejected = field("stat").as_deref() == Some(STAT_NOT_OK);
        let (token, actid) = match field("susertoken") {
            Some(token) if !rejected => (token, field("actid")),
            _ => {
                let message = field("emsg").unwrap_or_else(|| "Login attempt failed".to_string());
                tracing::warn!(%user_id, route = %route, %message, "Login rejected");
                return Err(Error::Authentication(message));
            }
        };
        let response: LoginResponse = serde_json::from_value(reply)?;

        {
            let mut state = self.inner.state.write().await;
            state.access_token = Some(SecretString::from(token));
            if let Some(actid) = actid {
                state.user_id = actid;
            }
        }

        tracing::info!(%user_id, route = %route, "Logged in");
        Ok(response)
    }

    /// Log in with `factor2`, then register the supplied PIN for future
    /// PIN logins.
    ///
    /// Returns the login reply and the set-PIN reply. If the login fails the
    /// PIN is not sent.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] unless both `factor2` and a PIN are supplied;
    /// otherwise whatever [`login`](Self::login) or
    /// [`set_pin`](Self::set_pin) returns.
    pub async fn login_and_register_pin(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<(LoginResponse, StatusResponse)> {
        let pin = match credentials.pin_secret() {
            Some(pin) if credentials.has_factor2() => pin.clone(),
            _ => {
                return Err(Error::InvalidInput(
                    "both factor2 and pin are required to register a pin".to_string(),
                ))
            }
        };

        let login = self.login(credentials).await?;
        let set_pin = self
            .set_pin(pin.expose_secret(), Some(credentials.imei_or_default()))
            .await?;
        Ok((login, set_pin))
    }

    /// End the server-side session and forget the local token.
    ///
    /// The token is dropped once the server has answered, whatever the
    /// `stat` of the reply; a transport failure leaves it in place. The
    /// user id is kept, so the same session can log in again.
    pub async fn logout(&self) -> Result<StatusResponse> {
        #[derive(Serialize)]
        struct Payload {
            uid: String,
        }

        let (uid, _) = self.inner.identity().await;
        let response: StatusResponse = self
            .inner
            .channel
            .post(Route::Logout, &Payload { uid: uid.clone() })
            .await?;

        self.inner.state.write().await.access_token = None;
        tracing::info!(user_id = %uid, stat = ?response.stat, "Logged out");
        Ok(response)
    }

    /// Register a PIN for PIN logins.
    ///
    /// The PIN travels in plaintext; the server stores its own digest.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `pin` is empty, otherwise any transport
    /// error.
    pub async fn set_pin(&self, pin: &str, imei: Option<&str>) -> Result<StatusResponse> {
        #[derive(Serialize)]
        struct Payload<'a> {
            uid: String,
            pin: &'a str,
            imei: &'a str,
        }

        if pin.is_empty() {
            return Err(Error::InvalidInput("pin must not be empty".to_string()));
        }

        let (uid, _) = self.inner.identity().await;
        let payload = Payload {
            uid,
            pin,
            imei: imei
                .filter(|i| !i.is_empty())
                .unwrap_or(super::credentials::DEFAULT_IMEI),
        };

        self.inner.channel.post(Route::SetPin, &payload).await
    }

    /// Get the holdings, limits and positions service.
    pub fn portfolio(&self) -> PortfolioService {
        PortfolioService::new(self.inner.clone())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.inner.config.base_url)
            .field("access_token", &"[REDACTED]")
            .field("debug", &self.inner.debug)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session::builder("FA12345")
            .access_token("super-secret-token")
            .build()
            .unwrap();

        let debug_str = format!("{:?}", session);
        assert!(!debug_str.contains("super-secret-token"));
        assert!(debug_str.contains("REDACTED"));
    }

    #[test]
    fn test_builder_rejects_empty_user() {
        let err = Session::builder("  ").build().unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_builder_rejects_bad_base_url() {
        let err = Session::builder("FA12345")
            .config(ClientConfig::default().with_base_url("not a url"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::UrlParse(_)));
    }

    #[tokio::test]
    async fn test_initial_state() {
        let session = Session::builder("FA12345").debug(true).build().unwrap();
        assert_eq!(session.user_id().await, "FA12345");
        assert_eq!(session.account_id().await, "FA12345");
        assert!(!session.is_authenticated().await);
        assert!(session.is_debug());

        let resumed = Session::builder("FA12345").access_token("T0").build().unwrap();
        assert!(resumed.is_authenticated().await);
        assert_eq!(resumed.access_token().await.unwrap().expose_secret(), "T0");

        let empty = Session::builder("FA12345").access_token("").build().unwrap();
        assert!(!empty.is_authenticated().await);
    }
}

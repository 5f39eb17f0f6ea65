//! The request channel: one symbolic route in, one decoded payload out.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::auth::SharedState;
use crate::Result;

use super::config::ClientConfig;
use super::routes::{Route, RouteTable};
use super::transport::Transport;

const METHOD: &str = "POST";
const REDACTED: &str = "[REDACTED]";
/// Fields masked in debug logs, in requests and responses alike. The login
/// payload only carries digests of `pwd`, `dpin` and `appkey`, but a digest
/// is still a credential.
const SENSITIVE_FIELDS: &[&str] = &["pwd", "pin", "dpin", "factor2", "appkey", "susertoken"];

/// Builds and sends Noren requests on behalf of a [`Session`](crate::Session).
///
/// The channel holds no token of its own. It reads the session's current
/// token from the shared session state each time a body is composed, so it
/// always sends whatever the last successful login produced.
pub(crate) struct RequestChannel {
    transport: Arc<dyn Transport>,
    base_url: String,
    routes: RouteTable,
    state: SharedState,
    debug: bool,
}

impl RequestChannel {
    pub(crate) fn new(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
        state: SharedState,
        debug: bool,
    ) -> Self {
        Self {
            transport,
            base_url: config.base_url().to_string(),
            routes: config.routes.clone(),
            state,
            debug,
        }
    }

    /// Send `params` to `route` and return the decoded response body.
    pub(crate) async fn send<P>(&self, route: Route, params: &P) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let data = serde_json::to_string(params)?;
        let token = self
            .state
            .read()
            .await
            .access_token
            .as_ref()
            .map(|t| t.expose_secret().to_string());

        let path = self.routes.path(route);
        let url = format!("{}{}", self.base_url, path);
        let body = compose_body(&data, token.as_deref());

        tracing::debug!(route = %route, path, "resolved route");
        if self.debug {
            let masked = redact(serde_json::to_value(params)?).to_string();
            let logged = compose_body(&masked, token.as_ref().map(|_| REDACTED));
            tracing::info!(path, method = METHOD, body = %logged, "Request");
        }

        match self.transport.post(&url, body).await {
            Ok(response) => {
                if self.debug {
                    let logged = redact(response.clone());
                    tracing::info!(path, method = METHOD, data = %logged, "Response");
                }
                Ok(response)
            }
            Err(err) => {
                if self.debug {
                    tracing::error!(path, method = METHOD, error = %err, "Request failed");
                }
                Err(err)
            }
        }
    }

    /// Send `params` to `route` and deserialize the response into `T`.
    pub(crate) async fn post<T, P>(&self, route: Route, params: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let value = self.send(route, params).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Noren wire format: `jData=<json>` followed by `&jKey=<token>` once a
/// session token exists. The JSON is sent verbatim, as the server expects.
fn compose_body(data: &str, token: Option<&str>) -> String {
    match token {
        Some(token) => format!("jData={}&jKey={}", data, token),
        None => format!("jData={}", data),
    }
}

fn redact(mut params: Value) -> Value {
    if let Value::Object(fields) = &mut params {
        for (key, value) in fields.iter_mut() {
            if SENSITIVE_FIELDS.contains(&key.as_str()) {
                *value = Value::String(REDACTED.to_string());
            }
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use secrecy::SecretString;
    use std::sync::Mutex;
    use tokio::sync::RwLock;

    use crate::auth::SessionState;
    use crate::Error;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn post(&self, url: &str, body: String) -> Result<Value> {
            self.calls.lock().unwrap().push((url.to_string(), body));
            if self.fail {
                Err(Error::from_api_response(503, Value::Null))
            } else {
                Ok(serde_json::json!({"stat": "Ok"}))
            }
        }
    }

    fn channel(recorder: Arc<Recorder>, token: Option<&str>) -> RequestChannel {
        let state = Arc::new(RwLock::new(SessionState {
            user_id: "FA12345".into(),
            access_token: token.map(|t| SecretString::from(t.to_string())),
        }));
        let config = ClientConfig::default().with_base_url("http://noren.test/api/");
        RequestChannel::new(&config, recorder, state, true)
    }

    #[test]
    fn test_compose_body() {
        assert_eq!(compose_body("{}", None), "jData={}");
        assert_eq!(compose_body(r#"{"a":1}"#, Some("T1")), r#"jData={"a":1}&jKey=T1"#);
    }

    #[test]
    fn test_redact_masks_credentials() {
        let params = serde_json::json!({
            "uid": "FA12345",
            "pin": "1234",
            "factor2": "987654",
            "dpin": "03ac67",
            "imei": "abc1234"
        });
        let masked = redact(params);

        assert_eq!(masked["uid"], "FA12345");
        assert_eq!(masked["imei"], "abc1234");
        assert_eq!(masked["pin"], REDACTED);
        assert_eq!(masked["factor2"], REDACTED);
        assert_eq!(masked["dpin"], REDACTED);
    }

    #[tokio::test]
    async fn test_debug_logging_leaves_wire_body_unmasked() {
        let recorder = Arc::new(Recorder::default());
        let channel = channel(recorder.clone(), None);

        channel
            .send(Route::SetPin, &serde_json::json!({"uid": "FA12345", "pin": "1234"}))
            .await
            .unwrap();

        let calls = recorder.calls.lock().unwrap();
        assert!(calls[0].1.contains(r#""pin":"1234""#));
    }

    #[tokio::test]
    async fn test_send_without_token() {
        let recorder = Arc::new(Recorder::default());
        let channel = channel(recorder.clone(), None);

        let response = channel
            .send(Route::Logout, &serde_json::json!({"uid": "FA12345"}))
            .await
            .unwrap();
        assert_eq!(response["stat"], "Ok");

        let calls = recorder.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "http://noren.test/api/Logout");
        assert_eq!(calls[0].1, r#"jData={"uid":"FA12345"}"#);
    }

    #[tokio::test]
    async fn test_send_reads_current_token() {
        let recorder = Arc::new(Recorder::default());
        let channel = channel(recorder.clone(), Some("T0"));

        channel.send(Route::Positions, &serde_json::json!({})).await.unwrap();
        channel.state.write().await.access_token = Some(SecretString::from("T1".to_string()));
        channel.send(Route::Positions, &serde_json::json!({})).await.unwrap();

        let calls = recorder.calls.lock().unwrap();
        assert!(calls[0].1.ends_with("&jKey=T0"));
        assert!(calls[1].1.ends_with("&jKey=T1"));
    }

    #[tokio::test]
    async fn test_send_propagates_transport_error() {
        let recorder = Arc::new(Recorder {
            fail: true,
            ..Default::default()
        });
        let channel = channel(recorder, None);

        let err = channel
            .send(Route::Holdings, &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(err.is_transport_error());
    }
}

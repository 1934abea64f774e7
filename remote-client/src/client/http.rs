// remote-client/src/client/http.rs
// HTTP client - network communication with the Zone/Scene Service

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::ServiceError;

use crate::{ClientConfig, ClientError, ClientResult};

/// Transport to the Zone/Scene Service
///
/// Every service call is a GET. Paths are absolute (`/assign/zone1`), see
/// [`shared::paths`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a request and decode its JSON reply
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;

    /// Issue a request whose reply carries nothing the caller needs
    async fn fire(&self, path: &str) -> ClientResult<()>;
}

/// Map a non-success status to an error
pub(crate) fn status_error(status: StatusCode, text: String) -> ClientError {
    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound(text),
        StatusCode::BAD_REQUEST => ClientError::Validation(text),
        _ => ClientError::Internal(format!("{}: {}", status, text)),
    }
}

/// Decode a reply body, rejecting bodies that report an `error`
pub(crate) fn decode_reply<T: DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))?;
    if let Some(err) = ServiceError::from_value(&value) {
        return Err(ClientError::Service(err.error));
    }
    serde_json::from_value(value)
        .map_err(|e| ClientError::InvalidResponse(format!("Unexpected reply: {}", e)))
}

/// Check a fire-and-forget reply: any body is ignored unless it reports an `error`
pub(crate) fn check_reply(bytes: &[u8]) -> ClientResult<()> {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(bytes)
        && let Some(err) = ServiceError::from_value(&value)
    {
        return Err(ClientError::Service(err.error));
    }
    Ok(())
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, path: &str) -> ClientResult<reqwest::Response> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(status_error(status, text));
        }
        Ok(response)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let body = self.send(path).await?.bytes().await?;
        decode_reply(&body)
    }

    async fn fire(&self, path: &str) -> ClientResult<()> {
        let body = self.send(path).await?.bytes().await?;
        check_reply(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = NetworkHttpClient::new(&ClientConfig::new("http://hub:5000/")).unwrap();
        assert_eq!(client.base_url(), "http://hub:5000");
        assert_eq!(client.url("/assign/zone1"), "http://hub:5000/assign/zone1");
    }

    #[test]
    fn test_decode_reply_rejects_error_body() {
        let err = decode_reply::<shared::AssignResponse>(br#"{"error":"No such zone"}"#)
            .unwrap_err();
        assert!(matches!(err, ClientError::Service(msg) if msg == "No such zone"));
    }

    #[test]
    fn test_check_reply_ignores_non_json() {
        assert!(check_reply(b"").is_ok());
        assert!(check_reply(br#"{"result":"ok"}"#).is_ok());
        assert!(check_reply(br#"{"error":"volume-up failed"}"#).is_err());
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "nope".into()),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, String::new()),
            ClientError::Internal(_)
        ));
    }
}

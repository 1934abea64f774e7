// remote-client/src/client/http_oneshot.rs
// Oneshot HTTP client - in-memory communication
//
// Requires the "in-process" feature

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::Request;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::{ClientError, ClientResult};

use super::http::{HttpClient, check_reply, decode_reply, status_error};

/// Oneshot HTTP client (in-memory calls)
///
/// Drives an Axum `Router` through Tower's `oneshot`, for a service living in
/// the same process. No network is involved.
///
/// # Example
///
/// ```ignore
/// use remote_client::OneshotHttpClient;
///
/// let client = OneshotHttpClient::new(remote_mock::router(state));
/// let zones: BTreeMap<String, ZoneInfo> = client.get("/zone").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
}

impl OneshotHttpClient {
    /// # Arguments
    /// * `router` - an initialized Router (`with_state` already applied)
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Execute the request and return the body of a successful reply
    async fn execute(&self, path: &str) -> ClientResult<Vec<u8>> {
        tracing::debug!(%path, "GET (in-process)");
        let request = Request::builder()
            .method(http::Method::GET)
            .uri(path)
            .body(Body::empty())
            .map_err(|e| ClientError::Validation(format!("Bad request path {}: {}", path, e)))?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body_bytes).to_string();
            return Err(status_error(status, text));
        }
        Ok(body_bytes.to_vec())
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let body = self.execute(path).await?;
        decode_reply(&body)
    }

    async fn fire(&self, path: &str) -> ClientResult<()> {
        let body = self.execute(path).await?;
        check_reply(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let client = OneshotHttpClient::new(Router::new());
        let err = client.fire("/nowhere").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_decodes_json() {
        let router = Router::new().route(
            "/",
            get(|| async { axum::Json(serde_json::json!({ "status": "ok" })) }),
        );
        let client = OneshotHttpClient::new(router);
        let status: shared::StatusResponse = client.get("/").await.unwrap();
        assert_eq!(status.status, "ok");
    }
}

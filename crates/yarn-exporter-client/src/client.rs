use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use yarn_exporter_common::error::{ExporterError, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the resource manager REST API.
///
/// One instance is shared by every collector; each request is bounded by the
/// timeout given at construction.
#[derive(Debug, Clone)]
pub struct YarnClient {
    base_url: Url,
    client: reqwest::Client,
}

impl YarnClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| {
                ExporterError::InvalidArgument(format!("failed to build http client: {err}"))
            })?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an API path against the base address. Absolute paths replace
    /// any path component of the base.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|err| {
            ExporterError::InvalidArgument(format!("invalid api path {path}: {err}"))
        })
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!(url = %url, "requesting upstream resource");

        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ExporterError::Upstream(format!("request to {url} timed out"))
                } else {
                    ExporterError::Upstream(format!("failed to request {url}: {err}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExporterError::Upstream(format!(
                "{url} returned status {status}"
            )));
        }

        response.json::<T>().await.map_err(|err| {
            ExporterError::Upstream(format!("failed to decode response from {url}: {err}"))
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ExporterError::InvalidArgument(
            "yarn url must not be empty".to_string(),
        ));
    }

    let url = Url::parse(&ensure_http_scheme(trimmed))
        .map_err(|err| ExporterError::InvalidArgument(format!("invalid yarn url {raw}: {err}")))?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(ExporterError::InvalidArgument(format!(
            "yarn url must be an http(s) address: {raw}"
        ))),
    }
}

fn ensure_http_scheme(endpoint: &str) -> String {
    if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("http://{endpoint}")
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde::Deserialize;
    use tokio::net::TcpListener;
    use yarn_exporter_common::ExporterError;

    use super::{DEFAULT_TIMEOUT, YarnClient};

    #[derive(Debug, Deserialize)]
    struct Echo {
        state: String,
    }

    async fn spawn_upstream(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn absolute_paths_replace_the_base_path() {
        let client = YarnClient::new("http://rm.example:8088/proxy/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            client.endpoint("/ws/v1/cluster/info").unwrap().as_str(),
            "http://rm.example:8088/ws/v1/cluster/info"
        );
    }

    #[test]
    fn scheme_defaults_to_http() {
        let client = YarnClient::new("rm.example:8088", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url().as_str(), "http://rm.example:8088/");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        for raw in ["", "   ", "ftp://rm.example", "http://"] {
            assert!(
                matches!(
                    YarnClient::new(raw, DEFAULT_TIMEOUT),
                    Err(ExporterError::InvalidArgument(_))
                ),
                "{raw:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn decodes_successful_responses_and_forwards_query() {
        let router = Router::new().route(
            "/ws/v1/cluster/apps",
            get(
                |axum::extract::RawQuery(query): axum::extract::RawQuery| async move {
                    Json(serde_json::json!({ "state": query.unwrap_or_default() }))
                },
            ),
        );
        let base = spawn_upstream(router).await;
        let client = YarnClient::new(&base, DEFAULT_TIMEOUT).unwrap();

        let echo: Echo = client
            .get_json("/ws/v1/cluster/apps", &[("states", "running")])
            .await
            .unwrap();
        assert_eq!(echo.state, "states=running");
    }

    #[tokio::test]
    async fn error_status_is_an_upstream_error() {
        let router = Router::new().route(
            "/ws/v1/cluster/info",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn_upstream(router).await;
        let client = YarnClient::new(&base, DEFAULT_TIMEOUT).unwrap();

        let err = client
            .get_json::<Echo>("/ws/v1/cluster/info", &[])
            .await
            .unwrap_err();
        assert!(err.is_upstream());
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn malformed_body_is_an_upstream_error() {
        let router = Router::new().route("/ws/v1/cluster/info", get(|| async { "not json" }));
        let base = spawn_upstream(router).await;
        let client = YarnClient::new(&base, DEFAULT_TIMEOUT).unwrap();

        let err = client
            .get_json::<Echo>("/ws/v1/cluster/info", &[])
            .await
            .unwrap_err();
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn slow_upstream_is_bounded_by_timeout() {
        let router = Router::new().route(
            "/ws/v1/cluster/info",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(serde_json::json!({ "state": "late" }))
            }),
        );
        let base = spawn_upstream(router).await;
        let client = YarnClient::new(&base, Duration::from_millis(100)).unwrap();

        let err = client
            .get_json::<Echo>("/ws/v1/cluster/info", &[])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}

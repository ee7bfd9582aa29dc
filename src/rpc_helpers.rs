use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use crate::config;

/// Ordered pool of RPC endpoint URLs plus a rotation cursor. The cursor moves
/// once per top-level query (not per endpoint attempt), so independent queries
/// start from different endpoints and the load spreads over the pool.
pub struct EndpointPool {
    endpoints: Vec<String>,
    rotation: AtomicUsize,
}

impl EndpointPool {
    pub fn new(endpoints: Vec<String>) -> Self {
        Self {
            endpoints,
            rotation: AtomicUsize::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    fn start_offset(&self) -> usize {
        self.rotation.load(Ordering::Relaxed)
    }

    fn advance(&self) {
        self.rotation.fetch_add(1, Ordering::Relaxed);
    }

    fn endpoint(&self, n: usize) -> &str {
        &self.endpoints[n % self.endpoints.len()]
    }
}

pub struct RpcClient {
    pub(crate) http: reqwest::Client,
    pool: EndpointPool,
}

impl RpcClient {
    pub fn new(endpoints: Vec<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            pool: EndpointPool::new(endpoints),
        }
    }

    pub fn from_config(config: &config::Config) -> Self {
        Self::new(config.rpc_endpoints.clone())
    }

    /// Tries the request against every endpoint of the pool, starting at the
    /// rotation cursor, and settles on the first response that parsed and
    /// carries no `error` field. Failures of individual endpoints are
    /// swallowed; there is no pause between attempts. When every endpoint
    /// misbehaves the last error-bearing response (or `None` if nothing even
    /// parsed) is handed back, so callers must check for an `error` payload.
    pub async fn query<F, Fut>(&self, request: F) -> Option<Value>
    where
        F: Fn(&str) -> Fut,
        Fut: Future<Output = crate::Result<Value>>,
    {
        let start = self.pool.start_offset();
        let mut result = None;
        for n in 0..self.pool.len() {
            let endpoint = self.pool.endpoint(start.wrapping_add(n));
            match request(endpoint).await {
                Ok(response) => {
                    let failed = response.get("error").map_or(false, |error| !error.is_null());
                    result = Some(response);
                    if !failed {
                        break;
                    }
                    tracing::debug!(
                        target: crate::LOGGER_MSG,
                        "RPC endpoint {} returned an error, trying the next one",
                        endpoint
                    );
                }
                Err(err) => {
                    tracing::debug!(
                        target: crate::LOGGER_MSG,
                        "RPC endpoint {} failed: {}",
                        endpoint,
                        err
                    );
                }
            }
        }
        self.pool.advance();
        result
    }

    /// JSON-RPC 2.0 call fanned over the endpoint pool.
    pub async fn call_method(&self, method: &str, params: Value) -> Option<Value> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": "dontcare",
            "method": method,
            "params": params,
        });
        self.query(|endpoint| {
            let http = self.http.clone();
            let body = body.clone();
            let endpoint = endpoint.to_owned();
            async move {
                Ok(http
                    .post(&endpoint)
                    .json(&body)
                    .send()
                    .await?
                    .json::<Value>()
                    .await?)
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors;
    use serde_json::json;
    use std::sync::Mutex;

    fn client(endpoints: &[&str]) -> RpcClient {
        RpcClient::new(endpoints.iter().map(|endpoint| endpoint.to_string()).collect())
    }

    #[tokio::test]
    async fn test_query_falls_over_to_the_first_working_endpoint() {
        let rpc_client = client(&["one", "two", "three"]);
        let attempts = Mutex::new(Vec::new());
        let response = rpc_client
            .query(|endpoint| {
                attempts.lock().unwrap().push(endpoint.to_owned());
                let endpoint = endpoint.to_owned();
                async move {
                    match endpoint.as_str() {
                        "three" => Ok(json!({ "result": 42 })),
                        _ => Err(errors::ErrorKind::SourceError(
                            "connection refused".to_string(),
                        )
                        .into()),
                    }
                }
            })
            .await;
        assert_eq!(response, Some(json!({ "result": 42 })));
        assert_eq!(*attempts.lock().unwrap(), vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_query_keeps_the_error_payload_when_every_endpoint_errors() {
        let rpc_client = client(&["one", "two", "three"]);
        let attempts = Mutex::new(0usize);
        let response = rpc_client
            .query(|endpoint| {
                *attempts.lock().unwrap() += 1;
                let endpoint = endpoint.to_owned();
                async move { Ok(json!({ "error": format!("{} is broken", endpoint) })) }
            })
            .await;
        assert_eq!(response, Some(json!({ "error": "three is broken" })));
        assert_eq!(*attempts.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_query_returns_none_when_nothing_parses() {
        let rpc_client = client(&["one", "two"]);
        let response = rpc_client
            .query(|_endpoint| async {
                Err(errors::ErrorKind::SourceError("no route to host".to_string()).into())
            })
            .await;
        assert_eq!(response, None);
    }

    #[tokio::test]
    async fn test_query_rotates_the_starting_endpoint() {
        let rpc_client = client(&["one", "two", "three"]);
        let attempts = Mutex::new(Vec::new());
        for _ in 0..2 {
            rpc_client
                .query(|endpoint| {
                    attempts.lock().unwrap().push(endpoint.to_owned());
                    async { Ok(json!({ "result": "ok" })) }
                })
                .await;
        }
        assert_eq!(*attempts.lock().unwrap(), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_query_ignores_a_null_error_field() {
        let rpc_client = client(&["one", "two"]);
        let attempts = Mutex::new(0usize);
        let response = rpc_client
            .query(|_endpoint| {
                *attempts.lock().unwrap() += 1;
                async { Ok(json!({ "result": 7, "error": null })) }
            })
            .await;
        assert_eq!(response, Some(json!({ "result": 7, "error": null })));
        assert_eq!(*attempts.lock().unwrap(), 1);
    }
}

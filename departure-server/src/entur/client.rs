//! Entur journey planner HTTP client.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::domain::DepartureRow;

use super::convert::convert_estimated_calls;
use super::error::{UpstreamError, excerpt};
use super::types::{DepartureVariables, GraphRequest, GraphResponse};

/// Default GraphQL endpoint for the journey planner.
const DEFAULT_BASE_URL: &str = "https://api.entur.io/journey-planner/v3/graphql";

/// Header Entur uses to identify the calling application.
const CLIENT_NAME_HEADER: &str = "et-client-name";

/// The one query we send. Empty `whitelistLines` must be `null`, not `[]`:
/// an empty whitelist excludes every line.
pub const DEPARTURES_QUERY: &str = r#"
query Departures(
  $stopId: String!,
  $n: Int!,
  $timeRange: Int!,
  $whitelistLines: [ID!]
) {
  stopPlace(id: $stopId) {
    id
    name
    estimatedCalls(
      numberOfDepartures: $n,
      timeRange: $timeRange,
      whiteListed: { lines: $whitelistLines }
    ) {
      realtime
      aimedDepartureTime
      expectedDepartureTime
      cancellation
      destinationDisplay { frontText }
      quay { name publicCode }
      serviceJourney {
        line { id name publicCode transportMode }
        journeyPattern { directionType line { transportMode } }
      }
    }
  }
}
"#;

/// Configuration for the Entur client.
#[derive(Debug, Clone)]
pub struct EnturConfig {
    /// Sent as `ET-Client-Name`, conventionally "<company>-<application>"
    pub client_name: String,
    /// GraphQL endpoint (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl EnturConfig {
    /// Create a new config with the given client name.
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom endpoint (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Entur journey planner client.
#[derive(Debug, Clone)]
pub struct EnturClient {
    http: reqwest::Client,
    base_url: String,
}

impl EnturClient {
    /// Create a new client with the given configuration.
    pub fn new(config: EnturConfig) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();

        let client_name = HeaderValue::from_str(&config.client_name)
            .map_err(|_| UpstreamError::InvalidClientName(config.client_name.clone()))?;
        headers.insert(HeaderName::from_static(CLIENT_NAME_HEADER), client_name);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch upcoming departures from a stop place.
    ///
    /// # Arguments
    ///
    /// * `stop_id` - Stop place id, e.g. "NSR:StopPlace:58366"
    /// * `count` - Maximum number of estimated calls to return
    /// * `time_range_secs` - How far ahead to look, in seconds
    /// * `whitelist_lines` - Line ids to restrict to; empty means every line
    ///
    /// A single request is made. Failures are returned as is, never retried.
    pub async fn fetch_departures(
        &self,
        stop_id: &str,
        count: u32,
        time_range_secs: u32,
        whitelist_lines: &[String],
    ) -> Result<Vec<DepartureRow>, UpstreamError> {
        let request = GraphRequest {
            query: DEPARTURES_QUERY,
            variables: DepartureVariables {
                stop_id,
                n: count,
                time_range: time_range_secs,
                whitelist_lines: (!whitelist_lines.is_empty()).then_some(whitelist_lines),
            },
        };

        debug!(
            stop_id,
            count,
            time_range_secs,
            whitelisted = whitelist_lines.len(),
            "querying Entur departures"
        );

        let response = self.http.post(&self.base_url).json(&request).send().await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Http {
                status: status.as_u16(),
                excerpt: excerpt(&body),
            });
        }

        let body = response.text().await?;

        let parsed: GraphResponse =
            serde_json::from_str(&body).map_err(|e| UpstreamError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        if let Some(messages) = parsed.error_messages() {
            return Err(UpstreamError::Graph { messages });
        }

        let rows = convert_estimated_calls(parsed.data.as_ref()).map_err(|e| {
            UpstreamError::Json {
                message: e.to_string(),
                body: None,
            }
        })?;

        debug!(stop_id, rows = rows.len(), "Entur departures received");

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::{Json, Router, http::HeaderMap as AxumHeaders, http::StatusCode, routing::post};
    use serde_json::Value;

    /// What the fake upstream saw: (ET-Client-Name, request body).
    type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    /// Serve a canned response on an ephemeral port, returning its URL.
    async fn fake_entur(status: StatusCode, body: String) -> (String, Seen) {
        let seen: Seen = Arc::default();
        let recorder = seen.clone();

        let app = Router::new().route(
            "/graphql",
            post(move |headers: AxumHeaders, Json(request): Json<Value>| {
                let recorder = recorder.clone();
                let body = body.clone();
                async move {
                    let client_name = headers
                        .get("et-client-name")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    recorder.lock().unwrap().push((client_name, request));
                    (status, body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/graphql"), seen)
    }

    fn client(url: &str) -> EnturClient {
        EnturClient::new(EnturConfig::new("acme-departures").with_base_url(url)).unwrap()
    }

    const TWO_CALLS: &str = r#"{
        "data": {
            "stopPlace": {
                "id": "NSR:StopPlace:58366",
                "name": "Jernbanetorget",
                "estimatedCalls": [
                    {
                        "realtime": true,
                        "aimedDepartureTime": "2024-03-15T10:30:00+01:00",
                        "expectedDepartureTime": "2024-03-15T10:31:00+01:00",
                        "cancellation": false,
                        "destinationDisplay": {"frontText": "Snarøya"},
                        "quay": {"name": "Jernbanetorget", "publicCode": "E"},
                        "serviceJourney": {
                            "line": {"id": "RUT:Line:31", "publicCode": "31", "transportMode": "bus"},
                            "journeyPattern": {"directionType": "outbound"}
                        }
                    },
                    {
                        "realtime": false,
                        "aimedDepartureTime": "2024-03-15T10:35:00+01:00",
                        "cancellation": true,
                        "destinationDisplay": {"frontText": "Ljabru"},
                        "quay": {"name": "Spor 2"},
                        "serviceJourney": {
                            "line": {"id": "RUT:Line:19", "publicCode": "19", "transportMode": "tram"},
                            "journeyPattern": {"directionType": "inbound"}
                        }
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn config_builder() {
        let config = EnturConfig::new("acme-departures")
            .with_base_url("http://localhost:8080/graphql")
            .with_timeout(5);

        assert_eq!(config.client_name, "acme-departures");
        assert_eq!(config.base_url, "http://localhost:8080/graphql");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_defaults() {
        let config = EnturConfig::new("acme-departures");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        assert!(EnturClient::new(EnturConfig::new("acme-departures")).is_ok());
    }

    #[test]
    fn client_name_must_be_header_safe() {
        let err = EnturClient::new(EnturConfig::new("bad\nname")).unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidClientName(_)));
    }

    #[test]
    fn query_is_named_departures() {
        assert!(DEPARTURES_QUERY.contains("query Departures("));
        assert!(DEPARTURES_QUERY.contains("whiteListed: { lines: $whitelistLines }"));
    }

    #[tokio::test]
    async fn fetches_and_converts_rows() {
        let (url, seen) = fake_entur(StatusCode::OK, TWO_CALLS.to_string()).await;

        let rows = client(&url)
            .fetch_departures("NSR:StopPlace:58366", 10, 7200, &[])
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, "31");
        assert_eq!(rows[0].track_or_stop, "E");
        assert_eq!(rows[1].line, "19");
        assert!(rows[1].canceled);
        assert_eq!(rows[1].track_or_stop, "2");
        assert_eq!(rows[1].direction, "inbound");

        let seen = seen.lock().unwrap();
        let (client_name, request) = &seen[0];
        assert_eq!(client_name.as_deref(), Some("acme-departures"));
        assert_eq!(request["variables"]["stopId"], "NSR:StopPlace:58366");
        assert_eq!(request["variables"]["n"], 10);
        assert_eq!(request["variables"]["timeRange"], 7200);
        assert!(request["variables"]["whitelistLines"].is_null());
        assert!(request["query"].as_str().unwrap().contains("stopPlace"));
    }

    #[tokio::test]
    async fn sends_line_whitelist() {
        let (url, seen) = fake_entur(StatusCode::OK, TWO_CALLS.to_string()).await;
        let whitelist = vec!["RUT:Line:31".to_string(), "RUT:Line:19".to_string()];

        client(&url)
            .fetch_departures("NSR:StopPlace:58366", 5, 3600, &whitelist)
            .await
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            seen[0].1["variables"]["whitelistLines"],
            serde_json::json!(["RUT:Line:31", "RUT:Line:19"])
        );
    }

    #[tokio::test]
    async fn http_error_carries_status_and_excerpt() {
        let body = "x".repeat(400);
        let (url, _) = fake_entur(StatusCode::SERVICE_UNAVAILABLE, body).await;

        let err = client(&url)
            .fetch_departures("NSR:StopPlace:58366", 10, 7200, &[])
            .await
            .unwrap_err();

        match err {
            UpstreamError::Http { status, excerpt } => {
                assert_eq!(status, 503);
                assert_eq!(excerpt, "x".repeat(160));
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn graph_errors_are_surfaced() {
        let body = r#"{"data": null, "errors": [{"message": "Invalid stop id"}, {"message": "Try again"}]}"#;
        let (url, seen) = fake_entur(StatusCode::OK, body.to_string()).await;

        let err = client(&url)
            .fetch_departures("bogus", 10, 7200, &[])
            .await
            .unwrap_err();

        match err {
            UpstreamError::Graph { messages } => assert_eq!(messages, "Invalid stop id; Try again"),
            other => panic!("expected Graph error, got {other:?}"),
        }
        // Not retried.
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn malformed_body_is_a_json_error() {
        let (url, _) = fake_entur(StatusCode::OK, "<html>oops</html>".to_string()).await;

        let err = client(&url)
            .fetch_departures("NSR:StopPlace:58366", 10, 7200, &[])
            .await
            .unwrap_err();

        assert!(matches!(err, UpstreamError::Json { .. }));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}/graphql"))
            .fetch_departures("NSR:StopPlace:58366", 10, 7200, &[])
            .await
            .unwrap_err();

        assert!(matches!(err, UpstreamError::Transport(_)));
    }
}

//! USPS HTTP client.
//!
//! Talks to the carrier's JSON gateway for the Web Tools APIs. Handles
//! endpoint selection (test vs. live), status mapping and carrier-level
//! error bodies. Parsing of prices lives in `convert`.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::{Credentials, Mode};

use super::carrier::RateCarrier;
use super::error::UspsError;
use super::types::{CarrierErrorBody, DeliveryRoute, RatePackage, RawRateResponse};

/// Default base URL for production requests.
const DEFAULT_LIVE_URL: &str = "https://secure.shippingapis.com/ShippingAPI.dll";

/// Default base URL for test requests.
const DEFAULT_TEST_URL: &str = "https://stg-secure.shippingapis.com/ShippingAPI.dll";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Revision "2" makes USPS include every postage field in the response.
const RATE_V4_REVISION: &str = "2";

/// Configuration for the USPS client.
#[derive(Debug, Clone)]
pub struct UspsClientConfig {
    /// Base URL used in live mode
    pub live_url: String,
    /// Base URL used in test mode
    pub test_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl UspsClientConfig {
    /// Create a config pointing at the USPS endpoints.
    pub fn new() -> Self {
        Self {
            live_url: DEFAULT_LIVE_URL.to_string(),
            test_url: DEFAULT_TEST_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Use one base URL for both modes (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.live_url = url.clone();
        self.test_url = url;
        self
    }

    /// Set the live base URL.
    pub fn with_live_url(mut self, url: impl Into<String>) -> Self {
        self.live_url = url.into();
        self
    }

    /// Set the test base URL.
    pub fn with_test_url(mut self, url: impl Into<String>) -> Self {
        self.test_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for UspsClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct RateV4Request<'a> {
    #[serde(rename = "USERID")]
    user_id: &'a str,
    revision: &'static str,
    package: &'a RatePackage,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DeliveryRequest<'a> {
    #[serde(rename = "USERID")]
    user_id: &'a str,
    route: &'a DeliveryRoute,
}

/// USPS API client.
///
/// Authenticates by user id alone; the password is never sent.
#[derive(Debug, Clone)]
pub struct UspsClient {
    http: reqwest::Client,
    live_url: String,
    test_url: String,
    user_id: String,
    test_mode: bool,
}

impl UspsClient {
    /// Create a new client. Call [`RateCarrier::configure`] before use.
    pub fn new(config: UspsClientConfig) -> Result<Self, UspsError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            live_url: config.live_url,
            test_url: config.test_url,
            user_id: String::new(),
            test_mode: true,
        })
    }

    /// Whether requests go to the test endpoint.
    pub fn is_test_mode(&self) -> bool {
        self.test_mode
    }

    /// Base URL for the current mode.
    pub fn base_url(&self) -> &str {
        if self.test_mode {
            &self.test_url
        } else {
            &self.live_url
        }
    }

    async fn post<B: Serialize>(&self, api: &str, body: &B) -> Result<Value, UspsError> {
        if self.user_id.is_empty() {
            return Err(UspsError::NotConfigured("USPS user id is empty".to_string()));
        }

        let url = format!("{}/{}", self.base_url(), api);
        debug!(%url, "sending USPS request");

        let response = self.http.post(&url).json(body).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(UspsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(UspsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UspsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let value: Value = serde_json::from_str(&body).map_err(|e| UspsError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        match carrier_error(&value) {
            Some(err) => Err(err),
            None => Ok(value),
        }
    }
}

impl RateCarrier for UspsClient {
    fn configure(&mut self, credentials: &Credentials, mode: Mode) {
        self.user_id = credentials.user_id.clone();
        self.test_mode = mode.is_test();
    }

    async fn quote(&self, package: &RatePackage) -> Result<RawRateResponse, UspsError> {
        let request = RateV4Request {
            user_id: &self.user_id,
            revision: RATE_V4_REVISION,
            package,
        };

        self.post("RateV4", &request).await.map(RawRateResponse)
    }

    async fn delivery_estimate(&self, route: &DeliveryRoute) -> Result<Value, UspsError> {
        let request = DeliveryRequest {
            user_id: &self.user_id,
            route,
        };

        self.post("SDCGetLocations", &request).await
    }
}

/// Detect a request-level `Error` element.
///
/// USPS reports bad credentials and malformed requests with HTTP 200 and a
/// top-level `Error`. Package-level errors are left for conversion, which
/// treats them as "no rates".
fn carrier_error(value: &Value) -> Option<UspsError> {
    let body = value.get("Error")?;
    let body: CarrierErrorBody = serde_json::from_value(body.clone()).ok()?;

    Some(UspsError::Carrier {
        number: body.number.unwrap_or_default(),
        description: body.description.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usps::types::{CarrierAddress, Container, PackageSize, RouteType, ServiceClass};
    use httpmock::prelude::*;
    use serde_json::json;

    fn credentials() -> Credentials {
        Credentials {
            user_id: "TESTUSER".into(),
            password: "secret".into(),
        }
    }

    fn package() -> RatePackage {
        RatePackage {
            service: ServiceClass::All,
            zip_origination: "90210".into(),
            zip_destination: "10001".into(),
            pounds: Some(2),
            ounces: None,
            container: Container::Variable,
            size: PackageSize::Regular,
            machinable: true,
            ship_date: "2024-03-15".into(),
            origin: CarrierAddress::default(),
            destination: CarrierAddress::default(),
        }
    }

    fn client_for(server: &MockServer, mode: Mode) -> UspsClient {
        let config = UspsClientConfig::new()
            .with_live_url(server.url("/live"))
            .with_test_url(server.url("/test"));
        let mut client = UspsClient::new(config).unwrap();
        client.configure(&credentials(), mode);
        client
    }

    #[test]
    fn config_builder() {
        let config = UspsClientConfig::new()
            .with_live_url("http://live")
            .with_test_url("http://test")
            .with_timeout(5);

        assert_eq!(config.live_url, "http://live");
        assert_eq!(config.test_url, "http://test");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_defaults() {
        let config = UspsClientConfig::default();

        assert_eq!(config.live_url, DEFAULT_LIVE_URL);
        assert_eq!(config.test_url, DEFAULT_TEST_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn configure_selects_endpoint() {
        let config = UspsClientConfig::new()
            .with_live_url("http://live")
            .with_test_url("http://test");
        let mut client = UspsClient::new(config).unwrap();

        client.configure(&credentials(), Mode::Live);
        assert!(!client.is_test_mode());
        assert_eq!(client.base_url(), "http://live");

        client.configure(&credentials(), Mode::Test);
        assert!(client.is_test_mode());
        assert_eq!(client.base_url(), "http://test");
    }

    #[tokio::test]
    async fn quote_posts_package_to_test_endpoint() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/test/RateV4")
                    .json_body_partial(r#"{"USERID": "TESTUSER", "Package": {"ZipDestination": "10001"}}"#);
                then.status(200)
                    .json_body(json!({"RateV4Response": {"Package": {}}}));
            })
            .await;

        let client = client_for(&server, Mode::Test);
        let raw = client.quote(&package()).await.unwrap();

        mock.assert_async().await;
        assert!(raw.as_value().get("RateV4Response").is_some());
    }

    #[tokio::test]
    async fn live_mode_uses_live_endpoint() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/live/RateV4");
                then.status(200).json_body(json!({}));
            })
            .await;

        let client = client_for(&server, Mode::Live);
        client.quote(&package()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn password_is_not_sent() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/test/RateV4").body_contains("secret");
                then.status(200).json_body(json!({}));
            })
            .await;
        let fallback = server
            .mock_async(|when, then| {
                when.method(POST).path("/test/RateV4");
                then.status(200).json_body(json!({}));
            })
            .await;

        let client = client_for(&server, Mode::Test);
        client.quote(&package()).await.unwrap();

        assert_eq!(mock.hits_async().await, 0);
        assert_eq!(fallback.hits_async().await, 1);
    }

    #[tokio::test]
    async fn top_level_error_is_carrier_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/test/RateV4");
                then.status(200).json_body(json!({
                    "Error": {"Number": "80040B1A", "Description": "Authorization failure."}
                }));
            })
            .await;

        let client = client_for(&server, Mode::Test);
        let err = client.quote(&package()).await.unwrap_err();

        match err {
            UspsError::Carrier {
                number,
                description,
            } => {
                assert_eq!(number, "80040B1A");
                assert_eq!(description, "Authorization failure.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/test/RateV4");
                then.status(401);
            })
            .await;

        let client = client_for(&server, Mode::Test);
        let err = client.quote(&package()).await.unwrap_err();

        assert!(matches!(err, UspsError::Unauthorized));
    }

    #[tokio::test]
    async fn server_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/test/RateV4");
                then.status(503).body("down for maintenance");
            })
            .await;

        let client = client_for(&server, Mode::Test);
        let err = client.quote(&package()).await.unwrap_err();

        match err {
            UspsError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "down for maintenance");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn non_json_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/test/RateV4");
                then.status(200).body("<Error/>");
            })
            .await;

        let client = client_for(&server, Mode::Test);
        let err = client.quote(&package()).await.unwrap_err();

        assert!(matches!(err, UspsError::Json { .. }));
    }

    #[tokio::test]
    async fn unconfigured_client_makes_no_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({}));
            })
            .await;

        let config = UspsClientConfig::new().with_base_url(server.base_url());
        let client = UspsClient::new(config).unwrap();
        let err = client.quote(&package()).await.unwrap_err();

        assert!(matches!(err, UspsError::NotConfigured(_)));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn delivery_estimate_passes_body_through() {
        let server = MockServer::start_async().await;
        let body = json!({"SDCGetLocationsResponse": {"Expedited": {"EAD": "2024-03-18"}}});
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/test/SDCGetLocations")
                    .json_body_partial(r#"{"Route": {"MailClass": 3, "OriginZip": "90210", "DestinationZip": "10001"}}"#);
                then.status(200).json_body(body.clone());
            })
            .await;

        let client = client_for(&server, Mode::Test);
        let route = DeliveryRoute::new(RouteType::Ground, "90210", "10001");
        let response = client.delivery_estimate(&route).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response, body);
    }
}

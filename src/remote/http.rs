//! remote::http
//!
//! HTTP implementation of the city collection using a JSON REST API.
//!
//! # Design
//!
//! Every method issues exactly one request against `<api_base>cities` and
//! maps the outcome onto [`RemoteError`]:
//!
//! - transport failures become `Network`
//! - `404` becomes `NotFound`, except on delete where the record is
//!   already gone and the call succeeds
//! - any other non-success status becomes `Api`
//! - a success status with an unreadable body becomes `Decode`
//!
//! There is no retry and no timeout. A request in flight runs to completion.
//!
//! # Example
//!
//! ```ignore
//! use worldwise::remote::http::HttpCityCollection;
//! use worldwise::remote::CityCollection;
//!
//! let collection = HttpCityCollection::new("http://localhost:8000/")?;
//! let cities = collection.list_cities().await?;
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::traits::{CityCollection, RemoteError};
use crate::core::types::{City, CityId, NewCity};

/// Path segment of the city resource below the API base.
const CITIES_RESOURCE: &str = "cities";

/// User-Agent header value for API requests.
pub const DEFAULT_USER_AGENT: &str = concat!("worldwise/", env!("CARGO_PKG_VERSION"));

/// City collection backed by a REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpCityCollection {
    /// HTTP client for making requests
    client: Client,
    /// Absolute URL of the city resource, without trailing slash
    endpoint: String,
}

impl HttpCityCollection {
    /// Create a collection for the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBaseUrl` if `api_base` is not an absolute http(s) URL.
    pub fn new(api_base: &str) -> Result<Self, RemoteError> {
        Self::with_user_agent(api_base, DEFAULT_USER_AGENT)
    }

    /// Create a collection that identifies itself with a custom User-Agent.
    pub fn with_user_agent(api_base: &str, user_agent: &str) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .user_agent(user_agent.to_string())
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        Self::with_client(client, api_base)
    }

    /// Create a collection around an existing HTTP client.
    pub fn with_client(client: Client, api_base: &str) -> Result<Self, RemoteError> {
        Ok(Self {
            client,
            endpoint: cities_endpoint(api_base)?,
        })
    }

    /// Absolute URL of the city resource.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build URL for a single city.
    fn city_url(&self, id: CityId) -> String {
        format!("{}/{}", self.endpoint, id)
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Decode a success body, or map the failure status.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
        subject: &str,
    ) -> Result<T, RemoteError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| RemoteError::Decode(format!("{}: {}", subject, e)))
        } else {
            Err(Self::error_for_status(response, status, subject).await)
        }
    }

    /// Map a non-success response to an error.
    pub(super) async fn error_for_status(
        response: Response,
        status: StatusCode,
        subject: &str,
    ) -> RemoteError {
        if status == StatusCode::NOT_FOUND {
            return RemoteError::NotFound(subject.to_string());
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            body.trim().to_string()
        };

        RemoteError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl CityCollection for HttpCityCollection {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn list_cities(&self) -> Result<Vec<City>, RemoteError> {
        log::debug!("GET {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .headers(Self::headers())
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        self.handle_response(response, "city list").await
    }

    async fn get_city(&self, id: CityId) -> Result<City, RemoteError> {
        let url = self.city_url(id);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(Self::headers())
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        self.handle_response(response, &format!("city {}", id)).await
    }

    async fn create_city(&self, draft: NewCity) -> Result<City, RemoteError> {
        log::debug!("POST {} ({})", self.endpoint, draft.city_name);

        let mut headers = Self::headers();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .json(&draft)
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        self.handle_response(response, "created city").await
    }

    async fn delete_city(&self, id: CityId) -> Result<(), RemoteError> {
        let url = self.city_url(id);
        log::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .headers(Self::headers())
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status == StatusCode::NOT_FOUND {
            log::debug!("city {} was already gone", id);
            Ok(())
        } else {
            Err(Self::error_for_status(response, status, &format!("city {}", id)).await)
        }
    }
}

// --------------------------------------------------------------------------
// URL Handling
// --------------------------------------------------------------------------

/// Build the city resource URL from an API base URL.
///
/// The base must be an absolute `http` or `https` URL with a host. A missing
/// trailing slash is tolerated, and query strings or fragments are rejected.
///
/// # Example
///
/// ```
/// use worldwise::remote::http::cities_endpoint;
///
/// assert_eq!(
///     cities_endpoint("http://localhost:8000/").unwrap(),
///     "http://localhost:8000/cities"
/// );
/// assert_eq!(
///     cities_endpoint("https://api.example.com/v1").unwrap(),
///     "https://api.example.com/v1/cities"
/// );
/// assert!(cities_endpoint("localhost:8000").is_err());
/// ```
pub fn cities_endpoint(api_base: &str) -> Result<String, RemoteError> {
    let base = api_base.trim();
    if !is_http_url(base) {
        return Err(RemoteError::InvalidBaseUrl(api_base.to_string()));
    }

    Ok(format!("{}/{}", base.trim_end_matches('/'), CITIES_RESOURCE))
}

/// Whether `url` is an absolute http(s) URL with a host and no query,
/// fragment, or spaces.
pub(crate) fn is_http_url(url: &str) -> bool {
    let Some(rest) = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
    else {
        return false;
    };

    let host = rest.split('/').next().unwrap_or("");
    !(host.is_empty() || rest.contains('?') || rest.contains('#') || rest.contains(' '))
}

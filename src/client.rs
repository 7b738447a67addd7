//! HTTP client for the Glassfrog API.
//!
//! This module provides `GlassfrogClient`, which authenticates with an API
//! key and maps each Glassfrog resource action to one HTTP request.
//!
//! # Parameter placement
//!
//! - `GET`: parameters become the query string
//! - `POST` / `PATCH`: parameters become the JSON body
//! - `DELETE` and other methods: parameters are dropped (a warning is logged)
//!
//! # Security
//!
//! The API key is never logged. Messages derived from transport errors are
//! sanitized before logging.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::config::{api_key_header, Config};
use crate::error::{GlassfrogError, RemoteError};
use crate::models::{Params, ResourceId};

/// Header carrying the API key.
const AUTH_HEADER: &str = "X-Auth-Token";

const JSON_CONTENT_TYPE: &str = "application/json";

/// The address of a Glassfrog API, either unparsed or already parsed.
#[derive(Debug, Clone)]
pub enum Endpoint {
    /// A URL string such as `https://glassfrog.holacracy.org/api/v3`.
    Raw(String),
    /// A pre-parsed URL.
    Parsed(Url),
}

impl From<&str> for Endpoint {
    fn from(value: &str) -> Self {
        Endpoint::Raw(value.to_string())
    }
}

impl From<String> for Endpoint {
    fn from(value: String) -> Self {
        Endpoint::Raw(value)
    }
}

impl From<Url> for Endpoint {
    fn from(value: Url) -> Self {
        Endpoint::Parsed(value)
    }
}

impl From<&Url> for Endpoint {
    fn from(value: &Url) -> Self {
        Endpoint::Parsed(value.clone())
    }
}

impl Endpoint {
    /// Validates the endpoint and formats it back to a base address:
    /// scheme, host, port, and path prefix, without a trailing slash.
    fn normalize(self) -> Result<String, GlassfrogError> {
        let mut url = match self {
            Endpoint::Raw(raw) => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Err(GlassfrogError::configuration("endpoint is required"));
                }
                Url::parse(raw).map_err(|e| {
                    GlassfrogError::configuration(format!("invalid endpoint URL: {}", e))
                })?
            }
            Endpoint::Parsed(url) => url,
        };

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(GlassfrogError::configuration(format!(
                "endpoint must use http or https, got: {}",
                url.scheme()
            )));
        }
        if url.host_str().is_none() {
            return Err(GlassfrogError::configuration("endpoint must include a host"));
        }
        // Embedded credentials would be sent as Basic auth next to the token.
        if !url.username().is_empty() || url.password().is_some() {
            return Err(GlassfrogError::configuration(
                "endpoint must not contain user credentials",
            ));
        }

        url.set_query(None);
        url.set_fragment(None);

        Ok(url.as_str().trim_end_matches('/').to_string())
    }
}

/// HTTP client for the Glassfrog API.
///
/// Every resource operation validates its identifier, builds a path, and
/// delegates to [`request`](Self::request). Response bodies are returned as
/// opaque JSON.
///
/// # Example
///
/// ```ignore
/// use glassfrog::{Config, GlassfrogClient, Params};
///
/// let client = GlassfrogClient::new("https://glassfrog.holacracy.org/api/v3", Config::new(key))?;
/// let circle = client.get_circle_by_id(42, &Params::new()).await?;
/// ```
#[derive(Clone)]
pub struct GlassfrogClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Normalized base address, e.g. `https://glassfrog.holacracy.org/api/v3`.
    base_url: String,

    /// API key for authentication.
    /// SECURITY: Never log this value!
    api_key: String,
}

impl std::fmt::Debug for GlassfrogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlassfrogClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GlassfrogClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The API address, as a string or a parsed [`Url`]
    /// * `config` - Configuration carrying the API key and transport timeout
    ///
    /// # Errors
    ///
    /// Returns `GlassfrogError::Configuration` if the endpoint is empty,
    /// unparsable, not http(s), or carries credentials, or if the API key is
    /// blank or cannot be sent as a header value.
    /// Returns `GlassfrogError::HttpClient` if the transport fails to build.
    pub fn new(endpoint: impl Into<Endpoint>, config: Config) -> Result<Self, GlassfrogError> {
        let base_url = endpoint.into().normalize()?;

        api_key_header(&config.api_key).map_err(|reason| {
            GlassfrogError::configuration(format!("config.api_key {}", reason))
        })?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GlassfrogError::HttpClient)?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key,
        })
    }

    /// The normalized base address every path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The API key sent with the next request.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Replaces the API key. Takes effect on the next request; requests
    /// already built keep the previous key. A blank or unsendable key makes
    /// later requests fail with `GlassfrogError::Authentication`.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// Tests connectivity by listing circles.
    ///
    /// # Errors
    ///
    /// Returns `GlassfrogError::ConnectionTest` with a hint about the cause.
    pub async fn test_connection(&self) -> Result<(), GlassfrogError> {
        tracing::debug!("Testing connection to Glassfrog");

        match self.list_circles(&Params::new()).await {
            Ok(_) => {
                tracing::info!("Connection test successful");
                Ok(())
            }
            Err(GlassfrogError::Authentication(reason)) => Err(GlassfrogError::connection_test(
                format!("API key {} - check GLASSFROG_API_KEY", reason),
            )),
            Err(e) if matches!(e.remote_status(), Some(401 | 403)) => {
                Err(GlassfrogError::connection_test(
                    "authentication rejected - verify GLASSFROG_API_KEY is correct",
                ))
            }
            Err(GlassfrogError::Transport(e)) => {
                let message = GlassfrogError::sanitize_message(&e.to_string(), &self.api_key);
                Err(GlassfrogError::connection_test(format!(
                    "transport error: {} - verify GLASSFROG_ENDPOINT is correct and reachable",
                    message
                )))
            }
            Err(e) => Err(GlassfrogError::connection_test(
                e.sanitized_display(&self.api_key),
            )),
        }
    }

    /// Makes a request to the Glassfrog API.
    ///
    /// Attaches `Content-Type: application/json` and the `X-Auth-Token`
    /// header, places `params` according to `method`, and performs exactly
    /// one HTTP exchange.
    ///
    /// # Returns
    ///
    /// The parsed JSON body on status 200 or 201 (`Value::Null` if the body
    /// is empty).
    ///
    /// # Errors
    ///
    /// - `GlassfrogError::Authentication` if the API key is blank or not a
    ///   valid header value (no request is sent)
    /// - `GlassfrogError::Transport` on network failure
    /// - `GlassfrogError::Remote` on any status other than 200 or 201
    /// - `GlassfrogError::Serialization` if a success body is not JSON
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> Result<Value, GlassfrogError> {
        let token = api_key_header(&self.api_key)
            .map_err(|reason| GlassfrogError::Authentication(reason.to_string()))?;

        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(
            method = %method,
            path = %path,
            "Making Glassfrog API request"
        );

        let mut req = self
            .http
            .request(method.clone(), &url)
            .header(AUTH_HEADER, token)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);

        match method {
            Method::GET => {
                let pairs = params.query_pairs();
                if !pairs.is_empty() {
                    req = req.query(&pairs);
                }
            }
            Method::POST | Method::PATCH => {
                req = req.body(params.to_json_body()?);
            }
            _ => {
                // TODO: carry params on DELETE once the API documents a body for it.
                if !params.is_empty() {
                    tracing::warn!(
                        method = %method,
                        path = %path,
                        dropped = params.len(),
                        "Parameters are not sent for this method"
                    );
                }
            }
        }

        let response = req.send().await.map_err(|e| {
            tracing::debug!(
                error = %GlassfrogError::sanitize_message(&e.to_string(), &self.api_key),
                "Transport failure"
            );
            GlassfrogError::Transport(e)
        })?;
        let status = response.status();
        let body = response.text().await.map_err(GlassfrogError::Transport)?;

        if status != StatusCode::OK && status != StatusCode::CREATED {
            tracing::debug!(status = %status, path = %path, "Glassfrog API returned an error");
            return Err(GlassfrogError::Remote(RemoteError::new(status, body)));
        }

        tracing::trace!(body = %body, "Glassfrog API response");

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn get(&self, path: &str, params: &Params) -> Result<Value, GlassfrogError> {
        self.request(Method::GET, path, params).await
    }

    // ========================================================================
    // Circles
    // ========================================================================

    /// Lists all circles.
    pub async fn list_circles(&self, params: &Params) -> Result<Value, GlassfrogError> {
        self.get("/circles", params).await
    }

    /// Gets a single circle.
    ///
    /// # Errors
    ///
    /// Returns `GlassfrogError::Validation` if `circle_id` is not a
    /// positive integer.
    pub async fn get_circle_by_id(
        &self,
        circle_id: impl ResourceId,
        params: &Params,
    ) -> Result<Value, GlassfrogError> {
        let id = circle_id.resource_id("circle_id")?;
        self.get(&format!("/circles/{}", id), params).await
    }

    /// Gets a single circle with its members included.
    ///
    /// Sends `include=members`, overriding any `include` in `params`.
    pub async fn get_circle_with_members(
        &self,
        circle_id: impl ResourceId,
        params: &Params,
    ) -> Result<Value, GlassfrogError> {
        let id = circle_id.resource_id("circle_id")?;
        let params = params.clone().with("include", "members");
        self.get(&format!("/circles/{}", id), &params).await
    }

    /// Lists the people in a circle.
    pub async fn get_circle_people(
        &self,
        circle_id: impl ResourceId,
        params: &Params,
    ) -> Result<Value, GlassfrogError> {
        self.circle_resource(circle_id, "people", params).await
    }

    /// Lists the roles in a circle.
    pub async fn get_circle_roles(
        &self,
        circle_id: impl ResourceId,
        params: &Params,
    ) -> Result<Value, GlassfrogError> {
        self.circle_resource(circle_id, "roles", params).await
    }

    /// Lists the projects of a circle.
    pub async fn get_circle_projects(
        &self,
        circle_id: impl ResourceId,
        params: &Params,
    ) -> Result<Value, GlassfrogError> {
        self.circle_resource(circle_id, "projects", params).await
    }

    /// Lists the metrics of a circle.
    pub async fn get_circle_metrics(
        &self,
        circle_id: impl ResourceId,
        params: &Params,
    ) -> Result<Value, GlassfrogError> {
        self.circle_resource(circle_id, "metrics", params).await
    }

    /// Lists the checklist items of a circle.
    pub async fn get_circle_checklist(
        &self,
        circle_id: impl ResourceId,
        params: &Params,
    ) -> Result<Value, GlassfrogError> {
        self.circle_resource(circle_id, "checklist_items", params)
            .await
    }

    async fn circle_resource(
        &self,
        circle_id: impl ResourceId,
        resource: &str,
        params: &Params,
    ) -> Result<Value, GlassfrogError> {
        let id = circle_id.resource_id("circle_id")?;
        self.get(&format!("/circles/{}/{}", id, resource), params)
            .await
    }

    // ========================================================================
    // Projects
    // ========================================================================

    /// Creates a project. `params` is sent as the JSON body.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let project = client
    ///     .create_project(&Params::new().with("description", "Launch website"))
    ///     .await?;
    /// ```
    pub async fn create_project(&self, params: &Params) -> Result<Value, GlassfrogError> {
        self.request(Method::POST, "/projects", params).await
    }

    /// Updates a project. `params` is sent as the JSON body.
    pub async fn update_project(
        &self,
        project_id: impl ResourceId,
        params: &Params,
    ) -> Result<Value, GlassfrogError> {
        let id = project_id.resource_id("project_id")?;
        self.request(Method::PATCH, &format!("/projects/{}", id), params)
            .await
    }

    /// Archives a project.
    ///
    /// Issues the same PATCH as [`update_project`](Self::update_project);
    /// the archive flag itself belongs in `params`.
    pub async fn archive_project(
        &self,
        project_id: impl ResourceId,
        params: &Params,
    ) -> Result<Value, GlassfrogError> {
        let id = project_id.resource_id("project_id")?;
        self.request(Method::PATCH, &format!("/projects/{}", id), params)
            .await
    }

    /// Deletes a project.
    ///
    /// `params` are not sent: DELETE requests carry neither a query string
    /// nor a body.
    pub async fn delete_project(
        &self,
        project_id: impl ResourceId,
        params: &Params,
    ) -> Result<Value, GlassfrogError> {
        let id = project_id.resource_id("project_id")?;
        self.request(Method::DELETE, &format!("/projects/{}", id), params)
            .await
    }

    // ========================================================================
    // People
    // ========================================================================

    /// Lists all people.
    pub async fn list_people(&self, params: &Params) -> Result<Value, GlassfrogError> {
        self.get("/people", params).await
    }

    /// Gets a single person.
    pub async fn get_person_by_id(
        &self,
        person_id: impl ResourceId,
        params: &Params,
    ) -> Result<Value, GlassfrogError> {
        let id = person_id.resource_id("person_id")?;
        self.get(&format!("/people/{}", id), params).await
    }

    // ========================================================================
    // Roles
    // ========================================================================

    /// Lists all roles.
    pub async fn list_roles(&self, params: &Params) -> Result<Value, GlassfrogError> {
        self.get("/roles", params).await
    }

    /// Lists the roles of a circle.
    pub async fn get_roles_for_circle(
        &self,
        circle_id: impl ResourceId,
        params: &Params,
    ) -> Result<Value, GlassfrogError> {
        self.circle_resource(circle_id, "roles", params).await
    }

    /// Lists the roles filled by a person.
    pub async fn get_roles_for_person(
        &self,
        person_id: impl ResourceId,
        params: &Params,
    ) -> Result<Value, GlassfrogError> {
        let id = person_id.resource_id("person_id")?;
        self.get(&format!("/people/{}/roles", id), params).await
    }
}

//! Authenticated request wrapper.
//!
//! Every call carries the current access token. A 401 triggers exactly one
//! refresh through the [`Session`] and one reissue of the same request; the
//! reissue's response is returned whatever its status.

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::ClientError;
use crate::models::{RefreshRequest, RefreshResponse, TokenPair};
use crate::session::{Session, TokenStore};

/// Header carrying the per-call correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Refresh endpoint, called without a bearer token.
pub const REFRESH_PATH: &str = "/api/auth/refresh/";

/// One field of a multipart form.
#[derive(Debug, Clone)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormField>),
}

/// A request description that can be sent more than once.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn query_pairs(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, fields: Vec<FormField>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }
}

/// Status and raw body of a response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Decode a 2xx body into `T`; any other status becomes [`ClientError::Api`].
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        if !self.status.is_success() {
            return Err(ClientError::from_response(self.status, &self.body));
        }
        serde_json::from_slice(&self.body).map_err(|e| {
            ClientError::Decode(format!("Unexpected response shape: {}", e))
        })
    }

    /// Accept any 2xx response and ignore its body.
    pub fn empty(&self) -> Result<(), ClientError> {
        if !self.status.is_success() {
            return Err(ClientError::from_response(self.status, &self.body));
        }
        Ok(())
    }
}

/// HTTP client bound to one backend and one session.
pub struct ApiClient<S> {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session<S>>,
}

impl<S> Clone for ApiClient<S> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            session: self.session.clone(),
        }
    }
}

impl<S: TokenStore> ApiClient<S> {
    pub fn new(config: &Config, session: Arc<Session<S>>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<Session<S>> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request with the stored access token, refreshing once on 401.
    ///
    /// Non-401 responses are returned unchanged for the caller to interpret.
    pub async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ClientError> {
        let request_id = Uuid::new_v4();
        let access = self
            .session
            .access_token()
            .await?
            .ok_or(ClientError::NotAuthenticated)?;

        let response = self.dispatch(request, Some(&access), request_id).await?;
        if response.status != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::info!(
            %request_id,
            method = %request.method,
            path = %request.path,
            "Access token rejected, refreshing"
        );
        let fresh = self
            .session
            .refresh(&access, |refresh| self.exchange_refresh(refresh))
            .await?;

        self.dispatch(request, Some(&fresh), request_id).await
    }

    /// Send a request without any token. Used by the login and refresh calls.
    pub async fn send_anonymous(&self, request: &ApiRequest) -> Result<RawResponse, ClientError> {
        self.dispatch(request, None, Uuid::new_v4()).await
    }

    async fn exchange_refresh(&self, refresh: String) -> Result<TokenPair, ClientError> {
        let request = ApiRequest::post(REFRESH_PATH).json(&RefreshRequest {
            refresh: refresh.clone(),
        })?;
        let response: RefreshResponse = self.send_anonymous(&request).await?.json()?;
        Ok(response.into_pair(refresh))
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        access: Option<&str>,
        request_id: Uuid,
    ) -> Result<RawResponse, ClientError> {
        let mut builder = self
            .http
            .request(request.method.clone(), self.url(&request.path))
            .header(REQUEST_ID_HEADER, request_id.to_string());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = access {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(fields) => builder.multipart(build_form(fields)?),
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(
            %request_id,
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            "Request completed"
        );

        Ok(RawResponse { status, body })
    }
}

fn build_form(fields: &[FormField]) -> Result<Form, ClientError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name.clone(), value.clone()),
            FormField::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let part = Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(content_type)?;
                form.part(name.clone(), part)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_decodes_success_body() {
        let response = RawResponse {
            status: StatusCode::OK,
            body: br#"{"access": "a", "refresh": "r"}"#.to_vec(),
        };
        let pair: TokenPair = response.json().unwrap();
        assert_eq!(pair.access, "a");
    }

    #[test]
    fn test_json_shape_mismatch_is_decode_error() {
        let response = RawResponse {
            status: StatusCode::OK,
            body: br#"{"results": []}"#.to_vec(),
        };
        let result: Result<Vec<TokenPair>, ClientError> = response.json();
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[test]
    fn test_json_on_failure_status_reads_error_field() {
        let response = RawResponse {
            status: StatusCode::FORBIDDEN,
            body: br#"{"error": "Managers only"}"#.to_vec(),
        };
        let result: Result<TokenPair, ClientError> = response.json();
        assert_eq!(
            result.unwrap_err(),
            ClientError::Api {
                status: 403,
                message: "Managers only".to_string()
            }
        );
    }

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::get("/api/orders/history/")
            .query("start", "2026-01-01T00:00:00Z")
            .query("end", "2026-01-02T00:00:00Z");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.query.len(), 2);
        assert!(matches!(request.body, RequestBody::Empty));
    }

    #[test]
    fn test_form_rejects_bad_content_type() {
        let fields = vec![FormField::File {
            name: "image".to_string(),
            file_name: "dish.png".to_string(),
            content_type: "not a mime type".to_string(),
            bytes: vec![1, 2, 3],
        }];
        assert!(build_form(&fields).is_err());
    }
}

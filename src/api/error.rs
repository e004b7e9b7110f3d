use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::{
    error::{AssemblyError, GatewayError},
    utils,
};

/// JSON error answer: `{error, details?}` with the status to send it with.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "No access token provided")
    }

    /// Translates a gateway failure, keeping the remote status code.
    ///
    /// `context` names the operation that failed. Local validation failures
    /// answer 400 with their own message instead.
    pub fn from_gateway(err: GatewayError, context: &str) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match err {
            GatewayError::Validation(msg) => Self::new(status, msg),
            GatewayError::EmptyRequest => Self::new(status, "No track IDs provided"),
            GatewayError::Remote { body, .. } => Self::new(status, context).with_details(body),
            GatewayError::Unknown(msg) => {
                tracing::error!("{context}: {msg}");
                Self::new(status, context)
            }
        }
    }

    pub fn from_assembly(err: AssemblyError) -> Self {
        match err {
            AssemblyError::Validation(msg) => Self::bad_request(msg),
            AssemblyError::Create(e) => Self::from_gateway(e, "Failed to create playlist"),
            AssemblyError::Populate { playlist, source } => {
                let mut api_err = Self::from_gateway(source, "Failed to add tracks to playlist");
                api_err.body["playlist"] = serde_json::to_value(playlist).unwrap_or(Value::Null);
                api_err
            }
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        if !details.is_null() {
            self.body["details"] = details;
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Access token from `Authorization: Bearer <token>`. Rejects with 401.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(utils::bearer_token)
            .map(|t| BearerToken(t.to_string()))
            .ok_or_else(ApiError::unauthorized)
    }
}

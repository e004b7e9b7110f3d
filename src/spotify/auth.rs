use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::{
    config::Config,
    error::AuthError,
    types::{Token, TokenResponse},
    utils,
};

/// Talks to the authorization server: builds the login redirect, exchanges
/// authorization codes and refreshes access tokens.
///
/// Holds no tokens itself. Every pair it issues is handed back to the caller.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: String,
    token_url: String,
    scope: String,
}

/// Redirect target plus the state embedded in it.
#[derive(Debug, Clone)]
pub struct LoginRedirect {
    pub url: String,
    pub state: String,
}

impl AuthClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            auth_url: config.auth_url.clone(),
            token_url: config.token_url.clone(),
            scope: config.scope.clone(),
        }
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Builds the authorization URL with a freshly generated state.
    pub fn initiate_login(&self) -> Result<LoginRedirect, AuthError> {
        let state = utils::generate_state(utils::STATE_LENGTH);
        let url = Url::parse_with_params(
            &self.auth_url,
            &[
                ("response_type", "code"),
                ("client_id", self.client_id.as_str()),
                ("scope", self.scope.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("state", state.as_str()),
            ],
        )
        .map_err(|e| AuthError::MalformedResponse(format!("invalid authorize url: {e}")))?;

        Ok(LoginRedirect {
            url: url.into(),
            state,
        })
    }

    /// Signed digest of `state` for the login cookie.
    pub fn state_digest(&self, state: &str) -> Option<String> {
        utils::state_digest(&self.client_secret, state)
    }

    /// True when `digest` was issued for `state` by [`AuthClient::state_digest`].
    pub fn verify_state_digest(&self, state: &str, digest: &str) -> bool {
        utils::verify_state_digest(&self.client_secret, state, digest)
    }

    /// Exchanges an authorization code for a token pair.
    ///
    /// Only the presence of `state` is checked here; comparing it with the
    /// issued value is up to the caller, which is the one that stored it.
    /// A rejected code is not retried: codes are single-use.
    pub async fn exchange_code(
        &self,
        code: Option<&str>,
        state: Option<&str>,
    ) -> Result<Token, AuthError> {
        if state.is_none_or(str::is_empty) {
            return Err(AuthError::StateMismatch);
        }
        let code = code.filter(|c| !c.is_empty()).ok_or(AuthError::MissingCode)?;

        let response = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .await?;

        Ok(Token::from_response(&response, None))
    }

    /// Mints a new access token. A rejection here is terminal: the user has
    /// to log in again.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Token, AuthError> {
        let response = self.refresh_raw(refresh_token).await?;
        Ok(Token::from_response(&response, Some(refresh_token)))
    }

    /// Same as [`AuthClient::refresh`] but returns the endpoint answer as is.
    pub async fn refresh_raw(&self, refresh_token: &str) -> Result<TokenResponse, AuthError> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::MissingRefreshToken);
        }

        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, AuthError> {
        let res = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(form)
            .send()
            .await?;

        let status = res.status();
        let body = res.bytes().await?;

        if !status.is_success() {
            let body = serde_json::from_slice::<Value>(&body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
            tracing::warn!(status = status.as_u16(), "token endpoint rejected request");
            return Err(AuthError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_slice::<TokenResponse>(&body)
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))
    }
}

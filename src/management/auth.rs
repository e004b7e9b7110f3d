use std::{future::Future, path::PathBuf};

use chrono::Utc;

use crate::{
    config,
    error::{GatewayError, SessionError},
    spotify::AuthClient,
    types::Token,
};

/// Seconds before expiry at which the access token is replaced proactively.
const EXPIRY_LEEWAY_SECS: u64 = 240;

/// Client-held token pair, cached on disk between CLI runs.
///
/// A refresh replaces the whole pair; the previous value is never patched.
pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        Self::at(Self::token_path(), token)
    }

    pub fn at(path: PathBuf, token: Token) -> Self {
        TokenManager { token, path }
    }

    pub async fn load() -> Result<Self, SessionError> {
        Self::load_from(Self::token_path()).await
    }

    pub async fn load_from(path: PathBuf) -> Result<Self, SessionError> {
        let content = async_fs::read_to_string(&path).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self { token, path })
    }

    pub async fn persist(&self) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Access token that is not about to expire, refreshing first if needed.
    pub async fn get_valid_token(&mut self, auth: &AuthClient) -> Result<String, SessionError> {
        if self.is_expired() {
            self.refresh(auth).await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub async fn refresh(&mut self, auth: &AuthClient) -> Result<(), SessionError> {
        self.token = auth.refresh(&self.token.refresh_token).await?;
        self.persist().await
    }

    /// Runs `op` with a valid access token. If the remote service answers
    /// 401, the pair is refreshed once and `op` runs once more; a second
    /// failure is returned as is.
    ///
    /// Only for idempotent calls: a retried playlist creation would create
    /// a second playlist.
    pub async fn with_refresh<T, F, Fut>(
        &mut self,
        auth: &AuthClient,
        op: F,
    ) -> Result<T, SessionError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, GatewayError>>,
    {
        let token = self.get_valid_token(auth).await?;
        match op(token).await {
            Err(e) if e.is_unauthorized() => {
                self.refresh(auth).await?;
                Ok(op(self.token.access_token.clone()).await?)
            }
            other => Ok(other?),
        }
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        self.token.expires_within(now, EXPIRY_LEEWAY_SECS)
    }

    fn token_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}

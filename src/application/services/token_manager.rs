//! Centralized access to dashboard credentials.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::infrastructure::storage::{StorageError, TokenStorage};

/// Keys that may hold the access token, in lookup order.
///
/// Only the first is written; the others are read for compatibility with
/// stores populated by older clients.
pub const ACCESS_TOKEN_KEYS: [&str; 4] =
    ["adminAuthToken", "authToken", "access_token", "accessToken"];

/// Keys that may hold the refresh token, in lookup order.
pub const REFRESH_TOKEN_KEYS: [&str; 3] = ["adminTokenRefresh", "refresh_token", "refreshToken"];

/// Errors raised when storing tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("access token must not be empty")]
    Empty,

    #[error("token contains characters that cannot be sent in an HTTP header")]
    InvalidCharacters,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Returns true if `token` can travel in both an `Authorization` header and a cookie.
pub fn is_valid_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_graphic() && !matches!(c, ';' | ',' | '"' | '\\'))
}

/// Reads and writes access/refresh tokens across the well-known key names.
pub struct TokenManager {
    storage: Arc<dyn TokenStorage>,
}

impl TokenManager {
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self { storage }
    }

    /// The backing store, for health reporting.
    pub fn storage(&self) -> &Arc<dyn TokenStorage> {
        &self.storage
    }

    /// First non-empty access token, or `None`.
    ///
    /// A storage read failure is logged and treated as "no token".
    pub async fn get_access_token(&self) -> Option<String> {
        self.first_present(&ACCESS_TOKEN_KEYS).await
    }

    /// First non-empty refresh token, or `None`.
    pub async fn get_refresh_token(&self) -> Option<String> {
        self.first_present(&REFRESH_TOKEN_KEYS).await
    }

    async fn first_present(&self, keys: &[&str]) -> Option<String> {
        for key in keys {
            match self.storage.get_item(key).await {
                Ok(Some(value)) if !value.is_empty() => return Some(value),
                Ok(_) => {}
                Err(e) => {
                    warn!(key, "Failed to read token store: {}", e);
                    return None;
                }
            }
        }
        None
    }

    /// Stores tokens under the primary key names.
    ///
    /// The refresh token is only written when present and non-empty; an
    /// existing refresh token is otherwise left in place.
    ///
    /// # Errors
    ///
    /// - [`TokenError::Empty`] if `access_token` is empty
    /// - [`TokenError::InvalidCharacters`] if a token is not header-safe
    /// - [`TokenError::Storage`] if the store cannot be written
    pub async fn set_tokens(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<(), TokenError> {
        if access_token.is_empty() {
            return Err(TokenError::Empty);
        }
        if !is_valid_token(access_token) {
            return Err(TokenError::InvalidCharacters);
        }

        let refresh_token = refresh_token.filter(|t| !t.is_empty());
        if let Some(refresh) = refresh_token
            && !is_valid_token(refresh)
        {
            return Err(TokenError::InvalidCharacters);
        }

        self.storage
            .set_item(ACCESS_TOKEN_KEYS[0], access_token)
            .await?;
        if let Some(refresh) = refresh_token {
            self.storage
                .set_item(REFRESH_TOKEN_KEYS[0], refresh)
                .await?;
        }
        Ok(())
    }

    /// Removes every access and refresh key, legacy names included.
    pub async fn clear_tokens(&self) -> Result<(), TokenError> {
        for key in ACCESS_TOKEN_KEYS.iter().chain(REFRESH_TOKEN_KEYS.iter()) {
            self.storage.remove_item(key).await?;
        }
        Ok(())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.get_access_token().await.is_some()
    }

    /// Bearer headers for backend requests; empty without a token.
    pub async fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let Some(token) = self.get_access_token().await else {
            return headers;
        };

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
            Err(_) => warn!("Stored access token is not a valid header value, ignoring it"),
        }
        headers
    }

    /// Auth headers merged with `additional`; entries in `additional` win.
    pub async fn auth_config(&self, additional: HeaderMap) -> HeaderMap {
        let mut headers = self.auth_headers().await;
        for name in additional.keys() {
            headers.remove(name);
        }
        for (name, value) in additional.iter() {
            headers.append(name.clone(), value.clone());
        }
        headers
    }
}

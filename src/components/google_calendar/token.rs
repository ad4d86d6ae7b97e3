use crate::error::{auth_error, AppResult};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// OAuth scope for reading and writing events
pub const CALENDAR_EVENTS_SCOPE: &str = "https://www.googleapis.com/auth/calendar.events";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
// Refresh a little before Google considers the token expired
const EXPIRY_MARGIN_SECS: i64 = 60;

/// The fields of a service account JSON key that the token exchange needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Claims of the signed assertion sent to the token endpoint
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl AssertionClaims {
    pub fn new(key: &ServiceAccountKey, scope: &str, now: i64) -> Self {
        Self {
            iss: key.client_email.clone(),
            scope: scope.to_string(),
            aud: key.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: i64,
}

/// Obtains and caches access tokens for a service account
#[derive(Clone)]
pub struct TokenManager {
    key_file: PathBuf,
    scope: String,
    client: Client,
    cached: Arc<RwLock<Option<CachedToken>>>,
}

impl TokenManager {
    pub fn new(key_file: PathBuf, client: Client) -> Self {
        Self {
            key_file,
            scope: CALENDAR_EVENTS_SCOPE.to_string(),
            client,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Get an access token, reusing the cached one while it is valid
    pub async fn get_token(&self) -> AppResult<String> {
        let now = Utc::now().timestamp();
        if let Some(token) = self.cached.read().await.as_ref() {
            if token.expires_at - EXPIRY_MARGIN_SECS > now {
                debug!("Using cached access token");
                return Ok(token.access_token.clone());
            }
        }

        let key = self.read_key().await?;
        let token = self.exchange(&key, now).await?;
        let access_token = token.access_token.clone();
        *self.cached.write().await = Some(token);

        Ok(access_token)
    }

    async fn read_key(&self) -> AppResult<ServiceAccountKey> {
        if self.key_file.as_os_str().is_empty() {
            return Err(auth_error("No credential key file configured"));
        }

        let content = tokio::fs::read_to_string(&self.key_file).await.map_err(|e| {
            auth_error(&format!(
                "Failed to read credential key file {}: {}",
                self.key_file.display(),
                e
            ))
        })?;

        parse_key(&content)
    }

    /// Exchange a signed assertion for an access token
    async fn exchange(&self, key: &ServiceAccountKey, now: i64) -> AppResult<CachedToken> {
        let assertion = sign_assertion(key, &self.scope, now)?;

        info!("Requesting access token for {}", key.client_email);
        let response = self
            .client
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| auth_error(&format!("Failed to request token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(auth_error(&format!(
                "Failed to request token: HTTP {} - {}",
                status, error_body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| auth_error(&format!("Failed to parse token response: {}", e)))?;

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + token.expires_in,
        })
    }
}

/// Parse the JSON content of a service account key
pub fn parse_key(content: &str) -> AppResult<ServiceAccountKey> {
    serde_json::from_str(content)
        .map_err(|e| auth_error(&format!("Invalid credential key file: {}", e)))
}

/// Sign the token request assertion with the key's RSA private key
pub fn sign_assertion(key: &ServiceAccountKey, scope: &str, now: i64) -> AppResult<String> {
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| auth_error(&format!("Invalid private key: {}", e)))?;
    let claims = AssertionClaims::new(key, scope, now);

    encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map_err(|e| auth_error(&format!("Failed to sign assertion: {}", e)))
}

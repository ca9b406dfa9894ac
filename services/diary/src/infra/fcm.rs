//! Firebase Cloud Messaging HTTP v1 client.

use std::path::Path;

use anyhow::{Context as _, bail};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::infra::push::PushSender;

const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Refresh the cached access token this long before it expires.
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Fields of a Google service-account key file used by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub private_key: String,
    pub client_email: String,
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub async fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read(path)
            .await
            .with_context(|| format!("read service account key {}", path.display()))?;
        serde_json::from_slice(&raw).context("parse service account key")
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: i64,
}

/// `POST …/messages:send` body. Data-only message addressed to one device.
#[derive(Debug, Serialize)]
pub struct FcmRequest<'a> {
    pub message: FcmMessage<'a>,
}

#[derive(Debug, Serialize)]
pub struct FcmMessage<'a> {
    pub token: &'a str,
    pub data: FcmData<'a>,
}

#[derive(Debug, Serialize)]
pub struct FcmData<'a> {
    pub message: &'a str,
}

impl<'a> FcmRequest<'a> {
    pub fn new(token: &'a str, message: &'a str) -> Self {
        Self {
            message: FcmMessage {
                token,
                data: FcmData { message },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct FcmResponse {
    name: String,
}

/// FCM sender authenticated with a service account.
pub struct FcmClient {
    key: ServiceAccountKey,
    http: reqwest::Client,
    token_cache: Mutex<Option<CachedToken>>,
}

impl FcmClient {
    pub fn new(key: ServiceAccountKey) -> Self {
        Self {
            key,
            http: reqwest::Client::new(),
            token_cache: Mutex::new(None),
        }
    }

    fn send_url(&self) -> String {
        format!(
            "https://fcm.googleapis.com/v1/projects/{}/messages:send",
            self.key.project_id
        )
    }

    /// OAuth2 access token for the FCM scope, cached until shortly before expiry.
    async fn access_token(&self) -> anyhow::Result<String> {
        let mut cache = self.token_cache.lock().await;
        let now = Utc::now().timestamp();
        if let Some(cached) = cache.as_ref() {
            if cached.expires_at > now + TOKEN_REFRESH_MARGIN_SECS {
                return Ok(cached.access_token.clone());
            }
        }

        let assertion = self.sign_assertion()?;
        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .context("request access token")?;
        if !response.status().is_success() {
            bail!("access token request failed: {}", response.status());
        }
        let token: AccessTokenResponse = response
            .json()
            .await
            .context("parse access token response")?;

        *cache = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Utc::now().timestamp() + token.expires_in,
        });
        Ok(token.access_token)
    }

    fn sign_assertion(&self) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: FCM_SCOPE,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .context("parse service account private key")?;
        encode(&Header::new(Algorithm::RS256), &claims, &key).context("sign JWT assertion")
    }
}

impl PushSender for FcmClient {
    async fn send(&self, token: &str, message: &str) -> anyhow::Result<String> {
        let access_token = self.access_token().await?;
        let response = self
            .http
            .post(self.send_url())
            .bearer_auth(access_token)
            .json(&FcmRequest::new(token, message))
            .send()
            .await
            .context("send FCM message")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("FCM send failed: {status} {body}");
        }
        let sent: FcmResponse = response.json().await.context("parse FCM response")?;
        Ok(sent.name)
    }
}

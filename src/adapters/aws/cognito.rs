//! Bearer-token verification against a Cognito user pool.
//!
//! Performs the full check set: signature against the pool's published JWKS,
//! expiry, issuer, app client, and token use. Keys are fetched lazily and
//! cached per key id.

use crate::domain::video::AccessClaims;
use crate::error::AppError;
use crate::ports::verifier::TokenVerifier;
use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

const KEY_CACHE_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Deserialize)]
struct Jwks {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    kty: String,
    n: Option<String>,
    e: Option<String>,
}

struct CachedKey {
    key: DecodingKey,
    fetched_at: Instant,
}

pub struct CognitoVerifier {
    issuer: String,
    client_id: String,
    http: reqwest::Client,
    keys: RwLock<HashMap<String, CachedKey>>,
}

impl CognitoVerifier {
    pub fn new(region: &str, user_pool_id: &str, client_id: String) -> Self {
        Self {
            issuer: pool_issuer(region, user_pool_id),
            client_id,
            http: reqwest::Client::new(),
            keys: RwLock::new(HashMap::new()),
        }
    }

    fn jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.issuer)
    }

    async fn fetch_jwks(&self) -> Result<Jwks, AppError> {
        let response = self
            .http
            .get(self.jwks_url())
            .send()
            .await
            .map_err(|e| AppError::Unauthorized(format!("failed to fetch JWKS: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized(format!(
                "JWKS endpoint returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Unauthorized(format!("failed to parse JWKS: {}", e)))
    }

    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AppError> {
        {
            let cache = self.keys.read().await;
            if let Some(cached) = cache.get(kid) {
                if cached.fetched_at.elapsed() < KEY_CACHE_TTL {
                    return Ok(cached.key.clone());
                }
            }
        }

        // Cache miss or expired key: refetch the pool's key set.
        let jwks = self.fetch_jwks().await?;
        let jwk = jwks
            .keys
            .iter()
            .find(|k| k.kid == kid)
            .ok_or_else(|| AppError::Unauthorized(format!("key id {} not in JWKS", kid)))?;

        let key = jwk_to_decoding_key(jwk)?;

        let mut cache = self.keys.write().await;
        cache.insert(
            kid.to_string(),
            CachedKey {
                key: key.clone(),
                fetched_at: Instant::now(),
            },
        );

        Ok(key)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_exp = true;
        validation
    }
}

/// Issuer URL published by a Cognito user pool.
fn pool_issuer(region: &str, user_pool_id: &str) -> String {
    format!("https://cognito-idp.{}.amazonaws.com/{}", region, user_pool_id)
}

fn jwk_to_decoding_key(jwk: &Jwk) -> Result<DecodingKey, AppError> {
    if jwk.kty != "RSA" {
        return Err(AppError::Unauthorized(format!(
            "unsupported key type: {}",
            jwk.kty
        )));
    }
    let n = jwk
        .n
        .as_ref()
        .ok_or_else(|| AppError::Unauthorized("RSA key missing modulus".to_string()))?;
    let e = jwk
        .e
        .as_ref()
        .ok_or_else(|| AppError::Unauthorized("RSA key missing exponent".to_string()))?;

    DecodingKey::from_rsa_components(n, e)
        .map_err(|e| AppError::Unauthorized(format!("failed to build RSA key: {}", e)))
}

/// Claim checks beyond what the JWT library enforces: this service accepts
/// only access tokens minted for its own app client.
fn check_claims(claims: &AccessClaims, client_id: &str) -> Result<(), AppError> {
    if claims.token_use != "access" {
        return Err(AppError::Unauthorized(format!(
            "expected an access token, got token_use={}",
            claims.token_use
        )));
    }
    if claims.client_id != client_id {
        return Err(AppError::Unauthorized(
            "token was issued for a different client".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl TokenVerifier for CognitoVerifier {
    async fn verify(&self, token: &str) -> Result<AccessClaims, AppError> {
        let header = decode_header(token)
            .map_err(|e| AppError::Unauthorized(format!("invalid token header: {}", e)))?;

        // Reject foreign algorithms before touching the network.
        if header.alg != Algorithm::RS256 {
            return Err(AppError::Unauthorized(format!(
                "unsupported algorithm: {:?}",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AppError::Unauthorized("token header missing kid".to_string()))?;
        let key = self.decoding_key(&kid).await?;

        let token_data =
            decode::<AccessClaims>(token, &key, &self.validation()).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::Unauthorized("token has expired".to_string())
                    }
                    _ => AppError::Unauthorized(format!("invalid token: {}", e)),
                }
            })?;

        check_claims(&token_data.claims, &self.client_id)?;
        Ok(token_data.claims)
    }
}

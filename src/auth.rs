//! Sign-in ID token verification.
//!
//! The identity provider signs a short-lived JWT; sign-in only trusts the
//! uid (`sub`) and profile fields carried inside a token that verifies here.

use crate::config::Config;
use crate::models::{ArenaError, Identity};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

/// Key and rules a sign-in token must satisfy (signature, `exp`, optional `iss`/`aud`).
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("iss", &self.validation.iss)
            .field("aud", &self.validation.aud)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    fn new(key: DecodingKey, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_aud = false;
        Self { key, validation }
    }

    /// Tokens signed with a secret shared with the provider (HS256).
    pub fn hs256(secret: &[u8]) -> Self {
        Self::new(DecodingKey::from_secret(secret), Algorithm::HS256)
    }

    /// Tokens signed with the provider's RSA key (RS256), public key in PEM.
    pub fn rs256_pem(pem: &[u8]) -> Result<Self, jsonwebtoken::errors::Error> {
        Ok(Self::new(DecodingKey::from_rsa_pem(pem)?, Algorithm::RS256))
    }

    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self
    }

    pub fn with_audience(mut self, audience: &str) -> Self {
        self.validation.set_audience(&[audience]);
        self.validation.validate_aud = true;
        self
    }

    /// Build from `AUTH_SECRET` or `AUTH_PUBLIC_KEY_FILE`, plus `AUTH_ISSUER` / `AUTH_AUDIENCE`.
    /// `Ok(None)` when neither key is configured.
    pub fn from_config(config: &Config) -> std::io::Result<Option<Self>> {
        let verifier = match (&config.auth_public_key_file, &config.auth_secret) {
            (Some(path), _) => {
                let pem = std::fs::read(path)?;
                Self::rs256_pem(&pem).map_err(std::io::Error::other)?
            }
            (None, Some(secret)) => Self::hs256(secret.as_bytes()),
            (None, None) => return Ok(None),
        };
        let verifier = match &config.auth_issuer {
            Some(issuer) => verifier.with_issuer(issuer),
            None => verifier,
        };
        Ok(Some(match &config.auth_audience {
            Some(audience) => verifier.with_audience(audience),
            None => verifier,
        }))
    }

    /// Check the token and return the identity it asserts.
    pub fn verify(&self, token: &str) -> Result<Identity, ArenaError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ArenaError::InvalidCredential);
        }
        let claims = decode::<IdTokenClaims>(token, &self.key, &self.validation)
            .map_err(|e| {
                log::warn!("Rejected sign-in token: {}", e);
                ArenaError::InvalidCredential
            })?
            .claims;
        if claims.sub.trim().is_empty() {
            return Err(ArenaError::InvalidCredential);
        }
        Ok(Identity {
            uid: claims.sub,
            email: claims.email,
            display_name: claims.name,
            photo_url: claims.picture,
        })
    }
}

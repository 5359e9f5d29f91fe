//! JWT service for signing and verifying bearer tokens
//!
//! Tokens are HS256-signed with a shared secret and carry the user id and
//! email. Expiry is only enforced for tokens that were issued with one, which
//! happens when a token TTL is configured.

use anyhow::Result;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret used for signing and verification
    pub secret: String,
    /// Token lifetime in seconds; tokens never expire when unset
    pub token_ttl: Option<u64>,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: i32,
    /// User email
    pub email: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Result<Self> {
        if config.secret.is_empty() {
            anyhow::bail!("JWT secret must not be empty");
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        // `exp` is checked when present but not required
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        })
    }

    /// Sign a token for the given user
    pub fn sign(&self, id: i32, email: &str) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            id,
            email: email.to_string(),
            iat: now,
            exp: self.config.token_ttl.map(|ttl| now + ttl),
        };

        let token = encode(
            &Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?;
        Ok(token)
    }

    /// Verify a token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}

//! Bearer-token verification and development-token issuance.
//!
//! Tokens are JWTs whose claim set carries a `permissions` list. In
//! production they are RS256 tokens from the identity provider, verified
//! against its JWKS or a pinned PEM key. Locally and in tests they are HS256
//! tokens signed with a shared secret.

use std::collections::HashMap;
use std::fmt;

use casting_core::error::AuthError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwks;

/// Audience used when `AUTH_AUDIENCE` is not set.
pub const DEFAULT_AUDIENCE: &str = "casting-agency";

/// Default clock-skew leeway in seconds.
const DEFAULT_LEEWAY_SECS: u64 = 60;

/// Upper bound applied to the configured leeway.
const MAX_LEEWAY_SECS: u64 = 86_400;

/// The `aud` claim: a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

/// Claims decoded from a verified bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Granted permission strings. `None` when the token has no such claim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// Claims for a development token granting `permissions` for `ttl`.
    pub fn for_permissions<P: AsRef<str>>(
        permissions: &[P],
        audience: &str,
        issuer: Option<&str>,
        ttl: chrono::Duration,
    ) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            iss: issuer.map(str::to_string),
            sub: Some(format!("dev|{}", Uuid::new_v4())),
            aud: Some(Audience::One(audience.to_string())),
            exp: now + ttl.num_seconds(),
            iat: Some(now),
            permissions: Some(permissions.iter().map(|p| p.as_ref().to_string()).collect()),
        }
    }

    pub fn permissions(&self) -> Option<&[String]> {
        self.permissions.as_deref()
    }

    /// Subject for log lines.
    pub fn subject(&self) -> &str {
        self.sub.as_deref().unwrap_or("unknown")
    }
}

/// Where verification keys come from.
#[derive(Clone)]
pub enum KeySource {
    /// RS256 keys fetched from a JWKS endpoint, selected by `kid`.
    JwksUrl(String),
    /// A single RS256 public key in PEM form.
    PublicKeyPem(String),
    /// HS256 shared secret.
    Secret(String),
}

impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::JwksUrl(url) => f.debug_tuple("JwksUrl").field(url).finish(),
            KeySource::PublicKeyPem(_) => f.write_str("PublicKeyPem(..)"),
            KeySource::Secret(_) => f.write_str("Secret(<redacted>)"),
        }
    }
}

/// Configuration for bearer-token verification.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub key_source: KeySource,
    /// Audience every token must carry.
    pub audience: String,
    /// Expected issuer. Not checked when `None`.
    pub issuer: Option<String>,
    /// Clock-skew leeway for `exp`, `nbf` and `iat`.
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Load auth configuration from environment variables.
    ///
    /// | Env Var               | Required | Default          |
    /// |-----------------------|----------|------------------|
    /// | `AUTH_JWKS_URL`       | one of   | --               |
    /// | `AUTH_PUBLIC_KEY_PEM` | one of   | --               |
    /// | `AUTH_SECRET`         | one of   | --               |
    /// | `AUTH_AUDIENCE`       | no       | `casting-agency` |
    /// | `AUTH_ISSUER`         | no       | unset            |
    /// | `AUTH_LEEWAY_SECS`    | no       | `60`             |
    ///
    /// Key sources are checked in the order listed; the first one set wins.
    ///
    /// # Panics
    ///
    /// Panics if no key source is set or `AUTH_LEEWAY_SECS` is not a number.
    pub fn from_env() -> Self {
        let key_source = if let Some(url) = non_empty_env("AUTH_JWKS_URL") {
            KeySource::JwksUrl(url)
        } else if let Some(pem) = non_empty_env("AUTH_PUBLIC_KEY_PEM") {
            // PEM blocks in .env files usually carry escaped newlines.
            KeySource::PublicKeyPem(pem.replace("\\n", "\n"))
        } else if let Some(secret) = non_empty_env("AUTH_SECRET") {
            KeySource::Secret(secret)
        } else {
            panic!("One of AUTH_JWKS_URL, AUTH_PUBLIC_KEY_PEM or AUTH_SECRET must be set");
        };

        let audience = non_empty_env("AUTH_AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.into());
        let issuer = non_empty_env("AUTH_ISSUER");

        let leeway_secs: u64 = std::env::var("AUTH_LEEWAY_SECS")
            .unwrap_or_else(|_| DEFAULT_LEEWAY_SECS.to_string())
            .parse()
            .expect("AUTH_LEEWAY_SECS must be a valid u64");

        Self {
            key_source,
            audience,
            issuer,
            leeway_secs,
        }
    }

    /// HS256 configuration with a shared secret and default audience.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            key_source: KeySource::Secret(secret.into()),
            audience: DEFAULT_AUDIENCE.to_string(),
            issuer: None,
            leeway_secs: DEFAULT_LEEWAY_SECS,
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Failure to build a [`TokenVerifier`] at startup.
#[derive(Debug, thiserror::Error)]
pub enum VerifierSetupError {
    #[error("Failed to fetch JWKS: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Invalid key material: {0}")]
    Key(#[from] jsonwebtoken::errors::Error),

    #[error("JWKS contains no keys with a key id")]
    EmptyKeySet,
}

enum VerificationKeys {
    Single(DecodingKey),
    ByKeyId(HashMap<String, DecodingKey>),
}

/// Validates bearer tokens and returns their [`Claims`].
///
/// Verification is pure: no I/O happens per request. JWKS keys are fetched
/// once when the verifier is built.
pub struct TokenVerifier {
    keys: VerificationKeys,
    validation: Validation,
    leeway_secs: i64,
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .field("leeway_secs", &self.leeway_secs)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// Build a verifier from configuration, fetching the JWKS if configured.
    pub async fn from_config(config: &AuthConfig) -> Result<Self, VerifierSetupError> {
        match &config.key_source {
            KeySource::JwksUrl(url) => {
                let set = jwks::fetch_jwks(url).await?;
                Self::from_jwks(&set, Algorithm::RS256, config)
            }
            KeySource::PublicKeyPem(pem) => {
                let key = DecodingKey::from_rsa_pem(pem.as_bytes())?;
                Ok(Self::new(VerificationKeys::Single(key), Algorithm::RS256, config))
            }
            KeySource::Secret(secret) => Ok(Self::from_secret(secret.as_bytes(), config)),
        }
    }

    /// HS256 verifier with a shared secret.
    pub fn from_secret(secret: &[u8], config: &AuthConfig) -> Self {
        let key = DecodingKey::from_secret(secret);
        Self::new(VerificationKeys::Single(key), Algorithm::HS256, config)
    }

    /// Verifier over a key set; tokens pick their key with the `kid` header.
    pub fn from_jwks(
        set: &JwkSet,
        algorithm: Algorithm,
        config: &AuthConfig,
    ) -> Result<Self, VerifierSetupError> {
        let mut keys = HashMap::new();
        for jwk in &set.keys {
            if let Some(kid) = &jwk.common.key_id {
                keys.insert(kid.clone(), DecodingKey::from_jwk(jwk)?);
            }
        }
        if keys.is_empty() {
            return Err(VerifierSetupError::EmptyKeySet);
        }
        tracing::info!(key_count = keys.len(), "Loaded JWKS verification keys");
        Ok(Self::new(VerificationKeys::ByKeyId(keys), algorithm, config))
    }

    fn new(keys: VerificationKeys, algorithm: Algorithm, config: &AuthConfig) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.set_audience(&[&config.audience]);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        validation.set_required_spec_claims(&["exp", "aud"]);
        validation.validate_nbf = true;

        let leeway_secs = config.leeway_secs.min(MAX_LEEWAY_SECS);
        if leeway_secs < config.leeway_secs {
            tracing::warn!(
                configured = config.leeway_secs,
                applied = leeway_secs,
                "Token leeway capped"
            );
        }
        validation.leeway = leeway_secs;

        Self {
            keys,
            validation,
            leeway_secs: i64::try_from(leeway_secs).unwrap_or(i64::MAX),
        }
    }

    /// Validate `token` and return its claims.
    ///
    /// Checks signature, expiry, audience, issuer (when configured), `nbf`,
    /// and that `iat` is not in the future.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let key = match &self.keys {
            VerificationKeys::Single(key) => key,
            VerificationKeys::ByKeyId(keys) => {
                let header = decode_header(token).map_err(|_| {
                    AuthError::MalformedCredential("Unable to parse authentication token".into())
                })?;
                let kid = header.kid.ok_or_else(|| {
                    AuthError::MalformedCredential("Token header has no key id".into())
                })?;
                keys.get(&kid).ok_or_else(|| {
                    AuthError::MalformedCredential("Unable to find the appropriate key".into())
                })?
            }
        };

        let claims = decode::<Claims>(token, key, &self.validation)
            .map_err(classify_jwt_error)?
            .claims;

        if let Some(iat) = claims.iat {
            let now = chrono::Utc::now().timestamp();
            if iat > now.saturating_add(self.leeway_secs) {
                return Err(AuthError::NotYetValid);
            }
        }

        Ok(claims)
    }
}

fn classify_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidAudience => AuthError::WrongAudience,
        ErrorKind::InvalidIssuer => AuthError::WrongIssuer,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::ImmatureSignature => AuthError::NotYetValid,
        ErrorKind::MissingRequiredClaim(claim) => {
            AuthError::MalformedCredential(format!("Token is missing the '{claim}' claim"))
        }
        _ => AuthError::MalformedCredential("Unable to parse authentication token".into()),
    }
}

/// Sign `claims` as an HS256 token with `secret`.
pub fn issue_token(secret: &[u8], claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
}

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A list operation found zero rows.
    #[error("No {entity} records found")]
    EmptyCollection { entity: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures of bearer-credential verification and permission checks.
///
/// Every variant except [`AuthError::Forbidden`] means "who are you?" and maps
/// to 401; `Forbidden` means "you may not" and maps to 403.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization header is expected")]
    MissingCredential,

    #[error("Malformed credential: {0}")]
    MalformedCredential(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token was not issued for this audience")]
    WrongAudience,

    #[error("Token was not issued by the expected issuer")]
    WrongIssuer,

    #[error("Token is not valid yet")]
    NotYetValid,

    #[error("Permissions not included in token claims")]
    PermissionsMissingInClaims,

    #[error("Permission '{permission}' not granted")]
    Forbidden { permission: String },
}

impl AuthError {
    /// Machine-readable code used in error response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "AUTHORIZATION_HEADER_MISSING",
            AuthError::MalformedCredential(_) => "INVALID_HEADER",
            AuthError::InvalidSignature => "INVALID_SIGNATURE",
            AuthError::Expired => "TOKEN_EXPIRED",
            AuthError::WrongAudience | AuthError::WrongIssuer | AuthError::NotYetValid => {
                "INVALID_CLAIMS"
            }
            AuthError::PermissionsMissingInClaims => "INVALID_CLAIMS",
            AuthError::Forbidden { .. } => "FORBIDDEN",
        }
    }

    /// True for the variant that maps to 403 rather than 401.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, AuthError::Forbidden { .. })
    }
}

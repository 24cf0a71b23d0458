//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use jobtrack_core::config::AuthConfig;
use jobtrack_core::error::AppError;

use super::claims::Claims;

/// Validates bearer tokens signed with the shared HS256 secret.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.jwt_leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if !config.jwt_issuer.is_empty() {
            validation.set_issuer(&[config.jwt_issuer.as_str()]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                        AppError::authentication("Invalid token issuer")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        if token_data.claims.email.trim().is_empty() {
            return Err(AppError::authentication("Token carries no email claim"));
        }

        Ok(token_data.claims)
    }

    /// Extracts and validates the token from an `Authorization` header value.
    pub fn decode_bearer(&self, header: &str) -> Result<Claims, AppError> {
        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::authentication("Expected a Bearer token"))?;
        self.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use chrono::Duration;
    use jobtrack_core::error::ErrorKind;
    use uuid::Uuid;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".into(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_round_trip() {
        let encoder = JwtEncoder::new(&config());
        let decoder = JwtDecoder::new(&config());
        let user_id = Uuid::new_v4();

        let token = encoder
            .issue(user_id, "ada@example.com", Duration::hours(1))
            .unwrap();
        let claims = decoder.decode_bearer(&format!("Bearer {token}")).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.email, "ada@example.com");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let encoder = JwtEncoder::new(&AuthConfig {
            jwt_secret: "other".into(),
            ..AuthConfig::default()
        });
        let token = encoder
            .issue(Uuid::new_v4(), "ada@example.com", Duration::hours(1))
            .unwrap();
        let err = JwtDecoder::new(&config()).decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_expired_rejected() {
        let encoder = JwtEncoder::new(&config());
        let token = encoder
            .issue(Uuid::new_v4(), "ada@example.com", Duration::hours(-1))
            .unwrap();
        let err = JwtDecoder::new(&config()).decode(&token).unwrap_err();
        assert_eq!(err.message, "Token has expired");
    }

    #[test]
    fn test_missing_bearer_prefix() {
        let err = JwtDecoder::new(&config())
            .decode_bearer("Basic abc")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_issuer_enforced_when_configured() {
        let cfg = AuthConfig {
            jwt_issuer: "https://id.example.com".into(),
            ..config()
        };
        let token = JwtEncoder::new(&config())
            .issue(Uuid::new_v4(), "ada@example.com", Duration::hours(1))
            .unwrap();
        assert!(JwtDecoder::new(&cfg).decode(&token).is_err());

        let token = JwtEncoder::new(&cfg)
            .issue(Uuid::new_v4(), "ada@example.com", Duration::hours(1))
            .unwrap();
        assert!(JwtDecoder::new(&cfg).decode(&token).is_ok());
    }
}

use chrono::Duration;

use super::claims::Claims;
use super::claims::TokenClass;
use super::errors::JwtError;
use super::handler::JwtHandler;
use super::settings::TokenSettings;

/// Access and refresh token issued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

/// Issues and verifies typed, expiring identity tokens.
pub struct TokenCodec {
    handler: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    pub fn new(settings: &TokenSettings) -> Self {
        Self {
            handler: JwtHandler::new(settings.secret(), settings.algorithm()),
            access_ttl: settings.access_ttl(),
            refresh_ttl: settings.refresh_ttl(),
        }
    }

    /// Issue a signed token of the given class expiring `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject_id: &str,
        email: &str,
        class: TokenClass,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(subject_id, email, class, ttl);
        self.handler.encode(&claims)
    }

    /// Issue an access and a refresh token with the configured lifetimes.
    pub fn issue_pair(&self, subject_id: &str, email: &str) -> Result<TokenPair, JwtError> {
        let access_token = self.issue(subject_id, email, TokenClass::Access, self.access_ttl)?;
        let refresh_token = self.issue(subject_id, email, TokenClass::Refresh, self.refresh_ttl)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_ttl: self.access_ttl,
            refresh_ttl: self.refresh_ttl,
        })
    }

    /// Verify a token and require it to be of `expected` class.
    ///
    /// # Errors
    /// * `InvalidSignature` - Not signed with this secret
    /// * `TokenExpired` - Expiry instant has passed
    /// * `DecodingFailed` - Malformed token or payload
    /// * `WrongTokenClass` - Valid token of the other class
    pub fn verify(&self, token: &str, expected: TokenClass) -> Result<Claims, JwtError> {
        let claims: Claims = self.handler.decode(token)?;

        if claims.token_type != expected {
            return Err(JwtError::WrongTokenClass {
                expected,
                actual: claims.token_type,
            });
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_at_least_32_bytes!";

    fn codec() -> TokenCodec {
        TokenCodec::new(&TokenSettings::new(SECRET))
    }

    #[test]
    fn test_issue_and_verify_same_class() {
        let codec = codec();

        for class in [TokenClass::Access, TokenClass::Refresh] {
            let token = codec
                .issue("42", "a@x.com", class, Duration::minutes(5))
                .expect("Failed to issue token");

            let claims = codec.verify(&token, class).expect("Token should verify");
            assert_eq!(claims.sub, "42");
            assert_eq!(claims.email, "a@x.com");
            assert_eq!(claims.token_type, class);
        }
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let codec = codec();
        let token = codec
            .issue("42", "a@x.com", TokenClass::Access, Duration::minutes(5))
            .unwrap();

        assert_eq!(
            codec.verify(&token, TokenClass::Refresh),
            Err(JwtError::WrongTokenClass {
                expected: TokenClass::Refresh,
                actual: TokenClass::Access,
            })
        );
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let codec = codec();
        let token = codec
            .issue("42", "a@x.com", TokenClass::Refresh, Duration::days(1))
            .unwrap();

        assert!(matches!(
            codec.verify(&token, TokenClass::Access),
            Err(JwtError::WrongTokenClass { .. })
        ));
    }

    #[test]
    fn test_pair_tokens_are_not_interchangeable() {
        let codec = codec();
        let pair = codec.issue_pair("42", "a@x.com").unwrap();

        assert_ne!(pair.access_token, pair.refresh_token);
        assert!(codec.verify(&pair.access_token, TokenClass::Access).is_ok());
        assert!(codec.verify(&pair.refresh_token, TokenClass::Refresh).is_ok());
        assert!(codec.verify(&pair.access_token, TokenClass::Refresh).is_err());
        assert!(codec.verify(&pair.refresh_token, TokenClass::Access).is_err());
    }

    #[test]
    fn test_pair_uses_configured_lifetimes() {
        let settings = TokenSettings::new(SECRET)
            .with_access_ttl(Duration::minutes(1))
            .with_refresh_ttl(Duration::hours(2));
        let codec = TokenCodec::new(&settings);

        let pair = codec.issue_pair("42", "a@x.com").unwrap();
        let access = codec.verify(&pair.access_token, TokenClass::Access).unwrap();
        let refresh = codec.verify(&pair.refresh_token, TokenClass::Refresh).unwrap();

        assert_eq!(access.exp - access.iat, 60);
        assert_eq!(refresh.exp - refresh.iat, 2 * 60 * 60);
        assert_eq!(pair.access_ttl, Duration::minutes(1));
        assert_eq!(pair.refresh_ttl, Duration::hours(2));
    }

    #[test]
    fn test_expired_refresh_token_is_invalid() {
        let codec = codec();
        let token = codec
            .issue("42", "a@x.com", TokenClass::Refresh, Duration::seconds(-1))
            .unwrap();

        assert_eq!(
            codec.verify(&token, TokenClass::Refresh),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_token_from_other_secret_is_invalid() {
        let other = TokenCodec::new(&TokenSettings::new("another_secret_key_of_32_bytes!!"));
        let token = other
            .issue("42", "a@x.com", TokenClass::Access, Duration::minutes(5))
            .unwrap();

        assert_eq!(
            codec().verify(&token, TokenClass::Access),
            Err(JwtError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_is_invalid() {
        let codec = codec();
        assert!(codec.verify("", TokenClass::Access).is_err());
        assert!(codec.verify("not-a-token", TokenClass::Access).is_err());
        assert!(codec.verify("a.b.c", TokenClass::Refresh).is_err());
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let codec = codec();
        let access = codec
            .issue("42", "a@x.com", TokenClass::Access, Duration::minutes(5))
            .unwrap();
        let refresh = codec
            .issue("42", "a@x.com", TokenClass::Refresh, Duration::minutes(5))
            .unwrap();

        // refresh payload under the access signature
        let access_parts: Vec<&str> = access.split('.').collect();
        let refresh_parts: Vec<&str> = refresh.split('.').collect();
        let forged = format!(
            "{}.{}.{}",
            access_parts[0], refresh_parts[1], access_parts[2]
        );

        assert_eq!(
            codec.verify(&forged, TokenClass::Refresh),
            Err(JwtError::InvalidSignature)
        );
    }
}

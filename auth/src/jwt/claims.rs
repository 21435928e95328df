use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Purpose of a token.
///
/// Serialized into the `type` claim. A token of one class is never accepted
/// where the other class is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    /// Short-lived token granting API access
    Access,
    /// Long-lived token only good for minting a new pair
    Refresh,
}

impl TokenClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Access => "access",
            TokenClass::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity claims carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Subject email, used to resolve the identity on verification
    pub email: String,

    /// Token class
    #[serde(rename = "type")]
    pub token_type: TokenClass,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims issued now that expire after `ttl`.
    ///
    /// # Arguments
    /// * `subject_id` - Unique user identifier
    /// * `email` - User email
    /// * `token_type` - Class of the token
    /// * `ttl` - Lifetime; a negative value yields already-expired claims
    pub fn new(
        subject_id: impl ToString,
        email: impl Into<String>,
        token_type: TokenClass,
        ttl: Duration,
    ) -> Self {
        Self::issued_at(subject_id, email, token_type, Utc::now(), ttl)
    }

    /// Create claims issued at a given instant.
    pub fn issued_at(
        subject_id: impl ToString,
        email: impl Into<String>,
        token_type: TokenClass,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: subject_id.to_string(),
            email: email.into(),
            token_type,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new(
            "user123",
            "a@x.com",
            TokenClass::Access,
            Duration::minutes(15),
        );

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.token_type, TokenClass::Access);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_type_claim_serialization() {
        let claims = Claims::new("1", "a@x.com", TokenClass::Refresh, Duration::days(7));
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["type"], "refresh");
        assert_eq!(value["sub"], "1");
        assert!(value.get("token_type").is_none());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let payload = serde_json::json!({
            "sub": "1",
            "email": "a@x.com",
            "type": "session",
            "iat": 0,
            "exp": 10,
        });

        assert!(serde_json::from_value::<Claims>(payload).is_err());
    }

    #[test]
    fn test_issued_at_fixed_instant() {
        let issued = DateTime::from_timestamp(1000, 0).unwrap();
        let claims = Claims::issued_at(
            "1",
            "a@x.com",
            TokenClass::Access,
            issued,
            Duration::seconds(30),
        );

        assert_eq!(claims.iat, 1000);
        assert_eq!(claims.exp, 1030);
    }

    #[test]
    fn test_negative_ttl_is_already_expired() {
        let claims = Claims::new("1", "a@x.com", TokenClass::Refresh, Duration::seconds(-1));
        assert!(claims.exp < Utc::now().timestamp());
    }
}

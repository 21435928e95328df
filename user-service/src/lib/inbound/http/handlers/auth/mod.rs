pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod verify_token;

pub use login::login;
pub use logout::logout;
pub use me::me;
pub use refresh::refresh;
pub use verify_token::verify_token;

use serde::Serialize;

/// Token pair as returned in the response body next to the cookies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

impl From<&auth::TokenPair> for TokenResponseData {
    fn from(tokens: &auth::TokenPair) -> Self {
        Self {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            token_type: "bearer".to_string(),
        }
    }
}

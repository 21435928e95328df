use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;

/// Email and plaintext password presented at login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: Password,
}

/// Authorization tiers, each including the checks of the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTier {
    /// Valid access token of an existing user
    Authenticated,
    /// Authenticated and the account is active
    Active,
    /// Active and the account has the admin flag
    Admin,
}

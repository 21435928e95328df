pub mod errors;
pub mod gate;
pub mod models;
pub mod ports;
pub mod service;

pub use errors::AuthError;
pub use gate::IdentityGate;
pub use models::AccessTier;
pub use models::Credentials;
pub use service::AuthService;

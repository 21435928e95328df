pub mod claims;
pub mod codec;
pub mod errors;
pub mod handler;
pub mod settings;

pub use claims::Claims;
pub use claims::TokenClass;
pub use codec::TokenCodec;
pub use codec::TokenPair;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use settings::TokenSettings;

pub mod error;
pub mod message;

pub use error::ConfigurationError;
pub use message::{InboundMessage, MessageLike, Reply};

//! Credential checks and bearer tokens.

pub mod error;
pub mod service;
pub mod store;
pub mod token;

pub use error::*;
pub use service::AuthService;
pub use store::{StaticUserStore, UserStore};
pub use token::{Claims, TokenIssuer};

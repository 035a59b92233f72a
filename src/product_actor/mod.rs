//! Product store logic: identity rules and error mapping.

pub mod entity;
pub mod error;

pub use error::*;

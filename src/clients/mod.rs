//! Typed clients over the store actors.

#[macro_use]
mod macros;
mod product_client;

pub use product_client::ProductClient;

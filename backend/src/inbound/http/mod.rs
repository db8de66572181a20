//! HTTP inbound adapter exposing the REST endpoints.

pub mod calculations;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_support;
pub mod users;

pub use error::ApiResult;

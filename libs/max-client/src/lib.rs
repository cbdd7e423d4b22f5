pub mod auth;
pub mod exchange;
pub mod helpers;
pub mod rest;
pub mod types;

pub use auth::{AuthError, MaxAuth};
pub use exchange::ExchangeClient;
pub use rest::{MaxRestClient, RestError, DEFAULT_MAX_URL};
pub use types::*;

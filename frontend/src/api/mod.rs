mod auth;
pub mod client;
pub mod types;

pub use auth::AuthApi;
pub use client::*;
pub use types::*;

//! HTTP inbound adapter serving the server-rendered donation pages.

pub mod donations;
pub mod error;
pub mod health;
pub mod login;
pub mod lookup;
pub mod responses;
pub mod session;
pub mod session_config;
pub mod state;
pub mod templates;

pub use error::ApiResult;

//! HTTP route handlers for the front-end.

pub mod health;
pub mod proxy;

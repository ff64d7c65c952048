//! HTTP surface: the axum server over the vertical services and the reqwest
//! client that consumes it.

pub mod client;
pub mod server;

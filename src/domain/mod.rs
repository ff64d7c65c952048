//! Domain types and the ports the rest of the crate is built against.

pub mod artifacts;
pub mod catalog;
pub mod envelope;
pub mod money;
pub mod ports;
pub mod purchase;
pub mod records;
pub mod validation;
pub mod vertical;

//! Outer surfaces: the command line, CSV export and HTTP.

pub mod cli;
pub mod csv;
pub mod http;

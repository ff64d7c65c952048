//! Application layer orchestrating purchases.
//!
//! The [`wizard::Wizard`] drives one vertical's steps against a service port,
//! [`flows`] configures those steps per vertical, [`catalog::CatalogLoader`]
//! fetches what can be bought and [`ledger::Ledger`] keeps the local history.

pub mod catalog;
pub mod flows;
pub mod ledger;
pub mod wizard;

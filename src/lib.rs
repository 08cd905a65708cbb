//! Admin backend for the Transfers ride-hailing and food-delivery platform.
//!
//! The crate serves the admin REST API over a document store of users,
//! drivers, restaurants, rides, orders, promotions and admin accounts, and
//! owns the backup subsystem: point-in-time JSON snapshots of every managed
//! collection, a catalog of those snapshots, automatic scheduling and
//! restore.
//!
//! - [`store`] - collections and pluggable storage backends
//! - [`backup`] - snapshots, catalog, settings, scheduler, restore
//! - [`http`] - axum router, handlers, bearer auth
//! - [`config`] - `config.toml` plus environment overrides

#![deny(unsafe_code)]

pub mod auth;
pub mod backup;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod metrics;
pub mod models;
pub mod paths;
pub mod store;

pub use error::{Error, Result};

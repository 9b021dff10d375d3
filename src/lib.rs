//! Linkshelf: a self-hosted bookmark shelf.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod api;
pub mod app;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod store;
pub mod types;

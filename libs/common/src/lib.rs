//! Common library for the photo vault application
//!
//! This crate provides the storage plumbing shared by the services: database
//! configuration, connection pooling, schema migrations and error types.

pub mod database;
pub mod error;

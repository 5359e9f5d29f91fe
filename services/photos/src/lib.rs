//! Photo vault HTTP service
//!
//! A small REST API over user-owned photo records with bearer-token
//! authentication. [`routes::create_router`] builds the axum application from
//! an [`state::AppState`].

pub mod config;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

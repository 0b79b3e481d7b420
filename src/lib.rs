//! # Agro-catalog admin backend
//!
//! Admin backend for an agricultural products catalog: JWT-authenticated
//! admin accounts, CRUD over the catalog entities, object-storage backed
//! file handling with dense per-product ordering, a capped audit log, a
//! dashboard summary and a pass-through currency-rate lookup.

pub mod audit;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;

pub use error::{ApiError, Result};
pub use server::AppState;

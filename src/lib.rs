//! FinSight Terminal Client Library
//!
//! This library provides the building blocks for the FinSight terminal
//! client: a typed HTTP client for the analysis backend, data models with
//! wire normalization, the income tax calculator, and terminal renderers.
//!
//! # Modules
//!
//! - `client`: FinSight backend API client.
//! - `config`: Configuration management.
//! - `dashboard`: Upload lifecycle and history view state.
//! - `errors`: Error handling types.
//! - `models`: Analysis report models and response normalization.
//! - `render`: Terminal views.
//! - `tax`: Income tax slab calculator.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod models;
pub mod render;
pub mod tax;

//! Core smartbook-auth library (models, validation, config, auth API client).

pub mod api;
pub mod config;
pub mod models;
pub mod validation;

//! Per-screen flow implementations.

pub mod login;
pub mod recovery;
pub mod registration;

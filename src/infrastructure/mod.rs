//! Infrastructure layer.
//!
//! Implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Repository implementations
//! - [`seed`] - Synthetic data for populating a fresh store

pub mod persistence;
pub mod seed;

//! Utility functions shared across layers.
//!
//! - [`url_validator`] - Absolute URL validation for bookmark targets

pub mod url_validator;

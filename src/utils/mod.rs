//! Shared helpers: identifier minting and record field validation.

pub mod digest;
pub mod validation;

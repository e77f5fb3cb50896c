//! Utility functions shared across crates

pub mod mask;

pub use mask::mask_identity;

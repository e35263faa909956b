//! Ports - Trait definitions implemented by adapters.

pub mod issuer;
pub mod repository;
pub mod verifier;

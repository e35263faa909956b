//! Domain layer - Pure business types.

pub mod session;
pub mod video;

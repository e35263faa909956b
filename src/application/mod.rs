//! Application layer - Generic services that use ports.

pub mod uploads;

//! Client-side components: session resolution and the upload controller.

pub mod session;
pub mod uploader;

//! Client side of the external transcription backend.

pub mod client;
pub mod response;

pub use crate::artifact::{content_type, Artifact, ArtifactPayload};
pub use crate::error::DecodeError;
pub use crate::strategy::{Mismatch, Strategy};

pub mod artifact;
pub mod combine;
pub mod contract;
pub mod error;
pub mod strategies;
pub mod strategy;

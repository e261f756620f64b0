//! claw-api: boundary contract toward the agent controller backend.
//!
//! Defines the wire types exchanged with the generation, creation and model
//! catalog endpoints, the [`ControllerApi`] trait the wizard talks to, and an
//! HTTP implementation of it.

mod error;
pub mod http;
pub mod traits;
pub mod types;

pub use error::ApiError;
pub use http::{HttpConfig, HttpControllerApi};
pub use traits::ControllerApi;
pub use types::{AgentDraft, GenerateRequest, GeneratedProfile, ModelInfo};

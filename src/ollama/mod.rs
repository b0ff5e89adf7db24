//! Client for the local generation endpoint.
pub mod core;

pub use self::core::{
    GenerationRequest, GenerationResult, NO_VALID_RESPONSE, dispatch, generate, interpret_reply,
};

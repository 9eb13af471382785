//! Built-in engines and engine-side configuration.
//!
//! The harness treats the backend as an external collaborator behind
//! [`crate::contract::InferenceEngineV1`]. This module provides the
//! reference implementations shipped with the harness:
//!
//! - [`toy_lm::ToyLm`] — a fully deterministic seeded toy language model,
//!   the default CLI backend and the fixture for determinism tests.
//! - [`scripted::ScriptedEngine`] — a programmable stub with failure
//!   injection, for sensitivity and error-path tests.

pub mod params;
pub mod scripted;
pub mod toy_lm;

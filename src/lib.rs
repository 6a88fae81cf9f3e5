//! Structured Bangla translation service.
//!
//! `POST /translate` sends Bangla text to an OpenAI-compatible completion
//! service, asks for a JSON translation and returns it after strict schema
//! validation.

pub mod config;
pub mod llm;
pub mod logging;
pub mod routes;
pub mod state;
pub mod translate;

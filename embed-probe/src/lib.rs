//! # embed-probe
//!
//! Smoke test for an Ollama-compatible embedding service (or a load balancer in front of one):
//! checks that the service is up, that it returns embeddings for a few fixed prompts, and that
//! it answers ten back-to-back requests. The first failing check ends the run.

pub mod cli;
pub mod error;
pub mod logger;
pub mod probe;

pub use cli::{exit_status, probe_service, Cli, DEFAULT_BASE_URL};
pub use error::{ProbeError, Result};
pub use logger::init_tracing;
pub use probe::{
    load_prompt, ProbePhase, ProbeReport, ServiceProbe, EMBEDDING_PROMPTS, LOAD_REQUESTS,
};

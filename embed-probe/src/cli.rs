//! CLI parser and probe entry point.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use ollama_embedding::OllamaEmbedding;

use crate::error::Result;
use crate::probe::{ProbeReport, ServiceProbe};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11000";

#[derive(Parser, Debug)]
#[command(name = "embed-probe")]
#[command(about = "Smoke-test an embedding service: liveness, generation, repeated requests", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Root URL of the embedding service.
    #[arg(default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

/// Probes the service at `base_url` with the default model, writing the report to `out`.
pub async fn probe_service<W: Write>(base_url: &str, out: W) -> Result<ProbeReport> {
    let service = OllamaEmbedding::new(base_url);
    ServiceProbe::new(base_url, service, out).run().await
}

/// Process exit status: 0 when every check passed, 1 otherwise.
pub fn exit_status(result: &Result<ProbeReport>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

impl Cli {
    /// Runs the probe, reporting to stdout.
    pub async fn run(self) -> ExitCode {
        let stdout = std::io::stdout();
        let result = probe_service(&self.base_url, stdout.lock()).await;
        ExitCode::from(exit_status(&result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let cli = Cli::try_parse_from(["embed-probe"]).unwrap();
        assert_eq!(cli.base_url, "http://localhost:11000");
    }

    #[test]
    fn test_positional_base_url() {
        let cli = Cli::try_parse_from(["embed-probe", "http://gpu-box:11434"]).unwrap();
        assert_eq!(cli.base_url, "http://gpu-box:11434");
    }

    #[test]
    fn test_extra_argument_rejected() {
        assert!(Cli::try_parse_from(["embed-probe", "http://a", "http://b"]).is_err());
    }

    #[test]
    fn test_exit_status() {
        let report = ProbeReport {
            dimensions: vec![768, 768, 768],
            load_elapsed: std::time::Duration::from_millis(420),
        };
        assert_eq!(exit_status(&Ok(report)), 0);
        let err = crate::error::ProbeError::ServiceStatus(500);
        assert_eq!(exit_status(&Err(err)), 1);
    }
}

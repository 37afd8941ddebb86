//! The three-phase service check: liveness, embedding generation, repeated requests.
//!
//! Phases run strictly in order and the first failure ends the run; nothing is retried.
//! Every step writes one line to the report sink as soon as it completes.

use std::fmt;
use std::io::Write;
use std::time::{Duration, Instant};

use embedding::EmbeddingService;
use tracing::{error, info};

use crate::error::{ProbeError, Result};

/// Prompts sent during the generation phase, in order.
pub const EMBEDDING_PROMPTS: [&str; 3] = [
    "Hello world",
    "This is a test sentence for embedding generation",
    "Machine learning is fascinating",
];

/// Number of sequential requests in the load phase.
pub const LOAD_REQUESTS: usize = 10;

const RULE_WIDTH: usize = 50;

/// Prompt for the `request`-th (1-based) load-phase call.
pub fn load_prompt(request: usize) -> String {
    format!("Load balancing test request {}", request)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbePhase {
    Liveness,
    Generation,
    Load,
}

impl fmt::Display for ProbePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Liveness => "liveness",
            Self::Generation => "generation",
            Self::Load => "load",
        };
        f.write_str(name)
    }
}

/// Result of a fully passing run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    /// Embedding length returned for each of [`EMBEDDING_PROMPTS`].
    pub dimensions: Vec<usize>,
    /// Wall-clock time of the load phase, first request start to last response.
    pub load_elapsed: Duration,
}

/// Runs the checks against `service`, writing the human-readable report to `out`.
pub struct ServiceProbe<S, W> {
    base_url: String,
    service: S,
    out: W,
}

impl<S, W> ServiceProbe<S, W>
where
    S: EmbeddingService,
    W: Write,
{
    pub fn new(base_url: impl Into<String>, service: S, out: W) -> Self {
        Self {
            base_url: base_url.into(),
            service,
            out,
        }
    }

    /// Runs every phase. On failure the diagnostic is written before the error is returned.
    pub async fn run(&mut self) -> Result<ProbeReport> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out, "Testing Nomic Embedding Service at {}", self.base_url)?;
        writeln!(self.out, "{}", rule)?;

        let report = match self.run_phases().await {
            Ok(report) => report,
            Err(err) => {
                error!(phase = ?err.phase(), error = %err, "probe failed");
                if !matches!(err, ProbeError::Output(_)) {
                    writeln!(self.out, "❌ {}", err)?;
                }
                return Err(err);
            }
        };

        writeln!(self.out)?;
        writeln!(self.out, "{}", rule)?;
        writeln!(
            self.out,
            "🎉 All tests passed! The Nomic Embedding Load Balancer is working correctly."
        )?;
        info!(
            dimensions = ?report.dimensions,
            load_elapsed_ms = report.load_elapsed.as_millis() as u64,
            "probe passed"
        );
        Ok(report)
    }

    async fn run_phases(&mut self) -> Result<ProbeReport> {
        self.check_liveness().await?;
        let dimensions = self.check_generation().await?;
        let load_elapsed = self.check_load().await?;
        Ok(ProbeReport {
            dimensions,
            load_elapsed,
        })
    }

    async fn check_liveness(&mut self) -> Result<()> {
        info!(phase = %ProbePhase::Liveness, base_url = %self.base_url, "step: phase start");
        self.service
            .check_health()
            .await
            .map_err(ProbeError::liveness)?;
        writeln!(self.out, "✅ Service is running")?;
        Ok(())
    }

    async fn check_generation(&mut self) -> Result<Vec<usize>> {
        info!(phase = %ProbePhase::Generation, "step: phase start");
        writeln!(self.out, "\nTesting embedding generation...")?;

        let mut dimensions = Vec::with_capacity(EMBEDDING_PROMPTS.len());
        for (test, prompt) in (1..).zip(EMBEDDING_PROMPTS) {
            let embedding = self
                .service
                .embed(prompt)
                .await
                .map_err(|e| ProbeError::generation(test, e))?;
            writeln!(
                self.out,
                "✅ Test {}: Generated embedding with {} dimensions",
                test,
                embedding.len()
            )?;
            dimensions.push(embedding.len());
        }
        Ok(dimensions)
    }

    async fn check_load(&mut self) -> Result<Duration> {
        info!(phase = %ProbePhase::Load, requests = LOAD_REQUESTS, "step: phase start");
        writeln!(self.out, "\nTesting load balancing with multiple requests...")?;

        let start = Instant::now();
        for request in 1..=LOAD_REQUESTS {
            self.service
                .embed(&load_prompt(request))
                .await
                .map_err(|e| ProbeError::load(request, e))?;
        }
        let elapsed = start.elapsed();

        writeln!(
            self.out,
            "✅ Load balancing test completed in {:.2} seconds",
            elapsed.as_secs_f64()
        )?;
        Ok(elapsed)
    }
}

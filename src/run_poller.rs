//! Bounded status polling with cooperative cancellation. Every flow (trip
//! planning and auth) goes through this one loop; there is exactly one
//! outstanding status query at a time, and the wait between queries is a
//! suspension point, never a busy loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::error::{PipelineError, Result};
use crate::pipeline_api::PipelineApi;
use crate::schema::{PipelineInput, PipelineRun};

#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Pause between consecutive status queries.
    pub interval: Duration,
    /// Upper bound on status queries for one run.
    pub max_attempts: u32,
    /// How many consecutive transient failures (5xx, connection errors)
    /// to absorb before surfacing the error. 0 fails on the first one.
    pub transient_retries: u32,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            max_attempts: 60,
            transient_retries: 2,
        }
    }
}

/// Cancellation handle shared between a poll loop and whoever may abandon
/// it (another task, a shutdown signal). Cloning is cheap; every clone
/// observes the same flag.
#[derive(Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Poll a run until it reaches a terminal state.
///
/// Issues at most `max_attempts` queries. After each successful query the
/// `on_progress` callback sees the fresh snapshot (terminal one included).
/// Once `cancel` is set, no further query is issued, `on_progress` is not
/// invoked again, and an in-flight result is discarded.
pub async fn poll_until_terminal<A, F>(
    api: &A,
    run_id: &str,
    options: &PollOptions,
    cancel: &CancelFlag,
    mut on_progress: F,
) -> Result<PipelineRun>
where
    A: PipelineApi + ?Sized,
    F: FnMut(&PipelineRun),
{
    let mut transient_failures = 0u32;

    for attempt in 1..=options.max_attempts {
        if cancel.is_cancelled() {
            info!(run_id, attempt, "polling cancelled");
            return Err(PipelineError::Cancelled);
        }

        match api.run_status(run_id).await {
            Ok(run) => {
                transient_failures = 0;
                if cancel.is_cancelled() {
                    info!(run_id, attempt, "polling cancelled, discarding in-flight result");
                    return Err(PipelineError::Cancelled);
                }
                debug!(run_id, attempt, state = run.state.as_str(), "status poll");
                on_progress(&run);
                if run.state.is_terminal() {
                    info!(
                        run_id,
                        attempt,
                        state = run.state.as_str(),
                        "run reached terminal state"
                    );
                    return Ok(run);
                }
            }
            Err(e) if e.is_transient() && transient_failures < options.transient_retries => {
                transient_failures += 1;
                warn!(
                    run_id,
                    attempt,
                    consecutive = transient_failures,
                    error = %e,
                    "transient status failure, retrying"
                );
            }
            Err(e) => return Err(e),
        }

        if attempt < options.max_attempts {
            sleep(options.interval).await;
        }
    }

    warn!(
        run_id,
        attempts = options.max_attempts,
        "run did not reach a terminal state in time"
    );
    Err(PipelineError::Timeout {
        attempts: options.max_attempts,
    })
}

/// Start a run and poll it to a terminal state in one call.
pub async fn run_to_completion<A, F>(
    api: &A,
    saved_item_id: &str,
    inputs: &[PipelineInput],
    options: &PollOptions,
    cancel: &CancelFlag,
    on_progress: F,
) -> Result<PipelineRun>
where
    A: PipelineApi + ?Sized,
    F: FnMut(&PipelineRun),
{
    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled);
    }
    let run = api.start_run(saved_item_id, inputs).await?;
    poll_until_terminal(api, &run.run_id, options, cancel, on_progress).await
}

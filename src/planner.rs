//! Top-level trip planning: one call that takes a trip request through the
//! pipeline and returns a finished plan.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::input_builder::build_inputs;
use crate::itinerary_builder::{synthesize, DayPlan};
use crate::normalizer::{normalize, NormalizedItineraryData};
use crate::pipeline_api::PipelineApi;
use crate::run_poller::{run_to_completion, CancelFlag, PollOptions};
use crate::schema::PipelineRun;
use crate::trip::{BudgetBreakdown, TripRequest};

/// Everything a finished planning flow produced: the terminal run (state
/// and logs included), the normalized outputs, the synthesized itinerary
/// and the budget split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    pub run: PipelineRun,
    pub data: NormalizedItineraryData,
    pub days: Vec<DayPlan>,
    pub budget: BudgetBreakdown,
}

/// Plan a trip end to end: build the pipeline inputs, start a run, poll it
/// to a terminal state, normalize its outputs and synthesize the itinerary.
///
/// A run that ends in a non-success state still yields a plan; the
/// synthesizer falls back to its builtin pool when the outputs are empty,
/// and the run's actual state stays visible on the returned plan. Errors
/// are reserved for the flow itself failing (bad request, transport,
/// timeout, cancellation).
pub async fn plan_trip<A, F>(
    api: &A,
    saved_item_id: &str,
    request: &TripRequest,
    options: &PollOptions,
    cancel: &CancelFlag,
    seed: u64,
    on_progress: F,
) -> Result<TripPlan>
where
    A: PipelineApi + ?Sized,
    F: FnMut(&PipelineRun),
{
    let inputs = build_inputs(request)?;
    let run = run_to_completion(api, saved_item_id, &inputs, options, cancel, on_progress).await?;

    if !run.state.is_success() {
        warn!(
            run_id = %run.run_id,
            state = run.state.as_str(),
            "run did not succeed, itinerary will use fallback data"
        );
    }

    let data = normalize(&run.outputs);
    let days = synthesize(request, &data, seed);
    let budget = BudgetBreakdown::from_total(request.budget);

    Ok(TripPlan {
        run,
        data,
        days,
        budget,
    })
}

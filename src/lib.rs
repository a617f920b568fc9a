//! Trip planning on top of a hosted automation pipeline.
//!
//! The crate drives one pipeline service over HTTP: it builds pipeline
//! inputs from a trip request, starts a run, polls it to a terminal state
//! with bounded attempts and cooperative cancellation, normalizes the
//! run's free-form outputs and synthesizes a day-by-day itinerary from
//! them. Authentication and session persistence ride the same machinery.

pub mod auth;
pub mod config;
pub mod error;
pub mod input_builder;
pub mod itinerary_builder;
pub mod links;
pub mod normalizer;
pub mod pipeline_api;
pub mod planner;
pub mod run_poller;
pub mod schema;
pub mod session;
pub mod trip;

pub use auth::{authenticate, AuthMode, AuthOutcome, AuthRequest};
pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use input_builder::build_inputs;
pub use itinerary_builder::{synthesize, DayPlan, PlannedActivity};
pub use links::extract_urls;
pub use normalizer::{filter_log_lines, normalize, NormalizedItineraryData};
pub use pipeline_api::{PipelineApi, PipelineClient};
pub use planner::{plan_trip, TripPlan};
pub use run_poller::{poll_until_terminal, run_to_completion, CancelFlag, PollOptions};
pub use schema::{PipelineInput, PipelineRun, RunState};
pub use session::{Session, SessionStore};
pub use trip::{BudgetBreakdown, TripRequest};

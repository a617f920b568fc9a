//! Authentication through the pipeline service. Login and signup are one
//! pipeline run each; the run's outputs carry the verdict. Credentials are
//! forwarded as pipeline inputs and are never written to the logs.

use serde_json::Value;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::pipeline_api::PipelineApi;
use crate::run_poller::{run_to_completion, CancelFlag, PollOptions};
use crate::schema::{PipelineInput, RunState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Login => "login",
            AuthMode::Signup => "signup",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub mode: AuthMode,
}

impl AuthRequest {
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(PipelineError::Validation(
                "email must not be empty".to_string(),
            ));
        }
        if self.password.trim().is_empty() {
            return Err(PipelineError::Validation(
                "password must not be empty".to_string(),
            ));
        }
        if self.mode == AuthMode::Signup && self.name.trim().is_empty() {
            return Err(PipelineError::Validation(
                "name is required to sign up".to_string(),
            ));
        }
        Ok(())
    }
}

/// What the auth run decided. `Rejected` is a normal outcome, not an
/// error: the flow itself worked, the credentials did not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Accepted,
    Rejected(String),
}

/// Pipeline inputs for an auth run, in the order the pipeline expects.
pub fn build_auth_inputs(request: &AuthRequest) -> Vec<PipelineInput> {
    vec![
        PipelineInput::new("name", request.name.as_str()),
        PipelineInput::new("email", request.email.as_str()),
        PipelineInput::new("password", request.password.as_str()),
        PipelineInput::new("mode", request.mode.as_str()),
    ]
}

/// Run the auth pipeline and read its verdict.
///
/// The run must end in `Done` with an `authStatus` of `success`
/// (case-insensitive) to be accepted; anything else is a rejection, with
/// the pipeline's `message` output as the reason when it provides one.
pub async fn authenticate<A>(
    api: &A,
    saved_item_id: &str,
    request: &AuthRequest,
    options: &PollOptions,
    cancel: &CancelFlag,
) -> Result<AuthOutcome>
where
    A: PipelineApi + ?Sized,
{
    request.validate()?;
    let inputs = build_auth_inputs(request);

    let run = run_to_completion(api, saved_item_id, &inputs, options, cancel, |_| {}).await?;
    info!(
        run_id = %run.run_id,
        state = run.state.as_str(),
        mode = request.mode.as_str(),
        "authentication run finished"
    );

    if run.state != RunState::Done {
        return Ok(AuthOutcome::Rejected(format!(
            "authentication run ended in state {}",
            run.state.as_str()
        )));
    }

    let status = run
        .outputs
        .get("authStatus")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if status.eq_ignore_ascii_case("success") {
        Ok(AuthOutcome::Accepted)
    } else {
        let reason = run
            .outputs
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("authentication was not accepted")
            .to_string();
        Ok(AuthOutcome::Rejected(reason))
    }
}

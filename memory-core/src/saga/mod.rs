//! # Saga Coordinator (C6) and Rollback Handlers (C7)
//!
//! Ordered, all-or-nothing execution across independent backing stores.
//! Steps execute strictly in sequence; the first failure triggers
//! compensation of every already-committed step in reverse order. A saga
//! never panics or propagates — it always resolves to a [`SagaResult`].

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Forward-execution timeout per step (§4.8).
pub const STEP_TIMEOUT: Duration = Duration::from_secs(30);

/// Compensation timeout per step: 1.5x the forward timeout (§4.8).
pub const COMPENSATION_TIMEOUT: Duration = Duration::from_millis(45_000);

/// Shared mutable state threaded through a saga's steps.
pub type SagaContext = Value;

/// One reversible unit of work in a saga.
#[async_trait]
pub trait SagaStep: Send + Sync {
    /// Stable, log-safe step identifier (no tenant content).
    fn name(&self) -> &str;

    /// Perform the step's forward action, returning a JSON fragment merged
    /// into the running [`SagaContext`].
    async fn execute(&self, context: &SagaContext) -> crate::Result<Value>;

    /// Undo this step's effect. Must be idempotent: calling it when the
    /// forward action never ran, or already compensated, is a no-op success
    /// (§4.8 "not found" is success).
    async fn compensate(&self, context: &SagaContext) -> crate::Result<()>;
}

/// Outcome of running a [`Saga`]. Never an `Err` at this level — failures
/// are carried in `error` so callers always get a structured result.
#[derive(Debug, Clone)]
pub struct SagaResult {
    pub success: bool,
    pub context: SagaContext,
    pub error: Option<String>,
    pub completed_steps: Vec<String>,
    pub compensated_steps: Vec<String>,
}

/// An ordered sequence of [`SagaStep`]s executed as a unit.
pub struct Saga {
    id: Uuid,
    steps: Vec<Box<dyn SagaStep>>,
}

impl Saga {
    #[must_use]
    pub fn new(steps: Vec<Box<dyn SagaStep>>) -> Self {
        Self { id: Uuid::new_v4(), steps }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// Runs sagas: executes steps in order, timing each out, and compensates
/// in reverse order on the first failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct SagaCoordinator;

impl SagaCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Execute `saga` against `initial_context`. Always returns a
    /// [`SagaResult`]; never propagates a panic or unhandled error.
    #[instrument(skip(self, saga, initial_context), fields(saga_id = %saga.id()))]
    pub async fn run(&self, saga: &Saga, initial_context: SagaContext) -> SagaResult {
        let mut context = initial_context;
        let mut completed: Vec<&dyn SagaStep> = Vec::new();
        let mut completed_names = Vec::new();

        for (attempt, step) in saga.steps.iter().enumerate() {
            let step_ref = step.as_ref();
            info!(saga_id = %saga.id, step = step_ref.name(), attempt, "saga step starting");
            let outcome = tokio::time::timeout(STEP_TIMEOUT, step_ref.execute(&context)).await;

            match outcome {
                Ok(Ok(fragment)) => {
                    merge_context(&mut context, fragment);
                    completed.push(step_ref);
                    completed_names.push(step_ref.name().to_string());
                    info!(
                        saga_id = %saga.id,
                        step = step_ref.name(),
                        preview = %preview(&context),
                        "saga step committed"
                    );
                }
                Ok(Err(err)) => {
                    warn!(saga_id = %saga.id, step = step_ref.name(), error = %err, "saga step failed");
                    let compensated = self.compensate_all(saga.id, &completed, &context).await;
                    return SagaResult {
                        success: false,
                        context,
                        error: Some(err.to_string()),
                        completed_steps: completed_names,
                        compensated_steps: compensated,
                    };
                }
                Err(_elapsed) => {
                    warn!(saga_id = %saga.id, step = step_ref.name(), "saga step timed out");
                    let compensated = self.compensate_all(saga.id, &completed, &context).await;
                    return SagaResult {
                        success: false,
                        context,
                        error: Some(format!("step '{}' timed out", step_ref.name())),
                        completed_steps: completed_names,
                        compensated_steps: compensated,
                    };
                }
            }
        }

        SagaResult { success: true, context, error: None, completed_steps: completed_names, compensated_steps: Vec::new() }
    }

    /// Compensate already-committed steps in reverse order. Individual
    /// compensation failures are logged and recorded but never abort the
    /// sweep — every step gets a chance to roll back.
    async fn compensate_all(&self, saga_id: Uuid, completed: &[&dyn SagaStep], context: &SagaContext) -> Vec<String> {
        let mut compensated = Vec::new();
        for step in completed.iter().rev() {
            let outcome = tokio::time::timeout(COMPENSATION_TIMEOUT, step.compensate(context)).await;
            match outcome {
                Ok(Ok(())) => {
                    info!(saga_id = %saga_id, step = step.name(), "saga step compensated");
                    compensated.push(step.name().to_string());
                }
                Ok(Err(err)) => {
                    warn!(saga_id = %saga_id, step = step.name(), error = %err, "saga compensation failed");
                }
                Err(_elapsed) => {
                    warn!(saga_id = %saga_id, step = step.name(), "saga compensation timed out");
                }
            }
        }
        compensated
    }
}

fn merge_context(context: &mut SagaContext, fragment: Value) {
    if let (Value::Object(base), Value::Object(incoming)) = (context, fragment) {
        for (key, value) in incoming {
            base.insert(key, value);
        }
    }
}

/// Truncated, sanitized preview of the running context for log lines: at
/// most 5 keys, each value's string form capped at 100 characters (§4.8).
#[must_use]
pub fn preview(context: &SagaContext) -> String {
    let Value::Object(map) = context else {
        return String::new();
    };
    let mut parts = Vec::new();
    for (key, value) in map.iter().take(5) {
        let rendered = value.to_string();
        let truncated: String = rendered.chars().take(100).collect();
        parts.push(format!("{key}={truncated}"));
    }
    parts.join(", ")
}

/// Three-boolean post-rollback check: did every completed step compensate,
/// did none of the never-run steps need compensation, and is the saga's
/// reported state consistent with the result (§4.8 `verifyRollback`).
#[must_use]
pub fn verify_rollback(result: &SagaResult) -> (bool, bool, bool) {
    let all_completed_compensated = result.completed_steps.iter().all(|s| result.compensated_steps.contains(s));
    let no_extraneous_compensation = result.compensated_steps.iter().all(|s| result.completed_steps.contains(s));
    let state_consistent = !result.success;
    (all_completed_compensated, no_extraneous_compensation, state_consistent)
}

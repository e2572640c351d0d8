use std::sync::Arc;
use tracing::{debug, instrument, trace, warn};

use crate::{
    domain::step::{StepDescriptor, StepKind},
    PipelineError, PipelineValue, Transform,
};

/// Factory function to create transforms for a step kind
pub type TransformFactory =
    Arc<dyn Fn(&StepKind) -> Result<Arc<dyn Transform>, PipelineError> + Send + Sync>;

/// Evaluates chains of steps
///
/// The engine holds nothing but its factory, so one instance can be shared
/// across threads and called repeatedly with different chains.
#[derive(Clone)]
pub struct PipelineEngine {
    /// Factory for step transforms
    transform_factory: TransformFactory,
}

/// Accumulator threaded through the evaluation fold
struct EvaluationState {
    current: PipelineValue,
    halted: bool,
    steps: Vec<StepDescriptor>,
}

impl PipelineEngine {
    /// Create a new engine backed by the given factory
    pub fn new(transform_factory: TransformFactory) -> Self {
        Self { transform_factory }
    }

    /// Evaluate `chain` starting from `initial_input`
    ///
    /// Returns one annotated descriptor per input step, in the same order.
    /// Never fails: step errors are recorded on the steps themselves and
    /// every step after the first failure is marked as skipped.
    #[instrument(skip_all, fields(steps = chain.len()))]
    pub fn evaluate(&self, initial_input: &str, chain: &[StepDescriptor]) -> Vec<StepDescriptor> {
        let initial = EvaluationState {
            current: PipelineValue::text(initial_input),
            halted: false,
            steps: Vec::with_capacity(chain.len()),
        };

        let state = chain.iter().fold(initial, |mut state, step| {
            let step = step.clone();

            if state.halted {
                trace!(step_id = %step.id, "Skipping step after earlier failure");
                state.steps.push(step.skipped());
                return state;
            }

            if !step.enabled {
                trace!(step_id = %step.id, "Passing through disabled step");
                let passed = state.current.clone();
                state.steps.push(step.succeeded(passed));
                return state;
            }

            match self.run_step(&step.kind, &state.current) {
                Ok(output) => {
                    debug!(step_id = %step.id, kind = step.kind.type_name(), "Step succeeded");
                    state.current = output.clone();
                    state.steps.push(step.succeeded(output));
                }
                Err(e) => {
                    warn!(
                        step_id = %step.id,
                        kind = step.kind.type_name(),
                        code = e.error_code(),
                        "Step failed: {}", e
                    );
                    state.halted = true;
                    state.steps.push(step.failed(&e));
                }
            }
            state
        });

        state.steps
    }

    /// Resolve, type-check and run a single step
    fn run_step(
        &self,
        kind: &StepKind,
        current: &PipelineValue,
    ) -> Result<PipelineValue, PipelineError> {
        if let Some(e) = kind.resolution_error() {
            return Err(e);
        }

        let transform = (self.transform_factory)(kind)?;
        let expected = transform.input_type();
        if !expected.accepts(current) {
            trace!(transform = transform.transform_type(), ?expected, "Input type rejected");
            return Err(expected.mismatch());
        }

        transform.apply(current)
    }
}

impl std::fmt::Debug for PipelineEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineEngine").finish_non_exhaustive()
    }
}

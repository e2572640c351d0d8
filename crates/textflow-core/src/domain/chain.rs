use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::engine::PipelineEngine;
use crate::domain::step::{StepDescriptor, StepId, StepKind};

/// Direction for moving a step within a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards the start of the chain
    Up,
    /// Towards the end of the chain
    Down,
}

/// An ordered, caller-owned sequence of steps
///
/// Editing operations address steps by identity, so positions can change
/// freely without invalidating references held by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chain {
    steps: Vec<StepDescriptor>,
}

impl Chain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the steps in order
    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the chain has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Look up a step by identity
    pub fn get(&self, id: &StepId) -> Option<&StepDescriptor> {
        self.steps.iter().find(|s| &s.id == id)
    }

    /// Append an enabled step of the given kind and return its new identity
    pub fn add(&mut self, kind: StepKind) -> StepId {
        let step = StepDescriptor::new(kind);
        let id = step.id.clone();
        debug!(step_id = %id, kind = step.kind.type_name(), "Adding step");
        self.steps.push(step);
        id
    }

    /// Append a caller-built step
    pub fn push(&mut self, step: StepDescriptor) {
        self.steps.push(step);
    }

    /// Replace the step sharing `step.id`; returns false if there is none
    pub fn update(&mut self, step: StepDescriptor) -> bool {
        match self.steps.iter_mut().find(|s| s.id == step.id) {
            Some(slot) => {
                *slot = step;
                true
            }
            None => false,
        }
    }

    /// Enable or disable a step
    pub fn set_enabled(&mut self, id: &StepId, enabled: bool) -> bool {
        self.with_step(id, |s| s.enabled = enabled)
    }

    /// Change a step's kind and options
    pub fn set_kind(&mut self, id: &StepId, kind: StepKind) -> bool {
        self.with_step(id, |s| s.kind = kind)
    }

    /// Remove a step, returning it
    pub fn remove(&mut self, id: &StepId) -> Option<StepDescriptor> {
        let index = self.position(id)?;
        debug!(step_id = %id, "Removing step");
        Some(self.steps.remove(index))
    }

    /// Swap a step with its neighbour
    ///
    /// Returns false without changes if the id is unknown or the step is
    /// already at that end of the chain.
    pub fn move_step(&mut self, id: &StepId, direction: Direction) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < self.steps.len() => index + 1,
            _ => return false,
        };
        self.steps.swap(index, target);
        true
    }

    /// Remove every step
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Evaluate the chain against an initial input
    ///
    /// The chain itself is left untouched; the annotated copy is returned.
    pub fn evaluate(&self, engine: &PipelineEngine, initial_input: &str) -> Vec<StepDescriptor> {
        engine.evaluate(initial_input, &self.steps)
    }

    fn position(&self, id: &StepId) -> Option<usize> {
        self.steps.iter().position(|s| &s.id == id)
    }

    fn with_step(&mut self, id: &StepId, f: impl FnOnce(&mut StepDescriptor)) -> bool {
        match self.steps.iter_mut().find(|s| &s.id == id) {
            Some(step) => {
                f(step);
                true
            }
            None => false,
        }
    }
}

impl From<Vec<StepDescriptor>> for Chain {
    fn from(steps: Vec<StepDescriptor>) -> Self {
        Self { steps }
    }
}

impl From<Chain> for Vec<StepDescriptor> {
    fn from(chain: Chain) -> Self {
        chain.steps
    }
}

impl FromIterator<StepDescriptor> for Chain {
    fn from_iter<I: IntoIterator<Item = StepDescriptor>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

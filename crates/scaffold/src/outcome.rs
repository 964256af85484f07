use crate::materializer::Materialized;
use crate::name::ModuleName;
use std::fmt;
use std::path::{Path, PathBuf};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Create,
    Delete,
}

/// Gate folded through the create pipeline.
///
/// Starts as [`OperationState::Proceed`]; any collision turns it into
/// [`OperationState::Abort`] for good, which suppresses the registry phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OperationState {
    #[default]
    Proceed,
    Abort,
}

impl OperationState {
    /// Folds the result of one materializer step into the state.
    #[must_use]
    pub const fn observe(self, step: Materialized) -> Self {
        match step {
            Materialized::Created => self,
            Materialized::AlreadyExists => Self::Abort,
        }
    }

    #[must_use]
    pub const fn is_proceed(self) -> bool {
        matches!(self, Self::Proceed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StepStatus {
    #[strum(serialize = "created")]
    Created,
    #[strum(serialize = "updated")]
    Updated,
    #[strum(serialize = "removed")]
    Removed,
    #[strum(serialize = "unchanged")]
    Unchanged,
    #[strum(serialize = "skipped")]
    Skipped,
    #[strum(serialize = "rolled back")]
    RolledBack,
    #[strum(serialize = "already exists")]
    AlreadyExists,
    #[strum(serialize = "not found")]
    NotFound,
}

impl StepStatus {
    /// Whether the step means the operation did not fully succeed.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::AlreadyExists | Self::NotFound)
    }
}

impl From<Materialized> for StepStatus {
    fn from(value: Materialized) -> Self {
        match value {
            Materialized::Created => Self::Created,
            Materialized::AlreadyExists => Self::AlreadyExists,
        }
    }
}

/// One user-facing line of an operation report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub status: StepStatus,
    pub target: PathBuf,
    pub detail: Option<String>,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.target.display())?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Completion {
    #[strum(serialize = "success")]
    Success,
    #[strum(serialize = "partial")]
    Partial,
}

/// What a create or delete did, step by step.
#[derive(Debug, Clone)]
pub struct OperationOutcome {
    operation: Operation,
    module: ModuleName,
    state: OperationState,
    steps: Vec<StepReport>,
}

impl OperationOutcome {
    #[must_use]
    pub const fn new(operation: Operation, module: ModuleName) -> Self {
        Self { operation, module, state: OperationState::Proceed, steps: Vec::new() }
    }

    pub(crate) fn record(&mut self, status: StepStatus, target: &Path) {
        self.steps.push(StepReport { status, target: target.to_path_buf(), detail: None });
    }

    pub(crate) fn record_with(&mut self, status: StepStatus, target: &Path, detail: String) {
        self.steps.push(StepReport { status, target: target.to_path_buf(), detail: Some(detail) });
    }

    pub(crate) const fn set_state(&mut self, state: OperationState) {
        self.state = state;
    }

    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub const fn module(&self) -> &ModuleName {
        &self.module
    }

    #[must_use]
    pub const fn state(&self) -> OperationState {
        self.state
    }

    #[must_use]
    pub fn steps(&self) -> &[StepReport] {
        &self.steps
    }

    /// Steps with the given status.
    pub fn steps_with(&self, status: StepStatus) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(move |s| s.status == status)
    }

    #[must_use]
    pub fn completion(&self) -> Completion {
        if self.state.is_proceed() && !self.steps.iter().any(|s| s.status.is_failure()) {
            Completion::Success
        } else {
            Completion::Partial
        }
    }
}

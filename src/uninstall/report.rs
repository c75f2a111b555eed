//! Per-step outcomes of a teardown run.

use std::fmt;

/// One guarded step of a teardown sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    StopService,
    DisableService,
    RemoveUnitFile,
    ReloadUnits,
    RemoveAppDir,
    RemoveDesktopEntry,
    RemoveIcon,
    RemoveStateDir,
    RemoveServiceAccount,
    RefreshDesktopDatabase,
    RemoveUserData,
    RemoveUserDesktopEntry,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::StopService => "stop service",
            Step::DisableService => "disable service",
            Step::RemoveUnitFile => "remove unit file",
            Step::ReloadUnits => "reload units",
            Step::RemoveAppDir => "remove application directory",
            Step::RemoveDesktopEntry => "remove desktop entry",
            Step::RemoveIcon => "remove icon",
            Step::RemoveStateDir => "remove state directory",
            Step::RemoveServiceAccount => "remove service account",
            Step::RefreshDesktopDatabase => "refresh desktop database",
            Step::RemoveUserData => "remove user data",
            Step::RemoveUserDesktopEntry => "remove user desktop entry",
        };
        f.write_str(name)
    }
}

/// What happened to a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The resource was already absent, or a precondition made the step moot.
    Skipped,
    Done,
    /// The step failed and was tolerated.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: Step,
    pub outcome: StepOutcome,
}

/// Ordered record of every step a teardown considered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallReport {
    steps: Vec<StepRecord>,
}

impl UninstallReport {
    pub(crate) fn record(&mut self, step: Step, outcome: StepOutcome) {
        if let StepOutcome::Failed(reason) = &outcome {
            log::debug!("Ignoring failure to {step}: {reason}");
        }
        self.steps.push(StepRecord { step, outcome });
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|record| record.step == step)
            .map(|record| &record.outcome)
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps
            .iter()
            .filter(|record| matches!(record.outcome, StepOutcome::Failed(_)))
    }

    /// Number of steps that actually changed something.
    pub fn changed(&self) -> usize {
        self.steps
            .iter()
            .filter(|record| record.outcome == StepOutcome::Done)
            .count()
    }
}

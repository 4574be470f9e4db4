//! Script execution engine.
//!
//! ## Execution Model
//!
//! 1. Seed a controller with the starting registers and a [`SnapshotView`].
//! 2. For each step in source order:
//!    a. Key presses are dispatched and the resulting display is traced.
//!    b. Expectations are evaluated against the current registers and guards.
//! 3. The first fault stops the run; remaining steps count as unexecuted.

#![allow(clippy::uninlined_format_args, clippy::missing_const_for_fn)]

use std::fmt;

use calc_core::{
    BigNatural, CalcConfig, CalcController, CalcEvent, CalcModel, CalcSnapshot, Fault, SnapshotView,
};
use tracing::{debug, info, warn};

use crate::script::{Expectation, Script, Step};

type ScriptController = CalcController<BigNatural, SnapshotView>;

/// Display state after one key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    /// 1-indexed source line of the key.
    pub line: usize,
    /// Key that was pressed.
    pub event: CalcEvent,
    /// Display after the key was handled.
    pub snapshot: CalcSnapshot,
}

/// Result of evaluating a single expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectationResult {
    /// 1-indexed source line of the expectation.
    pub line: usize,
    /// The expectation that was evaluated.
    pub expectation: Expectation,
    /// Whether it held.
    pub passed: bool,
    /// The observed value (for failure reporting).
    pub actual: String,
}

/// A fault that stopped a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptFault {
    /// 1-indexed source line of the faulting key.
    pub line: usize,
    /// Key that faulted.
    pub event: CalcEvent,
    /// Raised fault.
    pub fault: Fault,
}

impl fmt::Display for ScriptFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: '{}' faulted: {} (code {})",
            self.line,
            self.event,
            self.fault,
            self.fault.as_u8()
        )
    }
}

/// Outcome of running a whole script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Display after every handled key, in order.
    pub trace: Vec<TraceEntry>,
    /// Results for each evaluated expectation.
    pub expectation_results: Vec<ExpectationResult>,
    /// Fault that stopped the run, if any.
    pub fault: Option<ScriptFault>,
    /// Number of steps skipped because of a fault.
    pub unexecuted_steps: usize,
    /// Display when the run ended.
    pub final_snapshot: CalcSnapshot,
}

impl RunReport {
    /// Returns true if no fault occurred and every expectation held.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.fault.is_none() && self.expectation_results.iter().all(|r| r.passed)
    }

    /// Returns counts for summary reporting.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let passed = self
            .expectation_results
            .iter()
            .filter(|r| r.passed)
            .count();
        RunSummary {
            events: self.trace.len(),
            passed,
            failed: self.expectation_results.len() - passed,
            unexecuted: self.unexecuted_steps,
        }
    }
}

/// Summary counts for run reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of keys handled without fault.
    pub events: usize,
    /// Number of expectations that held.
    pub passed: usize,
    /// Number of expectations that failed.
    pub failed: usize,
    /// Number of steps never reached.
    pub unexecuted: usize,
}

/// Runs a script from the given starting registers.
#[must_use]
pub fn run_script(script: &Script, model: CalcModel<BigNatural>, config: CalcConfig) -> RunReport {
    let mut controller = CalcController::with_config(model, SnapshotView::new(), config);
    let mut trace = Vec::new();
    let mut expectation_results = Vec::new();

    info!(steps = script.steps.len(), strict = config.strict_guards, "running script");

    for (index, step) in script.steps.iter().enumerate() {
        match &step.step {
            Step::Event(event) => {
                if let Err(fault) = controller.dispatch(*event) {
                    warn!(line = step.line, %event, %fault, "script stopped");
                    return RunReport {
                        trace,
                        expectation_results,
                        fault: Some(ScriptFault {
                            line: step.line,
                            event: *event,
                            fault,
                        }),
                        unexecuted_steps: script.steps.len() - index - 1,
                        final_snapshot: controller.view().snapshot().clone(),
                    };
                }
                trace.push(TraceEntry {
                    line: step.line,
                    event: *event,
                    snapshot: controller.view().snapshot().clone(),
                });
            }
            Step::Expect(expectation) => {
                let result = check_expectation(&controller, step.line, expectation);
                debug!(line = step.line, passed = result.passed, "expectation evaluated");
                expectation_results.push(result);
            }
        }
    }

    RunReport {
        trace,
        expectation_results,
        fault: None,
        unexecuted_steps: 0,
        final_snapshot: controller.view().snapshot().clone(),
    }
}

/// Evaluates one expectation against the controller's current state.
fn check_expectation(
    controller: &ScriptController,
    line: usize,
    expectation: &Expectation,
) -> ExpectationResult {
    let (passed, actual) = match expectation {
        Expectation::Register {
            register,
            operator,
            expected,
        } => {
            let actual = controller.model().register(*register);
            (operator.holds(actual, expected), actual.to_string())
        }
        Expectation::Guard { operation, allowed } => {
            let actual = controller.legality().allows(*operation);
            let state = if actual { "allowed" } else { "disallowed" };
            (actual == *allowed, state.to_string())
        }
    };

    ExpectationResult {
        line,
        expectation: expectation.clone(),
        passed,
        actual,
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.event.to_string();
        write!(
            f,
            "{:>4}  {:<9} top={} bottom={}",
            self.line, key, self.snapshot.top, self.snapshot.bottom
        )
    }
}

impl fmt::Display for ExpectationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed {
            write!(f, "  PASS (line {}): {}", self.line, self.expectation)
        } else {
            write!(
                f,
                "  FAIL (line {}): {} (got {})",
                self.line, self.expectation, self.actual
            )
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} passed, {} failed", self.passed, self.failed)?;
        if self.unexecuted > 0 {
            write!(f, ", {} unexecuted", self.unexecuted)?;
        }
        Ok(())
    }
}

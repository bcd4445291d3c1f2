use tracing::{debug, trace};

use crate::prelude::*;

/// The final verdict of a run.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum RunOutcome {
    /// The input is in the language.
    Accepted,
    /// The input is not in the language, the [`Rejection`] names the failed constraint.
    Rejected(Rejection),
}

impl RunOutcome {
    /// Returns true for [`RunOutcome::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, RunOutcome::Accepted)
    }

    /// The reason for rejection, if the run rejected.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            RunOutcome::Accepted => None,
            RunOutcome::Rejected(rejection) => Some(rejection),
        }
    }

    /// The sink that corresponds to the outcome, [`State::Qf`] or [`State::Qr`].
    pub fn sink(&self) -> State {
        match self {
            RunOutcome::Accepted => State::Qf,
            RunOutcome::Rejected(_) => State::Qr,
        }
    }
}

impl Show for RunOutcome {
    fn show(&self) -> String {
        match self {
            RunOutcome::Accepted => "accepted".to_string(),
            RunOutcome::Rejected(rejection) => format!("rejected: {rejection}"),
        }
    }
}

/// What a single call to [`Pda::step`] did.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum StepResult {
    /// One transition was taken and the run continues.
    Advanced,
    /// The run halted during this step with the given outcome.
    Halted(RunOutcome),
    /// The run had already halted before, nothing happened.
    AlreadyHalted,
}

/// Caller-facing view of where a run stands.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Status {
    /// No outcome yet, more transitions can be taken.
    Running,
    /// The run accepted.
    Accepted,
    /// The run rejected.
    Rejected(Rejection),
}

impl From<RunOutcome> for Status {
    fn from(value: RunOutcome) -> Self {
        match value {
            RunOutcome::Accepted => Status::Accepted,
            RunOutcome::Rejected(rejection) => Status::Rejected(rejection),
        }
    }
}

/// Interpreter for the pushdown automaton recognising
/// `{ aⁿ bᵐ x yᵖ cᵐ aⁿ | n ≥ 2, m ≥ 1, p ≥ 0 }`.
///
/// A run starts with [`Pda::load_input`] and is then driven either one transition at a time
/// through [`Pda::step`] or to the end through [`Pda::run_to_completion`]. Both record one
/// [`TraceEntry`] per transition, so stepping through an input produces the same trace as
/// running it in one go.
///
/// # Example
/// ```
/// use pushdown::prelude::*;
/// let mut pda = Pda::new();
/// pda.load_input("aabxcaa").unwrap();
/// assert_eq!(pda.step(), StepResult::Advanced);
/// assert_eq!(pda.state(), State::Q0);
/// assert_eq!(pda.run_to_completion(), RunOutcome::Accepted);
/// assert_eq!(pda.trace().last().unwrap().state(), State::Qf);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Pda {
    input: InputWord,
    configuration: Configuration,
    trace: Trace,
    outcome: Option<RunOutcome>,
}

impl Pda {
    /// Creates an engine in the reset configuration with empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh engine, loads `text` and runs it to completion.
    pub fn recognize(text: &str) -> Result<RunOutcome, ValidationError> {
        let mut pda = Self::new();
        pda.load_input(text)?;
        Ok(pda.run_to_completion())
    }

    /// Discards the current run: state `q0`, cursor 0, stack `[Z0]`, counters zero, empty
    /// trace, no outcome and empty input.
    pub fn reset(&mut self) {
        debug!("resetting automaton");
        *self = Self::default();
    }

    /// Validates `text` (after trimming surrounding whitespace) and starts a new run on it,
    /// recording the initial configuration as first trace entry. On error the engine is left
    /// exactly as it was.
    pub fn load_input(&mut self, text: &str) -> Result<(), ValidationError> {
        let input = InputWord::parse(text)?;
        debug!("loaded input \"{input}\" of length {}", input.len());
        *self = Self {
            input,
            ..Self::default()
        };
        self.record();
        Ok(())
    }

    /// Takes exactly one transition. See [`StepResult`] for the possible results.
    pub fn step(&mut self) -> StepResult {
        self.advance()
    }

    /// Takes transitions until the run halts and returns its outcome. If the run had
    /// already halted, the existing outcome is returned.
    pub fn run_to_completion(&mut self) -> RunOutcome {
        loop {
            match self.advance() {
                StepResult::Advanced => continue,
                StepResult::Halted(outcome) => return outcome,
                StepResult::AlreadyHalted => {
                    if let Some(outcome) = self.outcome {
                        return outcome;
                    }
                }
            }
        }
    }

    fn advance(&mut self) -> StepResult {
        if self.outcome.is_some() {
            return StepResult::AlreadyHalted;
        }
        if self.trace.is_empty() {
            // nothing was loaded since the last reset, run on the empty input
            self.record();
        }

        let lookahead = Lookahead::at(&self.input, self.configuration.cursor());
        match lookup(&self.configuration, lookahead) {
            Ok(rule) => {
                self.configuration.apply(&rule);
                self.record();
                if rule.target() == State::Qf {
                    self.halt(RunOutcome::Accepted)
                } else {
                    StepResult::Advanced
                }
            }
            Err(rejection) => self.halt(RunOutcome::Rejected(rejection)),
        }
    }

    fn halt(&mut self, outcome: RunOutcome) -> StepResult {
        debug!(
            "halting in {} after {} transitions: {}",
            self.configuration.state(),
            self.trace.len().saturating_sub(1),
            outcome.show()
        );
        self.outcome = Some(outcome);
        StepResult::Halted(outcome)
    }

    fn record(&mut self) {
        let entry = self.configuration.snapshot(&self.input);
        trace!("recording {}", entry.show());
        self.trace.push(entry);
    }

    /// The current state. A rejected run stays in the state where the failing transition
    /// was attempted, use [`RunOutcome::sink`] to obtain `qr`.
    pub fn state(&self) -> State {
        self.configuration.state()
    }

    /// Stack contents from bottom to top.
    pub fn stack(&self) -> &[StackSymbol] {
        self.configuration.stack().as_slice()
    }

    /// The trace of the current run.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Index of the next input symbol.
    pub fn cursor(&self) -> usize {
        self.configuration.cursor()
    }

    /// The counters of the current run.
    pub fn counters(&self) -> &Counters {
        self.configuration.counters()
    }

    /// The full current configuration.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// The loaded input.
    pub fn input(&self) -> &InputWord {
        &self.input
    }

    /// The part of the input that has not been read yet.
    pub fn remaining(&self) -> String {
        self.input.suffix_string(self.cursor())
    }

    /// The outcome, once the run has halted.
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    /// Returns true once an outcome has been produced.
    pub fn is_halted(&self) -> bool {
        self.outcome.is_some()
    }

    /// Where the run stands.
    pub fn status(&self) -> Status {
        self.outcome.map(Status::from).unwrap_or(Status::Running)
    }
}

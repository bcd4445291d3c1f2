use std::fmt::Display;

use crate::prelude::*;

/// The states of the automaton. `Q0` to `Q4` are live, [`State::Qf`] and [`State::Qr`] are the
/// accepting and rejecting sink, respectively.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum State {
    /// Reading the leading block of `a`s.
    #[default]
    Q0,
    /// Reading the block of `b`s.
    Q1,
    /// Reading `y`s after the separator `x`.
    Q2,
    /// Matching `c`s against the `B` marks.
    Q3,
    /// Matching trailing `a`s against the `A` marks.
    Q4,
    /// Accepting sink.
    Qf,
    /// Rejecting sink.
    Qr,
}

impl State {
    /// The live states, i.e. those that have outgoing transitions.
    pub const LIVE: [State; 5] = [State::Q0, State::Q1, State::Q2, State::Q3, State::Q4];

    /// Returns true for [`State::Qf`] and [`State::Qr`].
    pub fn is_sink(&self) -> bool {
        matches!(self, State::Qf | State::Qr)
    }

    /// Short name as used in traces, e.g. `q3`.
    pub fn name(&self) -> &'static str {
        match self {
            State::Q0 => "q0",
            State::Q1 => "q1",
            State::Q2 => "q2",
            State::Q3 => "q3",
            State::Q4 => "q4",
            State::Qf => "qf",
            State::Qr => "qr",
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Show for State {
    fn show(&self) -> String {
        self.name().to_string()
    }
}

//! The fixed transition table of the automaton.
//!
//! The table is stored as data: [`rule`] maps a live state and a [`Lookahead`] to a [`Rule`],
//! which bundles the target state, the effect on stack, counters and cursor and a list of
//! [`Guard`]s. [`lookup`] evaluates the guards of the matching rule in order against a
//! [`Configuration`], so a failing precondition is reported before anything is mutated.
use std::fmt::Display;

use itertools::Itertools;
use thiserror::Error;
use tracing::trace;

use crate::prelude::*;

/// The symbol class under the cursor: either an input symbol or the end of the input.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Lookahead {
    /// An input symbol.
    Symbol(Symbol),
    /// The cursor is past the last symbol, usually written ε.
    End,
}

impl Lookahead {
    /// All symbol classes, the five input symbols followed by [`Lookahead::End`].
    pub const ALL: [Lookahead; 6] = [
        Lookahead::Symbol(Symbol::A),
        Lookahead::Symbol(Symbol::B),
        Lookahead::Symbol(Symbol::X),
        Lookahead::Symbol(Symbol::Y),
        Lookahead::Symbol(Symbol::C),
        Lookahead::End,
    ];

    /// The lookahead of `input` when the cursor is at `position`.
    pub fn at(input: &InputWord, position: usize) -> Self {
        input
            .nth(position)
            .map(Lookahead::Symbol)
            .unwrap_or(Lookahead::End)
    }
}

impl Display for Lookahead {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookahead::Symbol(sym) => write!(f, "{sym}"),
            Lookahead::End => write!(f, "EOF"),
        }
    }
}

/// The reason why the automaton rejected its input. Every variant identifies the constraint
/// that failed, [`Rejection::category`] groups them into coarser classes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Error)]
pub enum Rejection {
    /// No rule exists for the current state and lookahead.
    #[error("in {state} expected {}, found `{found}`", expected_in(.state))]
    UnexpectedSymbol {
        /// State in which the symbol was read.
        state: State,
        /// The offending symbol, or end of input.
        found: Lookahead,
    },
    /// `x` was read before any `b`.
    #[error("m ≥ 1 required: at least one b must precede x")]
    MissingB,
    /// The `a` block started before any `c` was read.
    #[error("m ≥ 1 required: at least one c must be read")]
    MissingC,
    /// The first `c` was read while no `B` mark was on top of the stack.
    #[error("no B marks left when starting to read c")]
    NoBMarks,
    /// A `c` was read while the top of the stack is not a `B` mark.
    #[error("top is not B when reading c")]
    TopNotB,
    /// Number of `b`s and `c`s differ.
    #[error("b/c count mismatch: read {c} c but {b} b")]
    BcCountMismatch {
        /// Number of `b`s read.
        b: usize,
        /// Number of `c`s read.
        c: usize,
    },
    /// A trailing `a` was read while no `A` mark is on top of the stack.
    #[error("no A to pop for trailing a")]
    NoAToPop,
    /// The input ended while marks other than the sentinel were still on the stack.
    ///
    /// At the end of the input the a-counts are compared before the stack, and leftover marks
    /// on the stack at that point are always unmatched `A`s, so a run reports
    /// [`Rejection::ACountMismatch`] instead and never produces this variant.
    #[error("stack not returned to base")]
    StackNotAtBase,
    /// Number of leading and trailing `a`s differ.
    #[error("a-count mismatch: read {final_a} trailing a but {initial_a} leading a")]
    ACountMismatch {
        /// Number of leading `a`s.
        initial_a: usize,
        /// Number of trailing `a`s.
        final_a: usize,
    },
    /// Fewer than two leading `a`s.
    #[error("n ≥ 2 required: only {n} leading a")]
    NTooSmall {
        /// Number of leading `a`s.
        n: usize,
    },
}

impl Rejection {
    /// A short, language-agnostic name for the constraint that failed. Both [`Rejection::MissingB`]
    /// and [`Rejection::MissingC`] fall into the category `m ≥ 1 required`.
    pub fn category(&self) -> &'static str {
        match self {
            Rejection::UnexpectedSymbol { .. } => "unexpected symbol",
            Rejection::MissingB | Rejection::MissingC => "m ≥ 1 required",
            Rejection::NoBMarks => "no B marks left",
            Rejection::TopNotB => "top is not B",
            Rejection::BcCountMismatch { .. } => "b/c count mismatch",
            Rejection::NoAToPop => "no A to pop",
            Rejection::StackNotAtBase => "stack not returned to base",
            Rejection::ACountMismatch { .. } => "a-count mismatch",
            Rejection::NTooSmall { .. } => "n ≥ 2 required",
        }
    }
}

fn expected_in(state: &State) -> &'static str {
    match state {
        State::Q0 => "a or b at start",
        State::Q1 => "b or x",
        State::Q2 => "y or c after x",
        State::Q3 => "c or a",
        State::Q4 => "a or end of input",
        State::Qf | State::Qr => "nothing",
    }
}

/// Effect of a transition on the stack.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum StackOp {
    /// Leave the stack as it is.
    Keep,
    /// Push a mark.
    Push(StackSymbol),
    /// Pop the topmost mark.
    Pop,
}

/// A precondition of a [`Rule`]. Each guard maps to exactly one [`Rejection`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Guard {
    /// At least one `b` was read.
    SomeB,
    /// A `B` mark is on top when entering the `c` block.
    BMarksLeft,
    /// A `B` mark is on top when reading a `c`.
    TopIsB,
    /// As many `c`s as `b`s were read.
    BcBalanced,
    /// At least one `c` was read.
    SomeC,
    /// An `A` mark is on top when reading a trailing `a`.
    TopIsA,
    /// As many trailing as leading `a`s were read.
    ABalanced,
    /// Only the sentinel is left on the stack.
    StackAtBase,
    /// At least two leading `a`s were read.
    TwoLeadingA,
}

impl Guard {
    /// Checks the guard against `config`.
    pub fn check(&self, config: &Configuration) -> Result<(), Rejection> {
        let counters = config.counters();
        let top = config.stack().top();
        let holds = match self {
            Guard::SomeB => counters.b >= 1,
            Guard::BMarksLeft | Guard::TopIsB => top == StackSymbol::B,
            Guard::BcBalanced => counters.b == counters.c,
            Guard::SomeC => counters.c >= 1,
            Guard::TopIsA => top == StackSymbol::A,
            Guard::ABalanced => counters.initial_a == counters.final_a,
            Guard::StackAtBase => config.stack().is_base(),
            Guard::TwoLeadingA => counters.initial_a >= 2,
        };
        if holds {
            Ok(())
        } else {
            Err(self.violation(counters))
        }
    }

    fn violation(&self, counters: &Counters) -> Rejection {
        match self {
            Guard::SomeB => Rejection::MissingB,
            Guard::BMarksLeft => Rejection::NoBMarks,
            Guard::TopIsB => Rejection::TopNotB,
            Guard::BcBalanced => Rejection::BcCountMismatch {
                b: counters.b,
                c: counters.c,
            },
            Guard::SomeC => Rejection::MissingC,
            Guard::TopIsA => Rejection::NoAToPop,
            Guard::ABalanced => Rejection::ACountMismatch {
                initial_a: counters.initial_a,
                final_a: counters.final_a,
            },
            Guard::StackAtBase => Rejection::StackNotAtBase,
            Guard::TwoLeadingA => Rejection::NTooSmall {
                n: counters.initial_a,
            },
        }
    }
}

impl Show for Guard {
    fn show(&self) -> String {
        match self {
            Guard::SomeB => "b≥1",
            Guard::BMarksLeft | Guard::TopIsB => "top=B",
            Guard::BcBalanced => "b=c",
            Guard::SomeC => "c≥1",
            Guard::TopIsA => "top=A",
            Guard::ABalanced => "n=n'",
            Guard::StackAtBase => "stack=[Z0]",
            Guard::TwoLeadingA => "n≥2",
        }
        .to_string()
    }
}

/// One entry of the transition table.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Rule {
    target: State,
    stack: StackOp,
    counter: Option<Counter>,
    consumes: bool,
    guards: &'static [Guard],
}

impl Rule {
    const fn to(target: State) -> Self {
        Self {
            target,
            stack: StackOp::Keep,
            counter: None,
            consumes: false,
            guards: &[],
        }
    }

    const fn consuming(mut self) -> Self {
        self.consumes = true;
        self
    }

    const fn push(mut self, symbol: StackSymbol) -> Self {
        self.stack = StackOp::Push(symbol);
        self
    }

    const fn pop(mut self) -> Self {
        self.stack = StackOp::Pop;
        self
    }

    const fn count(mut self, counter: Counter) -> Self {
        self.counter = Some(counter);
        self
    }

    const fn guarded(mut self, guards: &'static [Guard]) -> Self {
        self.guards = guards;
        self
    }

    /// The state that is reached.
    pub fn target(&self) -> State {
        self.target
    }

    /// The effect on the stack.
    pub fn stack_op(&self) -> StackOp {
        self.stack
    }

    /// The counter that is incremented, if any.
    pub fn counter(&self) -> Option<Counter> {
        self.counter
    }

    /// Whether the cursor advances.
    pub fn consumes(&self) -> bool {
        self.consumes
    }

    /// Preconditions, evaluated in order.
    pub fn guards(&self) -> &'static [Guard] {
        self.guards
    }

    /// Checks all guards of `self` against `config` and returns the first violation.
    pub fn check(&self, config: &Configuration) -> Result<(), Rejection> {
        self.guards.iter().try_for_each(|guard| guard.check(config))
    }
}

impl Show for Rule {
    fn show(&self) -> String {
        let mut parts = vec![];
        if !self.guards.is_empty() {
            parts.push(
                self.guards.iter().map(Show::show).join(" "),
            );
        }
        match self.stack {
            StackOp::Keep => {}
            StackOp::Push(sym) => parts.push(format!("push {sym}")),
            StackOp::Pop => parts.push("pop".to_string()),
        }
        if !self.consumes {
            parts.push("ε".to_string());
        }
        parts.push(format!("→ {}", self.target));
        parts.join(", ")
    }
}

/// Returns the rule for reading `lookahead` in `state`, or `None` if the table has no
/// entry, which means the automaton rejects with [`Rejection::UnexpectedSymbol`].
pub fn rule(state: State, lookahead: Lookahead) -> Option<Rule> {
    use Lookahead::{End, Symbol as S};
    use Symbol::*;

    let rule = match (state, lookahead) {
        (State::Q0, S(A)) => Rule::to(State::Q0)
            .push(StackSymbol::A)
            .count(Counter::InitialA)
            .consuming(),
        (State::Q0, S(B)) => Rule::to(State::Q1),
        (State::Q1, S(B)) => Rule::to(State::Q1)
            .push(StackSymbol::B)
            .count(Counter::B)
            .consuming(),
        (State::Q1, S(X)) => Rule::to(State::Q2)
            .guarded(&[Guard::SomeB])
            .consuming(),
        (State::Q2, S(Y)) => Rule::to(State::Q2).consuming(),
        (State::Q2, S(C)) => Rule::to(State::Q3).guarded(&[Guard::BMarksLeft]),
        (State::Q3, S(C)) => Rule::to(State::Q3)
            .guarded(&[Guard::TopIsB])
            .pop()
            .count(Counter::C)
            .consuming(),
        (State::Q3, S(A)) => Rule::to(State::Q4).guarded(&[Guard::BcBalanced, Guard::SomeC]),
        (State::Q4, S(A)) => Rule::to(State::Q4)
            .guarded(&[Guard::TopIsA])
            .pop()
            .count(Counter::FinalA)
            .consuming(),
        (State::Q4, End) => Rule::to(State::Qf).guarded(&[
            Guard::ABalanced,
            Guard::StackAtBase,
            Guard::TwoLeadingA,
        ]),
        _ => return None,
    };
    Some(rule)
}

/// Determines the transition that `config` takes on `lookahead`. Returns the applicable
/// [`Rule`] if one exists and all its guards hold, otherwise the [`Rejection`] that halts the
/// run. `config` is not modified. Sinks have no outgoing transitions, so a configuration in
/// `qf` or `qr` yields [`Rejection::UnexpectedSymbol`] for every lookahead.
pub fn lookup(config: &Configuration, lookahead: Lookahead) -> Result<Rule, Rejection> {
    let state = config.state();
    let rule = rule(state, lookahead).ok_or(Rejection::UnexpectedSymbol {
        state,
        found: lookahead,
    })?;
    rule.check(config)?;
    trace!("{} --{}--> {}", state, lookahead, rule.show());
    Ok(rule)
}

/// Renders the transition table with one row per live state and one column per [`Lookahead`].
/// Cells without a rule show `-`.
pub fn transition_table() -> String {
    let mut builder = tabled::builder::Builder::default();
    builder.push_record(
        std::iter::once("State".to_string())
            .chain(Lookahead::ALL.iter().map(|la| match la {
                Lookahead::End => "ε".to_string(),
                Lookahead::Symbol(sym) => sym.to_string(),
            })),
    );
    for state in State::LIVE {
        let mut row = vec![state.show()];
        for lookahead in Lookahead::ALL {
            row.push(
                rule(state, lookahead)
                    .map(|rule| rule.show())
                    .unwrap_or_else(|| "-".to_string()),
            );
        }
        builder.push_record(row);
    }

    builder
        .build()
        .with(tabled::settings::Style::rounded())
        .to_string()
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::transition::{lookup, rule, transition_table, Guard};

    /// The initial configuration after taking the transition of each `(state, lookahead)` pair.
    fn configuration_after(steps: &[(State, Lookahead)]) -> Configuration {
        let mut config = Configuration::initial();
        for (state, lookahead) in steps {
            config.apply(&rule(*state, *lookahead).unwrap());
        }
        config
    }

    #[test]
    fn table_is_deterministic_and_sparse() {
        let defined = State::LIVE
            .iter()
            .flat_map(|q| Lookahead::ALL.iter().map(move |la| rule(*q, *la)))
            .filter(Option::is_some)
            .count();
        assert_eq!(defined, 10);
        assert!(rule(State::Q2, Lookahead::End).is_none());
        assert!(rule(State::Qf, Lookahead::End).is_none());
    }

    #[test]
    fn non_consuming_rules_move_forward() {
        for state in State::LIVE {
            for lookahead in Lookahead::ALL {
                if let Some(rule) = rule(state, lookahead) {
                    if !rule.consumes() {
                        assert!(rule.target() > state, "{state} on {lookahead} loops");
                    }
                }
            }
        }
    }

    #[test]
    fn lookup_reports_missing_rule() {
        let config = Configuration::initial();
        assert_eq!(
            lookup(&config, Lookahead::Symbol(Symbol::X)),
            Err(Rejection::UnexpectedSymbol {
                state: State::Q0,
                found: Lookahead::Symbol(Symbol::X)
            })
        );
        let rej = lookup(&config, Lookahead::End).unwrap_err();
        assert_eq!(rej.to_string(), "in q0 expected a or b at start, found `EOF`");
        assert_eq!(rej.category(), "unexpected symbol");
    }

    #[test]
    fn sinks_have_no_transitions() {
        let mut pda = Pda::new();
        pda.load_input("aabxcaa").unwrap();
        assert_eq!(pda.run_to_completion(), RunOutcome::Accepted);
        assert_eq!(pda.state(), State::Qf);

        for lookahead in Lookahead::ALL {
            assert_eq!(
                lookup(pda.configuration(), lookahead),
                Err(Rejection::UnexpectedSymbol {
                    state: State::Qf,
                    found: lookahead
                })
            );
        }
        assert_eq!(
            lookup(pda.configuration(), Lookahead::End)
                .unwrap_err()
                .to_string(),
            "in qf expected nothing, found `EOF`"
        );
    }

    #[test]
    fn missing_c_is_m_too_small() {
        let config = Configuration::initial();
        let rule = rule(State::Q3, Lookahead::Symbol(Symbol::A)).unwrap();
        assert_eq!(config.counters().b, 0);
        assert_eq!(config.counters().c, 0);
        assert_eq!(rule.check(&config), Err(Rejection::MissingC));
        assert_eq!(Rejection::MissingC.category(), "m ≥ 1 required");
    }

    #[test]
    fn entering_c_block_needs_b_mark() {
        // two leading a leave an A on top
        let config = configuration_after(&[
            (State::Q0, Lookahead::Symbol(Symbol::A)),
            (State::Q0, Lookahead::Symbol(Symbol::A)),
        ]);
        assert_eq!(config.stack().top(), StackSymbol::A);
        let rule = rule(State::Q2, Lookahead::Symbol(Symbol::C)).unwrap();
        assert_eq!(rule.check(&config), Err(Rejection::NoBMarks));
        assert_eq!(
            Rule::check(&rule, &Configuration::initial()),
            Err(Rejection::NoBMarks)
        );
    }

    #[test]
    fn leftover_mark_is_not_at_base() {
        let config = configuration_after(&[(State::Q0, Lookahead::Symbol(Symbol::A))]);
        assert_eq!(config.stack().as_slice(), &[StackSymbol::Z0, StackSymbol::A]);
        assert_eq!(
            Guard::StackAtBase.check(&config),
            Err(Rejection::StackNotAtBase)
        );
        assert_eq!(
            Rejection::StackNotAtBase.category(),
            "stack not returned to base"
        );
    }

    #[test]
    fn guards_report_counts() {
        let config = Configuration::initial();
        assert_eq!(Guard::SomeB.check(&config), Err(Rejection::MissingB));
        assert_eq!(Guard::StackAtBase.check(&config), Ok(()));
        assert_eq!(
            Guard::TwoLeadingA.check(&config),
            Err(Rejection::NTooSmall { n: 0 })
        );
        assert_eq!(
            Rejection::BcCountMismatch { b: 2, c: 1 }.to_string(),
            "b/c count mismatch: read 1 c but 2 b"
        );
    }

    #[test_log::test]
    fn renders_table() {
        let table = transition_table();
        assert!(table.contains("push A"));
        assert!(table.contains("→ qf"));
        assert_eq!(table.lines().filter(|l| l.contains("q")).count(), 5);
    }
}

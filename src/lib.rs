//! Interpreter for one fixed deterministic pushdown automaton.
//!
//! The automaton recognises the language `{ aⁿ bᵐ x yᵖ cᵐ aⁿ | n ≥ 2, m ≥ 1, p ≥ 0 }` over the
//! alphabet `{a, b, x, y, c}`. It has five live states `q0` to `q4` together with an accepting
//! sink `qf` and a rejecting sink `qr`, a single stack whose bottom is the sentinel `Z0` and four
//! counters which track the lengths of the `a`, `b` and `c` blocks.
//!
//! The central type is [`Pda`]. An input is handed to it through [`Pda::load_input`], which
//! validates the alphabet, and is then either processed in one go with [`Pda::run_to_completion`]
//! or one transition at a time with [`Pda::step`]. Every configuration that is reached is
//! recorded in a [`trace::Trace`], which together with the current state and the stack forms the
//! read interface for anything that wants to display a run.
//!
//! The transition table itself lives in [`transition`], where each entry is a [`transition::Rule`]
//! with a list of guards. A guard that fails turns into a [`transition::Rejection`] which names
//! the violated constraint.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use pushdown::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{InputWord, Symbol, ValidationError},
        configuration::{Configuration, Counter, Counters},
        engine::{Pda, RunOutcome, Status, StepResult},
        stack::{Stack, StackSymbol},
        state::State,
        trace::{Trace, TraceEntry},
        transition::{lookup, Guard, Lookahead, Rejection, Rule, StackOp},
        Show,
    };
}

/// Input symbols and validated input words.
pub mod alphabet;

/// The stack with its bottom sentinel.
pub mod stack;

/// States of the automaton.
pub mod state;

/// Counters and configurations.
pub mod configuration;

pub mod transition;

/// Recorded history of a run.
pub mod trace;

/// The engine that drives runs.
pub mod engine;
pub use engine::Pda;

/// Direct description of the recognised language.
pub mod language;

#[cfg(feature = "random")]
pub mod random;

use itertools::Itertools;

/// Helper trait which can be used to display states, stacks, traces and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state that should be
    /// for example q0, q1, q2, ... and for a trace entry it should be (q0, "abc", [Z0, A]).
    fn show(&self) -> String;
    /// Show a collection of the thing, by default this is `{x, y, z}` where `x`, `y` and `z`
    /// are the individual representations.
    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
        I::IntoIter: DoubleEndedIterator,
    {
        format!("{{{}}}", iter.into_iter().map(Show::show).join(", "))
    }
}

impl Show for usize {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::prelude::*;

    /// All words over the input alphabet of length at most `max_len`.
    fn all_words(max_len: usize) -> impl Iterator<Item = String> {
        (0..=max_len).flat_map(|len| {
            std::iter::repeat(Symbol::ALL)
                .take(len)
                .multi_cartesian_product()
                .map(|symbols| symbols.into_iter().map(|sym| sym.as_char()).collect::<String>())
        })
    }

    #[test]
    fn exhaustive_up_to_length_seven() {
        let mut accepted = vec![];
        for word in all_words(7) {
            let mut pda = Pda::new();
            pda.load_input(&word).unwrap();
            let outcome = pda.run_to_completion();

            assert_eq!(
                outcome.is_accepted(),
                crate::language::contains(&word),
                "verdict for \"{word}\""
            );
            // every transition either consumes or moves forward through q0..qf
            assert!(pda.trace().len() <= word.len() + 5, "{word} took too long");
            for entry in pda.trace() {
                assert!(!entry.stack().is_empty());
                assert_eq!(entry.stack()[0], StackSymbol::Z0);
                assert!(entry.stack()[1..].iter().all(|s| *s != StackSymbol::Z0));
            }
            let cursors = pda.trace().iter().map(|e| word.len() - e.remaining().len());
            assert!(cursors.tuple_windows().all(|(a, b)| a <= b));

            if outcome.is_accepted() {
                accepted.push(word);
            }
        }
        assert_eq!(accepted, vec!["aabxcaa".to_string()]);
    }

    #[test]
    fn collections_show() {
        let states: Vec<State> = vec![State::Q0, State::Qf];
        assert_eq!(states.show(), "{q0, qf}");
        assert_eq!(3usize.show(), "3");
    }
}

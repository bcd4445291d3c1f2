//! Random generation of input words, used for property tests and benchmarks.
use tracing::trace;

use crate::language::Parameters;
use crate::prelude::*;

/// Draws random [`Parameters`] with `2 ≤ n ≤ max_n`, `1 ≤ m ≤ max_m` and `0 ≤ p ≤ max_p`.
///
/// # Panics
/// Panics if `max_n < 2` or `max_m < 1`, as no member exists then.
pub fn random_parameters(max_n: usize, max_m: usize, max_p: usize) -> Parameters {
    assert!(max_n >= 2, "members need at least two leading a");
    assert!(max_m >= 1, "members need at least one b");
    Parameters::new(
        fastrand::usize(2..=max_n),
        fastrand::usize(1..=max_m),
        fastrand::usize(0..=max_p),
    )
}

/// Generates a random word of the language, see [`random_parameters`] for the bounds.
pub fn random_member(max_n: usize, max_m: usize, max_p: usize) -> String {
    let parameters = random_parameters(max_n, max_m, max_p);
    trace!("drew member with {}", parameters.show());
    parameters.word()
}

/// Generates a word of length `len` with symbols drawn uniformly from the input alphabet.
pub fn random_word(len: usize) -> String {
    (0..len)
        .map(|_| Symbol::ALL[fastrand::usize(..Symbol::ALL.len())].as_char())
        .collect()
}

/// Generates a random member and replaces one of its symbols by a random symbol. The
/// result is mostly, but not always, outside of the language.
pub fn random_near_miss(max_n: usize, max_m: usize, max_p: usize) -> String {
    let mut symbols: Vec<char> = random_member(max_n, max_m, max_p).chars().collect();
    let position = fastrand::usize(..symbols.len());
    symbols[position] = Symbol::ALL[fastrand::usize(..Symbol::ALL.len())].as_char();
    symbols.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::{random_member, random_near_miss, random_word};
    use crate::language;
    use crate::prelude::*;

    #[test_log::test]
    fn random_members_are_accepted() {
        for _ in 0..500 {
            let word = random_member(6, 6, 6);
            assert!(language::contains(&word));
            assert_eq!(Pda::recognize(&word), Ok(RunOutcome::Accepted), "{word}");
        }
    }

    #[test]
    fn random_words_agree_with_decomposition() {
        for i in 0..2000 {
            let word = if i % 2 == 0 {
                random_word(fastrand::usize(0..16))
            } else {
                random_near_miss(5, 5, 3)
            };
            let outcome = Pda::recognize(&word).unwrap();
            assert_eq!(outcome.is_accepted(), language::contains(&word), "{word}");
        }
    }
}

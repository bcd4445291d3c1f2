use crate::prelude::*;

/// The exponents of a word `aⁿ bᵐ x yᵖ cᵐ aⁿ`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Parameters {
    /// Length of the leading and of the trailing `a` block.
    pub n: usize,
    /// Length of the `b` and of the `c` block.
    pub m: usize,
    /// Length of the `y` block.
    pub p: usize,
}

impl Parameters {
    /// Creates new parameters, which need not be valid.
    pub fn new(n: usize, m: usize, p: usize) -> Self {
        Self { n, m, p }
    }

    /// Returns true if `n ≥ 2` and `m ≥ 1`, i.e. [`Parameters::word`] is in the language.
    pub fn is_valid(&self) -> bool {
        self.n >= 2 && self.m >= 1
    }

    /// Builds the word `aⁿ bᵐ x yᵖ cᵐ aⁿ`.
    ///
    /// # Example
    /// ```
    /// use pushdown::language::Parameters;
    /// assert_eq!(Parameters::new(2, 2, 2).word(), "aabbxyyccaa");
    /// ```
    pub fn word(&self) -> String {
        let mut word = String::with_capacity(2 * self.n + 2 * self.m + self.p + 1);
        word.extend(std::iter::repeat('a').take(self.n));
        word.extend(std::iter::repeat('b').take(self.m));
        word.push('x');
        word.extend(std::iter::repeat('y').take(self.p));
        word.extend(std::iter::repeat('c').take(self.m));
        word.extend(std::iter::repeat('a').take(self.n));
        word
    }
}

impl Show for Parameters {
    fn show(&self) -> String {
        format!("n={}, m={}, p={}", self.n, self.m, self.p)
    }
}

/// Decides membership by splitting `text` into its blocks directly, without running the
/// automaton. Returns the exponents if `text` (after trimming) is in the language.
pub fn decompose(text: &str) -> Option<Parameters> {
    let mut rest = text.trim();
    let mut block = |c: char| {
        let len = rest.len() - rest.trim_start_matches(c).len();
        rest = &rest[len..];
        len
    };

    let n = block('a');
    let m = block('b');
    if block('x') != 1 {
        return None;
    }
    let p = block('y');
    let m_closing = block('c');
    let n_closing = block('a');

    let parameters = Parameters { n, m, p };
    (rest.is_empty() && m == m_closing && n == n_closing && parameters.is_valid())
        .then_some(parameters)
}

/// Returns true if `text` is in the language.
pub fn contains(text: &str) -> bool {
    decompose(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::{contains, decompose, Parameters};

    #[test]
    fn decompose_members() {
        assert_eq!(decompose("aabxcaa"), Some(Parameters::new(2, 1, 0)));
        assert_eq!(decompose("aabbxyyccaa"), Some(Parameters::new(2, 2, 2)));
        assert_eq!(decompose(&Parameters::new(4, 3, 5).word()), Some(Parameters::new(4, 3, 5)));
    }

    #[test]
    fn decompose_non_members() {
        for word in [
            "", "abxcaa", "aabxca", "aaxcaa", "aabxxcaa", "aabxcaab", "aabxycyaa", "aabbxcaa",
            "aabxyzcaa",
        ] {
            assert!(!contains(word), "{word} is not a member");
        }
        assert!(!Parameters::new(1, 1, 0).is_valid());
        assert!(!Parameters::new(2, 0, 0).is_valid());
    }
}

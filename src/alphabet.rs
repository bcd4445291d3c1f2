use std::fmt::Display;

use itertools::Itertools;
use thiserror::Error;
use tracing::trace;

use crate::prelude::*;

/// A symbol of the fixed input alphabet `{a, b, x, y, c}`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Symbol {
    /// Leading and trailing block symbol.
    A,
    /// Symbol whose occurrences are matched by `c`.
    B,
    /// Separator between the `b` block and the `y` block.
    X,
    /// Filler symbol, arbitrary many may occur after `x`.
    Y,
    /// Symbol that pops one `B` mark.
    C,
}

impl Symbol {
    /// All symbols of the alphabet in a fixed order.
    pub const ALL: [Symbol; 5] = [Symbol::A, Symbol::B, Symbol::X, Symbol::Y, Symbol::C];

    /// Returns the character that represents `self` in an input string.
    pub fn as_char(&self) -> char {
        match self {
            Symbol::A => 'a',
            Symbol::B => 'b',
            Symbol::X => 'x',
            Symbol::Y => 'y',
            Symbol::C => 'c',
        }
    }

    /// Attempts to convert a character into a [`Symbol`].
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a' => Some(Symbol::A),
            'b' => Some(Symbol::B),
            'x' => Some(Symbol::X),
            'y' => Some(Symbol::Y),
            'c' => Some(Symbol::C),
            _ => None,
        }
    }
}

impl TryFrom<char> for Symbol {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Symbol::from_char(value).ok_or(value)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Show for Symbol {
    fn show(&self) -> String {
        self.as_char().to_string()
    }

    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
        I::IntoIter: DoubleEndedIterator,
    {
        format!("\"{}\"", iter.into_iter().map(|sym| sym.as_char()).join(""))
    }
}

/// Errors that can occur when an input string is handed to the automaton.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ValidationError {
    /// The input contains a character outside of `{a, b, x, y, c}`.
    #[error("invalid symbol `{symbol}` at position {position}, only a, b, x, y and c are allowed")]
    InvalidSymbol {
        /// The offending character.
        symbol: char,
        /// Character index of the offending character in the trimmed input.
        position: usize,
    },
}

/// A finite word over the input alphabet. Can only be obtained through parsing, so every
/// [`InputWord`] is known to consist of valid symbols.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct InputWord(Vec<Symbol>);

impl InputWord {
    /// Trims surrounding whitespace from `text` and parses the remainder symbol by symbol.
    ///
    /// # Example
    /// ```
    /// use pushdown::prelude::*;
    /// let word = InputWord::parse("  aabxcaa\n").unwrap();
    /// assert_eq!(word.len(), 7);
    /// assert_eq!(
    ///     InputWord::parse("abz"),
    ///     Err(ValidationError::InvalidSymbol { symbol: 'z', position: 2 })
    /// );
    /// ```
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let trimmed = text.trim();
        trace!("parsing input word \"{trimmed}\"");
        trimmed
            .chars()
            .enumerate()
            .map(|(position, c)| {
                Symbol::from_char(c)
                    .ok_or(ValidationError::InvalidSymbol { symbol: c, position })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(InputWord)
    }

    /// Returns the symbol at `position`, or `None` if `position` is past the end.
    pub fn nth(&self, position: usize) -> Option<Symbol> {
        self.0.get(position).copied()
    }

    /// Number of symbols in the word.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the word contains no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The symbols of the word as a slice.
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// The suffix of the word starting at `position` as a string, empty if `position` is
    /// at or past the end.
    pub fn suffix_string(&self, position: usize) -> String {
        self.0
            .get(position..)
            .unwrap_or_default()
            .iter()
            .map(Symbol::as_char)
            .collect()
    }
}

impl FromIterator<Symbol> for InputWord {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::str::FromStr for InputWord {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputWord::parse(s)
    }
}

impl Display for InputWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix_string(0))
    }
}

impl Show for InputWord {
    fn show(&self) -> String {
        Symbol::show_collection(self.0.iter())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn symbol_char_conversion() {
        for sym in Symbol::ALL {
            assert_eq!(Symbol::try_from(sym.as_char()), Ok(sym));
        }
        assert_eq!(Symbol::try_from('z'), Err('z'));
        assert_eq!(Symbol::from_char('A'), None);
    }

    #[test]
    fn parse_trims_whitespace() {
        let word = InputWord::parse("\t aabbxyyccaa  ").unwrap();
        assert_eq!(word.to_string(), "aabbxyyccaa");
        assert_eq!(word.nth(4), Some(Symbol::X));
        assert_eq!(word.nth(11), None);
    }

    #[test]
    fn parse_rejects_foreign_characters() {
        assert_eq!(
            InputWord::parse("aabxyzcaa"),
            Err(ValidationError::InvalidSymbol {
                symbol: 'z',
                position: 5
            })
        );
        // inner whitespace is not trimmed away
        assert!(matches!(
            InputWord::parse("aa bxcaa"),
            Err(ValidationError::InvalidSymbol { symbol: ' ', .. })
        ));
        assert!(InputWord::parse("").unwrap().is_empty());
    }

    #[test]
    fn suffixes() {
        let word: InputWord = "abxc".parse().unwrap();
        assert_eq!(word.suffix_string(1), "bxc");
        assert_eq!(word.suffix_string(4), "");
        assert_eq!(word.suffix_string(9), "");
        assert_eq!(word.show(), "\"abxc\"");
    }
}

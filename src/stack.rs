use std::fmt::Display;

use itertools::Itertools;

use crate::prelude::*;

/// Symbols that can be stored on the stack of the automaton.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum StackSymbol {
    /// The bottom-of-stack sentinel, it is never popped.
    Z0,
    /// Marks one leading `a` that still has to be matched by a trailing `a`.
    A,
    /// Marks one `b` that still has to be matched by a `c`.
    B,
}

impl Display for StackSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StackSymbol::Z0 => write!(f, "Z0"),
            StackSymbol::A => write!(f, "A"),
            StackSymbol::B => write!(f, "B"),
        }
    }
}

impl Show for StackSymbol {
    fn show(&self) -> String {
        self.to_string()
    }

    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
        I::IntoIter: DoubleEndedIterator,
    {
        format!("[{}]", iter.into_iter().join(", "))
    }
}

/// The stack of the automaton. Its bottom element is always [`StackSymbol::Z0`], which
/// can neither be pushed a second time nor popped, so the stack is never empty.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Stack(Vec<StackSymbol>);

impl Stack {
    /// Creates a stack that only holds the sentinel.
    pub fn new() -> Self {
        Self(vec![StackSymbol::Z0])
    }

    /// Pushes a mark onto the stack.
    ///
    /// # Panics
    /// Pushing the sentinel is a logic error and panics.
    pub fn push(&mut self, symbol: StackSymbol) {
        assert_ne!(symbol, StackSymbol::Z0, "the sentinel is only at the bottom");
        self.0.push(symbol);
    }

    /// Removes and returns the topmost mark. Returns `None` and leaves the stack
    /// untouched if only the sentinel is left.
    pub fn pop(&mut self) -> Option<StackSymbol> {
        if self.is_base() {
            return None;
        }
        self.0.pop()
    }

    /// The topmost symbol, which is [`StackSymbol::Z0`] for a drained stack.
    pub fn top(&self) -> StackSymbol {
        *self.0.last().unwrap_or(&StackSymbol::Z0)
    }

    /// Returns true if the stack holds exactly the sentinel.
    pub fn is_base(&self) -> bool {
        self.0.len() == 1
    }

    /// Number of symbols on the stack, including the sentinel.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false, the sentinel is never removed. Exists for symmetry with [`Stack::len`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The contents from bottom to top.
    pub fn as_slice(&self) -> &[StackSymbol] {
        &self.0
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Show for Stack {
    fn show(&self) -> String {
        StackSymbol::show_collection(self.0.iter())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn sentinel_is_never_popped() {
        let mut stack = Stack::new();
        assert!(stack.is_base());
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.as_slice(), &[StackSymbol::Z0]);

        stack.push(StackSymbol::A);
        stack.push(StackSymbol::B);
        assert_eq!(stack.top(), StackSymbol::B);
        assert_eq!(stack.show(), "[Z0, A, B]");
        assert_eq!(stack.pop(), Some(StackSymbol::B));
        assert_eq!(stack.pop(), Some(StackSymbol::A));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.top(), StackSymbol::Z0);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    #[should_panic]
    fn pushing_sentinel_panics() {
        Stack::new().push(StackSymbol::Z0);
    }
}

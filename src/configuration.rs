use crate::prelude::*;

/// Identifies one of the four counters of a [`Configuration`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Counter {
    /// Number of leading `a`s read.
    InitialA,
    /// Number of `b`s read.
    B,
    /// Number of `c`s read.
    C,
    /// Number of trailing `a`s read.
    FinalA,
}

/// Auxiliary counters that are used to adjudicate the numeric side conditions `n ≥ 2`, `m ≥ 1`,
/// `#b = #c` and `#initial a = #final a`. Each counter only ever grows during a run.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Counters {
    /// Number of leading `a`s, this is `n`.
    pub initial_a: usize,
    /// Number of `b`s, this is `m`.
    pub b: usize,
    /// Number of `c`s that were matched against a `B` mark.
    pub c: usize,
    /// Number of trailing `a`s that were matched against an `A` mark.
    pub final_a: usize,
}

impl Counters {
    /// Increments the given counter by one.
    pub fn increment(&mut self, counter: Counter) {
        match counter {
            Counter::InitialA => self.initial_a += 1,
            Counter::B => self.b += 1,
            Counter::C => self.c += 1,
            Counter::FinalA => self.final_a += 1,
        }
    }

    /// Returns the value of the given counter.
    pub fn get(&self, counter: Counter) -> usize {
        match counter {
            Counter::InitialA => self.initial_a,
            Counter::B => self.b,
            Counter::C => self.c,
            Counter::FinalA => self.final_a,
        }
    }
}

impl Show for Counters {
    fn show(&self) -> String {
        format!(
            "initial a: {}, b: {}, c: {}, final a: {}",
            self.initial_a, self.b, self.c, self.final_a
        )
    }
}

/// The instantaneous description of the automaton: current state, position of the cursor
/// in the input, the stack and the counters.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct Configuration {
    state: State,
    cursor: usize,
    stack: Stack,
    counters: Counters,
}

impl Configuration {
    /// The initial configuration: state `q0`, cursor at 0, stack `[Z0]` and all counters zero.
    pub fn initial() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Index of the next input symbol to be read.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The stack.
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// The counters.
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Applies the effects of `rule`. The guards of `rule` must have been checked against
    /// `self` beforehand, see [`crate::transition::lookup`].
    pub(crate) fn apply(&mut self, rule: &Rule) {
        match rule.stack_op() {
            StackOp::Keep => {}
            StackOp::Push(symbol) => self.stack.push(symbol),
            StackOp::Pop => {
                let popped = self.stack.pop();
                debug_assert!(popped.is_some(), "guard must prevent popping the sentinel");
            }
        }
        if let Some(counter) = rule.counter() {
            self.counters.increment(counter);
        }
        if rule.consumes() {
            self.cursor += 1;
        }
        self.state = rule.target();
    }

    /// Captures `self` as a [`TraceEntry`], `input` is needed to determine the remaining input.
    pub fn snapshot(&self, input: &InputWord) -> TraceEntry {
        TraceEntry::new(
            self.state,
            input.suffix_string(self.cursor),
            self.stack.as_slice().to_vec(),
        )
    }
}

impl Show for Configuration {
    fn show(&self) -> String {
        format!(
            "{} at {} with {} ({})",
            self.state.show(),
            self.cursor,
            self.stack.show(),
            self.counters.show()
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn counters_increment() {
        let mut counters = Counters::default();
        counters.increment(Counter::B);
        counters.increment(Counter::B);
        counters.increment(Counter::FinalA);
        assert_eq!(counters.get(Counter::B), 2);
        assert_eq!(counters.get(Counter::FinalA), 1);
        assert_eq!(counters.get(Counter::InitialA), 0);
        assert_eq!(counters.c, 0);
    }

    #[test]
    fn initial_configuration_snapshot() {
        let config = Configuration::initial();
        let input = InputWord::parse("aabxcaa").unwrap();
        let entry = config.snapshot(&input);
        assert_eq!(entry.state(), State::Q0);
        assert_eq!(entry.remaining(), "aabxcaa");
        assert_eq!(entry.stack(), &[StackSymbol::Z0]);
    }
}

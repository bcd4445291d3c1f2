use std::fmt::Display;

use itertools::Itertools;

use crate::prelude::*;

/// Immutable snapshot of a configuration, taken after every committed transition.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct TraceEntry {
    state: State,
    remaining: String,
    stack: Vec<StackSymbol>,
}

impl TraceEntry {
    /// Creates a new entry.
    pub fn new(state: State, remaining: String, stack: Vec<StackSymbol>) -> Self {
        Self {
            state,
            remaining,
            stack,
        }
    }

    /// The state of the captured configuration.
    pub fn state(&self) -> State {
        self.state
    }

    /// The input that had not been read yet.
    pub fn remaining(&self) -> &str {
        &self.remaining
    }

    /// Stack contents from bottom to top.
    pub fn stack(&self) -> &[StackSymbol] {
        &self.stack
    }
}

impl Show for TraceEntry {
    fn show(&self) -> String {
        format!(
            "({}, \"{}\", {})",
            self.state,
            self.remaining,
            StackSymbol::show_collection(self.stack.iter())
        )
    }
}

impl Display for TraceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}

/// The append-only history of all configurations that a run went through. The first
/// entry is the initial configuration.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct Trace(Vec<TraceEntry>);

impl Trace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: TraceEntry) {
        self.0.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&TraceEntry> {
        self.0.last()
    }

    /// Iterates over the entries in the order they were recorded.
    pub fn iter(&self) -> std::slice::Iter<'_, TraceEntry> {
        self.0.iter()
    }

    /// All entries as a slice.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.0
    }

    /// The sequence of visited states.
    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        self.0.iter().map(TraceEntry::state)
    }

    /// Renders the trace as a table with columns for the step number, the state, the
    /// remaining input and the stack.
    pub fn to_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(["#", "State", "Remaining", "Stack"]);
        for (i, entry) in self.0.iter().enumerate() {
            builder.push_record([
                i.to_string(),
                entry.state.show(),
                format!("\"{}\"", entry.remaining),
                StackSymbol::show_collection(entry.stack.iter()),
            ]);
        }
        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl std::ops::Index<usize> for Trace {
    type Output = TraceEntry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Show for Trace {
    fn show(&self) -> String {
        self.0.iter().map(Show::show).join("\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn entry_format() {
        let entry = TraceEntry::new(
            State::Q1,
            "bxcaa".to_string(),
            vec![StackSymbol::Z0, StackSymbol::A],
        );
        assert_eq!(entry.show(), "(q1, \"bxcaa\", [Z0, A])");
        assert_eq!(entry.to_string(), entry.show());
    }

    #[test]
    fn table_has_row_per_entry() {
        let mut trace = Trace::new();
        let input = InputWord::parse("ab").unwrap();
        trace.push(Configuration::initial().snapshot(&input));
        trace.push(Configuration::initial().snapshot(&input));
        assert_eq!(trace.len(), 2);
        let table = trace.to_table();
        assert_eq!(table.matches("\"ab\"").count(), 2);
        assert!(table.contains("Remaining"));
        assert_eq!(trace.states().collect::<Vec<_>>(), vec![State::Q0, State::Q0]);
    }
}

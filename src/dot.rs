use itertools::Itertools;

use crate::{automaton::State, Dfa};

fn escape_label(symbol: char) -> String {
    match symbol {
        '"' => "\\\"".to_string(),
        '\\' => "\\\\".to_string(),
        c => c.to_string(),
    }
}

fn dot_state_ident(state: State) -> String {
    format!("q{state}")
}

impl Dfa {
    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    ///
    /// Accepting states are drawn as double circles and an invisible node points to the
    /// initial state. Undefined transitions are left out, so the error state only shows up
    /// as missing edges.
    pub fn dot_representation(&self) -> String {
        let header = [
            "digraph A {".to_string(),
            "rankdir=LR".to_string(),
            "init [label=\"\", shape=none, width=0]".to_string(),
        ];

        let states = self.states().map(|q| {
            format!(
                "{} [label=\"{}\", shape={}]",
                dot_state_ident(q),
                q,
                if self.is_accepting(q) {
                    "doublecircle"
                } else {
                    "circle"
                }
            )
        });

        let initial = self
            .contains(self.start())
            .then(|| format!("init -> {}", dot_state_ident(self.start())));

        // parallel transitions are merged into a single edge
        let transitions = self
            .transitions()
            .map(|(p, a, q)| ((p, q), a))
            .into_group_map()
            .into_iter()
            .sorted()
            .map(|((p, q), symbols)| {
                format!(
                    "{} -> {} [label=\"{}\"]",
                    dot_state_ident(p),
                    dot_state_ident(q),
                    symbols.into_iter().map(escape_label).join(", ")
                )
            });

        header
            .into_iter()
            .chain(states)
            .chain(initial)
            .chain(transitions)
            .chain(std::iter::once("}".to_string()))
            .join("\n")
    }
}

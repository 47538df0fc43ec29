use bit_set::BitSet;
use tracing::{trace, warn};

use crate::automaton::{Dfa, State};

/// The states of a [`Dfa`] that can be reached from its initial state, in the order in which
/// a breadth-first exploration discovers them. Alongside each state we keep its access word,
/// i.e. the word on which the state was discovered. Since the exploration is breadth-first
/// and symbols are tried in ascending order, this is the length-lexicographically minimal
/// word leading to the state.
///
/// The error state is never part of the list, but [`ReachableStates::reaches_sink`] records
/// whether some reachable state has an undefined transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReachableStates {
    states: Vec<State>,
    access: Vec<Vec<char>>,
    reaches_sink: bool,
}

impl ReachableStates {
    /// The reachable states in discovery order, the initial state comes first.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// The number of reachable states, not counting the error state.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if not even the initial state is reachable, which only happens if it
    /// is missing from the automaton.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns true if `state` is reachable. The error state is reported as reachable if
    /// some reachable state has an undefined transition.
    pub fn contains(&self, state: State) -> bool {
        if state.is_sink() {
            self.reaches_sink
        } else {
            self.states.contains(&state)
        }
    }

    /// Returns true if the error state can be reached.
    pub fn reaches_sink(&self) -> bool {
        self.reaches_sink
    }

    /// Returns the word on which `state` was discovered.
    pub fn access_word(&self, state: State) -> Option<&[char]> {
        self.states
            .iter()
            .position(|q| *q == state)
            .map(|pos| self.access[pos].as_slice())
    }

    /// Iterates over the reachable states together with their access words.
    pub fn iter(&self) -> impl Iterator<Item = (State, &[char])> + '_ {
        self.states
            .iter()
            .copied()
            .zip(self.access.iter().map(|w| w.as_slice()))
    }
}

/// Computes the states of `dfa` that are reachable from its initial state.
///
/// Starting with the initial state, every discovered state is expanded on every symbol of
/// the alphabet and targets that have not been seen before are appended. Expanding the list
/// front to back until its end is reached is the same fixed point as repeatedly scanning the
/// whole list until a pass adds nothing, and it yields the same first-discovered order.
pub fn reachable_states(dfa: &Dfa) -> ReachableStates {
    let mut out = ReachableStates::default();
    let start = dfa.start();
    if !dfa.contains(start) {
        warn!("initial state {start} is not part of the automaton, nothing is reachable");
        return out;
    }

    let mut seen = BitSet::with_capacity(dfa.limits().max_states);
    seen.insert(start.index());
    out.states.push(start);
    out.access.push(vec![]);

    let mut next = 0;
    while next < out.states.len() {
        let q = out.states[next];
        for a in dfa.alphabet().universe() {
            let p = dfa.transition(q, a);
            if p.is_sink() {
                out.reaches_sink = true;
                continue;
            }
            if seen.insert(p.index()) {
                let mut word = out.access[next].clone();
                word.push(a);
                trace!("discovered state {p} on {:?}", word);
                out.states.push(p);
                out.access.push(word);
            }
        }
        next += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::reachable_states;
    use crate::prelude::*;

    #[test]
    fn discovery_order_and_access_words() {
        let dfa = Dfa::builder()
            .with_edges([
                (1, 'b', 3),
                (1, 'a', 2),
                (2, 'a', 4),
                (3, 'a', 3),
                (4, 'b', 1),
                (5, 'a', 1),
            ])
            .with_accepting([4])
            .build()
            .unwrap();

        let reachable = reachable_states(&dfa);
        assert_eq!(
            reachable.states(),
            &[State::new(1), State::new(2), State::new(3), State::new(4)]
        );
        assert!(!reachable.contains(State::new(5)));
        assert!(reachable.reaches_sink());
        assert!(reachable.contains(State::SINK));
        assert_eq!(reachable.access_word(State::new(4)), Some(&['a', 'a'][..]));
        assert_eq!(reachable.access_word(State::new(5)), None);

        for (q, word) in reachable.iter() {
            assert_eq!(dfa.run(word.iter().copied()), q);
        }
    }

    #[test]
    fn lonely_start_state() {
        let dfa = Dfa::builder()
            .with_state(State::START, true)
            .build()
            .unwrap();
        let reachable = reachable_states(&dfa);
        assert_eq!(reachable.states(), &[State::START]);
        assert!(!reachable.reaches_sink());
    }

    #[test_log::test]
    fn missing_start_state() {
        let dfa = Dfa::builder().with_edges([(2, 'a', 3)]).build().unwrap();
        let reachable = reachable_states(&dfa);
        assert!(reachable.is_empty());
        assert!(!reachable.reaches_sink());
    }

    #[test]
    fn complete_automaton_never_reaches_sink() {
        let dfa = Dfa::builder()
            .with_edges([(1, 'a', 2), (1, 'b', 1), (2, 'a', 1), (2, 'b', 2)])
            .build()
            .unwrap();
        let reachable = reachable_states(&dfa);
        assert_eq!(reachable.len(), 2);
        assert!(!reachable.reaches_sink());
    }
}

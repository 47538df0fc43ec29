use bit_set::BitSet;
use thiserror::Error;
use tracing::trace;

use crate::{alphabet::CharAlphabet, math::Map};

use super::{Dfa, Limits, State};

/// Errors that can occur when a [`DfaBuilder`] turns its collected parts into a [`Dfa`].
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ModelError {
    /// Some state id is not admitted by the configured [`Limits`].
    #[error("state {state} is out of range, state ids must be smaller than {max_states}")]
    StateOutOfRange {
        /// The offending state.
        state: State,
        /// The configured bound.
        max_states: usize,
    },
    /// The error state was declared to be accepting.
    #[error("the error state {0} can not be accepting")]
    AcceptingSink(State),
    /// A transition leaving the error state was given, but the error state is absorbing.
    #[error("the error state has no outgoing transitions, but one on `{0}` was given")]
    TransitionFromSink(char),
}

/// Helper struct for the construction of a [`Dfa`]. It collects states with their acceptance
/// status and transitions, and only checks them against the configured [`Limits`] once
/// [`DfaBuilder::build`] is called.
///
/// Transition targets are given as `Option<State>`, where `None` means that the transition
/// is undefined. Undefined transitions and transitions into [`State::SINK`] are both resolved
/// to the sink convention: the symbol becomes part of the alphabet, but no transition is
/// stored.
///
/// # Example
/// ```
/// use dfamin::prelude::*;
///
/// let dfa = DfaBuilder::new(Limits::new(8))
///     .with_state(State::new(1), false)
///     .with_transition(State::new(1), 'a', Some(State::new(3)))
///     .with_transition(State::new(1), 'b', None)
///     .with_state(State::new(3), true)
///     .build()
///     .unwrap();
/// assert_eq!(dfa.alphabet().size(), 2);
/// assert_eq!(dfa.transition(State::new(1), 'b'), State::SINK);
/// ```
#[derive(Debug, Clone)]
pub struct DfaBuilder {
    limits: Limits,
    symbols: Vec<char>,
    edges: Vec<(State, char, Option<State>)>,
    colors: Vec<(State, bool)>,
}

impl DfaBuilder {
    /// Creates an empty builder that checks states against `limits`.
    pub fn new(limits: Limits) -> Self {
        Self {
            limits,
            symbols: vec![],
            edges: vec![],
            colors: vec![],
        }
    }

    /// Forces additional symbols into the alphabet, even if no transition uses them.
    pub fn with_alphabet_symbols<I>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.symbols.extend(symbols);
        self
    }

    /// Declares `state` and whether it is accepting. A later declaration of the same state
    /// overrides an earlier one.
    pub fn with_state(mut self, state: State, accepting: bool) -> Self {
        self.add_state(state, accepting);
        self
    }

    /// Declares `state` and whether it is accepting, see [`DfaBuilder::with_state`].
    pub fn add_state(&mut self, state: State, accepting: bool) {
        self.colors.push((state, accepting));
    }

    /// Adds a transition from `source` on `symbol` to `target`, where `None` stands for an
    /// undefined transition. A later transition for the same source and symbol overrides an
    /// earlier one.
    pub fn with_transition(mut self, source: State, symbol: char, target: Option<State>) -> Self {
        self.add_transition(source, symbol, target);
        self
    }

    /// Adds a transition, see [`DfaBuilder::with_transition`].
    pub fn add_transition(&mut self, source: State, symbol: char, target: Option<State>) {
        self.edges.push((source, symbol, target));
    }

    /// Adds a list of transitions given as raw ids, where a target of `0` denotes the
    /// error state.
    pub fn with_edges<I: IntoIterator<Item = (u32, char, u32)>>(self, iter: I) -> Self {
        iter.into_iter().fold(self, |acc, (p, a, q)| {
            let target = State::new(q);
            acc.with_transition(
                State::new(p),
                a,
                if target.is_sink() { None } else { Some(target) },
            )
        })
    }

    /// Marks all given raw ids as accepting.
    pub fn with_accepting<I: IntoIterator<Item = u32>>(self, iter: I) -> Self {
        iter.into_iter()
            .fold(self, |acc, q| acc.with_state(State::new(q), true))
    }

    fn check(&self, state: State) -> Result<(), ModelError> {
        if self.limits.admits(state) {
            Ok(())
        } else {
            Err(ModelError::StateOutOfRange {
                state,
                max_states: self.limits.max_states,
            })
        }
    }

    /// Consumes the builder and produces a [`Dfa`]. Every referenced state becomes part of
    /// the state set, except for [`State::SINK`] which stays implicit.
    pub fn build(self) -> Result<Dfa, ModelError> {
        let mut alphabet = CharAlphabet::from_iter(self.symbols.iter().copied());
        let mut states = BitSet::with_capacity(self.limits.max_states);
        let mut accepting = BitSet::with_capacity(self.limits.max_states);
        let mut delta = Map::default();

        for &(state, is_accepting) in &self.colors {
            self.check(state)?;
            if state.is_sink() {
                if is_accepting {
                    return Err(ModelError::AcceptingSink(state));
                }
                continue;
            }
            states.insert(state.index());
            if is_accepting {
                accepting.insert(state.index());
            } else {
                accepting.remove(state.index());
            }
        }

        for &(source, symbol, target) in &self.edges {
            self.check(source)?;
            alphabet.insert(symbol);
            if source.is_sink() {
                if target.is_some_and(|q| !q.is_sink()) {
                    return Err(ModelError::TransitionFromSink(symbol));
                }
                continue;
            }
            states.insert(source.index());

            match target {
                Some(q) if !q.is_sink() => {
                    self.check(q)?;
                    states.insert(q.index());
                    delta.insert((source, symbol), q);
                }
                _ => {
                    delta.remove(&(source, symbol));
                }
            }
        }

        trace!(
            "built automaton with {} states over {:?}",
            states.len(),
            alphabet
        );
        Ok(Dfa::from_parts(
            alphabet,
            states,
            accepting,
            delta,
            self.limits,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{DfaBuilder, ModelError};
    use crate::automaton::{Limits, State};

    #[test]
    fn out_of_range_states_are_rejected() {
        let err = DfaBuilder::new(Limits::new(3))
            .with_edges([(1, 'a', 3)])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::StateOutOfRange {
                state: State::new(3),
                max_states: 3
            }
        );

        let err = DfaBuilder::new(Limits::new(3))
            .with_accepting([5])
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::StateOutOfRange { .. }));
    }

    #[test]
    fn sink_is_protected() {
        assert_eq!(
            DfaBuilder::new(Limits::default())
                .with_accepting([0])
                .build()
                .unwrap_err(),
            ModelError::AcceptingSink(State::SINK)
        );
        assert_eq!(
            DfaBuilder::new(Limits::default())
                .with_edges([(0, 'a', 1)])
                .build()
                .unwrap_err(),
            ModelError::TransitionFromSink('a')
        );
    }

    #[test]
    fn undefined_transitions_still_extend_the_alphabet() {
        let dfa = DfaBuilder::new(Limits::default())
            .with_transition(State::START, 'x', None)
            .with_transition(State::START, 'y', Some(State::SINK))
            .with_alphabet_symbols(['z'])
            .build()
            .unwrap();
        assert_eq!(dfa.alphabet().universe().collect::<Vec<_>>(), vec!['x', 'y', 'z']);
        assert_eq!(dfa.transitions().count(), 0);
        assert!(dfa.contains(State::START));
    }

    #[test]
    fn later_declarations_override() {
        let dfa = DfaBuilder::new(Limits::default())
            .with_state(State::new(2), true)
            .with_state(State::new(2), false)
            .with_edges([(1, 'a', 2), (1, 'a', 3)])
            .build()
            .unwrap();
        assert!(!dfa.is_accepting(State::new(2)));
        assert_eq!(dfa.transition(State::START, 'a'), State::new(3));
        assert_eq!(dfa.size(), 3);
    }
}

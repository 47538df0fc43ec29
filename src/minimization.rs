//! Minimization of deterministic finite automata.
//!
//! The pipeline consists of three stages, each of which only consumes the output of the
//! previous one:
//! 1. [`reachable_states`] collects the states reachable from the initial state,
//! 2. [`moore_partition_refinement`] groups them into classes of equivalent states,
//! 3. [`quotient`] collapses every class into a single state.
//!
//! [`minimize`] runs all three and keeps the intermediate results around, which is what the
//! report in [`crate::output`] is rendered from.

pub(crate) mod distinguishability;
mod partition_refinement;
mod quotient;
mod reachable;

pub use partition_refinement::moore_partition_refinement;
pub use quotient::{quotient, Quotient};
pub use reachable::{reachable_states, ReachableStates};

use tracing::debug;

use crate::{
    automaton::{Dfa, State},
    math::Partition,
};

/// The result of minimizing a [`Dfa`], together with the intermediate results of every stage.
#[derive(Debug, Clone)]
pub struct Minimization {
    reachable: ReachableStates,
    partition: Partition<State>,
    quotient: Quotient,
}

impl Minimization {
    /// The states that are reachable in the input automaton.
    pub fn reachable(&self) -> &ReachableStates {
        &self.reachable
    }

    /// The classes of equivalent states. If the error state is reachable, it belongs to
    /// the class reported by [`Minimization::error_class`].
    pub fn partition(&self) -> &Partition<State> {
        &self.partition
    }

    /// The quotient that was built from the partition.
    pub fn quotient(&self) -> &Quotient {
        &self.quotient
    }

    /// The minimized automaton.
    pub fn dfa(&self) -> &Dfa {
        self.quotient.dfa()
    }

    /// Consumes `self` and returns the minimized automaton.
    pub fn into_dfa(self) -> Dfa {
        self.quotient.into_dfa()
    }

    /// The index of the class that contains the error state, if any.
    pub fn error_class(&self) -> Option<usize> {
        self.quotient.error_class()
    }

    /// Lists all pairs `(p, q)` of distinct reachable states that are equivalent, where `p`
    /// was discovered before `q`.
    pub fn equivalent_pairs(&self) -> Vec<(State, State)> {
        let states = self.reachable.states();
        let class: Vec<_> = states
            .iter()
            .map(|q| self.partition.class_of(q))
            .collect();
        let mut pairs = vec![];
        for i in 0..states.len() {
            for j in (i + 1)..states.len() {
                if class[i] == class[j] {
                    pairs.push((states[i], states[j]));
                }
            }
        }
        pairs
    }
}

/// Computes the minimal automaton accepting the same language as `dfa`.
pub fn minimize(dfa: &Dfa) -> Minimization {
    let reachable = reachable_states(dfa);
    debug!(
        "{} of {} states are reachable, error state is {}reachable",
        reachable.len(),
        dfa.size(),
        if reachable.reaches_sink() { "" } else { "not " }
    );
    let partition = moore_partition_refinement(dfa, &reachable);
    let quotient = quotient(dfa, &partition);

    Minimization {
        reachable,
        partition,
        quotient,
    }
}

impl Dfa {
    /// Returns the unique minimal [`Dfa`] that accepts the same language as `self`, with the
    /// state of the initial class being [`State::START`].
    ///
    /// # Example
    /// ```
    /// use dfamin::prelude::*;
    ///
    /// let dfa = Dfa::builder()
    ///     .with_edges([(1, 'a', 3), (1, 'b', 2), (2, 'a', 3), (2, 'b', 1)])
    ///     .with_edges([(3, 'a', 3), (3, 'b', 3)])
    ///     .with_accepting([3])
    ///     .build()
    ///     .unwrap();
    /// let min = dfa.minimize();
    /// assert_eq!(min.size(), 2);
    /// assert!(min.accepts("bba".chars()));
    /// assert!(!min.accepts("bb".chars()));
    /// ```
    pub fn minimize(&self) -> Dfa {
        minimize(self).into_dfa()
    }
}

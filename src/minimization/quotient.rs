use bit_set::BitSet;
use tracing::debug;

use crate::{
    automaton::{Dfa, State},
    math::{Map, Partition},
};

/// The automaton that results from collapsing each class of a [`Partition`] into a single
/// state. Besides the new [`Dfa`], it remembers which state every class became.
///
/// The class containing the error state (if any) is not turned into a state of its own.
/// Transitions into it are left undefined, so in the quotient they lead to the implicit
/// error state again. The only exception is when the error class also contains the initial
/// state, i.e. when no accepting state is reachable at all. Then the class is kept as the
/// initial state and all of its transitions loop back to it.
#[derive(Debug, Clone)]
pub struct Quotient {
    dfa: Dfa,
    state_of_class: Vec<Option<State>>,
    error_class: Option<usize>,
}

impl Quotient {
    /// Gives a reference to the collapsed automaton.
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// Consumes `self` and returns the collapsed automaton.
    pub fn into_dfa(self) -> Dfa {
        self.dfa
    }

    /// Returns the state that the class with index `class` became, or `None` if the class
    /// was the elided error class (or does not exist).
    pub fn state_of_class(&self, class: usize) -> Option<State> {
        self.state_of_class.get(class).copied().flatten()
    }

    /// The index of the class containing the error state, if the error state is reachable.
    pub fn error_class(&self) -> Option<usize> {
        self.error_class
    }

    /// Returns true if the error class was dropped from the states of the quotient.
    pub fn elides_error_class(&self) -> bool {
        self.error_class
            .is_some_and(|class| self.state_of_class(class).is_none())
    }
}

/// Builds the quotient of `dfa` with respect to `partition`, which is assumed to be a
/// congruence over the reachable states of `dfa` (plus the error state, if reachable). Each
/// class behaves like its representative: the new transition on `a` leads to the class of
/// the representative's `a`-successor, and the class is accepting iff its representative is.
///
/// New states are numbered `1, 2, ...` following the order of the classes and skipping the
/// elided error class, so the class of the initial state becomes [`State::START`].
pub fn quotient(dfa: &Dfa, partition: &Partition<State>) -> Quotient {
    let error_class = partition.class_of(&State::SINK);
    let start_class = partition.class_of(&dfa.start());
    let elided = error_class.filter(|class| Some(*class) != start_class);

    let mut next = State::START.id();
    let state_of_class: Vec<Option<State>> = (0..partition.size())
        .map(|class| {
            if Some(class) == elided {
                None
            } else {
                let state = State::new(next);
                next += 1;
                Some(state)
            }
        })
        .collect();

    let mut states = BitSet::with_capacity(partition.size() + 1);
    let mut accepting = BitSet::with_capacity(partition.size() + 1);
    let mut delta = Map::default();

    for class in 0..partition.size() {
        let (Some(source), Some(representative)) =
            (state_of_class[class], partition.representative(class))
        else {
            continue;
        };
        states.insert(source.index());
        if dfa.is_accepting(*representative) {
            accepting.insert(source.index());
        }

        for a in dfa.alphabet().universe() {
            let target = partition
                .class_of(&dfa.transition(*representative, a))
                .and_then(|c| state_of_class[c]);
            if let Some(target) = target {
                delta.insert((source, a), target);
            }
        }
    }

    debug!(
        "built quotient with {} states from {} classes",
        states.len(),
        partition.size()
    );

    Quotient {
        dfa: Dfa::from_parts(
            dfa.alphabet().clone(),
            states,
            accepting,
            delta,
            dfa.limits(),
        ),
        state_of_class,
        error_class,
    }
}

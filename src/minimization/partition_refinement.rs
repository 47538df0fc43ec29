use tracing::{debug, trace};

use crate::{
    automaton::{Dfa, State},
    math::{Map, Partition},
};

use super::{distinguishability::DistinguishabilityTable, reachable::ReachableStates};

/// Computes the coarsest partition of the reachable states of `dfa` into classes of
/// Myhill-Nerode equivalent states.
///
/// The participants are the reachable states in discovery order, followed by the error state
/// if it is reachable. Pairs differing in acceptance are distinguishable right away. Then
/// full passes over all remaining pairs mark `(p, q)` whenever some symbol leads them to a
/// marked pair, until a pass marks nothing new. Since marks are never removed and there are
/// finitely many pairs, this always terminates.
///
/// Classes are created in the order in which their first member occurs among the
/// participants, so the class of the initial state always comes first and the first member
/// of each class is its representative.
///
/// # Panics
/// If `reachable` was not computed by [`super::reachable_states`] for this very `dfa`, some
/// successor of a listed state may be missing from it, in which case this function panics.
pub fn moore_partition_refinement(dfa: &Dfa, reachable: &ReachableStates) -> Partition<State> {
    let participants: Vec<State> = reachable
        .states()
        .iter()
        .copied()
        .chain(reachable.reaches_sink().then_some(State::SINK))
        .collect();
    let position: Map<State, usize> = participants
        .iter()
        .enumerate()
        .map(|(i, q)| (*q, i))
        .collect();

    let successors: Vec<Vec<usize>> = participants
        .iter()
        .map(|q| {
            dfa.alphabet()
                .universe()
                .map(|a| {
                    *position
                        .get(&dfa.transition(*q, a))
                        .expect("successors of reachable states must be reachable")
                })
                .collect()
        })
        .collect();

    let n = participants.len();
    let mut table = DistinguishabilityTable::new(n);

    for i in 0..n {
        for j in (i + 1)..n {
            if dfa.is_accepting(participants[i]) != dfa.is_accepting(participants[j]) {
                table.mark(i, j);
            }
        }
    }
    trace!(
        "{} pairs are distinguished by acceptance",
        table.marked_pairs()
    );

    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;
        for i in 0..n {
            for j in (i + 1)..n {
                if table.is_marked(i, j) {
                    continue;
                }
                if successors[i]
                    .iter()
                    .zip(successors[j].iter())
                    .any(|(p, q)| table.is_marked(*p, *q))
                {
                    trace!(
                        "marking {} and {} as distinguishable in pass {passes}",
                        participants[i],
                        participants[j]
                    );
                    table.mark(i, j);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    let mut representatives: Vec<usize> = vec![];
    let mut classes: Vec<Vec<State>> = vec![];
    for (i, q) in participants.iter().enumerate() {
        match representatives
            .iter()
            .position(|rep| !table.is_marked(*rep, i))
        {
            Some(class) => classes[class].push(*q),
            None => {
                representatives.push(i);
                classes.push(vec![*q]);
            }
        }
    }

    debug!(
        "refined {} states into {} classes after {passes} passes",
        n,
        classes.len()
    );
    Partition::new(classes)
}

use std::fmt::{Display, Formatter, Result};

use itertools::Itertools;

use crate::{automaton::State, minimization::Minimization};

/// Renders a [`Minimization`] as text. In order, the report lists the alphabet, the reachable
/// states, the pairs of equivalent states, the classes, the transition function of the
/// minimized automaton and its final states.
///
/// States of the minimized automaton are written `q1, q2, ...` where `q1` is initial, and the
/// error state is written `E`.
///
/// # Example
/// ```
/// use dfamin::prelude::*;
///
/// let dfa: Dfa = "1, a, 2, 0\n2, a, 2, 1".parse().unwrap();
/// let report = Report::new(&minimize(&dfa)).to_string();
/// assert!(report.contains("d(q1, a) = q2"));
/// assert!(report.contains("final states: [ q2 ]"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    minimization: &'a Minimization,
}

impl<'a> Report<'a> {
    /// Creates a report for the given minimization.
    pub fn new(minimization: &'a Minimization) -> Self {
        Self { minimization }
    }

    fn label(state: State) -> String {
        if state.is_sink() {
            "E".to_string()
        } else {
            format!("q{state}")
        }
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let min = self.minimization;
        let dfa = min.dfa();

        writeln!(f, "alphabet: {}", dfa.alphabet())?;
        writeln!(
            f,
            "reachable: {}",
            min.reachable().states().iter().join(", ")
        )?;
        for (p, q) in min.equivalent_pairs() {
            writeln!(f, "{p} and {q} are equivalent")?;
        }

        writeln!(f, "classes:")?;
        for (class, members) in min.partition().iter().enumerate() {
            let label = min
                .quotient()
                .state_of_class(class)
                .map(Self::label)
                .unwrap_or_else(|| Self::label(State::SINK));
            writeln!(f, "  {label} = {{{}}}", members.iter().join(", "))?;
        }

        writeln!(
            f,
            "minimized automaton (initial state {}):",
            Self::label(dfa.start())
        )?;
        let mut reaches_sink = false;
        for q in dfa.states() {
            for a in dfa.alphabet().universe() {
                let target = dfa.transition(q, a);
                reaches_sink |= target.is_sink();
                writeln!(f, "d({}, {a}) = {}", Self::label(q), Self::label(target))?;
            }
        }
        if reaches_sink {
            for a in dfa.alphabet().universe() {
                writeln!(f, "d(E, {a}) = E")?;
            }
        }

        writeln!(
            f,
            "final states: [ {} ]",
            dfa.accepting_states().map(Self::label).join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Report;
    use crate::prelude::*;

    #[test]
    fn full_report() {
        let dfa = Dfa::builder()
            .with_edges([
                (1, 'a', 2),
                (1, 'b', 3),
                (2, 'a', 4),
                (3, 'a', 4),
                (4, 'a', 4),
                (5, 'a', 1),
            ])
            .with_accepting([4])
            .build()
            .unwrap();
        let min = minimize(&dfa);
        let report = Report::new(&min).to_string();

        let expected = "\
alphabet: a, b
reachable: 1, 2, 3, 4
2 and 3 are equivalent
classes:
  q1 = {1}
  q2 = {2, 3}
  q3 = {4}
  E = {0}
minimized automaton (initial state q1):
d(q1, a) = q2
d(q1, b) = q2
d(q2, a) = q3
d(q2, b) = E
d(q3, a) = q3
d(q3, b) = E
d(E, a) = E
d(E, b) = E
final states: [ q3 ]
";
        assert_eq!(report, expected);
    }

    #[test]
    fn complete_automaton_has_no_error_lines() {
        let dfa = crate::tests::redundant_dfa();
        let report = Report::new(&minimize(&dfa)).to_string();
        assert!(report.contains("1 and 2 are equivalent"));
        assert!(!report.contains("d(E"));
        assert!(!report.contains("E = "));
    }
}

use bit_set::BitSet;
use itertools::Itertools;

use crate::{alphabet::CharAlphabet, math::Map};

mod builder;
pub use builder::{DfaBuilder, ModelError};

/// The number of states an automaton may use unless configured otherwise. State ids must
/// lie in `0..DEFAULT_MAX_STATES`.
pub const DEFAULT_MAX_STATES: usize = 64;

/// Configures the bounds within which an automaton is built. Every state id that is
/// referenced (as source, target or accepting state) must be strictly smaller than
/// `max_states`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits {
    /// Exclusive upper bound on state ids.
    pub max_states: usize,
}

impl Limits {
    /// Creates limits allowing the state ids `0..max_states`.
    pub fn new(max_states: usize) -> Self {
        Self { max_states }
    }

    /// Returns true if `state` may be used under these limits.
    pub fn admits(&self, state: State) -> bool {
        state.index() < self.max_states
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STATES)
    }
}

/// Identifies a state of a [`Dfa`].
///
/// Two ids are reserved. [`State::SINK`] (0) is the implicit error state: it never has to be
/// declared, every undefined transition leads to it, it is absorbing and never accepting.
/// [`State::START`] (1) is the initial state of every automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(u32);

impl State {
    /// The implicit, absorbing and rejecting error state.
    pub const SINK: State = State(0);
    /// The distinguished initial state.
    pub const START: State = State(1);

    /// Wraps a raw id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw id.
    pub fn id(self) -> u32 {
        self.0
    }

    /// The raw id as an index into tables.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if this is the error state.
    pub fn is_sink(self) -> bool {
        self == Self::SINK
    }
}

impl From<u32> for State {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A deterministic finite automaton over a [`CharAlphabet`].
///
/// The transition function is partial: whenever no transition is defined for a pair of state
/// and symbol, the run continues in [`State::SINK`]. The initial state is always
/// [`State::START`]. Once built, a [`Dfa`] is never modified, all operations that transform
/// an automaton (such as [`Dfa::minimize`]) produce a new one.
///
/// # Example
/// ```
/// use dfamin::prelude::*;
///
/// let dfa = Dfa::builder()
///     .with_edges([(1, 'a', 2), (2, 'b', 1)])
///     .with_accepting([2])
///     .build()
///     .unwrap();
/// assert!(dfa.accepts("aba".chars()));
/// assert!(!dfa.accepts("ab".chars()));
/// assert_eq!(dfa.transition(State::new(2), 'a'), State::SINK);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Dfa {
    alphabet: CharAlphabet,
    states: BitSet,
    accepting: BitSet,
    delta: Map<(State, char), State>,
    limits: Limits,
}

impl Dfa {
    /// Returns a [`DfaBuilder`] using the default [`Limits`].
    pub fn builder() -> DfaBuilder {
        DfaBuilder::new(Limits::default())
    }

    pub(crate) fn from_parts(
        alphabet: CharAlphabet,
        states: BitSet,
        accepting: BitSet,
        delta: Map<(State, char), State>,
        limits: Limits,
    ) -> Self {
        Self {
            alphabet,
            states,
            accepting,
            delta,
            limits,
        }
    }

    /// The initial state, which is always [`State::START`].
    pub fn start(&self) -> State {
        State::START
    }

    /// The working alphabet, i.e. every symbol that occurs on some transition.
    pub fn alphabet(&self) -> &CharAlphabet {
        &self.alphabet
    }

    /// The limits this automaton was built under.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Iterates over all explicitly known states in ascending order. The sink is not among them.
    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        self.states.iter().map(|q| State::new(q as u32))
    }

    /// The number of explicitly known states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns true if `state` is an explicitly known state.
    pub fn contains(&self, state: State) -> bool {
        self.states.contains(state.index())
    }

    /// Returns the state that is reached from `state` on `symbol`. If no transition is
    /// defined, this is [`State::SINK`], and the sink only ever leads to itself.
    pub fn transition(&self, state: State, symbol: char) -> State {
        if state.is_sink() {
            return State::SINK;
        }
        self.delta
            .get(&(state, symbol))
            .copied()
            .unwrap_or(State::SINK)
    }

    /// Returns true if `state` is accepting. The sink never is.
    pub fn is_accepting(&self, state: State) -> bool {
        self.accepting.contains(state.index())
    }

    /// Iterates over the accepting states in ascending order.
    pub fn accepting_states(&self) -> impl Iterator<Item = State> + '_ {
        self.accepting.iter().map(|q| State::new(q as u32))
    }

    /// Iterates over all explicitly defined transitions `(source, symbol, target)`, ordered by
    /// source state and then by symbol.
    pub fn transitions(&self) -> impl Iterator<Item = (State, char, State)> + '_ {
        self.states().flat_map(move |q| {
            self.alphabet.universe().filter_map(move |a| {
                self.delta.get(&(q, a)).map(|target| (q, a, *target))
            })
        })
    }

    /// Runs `word` from `from` and returns the reached state.
    pub fn run_from<W: IntoIterator<Item = char>>(&self, from: State, word: W) -> State {
        word.into_iter()
            .fold(from, |state, symbol| self.transition(state, symbol))
    }

    /// Runs `word` from the initial state and returns the reached state.
    pub fn run<W: IntoIterator<Item = char>>(&self, word: W) -> State {
        self.run_from(self.start(), word)
    }

    /// Returns true if reading `word` from the initial state ends in an accepting state.
    pub fn accepts<W: IntoIterator<Item = char>>(&self, word: W) -> bool {
        self.is_accepting(self.run(word))
    }

    /// Returns a string representation of the transition table.
    pub fn build_transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string())
                .chain(self.alphabet.universe().map(|s| format!("{:?}", s))),
        );
        for q in self.states() {
            let mut row = vec![format!(
                "{}|{}",
                q,
                if self.is_accepting(q) { "+" } else { "-" }
            )];
            for sym in self.alphabet.universe() {
                match self.delta.get(&(q, sym)) {
                    Some(target) => row.push(target.to_string()),
                    None => row.push("-".to_string()),
                }
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl std::fmt::Debug for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "DFA over {:?} with initial state {} and accepting states [{}]",
            self.alphabet,
            self.start(),
            self.accepting_states().join(", ")
        )?;
        write!(f, "{}", self.build_transition_table())
    }
}

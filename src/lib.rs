//! Library for minimizing deterministic finite automata (DFA) in Rust.
//!
//! A [`Dfa`] consists of a set of states, a working alphabet of `char` symbols, a partial
//! transition function and a set of accepting states. Two state ids are reserved: state `0`
//! is the implicit error state that every undefined transition leads to, and state `1` is
//! the initial state. Automata are usually built with a [`automaton::DfaBuilder`] or loaded
//! from their textual description with the functions in [`input`].
//!
//! Minimization is a pipeline of three stages, see [`minimization`]:
//! - the reachable states are collected in breadth-first discovery order,
//! - the reachable states are grouped into classes of equivalent states by iterating the
//!   distinguishability relation to a fixed point,
//! - every class is collapsed into a single state of a new [`Dfa`], the class containing the
//!   error state is dropped and transitions into it become undefined again.
//!
//! The result is the smallest [`Dfa`] accepting the same language. [`output::Report`] renders
//! every intermediate result in a human readable form and [`dot`] produces a Graphviz
//! representation.
//!
//! ```
//! use dfamin::prelude::*;
//!
//! let dfa: Dfa = "1, a, 2, b, 1, 0\n2, a, 2, b, 3, 0\n3, a, 2, b, 1, 1\n4, a, 3, 1"
//!     .parse()
//!     .unwrap();
//! let minimization = minimize(&dfa);
//! assert_eq!(minimization.reachable().len(), 3);
//! assert_eq!(minimization.dfa().size(), 3);
//! assert!(minimization.dfa().accepts("abab".chars()));
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use dfamin::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::CharAlphabet,
        automaton::{Dfa, DfaBuilder, Limits, ModelError, State, DEFAULT_MAX_STATES},
        input::{parse_dfa, read_dfa, ParseError},
        math::{self, Partition},
        minimization::{
            minimize, moore_partition_refinement, quotient, reachable_states, Minimization,
            Quotient, ReachableStates,
        },
        output::Report,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout
/// the crate and do not really fit to the top level.
pub mod math;

/// Module that contains the definition of the working alphabet.
pub mod alphabet;
pub use alphabet::CharAlphabet;

/// Defines the automaton model, its states and how it is built.
pub mod automaton;
pub use automaton::{Dfa, State};

pub mod minimization;
pub use minimization::minimize;

/// Reading automata from their line-oriented, comma separated description.
pub mod input;

/// Rendering minimization results as text.
pub mod output;

/// Graphviz rendering of automata.
pub mod dot;

/// Implements the generation of random automata and words.
#[cfg(feature = "random")]
pub mod random;

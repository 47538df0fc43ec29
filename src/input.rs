use std::{fs::File, io::Read, path::Path, str::FromStr};

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    automaton::{DfaBuilder, Limits, ModelError, State},
    math::{Map, Set},
    Dfa,
};

/// Abstracts the types of errors that can occur when loading a [`Dfa`] from its textual
/// description. Every error aborts the whole load, no partial automaton is produced.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input could not be read.
    #[error("could not read automaton: {0}")]
    Io(#[from] std::io::Error),
    /// The input could not be split into records.
    #[error("could not split records: {0}")]
    Csv(#[from] csv::Error),
    /// The first field of a record is not a number.
    #[error("line {line}: state `{token}` is not defined correctly")]
    MalformedState {
        /// Line of the offending record.
        line: u64,
        /// The field that was read.
        token: String,
    },
    /// A state or target id lies outside of `1..max_states`.
    #[error("line {line}: state {state} is invalid, state ids must be positive and smaller than {max_states}")]
    StateOutOfRange {
        /// Line of the offending record.
        line: u64,
        /// The id as it was written.
        state: i64,
        /// The configured bound.
        max_states: usize,
    },
    /// The first record declares some state other than the initial one.
    #[error("line {line}: the first state has to be 1, found {state}")]
    FirstStateNotStart {
        /// Line of the offending record.
        line: u64,
        /// The declared state.
        state: u32,
    },
    /// A symbol is not a single non-numeric ASCII character.
    #[error("line {line}: input `{token}` is not well defined, it must be a single non-numeric ASCII character")]
    MalformedSymbol {
        /// Line of the offending record.
        line: u64,
        /// The field that was read.
        token: String,
    },
    /// A transition target is not a number.
    #[error("line {line}: transition targets must be numbers (states), found `{token}`")]
    MalformedTarget {
        /// Line of the offending record.
        line: u64,
        /// The field that was read.
        token: String,
    },
    /// A record ends right after a symbol.
    #[error("line {line}: transition on `{symbol}` has no target state")]
    MissingTarget {
        /// Line of the offending record.
        line: u64,
        /// The symbol without target.
        symbol: char,
    },
    /// The final flag is a number other than `0` or `1`.
    #[error("line {line}: final flag must be 0 or 1, found `{token}`")]
    InvalidFinalFlag {
        /// Line of the offending record.
        line: u64,
        /// The field that was read.
        token: String,
    },
    /// Some field follows the final flag.
    #[error("line {line}: more data than expected after the final flag: `{token}`")]
    TrailingData {
        /// Line of the offending record.
        line: u64,
        /// The first superfluous field.
        token: String,
    },
    /// A state is declared both accepting and rejecting.
    #[error("line {line}: state {state} is declared both final and non-final")]
    ContradictoryFinal {
        /// Line of the second declaration.
        line: u64,
        /// The state in question.
        state: State,
    },
    /// A state has two different targets for the same symbol.
    #[error("line {line}: state {state} has two different transitions on `{symbol}`")]
    ConflictingTransition {
        /// Line of the second transition.
        line: u64,
        /// The source state.
        state: State,
        /// The symbol in question.
        symbol: char,
    },
    /// The input contains no records at all.
    #[error("no state is declared, the initial state 1 is required")]
    NoStates,
    /// The collected records do not form a valid automaton.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// What the next field of a record is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Symbol,
    Target(char),
    Done,
}

/// Accepts an optional sign followed by at least one digit.
fn is_number(token: &str) -> bool {
    let digits = token
        .strip_prefix('+')
        .or_else(|| token.strip_prefix('-'))
        .unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn parse_number(token: &str) -> Option<i64> {
    if is_number(token) {
        token.parse().ok()
    } else {
        None
    }
}

/// Loads a [`Dfa`] from the textual description read from `read`.
///
/// Every non-comment line is a record of the form
/// ```text
/// STATE, [SYMBOL, TARGET]*, [FINAL]
/// ```
/// where `STATE` is a positive state id, each `SYMBOL` is a single non-numeric ASCII
/// character followed by the `TARGET` state id it leads to, and `FINAL` is `0` or `1`. A
/// target of `0` or below (such as `-1`) denotes the error state, which never has to be
/// declared. The first record has to declare state 1. Lines starting with `#` are comments,
/// fields are trimmed and empty fields are ignored.
pub fn dfa_from_reader<R: Read>(read: R, limits: Limits) -> Result<Dfa, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(read);

    let mut builder = DfaBuilder::new(limits);
    let mut declared: Set<State> = Set::default();
    let mut finals: Map<State, bool> = Map::default();
    let mut targets: Map<(State, char), Option<State>> = Map::default();
    let mut records = 0usize;

    let check_range = |line: u64, value: i64| -> Result<State, ParseError> {
        match u32::try_from(value) {
            Ok(id) if value > 0 && limits.admits(State::new(id)) => Ok(State::new(id)),
            _ => Err(ParseError::StateOutOfRange {
                line,
                state: value,
                max_states: limits.max_states,
            }),
        }
    };

    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let mut fields = record.iter().filter(|field| !field.is_empty());

        let Some(head) = fields.next() else {
            continue;
        };
        let value = parse_number(head).ok_or_else(|| ParseError::MalformedState {
            line,
            token: head.to_string(),
        })?;
        let state = check_range(line, value)?;
        if records == 0 && state != State::START {
            return Err(ParseError::FirstStateNotStart {
                line,
                state: state.id(),
            });
        }
        records += 1;
        declared.insert(state);

        let mut expect = Expect::Symbol;
        for token in fields {
            expect = match expect {
                Expect::Symbol => {
                    if let Some(flag) = parse_number(token) {
                        let accepting = match flag {
                            0 => false,
                            1 => true,
                            _ => {
                                return Err(ParseError::InvalidFinalFlag {
                                    line,
                                    token: token.to_string(),
                                })
                            }
                        };
                        if finals.insert(state, accepting) == Some(!accepting) {
                            return Err(ParseError::ContradictoryFinal { line, state });
                        }
                        Expect::Done
                    } else {
                        let mut chars = token.chars();
                        match (chars.next(), chars.next()) {
                            (Some(symbol), None) if symbol.is_ascii() => Expect::Target(symbol),
                            _ => {
                                return Err(ParseError::MalformedSymbol {
                                    line,
                                    token: token.to_string(),
                                })
                            }
                        }
                    }
                }
                Expect::Target(symbol) => {
                    let value = parse_number(token).ok_or_else(|| ParseError::MalformedTarget {
                        line,
                        token: token.to_string(),
                    })?;
                    let target = if value <= 0 {
                        None
                    } else {
                        Some(check_range(line, value)?)
                    };
                    if let Some(previous) = targets.insert((state, symbol), target) {
                        if previous != target {
                            return Err(ParseError::ConflictingTransition {
                                line,
                                state,
                                symbol,
                            });
                        }
                    }
                    trace!("line {line}: transition {state} --{symbol}--> {target:?}");
                    builder.add_transition(state, symbol, target);
                    Expect::Symbol
                }
                Expect::Done => {
                    return Err(ParseError::TrailingData {
                        line,
                        token: token.to_string(),
                    })
                }
            };
        }

        if let Expect::Target(symbol) = expect {
            return Err(ParseError::MissingTarget { line, symbol });
        }
    }

    if records == 0 {
        return Err(ParseError::NoStates);
    }

    for state in declared {
        builder.add_state(state, finals.get(&state).copied().unwrap_or(false));
    }
    let dfa = builder.build()?;
    debug!(
        "loaded automaton with {} states over {:?} from {records} records",
        dfa.size(),
        dfa.alphabet()
    );
    Ok(dfa)
}

/// Loads a [`Dfa`] from a string, see [`dfa_from_reader`] for the format.
pub fn parse_dfa(input: &str, limits: Limits) -> Result<Dfa, ParseError> {
    dfa_from_reader(input.as_bytes(), limits)
}

/// Loads a [`Dfa`] from the file at `path`, see [`dfa_from_reader`] for the format.
pub fn read_dfa<P: AsRef<Path>>(path: P, limits: Limits) -> Result<Dfa, ParseError> {
    let file = File::open(path.as_ref())?;
    dfa_from_reader(std::io::BufReader::new(file), limits)
}

impl FromStr for Dfa {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dfa(s, Limits::default())
    }
}

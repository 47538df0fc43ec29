use itertools::Itertools;

/// Represents the working alphabet of a [`crate::Dfa`], where every symbol is a single `char`.
///
/// The alphabet is a set: inserting a symbol twice has no effect and the symbols are always
/// iterated in ascending order, regardless of the order in which they were first seen. This
/// makes every stage that loops over the alphabet deterministic.
///
/// # Example
/// ```
/// use dfamin::prelude::*;
///
/// let mut alphabet = CharAlphabet::from_iter(['b', 'a']);
/// alphabet.insert('a');
/// assert_eq!(alphabet.size(), 2);
/// assert_eq!(alphabet.universe().collect::<Vec<_>>(), vec!['a', 'b']);
/// ```
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct CharAlphabet(Vec<char>);

impl CharAlphabet {
    /// Creates a new [`CharAlphabet`] of the given size. The symbols are just the first `size`
    /// letters of the latin alphabet, i.e. 'a' to 'z'.
    pub fn of_size(size: usize) -> Self {
        assert!(size <= 26, "Alphabet is too large");
        Self((0..size).map(|i| (b'a' + i as u8) as char).collect())
    }

    /// Adds `symbol` to the alphabet. Returns `true` if the symbol was not present before.
    pub fn insert(&mut self, symbol: char) -> bool {
        match self.0.binary_search(&symbol) {
            Ok(_) => false,
            Err(pos) => {
                self.0.insert(pos, symbol);
                true
            }
        }
    }

    /// Returns true if and only if `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.0.binary_search(&symbol).is_ok()
    }

    /// The number of distinct symbols.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no symbol has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all symbols in ascending order.
    pub fn universe(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }
}

impl std::ops::Index<usize> for CharAlphabet {
    type Output = char;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl FromIterator<char> for CharAlphabet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self(iter.into_iter().unique().sorted().collect())
    }
}

impl std::fmt::Debug for CharAlphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(", "))
    }
}

impl std::fmt::Display for CharAlphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(", "))
    }
}

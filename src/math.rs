use itertools::Itertools;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// A partition is a different view on an equivalence relation, by grouping elements of
/// type `I` into their respective classes under the relation.
///
/// Both the order of the classes and the order of the elements within a class are
/// preserved as they were given. The first element of every class is its designated
/// representative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<I>(Vec<Vec<I>>);

impl<I> std::ops::Deref for Partition<I> {
    type Target = Vec<Vec<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I> IntoIterator for &'a Partition<I> {
    type Item = &'a Vec<I>;
    type IntoIter = std::slice::Iter<'a, Vec<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Eq> Partition<I> {
    /// Builds a new partition from an iterator that yields iterators which yield elements of
    /// type `I`. Empty classes are dropped.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<Vec<_>>())
                .filter(|class| !class.is_empty())
                .collect(),
        )
    }

    /// Returns the size of the partition, i.e. the number of classes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns the designated representative of the class with index `class`, which is the
    /// first element that was added to it.
    pub fn representative(&self, class: usize) -> Option<&I> {
        self.0.get(class).and_then(|members| members.first())
    }

    /// Returns the index of the class containing `element`, if there is one.
    pub fn class_of(&self, element: &I) -> Option<usize> {
        self.0.iter().position(|members| members.contains(element))
    }
}

impl<I: std::fmt::Display> std::fmt::Display for Partition<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}]",
            self.0
                .iter()
                .map(|class| format!("{{{}}}", class.iter().join(", ")))
                .join(", ")
        )
    }
}

use tracing::trace;

use crate::{
    alphabet::CharAlphabet,
    automaton::{DfaBuilder, Limits, State, DEFAULT_MAX_STATES},
    Dfa,
};

/// Generate a random [`Dfa`] with `size` declared states `1..=size` over the first `symbols`
/// letters by randomly drawing transitions. For every state and symbol, the transition is left
/// undefined with probability `1 / (size + 1)`, otherwise its target is drawn uniformly among
/// all states. Every state is accepting with probability one half.
///
/// Depending on the drawn transitions, some states may be unreachable.
pub fn generate_random_dfa(rng: &mut fastrand::Rng, symbols: usize, size: usize) -> Dfa {
    let alphabet = CharAlphabet::of_size(symbols);
    let limits = Limits::new(DEFAULT_MAX_STATES.max(size + 1));
    let mut builder = DfaBuilder::new(limits).with_alphabet_symbols(alphabet.universe());

    for q in 1..=size as u32 {
        builder.add_state(State::new(q), rng.bool());
        for sym in alphabet.universe() {
            let target = rng.u32(0..=size as u32);
            builder.add_transition(
                State::new(q),
                sym,
                (target > 0).then_some(State::new(target)),
            );
        }
    }

    let dfa = builder
        .build()
        .expect("all drawn states lie within the limits");
    trace!("generated random automaton\n{:?}", dfa);
    dfa
}

/// Generates a random word over `alphabet` whose length is drawn uniformly from
/// `0..=max_length`.
pub fn generate_random_word(
    rng: &mut fastrand::Rng,
    alphabet: &CharAlphabet,
    max_length: usize,
) -> Vec<char> {
    if alphabet.is_empty() {
        return vec![];
    }
    let length = rng.usize(0..=max_length);
    (0..length)
        .map(|_| alphabet[rng.usize(0..alphabet.size())])
        .collect()
}

/// Generates `count` random words as in [`generate_random_word`].
pub fn generate_random_words(
    rng: &mut fastrand::Rng,
    alphabet: &CharAlphabet,
    max_length: usize,
    count: usize,
) -> Vec<Vec<char>> {
    (0..count)
        .map(|_| generate_random_word(rng, alphabet, max_length))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{generate_random_dfa, generate_random_words};
    use crate::prelude::*;

    #[test]
    fn random_dfa_sized() {
        let mut rng = fastrand::Rng::with_seed(7);
        let dfa = generate_random_dfa(&mut rng, 2, 10);
        assert_eq!(dfa.size(), 10);
        assert!(dfa.contains(State::START));
        assert_eq!(dfa.alphabet(), &CharAlphabet::of_size(2));
    }

    #[test]
    fn random_words() {
        let mut rng = fastrand::Rng::with_seed(7);
        let alphabet = CharAlphabet::of_size(3);
        let words = generate_random_words(&mut rng, &alphabet, 6, 20);

        assert_eq!(words.len(), 20);
        assert!(words.iter().all(|w| w.len() <= 6));
        assert!(words.iter().flatten().all(|a| alphabet.contains(*a)));
        assert!(generate_random_words(&mut rng, &CharAlphabet::default(), 6, 3)
            .iter()
            .all(|w| w.is_empty()));
    }
}

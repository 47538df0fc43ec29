use std::{collections::VecDeque, io::Write};

use dfamin::{
    math::Set,
    prelude::*,
    random::{generate_random_dfa, generate_random_words},
};

fn equivalent_on(left: &Dfa, right: &Dfa, words: &[Vec<char>]) -> bool {
    words
        .iter()
        .all(|w| left.accepts(w.iter().copied()) == right.accepts(w.iter().copied()))
}

/// Searches the product of `dfa` with itself for a word leading `p` and `q` into states that
/// differ in acceptance.
fn distinguishing_word(dfa: &Dfa, p: State, q: State) -> Option<Vec<char>> {
    let mut seen: Set<(State, State)> = Set::default();
    let mut queue = VecDeque::from([(p, q, vec![])]);
    seen.insert((p, q));

    while let Some((p, q, word)) = queue.pop_front() {
        if dfa.is_accepting(p) != dfa.is_accepting(q) {
            return Some(word);
        }
        for a in dfa.alphabet().universe() {
            let successors = (dfa.transition(p, a), dfa.transition(q, a));
            if seen.insert(successors) {
                let mut extended = word.clone();
                extended.push(a);
                queue.push_back((successors.0, successors.1, extended));
            }
        }
    }
    None
}

#[test_log::test]
fn random_automata_keep_their_language() {
    let mut rng = fastrand::Rng::with_seed(42);
    for size in [1, 2, 5, 12, 30] {
        for _ in 0..8 {
            let dfa = generate_random_dfa(&mut rng, 2, size);
            let min = dfa.minimize();
            let words = generate_random_words(&mut rng, dfa.alphabet(), 2 * size, 200);

            assert!(equivalent_on(&dfa, &min, &words), "{dfa:?}\n{min:?}");
            assert!(min.size() <= reachable_states(&dfa).len().max(1));
        }
    }
}

#[test]
fn minimizing_twice_changes_nothing() {
    let mut rng = fastrand::Rng::with_seed(1337);
    for _ in 0..20 {
        let dfa = generate_random_dfa(&mut rng, 3, 10);
        let once = dfa.minimize();
        let twice = once.minimize();
        assert_eq!(once, twice);
    }
}

#[test]
fn no_two_classes_can_be_merged() {
    let mut rng = fastrand::Rng::with_seed(2024);
    for _ in 0..50 {
        let dfa = generate_random_dfa(&mut rng, 3, 12);
        let min = minimize(&dfa);
        let partition = min.partition();
        assert_eq!(
            partition.class_of(&State::SINK).is_some(),
            min.reachable().reaches_sink()
        );

        for i in 0..partition.size() {
            for j in (i + 1)..partition.size() {
                let (p, q) = (partition[i][0], partition[j][0]);
                let word = distinguishing_word(&dfa, p, q)
                    .unwrap_or_else(|| panic!("classes of {p} and {q} could be merged\n{dfa:?}"));
                assert_ne!(
                    dfa.is_accepting(dfa.run_from(p, word.iter().copied())),
                    dfa.is_accepting(dfa.run_from(q, word.iter().copied()))
                );
            }
        }

        for class in partition {
            for q in &class[1..] {
                assert_eq!(distinguishing_word(&dfa, class[0], *q), None);
            }
        }
    }
}

#[test]
fn access_words_lead_to_their_states() {
    let mut rng = fastrand::Rng::with_seed(3);
    for _ in 0..20 {
        let dfa = generate_random_dfa(&mut rng, 3, 15);
        let reachable = reachable_states(&dfa);
        assert_eq!(reachable.states().first(), Some(&State::START));
        for (q, word) in reachable.iter() {
            assert_eq!(dfa.run(word.iter().copied()), q);
        }
        // every successor of a reachable state is reachable itself
        for q in reachable.states() {
            for a in dfa.alphabet().universe() {
                assert!(reachable.contains(dfa.transition(*q, a)));
            }
        }
    }
}

#[test]
fn classes_agree_on_all_sampled_suffixes() {
    let mut rng = fastrand::Rng::with_seed(99);
    for _ in 0..10 {
        let dfa = generate_random_dfa(&mut rng, 2, 12);
        let min = minimize(&dfa);
        let words = generate_random_words(&mut rng, dfa.alphabet(), 12, 100);

        for class in min.partition() {
            let representative = class[0];
            for q in class {
                for w in &words {
                    assert_eq!(
                        dfa.is_accepting(dfa.run_from(representative, w.iter().copied())),
                        dfa.is_accepting(dfa.run_from(*q, w.iter().copied())),
                        "{representative} and {q} disagree on {w:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn quotient_states_are_numbered_contiguously() {
    let mut rng = fastrand::Rng::with_seed(5);
    for _ in 0..20 {
        let dfa = generate_random_dfa(&mut rng, 2, 9);
        let min = minimize(&dfa);
        let states: Vec<_> = min.dfa().states().map(|q| q.id()).collect();
        let expected: Vec<_> = (1..=states.len() as u32).collect();
        assert_eq!(states, expected);

        let kept = min.partition().size() - usize::from(min.quotient().elides_error_class());
        assert_eq!(min.dfa().size(), kept);
    }
}

#[test]
fn distinct_states() {
    let dfa: Dfa = "1, a, 2, b, 1, 0\n2, a, 2, b, 3, 0\n3, a, 2, b, 1, 1"
        .parse()
        .unwrap();
    let min = minimize(&dfa);
    assert!(min.equivalent_pairs().is_empty());
    assert_eq!(min.partition().size(), 3);
    assert_eq!(min.dfa().size(), 3);
    assert!(min.dfa().accepts("bbaab".chars()));
    assert!(!min.dfa().accepts("aba".chars()));
}

#[test]
fn unreachable_state_is_ignored() {
    let with = parse_dfa("1, a, 2, 0\n2, a, 1, 1\n3, a, 3, 1", Limits::default()).unwrap();
    let without = parse_dfa("1, a, 2, 0\n2, a, 1, 1", Limits::default()).unwrap();

    let a = minimize(&with);
    let b = minimize(&without);
    assert_eq!(a.reachable().states(), b.reachable().states());
    assert_eq!(a.dfa(), b.dfa());
    assert_eq!(Report::new(&a).to_string(), Report::new(&b).to_string());
}

#[test]
fn empty_language_collapses_to_one_state() {
    let dfa: Dfa = "1, a, 2, b, 0, 0\n2, a, 1, 0".parse().unwrap();
    let min = minimize(&dfa);
    assert_eq!(min.partition().size(), 1);
    assert_eq!(min.error_class(), Some(0));
    assert_eq!(min.dfa().size(), 1);
    assert_eq!(min.dfa().accepting_states().count(), 0);
}

#[test_log::test]
fn read_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# accepts every word ending in b").unwrap();
    writeln!(file, "1, a, 1, b, 2, 0").unwrap();
    writeln!(file, "2, a, 3, b, 2, 1").unwrap();
    writeln!(file, "3, a, 3, b, 2, 0").unwrap();
    file.flush().unwrap();

    let dfa = read_dfa(file.path(), Limits::default()).unwrap();
    assert_eq!(dfa.size(), 3);
    let min = minimize(&dfa);
    assert_eq!(min.equivalent_pairs(), vec![(State::new(1), State::new(3))]);
    assert_eq!(min.dfa().size(), 2);
    assert!(min.dfa().accepts("aab".chars()));
    assert!(!min.dfa().accepts("aba".chars()));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_dfa(dir.path().join("missing.csv"), Limits::default());
    assert!(matches!(result, Err(ParseError::Io(_))));
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dfamin::{minimization::reachable_states, prelude::*, random::generate_random_dfa};

const SIZES: [usize; 3] = [8, 24, 48];
const SYMBOLS: usize = 3;

fn data() -> Vec<Dfa> {
    let mut rng = fastrand::Rng::with_seed(0xdfa);
    SIZES
        .iter()
        .map(|size| generate_random_dfa(&mut rng, SYMBOLS, *size))
        .collect()
}

fn reachability(c: &mut Criterion) {
    let automata = data();
    c.bench_function("reachable states", |b| {
        b.iter(|| {
            for dfa in &automata {
                black_box(reachable_states(dfa));
            }
        })
    });
}

fn minimization(c: &mut Criterion) {
    let automata = data();
    for (size, dfa) in SIZES.iter().zip(automata.iter()) {
        c.bench_function(&format!("minimize {size} states"), |b| {
            b.iter(|| black_box(minimize(dfa)))
        });
    }
}

criterion_group!(benches, reachability, minimization);
criterion_main!(benches);

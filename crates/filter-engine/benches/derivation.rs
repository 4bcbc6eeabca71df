//! Benchmarks for list derivation
//!
//! Run with: cargo bench --package filter-engine
//!
//! Uses a synthetic store roughly the size of the full problem set.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use filter_engine::{count_problems, derive, FilterBuilder, QuestionFilter};
use question_store::{DifficultyLevel, Question, QuestionStore};

const TAGS: [&str; 8] = ["array", "dp", "graph", "tree", "string", "math", "greedy", "heap"];
const COMPANIES: [&str; 5] = ["Google", "Amazon", "Meta", "Apple", "Microsoft"];

fn load_test_store() -> QuestionStore {
    let mut store = QuestionStore::new();
    store.insert_questions((1..=2000u32).map(|id| Question {
        id,
        title: format!("Question {}", id),
        tags: [TAGS[id as usize % TAGS.len()], TAGS[(id as usize / 3) % TAGS.len()]]
            .iter()
            .map(|t| t.to_string())
            .collect(),
        companies: [COMPANIES[id as usize % COMPANIES.len()].to_string()]
            .into_iter()
            .collect(),
        difficulty_level: DifficultyLevel::ALL[id as usize % 3],
        top_liked: id % 7 == 0,
        top_interview: id % 5 == 0,
        solved: id % 4 == 0,
        ..Question::default()
    }));
    store
}

fn typical_filter(store: &QuestionStore) -> QuestionFilter {
    let mut builder = FilterBuilder::new(store.subscribe_vocabulary());
    builder.update_category("dp");
    builder.update_category("graph");
    builder.update_company("Google");
    builder.update_level("Medium");
    builder.build_filter(false)
}

fn bench_derive(c: &mut Criterion) {
    let store = load_test_store();
    let filter = typical_filter(&store);

    c.bench_function("derive_typical_filter", |b| {
        b.iter(|| {
            let questions = derive(store.questions(), black_box(&filter), black_box(true));
            black_box(questions)
        })
    });
}

fn bench_count(c: &mut Criterion) {
    let store = load_test_store();
    let filter = typical_filter(&store);

    c.bench_function("count_typical_filter", |b| {
        b.iter(|| {
            let count =
                count_problems(store.questions(), black_box(Some(&filter)), black_box(true));
            black_box(count)
        })
    });
}

fn bench_derive_empty_filter(c: &mut Criterion) {
    let store = load_test_store();

    c.bench_function("derive_empty_filter", |b| {
        b.iter(|| {
            let questions = derive(store.questions(), black_box(&QuestionFilter::empty()), false);
            black_box(questions)
        })
    });
}

criterion_group!(benches, bench_derive, bench_count, bench_derive_empty_filter);
criterion_main!(benches);

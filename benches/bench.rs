// Criterion benchmarks for Talent Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use talent_match::core::{tfidf::pairwise_similarity, Matcher, SimilarityBackend};
use talent_match::models::{Candidate, MatchingConfig};

const SKILL_POOL: [&str; 12] = [
    "python", "rust", "go", "aws", "docker", "kubernetes",
    "react", "sql", "terraform", "java", "spark", "kafka",
];

const JOB: &str = "Senior backend engineer building python and rust services on aws \
                   with docker, kubernetes and kafka";

fn create_candidate(id: usize) -> Candidate {
    let skills = (0..(id % 5) + 1)
        .map(|offset| SKILL_POOL[(id + offset * 7) % SKILL_POOL.len()].to_string())
        .collect();

    Candidate {
        id: id.to_string(),
        name: format!("Candidate {}", id),
        skills,
        experience: (id % 16) as f64,
        education: if id % 3 == 0 { "MSc Computer Science" } else { "BSc" }.to_string(),
        location: "Remote".to_string(),
        source: if id % 2 == 0 { "linkedin" } else { "internal" }.to_string(),
        match_score: None,
    }
}

fn required_skills() -> Vec<String> {
    ["python", "aws", "docker", "kafka"].iter().map(|s| s.to_string()).collect()
}

fn bench_pairwise_tfidf(c: &mut Criterion) {
    c.bench_function("tfidf_pairwise_similarity", |b| {
        b.iter(|| {
            pairwise_similarity(
                black_box("python aws docker kubernetes MSc Computer Science"),
                black_box(JOB),
            )
        });
    });
}

fn bench_ranking(c: &mut Criterion) {
    let required = required_skills();
    let config = MatchingConfig {
        min_match_score: 20.0,
        ..MatchingConfig::default()
    };

    let mut group = c.benchmark_group("ranking");

    for backend in [SimilarityBackend::TfIdf, SimilarityBackend::Overlap] {
        let matcher = Matcher::with_backend(backend);

        for candidate_count in [100, 1000, 10000].iter() {
            let candidates: Vec<Candidate> = (0..*candidate_count).map(create_candidate).collect();

            group.bench_with_input(
                BenchmarkId::new(format!("rank_{}", backend), candidate_count),
                candidate_count,
                |b, _| {
                    b.iter(|| {
                        matcher.rank(
                            black_box(candidates.clone()),
                            black_box(JOB),
                            black_box(&required),
                            black_box(&config),
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_sequential_vs_parallel(c: &mut Criterion) {
    let required = required_skills();
    let config = MatchingConfig::default();
    let candidates: Vec<Candidate> = (0..2000).map(create_candidate).collect();

    let sequential = Matcher::default().with_parallel_threshold(usize::MAX);
    let parallel = Matcher::default().with_parallel_threshold(1);

    c.bench_function("rank_2000_sequential", |b| {
        b.iter(|| sequential.rank(black_box(candidates.clone()), JOB, &required, &config));
    });
    c.bench_function("rank_2000_parallel", |b| {
        b.iter(|| parallel.rank(black_box(candidates.clone()), JOB, &required, &config));
    });
}

criterion_group!(
    benches,
    bench_pairwise_tfidf,
    bench_ranking,
    bench_sequential_vs_parallel
);

criterion_main!(benches);

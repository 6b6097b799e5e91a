//! Benchmarks for duplication passes.
//!
//! These benchmarks measure matching and a full propagation pass over chain
//! shaped reactors, where every project is downstream of the first one.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use dependency_duplicator::dependency::Dependency;
use dependency_duplicator::graph::ReactorGraph;
use dependency_duplicator::matcher::DependencyMatcher;
use dependency_duplicator::phases::{self, ResolvedRules, RuleSet};
use dependency_duplicator::project::{Project, ProjectId};
use dependency_duplicator::rule::DuplicationRule;

fn id(index: usize) -> ProjectId {
    ProjectId::new("com.example", format!("module-{index}"), "1.0.0")
}

/// `module-(n-1) -> ... -> module-1 -> module-0`, each with a few third-party dependencies.
fn chain(size: usize) -> Vec<Project> {
    (0..size)
        .map(|i| {
            let mut project = Project::new(id(i))
                .with_dependency(
                    Dependency::new("org.apache.commons", "commons-lang3")
                        .with_version("3.12.0")
                        .with_scope("compile"),
                )
                .with_dependency(Dependency::new("org.slf4j", "slf4j-api").with_version("2.0.9"))
                .with_dependency(
                    Dependency::new("com.google.guava", "guava")
                        .with_version("33.0.0-jre")
                        .with_exclusion("com.google.code.findbugs", "jsr305"),
                );
            if i > 0 {
                project = project.with_dependency(
                    Dependency::new("com.example", format!("module-{}", i - 1)).with_version("1.0.0"),
                );
            }
            project
        })
        .collect()
}

fn rules_everywhere(size: usize) -> ResolvedRules {
    let rules = vec![
        DuplicationRule::new(vec![DependencyMatcher::new("org\\.apache\\.commons:.*").unwrap()])
            .with_target_scope("test"),
        DuplicationRule::new(vec![DependencyMatcher::new("org\\.slf4j:slf4j-api:jar").unwrap()])
            .with_target_classifier("tests")
            .with_add_downstream(false),
    ];
    (0..size)
        .map(|i| (id(i), RuleSet::new(id(i), rules.clone())))
        .collect()
}

/// Benchmark matching a dependency against patterns.
fn bench_matcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("matcher");

    let dependency = Dependency::new("org.apache.commons", "commons-lang3").with_version("3.12.0");
    let literal = DependencyMatcher::new("org\\.apache\\.commons:commons-lang3:jar").unwrap();
    let wildcard = DependencyMatcher::new("org\\.apache\\..*:.*").unwrap();
    let miss = DependencyMatcher::new("com\\.google\\..*").unwrap();

    group.bench_function("literal", |b| {
        b.iter(|| black_box(literal.matches(black_box(&dependency))))
    });
    group.bench_function("wildcard", |b| {
        b.iter(|| black_box(wildcard.matches(black_box(&dependency))))
    });
    group.bench_function("no_match", |b| {
        b.iter(|| black_box(miss.matches(black_box(&dependency))))
    });

    group.finish();
}

/// Benchmark a full scan, commit and resequence pass.
fn bench_propagation(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagation");

    for size in [10, 50, 200] {
        let rules = rules_everywhere(size);
        group.bench_with_input(BenchmarkId::new("chain", size), &size, |b, &size| {
            b.iter_batched(
                || ReactorGraph::new(chain(size)).unwrap(),
                |mut graph| black_box(phases::propagate(&mut graph, &rules)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

/// Benchmark sorting the reactor alone.
fn bench_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorting");

    for size in [10, 200, 1000] {
        let projects = chain(size);
        group.bench_with_input(BenchmarkId::new("chain", size), &projects, |b, projects| {
            b.iter(|| black_box(ReactorGraph::new(projects.clone()).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_matcher, bench_propagation, bench_sorting);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use grantdesk_core::{ActionType, ModuleCatalog};
use grantdesk_perms::{compute_delta, GrantSet};
use grantdesk_testkit::{ids, standard_catalog};

/// Grant every offered action on the first `modules` standard modules.
fn working_set(modules: usize) -> GrantSet {
    let mut set = GrantSet::new();
    for module in ModuleCatalog::standard().iter().take(modules) {
        for &action in module.actions() {
            set.grant(module.display_name(), action);
        }
    }
    set
}

fn bench_compute_delta(c: &mut Criterion) {
    let modules = ModuleCatalog::standard();
    let catalog = standard_catalog();
    let original = ids(&(1..=120i64).collect::<Vec<_>>());

    let mut group = c.benchmark_group("compute_delta");
    for size in [1, 8, modules.len()] {
        let working = working_set(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &working, |b, working| {
            b.iter(|| compute_delta(black_box(&original), black_box(working), modules, &catalog))
        });
    }
    group.finish();
}

fn bench_single_toggle(c: &mut Criterion) {
    let modules = ModuleCatalog::standard();
    let catalog = standard_catalog();
    let mut working = working_set(modules.len());
    let original = grantdesk_perms::resolve_working_ids(&working, modules, &catalog).unwrap();
    working.revoke("Goal Management", ActionType::Export);

    c.bench_function("compute_delta/single_toggle", |b| {
        b.iter(|| compute_delta(black_box(&original), black_box(&working), modules, &catalog))
    });
}

criterion_group!(benches, bench_compute_delta, bench_single_toggle);
criterion_main!(benches);

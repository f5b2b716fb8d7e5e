//! # Library Manager Benchmarks
//!
//! | Group | Operation |
//! |-------|-----------|
//! | lending | borrow then return of one copy |
//! | lending | joined history listing at several ledger sizes |
//! | identity | bearer token verification |
//! | gateway | full HTTP round trip through the router |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use library_node::LibraryContainer;
use lm_01_identity::{IdentityApi, Registration};
use lm_02_catalog::{CatalogApi, NewBook};
use lm_03_lending::{LendingApi, LoanRequest};
use lm_tests::harness::{test_config, TestApp, PASSWORD};
use shared_types::{Caller, Role, UserId};
use std::time::Duration;
use tokio::runtime::Runtime;

const READER: &str = "reader@library.test";

fn admin() -> Caller {
    Caller {
        user_id: UserId::new(),
        email: "bench-admin@library.test".into(),
        role: Role::Admin,
    }
}

/// Container with one reader and one title of `copies` copies.
fn stocked_library(rt: &Runtime, copies: u32) -> LibraryContainer {
    let container = LibraryContainer::new(test_config()).expect("container builds");
    rt.block_on(async {
        container
            .identity
            .register(Registration {
                username: "reader".into(),
                name: "Reader".into(),
                email: READER.into(),
                password: PASSWORD.into(),
                contact: None,
                is_admin: false,
            })
            .await
            .expect("register");
        container
            .catalog
            .create_book(
                &admin(),
                NewBook {
                    name: "Dune".into(),
                    author: "Frank Herbert".into(),
                    total_copies: copies,
                },
            )
            .await
            .expect("create book");
    });
    container
}

// ============================================================================
// LENDING
// ============================================================================

fn bench_borrow_return_cycle(c: &mut Criterion) {
    let rt = Runtime::new().expect("runtime");
    let container = stocked_library(&rt, 1);
    let caller = admin();

    let mut group = c.benchmark_group("lending");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("borrow_return_cycle", |b| {
        b.iter(|| {
            rt.block_on(async {
                let request = LoanRequest::new(READER, "Dune");
                let loan = container
                    .lending
                    .borrow(&caller, request.clone())
                    .await
                    .expect("borrow");
                let closed = container
                    .lending
                    .return_book(&caller, request)
                    .await
                    .expect("return");
                black_box((loan, closed))
            })
        })
    });

    group.finish();
}

fn bench_history_listing(c: &mut Criterion) {
    let rt = Runtime::new().expect("runtime");
    let caller = admin();

    let mut group = c.benchmark_group("lending");
    for size in [10u32, 100, 1_000] {
        let container = stocked_library(&rt, size);
        rt.block_on(async {
            for _ in 0..size {
                container
                    .lending
                    .borrow(&caller, LoanRequest::new(READER, "Dune"))
                    .await
                    .expect("borrow");
            }
        });

        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(
            BenchmarkId::new("list_all_transactions", size),
            &container,
            |b, container| {
                b.iter(|| {
                    rt.block_on(async {
                        black_box(
                            container
                                .lending
                                .list_all_transactions()
                                .await
                                .expect("list"),
                        )
                    })
                })
            },
        );
    }
    group.finish();
}

// ============================================================================
// IDENTITY
// ============================================================================

fn bench_token_verification(c: &mut Criterion) {
    let rt = Runtime::new().expect("runtime");
    let container = stocked_library(&rt, 1);
    let token = rt
        .block_on(container.identity.login(READER, PASSWORD))
        .expect("login")
        .token;

    let mut group = c.benchmark_group("identity");
    group.bench_function("authenticate_bearer", |b| {
        b.iter(|| black_box(container.identity.authenticate(&token).expect("valid token")))
    });
    group.finish();
}

// ============================================================================
// GATEWAY
// ============================================================================

fn bench_http_round_trip(c: &mut Criterion) {
    let rt = Runtime::new().expect("runtime");
    let (app, token) = rt.block_on(async {
        let app = TestApp::new();
        let token = app.admin_token().await;
        app.create_book(&token, "Dune", 3).await;
        (app, token)
    });

    let mut group = c.benchmark_group("gateway");
    group.bench_function("get_books", |b| {
        b.iter(|| rt.block_on(async { black_box(app.get("/books", Some(&token)).await.status) }))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_borrow_return_cycle,
    bench_history_listing,
    bench_token_verification,
    bench_http_round_trip,
);

criterion_main!(benches);

//! 工具函数与链接服务性能基准测试

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tinylink::services::{LinkService, LinkServiceOptions};
use tinylink::storage::{Database, LinkStore, NullPersister};
use tinylink::utils::url_validator::validate_url;
use tinylink::utils::{generate_random_code, is_valid_short_code};

// ============== is_valid_short_code 基准测试 ==============

fn bench_is_valid_short_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/is_valid_short_code");

    group.bench_function("valid_simple", |b| {
        b.iter(|| {
            assert!(is_valid_short_code("abc123"));
        });
    });

    group.bench_function("valid_with_separators", |b| {
        b.iter(|| {
            assert!(is_valid_short_code("my-custom_code"));
        });
    });

    group.bench_function("invalid_empty", |b| {
        b.iter(|| {
            assert!(!is_valid_short_code(""));
        });
    });

    group.bench_function("invalid_asset_path", |b| {
        b.iter(|| {
            assert!(!is_valid_short_code("index.html"));
        });
    });

    // 长度边界
    let max_len_code = "a".repeat(64);
    group.bench_function("valid_max_length", |b| {
        b.iter(|| {
            assert!(is_valid_short_code(&max_len_code));
        });
    });

    let too_long_code = "a".repeat(65);
    group.bench_function("invalid_too_long", |b| {
        b.iter(|| {
            assert!(!is_valid_short_code(&too_long_code));
        });
    });

    group.finish();
}

// ============== generate_random_code 基准测试 ==============

fn bench_generate_random_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/generate_random_code");

    for length in [4, 7, 12, 20] {
        group.bench_with_input(BenchmarkId::new("length", length), &length, |b, &length| {
            b.iter(|| {
                let code = generate_random_code(length);
                assert_eq!(code.len(), length);
            });
        });
    }

    group.finish();
}

// ============== validate_url 基准测试 ==============

fn bench_validate_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/validate_url");

    group.bench_function("valid_https", |b| {
        b.iter(|| {
            assert!(validate_url("https://example.com/path?query=1").is_ok());
        });
    });

    group.bench_function("valid_mailto", |b| {
        b.iter(|| {
            assert!(validate_url("mailto:someone@example.com").is_ok());
        });
    });

    group.bench_function("invalid_dangerous_protocol", |b| {
        b.iter(|| {
            assert!(validate_url("javascript:alert(1)").is_err());
        });
    });

    group.bench_function("invalid_relative", |b| {
        b.iter(|| {
            assert!(validate_url("example.com/path").is_err());
        });
    });

    let long_url = format!("https://example.com/{}", "a".repeat(1000));
    group.bench_function("valid_long_url", |b| {
        b.iter(|| {
            assert!(validate_url(&long_url).is_ok());
        });
    });

    group.finish();
}

// ============== LinkService 基准测试 ==============

fn bench_link_service(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("services/link_service");

    let store = Arc::new(LinkStore::with_database(
        Database::default(),
        Arc::new(NullPersister),
    ));
    let service = Arc::new(LinkService::new(store, LinkServiceOptions::default()));
    rt.block_on(async {
        for i in 0..1000 {
            service
                .shorten(Some("https://example.com"), Some(&format!("code{}", i)))
                .await
                .unwrap();
        }
    });

    group.bench_function("record_click", |b| {
        b.to_async(&rt).iter(|| {
            let service = service.clone();
            async move {
                service
                    .record_click("code500", Some("https://ref.example"))
                    .await
                    .unwrap();
            }
        });
    });

    group.bench_function("shorten_generated", |b| {
        b.to_async(&rt).iter(|| {
            let service = service.clone();
            async move {
                service
                    .shorten(Some("https://example.com/bench"), None)
                    .await
                    .unwrap();
            }
        });
    });

    group.bench_function("list", |b| {
        b.to_async(&rt).iter(|| {
            let service = service.clone();
            async move {
                assert!(!service.list().await.is_empty());
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_is_valid_short_code,
    bench_generate_random_code,
    bench_validate_url,
    bench_link_service,
);
criterion_main!(benches);

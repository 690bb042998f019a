//! Link service tests
//!
//! Business rules for shorten / click / stats / list / delete / cleanup,
//! run against an in-memory store.

use std::sync::Arc;

use chrono::{Duration, Utc};

use tinylink::errors::TinylinkError;
use tinylink::services::{LinkService, LinkServiceOptions};
use tinylink::storage::{Database, LinkStore, NullPersister, StatsRecord, UrlRecord};
use tinylink::utils::is_valid_short_code;

// =============================================================================
// Test Setup
// =============================================================================

fn options() -> LinkServiceOptions {
    LinkServiceOptions {
        base_url: "http://localhost:3000".to_string(),
        ..Default::default()
    }
}

fn service_with(db: Database) -> LinkService {
    let store = Arc::new(LinkStore::with_database(db, Arc::new(NullPersister)));
    LinkService::new(store, options())
}

fn empty_service() -> LinkService {
    service_with(Database::default())
}

fn seeded(code: &str, original: &str, days_ago: i64, clicks: u64, last_days_ago: Option<i64>) -> (UrlRecord, StatsRecord) {
    let now = Utc::now();
    let record = UrlRecord {
        original: original.to_string(),
        created: now - Duration::days(days_ago),
        short_code: code.to_string(),
    };
    let stats = StatsRecord {
        clicks,
        last_access: last_days_ago.map(|d| now - Duration::days(d)),
        ..Default::default()
    };
    (record, stats)
}

fn database(entries: Vec<(UrlRecord, StatsRecord)>) -> Database {
    let mut db = Database::default();
    for (record, stats) in entries {
        db.stats.insert(record.short_code.clone(), stats);
        db.urls.insert(record.short_code.clone(), record);
    }
    db
}

// =============================================================================
// Shorten
// =============================================================================

mod shorten_tests {
    use super::*;

    #[tokio::test]
    async fn test_generated_code_shape() {
        let service = empty_service();
        let result = service
            .shorten(Some("https://example.com/a/long/path"), None)
            .await
            .unwrap();

        assert_eq!(result.record.short_code.len(), 7);
        assert!(is_valid_short_code(&result.record.short_code));
        assert_eq!(
            result.short_url,
            format!("http://localhost:3000/{}", result.record.short_code)
        );
        assert_eq!(result.record.original, "https://example.com/a/long/path");

        let stats = service.get_stats(&result.record.short_code).await.unwrap();
        assert_eq!(stats.stats.clicks, 0);
        assert!(stats.stats.last_access.is_none());
        assert!(stats.stats.referrers.is_empty());
        assert_eq!(stats.top_referrer, "None");
    }

    #[tokio::test]
    async fn test_custom_code() {
        let service = empty_service();
        let result = service
            .shorten(Some("https://example.com"), Some("my-link_1"))
            .await
            .unwrap();
        assert_eq!(result.record.short_code, "my-link_1");
        assert_eq!(result.short_url, "http://localhost:3000/my-link_1");
    }

    #[tokio::test]
    async fn test_empty_custom_code_is_generated() {
        let service = empty_service();
        let result = service
            .shorten(Some("https://example.com"), Some(""))
            .await
            .unwrap();
        assert_eq!(result.record.short_code.len(), 7);
    }

    #[tokio::test]
    async fn test_missing_url() {
        let service = empty_service();
        let err = service.shorten(None, None).await.unwrap_err();
        assert!(matches!(err, TinylinkError::Validation(ref m) if m == "URL is required"));

        let err = service.shorten(Some(""), None).await.unwrap_err();
        assert!(matches!(err, TinylinkError::Validation(_)));
        assert_eq!(service.count().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let service = empty_service();
        for url in ["not a url", "example.com", "javascript:alert(1)"] {
            let err = service.shorten(Some(url), None).await.unwrap_err();
            assert!(
                matches!(err, TinylinkError::Validation(ref m) if m == "Invalid URL"),
                "{} should be rejected",
                url
            );
        }
        assert_eq!(service.count().await, 0);
    }

    #[tokio::test]
    async fn test_conflict_suggests_alternate() {
        let service = empty_service();
        service
            .shorten(Some("https://a.example"), Some("ex"))
            .await
            .unwrap();

        let err = service
            .shorten(Some("https://b.example"), Some("ex"))
            .await
            .unwrap_err();
        assert!(matches!(err, TinylinkError::Conflict { .. }));
        let suggestion = err.suggestion().unwrap();
        assert!(suggestion.starts_with("ex-"));
        assert_eq!(suggestion.len(), "ex-".len() + 3);

        // 原记录不受影响
        let stats = service.get_stats("ex").await.unwrap();
        assert_eq!(stats.record.original, "https://a.example");
    }

    #[tokio::test]
    async fn test_invalid_custom_code() {
        let service = empty_service();
        for code in ["bad code", "a/b", "ação", "x.y"] {
            let err = service
                .shorten(Some("https://example.com"), Some(code))
                .await
                .unwrap_err();
            assert!(matches!(err, TinylinkError::Validation(_)), "{}", code);
        }
        assert_eq!(service.count().await, 0);
    }

    #[tokio::test]
    async fn test_generation_gives_up_when_space_exhausted() {
        let store = Arc::new(LinkStore::with_database(
            Database::default(),
            Arc::new(NullPersister),
        ));
        let service = LinkService::new(
            store,
            LinkServiceOptions {
                random_code_length: 1,
                max_generate_attempts: 3,
                ..options()
            },
        );

        // 64 个单字符码全部占满后必然失败
        let mut created = 0;
        let mut last_err = None;
        for _ in 0..2000 {
            match service.shorten(Some("https://example.com"), None).await {
                Ok(_) => created += 1,
                Err(e) => last_err = Some(e),
            }
            if created == 64 {
                break;
            }
        }
        assert_eq!(created, 64);
        if last_err.is_some() {
            assert!(matches!(last_err, Some(TinylinkError::Internal(_))));
        }

        let err = service
            .shorten(Some("https://example.com"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, TinylinkError::Internal(_)));
        assert_eq!(service.count().await, 64);
    }
}

// =============================================================================
// Redirect / stats
// =============================================================================

mod click_tests {
    use super::*;

    #[tokio::test]
    async fn test_clicks_and_referrers() {
        let service = empty_service();
        service
            .shorten(Some("https://example.com"), Some("ex"))
            .await
            .unwrap();

        let target = service
            .record_click("ex", Some("https://news.example/"))
            .await
            .unwrap();
        assert_eq!(target, "https://example.com");
        service.record_click("ex", None).await.unwrap();
        service.record_click("ex", Some("")).await.unwrap();

        let stats = service.get_stats("ex").await.unwrap();
        assert_eq!(stats.stats.clicks, 3);
        assert_eq!(stats.stats.referrers.get("Direct"), Some(&2));
        assert_eq!(stats.stats.referrers.get("https://news.example/"), Some(&1));
        assert_eq!(stats.top_referrer, "Direct");
        assert!(stats.stats.last_access.is_some());

        let total: u64 = stats.stats.referrers.values().sum();
        assert_eq!(total, stats.stats.clicks);
    }

    #[tokio::test]
    async fn test_unknown_code_changes_nothing() {
        let service = empty_service();
        service
            .shorten(Some("https://example.com"), Some("ex"))
            .await
            .unwrap();

        let err = service.record_click("nope", None).await.unwrap_err();
        assert!(matches!(err, TinylinkError::NotFound(_)));

        let err = service.get_stats("nope").await.unwrap_err();
        assert!(matches!(err, TinylinkError::NotFound(_)));

        let stats = service.get_stats("ex").await.unwrap();
        assert_eq!(stats.stats.clicks, 0);
    }

    #[tokio::test]
    async fn test_concurrent_clicks_are_all_counted() {
        let service = Arc::new(empty_service());
        service
            .shorten(Some("https://example.com"), Some("hot"))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..50 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                let referrer = if i % 2 == 0 { None } else { Some("https://r.example") };
                service.record_click("hot", referrer).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stats = service.get_stats("hot").await.unwrap();
        assert_eq!(stats.stats.clicks, 50);
        assert_eq!(stats.stats.referrers.get("Direct"), Some(&25));
        assert_eq!(stats.stats.referrers.get("https://r.example"), Some(&25));
    }
}

// =============================================================================
// List / delete
// =============================================================================

mod list_delete_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_sorted_by_clicks() {
        let service = service_with(database(vec![
            seeded("A", "https://a.example", 3, 5, Some(1)),
            seeded("B", "https://b.example", 2, 2, Some(1)),
            seeded("C", "https://c.example", 1, 5, Some(1)),
        ]));

        let list = service.list().await;
        let codes: Vec<&str> = list.iter().map(|l| l.record.short_code.as_str()).collect();
        // A 与 C 同为 5 次，A 创建更早
        assert_eq!(codes, vec!["A", "C", "B"]);
        assert_eq!(list[0].clicks, 5);
        assert_eq!(list[2].clicks, 2);
        assert_eq!(list[0].short_url, "http://localhost:3000/A");
    }

    #[tokio::test]
    async fn test_list_empty() {
        assert!(empty_service().list().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_both_records() {
        let service = empty_service();
        service
            .shorten(Some("https://example.com"), Some("gone"))
            .await
            .unwrap();
        service.record_click("gone", None).await.unwrap();

        let removed = service.delete("gone").await.unwrap();
        assert_eq!(removed.short_code, "gone");

        let snapshot = service.store().snapshot().await;
        assert!(!snapshot.urls.contains_key("gone"));
        assert!(!snapshot.stats.contains_key("gone"));

        assert!(matches!(
            service.record_click("gone", None).await,
            Err(TinylinkError::NotFound(_))
        ));
        assert!(matches!(
            service.delete("gone").await,
            Err(TinylinkError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_code_reusable_after_delete() {
        let service = empty_service();
        service
            .shorten(Some("https://one.example"), Some("again"))
            .await
            .unwrap();
        service.delete("again").await.unwrap();
        let result = service
            .shorten(Some("https://two.example"), Some("again"))
            .await
            .unwrap();
        assert_eq!(result.record.original, "https://two.example");
    }
}

// =============================================================================
// Cleanup
// =============================================================================

mod cleanup_tests {
    use super::*;

    #[tokio::test]
    async fn test_cleanup_threshold() {
        let service = service_with(database(vec![
            seeded("old", "https://old.example", 200, 3, Some(91)),
            seeded("recent", "https://recent.example", 200, 3, Some(89)),
            seeded("never", "https://never.example", 120, 0, None),
            seeded("fresh", "https://fresh.example", 10, 0, None),
        ]));

        let result = service.cleanup(Some(90)).await.unwrap();
        assert_eq!(result.deleted, 2);

        let expected_cutoff = Utc::now() - Duration::days(90);
        assert!((result.cutoff - expected_cutoff).num_seconds().abs() < 5);

        let snapshot = service.store().snapshot().await;
        let mut remaining: Vec<&String> = snapshot.urls.keys().collect();
        remaining.sort();
        assert_eq!(remaining, vec!["fresh", "recent"]);
        assert_eq!(snapshot.stats.len(), 2);
    }

    #[tokio::test]
    async fn test_cleanup_defaults_to_configured_days() {
        let service = service_with(database(vec![
            seeded("old", "https://old.example", 200, 1, Some(91)),
            seeded("recent", "https://recent.example", 200, 1, Some(89)),
        ]));

        let result = service.cleanup(None).await.unwrap();
        assert_eq!(result.deleted, 1);
        assert_eq!(service.count().await, 1);
    }

    #[tokio::test]
    async fn test_cleanup_is_strict() {
        let (record, stats) = seeded("edge", "https://edge.example", 10, 1, Some(5));
        let cutoff = stats.last_access.unwrap();
        let service = service_with(database(vec![(record, stats)]));

        let result = service.cleanup_before(cutoff).await.unwrap();
        assert_eq!(result.deleted, 0);
        assert_eq!(result.cutoff, cutoff);
    }

    #[tokio::test]
    async fn test_cleanup_nothing_to_do() {
        let service = empty_service();
        let result = service.cleanup(Some(1)).await.unwrap();
        assert_eq!(result.deleted, 0);
    }

    #[tokio::test]
    async fn test_cleanup_zero_days_removes_idle_links() {
        let service = service_with(database(vec![
            seeded("a", "https://a.example", 5, 1, Some(1)),
            seeded("b", "https://b.example", 2, 0, None),
        ]));

        let result = service.cleanup(Some(0)).await.unwrap();
        assert_eq!(result.deleted, 2);
        assert_eq!(service.count().await, 0);
    }

    #[tokio::test]
    async fn test_cleanup_days_out_of_range() {
        let service = service_with(database(vec![seeded(
            "keep",
            "https://keep.example",
            200,
            1,
            Some(150),
        )]));

        for days in [100_000_000, u32::MAX] {
            let err = service.cleanup(Some(days)).await.unwrap_err();
            assert!(
                matches!(err, TinylinkError::Validation(ref m) if m == "days out of range"),
                "{} days",
                days
            );
        }
        assert_eq!(service.count().await, 1);
    }
}

// =============================================================================
// Options
// =============================================================================

mod options_tests {
    use super::*;
    use tinylink::config::StaticConfig;
    use tinylink::utils::MAX_SHORT_CODE_LENGTH;

    #[tokio::test]
    async fn test_code_length_clamped_to_valid_range() {
        let mut config = StaticConfig::default();
        config.features.random_code_length = 200;
        let options = LinkServiceOptions::from_config(&config);
        assert_eq!(options.random_code_length, MAX_SHORT_CODE_LENGTH);

        let store = Arc::new(LinkStore::with_database(
            Database::default(),
            Arc::new(NullPersister),
        ));
        let service = LinkService::new(store, options);
        let result = service
            .shorten(Some("https://example.com"), None)
            .await
            .unwrap();
        assert!(is_valid_short_code(&result.record.short_code));
        assert_eq!(
            service
                .record_click(&result.record.short_code, None)
                .await
                .unwrap(),
            "https://example.com"
        );

        config.features.random_code_length = 0;
        assert_eq!(LinkServiceOptions::from_config(&config).random_code_length, 1);
    }
}

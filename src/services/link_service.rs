//! Link service
//!
//! Business logic for shortening, redirecting, statistics and cleanup,
//! shared by the HTTP handlers and the CLI.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, trace, warn};

use crate::config::StaticConfig;
use crate::errors::{Result, TinylinkError};
use crate::storage::models::now_millis;
use crate::storage::{LinkStore, StatsRecord, UrlRecord};
use crate::utils::url_validator::validate_url;
use crate::utils::{MAX_SHORT_CODE_LENGTH, generate_random_code, is_valid_short_code};

/// Referrer bucket used when the client sends none
pub const DIRECT_REFERRER: &str = "Direct";

/// Length of the random suffix offered with a custom code conflict
const SUGGESTION_SUFFIX_LENGTH: usize = 3;

// ============ Options & Results ============

#[derive(Debug, Clone)]
pub struct LinkServiceOptions {
    /// Prefix of generated short URLs, without trailing slash
    pub base_url: String,
    pub random_code_length: usize,
    pub max_generate_attempts: usize,
    /// Retention window used when cleanup is called without one
    pub cleanup_days: u32,
}

impl Default for LinkServiceOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            random_code_length: 7,
            max_generate_attempts: 5,
            cleanup_days: 90,
        }
    }
}

impl LinkServiceOptions {
    pub fn from_config(config: &StaticConfig) -> Self {
        Self {
            base_url: config.server.effective_base_url(),
            random_code_length: config
                .features
                .random_code_length
                .clamp(1, MAX_SHORT_CODE_LENGTH),
            max_generate_attempts: config.features.max_generate_attempts.max(1),
            cleanup_days: config.storage.cleanup_days,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShortenResult {
    pub record: UrlRecord,
    pub short_url: String,
}

#[derive(Debug, Clone)]
pub struct LinkStats {
    pub record: UrlRecord,
    pub short_url: String,
    pub stats: StatsRecord,
    /// `"None"` until the first click
    pub top_referrer: String,
}

#[derive(Debug, Clone)]
pub struct LinkSummary {
    pub record: UrlRecord,
    pub short_url: String,
    pub clicks: u64,
}

#[derive(Debug, Clone)]
pub struct CleanupResult {
    pub deleted: usize,
    pub cutoff: DateTime<Utc>,
}

// ============ LinkService Implementation ============

pub struct LinkService {
    store: Arc<LinkStore>,
    options: LinkServiceOptions,
}

impl LinkService {
    pub fn new(store: Arc<LinkStore>, options: LinkServiceOptions) -> Self {
        Self { store, options }
    }

    pub fn store(&self) -> &Arc<LinkStore> {
        &self.store
    }

    pub fn options(&self) -> &LinkServiceOptions {
        &self.options
    }

    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.options.base_url, code)
    }

    /// Create a short link for `url`, using `custom_code` when given.
    ///
    /// An empty custom code counts as absent.
    pub async fn shorten(
        &self,
        url: Option<&str>,
        custom_code: Option<&str>,
    ) -> Result<ShortenResult> {
        let url = url.unwrap_or_default();
        if url.is_empty() {
            return Err(TinylinkError::validation("URL is required"));
        }
        validate_url(url).map_err(|e| {
            trace!("Rejected URL {:?}: {}", url, e);
            TinylinkError::validation("Invalid URL")
        })?;

        let custom_code = custom_code.filter(|c| !c.is_empty());
        let code_length = self.options.random_code_length;
        let max_attempts = self.options.max_generate_attempts.max(1);

        let record = self
            .store
            .mutate(|db| {
                let code = match custom_code {
                    Some(code) => {
                        if db.contains(code) {
                            return Err(TinylinkError::conflict(
                                "Custom code is already in use",
                                format!(
                                    "{}-{}",
                                    code,
                                    generate_random_code(SUGGESTION_SUFFIX_LENGTH)
                                ),
                            ));
                        }
                        if !is_valid_short_code(code) {
                            return Err(TinylinkError::validation(
                                "Custom code may only contain letters, numbers, _ and -",
                            ));
                        }
                        code.to_string()
                    }
                    None => {
                        let mut attempt = 0;
                        loop {
                            attempt += 1;
                            let candidate = generate_random_code(code_length);
                            if !db.contains(&candidate) {
                                break candidate;
                            }
                            warn!(
                                "Generated short code {} collided (attempt {}/{})",
                                candidate, attempt, max_attempts
                            );
                            if attempt >= max_attempts {
                                return Err(TinylinkError::internal(format!(
                                    "Could not generate a unique short code after {} attempts",
                                    max_attempts
                                )));
                            }
                        }
                    }
                };

                let record = UrlRecord {
                    original: url.to_string(),
                    created: now_millis(),
                    short_code: code,
                };
                db.insert_pair(record.clone());
                Ok(record)
            })
            .await?;

        info!("Shortened {} -> {}", record.short_code, record.original);
        Ok(ShortenResult {
            short_url: self.short_url(&record.short_code),
            record,
        })
    }

    /// Count a visit and return the URL to redirect to
    pub async fn record_click(&self, code: &str, referrer: Option<&str>) -> Result<String> {
        let referrer = referrer
            .filter(|r| !r.is_empty())
            .unwrap_or(DIRECT_REFERRER);

        self.store
            .mutate(|db| {
                let original = match db.urls.get(code) {
                    Some(record) => record.original.clone(),
                    None => return Err(not_found(code)),
                };
                db.stats
                    .entry(code.to_string())
                    .or_default()
                    .record_click(referrer, now_millis());
                trace!("Click on {} from {}", code, referrer);
                Ok(original)
            })
            .await
    }

    pub async fn get_stats(&self, code: &str) -> Result<LinkStats> {
        let (record, stats) = self
            .store
            .read(|db| {
                let record = db.urls.get(code).cloned()?;
                let stats = db.stats.get(code).cloned().unwrap_or_default();
                Some((record, stats))
            })
            .await
            .ok_or_else(|| not_found(code))?;

        let top_referrer = stats.top_referrer().unwrap_or("None").to_string();
        Ok(LinkStats {
            short_url: self.short_url(code),
            record,
            stats,
            top_referrer,
        })
    }

    /// All links, most clicked first; ties in creation order
    pub async fn list(&self) -> Vec<LinkSummary> {
        let mut links: Vec<LinkSummary> = self
            .store
            .read(|db| {
                db.urls
                    .iter()
                    .map(|(code, record)| LinkSummary {
                        record: record.clone(),
                        short_url: self.short_url(code),
                        clicks: db.stats.get(code).map(|s| s.clicks).unwrap_or(0),
                    })
                    .collect()
            })
            .await;

        links.sort_by(|a, b| {
            b.clicks
                .cmp(&a.clicks)
                .then_with(|| a.record.created.cmp(&b.record.created))
                .then_with(|| a.record.short_code.cmp(&b.record.short_code))
        });
        links
    }

    pub async fn delete(&self, code: &str) -> Result<UrlRecord> {
        let removed = self
            .store
            .mutate(|db| db.remove_pair(code).ok_or_else(|| not_found(code)))
            .await?;
        info!("Deleted short link {}", code);
        Ok(removed)
    }

    /// Remove links idle for longer than `days` (configured default when `None`)
    pub async fn cleanup(&self, days: Option<u32>) -> Result<CleanupResult> {
        let days = days.unwrap_or(self.options.cleanup_days);
        let cutoff = Duration::try_days(i64::from(days))
            .and_then(|window| now_millis().checked_sub_signed(window))
            .ok_or_else(|| TinylinkError::validation("days out of range"))?;
        self.cleanup_before(cutoff).await
    }

    /// Remove every link whose last activity is strictly before `cutoff`
    pub async fn cleanup_before(&self, cutoff: DateTime<Utc>) -> Result<CleanupResult> {
        let result = self
            .store
            .mutate(|db| {
                let expired: Vec<String> = db
                    .urls
                    .iter()
                    .filter(|(code, record)| {
                        let last = db
                            .stats
                            .get(*code)
                            .map(|s| s.last_activity(record.created))
                            .unwrap_or(record.created);
                        last < cutoff
                    })
                    .map(|(code, _)| code.clone())
                    .collect();

                for code in &expired {
                    debug!("Cleanup removing {}", code);
                    db.remove_pair(code);
                }

                Ok(CleanupResult {
                    deleted: expired.len(),
                    cutoff,
                })
            })
            .await?;

        info!(
            "Cleanup removed {} links idle since before {}",
            result.deleted, cutoff
        );
        Ok(result)
    }

    pub async fn count(&self) -> usize {
        self.store.len().await
    }
}

fn not_found(code: &str) -> TinylinkError {
    TinylinkError::not_found(format!("URL not found: {}", code))
}

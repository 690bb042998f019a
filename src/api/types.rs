//! API 请求与响应类型
//!
//! Field names are camelCase on the wire.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::services::{CleanupResult, LinkStats, LinkSummary, ShortenResult};
use crate::storage::models::iso_millis;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub custom_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub success: bool,
    pub original: String,
    pub short_url: String,
    pub short_code: String,
    pub created: String,
}

impl From<ShortenResult> for ShortenResponse {
    fn from(result: ShortenResult) -> Self {
        Self {
            success: true,
            created: iso_millis::format(&result.record.created),
            original: result.record.original,
            short_url: result.short_url,
            short_code: result.record.short_code,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_clicks: u64,
    pub last_access: Option<String>,
    pub referrers: BTreeMap<String, u64>,
    pub top_referrer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub short_code: String,
    pub original: String,
    pub short_url: String,
    pub created: String,
    pub statistics: Statistics,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            created: iso_millis::format(&stats.record.created),
            short_code: stats.record.short_code,
            original: stats.record.original,
            short_url: stats.short_url,
            statistics: Statistics {
                total_clicks: stats.stats.clicks,
                last_access: stats.stats.last_access.as_ref().map(iso_millis::format),
                referrers: stats.stats.referrers,
                top_referrer: stats.top_referrer,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub short_code: String,
    pub original: String,
    pub short_url: String,
    pub created: String,
    pub clicks: u64,
}

impl From<LinkSummary> for ListItem {
    fn from(summary: LinkSummary) -> Self {
        Self {
            created: iso_millis::format(&summary.record.created),
            short_code: summary.record.short_code,
            original: summary.record.original,
            short_url: summary.short_url,
            clicks: summary.clicks,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub total: usize,
    pub urls: Vec<ListItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
    pub short_code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CleanupQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResponse {
    pub success: bool,
    pub message: String,
    pub deleted: usize,
    pub cutoff_date: String,
}

impl From<CleanupResult> for CleanupResponse {
    fn from(result: CleanupResult) -> Self {
        Self {
            success: true,
            message: format!("{} old URLs were removed", result.deleted),
            deleted: result.deleted,
            cutoff_date: iso_millis::format(&result.cutoff),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub total_urls: usize,
    pub storage_backend: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<String>,
}

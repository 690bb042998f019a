use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Current time, truncated so it survives a save/load cycle unchanged
#[inline]
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    pub original: String,
    #[serde(with = "iso_millis")]
    pub created: DateTime<Utc>,
    pub short_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    #[serde(default)]
    pub clicks: u64,
    #[serde(default, with = "iso_millis::option")]
    pub last_access: Option<DateTime<Utc>>,
    #[serde(default)]
    pub referrers: BTreeMap<String, u64>,
}

impl StatsRecord {
    /// 记录一次访问
    pub fn record_click(&mut self, referrer: &str, at: DateTime<Utc>) {
        self.clicks += 1;
        // 时钟回拨时不让 lastAccess 倒退
        self.last_access = Some(match self.last_access {
            Some(prev) if prev > at => prev,
            _ => at,
        });
        *self.referrers.entry(referrer.to_string()).or_insert(0) += 1;
    }

    /// Referrer with the highest count; ties go to the first name in order
    pub fn top_referrer(&self) -> Option<&str> {
        self.referrers
            .iter()
            .fold(None, |best: Option<(&String, u64)>, (name, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((name, count)),
            })
            .map(|(name, _)| name.as_str())
    }

    /// Last activity used for retention: last access, or creation if never accessed
    pub fn last_activity(&self, created: DateTime<Utc>) -> DateTime<Utc> {
        self.last_access.unwrap_or(created)
    }
}

/// The persisted document: `{"urls": {...}, "stats": {...}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub urls: HashMap<String, UrlRecord>,
    #[serde(default)]
    pub stats: HashMap<String, StatsRecord>,
}

impl Database {
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.urls.contains_key(code)
    }

    /// Insert a URL record together with fresh stats
    pub fn insert_pair(&mut self, record: UrlRecord) {
        let code = record.short_code.clone();
        self.stats.insert(code.clone(), StatsRecord::default());
        self.urls.insert(code, record);
    }

    /// Remove both records for a code; returns the URL record if it existed
    pub fn remove_pair(&mut self, code: &str) -> Option<UrlRecord> {
        self.stats.remove(code);
        self.urls.remove(code)
    }

    /// Restore the one-to-one pairing between `urls` and `stats`.
    ///
    /// Returns `(stats_created, stats_dropped)`.
    pub fn repair_pairs(&mut self) -> (usize, usize) {
        let mut created = 0;
        for (code, record) in self.urls.iter_mut() {
            // 旧数据里 shortCode 可能与键不一致，以键为准
            if record.short_code != *code {
                record.short_code = code.clone();
            }
            if !self.stats.contains_key(code) {
                self.stats.insert(code.clone(), StatsRecord::default());
                created += 1;
            }
        }

        let before = self.stats.len();
        let urls = &self.urls;
        self.stats.retain(|code, _| urls.contains_key(code));
        let dropped = before - self.stats.len();

        (created, dropped)
    }
}

/// Serde helpers for `2025-01-31T12:00:00.000Z` timestamps
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(dt: &DateTime<Utc>) -> String {
        dt.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            dt: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => serializer.serialize_str(&super::format(dt)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let s: Option<String> = Option::deserialize(deserializer)?;
            s.map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
        }
    }
}

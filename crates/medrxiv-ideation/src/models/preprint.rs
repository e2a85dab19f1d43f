//! Preprint data model matching the bioRxiv/medRxiv details API.

use chrono::{Days, NaiveDate};
use serde::Deserialize;

use crate::error::ConfigError;

/// A preprint as returned by the details endpoint.
///
/// The title is the identity used by the ledger. `max_author_influence` is never
/// decoded; the reputation ranker fills it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaperRecord {
    /// Paper title.
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub title: String,

    /// Raw abstract text.
    #[serde(rename = "abstract", default, deserialize_with = "lenient::string_or_empty")]
    pub abstract_text: String,

    /// DOI without the resolver prefix.
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub doi: String,

    /// Posting date (YYYY-MM-DD).
    #[serde(rename = "date", default, deserialize_with = "lenient::string_or_empty")]
    pub publication_date: String,

    /// Subject category (e.g., "epidemiology").
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub category: String,

    /// Author names in byline order.
    #[serde(rename = "authors", default, deserialize_with = "lenient::author_list")]
    pub author_names: Vec<String>,

    /// Preprint version.
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub version: u32,

    /// Highest qualifying author h-index, set by the ranker.
    #[serde(skip)]
    pub max_author_influence: Option<i32>,
}

impl PaperRecord {
    /// Ledger identity: the trimmed title, if any.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        let title = self.title.trim();
        (!title.is_empty()).then_some(title)
    }

    /// Get the DOI if it is not blank.
    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        let doi = self.doi.trim();
        (!doi.is_empty()).then_some(doi)
    }

    /// Link to the versioned full text on medRxiv.
    #[must_use]
    pub fn article_url(&self) -> String {
        format!("https://www.medrxiv.org/content/{}v{}", self.doi.trim(), self.version)
    }
}

/// One page of the details endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailsPage {
    /// Records on this page.
    #[serde(default)]
    pub collection: Vec<PaperRecord>,

    /// Status messages; the first one carries pagination.
    #[serde(default)]
    pub messages: Vec<PageMessage>,
}

impl DetailsPage {
    /// Pagination descriptor, present only when the first message has both
    /// `total` and `cursor`.
    #[must_use]
    pub fn pagination(&self) -> Option<Pagination> {
        let message = self.messages.first()?;
        Some(Pagination { total: message.total?, cursor: message.cursor? })
    }
}

/// Status message attached to a details page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMessage {
    /// "ok" or a description such as "no posts found".
    #[serde(default)]
    pub status: Option<String>,

    /// Offset of the page just returned.
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub cursor: Option<u64>,

    /// Records on the page.
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub count: Option<u64>,

    /// Records available for the whole interval.
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub total: Option<u64>,
}

/// Pagination descriptor of a details page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Records available for the interval.
    pub total: u64,
    /// Offset of the page just returned.
    pub cursor: u64,
}

/// Position in a paginated interval fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchCursor {
    /// Offset appended to the next request path.
    pub offset: u64,
    /// Total reported by the source, unknown until the first page.
    pub total: Option<u64>,
}

impl FetchCursor {
    /// Cursor for the first page of an interval.
    #[must_use]
    pub const fn start() -> Self {
        Self { offset: 0, total: None }
    }

    /// Cursor for the page after `page`, or `None` when the interval is exhausted.
    ///
    /// Stops on an empty page, a missing pagination descriptor, once
    /// `cursor + received >= total`, or if the source would send us backwards.
    #[must_use]
    pub fn advance(self, page: &DetailsPage) -> Option<Self> {
        let received = page.collection.len() as u64;
        if received == 0 {
            return None;
        }
        let pagination = page.pagination()?;
        let next = pagination.cursor.saturating_add(received);
        if next >= pagination.total || next <= self.offset {
            return None;
        }
        Some(Self { offset: next, total: Some(pagination.total) })
    }
}

/// Inclusive posting-date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day.
    pub start: NaiveDate,
    /// Last day.
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ConfigError> {
        if start > end {
            return Err(ConfigError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Fill in missing bounds: `end` defaults to `today`, `start` to
    /// `lookback_days` before `end`.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        lookback_days: u32,
        today: NaiveDate,
    ) -> Result<Self, ConfigError> {
        let end = end.unwrap_or(today);
        let start = start.unwrap_or_else(|| {
            end.checked_sub_days(Days::new(u64::from(lookback_days))).unwrap_or(NaiveDate::MIN)
        });
        Self::new(start, end)
    }

    /// Parse a YYYY-MM-DD date.
    pub fn parse_date(value: &str) -> Result<NaiveDate, ConfigError> {
        let value = value.trim();
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|source| ConfigError::InvalidDate { value: value.to_string(), source })
    }

    /// Parse a prompted date where a blank answer means "use the default".
    pub fn parse_optional(value: &str) -> Result<Option<NaiveDate>, ConfigError> {
        if value.trim().is_empty() { Ok(None) } else { Self::parse_date(value).map(Some) }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.start.format("%Y-%m-%d"), self.end.format("%Y-%m-%d"))
    }
}

/// The details API is loose with types: counters and versions arrive as numbers
/// or numeric strings, text fields are sometimes `null`, and authors come as one
/// `;`-separated string.
mod lenient {
    use serde::Deserialize;
    use serde::de::{self, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numeric {
        Int(u64),
        Text(String),
    }

    impl Numeric {
        fn value<E: de::Error>(self) -> Result<u64, E> {
            match self {
                Self::Int(n) => Ok(n),
                Self::Text(s) => s
                    .trim()
                    .parse()
                    .map_err(|_| E::custom(format!("expected a number, got '{s}'"))),
            }
        }
    }

    pub fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Numeric>::deserialize(deserializer)?.map(Numeric::value::<D::Error>).transpose()
    }

    pub fn u32_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let n = opt_u64(deserializer)?.unwrap_or(0);
        u32::try_from(n).map_err(de::Error::custom)
    }

    pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn author_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(raw.split(';').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect())
    }
}

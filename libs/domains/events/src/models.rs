//! Event domain models

use chrono::{DateTime, Utc};
use mongodb::bson::{self, Bson, Document, oid::ObjectId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{EventError, EventResult};

/// Value of the `type` field on every stored event.
pub const EVENT_TYPE: &str = "event";

/// Page number used when `page` is absent, non-numeric or zero.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when `limit` is absent, non-numeric or zero.
pub const DEFAULT_LIMIT: u64 = 5;

/// Convert chrono DateTime to BSON DateTime
pub(crate) fn to_bson_datetime(dt: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

/// A well-formed store identifier.
///
/// Parsing is the only way to obtain one from caller input, so a malformed
/// identifier is rejected before any query reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId(ObjectId);

impl EventId {
    /// Parse a 24-character hex string.
    pub fn parse(raw: &str) -> EventResult<Self> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| EventError::InvalidId)
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for EventId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// Event document as written at creation time.
///
/// `_id` is left to the store. Field names match the stored document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub uid: Option<String>,
    pub name: String,
    pub tagline: String,
    pub schedule: Bson,
    pub description: String,
    pub moderator: String,
    pub category: String,
    pub sub_category: Option<String>,
    pub rigor_rank: i64,
    pub attendees: Vec<Bson>,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
}

impl Event {
    /// Validate `input` and build the document to insert.
    ///
    /// Fails with [`EventError::MissingFields`] if any required field is
    /// absent or falsy.
    pub fn from_create(input: CreateEvent, now: DateTime<Utc>) -> EventResult<Self> {
        input.validate()?;

        let schedule = match input.schedule {
            Some(schedule) if is_truthy(&schedule) => bson::to_bson(&schedule)?,
            _ => return Err(EventError::MissingFields),
        };

        Ok(Self {
            kind: EVENT_TYPE.to_string(),
            uid: input.uid.filter(|uid| !uid.is_empty()),
            name: input.name.unwrap_or_default(),
            tagline: input.tagline.unwrap_or_default(),
            schedule,
            description: input.description.unwrap_or_default(),
            moderator: input.moderator.unwrap_or_default(),
            category: input.category.unwrap_or_default(),
            sub_category: input.sub_category,
            rigor_rank: coerce_rigor_rank(input.rigor_rank.as_ref()),
            attendees: Vec::new(),
            created_at: to_bson_datetime(now),
        })
    }
}

/// DTO for creating new events (JSON or url-encoded form)
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,

    #[validate(required, length(min = 1))]
    pub tagline: Option<String>,

    /// Timing information, stored as given
    #[validate(required)]
    #[schema(value_type = Object)]
    pub schedule: Option<Value>,

    #[validate(required, length(min = 1))]
    pub description: Option<String>,

    #[validate(required, length(min = 1))]
    pub moderator: Option<String>,

    #[validate(required, length(min = 1))]
    pub category: Option<String>,

    /// Owner/creator identifier
    pub uid: Option<String>,

    pub sub_category: Option<String>,

    /// Integer or numeric string; anything else counts as 0
    #[schema(value_type = Option<Object>)]
    pub rigor_rank: Option<Value>,
}

/// Caller-supplied field set for a partial update.
///
/// Fields are passed through without a whitelist; `updatedAt` is always
/// stamped by the server and wins over any caller value.
#[derive(Debug, Clone, PartialEq)]
pub struct EventUpdate {
    changes: Document,
    updated_at: bson::DateTime,
}

impl EventUpdate {
    pub fn from_fields(fields: Map<String, Value>, now: DateTime<Utc>) -> EventResult<Self> {
        Ok(Self {
            changes: bson::to_document(&fields)?,
            updated_at: to_bson_datetime(now),
        })
    }

    /// Contents of the `$set` operator.
    pub fn set_document(&self) -> Document {
        let mut set = self.changes.clone();
        set.insert("updatedAt", self.updated_at);
        set
    }
}

/// Query string of `GET /events`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventQuery {
    /// Look up a single event by identifier
    pub id: Option<String>,

    /// `latest` selects list mode
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// 1-based page number (default 1)
    pub page: Option<String>,

    /// Page size (default 5)
    pub limit: Option<String>,
}

/// What a `GET /events` request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Lookup(EventId),
    Latest(PageRequest),
}

impl EventQuery {
    /// Lookup takes precedence over list mode; an empty `id` counts as absent.
    pub fn mode(&self) -> EventResult<QueryMode> {
        if let Some(id) = self.id.as_deref().filter(|id| !id.is_empty()) {
            return EventId::parse(id).map(QueryMode::Lookup);
        }

        if self.kind.as_deref() == Some("latest") {
            let page = PageRequest::parse(self.page.as_deref(), self.limit.as_deref())?;
            return Ok(QueryMode::Latest(page));
        }

        Err(EventError::InvalidQuery)
    }
}

/// Page position for list mode. `page` and `limit` are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> EventResult<Self> {
        if page == 0 || limit == 0 {
            return Err(EventError::InvalidQuery);
        }
        Ok(Self { page, limit })
    }

    /// Parse raw query values; absent, non-numeric or zero values fall back
    /// to the defaults and negative values are rejected.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> EventResult<Self> {
        Self::new(
            parse_count(page, DEFAULT_PAGE)?,
            parse_count(limit, DEFAULT_LIMIT)?,
        )
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of documents to skip: `(page - 1) * limit`, saturating at
    /// `u64::MAX` for pages no collection could reach.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

fn parse_count(raw: Option<&str>, default: u64) -> EventResult<u64> {
    match raw.and_then(parse_leading_int) {
        None | Some(0) => Ok(default),
        Some(n) if n < 0 => Err(EventError::InvalidQuery),
        Some(n) => Ok(n as u64),
    }
}

/// Page envelope returned by list mode
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventPage {
    #[schema(value_type = Vec<Object>)]
    pub events: Vec<Value>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// Body of a successful create
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventCreated {
    pub message: String,
    pub event_id: String,
}

/// Body of a successful update or delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parse the leading integer of `raw`: optional whitespace, an optional sign,
/// then decimal digits. Trailing characters are ignored. Returns `None` when
/// there are no digits or the value does not fit in an `i64`.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// `rigor_rank` coercion: integers pass through, fractional numbers are
/// truncated, strings use [`parse_leading_int`], everything else is 0.
pub fn coerce_rigor_rank(raw: Option<&Value>) -> i64 {
    match raw {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            })
            .unwrap_or(0),
        Some(Value::String(s)) => parse_leading_int(s).unwrap_or(0),
        _ => 0,
    }
}

/// Falsy JSON values: `null`, `false`, `0`, and the empty string.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

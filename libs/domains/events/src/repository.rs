//! Event repository trait

use async_trait::async_trait;
use mongodb::bson::Document;

use crate::error::EventResult;
use crate::models::{Event, EventId, EventUpdate, PageRequest};

/// Storage operations over the events collection.
///
/// Reads return raw documents: updates may add arbitrary fields, so stored
/// events are not guaranteed to match [`Event`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Get event by ID
    async fn find_by_id(&self, id: &EventId) -> EventResult<Option<Document>>;

    /// All events, newest identifier first, windowed by `page`
    async fn find_page(&self, page: &PageRequest) -> EventResult<Vec<Document>>;

    /// Total number of events, ignoring pagination
    async fn count(&self) -> EventResult<u64>;

    /// Store a new event and return the identifier assigned by the store
    async fn insert(&self, event: &Event) -> EventResult<EventId>;

    /// Merge `update` into the event; `false` if nothing matched
    async fn update(&self, id: &EventId, update: &EventUpdate) -> EventResult<bool>;

    /// Delete event by ID; `false` if nothing matched
    async fn delete(&self, id: &EventId) -> EventResult<bool>;
}

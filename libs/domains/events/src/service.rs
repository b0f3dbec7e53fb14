//! Event service layer

use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::document;
use crate::error::{EventError, EventResult};
use crate::models::{CreateEvent, Event, EventId, EventPage, EventUpdate, PageRequest};
use crate::repository::EventRepository;

/// Event service coordinating validation and storage
///
/// The repository is injected at construction so handlers can be exercised
/// against any [`EventRepository`].
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Get an event by ID, projected to JSON
    #[instrument(skip(self), fields(event_id = %id))]
    pub async fn get_event(&self, id: &EventId) -> EventResult<Value> {
        self.repository
            .find_by_id(id)
            .await?
            .map(document::to_json)
            .ok_or(EventError::NotFound)
    }

    /// Newest events first, with pagination metadata.
    ///
    /// The count and the page are two separate reads; under concurrent writes
    /// `total` may not match the returned page exactly.
    #[instrument(skip(self), fields(page = page.page(), limit = page.limit()))]
    pub async fn list_latest(&self, page: PageRequest) -> EventResult<EventPage> {
        let documents = self.repository.find_page(&page).await?;
        let total = self.repository.count().await?;

        Ok(EventPage {
            events: documents.into_iter().map(document::to_json).collect(),
            page: page.page(),
            limit: page.limit(),
            total,
            total_pages: page.total_pages(total),
        })
    }

    /// Validate and store a new event
    #[instrument(skip(self, input))]
    pub async fn create_event(&self, input: CreateEvent) -> EventResult<EventId> {
        let event = Event::from_create(input, Utc::now())?;
        let id = self.repository.insert(&event).await?;
        info!(event_id = %id, "Event created");
        Ok(id)
    }

    /// Merge `fields` into an existing event and stamp `updatedAt`
    #[instrument(skip(self, fields), fields(event_id = %id, field_count = fields.len()))]
    pub async fn update_event(&self, id: &EventId, fields: Map<String, Value>) -> EventResult<()> {
        let update = EventUpdate::from_fields(fields, Utc::now())?;

        if !self.repository.update(id, &update).await? {
            return Err(EventError::NotFound);
        }
        info!(event_id = %id, "Event updated");
        Ok(())
    }

    /// Hard-delete an event
    #[instrument(skip(self), fields(event_id = %id))]
    pub async fn delete_event(&self, id: &EventId) -> EventResult<()> {
        if !self.repository.delete(id).await? {
            return Err(EventError::NotFound);
        }
        info!(event_id = %id, "Event deleted");
        Ok(())
    }
}

//! MongoDB implementation of EventRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::{Collection, Database};
use tracing::{info, instrument};

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventId, EventUpdate, PageRequest};
use crate::repository::EventRepository;

/// Fixed collection holding every event.
pub const COLLECTION_NAME: &str = "events";

/// MongoDB-based event repository
///
/// Cloning is cheap; clones share the driver's connection pool.
#[derive(Clone)]
pub struct MongoEventRepository {
    collection: Collection<Document>,
}

impl MongoEventRepository {
    /// Create a repository over the `events` collection of `database`
    ///
    /// # Example
    /// ```ignore
    /// let client = database::mongodb::connect_from_config(&config).await?;
    /// let repo = MongoEventRepository::new(&client.database(config.database()));
    /// ```
    pub fn new(database: &Database) -> Self {
        Self::with_collection(database, COLLECTION_NAME)
    }

    /// Create a repository over a custom collection name
    pub fn with_collection(database: &Database, collection_name: &str) -> Self {
        Self {
            collection: database.collection(collection_name),
        }
    }

    fn id_filter(id: &EventId) -> Document {
        doc! { "_id": id.object_id() }
    }

    /// `skip` and `limit` as the server accepts them (both sent as int64).
    /// `None` when the skip is past anything a collection can hold.
    fn window(page: &PageRequest) -> Option<(u64, i64)> {
        let skip = page.skip();
        i64::try_from(skip).ok()?;
        let limit = i64::try_from(page.limit()).unwrap_or(i64::MAX);
        Some((skip, limit))
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self), fields(event_id = %id))]
    async fn find_by_id(&self, id: &EventId) -> EventResult<Option<Document>> {
        let event = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(event)
    }

    #[instrument(skip(self), fields(page = page.page(), limit = page.limit()))]
    async fn find_page(&self, page: &PageRequest) -> EventResult<Vec<Document>> {
        let Some((skip, limit)) = Self::window(page) else {
            return Ok(Vec::new());
        };

        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": -1 })
            .skip(skip)
            .limit(limit)
            .await?;
        let events: Vec<Document> = cursor.try_collect().await?;
        Ok(events)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> EventResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }

    #[instrument(skip(self, event), fields(event_name = %event.name))]
    async fn insert(&self, event: &Event) -> EventResult<EventId> {
        let document = bson::to_document(event)?;
        let result = self.collection.insert_one(document).await?;

        match result.inserted_id {
            Bson::ObjectId(oid) => {
                info!(event_id = %oid, "Event inserted");
                Ok(EventId::from(oid))
            }
            other => Err(EventError::Database(format!(
                "Unexpected inserted id: {}",
                other
            ))),
        }
    }

    #[instrument(skip(self, update), fields(event_id = %id))]
    async fn update(&self, id: &EventId, update: &EventUpdate) -> EventResult<bool> {
        let result = self
            .collection
            .update_one(Self::id_filter(id), doc! { "$set": update.set_document() })
            .await?;
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self), fields(event_id = %id))]
    async fn delete(&self, id: &EventId) -> EventResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}

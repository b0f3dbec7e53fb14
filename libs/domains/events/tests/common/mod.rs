//! In-memory repository for handler tests.

use async_trait::async_trait;
use axum::Router;
use domain_events::{
    Event, EventId, EventRepository, EventResult, EventService, EventUpdate, PageRequest,
    events_router,
};
use mongodb::bson::{self, Document, oid::ObjectId};
use std::sync::{Arc, Mutex};

/// Keeps documents in insertion order; ids come from `ObjectId::new()`, so
/// they increase with every insert like the server-assigned ones do.
#[derive(Clone, Default)]
pub struct InMemoryEventRepository {
    documents: Arc<Mutex<Vec<Document>>>,
}

impl InMemoryEventRepository {
    pub fn len(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    fn position(documents: &[Document], id: &EventId) -> Option<usize> {
        documents
            .iter()
            .position(|doc| doc.get_object_id("_id").ok() == Some(id.object_id()))
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn find_by_id(&self, id: &EventId) -> EventResult<Option<Document>> {
        let documents = self.documents.lock().unwrap();
        Ok(Self::position(&documents, id).map(|i| documents[i].clone()))
    }

    async fn find_page(&self, page: &PageRequest) -> EventResult<Vec<Document>> {
        let mut documents = self.documents.lock().unwrap().clone();
        documents.sort_by_key(|doc| std::cmp::Reverse(doc.get_object_id("_id").ok()));
        Ok(documents
            .into_iter()
            .skip(page.skip() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn count(&self) -> EventResult<u64> {
        Ok(self.documents.lock().unwrap().len() as u64)
    }

    async fn insert(&self, event: &Event) -> EventResult<EventId> {
        let id = ObjectId::new();
        let mut document = Document::new();
        document.insert("_id", id);
        document.extend(bson::to_document(event).unwrap());
        self.documents.lock().unwrap().push(document);
        Ok(EventId::from(id))
    }

    async fn update(&self, id: &EventId, update: &EventUpdate) -> EventResult<bool> {
        let mut documents = self.documents.lock().unwrap();
        let Some(i) = Self::position(&documents, id) else {
            return Ok(false);
        };
        documents[i].extend(update.set_document());
        Ok(true)
    }

    async fn delete(&self, id: &EventId) -> EventResult<bool> {
        let mut documents = self.documents.lock().unwrap();
        let Some(i) = Self::position(&documents, id) else {
            return Ok(false);
        };
        documents.remove(i);
        Ok(true)
    }
}

/// Events router over a fresh in-memory store, plus a handle on that store.
pub fn test_app() -> (Router, InMemoryEventRepository) {
    let repo = InMemoryEventRepository::default();
    let service = EventService::new(repo.clone());
    let app = events_router::<InMemoryEventRepository>().with_state(Arc::new(service));
    (app, repo)
}

//! Events Domain
//!
//! CRUD over event documents stored in MongoDB, plus a paginated listing of
//! the newest events.
//!
//! ```text
//! HTTP ─► handlers ─► EventService ─► EventRepository ─► MongoDB (events)
//! ```
//!
//! Stored documents are returned as-is: updates merge arbitrary fields, so
//! reads go through [`document::to_json`] rather than a typed model.

use utoipa::OpenApi;

pub mod document;
mod error;
mod handlers;
mod models;
mod mongodb;
mod repository;
mod service;

pub use error::{EventError, EventResult};
pub use handlers::{EventsState, events_router};
pub use models::{
    CreateEvent, DEFAULT_LIMIT, DEFAULT_PAGE, EVENT_TYPE, Event, EventCreated, EventId, EventPage,
    EventQuery, EventUpdate, MessageResponse, PageRequest, QueryMode,
};
pub use self::mongodb::{COLLECTION_NAME, MongoEventRepository};
pub use repository::EventRepository;
pub use service::EventService;

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_events,
        handlers::create_event,
        handlers::update_event,
        handlers::delete_event,
    ),
    components(schemas(
        CreateEvent,
        EventPage,
        EventCreated,
        MessageResponse,
        axum_helpers::ErrorResponse,
    )),
    tags(
        (name = "events", description = "Event management backed by MongoDB")
    )
)]
pub struct ApiDoc;

//! HTTP handlers for events API

use crate::error::EventError;
use crate::models::{
    CreateEvent, EventCreated, EventId, EventPage, EventQuery, MessageResponse, QueryMode,
};
use crate::repository::EventRepository;
use crate::service::EventService;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use axum_helpers::{ErrorResponse, JsonOrForm};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Events router state
pub type EventsState<R> = Arc<EventService<R>>;

/// Create the events router
pub fn events_router<R: EventRepository + 'static>() -> Router<EventsState<R>> {
    Router::new()
        .route("/", get(get_events::<R>).post(create_event::<R>))
        .route("/{id}", put(update_event::<R>).delete(delete_event::<R>))
}

/// Look up one event by `id`, or list the newest events with `type=latest`
#[utoipa::path(
    get,
    path = "/api/v3/app/events",
    params(EventQuery),
    responses(
        (status = 200, description = "A single event (lookup) or an event page (type=latest)", body = EventPage),
        (status = 400, description = "Invalid event ID or query parameters", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state, query))]
pub async fn get_events<R: EventRepository>(
    State(state): State<EventsState<R>>,
    query: Result<Query<EventQuery>, QueryRejection>,
) -> Result<Response, EventError> {
    let Query(query) = query.map_err(|rejection| {
        debug!(error = %rejection, "Rejected query string");
        EventError::InvalidQuery
    })?;

    match query.mode()? {
        QueryMode::Lookup(id) => {
            let event = state.get_event(&id).await?;
            Ok(Json(event).into_response())
        }
        QueryMode::Latest(page) => {
            let page = state.list_latest(page).await?;
            Ok(Json(page).into_response())
        }
    }
}

/// Create a new event
#[utoipa::path(
    post,
    path = "/api/v3/app/events",
    request_body(content = CreateEvent, content_type = "application/json"),
    responses(
        (status = 201, description = "Event created", body = EventCreated),
        (status = 400, description = "Missing required fields or malformed body", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state, input))]
pub async fn create_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    JsonOrForm(input): JsonOrForm<CreateEvent>,
) -> Result<impl IntoResponse, EventError> {
    let id = state.create_event(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(EventCreated {
            message: "Event created successfully".to_string(),
            event_id: id.to_string(),
        }),
    ))
}

/// Merge the body's fields into an event
#[utoipa::path(
    put,
    path = "/api/v3/app/events/{id}",
    params(
        ("id" = String, Path, description = "Event ID (24 hex characters)")
    ),
    request_body(content = Object, content_type = "application/json"),
    responses(
        (status = 200, description = "Event updated", body = MessageResponse),
        (status = 400, description = "Invalid event ID or malformed body", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state, fields))]
pub async fn update_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Path(id): Path<String>,
    JsonOrForm(fields): JsonOrForm<Map<String, Value>>,
) -> Result<Json<MessageResponse>, EventError> {
    let id = EventId::parse(&id)?;
    state.update_event(&id, fields).await?;
    Ok(Json(MessageResponse::new("Event updated successfully")))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/api/v3/app/events/{id}",
    params(
        ("id" = String, Path, description = "Event ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 400, description = "Invalid event ID", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn delete_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, EventError> {
    let id = EventId::parse(&id)?;
    state.delete_event(&id).await?;
    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

//! Records API endpoints

use api_types::{
    Created,
    record::{RecordList, RecordListResponse, RecordNew, RecordUpdate, RecordView},
};
use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use engine::{CreateRecordCmd, Record, RecordId, RecordQuery, UpdateRecordCmd};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user, validate};

fn record_view(record: &Record) -> RecordView {
    RecordView {
        id: record.id().as_uuid(),
        amount: record.amount().amount(),
        currency: record.amount().currency().code().to_string(),
        category_id: record.category().id(),
        category: record.category().name().to_string(),
        subcategory_id: record.subcategory().id(),
        subcategory: record.subcategory().name().to_string(),
        occurred_at: record.time(),
        description: record.description().as_str().to_string(),
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    payload: Result<Query<RecordList>, QueryRejection>,
) -> Result<Json<RecordListResponse>, ServerError> {
    let payload = validate::query(payload)?;

    let mut query = RecordQuery::new(&user.username, payload.year, payload.month);
    if let Some(subcategory_id) = payload.subcategory_id {
        query = query.subcategory_id(subcategory_id);
    }
    let records = state.engine.list_records(&query).await?;

    Ok(Json(RecordListResponse {
        records: records.iter().map(record_view).collect(),
    }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    payload: Result<Json<RecordNew>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let payload = validate::json(payload)?;
    validate::record_new(&payload)?;

    let cmd = CreateRecordCmd::new(
        &user.username,
        payload.amount,
        payload.category_id,
        payload.subcategory_id,
        payload.occurred_at,
        payload.description,
    )
    .currency(payload.currency);
    let id = state.engine.create_record(cmd, &state.shutdown).await?;

    Ok((
        StatusCode::CREATED,
        Json(Created { id: id.as_uuid() }),
    ))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<RecordUpdate>, JsonRejection>,
) -> Result<StatusCode, ServerError> {
    let id = RecordId::from_uuid(validate::path(id)?);
    let payload = validate::json(payload)?;
    validate::record_update(&payload)?;

    let mut cmd = UpdateRecordCmd::new(id, &user.username);
    if let Some(amount) = payload.amount {
        cmd = cmd.amount(amount);
    }
    if let Some(currency) = payload.currency {
        cmd = cmd.currency(currency);
    }
    if let Some(description) = payload.description {
        cmd = cmd.description(description);
    }
    state.engine.update_record(cmd, &state.shutdown).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let id = RecordId::from_uuid(validate::path(id)?);
    state
        .engine
        .delete_record(id, &user.username, &state.shutdown)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

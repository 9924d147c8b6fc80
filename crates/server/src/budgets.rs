//! Budgets API endpoints

use api_types::{
    Created,
    budget::{BudgetList, BudgetListResponse, BudgetNew, BudgetUpdate, BudgetView},
};
use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use engine::{BudgetId, CreateBudgetCmd, MonthCategoryBudget, UpdateBudgetCmd};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user, validate};

fn budget_view(budget: &MonthCategoryBudget) -> BudgetView {
    BudgetView {
        id: budget.id().as_uuid(),
        year: budget.month().year(),
        month: budget.month().month(),
        subcategory_id: budget.subcategory().id(),
        subcategory: budget.subcategory().name().to_string(),
        currency: budget.planned_budget().currency().code().to_string(),
        planned_amount: budget.planned_budget().amount(),
        actual_spent: budget.actual_spent().amount(),
        remaining: budget.remaining_budget().amount(),
        utilization: budget.utilization_percentage(),
        over_budget: budget.is_over_budget(),
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    payload: Result<Query<BudgetList>, QueryRejection>,
) -> Result<Json<BudgetListResponse>, ServerError> {
    let payload = validate::query(payload)?;
    let budgets = state
        .engine
        .list_budgets(&user.username, payload.year, payload.month)
        .await?;

    Ok(Json(BudgetListResponse {
        budgets: budgets.iter().map(budget_view).collect(),
    }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    payload: Result<Json<BudgetNew>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let payload = validate::json(payload)?;
    validate::budget_new(&payload)?;

    let cmd = CreateBudgetCmd::new(
        &user.username,
        payload.year,
        payload.month,
        payload.subcategory_id,
        payload.planned_amount,
    )
    .currency(payload.currency);
    let id = state.engine.create_budget(cmd, &state.shutdown).await?;

    Ok((
        StatusCode::CREATED,
        Json(Created { id: id.as_uuid() }),
    ))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<BudgetUpdate>, JsonRejection>,
) -> Result<StatusCode, ServerError> {
    let id = BudgetId::from_uuid(validate::path(id)?);
    let payload = validate::json(payload)?;
    validate::budget_update(&payload)?;

    let mut cmd = UpdateBudgetCmd::new(id, &user.username, payload.planned_amount);
    if let Some(currency) = payload.currency {
        cmd = cmd.currency(currency);
    }
    state.engine.update_budget(cmd, &state.shutdown).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let id = BudgetId::from_uuid(validate::path(id)?);
    state
        .engine
        .delete_budget(id, &user.username, &state.shutdown)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

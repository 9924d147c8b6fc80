//! Catalog API endpoint

use api_types::category::{CategoryListResponse, CategoryView, SubcategoryView};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, server::ServerState, user};

pub async fn list(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<CategoryListResponse>, ServerError> {
    let categories = state
        .engine
        .categories()
        .await?
        .iter()
        .map(|category| CategoryView {
            id: category.id(),
            name: category.name().to_string(),
            subcategories: category
                .subcategories()
                .iter()
                .map(|sub| SubcategoryView {
                    id: sub.id(),
                    name: sub.name().to_string(),
                })
                .collect(),
        })
        .collect();

    Ok(Json(CategoryListResponse { categories }))
}

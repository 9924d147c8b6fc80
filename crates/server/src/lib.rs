use api_types::ErrorBody;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::{EngineError, ErrorKind};

pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod budgets;
mod categories;
mod records;
mod server;
mod user;
mod validate;

pub enum ServerError {
    Engine(EngineError),
    /// Malformed or out-of-shape request, rejected before reaching the engine.
    Generic(String),
}

const BAD_REQUEST_CODE: &str = "BAD_REQUEST";

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err.kind() {
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: &EngineError) -> String {
    match err.kind() {
        ErrorKind::Internal => {
            tracing::error!("internal error: {err}");
            "internal server error".to_string()
        }
        _ => err.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Engine(err) => (
                status_for_engine_error(&err),
                ErrorBody {
                    error: message_for_engine_error(&err),
                    code: err.code().to_string(),
                },
            ),
            ServerError::Generic(error) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error,
                    code: BAD_REQUEST_CODE.to_string(),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res =
            ServerError::from(EngineError::BudgetAlreadyExists("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let res = ServerError::from(EngineError::InvalidSubcategory {
            category: 1,
            subcategory: 7,
        })
        .into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::NegativePlannedBudget).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let res =
            ServerError::from(EngineError::CurrencyMismatch("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_cancelled_maps_to_503() {
        let res = ServerError::from(EngineError::Cancelled).into_response();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn engine_internal_maps_to_500_and_hides_message() {
        let err = EngineError::Database(DbErr::Custom("disk on fire".to_string()));
        assert_eq!(message_for_engine_error(&err), "internal server error");

        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}

//! Database connectivity verification endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use connectivity::{ConnectivityResult, GraphConnector, Prober};

use crate::error::{ApiError, CONNECTIVITY_INTERNAL_ERROR};

/// Shared application state accessible from all handlers.
pub struct AppState<C: GraphConnector> {
    pub prober: Arc<Prober<C>>,
}

impl<C: GraphConnector> AppState<C> {
    pub fn new(prober: Prober<C>) -> Self {
        Self {
            prober: Arc::new(prober),
        }
    }
}

/// GET /api/v1/verify-connectivity — checks that the database accepts connections.
///
/// 200 with the result body on success, 503 for unavailable or expired
/// sessions, 500 for anything else.
#[tracing::instrument(skip(state))]
pub async fn verify<C: GraphConnector + 'static>(
    State(state): State<Arc<AppState<C>>>,
) -> Result<Json<ConnectivityResult>, ApiError> {
    tracing::info!("received request to verify database connectivity");

    // Separate task: a panic in the driver surfaces here as a JoinError.
    let prober = state.prober.clone();
    let outcome = tokio::spawn(async move { prober.check().await })
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "unexpected error during connectivity check");
            ApiError::Internal(CONNECTIVITY_INTERNAL_ERROR.to_string())
        })?;

    match outcome {
        Ok(()) => {
            tracing::info!("database connectivity check successful");
            Ok(Json(ConnectivityResult::success()))
        }
        Err(failure) => {
            tracing::error!(
                category = failure.category(),
                message = %failure.message(),
                "database connectivity check failed"
            );
            Err(ApiError::from(failure))
        }
    }
}

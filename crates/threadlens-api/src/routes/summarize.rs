use axum::{extract::State, Json};
use std::sync::Arc;
use threadlens_types::{AnalysisResult, Thread};

use crate::{error::ApiResult, state::AppState};

/// Analyze and summarize a captured thread.
///
/// Validation happens here, once, at the boundary; the engine assumes a
/// valid thread. Provider transport failures surface as 502; malformed
/// provider output is already recovered inside the engine.
pub async fn summarize_thread(
    State(state): State<Arc<AppState>>,
    Json(thread): Json<Thread>,
) -> ApiResult<Json<AnalysisResult>> {
    thread.validate()?;

    let result = state.analysis.analyze(&thread).await?;
    Ok(Json(result))
}

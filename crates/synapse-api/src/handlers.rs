//! Route handler functions for all API endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use synapse_script::{build_program, Outcome, Presentation, Reply, ScriptKind, SessionMode, Step};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request / response types
// =============================================================================

/// Request body for POST /api/start. The body itself is optional.
#[derive(Debug, Default, Deserialize)]
pub struct StartRequest {
    #[serde(default)]
    pub script: ScriptKind,
    #[serde(default)]
    pub mode: SessionMode,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartResponse {
    pub session_id: Uuid,
    pub step: Step,
}

/// Request body for POST /api/next.
#[derive(Debug, Deserialize)]
pub struct NextRequest {
    pub session_id: Option<Uuid>,
    /// Free-text answer to the outstanding prompt.
    pub answer: Option<String>,
    /// Verdict reached by the caller; takes precedence over `answer`.
    pub correct: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub script: ScriptKind,
    pub mode: SessionMode,
    pub host: String,
    pub started_at: DateTime<Utc>,
    pub awaiting_answer: bool,
    pub finished: bool,
    pub outcome: Outcome,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub active_sessions: usize,
}

// =============================================================================
// Session endpoints
// =============================================================================

/// POST /api/start - open a session and return its first step.
pub async fn start(
    State(state): State<AppState>,
    body: Result<Option<Json<StartRequest>>, JsonRejection>,
) -> Result<Json<StartResponse>, ApiError> {
    let StartRequest { script, mode } = body?.map(|Json(req)| req).unwrap_or_default();

    let program = build_program(script, mode, &state.config.game);
    let mut presentation = Presentation::new(program, state.config.game.similarity_threshold);
    let step = presentation.next_step(None)?;

    let session_id = state.lock_sessions()?.insert(presentation, script, mode);
    info!(%session_id, %script, %mode, "Session started");

    Ok(Json(StartResponse { session_id, step }))
}

/// POST /api/next - advance a session by one step.
pub async fn next(
    State(state): State<AppState>,
    body: Result<Json<NextRequest>, JsonRejection>,
) -> Result<Json<Step>, ApiError> {
    let Json(req) = body?;
    let session_id = req.session_id.ok_or_else(ApiError::not_started)?;

    let (reply, judged_prompt) = match (req.correct, req.answer) {
        (Some(correct), _) => (Some(Reply::Verdict(correct)), None),
        (None, Some(answer)) => {
            let (reply, prompt_id) = grade_answer(&state, session_id, answer).await?;
            (Some(reply), prompt_id)
        }
        (None, None) => (None, None),
    };

    let mut sessions = state.lock_sessions()?;
    let entry = sessions
        .get_mut(&session_id)
        .ok_or_else(ApiError::not_started)?;

    // The lock was released while judging; drop the verdict if another
    // request moved the session past the prompt it was reached for.
    if let Some(prompt_id) = judged_prompt {
        if entry.presentation.prompt_id() != Some(prompt_id) {
            warn!(%session_id, "Prompt changed while the answer was being judged");
            return Err(ApiError::Conflict(
                "The prompt changed while the answer was being judged".to_string(),
            ));
        }
    }

    let step = entry.presentation.next_step(reply)?;
    debug!(%session_id, verdict = ?entry.presentation.last_verdict(), "Session advanced");

    Ok(Json(step))
}

/// Turn a typed answer into a reply, consulting the judge when a riddle is
/// outstanding. Blank answers go to the engine untouched so they do not cost
/// an attempt.
///
/// A judged reply comes back with the id of the prompt it answers.
async fn grade_answer(
    state: &AppState,
    session_id: Uuid,
    answer: String,
) -> Result<(Reply, Option<u64>), ApiError> {
    if answer.trim().is_empty() {
        return Ok((Reply::Answer(answer), None));
    }

    let outstanding = {
        let sessions = state.lock_sessions()?;
        let entry = sessions.get(&session_id).ok_or_else(ApiError::not_started)?;
        let presentation = &entry.presentation;
        presentation
            .current_riddle()
            .cloned()
            .zip(presentation.prompt_id())
    };

    match outstanding {
        Some((riddle, prompt_id)) => {
            let correct = state.judge.judge(&riddle, &answer).await;
            Ok((Reply::Verdict(correct), Some(prompt_id)))
        }
        None => Ok((Reply::Answer(answer), None)),
    }
}

/// GET /api/sessions/{id} - describe a running session.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionInfo>, ApiError> {
    let sessions = state.lock_sessions()?;
    let entry = sessions
        .get(&session_id)
        .ok_or_else(|| ApiError::NotFound(format!("Session not found: {}", session_id)))?;

    Ok(Json(SessionInfo {
        session_id,
        script: entry.script,
        mode: entry.mode,
        host: entry.presentation.host().to_string(),
        started_at: entry.started_at,
        awaiting_answer: entry.presentation.awaiting_answer(),
        finished: entry.presentation.is_finished(),
        outcome: entry.presentation.outcome().clone(),
    }))
}

/// DELETE /api/sessions/{id} - drop a session.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .lock_sessions()?
        .remove(&session_id)
        .ok_or_else(|| ApiError::NotFound(format!("Session not found: {}", session_id)))?;
    info!(%session_id, "Session deleted");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Health
// =============================================================================

/// GET /health - liveness and session count.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let active_sessions = state.lock_sessions()?.len();
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        active_sessions,
    }))
}

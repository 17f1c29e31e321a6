// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info};

use sala_mission_api::{
    ApiError,
    handlers::{
        add_participant, check_in, confirm_participation, create_mission, create_scope_node,
        estimate_travel, list_visible, mission_audit_trail, record_position, register_user,
        transition_mission,
    },
    request_response::{
        AddParticipantRequest, AddParticipantResponse, CheckInRequest, CheckInResponse,
        ConfirmParticipationResponse, CreateMissionRequest, CreateMissionResponse,
        CreateScopeNodeRequest, CreateScopeNodeResponse, EstimateTravelRequest,
        EstimateTravelResponse, ListVisibleMissionsResponse, MissionAuditTrailResponse,
        RecordPositionRequest, RecordPositionResponse, RegisterUserRequest, RegisterUserResponse,
        TransitionMissionRequest, TransitionMissionResponse,
    },
};
use sala_mission_audit::Cause;
use sala_mission_domain::{Role, RoleHierarchy, ScopeTree, User};
use sala_mission_persistence::Persistence;

/// Sala Mission Server - HTTP server for the Sala Mission Platform
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex; the scope tree behind an
/// `RwLock` because `create_scope_node` is the one operation that grows
/// it after startup. The role capability table is loaded once at boot
/// and never changes while the server runs.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for all reads and transactional writes.
    persistence: Arc<Mutex<Persistence>>,
    /// The administrative hierarchy, loaded at startup.
    tree: Arc<RwLock<ScopeTree>>,
    /// The seeded role capability table.
    roles: Arc<RoleHierarchy>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Monotonic fallback for requests that arrive without a request id.
static REQUEST_SEQ: AtomicU64 = AtomicU64::new(1);

/// Extracts the acting user's id from the `x-user-id` header.
///
/// The upstream gateway authenticates callers and stamps this header;
/// a request without it never reaches the operation layer.
fn actor_from_headers(headers: &HeaderMap) -> Result<i64, HttpError> {
    let raw = headers.get("x-user-id").ok_or_else(|| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: String::from("Missing x-user-id header"),
    })?;
    raw.to_str()
        .ok()
        .and_then(|value| value.parse::<i64>().ok())
        .ok_or_else(|| HttpError {
            status: StatusCode::BAD_REQUEST,
            message: String::from("x-user-id header must be an integer user id"),
        })
}

/// Builds the audit cause for a request: the `x-request-id` header when
/// present, a server-generated sequence number otherwise.
fn cause_from_headers(headers: &HeaderMap, action: &str) -> Cause {
    let id: String = headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map_or_else(
            || format!("srv-{}", REQUEST_SEQ.fetch_add(1, Ordering::Relaxed)),
            String::from,
        );
    Cause::new(id, format!("HTTP {action}"))
}

/// Handler for GET `/missions` endpoint.
///
/// Lists the missions visible within the actor's location scope.
async fn handle_list_missions(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListVisibleMissionsResponse>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, "Handling list_missions request");

    let mut persistence = state.persistence.lock().await;
    let tree = state.tree.read().await;
    let response: ListVisibleMissionsResponse = list_visible(&mut persistence, &tree, actor_id)?;
    Ok(Json(response))
}

/// Handler for POST `/missions` endpoint.
///
/// Creates a new draft mission owned by the actor.
async fn handle_create_mission(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateMissionRequest>,
) -> Result<Json<CreateMissionResponse>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    let cause: Cause = cause_from_headers(&headers, "create_mission");
    info!(actor_id, title = %req.title, "Handling create_mission request");

    let mut persistence = state.persistence.lock().await;
    let response: CreateMissionResponse = create_mission(
        &mut persistence,
        actor_id,
        &req,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/missions/{mission_id}/transition` endpoint.
///
/// Applies a lifecycle action (submit, approve, reject, start,
/// complete, cancel) to a mission.
async fn handle_transition_mission(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(mission_id): Path<i64>,
    Json(req): Json<TransitionMissionRequest>,
) -> Result<Json<TransitionMissionResponse>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    let cause: Cause = cause_from_headers(&headers, "transition_mission");
    info!(
        actor_id,
        mission_id,
        action = %req.action,
        "Handling transition_mission request"
    );

    let mut persistence = state.persistence.lock().await;
    let tree = state.tree.read().await;
    let response: TransitionMissionResponse = transition_mission(
        &mut persistence,
        &tree,
        &state.roles,
        actor_id,
        mission_id,
        &req,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/missions/{mission_id}/participants` endpoint.
///
/// Adds a user to a mission's roster.
async fn handle_add_participant(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(mission_id): Path<i64>,
    Json(req): Json<AddParticipantRequest>,
) -> Result<Json<AddParticipantResponse>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    let cause: Cause = cause_from_headers(&headers, "add_participant");
    info!(
        actor_id,
        mission_id,
        user_id = req.user_id,
        "Handling add_participant request"
    );

    let mut persistence = state.persistence.lock().await;
    let tree = state.tree.read().await;
    let response: AddParticipantResponse = add_participant(
        &mut persistence,
        &tree,
        &state.roles,
        actor_id,
        mission_id,
        &req,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/missions/{mission_id}/confirm` endpoint.
///
/// Confirms the actor's own participation.
async fn handle_confirm_participation(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(mission_id): Path<i64>,
) -> Result<Json<ConfirmParticipationResponse>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    let cause: Cause = cause_from_headers(&headers, "confirm_participation");
    info!(actor_id, mission_id, "Handling confirm_participation request");

    let mut persistence = state.persistence.lock().await;
    let response: ConfirmParticipationResponse = confirm_participation(
        &mut persistence,
        actor_id,
        mission_id,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/missions/{mission_id}/check_in` endpoint.
///
/// Records the actor's arrival at the mission site.
async fn handle_check_in(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(mission_id): Path<i64>,
    Json(req): Json<CheckInRequest>,
) -> Result<Json<CheckInResponse>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    let cause: Cause = cause_from_headers(&headers, "check_in");
    info!(actor_id, mission_id, "Handling check_in request");

    let mut persistence = state.persistence.lock().await;
    let response: CheckInResponse = check_in(
        &mut persistence,
        actor_id,
        mission_id,
        &req,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/missions/{mission_id}/positions` endpoint.
///
/// Appends a position ping for the actor on an in-progress mission.
async fn handle_record_position(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(mission_id): Path<i64>,
    Json(req): Json<RecordPositionRequest>,
) -> Result<Json<RecordPositionResponse>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, mission_id, "Handling record_position request");

    let mut persistence = state.persistence.lock().await;
    let response: RecordPositionResponse = record_position(
        &mut persistence,
        actor_id,
        mission_id,
        &req,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for GET `/missions/{mission_id}/audit` endpoint.
///
/// Returns a mission's ordered audit trail.
async fn handle_audit_trail(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Path(mission_id): Path<i64>,
) -> Result<Json<MissionAuditTrailResponse>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, mission_id, "Handling audit_trail request");

    let mut persistence = state.persistence.lock().await;
    let tree = state.tree.read().await;
    let response: MissionAuditTrailResponse = mission_audit_trail(
        &mut persistence,
        &tree,
        &state.roles,
        actor_id,
        mission_id,
    )?;
    Ok(Json(response))
}

/// Handler for POST `/travel/estimate` endpoint.
///
/// Computes a distance and travel-time estimate between two points.
// axum handlers must be async even when nothing awaits.
#[allow(clippy::unused_async)]
async fn handle_estimate_travel(
    Json(req): Json<EstimateTravelRequest>,
) -> Result<Json<EstimateTravelResponse>, HttpError> {
    let response: EstimateTravelResponse = estimate_travel(&req)?;
    Ok(Json(response))
}

/// Handler for POST `/scope_nodes` endpoint.
///
/// Grows the administrative hierarchy. Administrator only.
async fn handle_create_scope_node(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateScopeNodeRequest>,
) -> Result<Json<CreateScopeNodeResponse>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, node_id = %req.node_id, "Handling create_scope_node request");

    let mut persistence = state.persistence.lock().await;
    let mut tree = state.tree.write().await;
    let response: CreateScopeNodeResponse =
        create_scope_node(&mut persistence, &mut tree, actor_id, &req)?;
    Ok(Json(response))
}

/// Handler for POST `/users` endpoint.
///
/// Registers a user at a station in the hierarchy. Administrator only.
async fn handle_register_user(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<RegisterUserRequest>,
) -> Result<Json<RegisterUserResponse>, HttpError> {
    let actor_id: i64 = actor_from_headers(&headers)?;
    info!(actor_id, name = %req.name, role = %req.role, "Handling register_user request");

    let mut persistence = state.persistence.lock().await;
    let tree = state.tree.read().await;
    let response: RegisterUserResponse =
        register_user(&mut persistence, &tree, actor_id, &req)?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/missions", get(handle_list_missions))
        .route("/missions", post(handle_create_mission))
        .route(
            "/missions/{mission_id}/transition",
            post(handle_transition_mission),
        )
        .route(
            "/missions/{mission_id}/participants",
            post(handle_add_participant),
        )
        .route(
            "/missions/{mission_id}/confirm",
            post(handle_confirm_participation),
        )
        .route("/missions/{mission_id}/check_in", post(handle_check_in))
        .route(
            "/missions/{mission_id}/positions",
            post(handle_record_position),
        )
        .route("/missions/{mission_id}/audit", get(handle_audit_trail))
        .route("/travel/estimate", post(handle_estimate_travel))
        .route("/scope_nodes", post(handle_create_scope_node))
        .route("/users", post(handle_register_user))
        .with_state(app_state)
}

/// Creates the initial administrator account when none exists yet.
///
/// Registration is administrator-only, so a fresh database would
/// otherwise be unusable.
fn bootstrap_administrator(persistence: &mut Persistence) -> Result<(), Box<dyn std::error::Error>> {
    if persistence.administrator_exists()? {
        return Ok(());
    }
    let admin: User = persistence.create_user(&User {
        id: None,
        name: String::from("System Administrator"),
        role: Role::Administrator,
        scope: None,
    })?;
    info!(user_id = ?admin.id, "Created initial administrator account");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Sala Mission Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    bootstrap_administrator(&mut persistence)?;

    // Authorization state is loaded once; an unusable capability table
    // is fatal and the server refuses to start.
    let tree: ScopeTree = persistence.load_scope_tree()?;
    let roles: RoleHierarchy = persistence.load_role_hierarchy()?;

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        tree: Arc::new(RwLock::new(tree)),
        roles: Arc::new(roles),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

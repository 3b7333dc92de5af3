// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP server for the dock visit scheduling system.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use dock_visit_api::{
    ApiError, AuthError, AuthenticationService, CarrierInfo, CarrierWithTenantsInfo,
    ChangePasswordRequest, ChangePasswordResponse, ConfirmVisitRequest, CreateCarrierRequest,
    CreateIncidentRequest, CreateOperatorRequest, CreateOperatorResponse, CreateTenantRequest,
    CreateTenantResponse, CreateVisitRequest, GlobalCapabilities, IncidentInfo, ListVisitsRequest,
    RegisterCarrierForTenantRequest, TenantAccountInfo, TenantInfo, UpdateCarrierRequest,
    VisitHistoryEntry, VisitInfo, WhoAmIResponse, advance_visit_status, change_password,
    compute_global_capabilities, confirm_visit, create_carrier, create_incident, create_operator,
    create_tenant, create_visit, delete_visit, export_visits_csv, get_my_tenant, list_carriers,
    list_incidents, list_my_carriers, list_my_visits, list_tenants, list_visits,
    register_carrier_for_tenant, update_carrier, visit_history, whoami,
};
use dock_visit_persistence::{Persistence, PersistenceError};

use crate::session::SessionOperator;

/// Dock Visit Server - HTTP server for the dock visit scheduling system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Login name for a bootstrap admin account, created at startup if absent.
    #[arg(long, requires = "admin_password")]
    admin_login: Option<String>,

    /// Password for the bootstrap admin account.
    #[arg(long, requires = "admin_login")]
    admin_password: Option<String>,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for visits, registries, and sessions.
    persistence: Arc<Mutex<Persistence>>,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoginApiRequest {
    /// The operator login name.
    login_name: String,
    /// The operator password.
    password: String,
}

/// Login response body.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoginApiResponse {
    /// The opaque session token to present as `Authorization: Bearer`.
    session_token: String,
    /// The operator id.
    operator_id: i64,
    /// The operator login name.
    login_name: String,
    /// The operator display name.
    display_name: String,
    /// The operator role.
    role: String,
}

/// Status transition request body.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AdvanceStatusApiRequest {
    /// The target status wire literal.
    status: String,
}

/// Generic message response for side-effect-only endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct MessageResponse {
    /// A human-readable confirmation.
    message: String,
}

/// Error response body.
#[derive(Debug, Clone, Deserialize, Serialize)]
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
        let status = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            // Capacity rejections and rule violations are conflicts with
            // current state, not malformed requests
            ApiError::SlotFull { .. } | ApiError::DomainRuleViolation { .. } => {
                StatusCode::CONFLICT
            }
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<AuthError> for HttpError {
    fn from(err: AuthError) -> Self {
        let status = match &err {
            AuthError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            AuthError::Unauthorized { .. } => StatusCode::FORBIDDEN,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

// ============================================================================
// Authentication handlers
// ============================================================================

/// Handler for POST `/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginApiRequest>,
) -> Result<Json<LoginApiResponse>, HttpError> {
    info!(login_name = %req.login_name, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let (session_token, actor, operator) =
        AuthenticationService::login(&mut persistence, &req.login_name, &req.password)?;

    Ok(Json(LoginApiResponse {
        session_token,
        operator_id: actor.operator_id,
        login_name: operator.login_name,
        display_name: operator.display_name,
        role: actor.role.as_str().to_string(),
    }))
}

/// Handler for POST `/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    AuthenticationService::logout(&mut persistence, &session.token)?;

    Ok(Json(MessageResponse {
        message: String::from("Logged out"),
    }))
}

/// Handler for GET `/whoami`.
async fn handle_whoami(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
) -> Result<Json<WhoAmIResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = whoami(&mut persistence, &session.actor, &session.operator)?;
    Ok(Json(response))
}

/// Handler for GET `/capabilities`.
async fn handle_capabilities(
    session: SessionOperator,
) -> Result<Json<GlobalCapabilities>, HttpError> {
    Ok(Json(compute_global_capabilities(
        &session.actor,
        &session.operator,
    )))
}

// ============================================================================
// Visit handlers
// ============================================================================

/// Handler for POST `/visits`.
async fn handle_create_visit(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
    Json(req): Json<CreateVisitRequest>,
) -> Result<(StatusCode, Json<VisitInfo>), HttpError> {
    info!(
        actor = %session.actor.login_name,
        scheduled_at = %req.scheduled_at,
        "Handling create_visit request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let visit = create_visit(&mut persistence, &req, &session.actor)?;
    Ok((StatusCode::CREATED, Json(visit)))
}

/// Handler for GET `/visits`.
async fn handle_list_visits(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Query(req): Query<ListVisitsRequest>,
) -> Result<Json<Vec<VisitInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let visits = list_visits(&mut persistence, &req)?;
    Ok(Json(visits))
}

/// Handler for GET `/visits/mine`.
async fn handle_list_my_visits(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
) -> Result<Json<Vec<VisitInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let visits = list_my_visits(&mut persistence, &session.actor)?;
    Ok(Json(visits))
}

/// Handler for PATCH `/visits/{id}/status`.
async fn handle_advance_status(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
    Path(visit_id): Path<i64>,
    Json(req): Json<AdvanceStatusApiRequest>,
) -> Result<Json<VisitInfo>, HttpError> {
    info!(
        actor = %session.actor.login_name,
        visit_id,
        status = %req.status,
        "Handling advance_status request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let visit = advance_visit_status(&mut persistence, visit_id, &req.status, &session.actor)?;
    Ok(Json(visit))
}

/// Handler for PATCH `/visits/{id}/confirm`.
async fn handle_confirm_visit(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
    Path(visit_id): Path<i64>,
    Json(req): Json<ConfirmVisitRequest>,
) -> Result<Json<VisitInfo>, HttpError> {
    info!(
        actor = %session.actor.login_name,
        visit_id,
        "Handling confirm_visit request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let visit = confirm_visit(&mut persistence, visit_id, &req, &session.actor)?;
    Ok(Json(visit))
}

/// Handler for GET `/visits/{id}/history`.
async fn handle_visit_history(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Path(visit_id): Path<i64>,
) -> Result<Json<Vec<VisitHistoryEntry>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let history = visit_history(&mut persistence, visit_id)?;
    Ok(Json(history))
}

/// Handler for DELETE `/visits/{id}`.
async fn handle_delete_visit(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
    Path(visit_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    delete_visit(&mut persistence, visit_id, &session.actor)?;
    Ok(Json(MessageResponse {
        message: format!("Visit {visit_id} deleted"),
    }))
}

/// Handler for GET `/visits/export.csv`.
async fn handle_export_visits(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    Query(req): Query<ListVisitsRequest>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let csv = export_visits_csv(&mut persistence, req.from, req.to)?;
    Ok(([(header::CONTENT_TYPE, "text/csv")], csv).into_response())
}

// ============================================================================
// Carrier handlers
// ============================================================================

/// Handler for POST `/carriers`.
async fn handle_create_carrier(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
    Json(req): Json<CreateCarrierRequest>,
) -> Result<(StatusCode, Json<CarrierInfo>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let carrier = create_carrier(&mut persistence, &req, &session.actor)?;
    Ok((StatusCode::CREATED, Json(carrier)))
}

/// Handler for GET `/carriers`.
async fn handle_list_carriers(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
) -> Result<Json<Vec<CarrierWithTenantsInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let carriers = list_carriers(&mut persistence)?;
    Ok(Json(carriers))
}

/// Handler for POST `/carriers/mine`.
async fn handle_register_carrier_for_tenant(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
    Json(req): Json<RegisterCarrierForTenantRequest>,
) -> Result<(StatusCode, Json<CarrierInfo>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let carrier = register_carrier_for_tenant(&mut persistence, &req, &session.actor)?;
    Ok((StatusCode::CREATED, Json(carrier)))
}

/// Handler for GET `/carriers/mine`.
async fn handle_list_my_carriers(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
) -> Result<Json<Vec<CarrierInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let carriers = list_my_carriers(&mut persistence, &session.actor)?;
    Ok(Json(carriers))
}

/// Handler for PATCH `/carriers/{id}`.
async fn handle_update_carrier(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
    Path(carrier_id): Path<i64>,
    Json(req): Json<UpdateCarrierRequest>,
) -> Result<Json<CarrierInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let carrier = update_carrier(&mut persistence, carrier_id, &req, &session.actor)?;
    Ok(Json(carrier))
}

// ============================================================================
// Tenant handlers
// ============================================================================

/// Handler for POST `/tenants`.
async fn handle_create_tenant(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
    Json(req): Json<CreateTenantRequest>,
) -> Result<(StatusCode, Json<CreateTenantResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = create_tenant(&mut persistence, &req, &session.actor)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/tenants`.
async fn handle_list_tenants(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
) -> Result<Json<Vec<TenantAccountInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let tenants = list_tenants(&mut persistence, &session.actor)?;
    Ok(Json(tenants))
}

/// Handler for GET `/tenants/me`.
async fn handle_my_tenant(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
) -> Result<Json<TenantInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let tenant = get_my_tenant(&mut persistence, &session.actor)?;
    Ok(Json(tenant))
}

// ============================================================================
// Incident handlers
// ============================================================================

/// Handler for POST `/incidents`.
async fn handle_create_incident(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
    Json(req): Json<CreateIncidentRequest>,
) -> Result<(StatusCode, Json<IncidentInfo>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let incident = create_incident(&mut persistence, &req, &session.actor)?;
    Ok((StatusCode::CREATED, Json(incident)))
}

/// Handler for GET `/incidents`.
async fn handle_list_incidents(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
) -> Result<Json<Vec<IncidentInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let incidents = list_incidents(&mut persistence)?;
    Ok(Json(incidents))
}

// ============================================================================
// Operator handlers
// ============================================================================

/// Handler for POST `/operators`.
async fn handle_create_operator(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
    Json(req): Json<CreateOperatorRequest>,
) -> Result<(StatusCode, Json<CreateOperatorResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = create_operator(&mut persistence, &req, &session.actor)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/operators/change_password`.
async fn handle_change_password(
    AxumState(app_state): AxumState<AppState>,
    session: SessionOperator,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ChangePasswordResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = change_password(&mut persistence, &req, &session.actor, &session.operator)?;
    Ok(Json(response))
}

/// Builds the application router with all routes.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/whoami", get(handle_whoami))
        .route("/capabilities", get(handle_capabilities))
        .route("/visits", post(handle_create_visit))
        .route("/visits", get(handle_list_visits))
        .route("/visits/mine", get(handle_list_my_visits))
        .route("/visits/export.csv", get(handle_export_visits))
        .route("/visits/{visit_id}/status", patch(handle_advance_status))
        .route("/visits/{visit_id}/confirm", patch(handle_confirm_visit))
        .route("/visits/{visit_id}/history", get(handle_visit_history))
        .route("/visits/{visit_id}", delete(handle_delete_visit))
        .route("/carriers", post(handle_create_carrier))
        .route("/carriers", get(handle_list_carriers))
        .route("/carriers/mine", post(handle_register_carrier_for_tenant))
        .route("/carriers/mine", get(handle_list_my_carriers))
        .route("/carriers/{carrier_id}", patch(handle_update_carrier))
        .route("/tenants", post(handle_create_tenant))
        .route("/tenants", get(handle_list_tenants))
        .route("/tenants/me", get(handle_my_tenant))
        .route("/incidents", post(handle_create_incident))
        .route("/incidents", get(handle_list_incidents))
        .route("/operators", post(handle_create_operator))
        .route("/operators/change_password", post(handle_change_password))
        .with_state(app_state)
}

/// Creates the bootstrap admin account if it does not exist yet.
async fn bootstrap_admin(
    app_state: &AppState,
    login_name: &str,
    password: &str,
) -> Result<(), PersistenceError> {
    let mut persistence = app_state.persistence.lock().await;
    if persistence.get_operator_by_login(login_name)?.is_some() {
        info!(login_name, "Bootstrap admin already exists");
        return Ok(());
    }
    let operator_id = persistence.create_operator(login_name, "Administrator", password, "Admin")?;
    info!(operator_id, login_name, "Created bootstrap admin");
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

    info!("Initializing Dock Visit Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Optionally provision a first admin account
    if let (Some(login), Some(password)) = (&args.admin_login, &args.admin_password) {
        bootstrap_admin(&app_state, login, password).await?;
    }

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

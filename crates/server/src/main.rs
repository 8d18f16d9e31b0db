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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod live;
mod scenario;
mod simulator;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{FromRef, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use portlink::{BookingService, ValidationOutcome};
use portlink_api::{
    ApiError, BerthRequest, BerthResponse, ListBerthsQuery, ListPortCallsQuery, ListVesselsQuery,
    PagedResponse, PortCallRequest, PortCallResponse, PortlinkService, UpcomingQuery,
    ValidatePortCallRequest, VesselRequest, VesselResponse,
};
use portlink_domain::UtcTimestamp;
use portlink_persistence::{Persistence, SqliteStore, seed_demo_data};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::live::{LiveNotifier, live_events_handler};
use crate::scenario::ScenarioSuggestion;
use crate::simulator::{SimulatorError, SimulatorHandle, SimulatorStatus, spawn_simulator};

const INTERNAL_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Portlink Server - berth booking API for port operations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Load demo berths, vessels and port calls into an empty database
    #[arg(long)]
    seed_demo: bool,

    /// Seconds between load simulator ticks
    #[arg(long, default_value_t = 5)]
    simulator_interval_secs: u64,
}

type AppService = PortlinkService<LiveNotifier>;

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// Booking service over the shared store.
    service: Arc<AppService>,
    /// Fan-out for the live event stream.
    live: LiveNotifier,
    /// Control surface of the load simulator.
    simulator: SimulatorHandle,
}

impl AppState {
    fn new(persistence: Persistence, simulator_interval: Duration) -> Self {
        let live: LiveNotifier = LiveNotifier::new();
        let service: Arc<AppService> = Arc::new(BookingService::new(
            SqliteStore::new(persistence),
            live.clone(),
        ));
        let simulator: SimulatorHandle = spawn_simulator(Arc::clone(&service), simulator_interval);
        Self {
            service,
            live,
            simulator,
        }
    }

    fn store(&self) -> &SqliteStore {
        self.service.store()
    }
}

impl FromRef<AppState> for LiveNotifier {
    fn from_ref(state: &AppState) -> Self {
        state.live.clone()
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Machine-readable category.
    kind: String,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error category.
    kind: String,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            kind: self.kind,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self {
            status: StatusCode::from_u16(err.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            kind: err.kind().to_string(),
            message: err.message().to_string(),
        }
    }
}

impl From<SimulatorError> for HttpError {
    fn from(err: SimulatorError) -> Self {
        error!(error = %err, "Simulator control failure");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: String::from("internal"),
            message: String::from(INTERNAL_MESSAGE),
        }
    }
}

type HttpResult<T> = Result<Json<T>, HttpError>;
type CreatedResult<T> = Result<(StatusCode, Json<T>), HttpError>;

// ============================================================================
// Port calls
// ============================================================================

async fn handle_list_port_calls(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListPortCallsQuery>,
) -> HttpResult<PagedResponse<PortCallResponse>> {
    Ok(Json(
        portlink_api::list_port_calls(app_state.store(), &query).await?,
    ))
}

async fn handle_get_port_call(
    AxumState(app_state): AxumState<AppState>,
    Path(port_call_id): Path<i64>,
) -> HttpResult<PortCallResponse> {
    Ok(Json(
        portlink_api::get_port_call(app_state.store(), port_call_id).await?,
    ))
}

async fn handle_upcoming_port_calls(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> HttpResult<Vec<PortCallResponse>> {
    let now: UtcTimestamp = UtcTimestamp::now();
    Ok(Json(
        portlink_api::list_upcoming_port_calls(app_state.store(), now, &query).await?,
    ))
}

async fn handle_active_port_calls(
    AxumState(app_state): AxumState<AppState>,
) -> HttpResult<Vec<PortCallResponse>> {
    Ok(Json(
        portlink_api::list_active_port_calls(app_state.store()).await?,
    ))
}

async fn handle_create_port_call(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PortCallRequest>,
) -> CreatedResult<PortCallResponse> {
    info!(
        vessel_id = req.vessel_id,
        berth_id = req.berth_id,
        "Handling create_port_call request"
    );
    let created: PortCallResponse =
        portlink_api::create_port_call(&app_state.service, &req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn handle_update_port_call(
    AxumState(app_state): AxumState<AppState>,
    Path(port_call_id): Path<i64>,
    Json(req): Json<PortCallRequest>,
) -> HttpResult<PortCallResponse> {
    info!(port_call_id, "Handling update_port_call request");
    Ok(Json(
        portlink_api::update_port_call(&app_state.service, port_call_id, &req).await?,
    ))
}

async fn handle_approve_port_call(
    AxumState(app_state): AxumState<AppState>,
    Path(port_call_id): Path<i64>,
) -> HttpResult<PortCallResponse> {
    info!(port_call_id, "Handling approve_port_call request");
    Ok(Json(
        portlink_api::approve_port_call(&app_state.service, port_call_id).await?,
    ))
}

async fn handle_delete_port_call(
    AxumState(app_state): AxumState<AppState>,
    Path(port_call_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(port_call_id, "Handling delete_port_call request");
    portlink_api::delete_port_call(&app_state.service, port_call_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_validate_port_call(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ValidatePortCallRequest>,
) -> HttpResult<ValidationOutcome> {
    Ok(Json(
        portlink_api::validate_port_call(&app_state.service, &req).await?,
    ))
}

// ============================================================================
// Vessels
// ============================================================================

async fn handle_list_vessels(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListVesselsQuery>,
) -> HttpResult<PagedResponse<VesselResponse>> {
    Ok(Json(
        portlink_api::list_vessels(app_state.store(), &query).await?,
    ))
}

async fn handle_get_vessel(
    AxumState(app_state): AxumState<AppState>,
    Path(vessel_id): Path<i64>,
) -> HttpResult<VesselResponse> {
    Ok(Json(
        portlink_api::get_vessel(app_state.store(), vessel_id).await?,
    ))
}

async fn handle_vessel_port_calls(
    AxumState(app_state): AxumState<AppState>,
    Path(vessel_id): Path<i64>,
) -> HttpResult<Vec<PortCallResponse>> {
    Ok(Json(
        portlink_api::list_vessel_port_calls(app_state.store(), vessel_id).await?,
    ))
}

async fn handle_create_vessel(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<VesselRequest>,
) -> CreatedResult<VesselResponse> {
    info!(imo_number = %req.imo_number, "Handling create_vessel request");
    let created: VesselResponse = portlink_api::create_vessel(&app_state.service, &req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn handle_update_vessel(
    AxumState(app_state): AxumState<AppState>,
    Path(vessel_id): Path<i64>,
    Json(req): Json<VesselRequest>,
) -> HttpResult<VesselResponse> {
    info!(vessel_id, "Handling update_vessel request");
    Ok(Json(
        portlink_api::update_vessel(&app_state.service, vessel_id, &req).await?,
    ))
}

async fn handle_delete_vessel(
    AxumState(app_state): AxumState<AppState>,
    Path(vessel_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(vessel_id, "Handling delete_vessel request");
    portlink_api::delete_vessel(&app_state.service, vessel_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Berths
// ============================================================================

async fn handle_list_berths(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListBerthsQuery>,
) -> HttpResult<PagedResponse<BerthResponse>> {
    Ok(Json(
        portlink_api::list_berths(app_state.store(), &query).await?,
    ))
}

async fn handle_available_berths(
    AxumState(app_state): AxumState<AppState>,
) -> HttpResult<Vec<BerthResponse>> {
    Ok(Json(
        portlink_api::list_available_berths(app_state.store()).await?,
    ))
}

async fn handle_get_berth(
    AxumState(app_state): AxumState<AppState>,
    Path(berth_id): Path<i64>,
) -> HttpResult<BerthResponse> {
    Ok(Json(
        portlink_api::get_berth(app_state.store(), berth_id).await?,
    ))
}

async fn handle_create_berth(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<BerthRequest>,
) -> CreatedResult<BerthResponse> {
    info!(berth_code = %req.berth_code, "Handling create_berth request");
    let created: BerthResponse = portlink_api::create_berth(&app_state.service, &req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn handle_update_berth(
    AxumState(app_state): AxumState<AppState>,
    Path(berth_id): Path<i64>,
    Json(req): Json<BerthRequest>,
) -> HttpResult<BerthResponse> {
    info!(berth_id, "Handling update_berth request");
    Ok(Json(
        portlink_api::update_berth(&app_state.service, berth_id, &req).await?,
    ))
}

async fn handle_delete_berth(
    AxumState(app_state): AxumState<AppState>,
    Path(berth_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(berth_id, "Handling delete_berth request");
    portlink_api::delete_berth(&app_state.service, berth_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Load simulator
// ============================================================================

/// Body of `POST /simulator/start`. An empty body starts at one
/// operation per second with no suggestion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StartSimulatorRequest {
    operations_per_second: Option<u32>,
    suggestion: Option<ScenarioSuggestion>,
}

async fn handle_start_simulator(
    AxumState(app_state): AxumState<AppState>,
    body: Bytes,
) -> HttpResult<SimulatorStatus> {
    let req: StartSimulatorRequest = if body.is_empty() {
        StartSimulatorRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| HttpError {
            status: StatusCode::BAD_REQUEST,
            kind: String::from("invalid_input"),
            message: format!("Invalid simulator request: {e}"),
        })?
    };

    let status: SimulatorStatus = app_state
        .simulator
        .start(req.operations_per_second.unwrap_or(1), req.suggestion)
        .await?;
    Ok(Json(status))
}

async fn handle_stop_simulator(
    AxumState(app_state): AxumState<AppState>,
) -> HttpResult<SimulatorStatus> {
    Ok(Json(app_state.simulator.stop().await?))
}

async fn handle_simulator_status(
    AxumState(app_state): AxumState<AppState>,
) -> HttpResult<SimulatorStatus> {
    Ok(Json(app_state.simulator.status().await?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/port-calls",
            get(handle_list_port_calls).post(handle_create_port_call),
        )
        .route("/port-calls/upcoming", get(handle_upcoming_port_calls))
        .route("/port-calls/active", get(handle_active_port_calls))
        .route("/port-calls/validate", post(handle_validate_port_call))
        .route(
            "/port-calls/{port_call_id}",
            get(handle_get_port_call)
                .put(handle_update_port_call)
                .delete(handle_delete_port_call),
        )
        .route(
            "/port-calls/{port_call_id}/approve",
            post(handle_approve_port_call),
        )
        .route(
            "/vessels",
            get(handle_list_vessels).post(handle_create_vessel),
        )
        .route(
            "/vessels/{vessel_id}",
            get(handle_get_vessel)
                .put(handle_update_vessel)
                .delete(handle_delete_vessel),
        )
        .route(
            "/vessels/{vessel_id}/port-calls",
            get(handle_vessel_port_calls),
        )
        .route("/berths", get(handle_list_berths).post(handle_create_berth))
        .route("/berths/available", get(handle_available_berths))
        .route(
            "/berths/{berth_id}",
            get(handle_get_berth)
                .put(handle_update_berth)
                .delete(handle_delete_berth),
        )
        .route("/simulator/start", post(handle_start_simulator))
        .route("/simulator/stop", post(handle_stop_simulator))
        .route("/simulator/status", get(handle_simulator_status))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
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

    info!("Initializing Portlink Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if args.seed_demo {
        if seed_demo_data(&mut persistence, UtcTimestamp::now())? {
            info!("Loaded demo berths, vessels and port calls");
        } else {
            info!("Database already has vessels, skipping demo data");
        }
    }

    let simulator_interval: Duration = Duration::from_secs(args.simulator_interval_secs.max(1));
    let app_state: AppState = AppState::new(persistence, simulator_interval);
    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

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

use airsim::Outcome;
use airsim_api::{
    AddAirplaneRequest, AddAirportRequest, AddPersonRequest, ApiError, AssignPilotRequest,
    FlightOperation, FlightRequest, OfferFlightRequest, OutcomeResponse, PilotLicenseRequest,
    add_airplane, add_airport, add_person, assign_pilot, flight_operation,
    grant_or_revoke_pilot_license, offer_flight, simulation_cycle,
};
use airsim_persistence::{DEFAULT_POOL_SIZE, Persistence};
use axum::{
    Json, Router,
    extract::State as AxumState,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing::{error, info};

/// Airsim Server - HTTP front-end for the flight simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over `--database`.
    #[arg(long, env = "DATABASE_URL")]
    mysql_url: Option<String>,

    /// SQL script executed once at start-up, e.g. to load a scenario
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Maximum number of pooled database connections
    #[arg(long, default_value_t = DEFAULT_POOL_SIZE)]
    pool_size: u32,
}

/// Application state shared across handlers.
///
/// `Persistence` is a handle to a connection pool; each request checks out
/// its own connection.
#[derive(Clone)]
struct AppState {
    persistence: Persistence,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// `ok` or `unavailable`.
    status: String,
    /// The active database backend.
    backend: String,
}

/// Maps an outcome to its HTTP status.
const fn status_for(outcome: &Outcome) -> StatusCode {
    match outcome {
        Outcome::Success | Outcome::SuccessDegraded(_) => StatusCode::OK,
        Outcome::MalformedInput { .. } => StatusCode::BAD_REQUEST,
        Outcome::Denied(_) => StatusCode::CONFLICT,
        Outcome::EngineFailure(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Runs a handler on the blocking pool and renders its outcome.
async fn respond<F>(operation: &'static str, work: F) -> Response
where
    F: FnOnce() -> Outcome + Send + 'static,
{
    let outcome: Outcome = match tokio::task::spawn_blocking(work).await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(operation, error = %err, "Request worker failed");
            ApiError::Interrupted {
                reason: err.to_string(),
            }
            .into_outcome()
        }
    };

    info!(operation, outcome = outcome.kind(), "Request completed");
    let body: Json<OutcomeResponse> = Json(OutcomeResponse::new(operation, &outcome));
    (status_for(&outcome), body).into_response()
}

/// Handler for POST `/add_airport`.
async fn handle_add_airport(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AddAirportRequest>,
) -> Response {
    info!(airport_id = %req.airport_id, "Handling add_airport request");
    respond("add_airport", move || add_airport(&app_state.persistence, &req)).await
}

/// Handler for POST `/add_person`.
async fn handle_add_person(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AddPersonRequest>,
) -> Response {
    info!(person_id = %req.person_id, "Handling add_person request");
    respond("add_person", move || add_person(&app_state.persistence, &req)).await
}

/// Handler for POST `/add_airplane`.
async fn handle_add_airplane(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AddAirplaneRequest>,
) -> Response {
    info!(
        airline_id = %req.airline_id,
        tail_num = %req.tail_num,
        "Handling add_airplane request"
    );
    respond("add_airplane", move || {
        add_airplane(&app_state.persistence, &req)
    })
    .await
}

/// Handler for POST `/grant_or_revoke_pilot_license`.
async fn handle_pilot_license(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PilotLicenseRequest>,
) -> Response {
    info!(
        person_id = %req.person_id,
        license_type = %req.license_type,
        "Handling grant_or_revoke_pilot_license request"
    );
    respond("grant_or_revoke_pilot_license", move || {
        grant_or_revoke_pilot_license(&app_state.persistence, &req)
    })
    .await
}

/// Handler for POST `/offer_flight`.
async fn handle_offer_flight(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<OfferFlightRequest>,
) -> Response {
    info!(flight_id = %req.flight_id, route_id = %req.route_id, "Handling offer_flight request");
    respond("offer_flight", move || {
        offer_flight(&app_state.persistence, &req)
    })
    .await
}

/// Handler for POST `/assign_pilot`.
async fn handle_assign_pilot(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AssignPilotRequest>,
) -> Response {
    info!(
        flight_id = %req.flight_id,
        person_id = %req.person_id,
        "Handling assign_pilot request"
    );
    respond("assign_pilot", move || {
        assign_pilot(&app_state.persistence, &req)
    })
    .await
}

/// Handler for the POST endpoints that only name a flight.
async fn handle_flight_operation(
    app_state: AppState,
    operation: FlightOperation,
    req: FlightRequest,
) -> Response {
    let name: &'static str = operation.procedure().name();
    info!(flight_id = %req.flight_id, "Handling {name} request");
    respond(name, move || {
        flight_operation(&app_state.persistence, operation, &req)
    })
    .await
}

/// Handler for POST `/simulation_cycle`.
async fn handle_simulation_cycle(AxumState(app_state): AxumState<AppState>) -> Response {
    info!("Handling simulation_cycle request");
    respond("simulation_cycle", move || {
        simulation_cycle(&app_state.persistence)
    })
    .await
}

/// Handler for GET `/health`.
async fn handle_health(AxumState(app_state): AxumState<AppState>) -> Response {
    let backend: String = app_state.persistence.backend_name().to_string();
    let checked =
        tokio::task::spawn_blocking(move || app_state.persistence.health_check()).await;

    let (status, label): (StatusCode, &str) = match checked {
        Ok(Ok(())) => (StatusCode::OK, "ok"),
        Ok(Err(err)) => {
            error!(error = %err, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
        Err(err) => {
            error!(error = %err, "Health check worker failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    let body: Json<HealthResponse> = Json(HealthResponse {
        status: label.to_string(),
        backend,
    });
    (status, body).into_response()
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new()
        .route("/health", get(handle_health))
        .route("/add_airport", post(handle_add_airport))
        .route("/add_person", post(handle_add_person))
        .route("/add_airplane", post(handle_add_airplane))
        .route("/grant_or_revoke_pilot_license", post(handle_pilot_license))
        .route("/offer_flight", post(handle_offer_flight))
        .route("/assign_pilot", post(handle_assign_pilot))
        .route("/simulation_cycle", post(handle_simulation_cycle));

    for operation in FlightOperation::ALL {
        let path: String = format!("/{}", operation.procedure().name());
        router = router.route(
            &path,
            post(
                move |AxumState(app_state): AxumState<AppState>,
                      Json(req): Json<FlightRequest>| {
                    handle_flight_operation(app_state, operation, req)
                },
            ),
        );
    }

    router.with_state(app_state)
}

/// Opens the database selected on the command line.
fn open_persistence(args: &Args) -> Result<Persistence, Box<dyn std::error::Error>> {
    let persistence: Persistence = if let Some(url) = &args.mysql_url {
        info!("Using MySQL database");
        Persistence::new_with_mysql(url, args.pool_size)?
    } else if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path, args.pool_size)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some(seed_path) = &args.seed {
        let script: String = std::fs::read_to_string(seed_path)?;
        persistence.execute_sql_script(&script)?;
        info!("Loaded seed script from: {}", seed_path.display());
    }

    Ok(persistence)
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

    info!("Initializing Airsim Server");

    let persistence: Persistence = open_persistence(&args)?;
    let app: Router = build_router(AppState { persistence });

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use airsim::EngineCall;
    use airsim_persistence::{PersistenceError, ProcedureDriver, StoredProcedures};
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode as HttpStatusCode},
    };
    use diesel::{MysqlConnection, SqliteConnection};
    use std::sync::Arc;
    use tower::ServiceExt;

    const SEED_SQL: &str = "
        INSERT INTO location (location_id) VALUES ('port_1'), ('plane_1');
        INSERT INTO airline (airline_id, revenue) VALUES ('Delta', 0);
        INSERT INTO airport (airport_id, airport_name, city, state, country, location_id) VALUES
            ('ATL', 'Atlanta Hartsfield-Jackson International', 'Atlanta', 'Georgia', 'USA', 'port_1');
        INSERT INTO airplane (airline_id, tail_num, seat_capacity, speed, location_id, plane_type, maintained, model, neo) VALUES
            ('Delta', 'n106js', 4, 800, 'plane_1', 'Boeing', 1, '737', 0);
        INSERT INTO leg (leg_id, distance, departure, arrival) VALUES ('leg_1', 100, 'ATL', 'ATL');
        INSERT INTO route (route_id) VALUES ('loop');
        INSERT INTO route_path (route_id, leg_id, sequence) VALUES ('loop', 'leg_1', 1);
        INSERT INTO flight (flight_id, route_id, support_airline, support_tail, progress, airplane_status, next_time, cost) VALUES
            ('dl_10', 'loop', 'Delta', 'n106js', 0, 'on_ground', '08:00:00', 200);
        INSERT INTO person (person_id, first_name, last_name, location_id) VALUES
            ('p1', 'Jeanne', 'Nelson', 'plane_1');
        INSERT INTO pilot (person_id, tax_id, experience, commanding_flight) VALUES
            ('p1', '330-12-6907', 31, 'dl_10');
    ";

    /// Accepts every call without touching the database.
    struct AcceptingDriver;

    impl ProcedureDriver for AcceptingDriver {
        fn call_sqlite(
            &self,
            _conn: &mut SqliteConnection,
            _call: &EngineCall,
        ) -> Result<(), PersistenceError> {
            Ok(())
        }

        fn call_mysql(
            &self,
            conn: &mut MysqlConnection,
            call: &EngineCall,
        ) -> Result<(), PersistenceError> {
            StoredProcedures.call_mysql(conn, call)
        }
    }

    /// Helper to create test app state with a seeded in-memory database.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence = Persistence::new_in_memory()
            .expect("Failed to create in-memory persistence")
            .with_driver(Arc::new(AcceptingDriver));
        persistence
            .execute_sql_script(SEED_SQL)
            .expect("Failed to seed database");
        AppState { persistence }
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (HttpStatusCode, OutcomeResponse) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status: HttpStatusCode = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.backend, "sqlite");
    }

    #[tokio::test]
    async fn test_malformed_submission_is_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = post_json(
            app,
            "/add_airport",
            r#"{"airport_id": "LA", "name": "x", "city": "y", "country": "USA", "location_id": "port_9"}"#,
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body.outcome, "malformed_input");
        assert_eq!(body.field.as_deref(), Some("airport_id"));
    }

    #[tokio::test]
    async fn test_denied_submission_is_conflict() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = post_json(
            app,
            "/offer_flight",
            r#"{"flight_id": "dl_11", "route_id": "loop", "progress": "0", "cost": "10",
                "next_time": "10:00:00", "support_airline": "Delta"}"#,
        )
        .await;

        assert_eq!(status, HttpStatusCode::CONFLICT);
        assert_eq!(body.rule.as_deref(), Some("support_airplane_pair"));
        assert!(body.message.contains("must be provided together"));
    }

    #[tokio::test]
    async fn test_understaffed_boeing_takeoff_is_degraded() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) =
            post_json(app, "/flight_takeoff", r#"{"flight_id": "dl_10"}"#).await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body.outcome, "success_degraded");
        assert_eq!(body.required, Some(2));
        assert_eq!(body.actual, Some(1));
    }

    #[tokio::test]
    async fn test_engine_failure_is_bad_gateway() {
        let persistence: Persistence = Persistence::new_in_memory().unwrap();
        let app: Router = build_router(AppState { persistence });

        let (status, body) = post_json(app, "/simulation_cycle", "{}").await;

        assert_eq!(status, HttpStatusCode::BAD_GATEWAY);
        assert_eq!(body.outcome, "engine_failure");
        assert!(body.message.starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_every_flight_operation_is_routed() {
        let app_state: AppState = create_test_app_state();

        for operation in FlightOperation::ALL {
            let app: Router = build_router(app_state.clone());
            let uri: String = format!("/{}", operation.procedure().name());
            let (status, body) = post_json(app, &uri, r#"{"flight_id": "zz_0"}"#).await;
            assert_eq!(status, HttpStatusCode::CONFLICT, "{uri}");
            assert_eq!(body.rule.as_deref(), Some("flight_exists"));
        }
    }
}

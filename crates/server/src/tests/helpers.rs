// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use portlink_persistence::Persistence;
use serde_json::{Value, json};
use std::time::Duration;
use tower::ServiceExt;

use crate::{AppState, build_router};

/// Creates app state over a fresh in-memory database.
///
/// The simulator ticks every 20ms once started.
pub fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState::new(persistence, Duration::from_millis(20))
}

/// Sends one request through the router and decodes the JSON body.
///
/// Returns `Value::Null` for an empty body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub fn at(hour: u32) -> String {
    format!("2026-03-02T{hour:02}:00:00Z")
}

pub fn berth_body(code: &str, status: &str) -> Value {
    json!({
        "berth_code": code,
        "terminal_name": "North Terminal",
        "max_vessel_length": 400.0,
        "max_draft": 16.0,
        "facilities": "Cranes: 4",
        "status": status,
    })
}

pub fn vessel_body(imo: &str, name: &str, length_overall: f64) -> Value {
    json!({
        "imo_number": imo,
        "name": name,
        "vessel_type": "container",
        "flag_country": "Panama",
        "length_overall": length_overall,
        "beam": 48.0,
        "draft": 14.0,
        "status": "approaching",
    })
}

pub fn port_call_body(
    vessel_id: i64,
    berth_id: i64,
    arrival_hour: u32,
    departure_hour: u32,
    status: &str,
) -> Value {
    json!({
        "vessel_id": vessel_id,
        "berth_id": berth_id,
        "estimated_arrival": at(arrival_hour),
        "estimated_departure": at(departure_hour),
        "status": status,
    })
}

/// Registers berth B1 and vessels V1 (395m) and V2 (300m) over HTTP.
///
/// Returns `(berth_id, v1_id, v2_id)`.
pub async fn seed_b1_scenario(app: &Router) -> (i64, i64, i64) {
    let (_, berth) = send(app, "POST", "/berths", Some(berth_body("B1", "available"))).await;
    let (_, v1) = send(
        app,
        "POST",
        "/vessels",
        Some(vessel_body("IMO9000001", "Northern Light", 395.0)),
    )
    .await;
    let (_, v2) = send(
        app,
        "POST",
        "/vessels",
        Some(vessel_body("IMO9000002", "Southern Cross", 300.0)),
    )
    .await;

    (
        berth["berth_id"].as_i64().unwrap(),
        v1["vessel_id"].as_i64().unwrap(),
        v2["vessel_id"].as_i64().unwrap(),
    )
}

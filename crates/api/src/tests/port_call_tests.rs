// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use portlink::ValidationOutcome;
use portlink_domain::{PortCallStatus, RejectionKind, UtcTimestamp};

use super::helpers::{
    at, create_test_service, port_call_request, seed_scenario, vessel_request, TestService,
};
use crate::{
    ApiError, create_vessel, ListPortCallsQuery, PagedResponse, PortCallRequest, PortCallResponse,
    UpcomingQuery, ValidatePortCallRequest, approve_port_call, create_port_call,
    delete_port_call, get_port_call, list_active_port_calls, list_port_calls,
    list_upcoming_port_calls, update_port_call, validate_port_call,
};

// ============================================================================
// Creation
// ============================================================================

#[tokio::test]
async fn test_create_port_call_returns_names() {
    let service: TestService = create_test_service();
    let (berth_id, vessel_id, _) = seed_scenario(&service).await;

    let created: PortCallResponse = create_port_call(
        &service,
        &port_call_request(vessel_id, berth_id, 8, 20, "approaching"),
    )
    .await
    .unwrap();

    assert_eq!(created.vessel_name, "Nordic Star");
    assert_eq!(created.berth_code, "B1");
    assert_eq!(created.status, PortCallStatus::Approaching);
    assert_eq!(created.estimated_arrival.to_rfc3339().unwrap(), at(8));
}

#[tokio::test]
async fn test_create_port_call_defaults_to_scheduled() {
    let service: TestService = create_test_service();
    let (berth_id, vessel_id, _) = seed_scenario(&service).await;

    let mut request: PortCallRequest = port_call_request(vessel_id, berth_id, 8, 20, "scheduled");
    request.status = None;

    let created: PortCallResponse = create_port_call(&service, &request).await.unwrap();
    assert_eq!(created.status, PortCallStatus::Scheduled);
}

#[tokio::test]
async fn test_create_overlapping_port_call_is_rejected() {
    let service: TestService = create_test_service();
    let (berth_id, first, second) = seed_scenario(&service).await;

    create_port_call(&service, &port_call_request(first, berth_id, 8, 20, "approaching"))
        .await
        .unwrap();

    let result: Result<PortCallResponse, ApiError> = create_port_call(
        &service,
        &port_call_request(second, berth_id, 19, 23, "approaching"),
    )
    .await;

    let err: ApiError = result.unwrap_err();
    assert_eq!(err.kind(), "overlapping_booking");
    assert_eq!(err.http_status(), 409);
    assert!(err.message().contains("Nordic Star"));
}

#[tokio::test]
async fn test_back_to_back_port_calls_are_accepted() {
    let service: TestService = create_test_service();
    let (berth_id, first, second) = seed_scenario(&service).await;

    create_port_call(&service, &port_call_request(first, berth_id, 8, 20, "approaching"))
        .await
        .unwrap();
    let result: Result<PortCallResponse, ApiError> = create_port_call(
        &service,
        &port_call_request(second, berth_id, 20, 23, "approaching"),
    )
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_with_reversed_window_is_rejected() {
    let service: TestService = create_test_service();
    let (berth_id, vessel_id, _) = seed_scenario(&service).await;

    let err: ApiError = create_port_call(
        &service,
        &port_call_request(vessel_id, berth_id, 20, 8, "scheduled"),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        ApiError::DomainRuleViolation {
            rule: RejectionKind::InvalidTimeRange,
            ..
        }
    ));
    assert_eq!(err.http_status(), 400);
}

#[tokio::test]
async fn test_create_with_unknown_vessel_is_not_found() {
    let service: TestService = create_test_service();
    let (berth_id, _, _) = seed_scenario(&service).await;

    let err: ApiError = create_port_call(
        &service,
        &port_call_request(9_999, berth_id, 8, 20, "scheduled"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
    assert_eq!(err.http_status(), 404);
}

#[tokio::test]
async fn test_create_with_malformed_timestamp_names_field() {
    let service: TestService = create_test_service();
    let (berth_id, vessel_id, _) = seed_scenario(&service).await;

    let mut request: PortCallRequest = port_call_request(vessel_id, berth_id, 8, 20, "scheduled");
    request.estimated_departure = String::from("next tuesday");

    let err: ApiError = create_port_call(&service, &request).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "estimated_departure"
    ));
}

#[tokio::test]
async fn test_create_with_unknown_status_names_field() {
    let service: TestService = create_test_service();
    let (berth_id, vessel_id, _) = seed_scenario(&service).await;

    let err: ApiError = create_port_call(
        &service,
        &port_call_request(vessel_id, berth_id, 8, 20, "docked"),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "status"
    ));
}

#[tokio::test]
async fn test_create_publishes_port_call_changed() {
    let service: TestService = create_test_service();
    let (berth_id, vessel_id, _) = seed_scenario(&service).await;

    create_port_call(
        &service,
        &port_call_request(vessel_id, berth_id, 8, 20, "scheduled"),
    )
    .await
    .unwrap();

    let topics: Vec<&'static str> = service.notifier().topics();
    assert_eq!(topics.last(), Some(&"PortCallChanged"));
}

// ============================================================================
// Update, approval and deletion
// ============================================================================

#[tokio::test]
async fn test_update_missing_port_call_is_not_found() {
    let service: TestService = create_test_service();
    let (berth_id, vessel_id, _) = seed_scenario(&service).await;

    let err: ApiError = update_port_call(
        &service,
        404,
        &port_call_request(vessel_id, berth_id, 8, 20, "scheduled"),
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), "not_found");
}

#[tokio::test]
async fn test_update_metadata_keeps_schedule() {
    let service: TestService = create_test_service();
    let (berth_id, vessel_id, _) = seed_scenario(&service).await;

    let created: PortCallResponse = create_port_call(
        &service,
        &port_call_request(vessel_id, berth_id, 8, 20, "approaching"),
    )
    .await
    .unwrap();

    let mut request: PortCallRequest =
        port_call_request(vessel_id, berth_id, 8, 20, "berthed");
    request.actual_arrival = Some(at(9));
    request.notes = Some(String::from("Pilot on board"));

    let updated: PortCallResponse = update_port_call(&service, created.port_call_id, &request)
        .await
        .unwrap();

    assert_eq!(updated.status, PortCallStatus::Berthed);
    assert_eq!(updated.notes.as_deref(), Some("Pilot on board"));
    assert_eq!(
        updated.actual_arrival,
        Some(UtcTimestamp::parse_rfc3339(&at(9)).unwrap())
    );
}

#[tokio::test]
async fn test_update_to_unknown_vessel_is_not_found() {
    let service: TestService = create_test_service();
    let (berth_id, vessel_id, _) = seed_scenario(&service).await;

    let created: PortCallResponse = create_port_call(
        &service,
        &port_call_request(vessel_id, berth_id, 8, 20, "approaching"),
    )
    .await
    .unwrap();

    let err: ApiError = update_port_call(
        &service,
        created.port_call_id,
        &port_call_request(9_999, berth_id, 8, 20, "approaching"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
    assert_eq!(err.http_status(), 404);
}

#[tokio::test]
async fn test_update_to_oversized_vessel_is_rejected() {
    let service: TestService = create_test_service();
    let (berth_id, vessel_id, _) = seed_scenario(&service).await;
    let too_long: i64 = create_vessel(
        &service,
        &vessel_request("IMO9000450", "Too Long", 450.0, 11.0),
    )
    .await
    .unwrap()
    .vessel_id
    .unwrap();

    let created: PortCallResponse = create_port_call(
        &service,
        &port_call_request(vessel_id, berth_id, 8, 20, "approaching"),
    )
    .await
    .unwrap();

    let err: ApiError = update_port_call(
        &service,
        created.port_call_id,
        &port_call_request(too_long, berth_id, 8, 20, "approaching"),
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), "capacity_exceeded");
    let stored: PortCallResponse = get_port_call(service.store(), created.port_call_id)
        .await
        .unwrap();
    assert_eq!(stored.vessel_id, vessel_id);
}

#[tokio::test]
async fn test_update_into_occupied_slot_is_rejected() {
    let service: TestService = create_test_service();
    let (berth_id, first, second) = seed_scenario(&service).await;

    create_port_call(&service, &port_call_request(first, berth_id, 8, 12, "approaching"))
        .await
        .unwrap();
    let later: PortCallResponse = create_port_call(
        &service,
        &port_call_request(second, berth_id, 14, 18, "approaching"),
    )
    .await
    .unwrap();

    let err: ApiError = update_port_call(
        &service,
        later.port_call_id,
        &port_call_request(second, berth_id, 10, 18, "approaching"),
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), "overlapping_booking");
}

#[tokio::test]
async fn test_approve_moves_request_to_approaching() {
    let service: TestService = create_test_service();
    let (berth_id, vessel_id, _) = seed_scenario(&service).await;

    let queued: PortCallResponse = create_port_call(
        &service,
        &port_call_request(vessel_id, berth_id, 8, 20, "scheduled"),
    )
    .await
    .unwrap();

    let approved: PortCallResponse = approve_port_call(&service, queued.port_call_id)
        .await
        .unwrap();
    assert_eq!(approved.status, PortCallStatus::Approaching);
}

#[tokio::test]
async fn test_approve_over_committed_booking_is_rejected() {
    let service: TestService = create_test_service();
    let (berth_id, first, second) = seed_scenario(&service).await;

    let earlier: PortCallResponse = create_port_call(
        &service,
        &port_call_request(first, berth_id, 8, 20, "scheduled"),
    )
    .await
    .unwrap();
    let competing: PortCallResponse = create_port_call(
        &service,
        &port_call_request(second, berth_id, 10, 14, "scheduled"),
    )
    .await
    .unwrap();

    approve_port_call(&service, earlier.port_call_id)
        .await
        .unwrap();
    let err: ApiError = approve_port_call(&service, competing.port_call_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "overlapping_booking");

    let unchanged: PortCallResponse = get_port_call(service.store(), competing.port_call_id)
        .await
        .unwrap();
    assert_eq!(unchanged.status, PortCallStatus::Scheduled);
}

#[tokio::test]
async fn test_delete_frees_the_slot() {
    let service: TestService = create_test_service();
    let (berth_id, first, second) = seed_scenario(&service).await;

    let booked: PortCallResponse = create_port_call(
        &service,
        &port_call_request(first, berth_id, 8, 20, "approaching"),
    )
    .await
    .unwrap();
    delete_port_call(&service, booked.port_call_id).await.unwrap();

    let result: Result<PortCallResponse, ApiError> = create_port_call(
        &service,
        &port_call_request(second, berth_id, 8, 20, "approaching"),
    )
    .await;
    assert!(result.is_ok());

    let err: ApiError = get_port_call(service.store(), booked.port_call_id)
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 404);
}

#[tokio::test]
async fn test_delete_missing_port_call_is_not_found() {
    let service: TestService = create_test_service();

    let err: ApiError = delete_port_call(&service, 77).await.unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

// ============================================================================
// Dry-run validation
// ============================================================================

#[tokio::test]
async fn test_validate_reports_rejection_without_writing() {
    let service: TestService = create_test_service();
    let (berth_id, first, second) = seed_scenario(&service).await;

    create_port_call(&service, &port_call_request(first, berth_id, 8, 20, "approaching"))
        .await
        .unwrap();

    let request: ValidatePortCallRequest = ValidatePortCallRequest {
        port_call: port_call_request(second, berth_id, 10, 12, "approaching"),
        exclude_port_call_id: None,
    };
    let outcome: ValidationOutcome = validate_port_call(&service, &request).await.unwrap();

    match outcome {
        ValidationOutcome::Rejected(rejection) => {
            assert_eq!(rejection.kind, RejectionKind::OverlappingBooking);
            assert_eq!(rejection.http_status_hint, 409);
        }
        ValidationOutcome::Approved => panic!("Overlapping proposal must be rejected"),
    }

    let listed: PagedResponse<PortCallResponse> =
        list_port_calls(service.store(), &ListPortCallsQuery::default())
            .await
            .unwrap();
    assert_eq!(listed.total_count, 1);
}

#[tokio::test]
async fn test_validate_excluding_self_is_approved() {
    let service: TestService = create_test_service();
    let (berth_id, vessel_id, _) = seed_scenario(&service).await;

    let booked: PortCallResponse = create_port_call(
        &service,
        &port_call_request(vessel_id, berth_id, 8, 20, "approaching"),
    )
    .await
    .unwrap();

    let request: ValidatePortCallRequest = ValidatePortCallRequest {
        port_call: port_call_request(vessel_id, berth_id, 9, 21, "approaching"),
        exclude_port_call_id: Some(booked.port_call_id),
    };
    let outcome: ValidationOutcome = validate_port_call(&service, &request).await.unwrap();

    assert!(outcome.is_approved());
}

// ============================================================================
// Listings
// ============================================================================

#[tokio::test]
async fn test_list_port_calls_filters_and_pages() {
    let service: TestService = create_test_service();
    let (berth_id, first, second) = seed_scenario(&service).await;

    for (vessel_id, arrival, departure) in [(first, 1, 3), (second, 4, 6), (first, 7, 9)] {
        create_port_call(
            &service,
            &port_call_request(vessel_id, berth_id, arrival, departure, "approaching"),
        )
        .await
        .unwrap();
    }
    create_port_call(&service, &port_call_request(second, berth_id, 10, 12, "scheduled"))
        .await
        .unwrap();

    let query: ListPortCallsQuery = ListPortCallsQuery {
        status: Some(String::from("approaching")),
        page_number: Some(2),
        page_size: Some(2),
    };
    let page: PagedResponse<PortCallResponse> =
        list_port_calls(service.store(), &query).await.unwrap();

    assert_eq!(page.total_count, 3);
    assert_eq!(page.page_number, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].estimated_arrival.to_rfc3339().unwrap(), at(7));
}

#[tokio::test]
async fn test_list_port_calls_rejects_unknown_status() {
    let service: TestService = create_test_service();

    let query: ListPortCallsQuery = ListPortCallsQuery {
        status: Some(String::from("sailing")),
        ..ListPortCallsQuery::default()
    };
    let err: ApiError = list_port_calls(service.store(), &query).await.unwrap_err();

    assert_eq!(err.kind(), "invalid_input");
}

#[tokio::test]
async fn test_upcoming_and_active_listings() {
    let service: TestService = create_test_service();
    let (berth_id, first, second) = seed_scenario(&service).await;

    create_port_call(&service, &port_call_request(first, berth_id, 2, 6, "berthed"))
        .await
        .unwrap();
    create_port_call(&service, &port_call_request(second, berth_id, 10, 14, "scheduled"))
        .await
        .unwrap();
    create_port_call(&service, &port_call_request(first, berth_id, 16, 20, "approaching"))
        .await
        .unwrap();

    let now: UtcTimestamp = UtcTimestamp::parse_rfc3339(&at(8)).unwrap();
    let upcoming: Vec<PortCallResponse> =
        list_upcoming_port_calls(service.store(), now, &UpcomingQuery { limit: Some(1) })
            .await
            .unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].vessel_name, "Baltic Dawn");

    let active: Vec<PortCallResponse> = list_active_port_calls(service.store()).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].status, PortCallStatus::Berthed);
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_booking, day1};
use crate::PortEvent;
use portlink_domain::PortCallStatus;

#[test]
fn test_created_and_updated_share_a_topic() {
    let port_call = create_test_booking(1, 2, day1(8), day1(20), PortCallStatus::Scheduled);

    let created: PortEvent = PortEvent::PortCallCreated {
        port_call: port_call.clone(),
    };
    let updated: PortEvent = PortEvent::PortCallUpdated { port_call };

    assert_eq!(created.topic(), "PortCallChanged");
    assert_eq!(updated.topic(), "PortCallChanged");
    assert_eq!(
        PortEvent::PortCallDeleted { port_call_id: 1 }.topic(),
        "PortCallDeleted"
    );
}

#[test]
fn test_event_serializes_with_type_tag() {
    let event: PortEvent = PortEvent::PortCallDeleted { port_call_id: 7 };
    let json: serde_json::Value = serde_json::to_value(&event).unwrap();

    assert_eq!(json["type"], "port_call_deleted");
    assert_eq!(json["port_call_id"], 7);
}

#[test]
fn test_port_call_event_payload_uses_rfc3339() {
    let port_call = create_test_booking(1, 2, day1(8), day1(20), PortCallStatus::InProgress);
    let json: serde_json::Value =
        serde_json::to_value(PortEvent::PortCallUpdated { port_call }).unwrap();

    assert_eq!(json["type"], "port_call_updated");
    assert_eq!(json["port_call"]["estimated_arrival"], "2026-03-02T08:00:00Z");
    assert_eq!(json["port_call"]["status"], "in_progress");
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_booking, day1};
use crate::{BookingWindow, ConflictScope, PortCallDetails, PortCallStatus, find_conflicting_booking};

#[test]
fn test_overlap_is_symmetric() {
    let a: BookingWindow = BookingWindow::new(day1(8), day1(20));
    let b: BookingWindow = BookingWindow::new(day1(10), day1(22));

    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn test_back_to_back_windows_do_not_overlap() {
    let first: BookingWindow = BookingWindow::new(day1(8), day1(12));
    let second: BookingWindow = BookingWindow::new(day1(12), day1(18));

    assert!(!first.overlaps(&second));
    assert!(!second.overlaps(&first));
}

#[test]
fn test_contained_window_overlaps() {
    let outer: BookingWindow = BookingWindow::new(day1(0), day1(23));
    let inner: BookingWindow = BookingWindow::new(day1(5), day1(6));

    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn test_scheduled_proposal_only_conflicts_with_committed_bookings() {
    assert_eq!(
        ConflictScope::for_status(PortCallStatus::Scheduled),
        ConflictScope::Committed
    );

    let scope: ConflictScope = ConflictScope::Committed;
    assert!(!scope.includes(PortCallStatus::Scheduled));
    assert!(scope.includes(PortCallStatus::Approaching));
    assert!(scope.includes(PortCallStatus::Arrived));
    assert!(scope.includes(PortCallStatus::Berthed));
    assert!(scope.includes(PortCallStatus::InProgress));
    assert!(scope.includes(PortCallStatus::Delayed));
    assert!(!scope.includes(PortCallStatus::Completed));
    assert!(!scope.includes(PortCallStatus::Cancelled));
}

#[test]
fn test_non_scheduled_proposal_conflicts_with_all_open_bookings() {
    for status in [
        PortCallStatus::Approaching,
        PortCallStatus::Arrived,
        PortCallStatus::Berthed,
        PortCallStatus::InProgress,
        PortCallStatus::Delayed,
        PortCallStatus::Completed,
        PortCallStatus::Cancelled,
    ] {
        assert_eq!(ConflictScope::for_status(status), ConflictScope::AllOpen);
    }

    let scope: ConflictScope = ConflictScope::AllOpen;
    assert!(scope.includes(PortCallStatus::Scheduled));
    assert!(scope.includes(PortCallStatus::Delayed));
    assert!(!scope.includes(PortCallStatus::Completed));
    assert!(!scope.includes(PortCallStatus::Cancelled));
}

#[test]
fn test_excluded_statuses_match_scope() {
    for scope in [ConflictScope::AllOpen, ConflictScope::Committed] {
        for status in PortCallStatus::ALL {
            let excluded: bool = scope.excluded_statuses().contains(&status);
            assert_eq!(excluded, !scope.includes(status), "{scope:?} {status}");
        }
    }
}

#[test]
fn test_find_conflicting_booking_returns_first_overlap() {
    let existing: Vec<PortCallDetails> = vec![
        create_test_booking(1, "Early", day1(0), day1(6), PortCallStatus::Berthed),
        create_test_booking(2, "Clash A", day1(7), day1(11), PortCallStatus::Approaching),
        create_test_booking(3, "Clash B", day1(9), day1(13), PortCallStatus::Approaching),
    ];
    let proposed: BookingWindow = BookingWindow::new(day1(8), day1(20));

    let conflict = find_conflicting_booking(&proposed, ConflictScope::AllOpen, None, &existing);
    assert_eq!(conflict.map(|c| c.vessel_name.as_str()), Some("Clash A"));
}

#[test]
fn test_find_conflicting_booking_skips_excluded_id() {
    let existing: Vec<PortCallDetails> = vec![create_test_booking(
        5,
        "Self",
        day1(8),
        day1(20),
        PortCallStatus::Approaching,
    )];
    let proposed: BookingWindow = BookingWindow::new(day1(9), day1(21));

    assert!(find_conflicting_booking(&proposed, ConflictScope::AllOpen, Some(5), &existing).is_none());
    assert!(find_conflicting_booking(&proposed, ConflictScope::AllOpen, Some(6), &existing).is_some());
}

#[test]
fn test_closed_bookings_never_conflict() {
    let existing: Vec<PortCallDetails> = vec![
        create_test_booking(1, "Done", day1(8), day1(20), PortCallStatus::Completed),
        create_test_booking(2, "Gone", day1(8), day1(20), PortCallStatus::Cancelled),
    ];
    let proposed: BookingWindow = BookingWindow::new(day1(8), day1(20));

    assert!(find_conflicting_booking(&proposed, ConflictScope::AllOpen, None, &existing).is_none());
}

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_malformed_event_rows_are_skipped() {
    let slots = common::write_csv(
        common::SLOT_HEADER,
        &["F1-C001, car, 1, false", "F1-C002, car, 1, false"],
    );
    let events = common::write_csv(
        common::EVENT_HEADER,
        &[
            "park, 2024-05-01T08:00:00Z, ABC123, car, , , ",
            // Unknown event type
            "teleport, 2024-05-01T08:01:00Z, ABC123, car, , , ",
            // Unparseable timestamp
            "park, noon, DEF456, car, , , ",
            // Park without a category
            "park, 2024-05-01T08:02:00Z, GHI789, , , , ",
            "park, 2024-05-01T08:03:00Z, JKL012, car, , , ",
        ],
    );

    let mut cmd = Command::new(cargo_bin!("parkade"));
    cmd.arg(slots.path()).arg(events.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading event"))
        .stdout(predicate::str::contains("car,0,2,100.0"))
        .stdout(predicate::str::contains("active_stays,,2,"));
}

#[test]
fn test_unknown_ticket_is_reported() {
    let slots = common::write_csv(common::SLOT_HEADER, &["F1-C001, car, 1, false"]);
    let events = common::write_csv(
        common::EVENT_HEADER,
        &[
            "park, 2024-05-01T08:00:00Z, ABC123, car, , , ",
            "exit, 2024-05-01T09:00:00Z, , , TICKET-000042, cash, ",
            "exit, 2024-05-01T09:00:00Z, NOPE, , , cash, ",
        ],
    );

    let mut cmd = Command::new(cargo_bin!("parkade"));
    cmd.arg(slots.path()).arg(events.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Invalid ticket ID: TICKET-000042"))
        .stderr(predicate::str::contains("No active stay for plate NOPE"))
        .stdout(predicate::str::contains("active_stays,,1,"));
}

#[test]
fn test_invalid_layout_is_fatal() {
    let slots = common::write_csv(
        common::SLOT_HEADER,
        &["F1-C001, car, 1, false", "F1-B001, bus, 1, false"],
    );
    let events = common::write_csv(common::EVENT_HEADER, &[]);

    let mut cmd = Command::new(cargo_bin!("parkade"));
    cmd.arg(slots.path()).arg(events.path());

    cmd.assert().failure();
}

#[test]
fn test_duplicate_slot_ids_are_fatal() {
    let slots = common::write_csv(
        common::SLOT_HEADER,
        &["F1-C001, car, 1, false", "F1-C001, truck, 2, false"],
    );
    let events = common::write_csv(common::EVENT_HEADER, &[]);

    let mut cmd = Command::new(cargo_bin!("parkade"));
    cmd.arg(slots.path()).arg(events.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate slot id: F1-C001"));
}

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("parkade"));
    cmd.arg("tests/fixtures/slots.csv")
        .arg("tests/fixtures/events.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("scope,available,total,occupancy"))
        .stdout(predicate::str::contains("motorcycle,5,5,0.0"))
        .stdout(predicate::str::contains("car,5,7,28.6"))
        .stdout(predicate::str::contains("truck,1,2,50.0"))
        .stdout(predicate::str::contains("charging,7,8,12.5"))
        .stdout(predicate::str::contains("all,11,14,21.4"))
        .stdout(predicate::str::contains("active_stays,,3,"));

    Ok(())
}

#[test]
fn test_declined_payment_keeps_stay_active() {
    let slots = common::write_csv(common::SLOT_HEADER, &["F1-C001, car, 1, true"]);
    let events = common::write_csv(
        common::EVENT_HEADER,
        &[
            "park, 2024-05-01T08:00:00Z, EV001, electric_car, , , ",
            "exit, 2024-05-01T09:00:00Z, , , TICKET-000001, decline, ",
        ],
    );

    let mut cmd = Command::new(cargo_bin!("parkade"));
    cmd.arg(slots.path()).arg(events.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains(
            "Error processing event: Payment failed for ticket TICKET-000001 via Declined",
        ))
        .stdout(predicate::str::contains("car,0,1,100.0"))
        .stdout(predicate::str::contains("active_stays,,1,"));
}

#[test]
fn test_retry_after_decline_settles() {
    let slots = common::write_csv(common::SLOT_HEADER, &["F1-C001, car, 1, true"]);
    let events = common::write_csv(
        common::EVENT_HEADER,
        &[
            "park, 2024-05-01T08:00:00Z, EV001, electric_car, , , ",
            "exit, 2024-05-01T09:00:00Z, EV001, , , decline, ",
            "exit, 2024-05-01T09:10:00Z, EV001, , , digital, ",
        ],
    );

    let mut cmd = Command::new(cargo_bin!("parkade"));
    cmd.arg(slots.path()).arg(events.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("car,1,1,0.0"))
        .stdout(predicate::str::contains("active_stays,,0,"));
}

#[test]
fn test_full_facility_reports_capacity_errors() {
    let slots = common::write_csv(common::SLOT_HEADER, &["F1-M001, motorcycle, 1, false"]);
    let events = common::write_csv(
        common::EVENT_HEADER,
        &[
            "park, 2024-05-01T08:00:00Z, FBIKE01, motorcycle, , , ",
            "park, 2024-05-01T08:01:00Z, FBIKE02, motorcycle, , , ",
            "park, 2024-05-01T08:02:00Z, FTRUCK1, truck, , , ",
        ],
    );

    let mut cmd = Command::new(cargo_bin!("parkade"));
    cmd.arg(slots.path()).arg(events.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("No available slot for vehicle: FBIKE02"))
        .stderr(predicate::str::contains("No available slot for vehicle: FTRUCK1"))
        .stdout(predicate::str::contains("motorcycle,0,1,100.0"))
        .stdout(predicate::str::contains("active_stays,,1,"));
}

#[test]
fn test_custom_rates_file() {
    let slots = common::write_csv(common::SLOT_HEADER, &["F1-C001, car, 1, false"]);
    let events = common::write_csv(
        common::EVENT_HEADER,
        &["park, 2024-05-01T08:00:00Z, ABC123, car, , , "],
    );
    let rates = common::write_csv(r#"{ "hourly": { "car": 30 } }"#, &[]);

    let mut cmd = Command::new(cargo_bin!("parkade"));
    cmd.arg(slots.path())
        .arg(events.path())
        .arg("--rates")
        .arg(rates.path())
        .arg("--allocation")
        .arg("random")
        .arg("--seed")
        .arg("7");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("car,0,1,100.0"));
}

#[test]
fn test_invalid_rates_file_fails() {
    let slots = common::write_csv(common::SLOT_HEADER, &["F1-C001, car, 1, false"]);
    let events = common::write_csv(common::EVENT_HEADER, &[]);
    let rates = common::write_csv(r#"{ "flat": { "car": -5 } }"#, &[]);

    let mut cmd = Command::new(cargo_bin!("parkade"));
    cmd.arg(slots.path())
        .arg(events.path())
        .arg("--rates")
        .arg(rates.path());

    cmd.assert().failure();
}

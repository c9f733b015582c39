use std::net::TcpListener;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("e3372-ipchange"));
    cmd.env("NO_COLOR", "1");
    cmd
}

fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().expect("addr").port()
}

#[test]
fn manual_only_prints_console_script_for_confirmed_plan() {
    cmd()
        .arg("--manual-only")
        .write_stdin("\n10.0.0.1\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current IP: 192.168.8.1"))
        .stdout(predicate::str::contains("DHCP Range: 10.0.0.100 - 10.0.0.200"))
        .stdout(predicate::str::contains("1. Open http://192.168.8.1 in Chrome"))
        .stdout(predicate::str::contains(
            "<DhcpIPAddress>10.0.0.1</DhcpIPAddress>",
        ))
        .stdout(predicate::str::contains(
            "<DhcpStartIPAddress>10.0.0.100</DhcpStartIPAddress>",
        ))
        .stdout(predicate::str::contains(
            "<DhcpEndIPAddress>10.0.0.200</DhcpEndIPAddress>",
        ));
}

#[test]
fn blank_new_address_stops_cleanly() {
    cmd()
        .arg("--manual-only")
        .write_stdin("\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("New IP is required!"))
        .stdout(predicate::str::contains("Manual alternative").not());
}

#[test]
fn declined_confirmation_cancels() {
    cmd()
        .arg("--manual-only")
        .write_stdin("192.168.8.1\n192.168.18.1\nyes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("DHCP Range: 192.168.18.100 - 192.168.18.200"))
        .stdout(predicate::str::contains("Cancelled."))
        .stdout(predicate::str::contains("fetch(").not());
}

#[test]
fn invalid_current_address_is_rejected() {
    cmd()
        .arg("--manual-only")
        .write_stdin("192.168.8.999\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid IP format!"))
        .stdout(predicate::str::contains("Enter new device IP").not());
}

#[test]
fn unreachable_webdriver_still_prints_manual_fallback() {
    cmd()
        .arg("--chrome-url")
        .arg(format!("http://127.0.0.1:{}", closed_port()))
        .arg("--firefox-url")
        .arg(format!("http://127.0.0.1:{}", closed_port()))
        .arg("--edge-url")
        .arg(format!("http://127.0.0.1:{}", closed_port()))
        .write_stdin("\n10.0.0.1\ny\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no WebDriver server is reachable"))
        .stdout(predicate::str::contains("Enter current device IP"))
        .stdout(predicate::str::contains("All browser automation attempts failed"))
        .stdout(predicate::str::contains("Manual alternative"))
        .stdout(predicate::str::contains(
            "<DhcpIPAddress>10.0.0.1</DhcpIPAddress>",
        ))
        .stdout(predicate::str::contains("Trying with").not());
}

#[test]
fn unreachable_webdriver_then_cancel_exits_cleanly() {
    cmd()
        .arg("--browser")
        .arg("chrome")
        .arg("--chrome-url")
        .arg(format!("http://127.0.0.1:{}", closed_port()))
        .write_stdin("\n10.0.0.1\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."))
        .stdout(predicate::str::contains("Manual alternative").not());
}

#[test]
fn padded_confirmation_cancels() {
    cmd()
        .arg("--manual-only")
        .write_stdin("\n10.0.0.1\n y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."))
        .stdout(predicate::str::contains("Manual alternative").not());
}

#[test]
fn rejects_unknown_browser() {
    cmd()
        .arg("--browser")
        .arg("safari")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'safari'"));
}

//! Binary-level tests for the `page` command against real fixtures.

mod util;

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use util::make_project_fixture;

fn pgw() -> Command {
    Command::cargo_bin("pgw").expect("binary builds")
}

#[test]
fn creates_page_and_registers_route() {
    let tmp = make_project_fixture();

    pgw()
        .current_dir(tmp.path())
        .args(["page", "Dashboard", "--base-dir", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("registered route '/dashboard'"));

    tmp.child("pages/Dashboard/Dashboard.tsx")
        .assert(predicate::str::contains("const Dashboard: React.FC"));

    let router = std::fs::read_to_string(tmp.path().join("routes/routes.tsx")).unwrap();
    assert!(router.contains("import Dashboard from '../pages/Dashboard/Dashboard';"));
    assert!(router.contains("{ path: 'dashboard', element: <Dashboard /> },"));
    assert!(!router.contains("// Routes will be automatically added here"));
}

#[test]
fn second_run_reports_already_registered() {
    let tmp = make_project_fixture();
    let base = tmp.path().to_str().unwrap().to_string();

    pgw()
        .current_dir(tmp.path())
        .args(["page", "Dashboard", "--base-dir", &base])
        .assert()
        .success();

    let before = std::fs::read_to_string(tmp.path().join("routes/routes.tsx")).unwrap();

    pgw()
        .current_dir(tmp.path())
        .args(["page", "Dashboard", "--base-dir", &base])
        .assert()
        .success()
        .stdout(predicate::str::contains("already registered"));

    let after = std::fs::read_to_string(tmp.path().join("routes/routes.tsx")).unwrap();
    assert_eq!(before, after, "duplicate run leaves the router byte-identical");
}

#[test]
fn missing_router_file_gets_skeleton_created() {
    let tmp = assert_fs::TempDir::new().unwrap();

    pgw()
        .current_dir(tmp.path())
        .args(["page", "Home", "--base-dir", tmp.path().to_str().unwrap()])
        .assert()
        .success();

    tmp.child("routes/routes.tsx")
        .assert(predicate::str::contains("createBrowserRouter"))
        .assert(predicate::str::contains("{ path: 'home', element: <Home /> },"));
}

#[test]
fn invalid_page_name_is_rejected() {
    let tmp = make_project_fixture();

    pgw()
        .current_dir(tmp.path())
        .args(["page", "not-a-page", "--base-dir", tmp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid page name"));

    tmp.child("pages").assert(predicate::path::missing());
}

#[test]
fn dry_run_writes_nothing() {
    let tmp = make_project_fixture();

    pgw()
        .current_dir(tmp.path())
        .args([
            "page",
            "Dashboard",
            "--dry-run",
            "--base-dir",
            tmp.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"));

    tmp.child("pages").assert(predicate::path::missing());
    let router = std::fs::read_to_string(tmp.path().join("routes/routes.tsx")).unwrap();
    assert!(router.contains("// Routes will be automatically added here"));
}

#[test]
fn json_flag_emits_machine_readable_report() {
    let tmp = make_project_fixture();

    pgw()
        .current_dir(tmp.path())
        .args([
            "page",
            "Dashboard",
            "--json",
            "--base-dir",
            tmp.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"reason\":\"registered\""));
}

#[test]
fn init_scaffolds_config_file() {
    let tmp = assert_fs::TempDir::new().unwrap();

    pgw()
        .current_dir(tmp.path())
        .args(["init"])
        .assert()
        .success();

    tmp.child("pagewright.toml")
        .assert(predicate::str::contains("project_type = \"react\""));
}

#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pathwise(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pathwise").unwrap();
    cmd.current_dir(dir.path()).env("PATHWISE_ROOT", dir.path());
    cmd
}

fn init_project(dir: &TempDir) {
    pathwise(dir).arg("init").assert().success();
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

// ---------------------------------------------------------------------------
// pathwise init
// ---------------------------------------------------------------------------

#[test]
fn init_writes_config() {
    let dir = TempDir::new().unwrap();
    pathwise(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created: .pathwise/config.yaml"));

    let config = std::fs::read_to_string(dir.path().join(".pathwise/config.yaml")).unwrap();
    assert!(config.contains("base_url"));
    assert!(config.contains("/onboarding"));
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    pathwise(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:"));
}

#[test]
fn init_records_backend_url() {
    let dir = TempDir::new().unwrap();
    let json = json_output(
        pathwise(&dir).args(["--json", "init", "--backend-url", "https://api.example.test"]),
    );
    assert_eq!(json["created"], true);

    let config = std::fs::read_to_string(dir.path().join(".pathwise/config.yaml")).unwrap();
    assert!(config.contains("https://api.example.test"));
}

// ---------------------------------------------------------------------------
// pathwise resolve
// ---------------------------------------------------------------------------

#[test]
fn resolve_reads_snapshot_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("progress.json");
    std::fs::write(&file, r#"{"verificationCode": "482913"}"#).unwrap();

    pathwise(&dir)
        .args(["resolve", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("verify_email"))
        .stdout(predicate::str::contains("/verify-email"));
}

#[test]
fn resolve_reads_stdin() {
    let dir = TempDir::new().unwrap();
    let json = json_output(
        pathwise(&dir)
            .args(["--json", "resolve"])
            .write_stdin(r#"{"skillsAssessment": [{"q": 1}], "selectedSkills": []}"#),
    );
    assert_eq!(json["rule"], "skills_assessed");
    assert_eq!(json["decision"]["step"], "two");
    assert_eq!(json["route"], "/onboarding?step=two");
}

#[test]
fn resolve_login_new_user_opens_chooser() {
    let dir = TempDir::new().unwrap();
    let json = json_output(
        pathwise(&dir)
            .args(["--json", "resolve", "--context", "login"])
            .write_stdin(r#"{"pickedSkill": null}"#),
    );
    assert_eq!(json["rule"], "new_user");
    assert_eq!(json["context"], "login");
    assert_eq!(json["effect"]["effect"], "open_skill_chooser");
}

#[test]
fn resolve_complete_learner_lands_on_dashboard() {
    let dir = TempDir::new().unwrap();
    let json = json_output(
        pathwise(&dir)
            .args(["--json", "resolve", "--current", "/my-learning"])
            .write_stdin(
                r#"{"user": {"pickedSkill": "SQL", "selectedSkills": [{}], "careerAssessment": [{}], "learningPath": [{}]}}"#,
            ),
    );
    assert_eq!(json["decision"]["kind"], "dashboard");
    assert_eq!(json["effect"]["effect"], "none");
}

#[test]
fn resolve_rejects_unknown_context() {
    let dir = TempDir::new().unwrap();
    pathwise(&dir)
        .args(["resolve", "--context", "home"])
        .write_stdin("{}")
        .assert()
        .failure();
}

#[test]
fn resolve_rejects_invalid_json() {
    let dir = TempDir::new().unwrap();
    pathwise(&dir)
        .arg("resolve")
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid progress snapshot"));
}

// ---------------------------------------------------------------------------
// pathwise rules / validate
// ---------------------------------------------------------------------------

#[test]
fn rules_lists_table_with_fallback() {
    let dir = TempDir::new().unwrap();
    pathwise(&dir)
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("verify_email"))
        .stdout(predicate::str::contains("fallback"));

    let json = json_output(pathwise(&dir).args(["--json", "rules"]));
    assert_eq!(json.as_array().unwrap().len(), 9);
}

#[test]
fn validate_requires_init() {
    let dir = TempDir::new().unwrap();
    pathwise(&dir).arg("validate").assert().failure();

    init_project(&dir);
    pathwise(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

// ---------------------------------------------------------------------------
// pathwise streak / goal
// ---------------------------------------------------------------------------

#[test]
fn streak_counts_consecutive_days() {
    let dir = TempDir::new().unwrap();
    pathwise(&dir)
        .args(["streak", "check-in", "--date", "2026-05-01"])
        .assert()
        .success();
    pathwise(&dir)
        .args(["streak", "check-in", "--date", "2026-05-02"])
        .assert()
        .success();

    let json = json_output(pathwise(&dir).args(["--json", "streak", "show", "--date", "2026-05-02"]));
    assert_eq!(json["current"], 2);
    assert_eq!(json["longest"], 2);

    assert!(dir.path().join(".pathwise/local-store.json").exists());
}

#[test]
fn streak_rejects_bad_date() {
    let dir = TempDir::new().unwrap();
    pathwise(&dir)
        .args(["streak", "check-in", "--date", "May 1st"])
        .assert()
        .failure();
}

#[test]
fn goal_add_list_remove() {
    let dir = TempDir::new().unwrap();
    let goal = json_output(pathwise(&dir).args(["--json", "goal", "add", "Daily SQL", "--days", "3"]));
    let id = goal["id"].as_str().unwrap().to_string();

    pathwise(&dir)
        .args(["goal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily SQL"))
        .stdout(predicate::str::contains("0/3"));

    pathwise(&dir).args(["goal", "remove", &id]).assert().success();
    pathwise(&dir)
        .args(["goal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No goals"));
}

#[test]
fn goal_complete_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    pathwise(&dir)
        .args(["goal", "complete", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

// ---------------------------------------------------------------------------
// pathwise next
// ---------------------------------------------------------------------------

#[test]
fn next_requires_init() {
    let dir = TempDir::new().unwrap();
    pathwise(&dir).arg("next").assert().failure();
}

#[test]
fn next_resolves_backend_snapshot() {
    let mut backend = mockito::Server::new();
    let mock = backend
        .mock("GET", "/users/me")
        .match_header("authorization", "Bearer secret-token")
        .with_status(200)
        .with_body(r#"{"user": {"pickedSkill": "UX Design"}}"#)
        .create();

    let dir = TempDir::new().unwrap();
    pathwise(&dir)
        .args(["init", "--backend-url", &backend.url()])
        .assert()
        .success();

    let json = json_output(
        pathwise(&dir)
            .env("PATHWISE_TOKEN", "secret-token")
            .args(["--json", "next", "--context", "signup"]),
    );
    mock.assert();
    assert_eq!(json["rule"], "skill_picked_directly");
    assert_eq!(json["route"], "/roadmap");
}

#[test]
fn next_reports_backend_errors() {
    let mut backend = mockito::Server::new();
    backend
        .mock("GET", "/users/me")
        .with_status(401)
        .with_body(r#"{"message": "token expired"}"#)
        .create();

    let dir = TempDir::new().unwrap();
    pathwise(&dir)
        .args(["init", "--backend-url", &backend.url()])
        .assert()
        .success();

    pathwise(&dir)
        .arg("next")
        .assert()
        .failure()
        .stderr(predicate::str::contains("token expired"));
}

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

#[test]
fn todos_help_works() {
    Command::cargo_bin("todos")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("task-list REST API"));
}

#[test]
fn subcommand_help_works() {
    for cmd in ["serve", "seed"] {
        Command::cargo_bin("todos")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}

#[test]
fn seed_populates_the_data_dir() {
    let dir = TempDir::new().expect("temp dir");

    Command::cargo_bin("todos")
        .expect("binary")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("seed")
        .assert()
        .success();

    let users = std::fs::read_to_string(dir.path().join("users.json")).expect("users.json");
    assert!(users.contains("krishna"));
    let tasks = std::fs::read_to_string(dir.path().join("tasks.json")).expect("tasks.json");
    assert!(tasks.contains("Complete project documentation"));
}

#[test]
fn missing_explicit_config_fails() {
    Command::cargo_bin("todos")
        .expect("binary")
        .arg("--config")
        .arg("/definitely/not/here.toml")
        .arg("seed")
        .assert()
        .failure();
}

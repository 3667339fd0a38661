use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn curricula() -> Command {
    Command::cargo_bin("curricula").unwrap()
}

#[test]
fn test_cli_help() {
    curricula()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Curriculum analysis and test generation backend"));
}

#[test]
fn test_cli_serve_help() {
    curricula().arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_serve_requires_database_url() {
    curricula()
        .env_remove("DATABASE_URL")
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL must be set"));
}

#[test]
fn test_migrate_requires_database_url() {
    curricula()
        .env("DATABASE_URL", "  ")
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL must be set"));
}

#[test]
fn test_render_prompt_from_stdin() {
    curricula()
        .args(["render-prompt", "--subject", "Physics", "--grade", "9", "--file", "-"])
        .write_stdin("Newton's laws of motion {grade}")
        .assert()
        .success()
        .stdout(predicate::str::contains("Physics"))
        .stdout(predicate::str::contains("Newton's laws of motion {grade}"));
}

#[test]
fn test_render_prompt_from_file() {
    let path = std::env::temp_dir().join(format!("curricula-cli-{}.txt", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "Photosynthesis and respiration").unwrap();
    drop(file);

    curricula()
        .args(["render-prompt", "-s", "Biology", "-g", "8", "-f"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Photosynthesis and respiration"));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_render_prompt_empty_input_fails() {
    curricula()
        .args(["render-prompt", "--subject", "Physics", "--grade", "9", "--file", "-"])
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("curriculum text is empty"));
}

#[test]
fn test_parse_without_llm_config_fails_fast() {
    curricula()
        .env_remove("AZURE_OPENAI_ENDPOINT")
        .env_remove("AZURE_OPENAI_API_KEY")
        .args(["parse", "--subject", "Physics", "--grade", "9", "--file", "-"])
        .write_stdin("Kinematics")
        .assert()
        .failure()
        .stderr(predicate::str::contains("AZURE_OPENAI_ENDPOINT is not set"));
}

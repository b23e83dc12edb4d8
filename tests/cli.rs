use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SNIPPETS: &str = "dgx_system: DGX A100\nnvidia_driver: '510.39'\ngpu_model: A100\n";

fn extractor() -> Command {
    let mut cmd = Command::cargo_bin("matrix-extractor").unwrap();
    cmd.env_remove("MATRIX_REGISTRY")
        .env_remove("CONTAINER_RUNTIME")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_flags() {
    extractor()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--version"))
        .stdout(predicate::str::contains("--snippets"))
        .stdout(predicate::str::contains("--file"));
}

#[test]
fn missing_mandatory_snippet_aborts() {
    let dir = TempDir::new().unwrap();
    let snippets = dir.path().join("snippets.yaml");
    std::fs::write(&snippets, "dgx_system: DGX A100\nnvidia_driver: '510.39'\n").unwrap();

    extractor()
        .args(["-v", "22.02", "--runtime", "/nonexistent/docker"])
        .arg("-s")
        .arg(&snippets)
        .arg("-f")
        .arg(dir.path().join("data.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("gpu_model"));

    assert!(!dir.path().join("data.json").exists());
}

#[test]
fn missing_snippets_file_aborts() {
    let dir = TempDir::new().unwrap();

    extractor()
        .arg("-s")
        .arg(dir.path().join("nope.yaml"))
        .arg("-f")
        .arg(dir.path().join("data.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load snippets"));
}

#[test]
fn unreachable_runtime_skips_every_image() {
    let dir = TempDir::new().unwrap();
    let snippets = dir.path().join("snippets.yaml");
    std::fs::write(&snippets, SNIPPETS).unwrap();
    let data = dir.path().join("data.json");
    let existing = "{\n  \"nvcr.io/nvidia/merlin/merlin-training\": {\n    \"22.01\": {\n      \"cuda\": \"11.5\"\n    }\n  }\n}\n";
    std::fs::write(&data, existing).unwrap();

    extractor()
        .args(["--version", "22.02", "--runtime", "/nonexistent/docker"])
        .arg("--snippets")
        .arg(&snippets)
        .arg("--file")
        .arg(&data)
        .assert()
        .success()
        .stderr(predicate::str::contains("merlin-training:22.02"));

    assert_eq!(std::fs::read_to_string(&data).unwrap(), existing);
}

//! Integration test suite for the `jd` CLI
use assert_cmd::Command;

/// Helper function to run the `jd` binary with the given arguments and return
/// a [`assert_cmd::assert::Assert`]. Colors are always disabled.
fn run_main(args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("jd").expect("Failed to find main binary");
    cmd.arg("--no-color").args(args);
    cmd.assert()
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone())
        .expect("Invalid UTF-8 output")
}

fn stderr_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stderr.clone())
        .expect("Invalid UTF-8 output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn compact_output_round_trips_through_serde_json() {
        let assert = run_main(&["--compact", "tests/data/simple.json"])
            .success()
            .code(0);
        let output = stdout_of(&assert);
        assert_eq!(output.lines().count(), 1);

        let output_json: Value =
            serde_json::from_str(output.trim()).expect("Failed to parse output");
        let expected: Value = serde_json::from_str(
            &std::fs::read_to_string("tests/data/simple.json").unwrap(),
        )
        .unwrap();
        assert_eq!(output_json, expected);
    }

    #[test]
    fn pretty_output_preserves_key_order() {
        let assert = run_main(&["tests/data/simple.json"]).success();
        let output = stdout_of(&assert);
        let name = output.find("\"name\"").unwrap();
        let address = output.find("\"address\"").unwrap();
        assert!(name < address);
        assert!(output.contains("\n  \"age\": 30,\n"));
    }

    #[test]
    fn reads_stdin() {
        let mut cmd = Command::cargo_bin("jd").unwrap();
        let assert = cmd
            .args(["--no-color", "--compact"])
            .write_stdin(r#" [1, "two", {"three": null}] "#)
            .assert()
            .success();
        assert_eq!(stdout_of(&assert), "[1,\"two\",{\"three\":null}]\n");
    }

    #[test]
    fn depth_flag() {
        let assert =
            run_main(&["--depth", "--compact", "tests/data/simple.json"])
                .success();
        let output = stdout_of(&assert);
        assert_eq!(output.lines().next(), Some("Depth: 3"));
    }

    #[test]
    fn token_listing() {
        let assert =
            run_main(&["--tokens", "tests/data/simple.json"]).success();
        let output = stdout_of(&assert);
        let first = output.lines().next().unwrap();
        assert!(first.contains("ObjectStart"), "got {first:?}");
        assert!(output.contains("\"Wonderland\""));
        assert!(output.lines().any(|l| l.contains("Null")));
    }

    #[test]
    fn nonexistent_file() {
        let assert = run_main(&["does/not/exist.json"]).failure().code(1);
        assert!(stderr_of(&assert).contains("Failed to read file"));
    }

    #[test]
    fn empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let assert = run_main(&[path]).failure().code(1);
        let stderr = stderr_of(&assert);
        assert!(stderr.contains("Unexpected end of input"), "got {stderr:?}");
    }

    #[test]
    fn non_utf8_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"[\"\xff\"]").unwrap();
        let path = file.path().to_str().unwrap();
        let assert = run_main(&[path]).failure().code(1);
        assert!(stderr_of(&assert).contains("Failed to read file"));
    }

    #[test]
    fn overflowing_number_rejected() {
        let mut cmd = Command::cargo_bin("jd").unwrap();
        let assert = cmd
            .arg("--no-color")
            .write_stdin(format!("[1{}]", "0".repeat(400)))
            .assert()
            .failure()
            .code(1);
        let stderr = stderr_of(&assert);
        assert!(stderr.contains("Malformed number"), "got {stderr:?}");
    }

    #[test]
    fn trailing_content_rejected() {
        let assert = run_main(&["tests/data/trailing.json"]).failure().code(1);
        let stderr = stderr_of(&assert);
        assert!(stderr.contains("line 2, column 1"), "got {stderr:?}");
        assert!(stderr.contains("trailing content"));
    }

    #[test]
    fn trailing_content_allowed() {
        let assert = run_main(&[
            "--compact",
            "--allow-trailing",
            "tests/data/trailing.json",
        ])
        .success();
        assert_eq!(stdout_of(&assert), "{\"a\":1}\n");
    }

    #[test]
    fn duplicate_key_policies() {
        let assert = run_main(&["--compact", "tests/data/duplicate.json"])
            .success();
        assert_eq!(stdout_of(&assert), "{\"id\":2,\"tags\":[\"x\"]}\n");

        let assert = run_main(&[
            "--compact",
            "--duplicate-keys",
            "first-wins",
            "tests/data/duplicate.json",
        ])
        .success();
        assert_eq!(stdout_of(&assert), "{\"id\":1,\"tags\":[\"x\"]}\n");

        let assert = run_main(&[
            "--duplicate-keys",
            "reject",
            "tests/data/duplicate.json",
        ])
        .failure()
        .code(1);
        assert!(stderr_of(&assert).contains("Duplicate object key \"id\""));
    }

    #[test]
    fn malformed_input_reports_location() {
        let assert = run_main(&["tests/data/malformed.json"]).failure().code(1);
        let stderr = stderr_of(&assert);
        assert!(stderr.contains("line 3"), "got {stderr:?}");
        assert!(stderr.contains("control character in string literal"));
    }

    #[test]
    fn max_depth_flag() {
        let mut cmd = Command::cargo_bin("jd").unwrap();
        let assert = cmd
            .args(["--no-color", "--max-depth", "2"])
            .write_stdin("[[[]]]")
            .assert()
            .failure()
            .code(1);
        assert!(stderr_of(&assert).contains("Maximum nesting depth of 2"));

        let deep = format!("{}{}", "[".repeat(300), "]".repeat(300));
        let mut cmd = Command::cargo_bin("jd").unwrap();
        cmd.args(["--no-color", "--compact", "--unlimited-depth"])
            .write_stdin(deep.clone())
            .assert()
            .success()
            .stdout(format!("{deep}\n"));
    }

    #[test]
    fn generate_man_pages() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_str().unwrap();
        run_main(&["generate", "man", "--output-dir", out]).success();
        assert!(dir.path().join("jd.1").exists());
        assert!(dir.path().join("jd-generate.1").exists());
        assert!(dir.path().join("jd-generate-man.1").exists());
    }

    #[test]
    fn generate_shell_completions() {
        let assert = run_main(&["generate", "shell", "bash"]).success();
        assert!(stdout_of(&assert).contains("jd"));
    }
}

//! Integration tests for pkgscope

mod cli_tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn pkgscope() -> Command {
        Command::cargo_bin("pkgscope").unwrap()
    }

    #[test]
    fn help_displays() {
        pkgscope()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Package descriptor resolver"));
    }

    #[test]
    fn version_displays() {
        pkgscope()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("pkgscope"));
    }

    #[test]
    fn read_missing_descriptor_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let descriptor = temp.path().join("package.json");

        pkgscope()
            .args(["read", descriptor.to_str().unwrap(), "--no-local"])
            .assert()
            .success()
            .stdout(predicate::str::contains("exists:"));
    }

    #[test]
    fn read_valid_descriptor() {
        let temp = TempDir::new().unwrap();
        let descriptor = temp.path().join("package.json");
        std::fs::write(
            &descriptor,
            r#"{"name":"demo","type":"module","main":"index.js"}"#,
        )
        .unwrap();

        pkgscope()
            .args(["read", descriptor.to_str().unwrap(), "--no-local"])
            .assert()
            .success()
            .stdout(predicate::str::contains("demo"))
            .stdout(predicate::str::contains("module"));
    }

    #[test]
    fn read_json_output_parses() {
        let temp = TempDir::new().unwrap();
        let descriptor = temp.path().join("package.json");
        std::fs::write(&descriptor, r#"{"name":"demo","type":"commonjs"}"#).unwrap();

        let output = pkgscope()
            .args(["read", descriptor.to_str().unwrap(), "--json", "--no-local"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed["name"], "demo");
        assert_eq!(parsed["type"], "commonjs");
        assert_eq!(parsed["exists"], true);
    }

    #[test]
    fn resolve_walks_to_governing_descriptor() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"name":"workspace","type":"module"}"#,
        )
        .unwrap();
        let nested = temp.path().join("src").join("lib");
        std::fs::create_dir_all(&nested).unwrap();
        let module = nested.join("util.js");
        std::fs::write(&module, "export {}\n").unwrap();

        pkgscope()
            .args(["resolve", module.to_str().unwrap(), "--no-local"])
            .assert()
            .success()
            .stdout(predicate::str::contains("workspace"))
            .stdout(predicate::str::contains("module kind: module"));
    }

    #[test]
    fn resolve_malformed_descriptor_fails() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("package.json"), "{not valid json").unwrap();
        let module = temp.path().join("index.js");
        std::fs::write(&module, "").unwrap();

        pkgscope()
            .args(["resolve", module.to_str().unwrap(), "--no-local"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid package config"));
    }

    #[test]
    fn resolve_detect_syntax_uses_hint() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("package.json"), r#"{"name":"untyped"}"#).unwrap();
        let module = temp.path().join("index.js");
        std::fs::write(&module, "import 'x'\n").unwrap();

        pkgscope()
            .args([
                "resolve",
                module.to_str().unwrap(),
                "--detect-syntax",
                "--hint",
                "module",
                "--no-local",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("module kind: module"));
    }

    #[test]
    fn resolve_explicit_type_beats_hint() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"name":"cjs","type":"commonjs"}"#,
        )
        .unwrap();
        let module = temp.path().join("index.js");
        std::fs::write(&module, "import 'x'\n").unwrap();

        pkgscope()
            .args([
                "resolve",
                module.to_str().unwrap(),
                "--detect-syntax",
                "--hint",
                "module",
                "--no-local",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("module kind: commonjs"));
    }

    #[test]
    fn config_show() {
        pkgscope()
            .args(["config", "show", "--no-local"])
            .assert()
            .success()
            .stdout(predicate::str::contains("detect_syntax"));
    }

    #[test]
    fn config_path() {
        pkgscope()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.json"));
    }

    #[test]
    fn completions_generate() {
        pkgscope()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("pkgscope"));
    }
}

mod run_tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn pkgscope() -> Command {
        Command::cargo_bin("pkgscope").unwrap()
    }

    #[test]
    fn run_lists_scripts() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"scripts":{"greet":"echo hi","build":"true"}}"#,
        )
        .unwrap();

        pkgscope()
            .args(["run", "--dir", temp.path().to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("greet"))
            .stdout(predicate::str::contains("build"));
    }

    #[test]
    fn run_unknown_script_fails() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"scripts":{"build":"true"}}"#,
        )
        .unwrap();

        pkgscope()
            .args(["run", "--dir", temp.path().to_str().unwrap(), "missing"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Script not found"));
    }

    #[cfg(unix)]
    #[test]
    fn run_executes_script() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"scripts":{"greet":"echo hello-from-script"}}"#,
        )
        .unwrap();

        pkgscope()
            .args(["run", "--dir", temp.path().to_str().unwrap(), "greet"])
            .assert()
            .success()
            .stdout(predicate::str::contains("hello-from-script"));
    }

    #[cfg(unix)]
    #[test]
    fn run_failing_script_propagates() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"scripts":{"boom":"exit 3"}}"#,
        )
        .unwrap();

        pkgscope()
            .args(["run", "--dir", temp.path().to_str().unwrap(), "boom"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("exited with code 3"));
    }
}

mod policy_tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn pkgscope() -> Command {
        Command::cargo_bin("pkgscope").unwrap()
    }

    fn integrity_of(content: &[u8]) -> String {
        use sha2::{Digest, Sha256};
        format!("sha256-{}", hex::encode(Sha256::digest(content)))
    }

    fn file_url(path: &std::path::Path) -> String {
        format!("file://{}", path.display())
    }

    #[test]
    fn matching_policy_passes() {
        let temp = TempDir::new().unwrap();
        let content = r#"{"name":"signed","type":"module"}"#;
        let descriptor = temp.path().join("package.json");
        std::fs::write(&descriptor, content).unwrap();

        let policy = format!(
            r#"{{"resources":{{"{}":{{"integrity":"{}"}}}}}}"#,
            file_url(&descriptor),
            integrity_of(content.as_bytes()),
        );
        let policy_path = temp.path().join("policy.json");
        std::fs::write(&policy_path, policy).unwrap();

        pkgscope()
            .args([
                "read",
                descriptor.to_str().unwrap(),
                "--policy",
                policy_path.to_str().unwrap(),
                "--no-local",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("signed"));
    }

    #[test]
    fn tampered_descriptor_rejected() {
        let temp = TempDir::new().unwrap();
        let descriptor = temp.path().join("package.json");
        std::fs::write(&descriptor, r#"{"name":"tampered"}"#).unwrap();

        let policy = format!(
            r#"{{"resources":{{"{}":{{"integrity":"{}"}}}}}}"#,
            file_url(&descriptor),
            integrity_of(b"original content"),
        );
        let policy_path = temp.path().join("policy.json");
        std::fs::write(&policy_path, policy).unwrap();

        pkgscope()
            .args([
                "read",
                descriptor.to_str().unwrap(),
                "--policy",
                policy_path.to_str().unwrap(),
                "--no-local",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Integrity check failed"));
    }
}

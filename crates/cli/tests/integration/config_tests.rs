//! Runner configuration and plan mode tests.

use predicates::prelude::*;
use serial_test::serial;

use super::common::{TestEnv, Tool};

#[test]
#[serial]
fn config_in_source_root_changes_entry_point() {
  let env = TestEnv::new(Tool::Succeed, Tool::Succeed);
  env.write_file(
    "src/steprun.json",
    r#"{ "entry_point": "org.example.Harness", "runtime_args": ["-ea"] }"#,
  );

  env.steprun_cmd().assert().success();

  let calls = env.calls();
  assert!(calls[1].starts_with("java -ea "));
  assert!(calls[1].ends_with(" org.example.Harness"));
}

#[test]
#[serial]
fn explicit_config_relocates_harness() {
  let env = TestEnv::new(Tool::Succeed, Tool::Succeed);
  env.write_file("src/harness/Probe.java", "public class Probe {}\n");
  env.write_file(
    "custom.json",
    r#"{ "work_dir": "harness", "source_file": "Probe.java", "entry_point": "Probe" }"#,
  );

  env
    .steprun_cmd()
    .arg("--config")
    .arg(env.root.join("custom.json"))
    .assert()
    .success();

  assert!(env.source_root().join("harness/javac.cwd").exists());
  assert!(env.calls()[0].ends_with(" Probe.java"));
}

#[test]
#[serial]
fn invalid_config_is_a_setup_failure() {
  let env = TestEnv::new(Tool::Succeed, Tool::Succeed);
  env.write_file("src/steprun.json", r#"{ "entrypoint": "Main" }"#);

  env
    .steprun_cmd()
    .assert()
    .code(3)
    .stderr(predicate::str::contains("invalid config"));

  assert!(env.calls().is_empty());
}

#[test]
#[serial]
fn plan_prints_commands_without_running_them() {
  let env = TestEnv::new(Tool::Succeed, Tool::Succeed);

  env
    .steprun_cmd()
    .arg("--plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("compile"))
    .stdout(predicate::str::contains("-Djava.library.path="))
    .stdout(predicate::str::contains(env.work_dir().display().to_string()));

  assert!(env.calls().is_empty());
  assert!(!env.work_dir().join("javac.cwd").exists());
}

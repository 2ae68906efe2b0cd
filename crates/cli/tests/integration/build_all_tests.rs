use predicates::prelude::*;
use serde_json::Value;

use super::common::TestEnv;

const MANIFEST: &str = r#"{
  "functions": [
    { "id": "api", "entry": "src/api.ts", "config": "webpack.config.js" },
    { "id": "worker", "entry": "src/worker.js", "config": "webpack.config.js", "handler": "run" },
    { "id": "cleanup", "uuid": "2b9c7e", "lambdaPurpose": "cleanup", "entry": "src/cleanup.ts", "config": "webpack.config.js" }
  ]
}"#;

fn env_with_functions() -> TestEnv {
  let env = TestEnv::project();
  env.install_working_bundler();
  for file in ["src/api.ts", "src/worker.js", "src/cleanup.ts"] {
    env.write_file(file, "export const handler = () => {};");
  }
  env.write_file("fnpack.json", MANIFEST);
  env
}

#[test]
fn builds_every_function() {
  let env = env_with_functions();

  let output = env
    .fnpack_cmd()
    .args(["build-all", "-j", "2", "-o", "json"])
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();
  let json: Value = serde_json::from_slice(&output).unwrap();

  let outcomes = json.as_array().unwrap();
  assert_eq!(outcomes.len(), 3);
  assert_eq!(outcomes[0]["id"], "api");
  assert_eq!(outcomes[0]["function"]["handler"], "api.handler");
  assert_eq!(outcomes[1]["function"]["handler"], "worker.run");
  assert_eq!(outcomes[2]["function"]["kind"], "singleton");
  assert_eq!(outcomes[2]["function"]["uuid"], "2b9c7e");

  let dirs: std::collections::HashSet<&str> = outcomes
    .iter()
    .map(|o| o["function"]["codeAsset"].as_str().unwrap())
    .collect();
  assert_eq!(dirs.len(), 3);
}

#[test]
fn reports_failed_functions_and_exits_non_zero() {
  let env = env_with_functions();
  std::fs::remove_file(env.root().join("src/worker.js")).unwrap();

  env
    .fnpack_cmd()
    .arg("build-all")
    .assert()
    .failure()
    .stdout(predicate::str::contains("Built api"))
    .stdout(predicate::str::contains("Built cleanup"))
    .stderr(predicate::str::contains("worker: Cannot find entry file"))
    .stderr(predicate::str::contains("1 of 3 function(s) failed"));
}

#[test]
fn rejects_duplicate_ids() {
  let env = TestEnv::project();
  env.write_file(
    "fnpack.json",
    r#"{ "functions": [
      { "id": "api", "entry": "src/handler.ts", "config": "webpack.config.js" },
      { "id": "api", "entry": "src/handler.ts", "config": "webpack.config.js" }
    ] }"#,
  );

  env
    .fnpack_cmd()
    .arg("build-all")
    .assert()
    .failure()
    .stderr(predicate::str::contains("duplicate function id: api"));
}

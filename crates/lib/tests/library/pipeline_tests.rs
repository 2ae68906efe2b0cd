use fnpack_lib::bundler::{BundlerError, FixedLocator, WebpackExecutor};
use fnpack_lib::props::FunctionBuildProps;
use fnpack_lib::resolve::{ResolveError, resolve, resolve_with_webpack};
use fnpack_lib::runtime::Runtime;
use fnpack_lib::util::hash::hash_path;

use serial_test::serial;

use super::common::{Project, without_bundler_override};

fn props(project: &Project) -> FunctionBuildProps {
  FunctionBuildProps::new(
    project.root().join("src/handler.ts"),
    project.root().join("webpack.config.js"),
  )
}

#[test]
#[serial]
fn builds_into_hashed_directory() {
  without_bundler_override(async {
    let project = Project::new();
    project.install_working_bundler();
    let props = props(&project);

    let resolved = resolve_with_webpack(&props).await.unwrap();

    let expected_dir = project
      .root()
      .join("src")
      .join(".build")
      .join(hash_path(&props.entry).0);
    assert_eq!(resolved.handler_directory, expected_dir);
    assert_eq!(resolved.output_basename, "handler");
    assert_eq!(resolved.handler_name, "handler");
    assert_eq!(resolved.runtime, Runtime::default());
    let bundled = std::fs::read_to_string(expected_dir.join("handler.js")).unwrap();
    assert!(bundled.contains("({ statusCode: 200 })"));

    let args = project.bundler_args();
    let entry_at = args.iter().position(|a| a == "--entry").unwrap();
    assert_eq!(args[entry_at + 1], props.entry.to_string_lossy());
    let filename_at = args.iter().position(|a| a == "--output-filename").unwrap();
    assert_eq!(args[filename_at + 1], "handler.js");
  });
}

#[test]
#[serial]
fn second_run_can_skip_the_build() {
  without_bundler_override(async {
    let project = Project::new();
    project.install_working_bundler();
    let props = props(&project);

    let built = resolve_with_webpack(&props).await.unwrap();
    let runs_after_build = project.bundler_args().len();

    // Sources removed, as in a deploy-only pipeline step.
    std::fs::remove_file(&props.entry).unwrap();
    let skipped = resolve_with_webpack(&props.clone().with_skip_build(true)).await.unwrap();

    assert_eq!(skipped, built);
    assert_eq!(project.bundler_args().len(), runs_after_build);
  });
}

#[test]
#[serial]
fn failing_bundler_reports_status_and_stderr() {
  without_bundler_override(async {
    let project = Project::new();
    let bin = project.install_bundler("echo 'Module not found: ./db' >&2\nexit 2");

    let err = resolve(&props(&project), || WebpackExecutor::new(&FixedLocator(bin)))
      .await
      .unwrap_err();

    match err {
      ResolveError::Bundler(BundlerError::BuildFailed(failure)) => {
        assert_eq!(failure.status, Some(2));
        assert!(failure.stderr.contains("Module not found"));
      }
      other => panic!("expected BuildFailed, got {:?}", other),
    }
  });
}

#[test]
#[serial]
fn missing_bundler_is_reported_only_when_building() {
  without_bundler_override(async {
    let project = Project::new();
    let props = props(&project);

    let err = resolve_with_webpack(&props).await.unwrap_err();
    assert!(matches!(err, ResolveError::Bundler(BundlerError::NotInstalled { .. })));

    let err = resolve_with_webpack(&props.with_skip_build(true)).await.unwrap_err();
    assert!(matches!(err, ResolveError::BuiltArtifactMissing(_)));
  });
}

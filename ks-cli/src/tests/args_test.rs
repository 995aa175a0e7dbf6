use std::time::Duration;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use assertables::*;

use super::*;

fn parse(args: &[&str]) -> KsCommandRoot {
    KsCommandRoot::try_parse_from(args).unwrap()
}

#[rstest]
fn test_defaults() {
    let root = parse(&["kstatus", "check"]);
    let config = root.global.load_config().unwrap();

    assert_matches!(root.subcommand, KsSubcommand::Check);
    assert_eq!(root.global.working_dir, PathBuf::from("."));
    assert_eq!(config, StatusCheckConfig::default());
}

#[rstest]
fn test_flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    let config_file = dir.child("status-check.yml");
    config_file
        .write_str("---\ndeploymentTimeoutSeconds: 60\ndefaultNamespace: from-file\nwaitForJobs: false\n")
        .unwrap();

    let path = config_file.path().to_string_lossy().to_string();
    let root = parse(&["kstatus", "check", "--config", &path, "--timeout", "0", "--wait-for-jobs", "-n", "apps"]);
    let config = root.global.load_config().unwrap();

    assert_none!(config.deployment_timeout());
    assert_eq!(config.default_namespace(), "apps");
    assert!(config.wait_for_jobs);
    assert_eq!(config.stabilization_timeout(), Duration::ZERO);
}

#[rstest]
fn test_config_file_kept_without_flags() {
    let dir = TempDir::new().unwrap();
    let config_file = dir.child("status-check.yml");
    config_file.write_str("---\ndeploymentTimeoutSeconds: 60\nkubectlExecutable: /opt/kubectl\n").unwrap();

    let path = config_file.path().to_string_lossy().to_string();
    let config = parse(&["kstatus", "-c", &path, "resources"]).global.load_config().unwrap();

    assert_eq!(config.deployment_timeout(), Some(Duration::from_secs(60)));
    assert_eq!(config.kubectl_executable.as_deref(), Some("/opt/kubectl"));
}

#[rstest]
fn test_missing_config_file() {
    let root = parse(&["kstatus", "check", "--config", "/does/not/exist.yml"]);
    assert_err!(root.global.load_config());
}

#[rstest]
fn test_exec_takes_trailing_command() {
    let root = parse(&["kstatus", "exec", "--", "kubectl", "apply", "-f", "deployment.yml"]);
    let KsSubcommand::Exec(args) = root.subcommand else {
        panic!("expected exec");
    };
    assert_eq!(args.command, vec!["kubectl", "apply", "-f", "deployment.yml"]);
}

#[rstest]
fn test_exec_requires_command() {
    assert_err!(KsCommandRoot::try_parse_from(["kstatus", "exec"]));
}

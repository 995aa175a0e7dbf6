use assert_fs::TempDir;
use assert_fs::prelude::*;

use super::*;
use crate::apply::manifest_groups;

#[rstest]
fn test_manifest_groups_default_files() {
    let dir = TempDir::new().unwrap();
    dir.child("service.yml").write_str("").unwrap();
    dir.child("secret.yml").write_str("").unwrap();

    let wd = dir.path().to_string_lossy().to_string();
    let root = KsCommandRoot::try_parse_from(["kstatus", "apply", "-C", &wd]).unwrap();
    let config = root.global.load_config().unwrap();

    assert_eq!(
        manifest_groups(&config, &root.global),
        vec![dir.path().join("secret.yml"), dir.path().join("service.yml")]
    );
}

#[rstest]
fn test_manifest_groups_grouped_directories() {
    let dir = TempDir::new().unwrap();
    let config_file = dir.child("config.yml");
    config_file.write_str("---\nmanifests:\n  groupedYamlDirectories: [first, second]\n").unwrap();

    let wd = dir.path().to_string_lossy().to_string();
    let config_path = config_file.path().to_string_lossy().to_string();
    let root = KsCommandRoot::try_parse_from(["kstatus", "apply", "-C", &wd, "-c", &config_path]).unwrap();
    let config = root.global.load_config().unwrap();

    assert_eq!(manifest_groups(&config, &root.global), vec![dir.path().join("first"), dir.path().join("second")]);
}

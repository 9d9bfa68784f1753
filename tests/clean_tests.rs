//! Integration tests for cleaning staged artifacts.

mod helpers;

use binstage::clean::clean_staged;
use binstage::{collect_to, Config};
use helpers::{create_mock_binary, list_dir, TestEnv};
use std::fs;

#[test]
fn test_clean_removes_only_allow_listed_files() {
    let env = TestEnv::new();
    create_mock_binary(&env.build, "init", b"i");
    create_mock_binary(&env.build, "sh", b"s");
    collect_to(&env.config(), false, &mut Vec::new()).unwrap();
    fs::write(env.bin.join("fs.img.conf"), b"keep").unwrap();

    let removed = clean_staged(&env.config()).unwrap();

    assert_eq!(removed.len(), 2);
    assert_eq!(list_dir(&env.bin), vec!["fs.img.conf"]);
}

#[test]
fn test_clean_leaves_directories_alone() {
    let env = TestEnv::new();
    fs::create_dir_all(env.bin.join("init")).unwrap();

    let removed = clean_staged(&env.config()).unwrap();

    assert!(removed.is_empty());
    assert!(env.bin.join("init").is_dir());
}

#[test]
fn test_clean_missing_destination_is_noop() {
    let env = TestEnv::new();
    let config = Config::new(&env.build, env.bin.join("absent"), &["init"]);

    let removed = clean_staged(&config).unwrap();

    assert!(removed.is_empty());
}

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn blogsite_cmd() -> Command {
    let mut cmd = Command::cargo_bin("blogsite").unwrap();
    cmd.env_remove("APP_ENV");
    cmd.env_remove("BLOG_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write `contents` to `rel` under `root`, creating parent directories
pub fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

pub fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

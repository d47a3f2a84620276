//! Integration tests for the tags command

#![allow(deprecated)]

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::{blogsite_cmd, write};

#[test]
fn test_tags_no_tags_found() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/index.md", "No front matter here");

    blogsite_cmd()
        .arg("--root")
        .arg(temp.path())
        .arg("tags")
        .assert()
        .success()
        .stdout("No tags found\n");
}

#[test]
fn test_tags_skips_reserved_and_deduplicates() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/a.md", "---\ntags: [post, go]\n---\n");
    write(temp.path(), "src/b.md", "---\ntags: rust\n---\n");
    write(temp.path(), "src/c.md", "---\ntitle: Untagged\n---\n");
    write(temp.path(), "src/d.html", "---\ntags: [nav, go, posts]\n---\n");

    blogsite_cmd()
        .arg("--root")
        .arg(temp.path())
        .arg("tags")
        .assert()
        .success()
        .stdout("#go\n#rust\n");
}

#[test]
fn test_tags_does_not_need_manifest() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/a.md", "---\ntags: go\n---\n");

    // Production is the default and there is no manifest on disk
    blogsite_cmd()
        .arg("--root")
        .arg(temp.path())
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("#go"));
}

#[test]
fn test_tags_finds_root_from_env() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/a.md", "---\ntags: go\n---\n");

    blogsite_cmd()
        .env("BLOG_ROOT", temp.path())
        .arg("tags")
        .assert()
        .success()
        .stdout("#go\n");
}

#[test]
fn test_tags_finds_root_by_walking_up() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "blogsite.toml", "[dirs]\ninput = \"content\"\n");
    write(temp.path(), "content/posts/a.md", "---\ntags: rust\n---\n");

    blogsite_cmd()
        .current_dir(temp.path().join("content/posts"))
        .arg("tags")
        .assert()
        .success()
        .stdout("#rust\n");
}

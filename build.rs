//! Build script for jury-personas
//!
//! Embeds git revision, build timestamp, target and compiler version.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let git_hash = git(&["rev-parse", "--short=8", "HEAD"]).unwrap_or_else(unknown);
    let git_dirty = match git(&["status", "--porcelain"]) {
        Some(status) if !status.is_empty() => "true",
        Some(_) => "false",
        None => "unknown",
    };
    let build_timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let target = env::var("TARGET").unwrap_or_else(|_| unknown());
    let profile = env::var("PROFILE").unwrap_or_else(|_| unknown());
    let rustc_version = run("rustc", &["--version"]).unwrap_or_else(unknown);

    println!("cargo:rustc-env=JURY_GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=JURY_GIT_DIRTY={}", git_dirty);
    println!("cargo:rustc-env=JURY_BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rustc-env=JURY_TARGET={}", target);
    println!("cargo:rustc-env=JURY_PROFILE={}", profile);
    println!("cargo:rustc-env=JURY_RUSTC_VERSION={}", rustc_version);
}

fn unknown() -> String {
    "unknown".to_string()
}

fn git(args: &[&str]) -> Option<String> {
    run("git", args)
}

/// Trimmed stdout of a successful command.
fn run(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

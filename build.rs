//! Embeds commit/build-time metadata as rustc-env vars read by `build_info`.
//!
//! Kept dependency-free and resilient: when git or date tooling is missing,
//! stable "unknown"/epoch markers are emitted instead of failing the build.

use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    track_git_head();
    emit("TGPT_BUILD_GIT_HASH", commit_hash);
    emit("TGPT_BUILD_TIMESTAMP", build_timestamp);
}

/// Emit one rustc-env var, honoring an external override of the same name.
fn emit(var: &str, fallback: fn() -> String) {
    println!("cargo:rerun-if-env-changed={var}");
    let value = std::env::var(var).unwrap_or_else(|_| fallback());
    println!("cargo:rustc-env={var}={value}");
}

/// Rebuild when HEAD moves, including commits on the current branch ref.
fn track_git_head() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    if let Ok(head) = std::fs::read_to_string(".git/HEAD") {
        if let Some(reference) = head.trim().strip_prefix("ref: ") {
            println!("cargo:rerun-if-changed=.git/{reference}");
        }
    }
}

fn commit_hash() -> String {
    capture("git", &["rev-parse", "--short=12", "HEAD"]).unwrap_or_else(|| "unknown".to_string())
}

fn build_timestamp() -> String {
    capture("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]).unwrap_or_else(|| {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|delta| delta.as_secs())
            .unwrap_or(0);
        format!("unix:{secs}")
    })
}

fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

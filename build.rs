//! Stamps the commit and build time into the binary for `nucleus --version`
//! and the session banner.
//!
//! Either value can be pinned through `NUCLEUS_BUILD_GIT_HASH` or
//! `NUCLEUS_BUILD_TIMESTAMP`. Otherwise the commit comes from git and the
//! time from `SOURCE_DATE_EPOCH` or the clock, rendered as UTC RFC 3339.

use std::env;
use std::fs;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const HASH_VAR: &str = "NUCLEUS_BUILD_GIT_HASH";
const TIMESTAMP_VAR: &str = "NUCLEUS_BUILD_TIMESTAMP";

fn main() {
    watch_git_head();
    for var in [HASH_VAR, TIMESTAMP_VAR, "SOURCE_DATE_EPOCH"] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    stamp(HASH_VAR, commit_hash);
    stamp(TIMESTAMP_VAR, build_time);
}

/// Export `var` to rustc, preferring a value pinned in the environment.
fn stamp(var: &str, detect: fn() -> String) {
    let value = env::var(var)
        .ok()
        .filter(|pinned| !pinned.trim().is_empty())
        .unwrap_or_else(detect);
    println!("cargo:rustc-env={var}={value}");
}

fn watch_git_head() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    let Ok(head) = fs::read_to_string(".git/HEAD") else {
        return;
    };
    if let Some(branch) = head.trim().strip_prefix("ref: ") {
        println!("cargo:rerun-if-changed=.git/{branch}");
    }
}

fn commit_hash() -> String {
    let Ok(output) = Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
    else {
        return "unknown".to_string();
    };
    let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if output.status.success() && !hash.is_empty() {
        hash
    } else {
        "unknown".to_string()
    }
}

fn build_time() -> String {
    let secs = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or(0)
        });
    rfc3339_utc(secs)
}

/// Format seconds since the epoch as `YYYY-MM-DDTHH:MM:SSZ`.
fn rfc3339_utc(secs: u64) -> String {
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (year, month, day) = civil_from_days(days);
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}Z",
        rem / 3600,
        rem % 3600 / 60,
        rem % 60
    )
}

/// Proleptic Gregorian date for a day count since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

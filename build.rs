//! Stamps the binary with its source commit and build time.
//!
//! The commit is read straight from `.git` (loose or packed ref). The build
//! time honors `SOURCE_DATE_EPOCH` so release builds can be reproduced.

use std::env;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

const GIT_HASH_VAR: &str = "STEAM_UWU_BUILD_GIT_HASH";
const TIMESTAMP_VAR: &str = "STEAM_UWU_BUILD_TIMESTAMP";
const SOURCE_DATE_EPOCH_VAR: &str = "SOURCE_DATE_EPOCH";
const SHORT_HASH_LEN: usize = 12;

fn main() {
    for var in [GIT_HASH_VAR, TIMESTAMP_VAR, SOURCE_DATE_EPOCH_VAR] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    let commit = env::var(GIT_HASH_VAR)
        .ok()
        .or_else(|| head_commit(Path::new(".git")))
        .unwrap_or_else(|| "unknown".to_string());
    let built_at = env::var(TIMESTAMP_VAR).unwrap_or_else(|_| format_utc(build_epoch()));

    println!("cargo:rustc-env={GIT_HASH_VAR}={commit}");
    println!("cargo:rustc-env={TIMESTAMP_VAR}={built_at}");
}

/// Short hash of `HEAD`, following a symbolic ref when checked out on a branch.
fn head_commit(git_dir: &Path) -> Option<String> {
    let head_path = git_dir.join("HEAD");
    let head = fs::read_to_string(&head_path).ok()?;
    watch(&head_path);

    let full = match head.trim().strip_prefix("ref: ") {
        Some(reference) => resolve_ref(git_dir, reference)?,
        None => head.trim().to_string(),
    };
    let short = full.get(..SHORT_HASH_LEN)?;
    short
        .bytes()
        .all(|b| b.is_ascii_hexdigit())
        .then(|| short.to_string())
}

fn resolve_ref(git_dir: &Path, reference: &str) -> Option<String> {
    let loose = git_dir.join(reference);
    if let Ok(hash) = fs::read_to_string(&loose) {
        watch(&loose);
        return Some(hash.trim().to_string());
    }

    let packed_path = git_dir.join("packed-refs");
    let packed = fs::read_to_string(&packed_path).ok()?;
    watch(&packed_path);
    packed
        .lines()
        .filter(|line| !line.starts_with('#') && !line.starts_with('^'))
        .find_map(|line| {
            let (hash, name) = line.split_once(' ')?;
            (name.trim() == reference).then(|| hash.to_string())
        })
}

fn watch(path: &Path) {
    println!("cargo:rerun-if-changed={}", path.display());
}

fn build_epoch() -> u64 {
    env::var(SOURCE_DATE_EPOCH_VAR)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or(0)
        })
}

/// `YYYY-MM-DDTHH:MM:SSZ` for a Unix timestamp (proleptic Gregorian, UTC).
fn format_utc(epoch: u64) -> String {
    let days = (epoch / 86_400) as i64;
    let secs = epoch % 86_400;

    // Days-to-civil over 400-year eras starting 0000-03-01.
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let day_of_era = z.rem_euclid(146_097);
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400 + i64::from(month <= 2);

    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}Z",
        secs / 3_600,
        secs % 3_600 / 60,
        secs % 60
    )
}

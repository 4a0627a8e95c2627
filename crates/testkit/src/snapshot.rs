//! Golden-file snapshots for formation tests.
//!
//! Values are serialized as canonical pretty JSON (object keys sorted, trailing
//! newline) and compared against a file checked in next to the test. Set
//! `FORMATION_UPDATE_SNAPSHOTS=1` to write the current output instead.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Environment variable that enables snapshot updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "FORMATION_UPDATE_SNAPSHOTS";

/// Assert that `value` matches the JSON snapshot stored at `path`.
///
/// On mismatch the error names the first differing line so float drift in a
/// single coordinate is easy to spot.
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let actual = canonical_json(value)?;

    if should_update_snapshots() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        return fs::write(path, &actual)
            .with_context(|| format!("Failed to write snapshot {}", path.display()));
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "Snapshot missing at {} (run with {}=1 to create it)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        )
    })?;

    match first_difference(&expected, &actual) {
        None => Ok(()),
        Some((line, want, got)) => anyhow::bail!(
            "Snapshot mismatch at {} line {}: expected `{}`, got `{}` (run with {}=1 to update)",
            path.display(),
            line,
            want,
            got,
            UPDATE_SNAPSHOTS_ENV
        ),
    }
}

/// Serialize `value` the way snapshots are stored.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value).context("Failed to serialize snapshot value")?;
    let mut out = serde_json::to_string_pretty(&sort_keys(value))
        .context("Failed to format snapshot JSON")?;
    out.push('\n');
    Ok(out)
}

fn should_update_snapshots() -> bool {
    matches!(
        std::env::var(UPDATE_SNAPSHOTS_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(values) => Value::Array(values.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// 1-based line number and contents of the first line that differs.
fn first_difference<'a>(expected: &'a str, actual: &'a str) -> Option<(usize, &'a str, &'a str)> {
    if expected == actual {
        return None;
    }
    let mut want = expected.lines();
    let mut got = actual.lines();
    let mut line = 1;
    loop {
        match (want.next(), got.next()) {
            (Some(a), Some(b)) if a == b => line += 1,
            (None, None) => return Some((line, "<trailing whitespace>", "")),
            (a, b) => return Some((line, a.unwrap_or("<eof>"), b.unwrap_or("<eof>"))),
        }
    }
}

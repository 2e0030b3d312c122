//! Assertions over the CLI's JSON output.

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Check `summary.total`, `summary.received` and `summary.lost`.
pub fn assert_summary_counts(json: &Value, total: u64, received: u64, lost: u64) -> Result<()> {
    let summary = json
        .get("summary")
        .context("Expected 'summary' object in JSON")?;

    for (field, expected) in [("total", total), ("received", received), ("lost", lost)] {
        let actual = summary[field]
            .as_u64()
            .with_context(|| format!("Missing summary.{}", field))?;
        if actual != expected {
            bail!("summary.{}: expected {}, got {}", field, expected, actual);
        }
    }

    Ok(())
}

/// Check frame states in order, e.g. `["un_generated", "generated"]`.
pub fn assert_frame_states(json: &Value, expected: &[&str]) -> Result<()> {
    let frames = json["frames"]
        .as_array()
        .context("Expected 'frames' array in JSON")?;

    let states: Vec<&str> = frames
        .iter()
        .map(|f| f["state"].as_str().unwrap_or("?"))
        .collect();

    if states != expected {
        bail!("Expected frame states {:?}, got {:?}", expected, states);
    }

    Ok(())
}

/// Lane index of every NACK span, in placement order.
pub fn nack_lanes(json: &Value) -> Result<Vec<u64>> {
    json["spans"]
        .as_array()
        .context("Expected 'spans' array in JSON")?
        .iter()
        .map(|s| s["lane"].as_u64().context("span without lane"))
        .collect()
}

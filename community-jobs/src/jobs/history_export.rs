//! History-export job: merge per-channel Slack export dumps into a single
//! text-only JSON file.
//!
//! The export layout is `<data_dir>/<channel>/<date>.json`, each file a JSON
//! array of messages. Only plain messages (type `message`, no subtype)
//! contribute; their texts are appended per channel across files in path
//! order. The merged map is built fully in memory and written once, so a
//! failed run leaves no partial output file behind.

use glob::glob;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::JobError;

#[derive(Debug, Deserialize)]
struct ExportedMessage {
    #[serde(rename = "type", default)]
    kind: String,
    subtype: Option<String>,
    text: Option<String>,
}

pub fn run(config: &Config) -> Result<(), JobError> {
    export_history(
        Path::new(&config.history_export.data_dir),
        Path::new(&config.history_export.output_path),
    )
}

pub fn export_history(data_dir: &Path, output_path: &Path) -> Result<(), JobError> {
    let pattern = data_dir.join("*/*.json");
    let pattern = pattern.to_string_lossy().into_owned();

    let mut paths: Vec<PathBuf> = glob(&pattern)
        .map_err(|e| JobError::Other(format!("Invalid export pattern '{}': {}", pattern, e)))?
        .collect::<Result<_, _>>()
        .map_err(|e| JobError::Other(format!("Failed to walk export directory: {}", e)))?;
    paths.sort();

    let mut by_channel: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for path in &paths {
        let channel = path
            .parent()
            .and_then(|dir| dir.file_name())
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                JobError::Other(format!("No channel directory for {}", path.display()))
            })?
            .to_string();

        let content = fs::read_to_string(path)
            .map_err(|e| JobError::Other(format!("Failed to read {}: {}", path.display(), e)))?;
        let messages: Vec<ExportedMessage> = serde_json::from_str(&content)
            .map_err(|e| JobError::Other(format!("Failed to parse {}: {}", path.display(), e)))?;

        let texts: Vec<String> = messages
            .into_iter()
            .filter(|message| message.kind == "message" && message.subtype.is_none())
            .filter_map(|message| message.text)
            .collect();

        debug!(
            "{}: {} plain messages from {}",
            channel,
            texts.len(),
            path.display()
        );
        by_channel.entry(channel).or_default().extend(texts);
    }

    let merged = serde_json::to_vec(&by_channel)
        .map_err(|e| JobError::Other(format!("Failed to serialize merged history: {}", e)))?;
    fs::write(output_path, merged).map_err(|e| {
        JobError::Other(format!("Failed to write {}: {}", output_path.display(), e))
    })?;

    info!(
        "Wrote merged history for {} channels ({} files) to {}",
        by_channel.len(),
        paths.len(),
        output_path.display()
    );
    Ok(())
}

//! Segment lists stored on disk (TOML, YAML or JSON)

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::form::{FormController, TimeFields};

/// One row in a plan file; times are clock strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFileSegment {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub name: String,
}

/// Saved set of segments with an optional date label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFile {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub segments: Vec<PlanFileSegment>,
}

impl PlanFile {
    /// Read a plan file, picking the format from the extension
    pub fn load(path: &Path) -> Result<Self, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::FsFail(format!("Failed to read plan file {}: {}", path.display(), e))
        })?;

        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        Self::parse(&content, &extension)
            .map_err(|e| DomainError::BadArgs(format!("Invalid plan file {}: {}", path.display(), e)))
    }

    /// Parse plan file content in the given format (`toml`, `yaml`/`yml`, `json`)
    pub fn parse(content: &str, format: &str) -> Result<Self, String> {
        match format {
            "toml" => toml::from_str(content).map_err(|e| e.to_string()),
            "yaml" | "yml" => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            "json" => serde_json::from_str(content).map_err(|e| e.to_string()),
            other => Err(format!(
                "unsupported plan file format '{}', expected toml, yaml or json",
                other
            )),
        }
    }

    /// Append the file's rows to a form; its date fills an empty date field
    pub fn apply_to(&self, form: &mut FormController) -> Result<(), DomainError> {
        if form.date_label().trim().is_empty() {
            if let Some(date) = &self.date {
                form.set_date_label(date.clone());
            }
        }

        for segment in &self.segments {
            form.add_row_with(
                TimeFields::from_clock(&segment.start)?,
                TimeFields::from_clock(&segment.end)?,
                segment.name.clone(),
            );
        }
        Ok(())
    }
}

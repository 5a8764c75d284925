//! Step content files and input loading.
//!
//! A step file is the per-unit JSON document served next to the progress
//! data. Only `instructions` is converted; the list fields are shown as
//! plain text around it.

use std::fs;
use std::io::{self, Read};

use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::CliError;

/// Contents of a `step-NN.json` file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StepContent {
    pub tier: Option<String>,
    pub estimated_time: Option<String>,
    pub points: Option<u32>,
    #[serde(deserialize_with = "null_as_empty")]
    pub objectives: Vec<String>,
    /// Instruction text in the markdown-like dialect.
    pub instructions: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub deliverables: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub hints: Vec<String>,
}

/// `null` lists are treated like missing ones.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl StepContent {
    /// Decode a step file.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Instruction text worth a content section; an empty string counts as
    /// absent.
    pub fn body(&self) -> Option<&str> {
        self.instructions.as_deref().filter(|text| !text.is_empty())
    }
}

/// What the tool was asked to convert.
#[derive(Debug)]
pub enum Input {
    /// Raw instruction text.
    Text(String),
    /// A step file; its `instructions` are converted.
    Step(StepContent),
}

impl Input {
    /// Load `path` (`-` for stdin). Paths ending in `.json`, or any path when
    /// `force_step` is set, are decoded as step files.
    pub fn load(path: &str, force_step: bool) -> Result<Self, CliError> {
        let raw = read_source(path)?;

        if force_step || path.ends_with(".json") {
            let step = StepContent::from_json(&raw).map_err(|source| CliError::Json {
                path: path.to_string(),
                source,
            })?;
            debug!(
                path,
                has_instructions = step.instructions.is_some(),
                "loaded step content"
            );
            Ok(Input::Step(step))
        } else {
            debug!(path, bytes = raw.len(), "loaded instruction text");
            Ok(Input::Text(raw))
        }
    }

    /// The text handed to the segmenter.
    pub fn instructions(&self) -> &str {
        match self {
            Input::Text(text) => text,
            Input::Step(step) => step.instructions.as_deref().unwrap_or(""),
        }
    }

    /// The step file, if the input was one.
    pub fn step(&self) -> Option<&StepContent> {
        match self {
            Input::Text(_) => None,
            Input::Step(step) => Some(step),
        }
    }
}

fn read_source(path: &str) -> Result<String, CliError> {
    let result = if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        fs::read_to_string(path)
    };

    result.map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })
}

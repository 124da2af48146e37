//! Front-matter extraction

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::schema::{self, type_name, ValidationResult};

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("Unterminated front-matter block (missing closing `{0}`)")]
    Unterminated(&'static str),

    #[error("Failed to parse YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Front-matter must be a mapping of keys to values, found {0}")]
    NotAMapping(&'static str),
}

/// Raw, unvalidated front-matter of a content file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub data: Mapping,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        // YAML front-matter (---)
        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        // JSON front-matter (;;; or {"key":)
        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        // No front-matter found
        Ok((FrontMatter::default(), content))
    }

    /// Check the raw fields against the post schema
    pub fn validate(&self) -> ValidationResult {
        schema::validate(&self.data)
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let rest = &content[3..]; // Skip opening ---
        let rest = rest.trim_start_matches(['\n', '\r']);

        // Empty block: closing fence right after the opening one
        if let Some(remaining) = rest.strip_prefix("---") {
            return Ok((FrontMatter::default(), trim_body(remaining)));
        }

        let end_pos = rest
            .find("\n---")
            .ok_or(FrontMatterError::Unterminated("---"))?;
        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..]; // Skip \n---

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), trim_body(remaining)));
        }

        let value: Value = serde_yaml::from_str(yaml_content)?;
        Ok((Self::from_value(value)?, trim_body(remaining)))
    }

    fn parse_json(content: &str) -> Result<(Self, &str), FrontMatterError> {
        // JSON front-matter ends with ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            let end_pos = rest
                .find(";;;")
                .ok_or(FrontMatterError::Unterminated(";;;"))?;
            let json_content = rest[..end_pos].trim();
            let remaining = &rest[end_pos + 3..];

            // `;;;` blocks hold the object's members without the braces
            let json_content = if json_content.starts_with('{') {
                json_content.to_string()
            } else {
                format!("{{{}}}", json_content)
            };
            let value: Value = serde_json::from_str(&json_content)?;
            return Ok((Self::from_value(value)?, trim_body(remaining)));
        }

        // A JSON object at the start; find the matching closing brace
        let mut depth = 0;
        let mut in_string = false;
        let mut escaped = false;
        let mut end_pos = None;
        for (i, c) in content.char_indices() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end_pos = Some(i + 1);
                        break;
                    }
                }
                _ => {}
            }
        }

        let end_pos = end_pos.ok_or(FrontMatterError::Unterminated("}"))?;
        let value: Value = serde_json::from_str(&content[..end_pos])?;
        Ok((Self::from_value(value)?, trim_body(&content[end_pos..])))
    }

    fn from_value(value: Value) -> Result<Self, FrontMatterError> {
        match value {
            Value::Mapping(data) => Ok(Self { data }),
            Value::Null => Ok(Self::default()),
            other => Err(FrontMatterError::NotAMapping(type_name(&other))),
        }
    }
}

fn trim_body(body: &str) -> &str {
    body.trim_start_matches(['\n', '\r'])
}

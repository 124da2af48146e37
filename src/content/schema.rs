//! Post front-matter schema
//!
//! Every field rule is evaluated independently against the raw mapping, in
//! declaration order, and each rule contributes at most one violation. A
//! mapping either yields a fully typed [`PostMetadata`] or the complete list
//! of problems found in it.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_yaml::{Mapping, Value};
use std::fmt;
use thiserror::Error;

use super::post::{OgType, PostMetadata};

/// Keys understood by the schema, in declaration order
pub const KNOWN_FIELDS: &[&str] = &[
    "title",
    "description",
    "date",
    "modifiedDate",
    "tags",
    "draft",
    "image",
    "image_alt",
    "keywords",
    "twitter_img",
    "twitterCreator",
    "twitterSite",
    "canonicalUrl",
    "author",
    "authorUrl",
    "authorImage",
    "ogType",
    "locale",
    "siteName",
    "noindex",
    "nofollow",
];

/// Date-time layouts accepted for `date`; only the calendar part is kept
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// What a field is declared to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    String,
    Date,
    Boolean,
    StringList,
    OneOf(&'static [&'static str]),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::String => f.write_str("string"),
            Expected::Date => f.write_str("calendar date"),
            Expected::Boolean => f.write_str("boolean"),
            Expected::StringList => f.write_str("list of strings"),
            Expected::OneOf(choices) => {
                let quoted: Vec<String> = choices.iter().map(|c| format!("\"{}\"", c)).collect();
                write!(f, "one of {}", quoted.join(", "))
            }
        }
    }
}

/// How a field failed its rule
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    /// A required key is absent
    Missing,
    /// The value has the wrong type
    WrongType(Value),
    /// The value has the right type but is not acceptable
    Invalid(Value),
}

/// A single mismatch between an input field and its rule
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Field path, e.g. `title` or `tags[2]`
    pub path: String,
    pub expected: Expected,
    pub problem: Problem,
}

impl Violation {
    fn new(path: impl Into<String>, expected: Expected, problem: Problem) -> Self {
        Self {
            path: path.into(),
            expected,
            problem,
        }
    }

    /// The top-level field this violation belongs to
    pub fn field(&self) -> &str {
        self.path.split('[').next().unwrap_or(&self.path)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.problem {
            Problem::Missing => {
                write!(f, "`{}` is required (expected {})", self.path, self.expected)
            }
            Problem::WrongType(Value::Null) => {
                write!(f, "`{}`: expected {}, found null", self.path, self.expected)
            }
            Problem::WrongType(value) => write!(
                f,
                "`{}`: expected {}, found {} {}",
                self.path,
                self.expected,
                type_name(value),
                render_value(value)
            ),
            Problem::Invalid(value) => write!(
                f,
                "`{}`: expected {}, found {}",
                self.path,
                self.expected,
                render_value(value)
            ),
        }
    }
}

impl std::error::Error for Violation {}

/// Outcome of validating one front-matter mapping
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Success(PostMetadata),
    /// Never empty
    Failure(Vec<Violation>),
}

impl ValidationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationResult::Success(_))
    }

    /// Violations found, empty on success
    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationResult::Success(_) => &[],
            ValidationResult::Failure(violations) => violations,
        }
    }

    pub fn into_result(self) -> Result<PostMetadata, ValidationError> {
        match self {
            ValidationResult::Success(meta) => Ok(meta),
            ValidationResult::Failure(violations) => Err(ValidationError::new(violations)),
        }
    }
}

/// Error form of a failed validation
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{count} invalid front-matter field(s): {summary}")]
pub struct ValidationError {
    pub violations: Vec<Violation>,
    count: usize,
    summary: String,
}

impl ValidationError {
    fn new(violations: Vec<Violation>) -> Self {
        let summary = violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            count: violations.len(),
            violations,
            summary,
        }
    }
}

/// Validate a raw front-matter mapping against the post schema
pub fn validate(input: &Mapping) -> ValidationResult {
    let mut fields = Fields::new(input);

    let title = fields.required_string("title");
    let description = fields.string("description");
    let date = fields.required_date("date");
    let modified_date = fields.string("modifiedDate");
    let tags = fields.string_list("tags");
    let draft = fields.boolean("draft");
    let image = fields.string("image");
    let image_alt = fields.string("image_alt");
    let keywords = fields.string_list("keywords");
    let twitter_img = fields.string("twitter_img");
    let twitter_creator = fields.string("twitterCreator");
    let twitter_site = fields.string("twitterSite");
    let canonical_url = fields.string("canonicalUrl");
    let author = fields.string("author");
    let author_url = fields.string("authorUrl");
    let author_image = fields.string("authorImage");
    let og_type = fields.og_type("ogType");
    let locale = fields.string("locale");
    let site_name = fields.string("siteName");
    let noindex = fields.boolean("noindex");
    let nofollow = fields.boolean("nofollow");

    match (title, date) {
        (Some(title), Some(date)) if fields.violations.is_empty() => {
            ValidationResult::Success(PostMetadata {
                title,
                description,
                date,
                modified_date,
                tags,
                draft,
                image,
                image_alt,
                keywords,
                twitter_img,
                twitter_creator,
                twitter_site,
                canonical_url,
                author,
                author_url,
                author_image,
                og_type,
                locale,
                site_name,
                noindex,
                nofollow,
                extra: unknown_fields(input),
            })
        }
        _ => ValidationResult::Failure(fields.violations),
    }
}

/// Parse a front-matter date into a calendar date
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // RFC 3339 keeps the date as written, not shifted to another zone
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Name of a YAML value's type, as shown in violations
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn render_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("<{}>", type_name(value)))
}

fn unknown_fields(input: &Mapping) -> Mapping {
    input
        .iter()
        .filter(|(key, _)| key.as_str().map_or(true, |k| !KNOWN_FIELDS.contains(&k)))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Field accessor that records violations as it goes
struct Fields<'a> {
    input: &'a Mapping,
    violations: Vec<Violation>,
}

impl<'a> Fields<'a> {
    fn new(input: &'a Mapping) -> Self {
        Self {
            input,
            violations: Vec::new(),
        }
    }

    /// Value for a key that is present; an explicit null is still a value
    fn get(&self, key: &str) -> Option<&'a Value> {
        let input: &'a Mapping = self.input;
        input.get(key)
    }

    fn reject(&mut self, path: impl Into<String>, expected: Expected, problem: Problem) {
        self.violations.push(Violation::new(path, expected, problem));
    }

    fn string(&mut self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            other => {
                self.reject(key, Expected::String, Problem::WrongType(other.clone()));
                None
            }
        }
    }

    fn required_string(&mut self, key: &str) -> Option<String> {
        if self.get(key).is_none() {
            self.reject(key, Expected::String, Problem::Missing);
            return None;
        }
        self.string(key)
    }

    fn required_date(&mut self, key: &str) -> Option<NaiveDate> {
        match self.get(key) {
            None => {
                self.reject(key, Expected::Date, Problem::Missing);
                None
            }
            Some(Value::String(s)) => {
                let parsed = parse_calendar_date(s);
                if parsed.is_none() {
                    self.reject(key, Expected::Date, Problem::Invalid(Value::String(s.clone())));
                }
                parsed
            }
            Some(other) => {
                self.reject(key, Expected::Date, Problem::WrongType(other.clone()));
                None
            }
        }
    }

    fn boolean(&mut self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            other => {
                self.reject(key, Expected::Boolean, Problem::WrongType(other.clone()));
                None
            }
        }
    }

    fn string_list(&mut self, key: &str) -> Option<Vec<String>> {
        let items = match self.get(key)? {
            Value::Sequence(items) => items,
            other => {
                self.reject(key, Expected::StringList, Problem::WrongType(other.clone()));
                return None;
            }
        };

        let mut strings = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => strings.push(s.clone()),
                other => {
                    self.reject(
                        format!("{}[{}]", key, i),
                        Expected::String,
                        Problem::WrongType(other.clone()),
                    );
                    return None;
                }
            }
        }
        Some(strings)
    }

    fn og_type(&mut self, key: &str) -> Option<OgType> {
        let expected = Expected::OneOf(OgType::NAMES);
        match self.get(key)? {
            Value::String(s) => {
                let og_type = OgType::from_name(s);
                if og_type.is_none() {
                    self.reject(key, expected, Problem::Invalid(Value::String(s.clone())));
                }
                og_type
            }
            other => {
                self.reject(key, expected, Problem::WrongType(other.clone()));
                None
            }
        }
    }
}

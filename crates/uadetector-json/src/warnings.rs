//! Content anomalies and the per-call warning collector.

use std::fmt;

use thiserror::Error;

/// Where an anomaly was found: a section name and, for records, the index
/// inside that section's array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Location {
    pub section: &'static str,
    pub index: Option<usize>,
}

impl Location {
    pub fn section(section: &'static str) -> Self {
        Self {
            section,
            index: None,
        }
    }

    pub fn record(section: &'static str, index: usize) -> Self {
        Self {
            section,
            index: Some(index),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.section, index),
            None => f.write_str(self.section),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AnomalyKind {
    Structure,
    Hash,
    MissingField,
    MalformedPattern,
    UnresolvedReference,
    DuplicateId,
}

/// One recoverable defect of the input. Rendered to a plain string when it
/// reaches the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub(crate) enum Anomaly {
    #[error("input is not a detection data document: {reason}")]
    Structure { reason: String },
    #[error("{location}: section must be an array, found {found}")]
    SectionNotArray {
        location: Location,
        found: &'static str,
    },
    #[error("{location}: record must be an object, found {found}")]
    NotAnObject {
        location: Location,
        found: &'static str,
    },
    #[error("{location}: hash mismatch, expected `{expected}` but computed `{actual}`")]
    HashMismatch {
        location: Location,
        expected: String,
        actual: String,
    },
    #[error("{location}: hash is missing")]
    HashMissing { location: Location },
    #[error("{location}: hash `{value}` is not a SHA-256 hex digest")]
    HashMalformed { location: Location, value: String },
    #[error("{location}: required field `{field}` is missing")]
    MissingField {
        location: Location,
        field: &'static str,
    },
    #[error("{location}: field `{field}` has an invalid value, expected {expected}")]
    InvalidField {
        location: Location,
        field: &'static str,
        expected: &'static str,
    },
    #[error("{location}: field `{field}` holds a malformed pattern `{source_text}`: {reason}")]
    MalformedPattern {
        location: Location,
        field: &'static str,
        source_text: String,
        reason: String,
    },
    #[error("{location}: `{field}` refers to unknown {target} id {id}, reference dropped")]
    UnresolvedReference {
        location: Location,
        field: &'static str,
        target: &'static str,
        id: u32,
    },
    #[error("{location}: duplicate id {id}, record skipped")]
    DuplicateId { location: Location, id: u32 },
}

impl Anomaly {
    pub fn kind(&self) -> AnomalyKind {
        match self {
            Anomaly::Structure { .. } | Anomaly::SectionNotArray { .. } => AnomalyKind::Structure,
            Anomaly::HashMismatch { .. }
            | Anomaly::HashMissing { .. }
            | Anomaly::HashMalformed { .. } => AnomalyKind::Hash,
            Anomaly::NotAnObject { .. }
            | Anomaly::MissingField { .. }
            | Anomaly::InvalidField { .. } => AnomalyKind::MissingField,
            Anomaly::MalformedPattern { .. } => AnomalyKind::MalformedPattern,
            Anomaly::UnresolvedReference { .. } => AnomalyKind::UnresolvedReference,
            Anomaly::DuplicateId { .. } => AnomalyKind::DuplicateId,
        }
    }
}

/// Ordered, append-only collector threaded through one deserialization.
#[derive(Debug, Default)]
pub(crate) struct Warnings {
    anomalies: Vec<Anomaly>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, anomaly: Anomaly) {
        log::debug!("{:?} anomaly: {}", anomaly.kind(), anomaly);
        self.anomalies.push(anomaly);
    }

    pub fn len(&self) -> usize {
        self.anomalies.len()
    }

    #[cfg(test)]
    pub fn kinds(&self) -> Vec<AnomalyKind> {
        self.anomalies.iter().map(Anomaly::kind).collect()
    }

    pub fn into_messages(self) -> Vec<String> {
        self.anomalies.iter().map(ToString::to_string).collect()
    }
}

/// JSON type name used in anomaly messages.
pub(crate) fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

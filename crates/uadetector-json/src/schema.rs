//! Wire names and per-section field tables.
//!
//! Each section lists its fields once; the parser checks records against the
//! table and the serializer writes the same names.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use uadetector_data::Pattern;

use crate::warnings::{Anomaly, Location, Warnings};

pub const VERSION: &str = "version";
pub const HASH: &str = "hash";

pub const BROWSER_TYPES: &str = "browserTypes";
pub const BROWSERS: &str = "browsers";
pub const BROWSER_PATTERNS: &str = "browserPatterns";
pub const OPERATING_SYSTEMS: &str = "operatingSystems";
pub const OPERATING_SYSTEM_PATTERNS: &str = "operatingSystemPatterns";
pub const DEVICES: &str = "devices";
pub const DEVICE_PATTERNS: &str = "devicePatterns";
pub const VERSION_PATTERNS: &str = "versionPatterns";
pub const BROWSER_TO_OPERATING_SYSTEM_MAPPINGS: &str = "browserToOperatingSystemMappings";
pub const ROBOTS: &str = "robots";

pub const ID: &str = "id";
pub const NAME: &str = "name";
pub const FAMILY: &str = "family";
pub const URL: &str = "url";
pub const PRODUCER: &str = "producer";
pub const PRODUCER_URL: &str = "producerUrl";
pub const ICON: &str = "icon";
pub const INFO_URL: &str = "infoUrl";
pub const TYPE_ID: &str = "typeId";
pub const VERSION_PATTERN_ID: &str = "versionPatternId";
pub const BROWSER_ID: &str = "browserId";
pub const OPERATING_SYSTEM_ID: &str = "operatingSystemId";
pub const DEVICE_ID: &str = "deviceId";
pub const POSITION: &str = "position";
pub const REGEX: &str = "regex";
pub const USER_AGENT_STRING: &str = "userAgentString";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Record id or reference to another record's id.
    Id,
    Integer,
    Text,
    Pattern,
}

impl FieldKind {
    fn expected(self) -> &'static str {
        match self {
            FieldKind::Id => "an unsigned 32-bit id",
            FieldKind::Integer => "an unsigned 32-bit integer",
            FieldKind::Text => "a string",
            FieldKind::Pattern => "a /body/flags pattern string",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn required(name: &'static str, kind: FieldKind) -> Field {
    Field {
        name,
        kind,
        required: true,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> Field {
    Field {
        name,
        kind,
        required: false,
    }
}

pub const BROWSER_TYPE_FIELDS: &[Field] = &[
    required(ID, FieldKind::Id),
    required(NAME, FieldKind::Text),
];

pub const BROWSER_FIELDS: &[Field] = &[
    required(ID, FieldKind::Id),
    required(FAMILY, FieldKind::Text),
    required(NAME, FieldKind::Text),
    optional(URL, FieldKind::Text),
    optional(PRODUCER, FieldKind::Text),
    optional(PRODUCER_URL, FieldKind::Text),
    optional(ICON, FieldKind::Text),
    optional(INFO_URL, FieldKind::Text),
    optional(TYPE_ID, FieldKind::Id),
    optional(VERSION_PATTERN_ID, FieldKind::Id),
];

pub const BROWSER_PATTERN_FIELDS: &[Field] = &[
    required(ID, FieldKind::Id),
    optional(BROWSER_ID, FieldKind::Id),
    required(POSITION, FieldKind::Integer),
    required(REGEX, FieldKind::Pattern),
];

pub const OPERATING_SYSTEM_FIELDS: &[Field] = &[
    required(ID, FieldKind::Id),
    required(FAMILY, FieldKind::Text),
    required(NAME, FieldKind::Text),
    optional(URL, FieldKind::Text),
    optional(PRODUCER, FieldKind::Text),
    optional(PRODUCER_URL, FieldKind::Text),
    optional(ICON, FieldKind::Text),
    optional(INFO_URL, FieldKind::Text),
];

pub const OPERATING_SYSTEM_PATTERN_FIELDS: &[Field] = &[
    required(ID, FieldKind::Id),
    optional(OPERATING_SYSTEM_ID, FieldKind::Id),
    required(POSITION, FieldKind::Integer),
    required(REGEX, FieldKind::Pattern),
];

pub const DEVICE_FIELDS: &[Field] = &[
    required(ID, FieldKind::Id),
    required(NAME, FieldKind::Text),
    optional(ICON, FieldKind::Text),
    optional(INFO_URL, FieldKind::Text),
];

pub const DEVICE_PATTERN_FIELDS: &[Field] = &[
    required(ID, FieldKind::Id),
    optional(DEVICE_ID, FieldKind::Id),
    required(POSITION, FieldKind::Integer),
    required(REGEX, FieldKind::Pattern),
];

pub const VERSION_PATTERN_FIELDS: &[Field] = &[
    required(ID, FieldKind::Id),
    required(POSITION, FieldKind::Integer),
    required(REGEX, FieldKind::Pattern),
];

pub const MAPPING_FIELDS: &[Field] = &[
    required(BROWSER_ID, FieldKind::Id),
    required(OPERATING_SYSTEM_ID, FieldKind::Id),
];

pub const ROBOT_FIELDS: &[Field] = &[
    required(ID, FieldKind::Id),
    required(NAME, FieldKind::Text),
    optional(FAMILY, FieldKind::Text),
    required(USER_AGENT_STRING, FieldKind::Text),
    optional(PRODUCER, FieldKind::Text),
    optional(PRODUCER_URL, FieldKind::Text),
    optional(URL, FieldKind::Text),
    optional(ICON, FieldKind::Text),
    optional(INFO_URL, FieldKind::Text),
];

#[derive(Debug)]
pub enum FieldValue {
    Integer(u32),
    Text(String),
    Pattern(Pattern),
}

enum FieldError {
    Invalid,
    Pattern { source_text: String, reason: String },
}

fn decode_value(kind: FieldKind, value: &Value) -> Result<FieldValue, FieldError> {
    match kind {
        FieldKind::Id | FieldKind::Integer => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(FieldValue::Integer)
            .ok_or(FieldError::Invalid),
        FieldKind::Text => value
            .as_str()
            .map(|s| FieldValue::Text(s.to_string()))
            .ok_or(FieldError::Invalid),
        FieldKind::Pattern => {
            let source = value.as_str().ok_or(FieldError::Invalid)?;
            Pattern::parse(source)
                .map(FieldValue::Pattern)
                .map_err(|e| FieldError::Pattern {
                    source_text: source.to_string(),
                    reason: e.to_string(),
                })
        }
    }
}

/// Fields of one record that passed its table. Unknown members of the input
/// object are not carried over.
#[derive(Debug, Default)]
pub struct Record {
    values: IndexMap<&'static str, FieldValue>,
}

impl Record {
    pub fn id(&self, name: &str) -> u32 {
        self.opt_id(name).unwrap_or_default()
    }

    pub fn opt_id(&self, name: &str) -> Option<u32> {
        match self.values.get(name) {
            Some(FieldValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn text(&mut self, name: &str) -> String {
        match self.values.shift_remove(name) {
            Some(FieldValue::Text(s)) => s,
            _ => String::new(),
        }
    }

    pub fn pattern(&mut self, name: &str) -> Option<Pattern> {
        match self.values.shift_remove(name) {
            Some(FieldValue::Pattern(p)) => Some(p),
            _ => None,
        }
    }
}

/// Check `object` against `fields`.
///
/// The first missing required field or unparsable pattern rejects the record
/// with one warning. An optional field of the wrong type warns and is left
/// out; `null` counts as absent. Optional-field warnings are only reported for
/// records that are kept, so a rejected record never adds more than one.
pub(crate) fn decode_record(
    location: Location,
    object: &Map<String, Value>,
    fields: &[Field],
    warnings: &mut Warnings,
) -> Option<Record> {
    let mut record = Record::default();
    let mut deferred = Vec::new();
    for field in fields {
        let value = match object.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    warnings.push(Anomaly::MissingField {
                        location,
                        field: field.name,
                    });
                    return None;
                }
                continue;
            }
            Some(value) => value,
        };
        match decode_value(field.kind, value) {
            Ok(decoded) => {
                record.values.insert(field.name, decoded);
            }
            Err(FieldError::Invalid) => {
                let anomaly = Anomaly::InvalidField {
                    location,
                    field: field.name,
                    expected: field.kind.expected(),
                };
                if field.required {
                    warnings.push(anomaly);
                    return None;
                }
                deferred.push(anomaly);
            }
            Err(FieldError::Pattern {
                source_text,
                reason,
            }) => {
                warnings.push(Anomaly::MalformedPattern {
                    location,
                    field: field.name,
                    source_text,
                    reason,
                });
                return None;
            }
        }
    }
    for anomaly in deferred {
        warnings.push(anomaly);
    }
    Some(record)
}

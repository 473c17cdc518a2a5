//! First pass: JSON text to per-section record candidates.

use std::collections::HashSet;

use serde_json::{Map, Value};
use uadetector_data::{
    Browser, BrowserOperatingSystemMapping, BrowserPattern, BrowserType, Device, DevicePattern,
    OperatingSystem, OperatingSystemPattern, Robot, VersionPattern,
};

use crate::hash;
use crate::options::SerDeOptions;
use crate::schema::*;
use crate::warnings::{type_name, Anomaly, Location, Warnings};

/// A decoded record and its index in the source array.
#[derive(Debug)]
pub(crate) struct Candidate<T> {
    pub index: usize,
    pub record: T,
}

#[derive(Debug, Default)]
pub(crate) struct Candidates {
    pub version: String,
    pub browser_types: Vec<Candidate<BrowserType>>,
    pub browsers: Vec<Candidate<Browser>>,
    pub browser_patterns: Vec<Candidate<BrowserPattern>>,
    pub operating_systems: Vec<Candidate<OperatingSystem>>,
    pub operating_system_patterns: Vec<Candidate<OperatingSystemPattern>>,
    pub devices: Vec<Candidate<Device>>,
    pub device_patterns: Vec<Candidate<DevicePattern>>,
    pub version_patterns: Vec<Candidate<VersionPattern>>,
    pub mappings: Vec<Candidate<BrowserOperatingSystemMapping>>,
    pub robots: Vec<Candidate<Robot>>,
}

struct SectionParser<'a> {
    root: &'a Map<String, Value>,
    options: SerDeOptions,
    warnings: &'a mut Warnings,
}

impl SectionParser<'_> {
    /// Decode every record of `name`. `key` names the field that must be
    /// unique inside the section.
    fn parse<T>(
        &mut self,
        name: &'static str,
        fields: &[Field],
        key: &'static str,
        build: impl Fn(&mut Record) -> Option<T>,
    ) -> Vec<Candidate<T>> {
        let items = match self.root.get(name) {
            None | Some(Value::Null) => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                self.warnings.push(Anomaly::SectionNotArray {
                    location: Location::section(name),
                    found: type_name(other),
                });
                return Vec::new();
            }
        };

        let mut seen = HashSet::with_capacity(items.len());
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let location = Location::record(name, index);
            let Some(object) = item.as_object() else {
                self.warnings.push(Anomaly::NotAnObject {
                    location,
                    found: type_name(item),
                });
                continue;
            };
            if self.options.hash_validating() {
                hash::validate_record(location, object, self.warnings);
            }
            let Some(mut record) = decode_record(location, object, fields, self.warnings) else {
                continue;
            };
            let id = record.id(key);
            if !seen.insert(id) {
                self.warnings.push(Anomaly::DuplicateId { location, id });
                continue;
            }
            if let Some(record) = build(&mut record) {
                out.push(Candidate { index, record });
            }
        }
        out
    }
}

fn parse_version(root: &Map<String, Value>, warnings: &mut Warnings) -> String {
    let location = Location::section(VERSION);
    match root.get(VERSION) {
        Some(Value::String(version)) => version.clone(),
        None | Some(Value::Null) => {
            warnings.push(Anomaly::MissingField {
                location,
                field: VERSION,
            });
            String::new()
        }
        Some(_) => {
            warnings.push(Anomaly::InvalidField {
                location,
                field: VERSION,
                expected: "a string",
            });
            String::new()
        }
    }
}

/// Decode `json` into candidates. Never fails: unusable framing yields no
/// candidates and one warning.
pub(crate) fn parse(json: &str, options: SerDeOptions, warnings: &mut Warnings) -> Candidates {
    let root = match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(root)) => root,
        Ok(other) => {
            warnings.push(Anomaly::Structure {
                reason: format!("top level must be an object, found {}", type_name(&other)),
            });
            return Candidates::default();
        }
        Err(e) => {
            warnings.push(Anomaly::Structure {
                reason: e.to_string(),
            });
            return Candidates::default();
        }
    };

    let version = parse_version(&root, warnings);
    let mut sections = SectionParser {
        root: &root,
        options,
        warnings,
    };

    Candidates {
        version,
        browser_types: sections.parse(BROWSER_TYPES, BROWSER_TYPE_FIELDS, ID, |r| {
            Some(BrowserType {
                id: r.id(ID),
                name: r.text(NAME),
            })
        }),
        browsers: sections.parse(BROWSERS, BROWSER_FIELDS, ID, |r| {
            Some(Browser {
                id: r.id(ID),
                family: r.text(FAMILY),
                name: r.text(NAME),
                url: r.text(URL),
                producer: r.text(PRODUCER),
                producer_url: r.text(PRODUCER_URL),
                icon: r.text(ICON),
                info_url: r.text(INFO_URL),
                type_id: r.opt_id(TYPE_ID),
                version_pattern_id: r.opt_id(VERSION_PATTERN_ID),
            })
        }),
        browser_patterns: sections.parse(BROWSER_PATTERNS, BROWSER_PATTERN_FIELDS, ID, |r| {
            Some(BrowserPattern {
                id: r.id(ID),
                browser_id: r.opt_id(BROWSER_ID),
                position: r.id(POSITION),
                pattern: r.pattern(REGEX)?,
            })
        }),
        operating_systems: sections.parse(OPERATING_SYSTEMS, OPERATING_SYSTEM_FIELDS, ID, |r| {
            Some(OperatingSystem {
                id: r.id(ID),
                family: r.text(FAMILY),
                name: r.text(NAME),
                url: r.text(URL),
                producer: r.text(PRODUCER),
                producer_url: r.text(PRODUCER_URL),
                icon: r.text(ICON),
                info_url: r.text(INFO_URL),
            })
        }),
        operating_system_patterns: sections.parse(
            OPERATING_SYSTEM_PATTERNS,
            OPERATING_SYSTEM_PATTERN_FIELDS,
            ID,
            |r| {
                Some(OperatingSystemPattern {
                    id: r.id(ID),
                    operating_system_id: r.opt_id(OPERATING_SYSTEM_ID),
                    position: r.id(POSITION),
                    pattern: r.pattern(REGEX)?,
                })
            },
        ),
        devices: sections.parse(DEVICES, DEVICE_FIELDS, ID, |r| {
            Some(Device {
                id: r.id(ID),
                name: r.text(NAME),
                icon: r.text(ICON),
                info_url: r.text(INFO_URL),
            })
        }),
        device_patterns: sections.parse(DEVICE_PATTERNS, DEVICE_PATTERN_FIELDS, ID, |r| {
            Some(DevicePattern {
                id: r.id(ID),
                device_id: r.opt_id(DEVICE_ID),
                position: r.id(POSITION),
                pattern: r.pattern(REGEX)?,
            })
        }),
        version_patterns: sections.parse(VERSION_PATTERNS, VERSION_PATTERN_FIELDS, ID, |r| {
            Some(VersionPattern {
                id: r.id(ID),
                position: r.id(POSITION),
                pattern: r.pattern(REGEX)?,
            })
        }),
        mappings: sections.parse(
            BROWSER_TO_OPERATING_SYSTEM_MAPPINGS,
            MAPPING_FIELDS,
            BROWSER_ID,
            |r| {
                Some(BrowserOperatingSystemMapping {
                    browser_id: r.id(BROWSER_ID),
                    operating_system_id: r.id(OPERATING_SYSTEM_ID),
                })
            },
        ),
        robots: sections.parse(ROBOTS, ROBOT_FIELDS, ID, |r| {
            Some(Robot {
                id: r.id(ID),
                name: r.text(NAME),
                family: r.text(FAMILY),
                user_agent: r.text(USER_AGENT_STRING),
                producer: r.text(PRODUCER),
                producer_url: r.text(PRODUCER_URL),
                url: r.text(URL),
                icon: r.text(ICON),
                info_url: r.text(INFO_URL),
            })
        }),
    }
}

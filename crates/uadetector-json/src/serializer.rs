//! Encoder from [`Data`] to the JSON document form.
//!
//! Sections and record members are always written in the same order and every
//! record is stamped with its digest, so equal data gives byte-identical text
//! that validates without warnings.

use serde_json::{json, Map, Value};
use uadetector_data::{
    Browser, BrowserOperatingSystemMapping, BrowserPattern, BrowserType, Data, Device,
    DevicePattern, OperatingSystem, OperatingSystemPattern, Robot, VersionPattern,
};

use crate::error::ConverterError;
use crate::hash::record_digest;
use crate::options::SerDeOptions;
use crate::schema::*;

// ── Record helpers ────────────────────────────────────────────────────────

fn stamped(mut record: Map<String, Value>) -> Value {
    let digest = record_digest(&record);
    record.insert(HASH.into(), Value::String(digest));
    Value::Object(record)
}

fn put_ref(record: &mut Map<String, Value>, name: &str, id: Option<u32>) {
    if let Some(id) = id {
        record.insert(name.into(), json!(id));
    }
}

fn browser_type_to_json(r: &BrowserType) -> Value {
    let mut m = Map::new();
    m.insert(ID.into(), json!(r.id));
    m.insert(NAME.into(), json!(r.name));
    stamped(m)
}

fn browser_to_json(r: &Browser) -> Value {
    let mut m = Map::new();
    m.insert(ID.into(), json!(r.id));
    m.insert(FAMILY.into(), json!(r.family));
    m.insert(NAME.into(), json!(r.name));
    m.insert(URL.into(), json!(r.url));
    m.insert(PRODUCER.into(), json!(r.producer));
    m.insert(PRODUCER_URL.into(), json!(r.producer_url));
    m.insert(ICON.into(), json!(r.icon));
    m.insert(INFO_URL.into(), json!(r.info_url));
    put_ref(&mut m, TYPE_ID, r.type_id);
    put_ref(&mut m, VERSION_PATTERN_ID, r.version_pattern_id);
    stamped(m)
}

fn pattern_record(
    id: u32,
    owner: Option<(&str, Option<u32>)>,
    position: u32,
    regex: String,
) -> Value {
    let mut m = Map::new();
    m.insert(ID.into(), json!(id));
    if let Some((name, owner_id)) = owner {
        put_ref(&mut m, name, owner_id);
    }
    m.insert(POSITION.into(), json!(position));
    m.insert(REGEX.into(), Value::String(regex));
    stamped(m)
}

fn browser_pattern_to_json(r: &BrowserPattern) -> Value {
    pattern_record(
        r.id,
        Some((BROWSER_ID, r.browser_id)),
        r.position,
        r.pattern.to_string(),
    )
}

fn operating_system_to_json(r: &OperatingSystem) -> Value {
    let mut m = Map::new();
    m.insert(ID.into(), json!(r.id));
    m.insert(FAMILY.into(), json!(r.family));
    m.insert(NAME.into(), json!(r.name));
    m.insert(URL.into(), json!(r.url));
    m.insert(PRODUCER.into(), json!(r.producer));
    m.insert(PRODUCER_URL.into(), json!(r.producer_url));
    m.insert(ICON.into(), json!(r.icon));
    m.insert(INFO_URL.into(), json!(r.info_url));
    stamped(m)
}

fn operating_system_pattern_to_json(r: &OperatingSystemPattern) -> Value {
    pattern_record(
        r.id,
        Some((OPERATING_SYSTEM_ID, r.operating_system_id)),
        r.position,
        r.pattern.to_string(),
    )
}

fn device_to_json(r: &Device) -> Value {
    let mut m = Map::new();
    m.insert(ID.into(), json!(r.id));
    m.insert(NAME.into(), json!(r.name));
    m.insert(ICON.into(), json!(r.icon));
    m.insert(INFO_URL.into(), json!(r.info_url));
    stamped(m)
}

fn device_pattern_to_json(r: &DevicePattern) -> Value {
    pattern_record(
        r.id,
        Some((DEVICE_ID, r.device_id)),
        r.position,
        r.pattern.to_string(),
    )
}

fn version_pattern_to_json(r: &VersionPattern) -> Value {
    pattern_record(r.id, None, r.position, r.pattern.to_string())
}

fn mapping_to_json(r: &BrowserOperatingSystemMapping) -> Value {
    let mut m = Map::new();
    m.insert(BROWSER_ID.into(), json!(r.browser_id));
    m.insert(OPERATING_SYSTEM_ID.into(), json!(r.operating_system_id));
    stamped(m)
}

fn robot_to_json(r: &Robot) -> Value {
    let mut m = Map::new();
    m.insert(ID.into(), json!(r.id));
    m.insert(NAME.into(), json!(r.name));
    m.insert(FAMILY.into(), json!(r.family));
    m.insert(USER_AGENT_STRING.into(), json!(r.user_agent));
    m.insert(PRODUCER.into(), json!(r.producer));
    m.insert(PRODUCER_URL.into(), json!(r.producer_url));
    m.insert(URL.into(), json!(r.url));
    m.insert(ICON.into(), json!(r.icon));
    m.insert(INFO_URL.into(), json!(r.info_url));
    stamped(m)
}

fn section<'a, T: 'a>(records: impl Iterator<Item = &'a T>, to_json: fn(&T) -> Value) -> Value {
    Value::Array(records.map(to_json).collect())
}

// ── Document ──────────────────────────────────────────────────────────────

/// The whole document as a `serde_json::Value`.
pub fn to_json(data: &Data) -> Value {
    let mut doc = Map::new();
    doc.insert(VERSION.into(), json!(data.version()));
    doc.insert(
        BROWSER_TYPES.into(),
        section(data.browser_types().values(), browser_type_to_json),
    );
    doc.insert(
        BROWSERS.into(),
        section(data.browsers().values(), browser_to_json),
    );
    doc.insert(
        BROWSER_PATTERNS.into(),
        section(data.browser_patterns().values(), browser_pattern_to_json),
    );
    doc.insert(
        OPERATING_SYSTEMS.into(),
        section(data.operating_systems().values(), operating_system_to_json),
    );
    doc.insert(
        OPERATING_SYSTEM_PATTERNS.into(),
        section(
            data.operating_system_patterns().values(),
            operating_system_pattern_to_json,
        ),
    );
    doc.insert(
        DEVICES.into(),
        section(data.devices().values(), device_to_json),
    );
    doc.insert(
        DEVICE_PATTERNS.into(),
        section(data.device_patterns().values(), device_pattern_to_json),
    );
    doc.insert(
        VERSION_PATTERNS.into(),
        section(data.version_patterns().values(), version_pattern_to_json),
    );
    doc.insert(
        BROWSER_TO_OPERATING_SYSTEM_MAPPINGS.into(),
        section(
            data.browser_to_operating_system_mappings().values(),
            mapping_to_json,
        ),
    );
    doc.insert(ROBOTS.into(), section(data.robots().values(), robot_to_json));
    Value::Object(doc)
}

pub(crate) fn serialize_data(data: &Data, options: SerDeOptions) -> Result<String, ConverterError> {
    let doc = to_json(data);
    let text = if options.pretty_printing() {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    log::debug!(
        "serialized {} records into {} bytes",
        data.record_count(),
        text.len()
    );
    Ok(text)
}

//! Serialize/deserialize round trips and encoder determinism.

use std::fs;
use std::path::Path;

use proptest::prelude::*;
use serde_json::Value;
use uadetector_data::{
    Browser, BrowserOperatingSystemMapping, BrowserPattern, BrowserType, Data, DataBuilder, Device,
    DevicePattern, OperatingSystem, OperatingSystemPattern, Pattern, Robot, VersionPattern,
};
use uadetector_json::{record_digest, JsonConverter, SerDeOption};

fn dirty_data() -> Data {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("uas_dirty.json");
    let json =
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {:?}: {e}", path));
    let result = JsonConverter::deserialize(json.as_str(), &[]).unwrap();
    assert!(result.warnings().is_empty());
    result.into_parts().0
}

fn round_trip(data: &Data, options: &[SerDeOption]) -> Data {
    let text = JsonConverter::serialize(data, Some(options)).unwrap();
    let mut strict = options.to_vec();
    strict.push(SerDeOption::HashValidating);
    let back = JsonConverter::deserialize(text.as_str(), &strict).unwrap();
    assert!(back.warnings().is_empty(), "{:#?}", back.warnings());
    back.into_parts().0
}

#[test]
fn fixture_data_round_trips() {
    let data = dirty_data();
    assert_eq!(round_trip(&data, &[]), data);
    assert_eq!(round_trip(&data, &[SerDeOption::PrettyPrinting]), data);
}

#[test]
fn serialization_is_deterministic() {
    let data = dirty_data();
    let a = JsonConverter::serialize(&data, None).unwrap();
    let b = JsonConverter::serialize(&data.clone(), None).unwrap();
    assert_eq!(a, b);
    let reparsed = JsonConverter::deserialize(a.as_str(), &[]).unwrap();
    assert_eq!(JsonConverter::serialize(reparsed.data(), None).unwrap(), a);
}

#[test]
fn absent_options_equal_empty_options() {
    let data = dirty_data();
    assert_eq!(
        JsonConverter::serialize(&data, None).unwrap(),
        JsonConverter::serialize(&data, Some(&[][..])).unwrap()
    );
    assert_eq!(
        JsonConverter::serialize(Data::empty(), None).unwrap(),
        JsonConverter::serialize(Data::empty(), Some(&[][..])).unwrap()
    );
}

#[test]
fn serialized_records_carry_valid_digests() {
    let text = JsonConverter::serialize(&dirty_data(), None).unwrap();
    let doc: Value = serde_json::from_str(&text).unwrap();
    for (section, records) in doc.as_object().unwrap() {
        let Some(records) = records.as_array() else {
            continue;
        };
        for record in records {
            let record = record.as_object().unwrap();
            assert_eq!(
                record["hash"].as_str(),
                Some(record_digest(record).as_str()),
                "{section}"
            );
        }
    }
}

#[test]
fn unknown_members_are_not_preserved() {
    let text = JsonConverter::serialize(&dirty_data(), None).unwrap();
    assert!(!text.contains("description"));
    assert!(!text.contains("gecko based"));
}

#[test]
fn escaped_text_round_trips() {
    let data = DataBuilder::new()
        .version("v\u{1}\u{e9}\"\\")
        .browser_type(BrowserType {
            id: 1,
            name: String::new(),
        })
        .robot(Robot {
            id: 1,
            name: "b\u{f8}t\u{7f}\u{2028}\u{1F600}".into(),
            user_agent: "tab\there\r\n".into(),
            ..Robot::default()
        })
        .build();
    assert_eq!(round_trip(&data, &[]), data);
}

#[test]
fn dangling_references_do_not_survive_a_round_trip() {
    let data = DataBuilder::new()
        .version("v1")
        .browser(Browser {
            id: 1,
            family: "FIREFOX".into(),
            name: "Firefox".into(),
            type_id: Some(7),
            ..Browser::default()
        })
        .browser_pattern(BrowserPattern {
            id: 1,
            browser_id: Some(2),
            position: 1,
            pattern: Pattern::parse("/firefox/i").unwrap(),
        })
        .build();
    let text = JsonConverter::serialize(&data, None).unwrap();
    let back =
        JsonConverter::deserialize(text.as_str(), &[SerDeOption::HashValidating]).unwrap();
    assert_eq!(back.warnings().len(), 2, "{:#?}", back.warnings());
    assert_ne!(back.data(), &data);
    assert_eq!(back.data().browsers()[&1].type_id, None);
    assert_eq!(back.data().browser_patterns()[&1].browser_id, None);
}

// ---------------------------------------------------------------------------
// Property: every consistent dataset survives a round trip unchanged
// ---------------------------------------------------------------------------

// Printable text plus quotes, backslashes and control characters, which the
// digest and the encoder both have to escape.
fn word() -> impl Strategy<Value = String> {
    "(?:\\PC|[\"\\\\\\x00-\\x1f\\x7f]){0,8}"
}

fn pattern() -> impl Strategy<Value = Pattern> {
    ("[a-z]{1,6}", "[imsx]{0,3}")
        .prop_map(|(body, flags)| Pattern::parse(&format!("/{body}/{flags}")).unwrap())
}

fn dataset() -> impl Strategy<Value = Data> {
    (
        word(),
        prop::collection::vec(word(), 1..4),
        prop::collection::vec((word(), any::<bool>(), any::<bool>()), 0..4),
        prop::collection::vec(pattern(), 1..5),
        prop::collection::vec(pattern(), 0..6),
        prop::collection::vec((word(), word()), 0..3),
        prop::collection::vec(pattern(), 0..4),
        prop::collection::vec(word(), 0..3),
    )
        .prop_map(
            |(
                version,
                types,
                browsers,
                version_patterns,
                browser_patterns,
                systems,
                device_patterns,
                robots,
            )| {
                let mut b = DataBuilder::new().version(version);
                for (i, name) in types.iter().enumerate() {
                    b = b.browser_type(BrowserType {
                        id: i as u32 + 1,
                        name: name.clone(),
                    });
                }
                for (i, pattern) in version_patterns.iter().enumerate() {
                    b = b.version_pattern(VersionPattern {
                        id: i as u32 + 1,
                        position: i as u32 + 1,
                        pattern: pattern.clone(),
                    });
                }
                // Ids descend so that map order differs from id order.
                let browser_count = browsers.len() as u32;
                for (i, (name, typed, versioned)) in browsers.iter().enumerate() {
                    b = b.browser(Browser {
                        id: browser_count - i as u32,
                        family: name.to_uppercase(),
                        name: name.clone(),
                        url: format!("https://{}.example/", name.replace(' ', "-")),
                        type_id: typed.then_some(1),
                        version_pattern_id: versioned.then_some(1),
                        ..Browser::default()
                    });
                }
                for (i, pattern) in browser_patterns.iter().enumerate() {
                    let owner = (browser_count > 0).then(|| i as u32 % browser_count + 1);
                    b = b.browser_pattern(BrowserPattern {
                        id: i as u32 + 10,
                        browser_id: owner,
                        position: i as u32,
                        pattern: pattern.clone(),
                    });
                }
                for (i, (family, name)) in systems.iter().enumerate() {
                    let id = i as u32 + 1;
                    b = b
                        .operating_system(OperatingSystem {
                            id,
                            family: family.clone(),
                            name: name.clone(),
                            ..OperatingSystem::default()
                        })
                        .operating_system_pattern(OperatingSystemPattern {
                            id,
                            operating_system_id: Some(id),
                            position: id,
                            pattern: Pattern::parse(&format!("/{}/i", pattern_body(name))).unwrap(),
                        });
                    if id <= browser_count {
                        b = b.browser_to_operating_system(BrowserOperatingSystemMapping {
                            browser_id: id,
                            operating_system_id: id,
                        });
                    }
                }
                if !device_patterns.is_empty() {
                    b = b.device(Device {
                        id: 1,
                        name: "Tablet".into(),
                        ..Device::default()
                    });
                }
                for (i, pattern) in device_patterns.iter().enumerate() {
                    b = b.device_pattern(DevicePattern {
                        id: i as u32 + 1,
                        device_id: Some(1),
                        position: i as u32 + 1,
                        pattern: pattern.clone(),
                    });
                }
                for (i, name) in robots.iter().enumerate() {
                    b = b.robot(Robot {
                        id: i as u32 + 1,
                        name: name.clone(),
                        user_agent: format!("{name}/1.0 (+https://bots.example/)"),
                        ..Robot::default()
                    });
                }
                b.build()
            },
        )
}

fn pattern_body(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_lowercase()).collect::<String>() + "x?"
}

proptest! {
    #[test]
    fn property_round_trip_is_lossless(data in dataset(), pretty in any::<bool>()) {
        let options: &[SerDeOption] = if pretty { &[SerDeOption::PrettyPrinting] } else { &[] };
        let back = round_trip(&data, options);
        prop_assert_eq!(back, data);
    }
}

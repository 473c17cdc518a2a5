//! Second pass: resolve cross-references and build [`Data`].

use std::collections::HashSet;

use uadetector_data::{Data, DataBuilder};

use crate::deserializer::parser::{Candidate, Candidates};
use crate::schema::*;
use crate::warnings::{Anomaly, Location, Warnings};

fn ids<T>(candidates: &[Candidate<T>], id: impl Fn(&T) -> u32) -> HashSet<u32> {
    candidates.iter().map(|c| id(&c.record)).collect()
}

/// Target of one reference kind: the ids that survived parsing and a name for
/// warnings.
struct Targets {
    name: &'static str,
    ids: HashSet<u32>,
}

impl Targets {
    /// Drop `reference` when it points nowhere.
    fn resolve(
        &self,
        reference: &mut Option<u32>,
        location: Location,
        field: &'static str,
        warnings: &mut Warnings,
    ) {
        if let Some(id) = *reference {
            if !self.ids.contains(&id) {
                warnings.push(Anomaly::UnresolvedReference {
                    location,
                    field,
                    target: self.name,
                    id,
                });
                *reference = None;
            }
        }
    }

    fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }
}

/// Build the final dataset. Zero surviving records still give a fresh
/// [`Data`], never the [`Data::empty`] sentinel.
pub(crate) fn assemble(candidates: Candidates, warnings: &mut Warnings) -> Data {
    let types = Targets {
        name: "browser type",
        ids: ids(&candidates.browser_types, |r| r.id),
    };
    let browsers = Targets {
        name: "browser",
        ids: ids(&candidates.browsers, |r| r.id),
    };
    let operating_systems = Targets {
        name: "operating system",
        ids: ids(&candidates.operating_systems, |r| r.id),
    };
    let devices = Targets {
        name: "device",
        ids: ids(&candidates.devices, |r| r.id),
    };
    let version_patterns = Targets {
        name: "version pattern",
        ids: ids(&candidates.version_patterns, |r| r.id),
    };

    let mut builder = DataBuilder::new().version(candidates.version);

    for c in candidates.browser_types {
        builder = builder.browser_type(c.record);
    }
    for Candidate { index, mut record } in candidates.browsers {
        let location = Location::record(BROWSERS, index);
        types.resolve(&mut record.type_id, location, TYPE_ID, warnings);
        version_patterns.resolve(
            &mut record.version_pattern_id,
            location,
            VERSION_PATTERN_ID,
            warnings,
        );
        builder = builder.browser(record);
    }
    for Candidate { index, mut record } in candidates.browser_patterns {
        let location = Location::record(BROWSER_PATTERNS, index);
        browsers.resolve(&mut record.browser_id, location, BROWSER_ID, warnings);
        builder = builder.browser_pattern(record);
    }
    for c in candidates.operating_systems {
        builder = builder.operating_system(c.record);
    }
    for Candidate { index, mut record } in candidates.operating_system_patterns {
        let location = Location::record(OPERATING_SYSTEM_PATTERNS, index);
        operating_systems.resolve(
            &mut record.operating_system_id,
            location,
            OPERATING_SYSTEM_ID,
            warnings,
        );
        builder = builder.operating_system_pattern(record);
    }
    for c in candidates.devices {
        builder = builder.device(c.record);
    }
    for Candidate { index, mut record } in candidates.device_patterns {
        let location = Location::record(DEVICE_PATTERNS, index);
        devices.resolve(&mut record.device_id, location, DEVICE_ID, warnings);
        builder = builder.device_pattern(record);
    }
    for c in candidates.version_patterns {
        builder = builder.version_pattern(c.record);
    }
    // A mapping needs both ends; the first dangling one is reported.
    for Candidate { index, record } in candidates.mappings {
        let location = Location::record(BROWSER_TO_OPERATING_SYSTEM_MAPPINGS, index);
        let dangling = if !browsers.contains(record.browser_id) {
            Some((BROWSER_ID, browsers.name, record.browser_id))
        } else if !operating_systems.contains(record.operating_system_id) {
            Some((
                OPERATING_SYSTEM_ID,
                operating_systems.name,
                record.operating_system_id,
            ))
        } else {
            None
        };
        match dangling {
            Some((field, target, id)) => warnings.push(Anomaly::UnresolvedReference {
                location,
                field,
                target,
                id,
            }),
            None => builder = builder.browser_to_operating_system(record),
        }
    }
    for c in candidates.robots {
        builder = builder.robot(c.record);
    }

    builder.build()
}

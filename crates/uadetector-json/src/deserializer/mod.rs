//! Tolerant deserialization of detection data.
//!
//! Parsing runs in two passes. [`parser`] decodes every section into record
//! candidates, checking hashes and field tables; [`assembler`] resolves
//! cross-references once all ids are known. Anomalies from both passes end up
//! in one ordered warning list.

pub(crate) mod assembler;
pub(crate) mod parser;

use uadetector_data::Data;

use crate::options::SerDeOptions;
use crate::warnings::Warnings;

/// Result of one deserialization: the value plus every warning produced on
/// the way, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deserialization<T> {
    data: T,
    warnings: Vec<String>,
}

impl<T> Deserialization<T> {
    pub fn new(data: T, warnings: Vec<String>) -> Self {
        Self { data, warnings }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_parts(self) -> (T, Vec<String>) {
        (self.data, self.warnings)
    }
}

pub(crate) fn deserialize_data(json: &str, options: SerDeOptions) -> Deserialization<Data> {
    log::trace!(
        "deserializing {} bytes, hash validation {}",
        json.len(),
        if options.hash_validating() { "on" } else { "off" }
    );
    let mut warnings = Warnings::new();
    let candidates = parser::parse(json, options, &mut warnings);
    let data = assembler::assemble(candidates, &mut warnings);
    log::debug!(
        "deserialized {} records with {} warnings",
        data.record_count(),
        warnings.len()
    );
    Deserialization::new(data, warnings.into_messages())
}

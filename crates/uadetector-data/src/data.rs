//! The resolved detection dataset and its builder.

use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::records::{
    Browser, BrowserOperatingSystemMapping, BrowserPattern, BrowserType, Device, DevicePattern,
    OperatingSystem, OperatingSystemPattern, Robot, VersionPattern,
};

static EMPTY: OnceLock<Data> = OnceLock::new();

/// Immutable detection dataset.
///
/// Every section is an insertion-ordered map keyed by record id. Pattern
/// sections are matched in that order, so equality compares order too.
#[derive(Debug, Clone, Default)]
pub struct Data {
    version: String,
    browser_types: IndexMap<u32, BrowserType>,
    browsers: IndexMap<u32, Browser>,
    browser_patterns: IndexMap<u32, BrowserPattern>,
    operating_systems: IndexMap<u32, OperatingSystem>,
    operating_system_patterns: IndexMap<u32, OperatingSystemPattern>,
    devices: IndexMap<u32, Device>,
    device_patterns: IndexMap<u32, DevicePattern>,
    version_patterns: IndexMap<u32, VersionPattern>,
    /// Keyed by browser id.
    browser_to_operating_system: IndexMap<u32, BrowserOperatingSystemMapping>,
    robots: IndexMap<u32, Robot>,
}

impl Data {
    /// The process-wide "no data" instance.
    ///
    /// Compare with [`Data::is_empty_sentinel`]; a parsed dataset without
    /// records is equal in value but never identical.
    pub fn empty() -> &'static Data {
        EMPTY.get_or_init(Data::default)
    }

    pub fn is_empty_sentinel(&self) -> bool {
        std::ptr::eq(self, Self::empty())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn browser_types(&self) -> &IndexMap<u32, BrowserType> {
        &self.browser_types
    }

    pub fn browsers(&self) -> &IndexMap<u32, Browser> {
        &self.browsers
    }

    pub fn browser_patterns(&self) -> &IndexMap<u32, BrowserPattern> {
        &self.browser_patterns
    }

    pub fn operating_systems(&self) -> &IndexMap<u32, OperatingSystem> {
        &self.operating_systems
    }

    pub fn operating_system_patterns(&self) -> &IndexMap<u32, OperatingSystemPattern> {
        &self.operating_system_patterns
    }

    pub fn devices(&self) -> &IndexMap<u32, Device> {
        &self.devices
    }

    pub fn device_patterns(&self) -> &IndexMap<u32, DevicePattern> {
        &self.device_patterns
    }

    pub fn version_patterns(&self) -> &IndexMap<u32, VersionPattern> {
        &self.version_patterns
    }

    pub fn browser_to_operating_system_mappings(
        &self,
    ) -> &IndexMap<u32, BrowserOperatingSystemMapping> {
        &self.browser_to_operating_system
    }

    pub fn robots(&self) -> &IndexMap<u32, Robot> {
        &self.robots
    }

    /// Total number of records over all sections.
    pub fn record_count(&self) -> usize {
        self.browser_types.len()
            + self.browsers.len()
            + self.browser_patterns.len()
            + self.operating_systems.len()
            + self.operating_system_patterns.len()
            + self.devices.len()
            + self.device_patterns.len()
            + self.version_patterns.len()
            + self.browser_to_operating_system.len()
            + self.robots.len()
    }

    pub fn patterns_of_browser(&self, browser_id: u32) -> impl Iterator<Item = &BrowserPattern> {
        self.browser_patterns
            .values()
            .filter(move |p| p.browser_id == Some(browser_id))
    }

    pub fn patterns_of_operating_system(
        &self,
        operating_system_id: u32,
    ) -> impl Iterator<Item = &OperatingSystemPattern> {
        self.operating_system_patterns
            .values()
            .filter(move |p| p.operating_system_id == Some(operating_system_id))
    }

    pub fn patterns_of_device(&self, device_id: u32) -> impl Iterator<Item = &DevicePattern> {
        self.device_patterns
            .values()
            .filter(move |p| p.device_id == Some(device_id))
    }

    pub fn operating_system_of_browser(&self, browser_id: u32) -> Option<&OperatingSystem> {
        self.browser_to_operating_system
            .get(&browser_id)
            .and_then(|m| self.operating_systems.get(&m.operating_system_id))
    }
}

fn same_order<T: PartialEq>(a: &IndexMap<u32, T>, b: &IndexMap<u32, T>) -> bool {
    a.len() == b.len() && a.iter().eq(b.iter())
}

impl PartialEq for Data {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && same_order(&self.browser_types, &other.browser_types)
            && same_order(&self.browsers, &other.browsers)
            && same_order(&self.browser_patterns, &other.browser_patterns)
            && same_order(&self.operating_systems, &other.operating_systems)
            && same_order(
                &self.operating_system_patterns,
                &other.operating_system_patterns,
            )
            && same_order(&self.devices, &other.devices)
            && same_order(&self.device_patterns, &other.device_patterns)
            && same_order(&self.version_patterns, &other.version_patterns)
            && same_order(
                &self.browser_to_operating_system,
                &other.browser_to_operating_system,
            )
            && same_order(&self.robots, &other.robots)
    }
}

impl Eq for Data {}

/// Incremental construction of [`Data`].
///
/// A record whose id is already present replaces the earlier one in place.
/// No cross-reference checks happen here, so the result may hold references
/// to ids that no section contains. Such a dataset still serializes, but
/// reading it back drops those references with warnings and yields unequal
/// data.
#[derive(Debug, Default)]
pub struct DataBuilder {
    data: Data,
}

impl DataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.data.version = version.into();
        self
    }

    pub fn browser_type(mut self, record: BrowserType) -> Self {
        self.data.browser_types.insert(record.id, record);
        self
    }

    pub fn browser(mut self, record: Browser) -> Self {
        self.data.browsers.insert(record.id, record);
        self
    }

    pub fn browser_pattern(mut self, record: BrowserPattern) -> Self {
        self.data.browser_patterns.insert(record.id, record);
        self
    }

    pub fn operating_system(mut self, record: OperatingSystem) -> Self {
        self.data.operating_systems.insert(record.id, record);
        self
    }

    pub fn operating_system_pattern(mut self, record: OperatingSystemPattern) -> Self {
        self.data.operating_system_patterns.insert(record.id, record);
        self
    }

    pub fn device(mut self, record: Device) -> Self {
        self.data.devices.insert(record.id, record);
        self
    }

    pub fn device_pattern(mut self, record: DevicePattern) -> Self {
        self.data.device_patterns.insert(record.id, record);
        self
    }

    pub fn version_pattern(mut self, record: VersionPattern) -> Self {
        self.data.version_patterns.insert(record.id, record);
        self
    }

    pub fn browser_to_operating_system(mut self, record: BrowserOperatingSystemMapping) -> Self {
        self.data
            .browser_to_operating_system
            .insert(record.browser_id, record);
        self
    }

    pub fn robot(mut self, record: Robot) -> Self {
        self.data.robots.insert(record.id, record);
        self
    }

    pub fn build(self) -> Data {
        self.data
    }
}

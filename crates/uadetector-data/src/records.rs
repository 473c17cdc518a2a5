//! Detection records. Each record is keyed by its `id` inside [`crate::Data`].

use crate::pattern::Pattern;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserType {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Browser {
    pub id: u32,
    pub family: String,
    pub name: String,
    pub url: String,
    pub producer: String,
    pub producer_url: String,
    pub icon: String,
    pub info_url: String,
    /// Refers to a [`BrowserType`].
    pub type_id: Option<u32>,
    /// Refers to the [`VersionPattern`] extracting this browser's version.
    pub version_pattern_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserPattern {
    pub id: u32,
    pub browser_id: Option<u32>,
    pub position: u32,
    pub pattern: Pattern,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatingSystem {
    pub id: u32,
    pub family: String,
    pub name: String,
    pub url: String,
    pub producer: String,
    pub producer_url: String,
    pub icon: String,
    pub info_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatingSystemPattern {
    pub id: u32,
    pub operating_system_id: Option<u32>,
    pub position: u32,
    pub pattern: Pattern,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Device {
    pub id: u32,
    pub name: String,
    pub icon: String,
    pub info_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePattern {
    pub id: u32,
    pub device_id: Option<u32>,
    pub position: u32,
    pub pattern: Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPattern {
    pub id: u32,
    pub position: u32,
    pub pattern: Pattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BrowserOperatingSystemMapping {
    pub browser_id: u32,
    pub operating_system_id: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Robot {
    pub id: u32,
    pub name: String,
    pub family: String,
    pub user_agent: String,
    pub producer: String,
    pub producer_url: String,
    pub url: String,
    pub icon: String,
    pub info_url: String,
}

//! uadetector-data - user-agent detection dataset model.
//!
//! [`Data`] holds browsers, operating systems, devices and robots together
//! with the ordered patterns that identify them and the version-extraction
//! patterns. Instances are built with [`DataBuilder`]; [`Data::empty`] is the
//! shared "no data" instance.

mod data;
mod pattern;
mod records;

pub use data::{Data, DataBuilder};
pub use pattern::{Pattern, PatternError};
pub use records::{
    Browser, BrowserOperatingSystemMapping, BrowserPattern, BrowserType, Device, DevicePattern,
    OperatingSystem, OperatingSystemPattern, Robot, VersionPattern,
};

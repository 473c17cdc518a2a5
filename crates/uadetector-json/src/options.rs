//! (De)serialization switches.

/// A single switch passed to [`crate::JsonConverter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerDeOption {
    /// Verify the `hash` member of every record while deserializing.
    HashValidating,
    /// Indent the serialized document.
    PrettyPrinting,
}

/// Set of [`SerDeOption`]s. Order and repetition of the source slice do not
/// matter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerDeOptions {
    hash_validating: bool,
    pretty_printing: bool,
}

impl SerDeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, option: SerDeOption) -> Self {
        match option {
            SerDeOption::HashValidating => self.hash_validating = true,
            SerDeOption::PrettyPrinting => self.pretty_printing = true,
        }
        self
    }

    pub fn contains(&self, option: SerDeOption) -> bool {
        match option {
            SerDeOption::HashValidating => self.hash_validating,
            SerDeOption::PrettyPrinting => self.pretty_printing,
        }
    }

    pub fn hash_validating(&self) -> bool {
        self.hash_validating
    }

    pub fn pretty_printing(&self) -> bool {
        self.pretty_printing
    }
}

impl From<&[SerDeOption]> for SerDeOptions {
    fn from(options: &[SerDeOption]) -> Self {
        options
            .iter()
            .fold(SerDeOptions::new(), |set, option| set.with(*option))
    }
}

impl From<SerDeOption> for SerDeOptions {
    fn from(option: SerDeOption) -> Self {
        SerDeOptions::new().with(option)
    }
}

impl FromIterator<SerDeOption> for SerDeOptions {
    fn from_iter<I: IntoIterator<Item = SerDeOption>>(iter: I) -> Self {
        iter.into_iter().fold(SerDeOptions::new(), SerDeOptions::with)
    }
}

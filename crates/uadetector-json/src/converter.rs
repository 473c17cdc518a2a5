//! Entry points for converting detection data to and from JSON.

use uadetector_data::Data;

use crate::deserializer::{deserialize_data, Deserialization};
use crate::error::ConverterError;
use crate::options::{SerDeOption, SerDeOptions};
use crate::serializer::serialize_data;

/// Namespace for the two conversions. Not instantiable.
pub enum JsonConverter {}

impl JsonConverter {
    /// Read detection data from JSON text.
    ///
    /// Fails only when `json` is absent. Malformed content never fails: the
    /// best reconstructable dataset is returned together with one warning per
    /// anomaly. With [`SerDeOption::HashValidating`] every record's `hash`
    /// member is checked as well.
    pub fn deserialize<'a>(
        json: impl Into<Option<&'a str>>,
        options: &[SerDeOption],
    ) -> Result<Deserialization<Data>, ConverterError> {
        let json = json.into().ok_or(ConverterError::NullArgument("json"))?;
        Ok(deserialize_data(json, SerDeOptions::from(options)))
    }

    /// Write detection data as JSON text.
    ///
    /// Fails when `data` is absent. Absent `options` are the same as none.
    /// Equal data and options always give identical text.
    pub fn serialize<'a>(
        data: impl Into<Option<&'a Data>>,
        options: Option<&[SerDeOption]>,
    ) -> Result<String, ConverterError> {
        let data = data.into().ok_or(ConverterError::NullArgument("data"))?;
        serialize_data(data, options.map(SerDeOptions::from).unwrap_or_default())
    }
}

/// Shorthand for [`JsonConverter::deserialize`].
pub fn deserialize<'a>(
    json: impl Into<Option<&'a str>>,
    options: &[SerDeOption],
) -> Result<Deserialization<Data>, ConverterError> {
    JsonConverter::deserialize(json, options)
}

/// Shorthand for [`JsonConverter::serialize`].
pub fn serialize<'a>(
    data: impl Into<Option<&'a Data>>,
    options: Option<&[SerDeOption]>,
) -> Result<String, ConverterError> {
    JsonConverter::serialize(data, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_arguments_are_precondition_failures() {
        assert!(matches!(
            JsonConverter::deserialize(None, &[]),
            Err(ConverterError::NullArgument("json"))
        ));
        assert!(matches!(
            JsonConverter::serialize(None, None),
            Err(ConverterError::NullArgument("data"))
        ));
    }

    #[test]
    fn free_functions_forward_to_the_facade() {
        let options = Some(&[SerDeOption::PrettyPrinting][..]);
        let text = serialize(Data::empty(), options).unwrap();
        assert_eq!(text, JsonConverter::serialize(Data::empty(), options).unwrap());
        let back = deserialize(text.as_str(), &[]).unwrap();
        assert_eq!(back, JsonConverter::deserialize(text.as_str(), &[]).unwrap());
        assert!(matches!(
            deserialize(None, &[]),
            Err(ConverterError::NullArgument("json"))
        ));
    }

    #[test]
    fn empty_sentinel_serializes() {
        let text = JsonConverter::serialize(Data::empty(), None).unwrap();
        let back =
            JsonConverter::deserialize(text.as_str(), &[SerDeOption::HashValidating]).unwrap();
        assert!(!back.has_warnings());
        assert_eq!(back.data(), Data::empty());
        assert!(!back.data().is_empty_sentinel());
    }
}

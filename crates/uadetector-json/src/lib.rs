//! uadetector-json - JSON form of user-agent detection data.
//!
//! [`JsonConverter::deserialize`] reads a detection data document into
//! [`uadetector_data::Data`] and never gives up on bad content: malformed
//! records are skipped, dangling references dropped, and each anomaly is
//! reported as one warning string of the returned [`Deserialization`].
//! [`JsonConverter::serialize`] writes the inverse document, stamping every
//! record with the SHA-256 digest checked by [`SerDeOption::HashValidating`].
//!
//! ```
//! use uadetector_json::{JsonConverter, SerDeOption};
//!
//! let result = JsonConverter::deserialize(r#"{"version": "v1"}"#, &[]).unwrap();
//! assert!(result.warnings().is_empty());
//!
//! let text = JsonConverter::serialize(result.data(), None).unwrap();
//! let again = JsonConverter::deserialize(text.as_str(), &[SerDeOption::HashValidating]).unwrap();
//! assert_eq!(again.data(), result.data());
//! ```

mod converter;
mod deserializer;
mod error;
mod hash;
mod options;
mod schema;
mod serializer;
mod warnings;

pub use converter::{deserialize, serialize, JsonConverter};
pub use deserializer::Deserialization;
pub use error::ConverterError;
pub use hash::{canonical_record, record_digest};
pub use options::{SerDeOption, SerDeOptions};
pub use serializer::to_json;
pub use uadetector_data::Data;

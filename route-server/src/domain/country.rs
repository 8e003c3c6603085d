//! Country code types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid country code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid country code {input:?}: {reason}")]
pub struct InvalidCountryCode {
    input: String,
    reason: &'static str,
}

/// A two-letter country code (ISO 3166-1 alpha-2 style).
///
/// Stored uppercase. Any `CountryCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use route_server::domain::CountryCode;
///
/// let india = CountryCode::parse("IN").unwrap();
/// assert_eq!(india.as_str(), "IN");
///
/// // Lowercase input is normalized
/// assert_eq!(CountryCode::parse("in").unwrap(), india);
///
/// // Wrong length is rejected
/// assert!(CountryCode::parse("IND").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryCode([u8; 2]);

impl CountryCode {
    /// Parse a country code, accepting either case.
    pub fn parse(s: &str) -> Result<Self, InvalidCountryCode> {
        let bytes = s.trim().as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidCountryCode {
                input: s.to_string(),
                reason: "must be exactly 2 letters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(InvalidCountryCode {
                input: s.to_string(),
                reason: "must be ASCII letters A-Z",
            });
        }

        Ok(CountryCode([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
        ]))
    }

    /// Parse an optional country code where empty means "absent".
    pub fn parse_optional(s: Option<&str>) -> Result<Option<Self>, InvalidCountryCode> {
        match s.map(str::trim) {
            None | Some("") => Ok(None),
            Some(code) => Self::parse(code).map(Some),
        }
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl fmt::Debug for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountryCode({})", self.as_str())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CountryCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        CountryCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

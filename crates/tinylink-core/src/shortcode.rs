use crate::base62::{self, CODE_LENGTH};
use crate::error::CoreError;
use serde::Serialize;
use smol_str::SmolStr;
use std::fmt;

/// A fixed-width identifier for a stored link.
///
/// Codes are exactly [`CODE_LENGTH`] characters over the base-62 alphabet.
/// Generated codes come from [`ShortCode::from_id`]; codes arriving over
/// the transport go through [`ShortCode::parse`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ShortCode(SmolStr);

impl ShortCode {
    /// Encodes a generator ID into its short code.
    pub fn from_id(id: u64) -> Self {
        Self(base62::encode(id))
    }

    /// Validates and wraps an externally supplied code.
    pub fn parse(code: &str) -> Result<Self, CoreError> {
        if code.len() != CODE_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be exactly {}, got {}",
                CODE_LENGTH,
                code.len()
            )));
        }

        if !code.bytes().all(base62::is_alphabet_byte) {
            return Err(CoreError::InvalidShortCode(format!(
                "must contain only base-62 alphanumeric characters: '{code}'"
            )));
        }

        Ok(Self(SmolStr::new(code)))
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShortCode").field(&self.0).finish()
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ShortCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_id_produces_fixed_width_codes() {
        assert_eq!(ShortCode::from_id(0).as_str(), "00000000");
        assert_eq!(ShortCode::from_id(1).as_str(), "00000001");
    }

    #[test]
    fn parse_accepts_well_formed_codes() {
        assert!(ShortCode::parse("00000042").is_ok());
        assert!(ShortCode::parse("abcXYZ09").is_ok());
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(ShortCode::parse("").is_err());
        assert!(ShortCode::parse("abc").is_err());
        assert!(ShortCode::parse("abcdefghi").is_err());
    }

    #[test]
    fn parse_rejects_non_alphabet_characters() {
        assert!(ShortCode::parse("abc-defg").is_err());
        assert!(ShortCode::parse("abc defg").is_err());
        assert!(ShortCode::parse("abc/defg").is_err());
    }

    #[test]
    fn display_matches_payload() {
        let code = ShortCode::parse("00000042").unwrap();
        assert_eq!(code.to_string(), "00000042");
    }
}

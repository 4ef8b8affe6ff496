//! Canadian province and territory codes.

use std::fmt;
use std::str::FromStr;

/// Two-letter code of a Canadian province or territory.
///
/// The declaration order is the whitelist order used by [`extract_province_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvinceCode {
    BC,
    AB,
    SK,
    MB,
    ON,
    QC,
    NB,
    NS,
    PE,
    NL,
    YT,
    NT,
    NU,
}

impl ProvinceCode {
    /// Every code, in whitelist order.
    pub const ALL: [ProvinceCode; 13] = [
        ProvinceCode::BC,
        ProvinceCode::AB,
        ProvinceCode::SK,
        ProvinceCode::MB,
        ProvinceCode::ON,
        ProvinceCode::QC,
        ProvinceCode::NB,
        ProvinceCode::NS,
        ProvinceCode::PE,
        ProvinceCode::NL,
        ProvinceCode::YT,
        ProvinceCode::NT,
        ProvinceCode::NU,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProvinceCode::BC => "BC",
            ProvinceCode::AB => "AB",
            ProvinceCode::SK => "SK",
            ProvinceCode::MB => "MB",
            ProvinceCode::ON => "ON",
            ProvinceCode::QC => "QC",
            ProvinceCode::NB => "NB",
            ProvinceCode::NS => "NS",
            ProvinceCode::PE => "PE",
            ProvinceCode::NL => "NL",
            ProvinceCode::YT => "YT",
            ProvinceCode::NT => "NT",
            ProvinceCode::NU => "NU",
        }
    }
}

impl fmt::Display for ProvinceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses an exact two-letter code, ignoring case and surrounding whitespace.
impl FromStr for ProvinceCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ProvinceCode::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("'{s}' is not a Canadian province or territory code"))
    }
}

/// Finds the province code contained in a free-text province field.
///
/// This is substring containment, not parsing: the first whitelisted code found in the
/// text wins, so a field mentioning several codes resolves by whitelist order.
/// Matching is case-sensitive, as codes are upper case in the catalogs.
pub fn extract_province_code(text: &str) -> Option<ProvinceCode> {
    ProvinceCode::ALL
        .into_iter()
        .find(|code| text.contains(code.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_code_from_plain_and_decorated_fields() {
        assert_eq!(extract_province_code("ON"), Some(ProvinceCode::ON));
        assert_eq!(extract_province_code("QC - Quebec"), Some(ProvinceCode::QC));
        assert_eq!(extract_province_code(""), None);
        assert_eq!(extract_province_code("Ontario"), None);
    }

    #[test]
    fn ambiguous_field_resolves_by_whitelist_order() {
        // Both ON and BC appear; BC comes first in the whitelist.
        assert_eq!(extract_province_code("ON/BC"), Some(ProvinceCode::BC));
    }

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("on".parse::<ProvinceCode>(), Ok(ProvinceCode::ON));
        assert_eq!(" Nu ".parse::<ProvinceCode>(), Ok(ProvinceCode::NU));
        assert!("Ontario".parse::<ProvinceCode>().is_err());
    }
}

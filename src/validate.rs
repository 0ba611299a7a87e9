use crate::error::ToolError;

pub const MIN_YEAR: i64 = 1960;
pub const MAX_YEAR: i64 = 2100;

const COUNTRY_MESSAGE: &str = "country must be ISO-2 or ISO-3 code (e.g., 'US' or 'USA').";
const YEAR_MESSAGE: &str = "year must be between 1960 and 2100.";
const OPTIONAL_YEAR_MESSAGE: &str = "year must be between 1960 and 2100 or omitted for latest.";

/// A country argument that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCode {
    code: String,
    upper: String,
}

impl CountryCode {
    /// Trimmed code as the caller wrote it; this is what goes into the URL path.
    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// Upper-cased code, echoed back in results.
    pub fn upper(&self) -> &str {
        &self.upper
    }
}

/// Accept ISO-2 / ISO-3 style codes: 2 or 3 characters after trimming.
pub fn country(raw: &str) -> Result<CountryCode, ToolError> {
    let code = raw.trim();
    if !(2..=3).contains(&code.chars().count()) {
        return Err(ToolError::validation(COUNTRY_MESSAGE));
    }
    Ok(CountryCode {
        code: code.to_string(),
        upper: code.to_uppercase(),
    })
}

pub fn year(year: i64) -> Result<i32, ToolError> {
    in_range(year).ok_or_else(|| ToolError::validation(YEAR_MESSAGE))
}

/// Year for tools where omitting it means "latest available".
pub fn optional_year(year: Option<i64>) -> Result<Option<i32>, ToolError> {
    year.map(|y| in_range(y).ok_or_else(|| ToolError::validation(OPTIONAL_YEAR_MESSAGE)))
        .transpose()
}

/// Country first, then year.
pub fn country_year(raw_country: &str, raw_year: i64) -> Result<(CountryCode, i32), ToolError> {
    let code = country(raw_country)?;
    let year = year(raw_year)?;
    Ok((code, year))
}

fn in_range(year: i64) -> Option<i32> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        i32::try_from(year).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_length_bounds() {
        assert!(country("U").is_err());
        assert!(country("USAA").is_err());
        assert!(country("   ").is_err());
        assert_eq!(country(" us ").unwrap().as_str(), "us");
        assert_eq!(country(" us ").unwrap().upper(), "US");
        assert_eq!(country("kor").unwrap().upper(), "KOR");
    }

    #[test]
    fn year_bounds_are_inclusive() {
        assert_eq!(year(1960).unwrap(), 1960);
        assert_eq!(year(2100).unwrap(), 2100);
        assert!(year(1959).is_err());
        assert!(year(2101).is_err());
        assert!(year(i64::MAX).is_err());
    }

    #[test]
    fn optional_year_uses_its_own_message() {
        assert_eq!(optional_year(None).unwrap(), None);
        let err = optional_year(Some(1800)).unwrap_err();
        assert_eq!(err.to_string(), OPTIONAL_YEAR_MESSAGE);
    }

    #[test]
    fn country_checked_before_year() {
        let err = country_year("X", 1800).unwrap_err();
        assert_eq!(err.to_string(), COUNTRY_MESSAGE);
    }
}

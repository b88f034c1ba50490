//! User-supplied place queries.

use std::fmt;

use super::error::DomainError;

/// A non-empty, trimmed free-text place description.
///
/// Any `PlaceQuery` value is valid by construction, so the geocoder never
/// has to deal with blank input.
///
/// # Examples
///
/// ```
/// use station_server::domain::PlaceQuery;
///
/// let place = PlaceQuery::parse("  Harvard University ").unwrap();
/// assert_eq!(place.as_str(), "Harvard University");
///
/// assert!(PlaceQuery::parse("").is_err());
/// assert!(PlaceQuery::parse(" \t\n").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PlaceQuery(String);

impl PlaceQuery {
    /// Parse a place query, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyPlace);
        }
        Ok(PlaceQuery(trimmed.to_string()))
    }

    /// Returns the query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlaceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlaceQuery({:?})", self.0)
    }
}

impl fmt::Display for PlaceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims() {
        let place = PlaceQuery::parse("  Boston Common  ").unwrap();
        assert_eq!(place.as_str(), "Boston Common");
    }

    #[test]
    fn parse_keeps_inner_whitespace() {
        let place = PlaceQuery::parse("Harvard   University").unwrap();
        assert_eq!(place.as_str(), "Harvard   University");
    }

    #[test]
    fn reject_empty() {
        assert_eq!(PlaceQuery::parse(""), Err(DomainError::EmptyPlace));
        assert_eq!(PlaceQuery::parse("   "), Err(DomainError::EmptyPlace));
        assert_eq!(PlaceQuery::parse("\t\r\n"), Err(DomainError::EmptyPlace));
    }

    #[test]
    fn display_and_debug() {
        let place = PlaceQuery::parse("Fenway").unwrap();
        assert_eq!(format!("{}", place), "Fenway");
        assert_eq!(format!("{:?}", place), "PlaceQuery(\"Fenway\")");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Whitespace-only input is always rejected
        #[test]
        fn whitespace_rejected(s in "[ \t\r\n]{0,10}") {
            prop_assert!(PlaceQuery::parse(&s).is_err());
        }

        /// Parsed queries never carry surrounding whitespace
        #[test]
        fn parsed_is_trimmed(s in "[ ]{0,3}[A-Za-z0-9][A-Za-z0-9 ,.'-]{0,20}[ ]{0,3}") {
            let place = PlaceQuery::parse(&s).unwrap();
            prop_assert_eq!(place.as_str(), s.trim());
        }
    }
}

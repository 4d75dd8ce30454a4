use std::fmt::Display;

use thiserror::Error;

pub const MIN_YEAR: u32 = 1900;
pub const MAX_YEAR: u32 = 2024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("year must be a number, got '{0}'")]
    YearNotNumber(String),

    #[error("year must be between {MIN_YEAR} and {MAX_YEAR}, got {0}")]
    YearOutOfRange(String),
}

/// Release year accepted by the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Year(u32);

impl Year {
    pub fn new(year: u32) -> Result<Self, CriteriaError> {
        if (MIN_YEAR..=MAX_YEAR).contains(&year) {
            Ok(Self(year))
        } else {
            Err(CriteriaError::YearOutOfRange(year.to_string()))
        }
    }

    /// Parses a form value. An empty value means no year was given.
    ///
    /// Only plain digits are accepted; any digit string too large for a year
    /// is out of range rather than malformed.
    pub fn parse_field(value: &str) -> Result<Option<Self>, CriteriaError> {
        if value.is_empty() {
            return Ok(None);
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CriteriaError::YearNotNumber(value.to_string()));
        }
        let year = value
            .parse::<u32>()
            .map_err(|_| CriteriaError::YearOutOfRange(value.to_string()))?;
        Self::new(year).map(Some)
    }
}

impl Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fields entered for one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub track: Option<String>,
    pub artist: Option<String>,
    pub composer: Option<String>,
    pub year: Option<Year>,
}

impl SearchCriteria {
    /// Builds criteria from raw text fields, treating empty text as absent.
    pub fn from_fields(
        track: Option<String>,
        artist: Option<String>,
        composer: Option<String>,
        year: Option<&str>,
    ) -> Result<Self, CriteriaError> {
        Ok(Self {
            track: non_empty(track),
            artist: non_empty(artist),
            composer: non_empty(composer),
            year: match year {
                Some(y) => Year::parse_field(y)?,
                None => None,
            },
        })
    }

    /// Field-qualified query in the fixed order track, artist, composer, year.
    ///
    /// Values go out verbatim, the search service does its own parsing.
    pub fn to_query(&self) -> String {
        let year = self.year.map(|y| y.to_string());
        let tokens = [
            ("track", self.track.as_deref()),
            ("artist", self.artist.as_deref()),
            ("composer", self.composer.as_deref()),
            ("year", year.as_deref()),
        ];

        tokens
            .iter()
            .filter_map(|(field, value)| value.map(|v| format!("{field}:{v}")))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.track.is_none()
            && self.artist.is_none()
            && self.composer.is_none()
            && self.year.is_none()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

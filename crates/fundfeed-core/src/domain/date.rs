use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::ValidationError;

/// Calendar date a run is processed "as of".
///
/// Statements dated after it are treated as projections, and the price
/// lookback window is measured back from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessingDate(Date);

impl ProcessingDate {
    /// Today's date in UTC.
    pub fn today() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    /// Parse a strict `YYYY-MM-DD` date.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), format_description!("[year]-[month]-[day]"))
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    /// Parse the date portion of an upstream timestamp such as
    /// `2023-05-01T00:00:00.000Z`. Returns `None` if it is not a date.
    pub fn parse_leading(input: &str) -> Option<Self> {
        Self::parse(date_portion(input)).ok()
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    /// Same calendar day `years` earlier. Feb 29 clamps to Feb 28.
    pub fn years_back(self, years: u8) -> Result<Self, ValidationError> {
        let year = self.0.year() - i32::from(years);
        self.0
            .replace_year(year)
            .or_else(|_| Date::from_calendar_date(year, self.0.month(), 28))
            .map(Self)
            .map_err(|_| ValidationError::InvalidLookback { years })
    }

    pub fn format_iso(self) -> String {
        self.to_string()
    }
}

/// Everything before the `T` time delimiter.
pub fn date_portion(raw: &str) -> &str {
    raw.split('T').next().unwrap_or(raw)
}

impl Display for ProcessingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let formatted = self
            .0
            .format(format_description!("[year]-[month]-[day]"))
            .map_err(|_| std::fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl FromStr for ProcessingDate {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Serialize for ProcessingDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProcessingDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

use std::{fmt::Display, str::FromStr};

use super::{Media, MediaType};

/// Editable field of a [`Media`] entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaField {
    Title,
    Type,
    Director,
    Budget,
    Location,
    Duration,
    Year,
}

impl MediaField {
    /// Fields in display order
    pub const ALL: [MediaField; 7] = [
        MediaField::Title,
        MediaField::Type,
        MediaField::Director,
        MediaField::Budget,
        MediaField::Location,
        MediaField::Duration,
        MediaField::Year,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MediaField::Title => "Title",
            MediaField::Type => "Type",
            MediaField::Director => "Director",
            MediaField::Budget => "Budget",
            MediaField::Location => "Location",
            MediaField::Duration => "Duration",
            MediaField::Year => "Year",
        }
    }

    /// Type always has a value, the text fields must be filled in
    pub fn is_required(&self) -> bool {
        !matches!(self, MediaField::Type)
    }

    pub fn get<'a>(&self, media: &'a Media) -> &'a str {
        match self {
            MediaField::Title => &media.title,
            MediaField::Type => media.media_type.as_str(),
            MediaField::Director => &media.director,
            MediaField::Budget => &media.budget,
            MediaField::Location => &media.location,
            MediaField::Duration => &media.duration,
            MediaField::Year => &media.year,
        }
    }

    /// Writes `value` into the field. Only `Type` can reject a value.
    pub fn set(&self, media: &mut Media, value: &str) -> Result<(), String> {
        let slot = match self {
            MediaField::Type => {
                media.media_type = MediaType::parse(value)
                    .ok_or_else(|| format!("type must be Movie or TV Show, got '{}'", value))?;
                return Ok(());
            }
            MediaField::Title => &mut media.title,
            MediaField::Director => &mut media.director,
            MediaField::Budget => &mut media.budget,
            MediaField::Location => &mut media.location,
            MediaField::Duration => &mut media.duration,
            MediaField::Year => &mut media.year,
        };
        *slot = value.to_string();
        Ok(())
    }
}

impl Display for MediaField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MediaField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaField::ALL
            .iter()
            .copied()
            .find(|field| field.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown field '{}'", s))
    }
}

//! Closed set of genre tags.
//!
//! Tags are canonical upper-case identifiers internally (`ROCK`, `J_POP`) and
//! are matched case-insensitively wherever text enters the system, so `"rock"`,
//! `"Rock"` and `"ROCK"` all resolve to [`Genre::Rock`].

use lazy_static::lazy_static;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A canonical genre tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Genre {
    Rock,
    Pop,
    Punk,
    Metal,
    Jazz,
    Blues,
    Classical,
    HipHop,
    Electronic,
    Country,
    Folk,
    Reggae,
    Soul,
    Funk,
    Indie,
    Alternative,
    KPop,
    JPop,
    JRock,
}

impl Genre {
    /// Every tag, in declaration order.
    pub const ALL: [Genre; 19] = [
        Genre::Rock,
        Genre::Pop,
        Genre::Punk,
        Genre::Metal,
        Genre::Jazz,
        Genre::Blues,
        Genre::Classical,
        Genre::HipHop,
        Genre::Electronic,
        Genre::Country,
        Genre::Folk,
        Genre::Reggae,
        Genre::Soul,
        Genre::Funk,
        Genre::Indie,
        Genre::Alternative,
        Genre::KPop,
        Genre::JPop,
        Genre::JRock,
    ];

    /// Canonical tag text.
    #[must_use]
    pub const fn as_tag(self) -> &'static str {
        match self {
            Genre::Rock => "ROCK",
            Genre::Pop => "POP",
            Genre::Punk => "PUNK",
            Genre::Metal => "METAL",
            Genre::Jazz => "JAZZ",
            Genre::Blues => "BLUES",
            Genre::Classical => "CLASSICAL",
            Genre::HipHop => "HIP_HOP",
            Genre::Electronic => "ELECTRONIC",
            Genre::Country => "COUNTRY",
            Genre::Folk => "FOLK",
            Genre::Reggae => "REGGAE",
            Genre::Soul => "SOUL",
            Genre::Funk => "FUNK",
            Genre::Indie => "INDIE",
            Genre::Alternative => "ALTERNATIVE",
            Genre::KPop => "K_POP",
            Genre::JPop => "J_POP",
            Genre::JRock => "J_ROCK",
        }
    }
}

lazy_static! {
    /// Canonical tag -> genre.
    static ref TAG_LOOKUP: HashMap<&'static str, Genre> =
        Genre::ALL.iter().map(|&genre| (genre.as_tag(), genre)).collect();
}

/// Text that is not a recognized genre tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown genre tag: {input}")]
pub struct GenreParseError {
    pub input: String,
}

impl FromStr for Genre {
    type Err = GenreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TAG_LOOKUP
            .get(s.to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| GenreParseError { input: s.to_string() })
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl Serialize for Genre {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for Genre {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

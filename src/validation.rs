//! # Request Validation
//!
//! Raw request payloads ([`SongRequest`], [`ArtistRequest`],
//! [`TrendingRequest`], [`SearchRequest`]) mirror the JSON bodies clients send:
//! every field is optional so a missing field becomes a field-level
//! [`CatalogError`] instead of a deserialization failure.
//!
//! Each `validate_*` function turns a payload into a typed request the engine
//! can trust ([`NewSong`], [`NewArtist`], [`TrendingWindow`],
//! [`SearchCriteria`]). Fields are checked in declaration order and the first
//! violation is reported.

use crate::error::CatalogError;
use crate::genre::Genre;
use crate::length;
use crate::model::{Artist, ArtistId};
use crate::search::SearchCriteria;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

/// Wire format of trending window dates.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Song creation payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRequest {
    pub name: Option<String>,
    pub artists: Option<Vec<i64>>,
    pub genres: Option<Vec<String>>,
    pub length: Option<String>,
    pub url: Option<String>,
}

/// Artist creation payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRequest {
    pub name: Option<String>,
}

/// Trending query payload. Dates are `yyyy/mm/dd`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Search payload. Absent options impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub name: Option<String>,
    pub include_artist: Option<Vec<String>>,
    pub exclude_artist: Option<Vec<String>>,
    pub include_genres: Option<Vec<String>>,
    pub exclude_genres: Option<Vec<String>>,
}

/// A validated song, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub name: String,
    pub artists: BTreeSet<Artist>,
    pub genres: Vec<Genre>,
    pub length: Duration,
    pub url: String,
}

/// A validated artist, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArtist {
    pub name: String,
}

/// An inclusive range of calendar days. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendingWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl TrendingWindow {
    /// # Errors
    ///
    /// `CatalogError::InvalidRange` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CatalogError> {
        if start > end {
            return Err(CatalogError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `instant` falls on any day of the window, both ends included.
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        let day = instant.date();
        self.start <= day && day <= self.end
    }
}

/// Validate a song payload against the known artists.
///
/// # Errors
///
/// - `InvalidField("name")` when the name is missing or blank
/// - `InvalidField("artists")` when no artist ids are given
/// - `NotFound("artist", id)` for the first id not in `known_artists`
/// - `InvalidField("genres")` when genres are missing, empty, or unrecognized
/// - `InvalidField("length")` when length is missing or not `M:SS`
/// - `InvalidField("url")` when url is missing
pub fn validate_song(
    request: &SongRequest,
    known_artists: &[Artist],
) -> Result<NewSong, CatalogError> {
    let name = required_text(request.name.as_deref(), "name")?;

    let artist_ids = match request.artists.as_deref() {
        Some(ids) if !ids.is_empty() => ids,
        _ => return Err(CatalogError::InvalidField("artists")),
    };
    let artists = artist_ids
        .iter()
        .map(|&id| {
            known_artists
                .iter()
                .find(|artist| artist.id == ArtistId(id))
                .cloned()
                .ok_or(CatalogError::NotFound("artist", id))
        })
        .collect::<Result<BTreeSet<_>, _>>()?;

    let genres = match request.genres.as_deref() {
        Some(tags) if !tags.is_empty() => parse_genres(tags, "genres")?,
        _ => return Err(CatalogError::InvalidField("genres")),
    };

    let length = request
        .length
        .as_deref()
        .ok_or(CatalogError::InvalidField("length"))
        .and_then(length::parse)?;

    let url = request
        .url
        .clone()
        .ok_or(CatalogError::InvalidField("url"))?;

    log::debug!("Validated song `{name}' with {} artist(s)", artists.len());
    Ok(NewSong {
        name,
        artists,
        genres,
        length,
        url,
    })
}

/// Validate an artist payload.
///
/// # Errors
///
/// `InvalidField("name")` when the name is missing or blank.
pub fn validate_artist(request: &ArtistRequest) -> Result<NewArtist, CatalogError> {
    let name = required_text(request.name.as_deref(), "name")?;
    Ok(NewArtist { name })
}

/// Validate a trending payload into an inclusive day window.
///
/// # Errors
///
/// - `InvalidField("startTime")` / `InvalidField("endTime")` when a date is
///   missing or not `yyyy/mm/dd`
/// - `InvalidRange` when the start date is after the end date
pub fn validate_trending(request: &TrendingRequest) -> Result<TrendingWindow, CatalogError> {
    let start = parse_date(request.start_time.as_deref(), "startTime")?;
    let end = parse_date(request.end_time.as_deref(), "endTime")?;
    TrendingWindow::new(start, end)
}

/// Validate a search payload into engine criteria.
///
/// # Errors
///
/// `InvalidField("includeGenres")` / `InvalidField("excludeGenres")` when a
/// genre list names an unrecognized tag.
pub fn validate_search(request: &SearchRequest) -> Result<SearchCriteria, CatalogError> {
    let name_set = |names: &Option<Vec<String>>| -> Option<HashSet<String>> {
        names.as_ref().map(|names| names.iter().cloned().collect())
    };
    let genre_set = |tags: &Option<Vec<String>>,
                     field: &'static str|
     -> Result<Option<HashSet<Genre>>, CatalogError> {
        tags.as_deref()
            .map(|tags| parse_genres(tags, field).map(|genres| genres.into_iter().collect()))
            .transpose()
    };

    Ok(SearchCriteria {
        name: request.name.clone(),
        include_artist: name_set(&request.include_artist),
        exclude_artist: name_set(&request.exclude_artist),
        include_genres: genre_set(&request.include_genres, "includeGenres")?,
        exclude_genres: genre_set(&request.exclude_genres, "excludeGenres")?,
    })
}

fn required_text(value: Option<&str>, field: &'static str) -> Result<String, CatalogError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(CatalogError::InvalidField(field)),
    }
}

fn parse_genres(tags: &[String], field: &'static str) -> Result<Vec<Genre>, CatalogError> {
    tags.iter()
        .map(|tag| tag.parse::<Genre>().map_err(|_| CatalogError::InvalidField(field)))
        .collect()
}

fn parse_date(value: Option<&str>, field: &'static str) -> Result<NaiveDate, CatalogError> {
    let text = value.ok_or(CatalogError::InvalidField(field))?;
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| CatalogError::InvalidField(field))?;
    // chrono accepts unpadded fields such as `2024/5/1`; only `yyyy/mm/dd` is valid
    if date.format(DATE_FORMAT).to_string() != text {
        return Err(CatalogError::InvalidField(field));
    }
    Ok(date)
}

//! Catalog entities: artists, songs and play events.
//!
//! These are plain immutable values. The store creates them, the engine only
//! ever reads them through borrowed snapshots (`&[Song]`, `&[PlayEvent]`).

use crate::genre::Genre;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

entity_id!(
    /// Artist identity. Assigned by the store in creation order.
    ArtistId
);
entity_id!(
    /// Song identity. Assigned by the store in creation order, so ascending
    /// ids are also ascending creation time.
    SongId
);
entity_id!(
    /// Play event identity.
    PlayEventId
);

/// A performing artist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
}

/// A catalog song.
///
/// `artists` is a set keyed by artist id; `genres` keeps the order (and any
/// duplicates) it was created with. A song always has at least one of each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub name: String,
    pub artists: BTreeSet<Artist>,
    pub genres: Vec<Genre>,
    #[serde(with = "crate::length::mmss")]
    pub length: Duration,
    pub url: String,
}

impl Song {
    /// Does any of this song's artists carry `artist_id`?
    #[must_use]
    pub fn has_artist(&self, artist_id: ArtistId) -> bool {
        self.artists.iter().any(|artist| artist.id == artist_id)
    }

    #[must_use]
    pub fn has_genre(&self, genre: Genre) -> bool {
        self.genres.contains(&genre)
    }

    /// Iterate over the names of this song's artists.
    pub fn artist_names(&self) -> impl Iterator<Item = &str> {
        self.artists.iter().map(|artist| artist.name.as_str())
    }

    /// Catalog invariant: at least one artist and one genre.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.artists.is_empty() && !self.genres.is_empty()
    }
}

/// One playback of one song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayEvent {
    pub id: PlayEventId,
    pub song: SongId,
    pub listened_at: NaiveDateTime,
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Builders shared by the engine's unit tests.

    use super::*;
    use chrono::NaiveDate;

    pub fn artist(id: i64, name: &str) -> Artist {
        Artist {
            id: ArtistId(id),
            name: name.to_string(),
        }
    }

    pub fn song(id: i64, name: &str, artists: &[Artist], genres: &[Genre]) -> Song {
        Song {
            id: SongId(id),
            name: name.to_string(),
            artists: artists.iter().cloned().collect(),
            genres: genres.to_vec(),
            length: Duration::from_secs(130),
            url: format!("http://kanaboom.com/{id}"),
        }
    }

    /// A play of `song` at noon on the given day.
    pub fn play(id: i64, song: i64, year: i32, month: u32, day: u32) -> PlayEvent {
        let listened_at = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .expect("valid test date");
        PlayEvent {
            id: PlayEventId(id),
            song: SongId(song),
            listened_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_song_serializes_to_wire_shape() {
        let kana = artist(1, "kana");
        let silhoute = song(4, "silhoute", &[kana], &[Genre::Rock, Genre::Punk]);

        let value = serde_json::to_value(&silhoute).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 4,
                "name": "silhoute",
                "artists": [{"id": 1, "name": "kana"}],
                "genres": ["ROCK", "PUNK"],
                "length": "2:10",
                "url": "http://kanaboom.com/4",
            })
        );
    }

    #[test]
    fn test_artist_set_is_unique_by_value() {
        let kana = artist(1, "kana");
        let twice = song(1, "twice", &[kana.clone(), kana], &[Genre::Rock]);
        assert_eq!(twice.artists.len(), 1);
    }

    #[test]
    fn test_genres_keep_order_and_duplicates() {
        let kana = artist(1, "kana");
        let s = song(1, "s", &[kana], &[Genre::Punk, Genre::Rock, Genre::Punk]);
        assert_eq!(s.genres, vec![Genre::Punk, Genre::Rock, Genre::Punk]);
    }

    #[test]
    fn test_membership_helpers() {
        let kana = artist(1, "kana");
        let lara = artist(2, "lara");
        let s = song(1, "s", &[kana, lara], &[Genre::JPop]);

        assert!(s.has_artist(ArtistId(2)));
        assert!(!s.has_artist(ArtistId(3)));
        assert!(s.has_genre(Genre::JPop));
        assert!(!s.has_genre(Genre::Rock));
        assert_eq!(s.artist_names().collect::<Vec<_>>(), vec!["kana", "lara"]);
        assert!(s.is_well_formed());
    }
}

//! # Filter Engine
//!
//! Multi-criteria song search over a catalog snapshot.
//!
//! ## Semantics
//!
//! - `name`: case-insensitive substring of the song name
//! - `include_artist`: at least one of the song's artist names is in the set
//! - `exclude_artist`: none of the song's artist names is in the set
//! - `include_genres`: at least one of the song's genres is in the set
//! - `exclude_genres`: none of the song's genres is in the set
//!
//! Supplied dimensions are AND-ed. Exclusions are checked first and reject
//! the song outright, so an exclusion always beats an inclusion naming the
//! same song. With no criteria at all every song matches. Results keep the
//! snapshot's order.

use crate::genre::Genre;
use crate::model::Song;
use log::{debug, trace};
use std::collections::HashSet;

/// Validated search options. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub name: Option<String>,
    pub include_artist: Option<HashSet<String>>,
    pub exclude_artist: Option<HashSet<String>>,
    pub include_genres: Option<HashSet<Genre>>,
    pub exclude_genres: Option<HashSet<Genre>>,
}

impl SearchCriteria {
    /// True when no option is supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.include_artist.is_none()
            && self.exclude_artist.is_none()
            && self.include_genres.is_none()
            && self.exclude_genres.is_none()
    }

    /// Does `song` satisfy every supplied option?
    #[must_use]
    pub fn matches(&self, song: &Song) -> bool {
        debug_assert!(song.is_well_formed(), "song {} breaks catalog invariant", song.id);

        if self.is_excluded(song) {
            trace!("Song {} rejected by exclusion", song.id);
            return false;
        }

        self.matches_name(song) && self.matches_artist(song) && self.matches_genre(song)
    }

    fn is_excluded(&self, song: &Song) -> bool {
        let by_artist = self
            .exclude_artist
            .as_ref()
            .is_some_and(|names| song.artist_names().any(|name| names.contains(name)));
        let by_genre = self
            .exclude_genres
            .as_ref()
            .is_some_and(|genres| song.genres.iter().any(|genre| genres.contains(genre)));

        by_artist || by_genre
    }

    fn matches_name(&self, song: &Song) -> bool {
        self.name
            .as_ref()
            .map_or(true, |needle| song.name.to_lowercase().contains(&needle.to_lowercase()))
    }

    fn matches_artist(&self, song: &Song) -> bool {
        self.include_artist
            .as_ref()
            .map_or(true, |names| song.artist_names().any(|name| names.contains(name)))
    }

    fn matches_genre(&self, song: &Song) -> bool {
        self.include_genres
            .as_ref()
            .map_or(true, |genres| song.genres.iter().any(|genre| genres.contains(genre)))
    }
}

/// Filter `songs` by `criteria`, keeping catalog order.
#[must_use]
pub fn search<'a>(songs: &'a [Song], criteria: &SearchCriteria) -> Vec<&'a Song> {
    let found: Vec<&Song> = songs.iter().filter(|song| criteria.matches(song)).collect();
    debug!("Search matched {} of {} songs", found.len(), songs.len());
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{artist, song};

    fn names(found: &[&Song]) -> Vec<String> {
        found.iter().map(|song| song.name.clone()).collect()
    }

    fn set<T: std::hash::Hash + Eq + Clone>(items: &[T]) -> Option<HashSet<T>> {
        Some(items.iter().cloned().collect())
    }

    fn strings(items: &[&str]) -> Option<HashSet<String>> {
        Some(items.iter().map(|s| s.to_string()).collect())
    }

    /// silhoute(kana, ROCK), twinkle(haka, PUNK), dancehour(kana, J_POP)
    fn catalog() -> Vec<Song> {
        let kana = artist(1, "kana");
        let haka = artist(2, "haka");
        vec![
            song(1, "silhoute", &[kana.clone()], &[Genre::Rock]),
            song(2, "twinkle", &[haka], &[Genre::Punk]),
            song(3, "dancehour", &[kana], &[Genre::JPop]),
        ]
    }

    #[test]
    fn test_no_criteria_is_identity() {
        let songs = catalog();
        let found = search(&songs, &SearchCriteria::default());
        assert_eq!(names(&found), vec!["silhoute", "twinkle", "dancehour"]);
    }

    #[test]
    fn test_name_substring_case_insensitive() {
        let songs = catalog();
        let criteria = SearchCriteria { name: Some("HO".into()), ..Default::default() };
        assert_eq!(names(&search(&songs, &criteria)), vec!["silhoute", "dancehour"]);
    }

    #[test]
    fn test_include_artist() {
        let songs = catalog();
        let criteria = SearchCriteria { include_artist: strings(&["kana"]), ..Default::default() };
        assert_eq!(names(&search(&songs, &criteria)), vec!["silhoute", "dancehour"]);
    }

    #[test]
    fn test_include_artist_is_or_across_values() {
        let songs = catalog();
        let criteria = SearchCriteria {
            include_artist: strings(&["haka", "nobody"]),
            ..Default::default()
        };
        assert_eq!(names(&search(&songs, &criteria)), vec!["twinkle"]);
    }

    #[test]
    fn test_exclude_artist() {
        let songs = catalog();
        let criteria = SearchCriteria { exclude_artist: strings(&["haka"]), ..Default::default() };
        assert_eq!(names(&search(&songs, &criteria)), vec!["silhoute", "dancehour"]);
    }

    #[test]
    fn test_include_genres_excludes_other_genres() {
        let kana = artist(1, "kana");
        let songs = vec![
            song(1, "silhoute", &[kana.clone()], &[Genre::Rock]),
            song(2, "twinkle", &[kana], &[Genre::Punk]),
        ];
        let criteria = SearchCriteria { include_genres: set(&[Genre::Rock]), ..Default::default() };
        assert_eq!(names(&search(&songs, &criteria)), vec!["silhoute"]);
    }

    #[test]
    fn test_exclude_genres() {
        let songs = catalog();
        let criteria = SearchCriteria { exclude_genres: set(&[Genre::Rock]), ..Default::default() };
        assert_eq!(names(&search(&songs, &criteria)), vec!["twinkle", "dancehour"]);
    }

    #[test]
    fn test_exclusion_beats_inclusion() {
        let songs = catalog();
        let by_artist = SearchCriteria {
            include_artist: strings(&["kana"]),
            exclude_artist: strings(&["kana"]),
            ..Default::default()
        };
        assert!(search(&songs, &by_artist).is_empty());

        let by_genre = SearchCriteria {
            include_genres: set(&[Genre::Rock, Genre::Punk]),
            exclude_genres: set(&[Genre::Punk]),
            ..Default::default()
        };
        assert_eq!(names(&search(&songs, &by_genre)), vec!["silhoute"]);

        let crossed = SearchCriteria {
            include_genres: set(&[Genre::JPop]),
            exclude_artist: strings(&["kana"]),
            ..Default::default()
        };
        assert!(search(&songs, &crossed).is_empty());
    }

    #[test]
    fn test_exclusion_precedence_holds_for_every_song() {
        let songs = catalog();
        for song in &songs {
            let artist_names: Vec<&str> = song.artist_names().collect();
            let criteria = SearchCriteria {
                include_artist: strings(&artist_names),
                exclude_artist: strings(&artist_names),
                include_genres: set(&song.genres),
                exclude_genres: set(&song.genres),
                ..Default::default()
            };
            assert!(!criteria.matches(song), "exclusion must win for {}", song.name);
        }
    }

    #[test]
    fn test_all_dimensions_are_anded() {
        let songs = catalog();
        let criteria = SearchCriteria {
            name: Some("ho".into()),
            include_artist: strings(&["kana"]),
            include_genres: set(&[Genre::JPop]),
            exclude_genres: set(&[Genre::Rock]),
            exclude_artist: strings(&["haka"]),
        };
        assert_eq!(names(&search(&songs, &criteria)), vec!["dancehour"]);
    }

    #[test]
    fn test_empty_include_set_matches_nothing() {
        let songs = catalog();
        let criteria = SearchCriteria { include_artist: strings(&[]), ..Default::default() };
        assert!(search(&songs, &criteria).is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        assert!(search(&[], &SearchCriteria::default()).is_empty());
    }
}

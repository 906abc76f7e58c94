//! # Trending Ranker
//!
//! Ranks songs by how often they were played inside a window of days.
//!
//! ## Algorithm
//!
//! ```text
//! plays(song) = |{ e ∈ events : e.song = song.id ∧ e.listened_at ∈ window }|
//! trending    = songs with plays > 0,
//!               sorted by plays descending, then by id ascending
//! ```
//!
//! Songs with no play in the window are not trending and never appear.
//! Ties on play count go to the older song (lower id), which makes the order
//! fully deterministic.
//!
//! Inverted windows cannot reach this module: a [`TrendingWindow`] can only be
//! built with `start <= end`.

use crate::model::{PlayEvent, Song, SongId};
use crate::validation::TrendingWindow;
use log::{debug, trace};
use std::cmp::Reverse;
use std::collections::HashMap;

/// A trending song together with its play count inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendingEntry<'a> {
    pub song: &'a Song,
    pub plays: usize,
}

/// Count qualifying plays per song id.
#[must_use]
pub fn count_plays(events: &[PlayEvent], window: &TrendingWindow) -> HashMap<SongId, usize> {
    events
        .iter()
        .filter(|event| window.contains(event.listened_at))
        .fold(HashMap::new(), |mut counts, event| {
            *counts.entry(event.song).or_insert(0) += 1;
            counts
        })
}

/// Rank `songs` by plays inside `window`, keeping the counts.
///
/// Events pointing at songs missing from `songs` are ignored.
#[must_use]
pub fn rank_with_counts<'a>(
    songs: &'a [Song],
    events: &[PlayEvent],
    window: &TrendingWindow,
) -> Vec<TrendingEntry<'a>> {
    let counts = count_plays(events, window);
    trace!("{} songs played between {} and {}", counts.len(), window.start(), window.end());

    let mut ranked: Vec<TrendingEntry<'a>> = songs
        .iter()
        .filter_map(|song| {
            counts.get(&song.id).map(|&plays| {
                debug_assert!(song.is_well_formed(), "song {} breaks catalog invariant", song.id);
                TrendingEntry { song, plays }
            })
        })
        .collect();

    ranked.sort_by_key(|entry| (Reverse(entry.plays), entry.song.id));

    debug!("Ranked {} trending songs from {} play events", ranked.len(), events.len());
    ranked
}

/// Rank `songs` by plays inside `window`, most played first.
#[must_use]
pub fn rank<'a>(songs: &'a [Song], events: &[PlayEvent], window: &TrendingWindow) -> Vec<&'a Song> {
    rank_with_counts(songs, events, window)
        .into_iter()
        .map(|entry| entry.song)
        .collect()
}

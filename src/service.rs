//! # Catalog Service
//!
//! The entry point every front end goes through. A [`CatalogService`] owns a
//! database connection and runs each operation the same way:
//!
//! ```text
//! load snapshot  ->  validate request  ->  run engine  ->  return entities
//! ```
//!
//! Failures caused by bad input are [`CatalogError`]s carried inside the
//! returned `anyhow::Error`; recover them with [`CatalogError::find_in`].

use crate::db;
use crate::error::CatalogError;
use crate::model::{Artist, PlayEvent, Song, SongId};
use crate::search;
use crate::similarity;
use crate::trending;
use crate::validation::{self, ArtistRequest, SearchRequest, SongRequest, TrendingRequest};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use log::{debug, info};
use rusqlite::Connection;
use std::path::Path;

/// Catalog operations over one SQLite database.
pub struct CatalogService {
    conn: Connection,
}

impl CatalogService {
    /// Open the catalog at `db_path`, creating the schema if needed.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = db::connect(db_path)?;
        db::init_schema(&conn)?;
        debug!("Catalog service ready on {}", db_path.display());
        Ok(Self { conn })
    }

    /// Register a new artist.
    pub fn create_artist(&self, request: &ArtistRequest) -> Result<Artist> {
        let artist = validation::validate_artist(request)?;
        db::insert_artist(&self.conn, &artist)
    }

    /// Register a new song. Every artist id must already exist.
    pub fn create_song(&mut self, request: &SongRequest) -> Result<Song> {
        let known_artists = db::load_artists(&self.conn)?;
        let song = validation::validate_song(request, &known_artists)?;
        db::insert_song(&mut self.conn, &song)
    }

    /// Record one playback of `song` at the current local time.
    pub fn listen(&self, song: SongId) -> Result<PlayEvent> {
        self.listen_at(song, Local::now().naive_local())
    }

    /// Record one playback of `song` at `listened_at`.
    pub fn listen_at(&self, song: SongId, listened_at: NaiveDateTime) -> Result<PlayEvent> {
        if !db::song_exists(&self.conn, song)? {
            return Err(CatalogError::NotFound("song", song.0).into());
        }
        db::insert_play_event(&self.conn, song, listened_at)
    }

    /// Songs played inside the requested window, most played first.
    pub fn trending(&self, request: &TrendingRequest) -> Result<Vec<Song>> {
        Ok(self
            .trending_with_counts(request)?
            .into_iter()
            .map(|(song, _)| song)
            .collect())
    }

    /// Like [`trending`](Self::trending), keeping each song's play count.
    pub fn trending_with_counts(&self, request: &TrendingRequest) -> Result<Vec<(Song, usize)>> {
        let window = validation::validate_trending(request)?;
        let songs = db::load_songs(&self.conn)?;
        let events = db::load_play_events(&self.conn)?;

        let ranked = trending::rank_with_counts(&songs, &events, &window)
            .into_iter()
            .map(|entry| (entry.song.clone(), entry.plays))
            .collect::<Vec<_>>();

        info!(
            "{} trending songs between {} and {}",
            ranked.len(),
            window.start(),
            window.end()
        );
        Ok(ranked)
    }

    /// Songs sharing an artist or a genre with `song`.
    pub fn similar(&self, song: SongId) -> Result<Vec<Song>> {
        let songs = db::load_songs(&self.conn)?;
        let found = similarity::find_similar(song, &songs)?;
        Ok(found.into_iter().cloned().collect())
    }

    /// Songs matching every supplied search option.
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<Song>> {
        let criteria = validation::validate_search(request)?;
        let songs = db::load_songs(&self.conn)?;
        Ok(search::search(&songs, &criteria).into_iter().cloned().collect())
    }

    /// The whole catalog, oldest song first.
    pub fn songs(&self) -> Result<Vec<Song>> {
        db::load_songs(&self.conn)
    }

    pub fn artists(&self) -> Result<Vec<Artist>> {
        db::load_artists(&self.conn)
    }

    /// Drop every artist, song and play event.
    pub fn reset(&mut self) -> Result<()> {
        db::reset(&mut self.conn).context("Failed to reset catalog")
    }
}

//! # Catalog Store
//!
//! SQLite persistence for artists, songs and play events. The query engine
//! never touches this module; it only receives the snapshots loaded here.
//!
//! ## Schema
//!
//! ```text
//! artists       (id, name)
//! songs         (id, name, length_secs, url)
//! song_artists  (song_id, artist_id)            -- set, primary key on both
//! song_genres   (song_id, position, genre)      -- ordered, duplicates allowed
//! play_events   (id, song_id, listened_at)
//! ```
//!
//! Ids are `INTEGER PRIMARY KEY AUTOINCREMENT`, so they are never reused and
//! ascending id order is creation order. Every snapshot is returned in that
//! order.

use crate::genre::Genre;
use crate::model::{Artist, ArtistId, PlayEvent, PlayEventId, Song, SongId};
use crate::validation::{NewArtist, NewSong};
use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::time::Duration;

/// Open (or create) the catalog database at `db_path`.
pub fn connect(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open catalog database at {}", db_path.display()))?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .context("Failed to enable foreign keys")?;
    Ok(conn)
}

/// Create every table and index if missing. Safe to call repeatedly.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS artists (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT    NOT NULL
        );
        CREATE TABLE IF NOT EXISTS songs (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT    NOT NULL,
            length_secs INTEGER NOT NULL CHECK (length_secs >= 0),
            url         TEXT    NOT NULL
        );
        CREATE TABLE IF NOT EXISTS song_artists (
            song_id   INTEGER NOT NULL REFERENCES songs(id),
            artist_id INTEGER NOT NULL REFERENCES artists(id),
            PRIMARY KEY (song_id, artist_id)
        );
        CREATE TABLE IF NOT EXISTS song_genres (
            song_id  INTEGER NOT NULL REFERENCES songs(id),
            position INTEGER NOT NULL,
            genre    TEXT    NOT NULL,
            PRIMARY KEY (song_id, position)
        );
        CREATE TABLE IF NOT EXISTS play_events (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            song_id     INTEGER NOT NULL REFERENCES songs(id),
            listened_at TEXT    NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_play_events_listened_at ON play_events(listened_at);",
    )
    .context("Invalid SQL when creating catalog schema")?;

    debug!("Catalog schema ready");
    Ok(())
}

/// Delete every row and restart id sequences.
pub fn reset(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(
        "DELETE FROM play_events;
         DELETE FROM song_genres;
         DELETE FROM song_artists;
         DELETE FROM songs;
         DELETE FROM artists;
         DELETE FROM sqlite_sequence;",
    )
    .context("Failed to clear catalog tables")?;
    tx.commit().context("Committing catalog reset failed")?;

    info!("Catalog reset");
    Ok(())
}

/// Store a validated artist and return it with its new id.
pub fn insert_artist(conn: &Connection, artist: &NewArtist) -> Result<Artist> {
    conn.execute("INSERT INTO artists (name) VALUES (?1)", params![artist.name])
        .with_context(|| format!("Failed to INSERT artist `{}'", artist.name))?;

    let id = ArtistId(conn.last_insert_rowid());
    info!("Created artist {id} `{}'", artist.name);
    Ok(Artist {
        id,
        name: artist.name.clone(),
    })
}

/// Store a validated song with its artist links and ordered genres.
pub fn insert_song(conn: &mut Connection, song: &NewSong) -> Result<Song> {
    let length_secs = i64::try_from(song.length.as_secs())
        .context("Song length does not fit in the database")?;

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO songs (name, length_secs, url) VALUES (?1, ?2, ?3)",
        params![song.name, length_secs, song.url],
    )
    .with_context(|| format!("Failed to INSERT song `{}'", song.name))?;
    let id = SongId(tx.last_insert_rowid());

    {
        let mut link =
            tx.prepare("INSERT INTO song_artists (song_id, artist_id) VALUES (?1, ?2)")?;
        for artist in &song.artists {
            link.execute(params![id.0, artist.id.0])
                .with_context(|| format!("Failed to link artist {} to song {id}", artist.id))?;
        }

        let mut tag = tx.prepare(
            "INSERT INTO song_genres (song_id, position, genre) VALUES (?1, ?2, ?3)",
        )?;
        for (position, genre) in song.genres.iter().enumerate() {
            let position = i64::try_from(position)?;
            tag.execute(params![id.0, position, genre.as_tag()])
                .with_context(|| format!("Failed to tag song {id} with {genre}"))?;
        }
    }

    tx.commit().context("Committing song transaction failed")?;

    info!("Created song {id} `{}'", song.name);
    Ok(Song {
        id,
        name: song.name.clone(),
        artists: song.artists.clone(),
        genres: song.genres.clone(),
        length: song.length,
        url: song.url.clone(),
    })
}

/// Record one playback of `song` at `listened_at`.
pub fn insert_play_event(
    conn: &Connection,
    song: SongId,
    listened_at: NaiveDateTime,
) -> Result<PlayEvent> {
    conn.execute(
        "INSERT INTO play_events (song_id, listened_at) VALUES (?1, ?2)",
        params![song.0, listened_at],
    )
    .with_context(|| format!("Failed to INSERT play event for song {song}"))?;

    let id = PlayEventId(conn.last_insert_rowid());
    debug!("Recorded play {id} of song {song} at {listened_at}");
    Ok(PlayEvent {
        id,
        song,
        listened_at,
    })
}

/// All artists, oldest first.
pub fn load_artists(conn: &Connection) -> Result<Vec<Artist>> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM artists ORDER BY id")
        .context("Invalid SQL when SELECTing artists")?;

    let artists = stmt
        .query_map([], |row| {
            Ok(Artist {
                id: ArtistId(row.get(0)?),
                name: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Cannot query artists")?;

    Ok(artists)
}

/// All songs, oldest first, with artists and genres attached.
///
/// # Errors
///
/// Fails when a stored song has no artist link or no genre. Such a row can
/// only come from outside [`insert_song`] and is never skipped.
pub fn load_songs(conn: &Connection) -> Result<Vec<Song>> {
    let artists: HashMap<ArtistId, Artist> = load_artists(conn)?
        .into_iter()
        .map(|artist| (artist.id, artist))
        .collect();

    let mut song_artists: HashMap<SongId, BTreeSet<Artist>> = HashMap::new();
    {
        let mut stmt = conn.prepare("SELECT song_id, artist_id FROM song_artists")?;
        let rows =
            stmt.query_map([], |row| Ok((SongId(row.get(0)?), ArtistId(row.get(1)?))))?;
        for row in rows {
            let (song_id, artist_id) = row.context("Cannot read song artist link")?;
            let artist = artists
                .get(&artist_id)
                .with_context(|| format!("Song {song_id} links to missing artist {artist_id}"))?;
            song_artists.entry(song_id).or_default().insert(artist.clone());
        }
    }

    let mut song_genres: HashMap<SongId, Vec<Genre>> = HashMap::new();
    {
        let mut stmt =
            conn.prepare("SELECT song_id, genre FROM song_genres ORDER BY song_id, position")?;
        let rows =
            stmt.query_map([], |row| Ok((SongId(row.get(0)?), row.get::<_, String>(1)?)))?;
        for row in rows {
            let (song_id, tag) = row.context("Cannot read song genre")?;
            let genre: Genre = tag
                .parse()
                .with_context(|| format!("Song {song_id} carries an unknown genre"))?;
            song_genres.entry(song_id).or_default().push(genre);
        }
    }

    let mut stmt = conn
        .prepare("SELECT id, name, length_secs, url FROM songs ORDER BY id")
        .context("Invalid SQL when SELECTing songs")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            SongId(row.get(0)?),
            row.get::<_, String>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut songs = Vec::new();
    for row in rows {
        let (id, name, length_secs, url) = row.context("Queried song unwrap failed")?;
        let artists = song_artists.remove(&id).unwrap_or_default();
        let genres = song_genres.remove(&id).unwrap_or_default();
        if artists.is_empty() || genres.is_empty() {
            bail!("Song {id} `{name}' is stored without artists or genres");
        }
        songs.push(Song {
            id,
            name,
            artists,
            genres,
            length: Duration::from_secs(u64::try_from(length_secs)?),
            url,
        });
    }

    debug!("Loaded {} songs", songs.len());
    Ok(songs)
}

/// All play events, oldest first.
pub fn load_play_events(conn: &Connection) -> Result<Vec<PlayEvent>> {
    let mut stmt = conn
        .prepare("SELECT id, song_id, listened_at FROM play_events ORDER BY id")
        .context("Invalid SQL when SELECTing play events")?;

    let events = stmt
        .query_map([], |row| {
            Ok(PlayEvent {
                id: PlayEventId(row.get(0)?),
                song: SongId(row.get(1)?),
                listened_at: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Cannot query play events")?;

    Ok(events)
}

/// Whether a song with `id` exists.
pub fn song_exists(conn: &Connection, id: SongId) -> Result<bool> {
    let found = conn
        .query_row("SELECT 1 FROM songs WHERE id = ?1", params![id.0], |_| Ok(()))
        .optional()
        .with_context(|| format!("Failed to look up song {id}"))?;
    Ok(found.is_some())
}

/// Find one song by id.
pub fn find_song(conn: &Connection, id: SongId) -> Result<Option<Song>> {
    if !song_exists(conn, id)? {
        return Ok(None);
    }
    Ok(load_songs(conn)?.into_iter().find(|song| song.id == id))
}

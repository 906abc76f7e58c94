//! # Srotify - Music Catalog
//!
//! Command-line front end for the catalog service: register artists and
//! songs, record plays, and query trending, similar and matching songs.
//!
//! ## Usage
//!
//! ```bash
//! srotify init-db
//! srotify add-artist kana
//! srotify add-song twinkle --artist 1 --genre J_ROCK --length 4:01 --url http://kanaboom.com
//! srotify listen 1
//! srotify trending 2024/05/01 2024/05/31 --verbose
//! srotify similar 1 --json
//! ```
//!
//! Failures caused by bad input print their status class (422 or 404) and
//! exit with a non-zero code.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use srotify::cli::{self, Command, SearchFields, SongFields};
use srotify::completion;
use srotify::config::RuntimeConfig;
use srotify::error::CatalogError;
use srotify::length;
use srotify::model::{Artist, Song, SongId};
use srotify::service::CatalogService;
use srotify::validation::{ArtistRequest, SearchRequest, SongRequest, TrendingRequest};
use std::io;
use std::process::ExitCode;

/// Main entry point for the Srotify application.
///
/// Logging is controlled via `RUST_LOG`:
/// - `RUST_LOG=debug srotify trending 2024/05/01 2024/05/31`
/// - `RUST_LOG=srotify::search=trace srotify search --name ho`
fn main() -> ExitCode {
    env_logger::init();

    let args = cli::Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match CatalogError::find_in(&err) {
                Some(catalog_err) => eprintln!("{} {catalog_err}", catalog_err.status_code()),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: cli::Args) -> Result<()> {
    // Completion scripts never touch the database.
    if let Command::Completion { shell } = args.command {
        let mut cmd = cli::Args::command();
        completion::generate_completions(
            completion::shell_to_completion_shell(shell),
            &mut cmd,
            &mut io::stdout(),
        );
        return Ok(());
    }

    let config = RuntimeConfig::resolve(args.db)?;
    debug!("Using catalog at {}", config.db_path.display());
    let mut service = CatalogService::open(&config.db_path)?;
    let json = args.json;

    match args.command {
        Command::InitDb { force } => {
            if force {
                service.reset()?;
                println!("Catalog reset at {}", config.db_path.display());
            } else {
                println!("Catalog ready at {}", config.db_path.display());
            }
        }
        Command::AddArtist { name, payload } => {
            let request = match payload {
                Some(body) => parse_payload::<ArtistRequest>(&body)?,
                None => ArtistRequest { name },
            };
            let artist = service.create_artist(&request)?;
            info!("Added artist {}", artist.id);
            print_artists(&[artist], json)?;
        }
        Command::AddSong { song, payload } => {
            let request = match payload {
                Some(body) => parse_payload::<SongRequest>(&body)?,
                None => song_request(song),
            };
            let song = service.create_song(&request)?;
            info!("Added song {}", song.id);
            print_songs(&[song], json)?;
        }
        Command::Listen { song } => {
            let event = service.listen(SongId(song))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!(
                    "Played song {} at {}",
                    event.song,
                    event.listened_at.format("%Y/%m/%d %H:%M:%S")
                );
            }
        }
        Command::Trending { start, end, verbose, payload } => {
            let request = match payload {
                Some(body) => parse_payload::<TrendingRequest>(&body)?,
                None => TrendingRequest {
                    start_time: start,
                    end_time: end,
                },
            };
            if verbose {
                let ranked = service.trending_with_counts(&request)?;
                print_ranked(&ranked, json)?;
            } else {
                print_songs(&service.trending(&request)?, json)?;
            }
        }
        Command::Similar { song } => {
            print_songs(&service.similar(SongId(song))?, json)?;
        }
        Command::Search { filters, payload } => {
            let request = match payload {
                Some(body) => parse_payload::<SearchRequest>(&body)?,
                None => search_request(filters),
            };
            print_songs(&service.search(&request)?, json)?;
        }
        Command::List { artists } => {
            if artists {
                print_artists(&service.artists()?, json)?;
            } else {
                print_songs(&service.songs()?, json)?;
            }
        }
        // Handled before the catalog is opened.
        Command::Completion { .. } => {}
    }

    Ok(())
}

fn parse_payload<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).context("Payload is not a valid JSON request body")
}

fn song_request(fields: SongFields) -> SongRequest {
    SongRequest {
        name: fields.name,
        artists: Some(fields.artist),
        genres: Some(fields.genre),
        length: fields.length,
        url: fields.url,
    }
}

/// Repeatable flags that were never given impose no constraint.
fn search_request(fields: SearchFields) -> SearchRequest {
    let given = |values: Vec<String>| (!values.is_empty()).then_some(values);
    SearchRequest {
        name: fields.name,
        include_artist: given(fields.include_artist),
        exclude_artist: given(fields.exclude_artist),
        include_genres: given(fields.include_genre),
        exclude_genres: given(fields.exclude_genre),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Failed to encode output")?);
    Ok(())
}

fn print_artists(artists: &[Artist], json: bool) -> Result<()> {
    if json {
        return print_json(artists);
    }
    for artist in artists {
        println!("{:>4}  {}", artist.id, artist.name);
    }
    Ok(())
}

fn song_line(song: &Song) -> String {
    let artists: Vec<&str> = song.artist_names().collect();
    let genres: Vec<String> = song.genres.iter().map(ToString::to_string).collect();
    format!(
        "{:>4}  {} - {} [{}] {}  {}",
        song.id,
        artists.join(", "),
        song.name,
        genres.join(", "),
        length::format(song.length),
        song.url
    )
}

fn print_songs(songs: &[Song], json: bool) -> Result<()> {
    if json {
        return print_json(songs);
    }
    if songs.is_empty() {
        println!("No songs found");
    }
    for song in songs {
        println!("{}", song_line(song));
    }
    Ok(())
}

#[derive(Serialize)]
struct RankedSong<'a> {
    #[serde(flatten)]
    song: &'a Song,
    plays: usize,
}

fn print_ranked(ranked: &[(Song, usize)], json: bool) -> Result<()> {
    if json {
        let rows: Vec<RankedSong<'_>> = ranked
            .iter()
            .map(|(song, plays)| RankedSong { song, plays: *plays })
            .collect();
        return print_json(&rows);
    }
    if ranked.is_empty() {
        println!("No songs found");
    }
    for (song, plays) in ranked {
        println!("{plays:>4}x {}", song_line(song));
    }
    Ok(())
}

//! # Command-Line Interface Module
//!
//! Clap derive definitions for the `srotify` binary.
//!
//! ## Examples
//!
//! ```bash
//! srotify add-artist kana
//! srotify add-song silhoute --artist 1 --genre ROCK --length 3:20 --url http://kanaboom.com
//! srotify listen 1
//! srotify trending 2024/05/01 2024/05/31
//! srotify search --include-genre ROCK --exclude-artist haka
//! ```

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser)]
#[command(name = "srotify")]
#[command(about = "Srotify: music catalog with trending, similarity and search queries")]
#[command(version)]
pub struct Args {
    /// Path to the catalog database
    ///
    /// Defaults to the platform data directory
    /// (`~/.local/share/srotify/catalog.db` on Linux).
    #[arg(long, global = true, env = "SROTIFY_DB", value_hint = clap::ValueHint::FilePath)]
    pub db: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Create the catalog database
    ///
    /// Without `--force` an existing catalog is left untouched. With it,
    /// every artist, song and play is deleted and ids restart at 1.
    InitDb {
        /// Wipe an existing catalog
        #[arg(long)]
        force: bool,
    },

    /// Register an artist
    AddArtist {
        /// Artist name
        name: Option<String>,

        /// Raw JSON body, e.g. '{"name":"kana"}'
        #[arg(long, conflicts_with = "name")]
        payload: Option<String>,
    },

    /// Register a song
    ///
    /// Every `--artist` id must refer to an existing artist. Genres are tags
    /// such as ROCK, HIP_HOP or J_POP (case-insensitive). Length is `M:SS`.
    AddSong {
        #[command(flatten)]
        song: SongFields,

        /// Raw JSON body with name, artists, genres, length and url
        #[arg(long, conflicts_with_all = ["name", "artist", "genre", "length", "url"])]
        payload: Option<String>,
    },

    /// Record that a song was played now
    Listen {
        /// Song id
        song: i64,
    },

    /// List songs played most within a window of days
    ///
    /// Dates are `yyyy/mm/dd`; both ends are included.
    Trending {
        /// First day of the window
        #[arg(required_unless_present = "payload")]
        start: Option<String>,

        /// Last day of the window
        #[arg(required_unless_present = "payload")]
        end: Option<String>,

        /// Show play counts next to each song
        #[arg(short, long)]
        verbose: bool,

        /// Raw JSON body, e.g. '{"startTime":"2024/05/01","endTime":"2024/05/31"}'
        #[arg(long, conflicts_with_all = ["start", "end"])]
        payload: Option<String>,
    },

    /// List songs sharing an artist or a genre with a song
    Similar {
        /// Song id
        song: i64,
    },

    /// Search songs by name, artists and genres
    ///
    /// Options are combined with AND. Exclusions always win over inclusions.
    Search {
        #[command(flatten)]
        filters: SearchFields,

        /// Raw JSON body with name, includeArtist, excludeArtist,
        /// includeGenres and excludeGenres
        #[arg(long, conflicts_with_all = [
            "name", "include_artist", "exclude_artist", "include_genre", "exclude_genre",
        ])]
        payload: Option<String>,
    },

    /// List all songs in the catalog
    List {
        /// List artists instead of songs
        #[arg(long)]
        artists: bool,
    },

    /// Generate shell completions
    ///
    /// Usage: srotify completion bash > ~/.local/share/bash-completion/completions/srotify
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Song fields given as individual flags.
#[derive(ClapArgs, Debug, Default)]
pub struct SongFields {
    /// Song name
    pub name: Option<String>,

    /// Artist id (repeatable)
    #[arg(long = "artist")]
    pub artist: Vec<i64>,

    /// Genre tag (repeatable)
    #[arg(long = "genre")]
    pub genre: Vec<String>,

    /// Length as `M:SS`
    #[arg(long)]
    pub length: Option<String>,

    /// Where the song can be streamed from
    #[arg(long)]
    pub url: Option<String>,
}

/// Search options given as individual flags.
#[derive(ClapArgs, Debug, Default)]
pub struct SearchFields {
    /// Case-insensitive substring of the song name
    #[arg(long)]
    pub name: Option<String>,

    /// Keep songs by this artist name (repeatable)
    #[arg(long)]
    pub include_artist: Vec<String>,

    /// Drop songs by this artist name (repeatable)
    #[arg(long)]
    pub exclude_artist: Vec<String>,

    /// Keep songs with this genre (repeatable)
    #[arg(long)]
    pub include_genre: Vec<String>,

    /// Drop songs with this genre (repeatable)
    #[arg(long)]
    pub exclude_genre: Vec<String>,
}

//! Music catalog with trending, similarity and multi-criteria search queries.
//!
//! Query engine (pure functions over borrowed catalog snapshots):
//! - [`trending`] - Songs ranked by plays inside a window of days
//! - [`similarity`] - Songs sharing an artist or a genre with a target
//! - [`search`] - Name, artist and genre filters with exclusion precedence
//!
//! ### Supporting Modules
//!
//! - [`validation`] - Request payloads and the typed values they validate into
//! - [`length`] - `M:SS` song length codec
//! - [`genre`] - The closed set of genre tags
//! - [`model`] - Artists, songs and play events
//! - [`error`] - [`CatalogError`](error::CatalogError) and its status classes
//! - [`db`] - SQLite catalog store
//! - [`service`] - [`CatalogService`](service::CatalogService), the store and engine wired together
//! - [`config`] - Database location
//! - [`cli`] / [`completion`] - Command-line definitions and shell completions
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use srotify::service::CatalogService;
//! use srotify::validation::{ArtistRequest, SongRequest, TrendingRequest};
//!
//! let mut catalog = CatalogService::open(&srotify::config::get_db_path()?)?;
//!
//! let kana = catalog.create_artist(&ArtistRequest { name: Some("kana".into()) })?;
//! let song = catalog.create_song(&SongRequest {
//!     name: Some("twinkle".into()),
//!     artists: Some(vec![kana.id.0]),
//!     genres: Some(vec!["J_ROCK".into()]),
//!     length: Some("4:01".into()),
//!     url: Some("http://kanaboom.com/twinkle".into()),
//! })?;
//! catalog.listen(song.id)?;
//!
//! let trending = catalog.trending(&TrendingRequest {
//!     start_time: Some("2024/05/01".into()),
//!     end_time: Some("2024/05/31".into()),
//! })?;
//! println!("{} trending songs", trending.len());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Engine and validation functions return `Result<T, CatalogError>`. Store and
//! service functions return `anyhow::Result` and carry any `CatalogError`
//! inside; [`CatalogError::find_in`](error::CatalogError::find_in) recovers it.

pub mod cli;
pub mod completion;
pub mod config;
pub mod db;
pub mod error;
pub mod genre;
pub mod length;
pub mod model;
pub mod search;
pub mod service;
pub mod similarity;
pub mod trending;
pub mod validation;

//! Similar-song lookup.
//!
//! Two distinct songs are similar when they share at least one artist (by id)
//! or at least one genre tag. The relation is symmetric; it is not transitive.

use crate::error::CatalogError;
use crate::model::{Song, SongId};
use log::debug;

/// Whether `candidate` is similar to `target`.
///
/// A song is never similar to itself.
#[must_use]
pub fn is_similar(target: &Song, candidate: &Song) -> bool {
    if candidate.id == target.id {
        return false;
    }

    let shares_artist = candidate
        .artists
        .iter()
        .any(|artist| target.has_artist(artist.id));
    let shares_genre = candidate.genres.iter().any(|&genre| target.has_genre(genre));

    shares_artist || shares_genre
}

/// Every song in `songs` similar to the song with id `target`, in catalog order.
///
/// # Errors
///
/// `CatalogError::NotFound("song", id)` if `target` is not in `songs`.
pub fn find_similar(target: SongId, songs: &[Song]) -> Result<Vec<&Song>, CatalogError> {
    let reference = songs
        .iter()
        .find(|song| song.id == target)
        .ok_or(CatalogError::NotFound("song", target.0))?;
    debug_assert!(reference.is_well_formed(), "song {} breaks catalog invariant", reference.id);

    let similar: Vec<&Song> = songs
        .iter()
        .filter(|candidate| is_similar(reference, candidate))
        .collect();

    debug!("Found {} songs similar to `{}'", similar.len(), reference.name);
    Ok(similar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genre::Genre;
    use crate::model::fixtures::{artist, song};

    fn names(found: &[&Song]) -> Vec<String> {
        found.iter().map(|song| song.name.clone()).collect()
    }

    #[test]
    fn test_shared_genre_is_similar() {
        let (x, y) = (artist(1, "X"), artist(2, "Y"));
        let songs = vec![
            song(1, "T", &[x], &[Genre::Rock]),
            song(2, "S", &[y], &[Genre::Rock]),
        ];
        assert_eq!(names(&find_similar(SongId(1), &songs).unwrap()), vec!["S"]);
    }

    #[test]
    fn test_nothing_shared_is_not_similar() {
        let (x, z) = (artist(1, "X"), artist(3, "Z"));
        let songs = vec![
            song(1, "T", &[x], &[Genre::Rock]),
            song(2, "U", &[z], &[Genre::Punk]),
        ];
        assert!(find_similar(SongId(1), &songs).unwrap().is_empty());
    }

    #[test]
    fn test_shared_artist_alone_is_similar() {
        let kana = artist(1, "kana");
        let songs = vec![
            song(1, "silhoute", &[kana.clone()], &[Genre::Rock]),
            song(2, "twinkle", &[kana], &[Genre::Punk]),
        ];
        assert_eq!(names(&find_similar(SongId(2), &songs).unwrap()), vec!["silhoute"]);
    }

    #[test]
    fn test_same_artist_name_different_id_is_not_shared() {
        // Two artists both called "kana" are still two artists.
        let songs = vec![
            song(1, "silhoute", &[artist(1, "kana")], &[Genre::Rock]),
            song(2, "twinkle", &[artist(2, "kana")], &[Genre::Punk]),
        ];
        assert!(find_similar(SongId(2), &songs).unwrap().is_empty());
    }

    #[test]
    fn test_target_is_excluded_and_order_is_catalog_order() {
        let kana = artist(1, "kana");
        let songs = vec![
            song(1, "a", &[kana.clone()], &[Genre::Rock]),
            song(2, "b", &[kana.clone()], &[Genre::Rock]),
            song(3, "c", &[artist(2, "lara")], &[Genre::Jazz]),
            song(4, "d", &[kana], &[Genre::Pop]),
        ];
        assert_eq!(names(&find_similar(SongId(2), &songs).unwrap()), vec!["a", "d"]);
    }

    #[test]
    fn test_unknown_target() {
        let songs = vec![song(1, "a", &[artist(1, "kana")], &[Genre::Rock])];
        assert_eq!(find_similar(SongId(99), &songs), Err(CatalogError::NotFound("song", 99)));
        assert_eq!(find_similar(SongId(1), &[]), Err(CatalogError::NotFound("song", 1)));
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let (a, b, c) = (artist(1, "a"), artist(2, "b"), artist(3, "c"));
        let songs = vec![
            song(1, "s1", &[a.clone()], &[Genre::Rock]),
            song(2, "s2", &[a, b.clone()], &[Genre::Jazz]),
            song(3, "s3", &[b], &[Genre::Punk, Genre::Rock]),
            song(4, "s4", &[c.clone()], &[Genre::Soul]),
            song(5, "s5", &[c], &[Genre::Soul, Genre::Soul]),
        ];

        for t in &songs {
            for c in &songs {
                assert_eq!(
                    is_similar(t, c),
                    is_similar(c, t),
                    "symmetry broken between {} and {}",
                    t.name,
                    c.name
                );
            }
        }
    }

    #[test]
    fn test_never_similar_to_self() {
        let s = song(1, "s", &[artist(1, "a")], &[Genre::Rock]);
        assert!(!is_similar(&s, &s));
    }
}

//! The fixed record set a fresh session starts from.

use crate::posters::PLACEHOLDER_POSTER;
use crate::types::MovieRecord;

/// Records seeded into a fresh catalog.
///
/// Vote counters start at zero and the collection lives only for the
/// session, so this is the entire initial state. Poster URLs here are
/// the generic placeholder; local artwork is substituted at render time
/// through the poster index.
pub fn seed_records() -> Vec<MovieRecord> {
    vec![
        MovieRecord::new("1", "Titanic", PLACEHOLDER_POSTER, "2022", "Action"),
        MovieRecord::new("2", "Deadpool", PLACEHOLDER_POSTER, "2021", "Drama"),
        MovieRecord::new("3", "Film 3", PLACEHOLDER_POSTER, "2020", "Comedy"),
    ]
}

//! Ratings file loading.

use std::io::Read;

use camino::Utf8Path;
use kindred_core::{ItemId, Rating, RatingTable, UserId};
use serde::Deserialize;

use crate::DataError;
use crate::fs::{READER_LABEL, open_utf8_file};

#[derive(Debug, Deserialize)]
struct RatingRecord {
    user_id: u64,
    product_id: u64,
    rating: f64,
}

impl From<RatingRecord> for Rating {
    fn from(record: RatingRecord) -> Self {
        Self::new(
            UserId::new(record.user_id),
            ItemId::new(record.product_id),
            record.rating,
        )
    }
}

/// Load a ratings CSV with header `user_id,product_id,rating`.
///
/// Extra columns are ignored. Rating values are passed through unchecked;
/// matrix construction rejects invalid ones.
///
/// # Errors
/// Returns [`DataError::Open`] when the file cannot be opened and
/// [`DataError::Parse`] for a malformed header or record.
pub fn load_ratings(path: &Utf8Path) -> Result<RatingTable, DataError> {
    let file = open_utf8_file(path).map_err(|source| DataError::Open {
        path: path.to_owned(),
        source,
    })?;
    let table = parse_ratings(file, path)?;
    log::debug!("loaded {} ratings from {path}", table.len());
    Ok(table)
}

/// Read ratings CSV from any reader.
///
/// # Errors
/// Returns [`DataError::Parse`] for a malformed header or record.
///
/// # Examples
/// ```
/// use kindred_data::read_ratings;
///
/// let csv = "user_id,product_id,rating\n1,10,4.5\n2,10,3\n";
/// let table = read_ratings(csv.as_bytes()).expect("valid ratings");
/// assert_eq!(table.len(), 2);
/// ```
pub fn read_ratings<R: Read>(reader: R) -> Result<RatingTable, DataError> {
    parse_ratings(reader, Utf8Path::new(READER_LABEL))
}

fn parse_ratings<R: Read>(reader: R, origin: &Utf8Path) -> Result<RatingTable, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader
        .deserialize::<RatingRecord>()
        .map(|record| {
            record
                .map(Rating::from)
                .map_err(|err| DataError::parse(origin, err))
        })
        .collect()
}

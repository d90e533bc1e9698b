//! Typed views over the two tables this client reads and writes.
//!
//! Field names on the wire follow the tables' column names, which mix
//! camelCase (`searchTerm`) and snake_case (`movie_id`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::images::PLACEHOLDER_POSTER;
use crate::domain::{MovieId, RowId};
use crate::models::Movie;
use crate::models::movie::poster_url;
use crate::store::{Row, StoreError};

/// One row of the search popularity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRecord {
    pub id: RowId,
    pub search_term: String,
    pub count: i64,
    pub poster_url: String,
    pub title: String,
    pub movie_id: MovieId,
}

/// One row of the saved movies table. The row existing is the saved state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedRecord {
    pub id: RowId,
    pub movie_id: MovieId,
    pub poster_url: Option<String>,
    pub title: String,
    pub is_saved: bool,
}

#[derive(Debug, Deserialize)]
struct SearchFields {
    #[serde(rename = "searchTerm")]
    search_term: String,
    #[serde(default)]
    count: Option<i64>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    title: Option<String>,
    movie_id: MovieId,
}

#[derive(Debug, Deserialize)]
struct SavedFields {
    movie_id: MovieId,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default = "default_true")]
    is_movie_saved: bool,
}

const fn default_true() -> bool {
    true
}

fn decode_fields<T: serde::de::DeserializeOwned>(row: &Row) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(row.data.clone())).map_err(|e| StoreError::Decode {
        row: row.id.clone(),
        message: e.to_string(),
    })
}

impl TryFrom<&Row> for SearchRecord {
    type Error = StoreError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        let fields: SearchFields = decode_fields(row)?;
        Ok(Self {
            id: row.id.clone(),
            search_term: fields.search_term,
            count: fields.count.unwrap_or(0),
            poster_url: fields.poster_path.unwrap_or_default(),
            title: fields.title.unwrap_or_default(),
            movie_id: fields.movie_id,
        })
    }
}

impl TryFrom<&Row> for SavedRecord {
    type Error = StoreError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        let fields: SavedFields = decode_fields(row)?;
        Ok(Self {
            id: row.id.clone(),
            movie_id: fields.movie_id,
            poster_url: fields.poster_path.filter(|p| !p.is_empty()),
            title: fields.title.unwrap_or_default(),
            is_saved: fields.is_movie_saved,
        })
    }
}

impl SavedRecord {
    /// Poster to render for a saved card, falling back to a placeholder.
    #[must_use]
    pub fn display_poster(&self) -> &str {
        self.poster_url.as_deref().unwrap_or(PLACEHOLDER_POSTER)
    }
}

/// Column values written when a search term is seen for the first time.
///
/// A movie without a poster is stored with an empty `poster_path`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRecordData {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub count: i64,
    pub poster_path: String,
    pub title: String,
    pub movie_id: MovieId,
}

impl SearchRecordData {
    #[must_use]
    pub fn first_match(query: &str, movie: &Movie, image_base_url: &str) -> Self {
        Self {
            search_term: query.to_string(),
            count: 1,
            poster_path: poster_url(image_base_url, movie.poster_path.as_deref())
                .unwrap_or_default(),
            title: movie.title.clone(),
            movie_id: movie.id,
        }
    }
}

/// Column values written when a movie is saved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedRecordData {
    pub is_movie_saved: bool,
    pub poster_path: String,
    pub title: String,
    pub movie_id: MovieId,
}

impl SavedRecordData {
    #[must_use]
    pub fn for_movie(movie_id: MovieId, movie: &Movie, image_base_url: &str) -> Self {
        Self {
            is_movie_saved: true,
            poster_path: poster_url(image_base_url, movie.poster_path.as_deref())
                .unwrap_or_default(),
            title: movie.title.clone(),
            movie_id,
        }
    }
}

/// Serializes record data into the column map sent to the store.
pub fn to_columns<T: Serialize>(data: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(data) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(StoreError::Encode(format!(
            "expected an object, got {other}"
        ))),
        Err(e) => Err(StoreError::Encode(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decodes_search_row_with_missing_count() {
        let row = row(json!({
            "$id": "r1",
            "$createdAt": "2025-03-01T10:00:00.000+00:00",
            "searchTerm": "batman",
            "title": "Batman",
            "movie_id": 100,
            "poster_path": "https://image.tmdb.org/t/p/w500/x.jpg"
        }));

        let record = SearchRecord::try_from(&row).unwrap();
        assert_eq!(record.id, RowId::new("r1"));
        assert_eq!(record.count, 0);
        assert_eq!(record.movie_id, MovieId::new(100));
    }

    #[test]
    fn decode_error_names_the_row() {
        let row = row(json!({"$id": "bad", "title": "no movie id"}));
        let err = SavedRecord::try_from(&row).unwrap_err();
        assert!(matches!(err, StoreError::Decode { ref row, .. } if row.as_str() == "bad"));
    }

    #[test]
    fn saved_card_falls_back_to_placeholder() {
        let row = row(json!({"$id": "s1", "movie_id": 7, "title": "Se7en", "poster_path": ""}));
        let record = SavedRecord::try_from(&row).unwrap();
        assert!(record.is_saved);
        assert_eq!(record.display_poster(), PLACEHOLDER_POSTER);
    }

    #[test]
    fn first_match_data_uses_wire_names() {
        let movie = Movie {
            id: MovieId::new(100),
            title: "Batman".to_string(),
            poster_path: Some("/x.jpg".to_string()),
            ..Movie::default()
        };

        let columns = to_columns(&SearchRecordData::first_match(
            "batman",
            &movie,
            "https://image.tmdb.org/t/p/w500",
        ))
        .unwrap();

        assert_eq!(columns["searchTerm"], json!("batman"));
        assert_eq!(columns["count"], json!(1));
        assert_eq!(columns["movie_id"], json!(100));
        assert_eq!(
            columns["poster_path"],
            json!("https://image.tmdb.org/t/p/w500/x.jpg")
        );
    }

    #[test]
    fn posterless_movie_is_stored_without_a_url() {
        let movie = Movie {
            id: MovieId::new(7),
            title: "Se7en".to_string(),
            poster_path: None,
            ..Movie::default()
        };
        let base = "https://image.tmdb.org/t/p/w500";

        let search = SearchRecordData::first_match("seven", &movie, base);
        assert_eq!(search.poster_path, "");

        let saved = to_columns(&SavedRecordData::for_movie(movie.id, &movie, base)).unwrap();
        assert_eq!(saved["poster_path"], json!(""));
    }
}

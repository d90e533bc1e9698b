use serde::{Deserialize, Serialize};

use crate::constants::images::PLACEHOLDER_POSTER;
use crate::domain::MovieId;

/// Full movie details as returned by the metadata API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<i32>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub budget: i64,
    #[serde(default)]
    pub revenue: i64,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: Option<String>,
}

/// A movie as it appears in search and discover listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub overview: Option<String>,
}

/// Joins an image base URL and a TMDB image path. `None` when the movie has
/// no poster.
#[must_use]
pub fn poster_url(base_url: &str, poster_path: Option<&str>) -> Option<String> {
    poster_path
        .filter(|p| !p.is_empty())
        .map(|p| format!("{}{p}", base_url.trim_end_matches('/')))
}

fn year_of(release_date: Option<&str>) -> Option<&str> {
    release_date
        .and_then(|d| d.split('-').next())
        .filter(|y| !y.is_empty())
}

#[allow(clippy::cast_precision_loss)]
fn millions(amount: i64) -> String {
    format!("${} million", amount as f64 / 1_000_000.0)
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let joined = names.collect::<Vec<_>>().join(" - ");
    if joined.is_empty() {
        "N/A".to_string()
    } else {
        joined
    }
}

impl Movie {
    /// Poster to display, or the placeholder image.
    #[must_use]
    pub fn poster_url(&self, base_url: &str) -> String {
        poster_url(base_url, self.poster_path.as_deref())
            .unwrap_or_else(|| PLACEHOLDER_POSTER.to_string())
    }

    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        year_of(self.release_date.as_deref())
    }

    /// Vote average rounded to a whole number out of ten.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rating(&self) -> i64 {
        self.vote_average.round() as i64
    }

    #[must_use]
    pub fn genres_display(&self) -> String {
        join_names(self.genres.iter().map(|g| g.name.as_str()))
    }

    #[must_use]
    pub fn production_companies_display(&self) -> String {
        join_names(self.production_companies.iter().map(|c| c.name.as_str()))
    }

    #[must_use]
    pub fn budget_display(&self) -> String {
        if self.budget > 0 {
            millions(self.budget)
        } else {
            "Budget unknown".to_string()
        }
    }

    #[must_use]
    pub fn revenue_display(&self) -> String {
        if self.revenue > 0 {
            millions(self.revenue)
        } else {
            "Revenue unknown".to_string()
        }
    }
}

impl MovieSummary {
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        year_of(self.release_date.as_deref())
    }
}

/// Listing entries carry every field the stored rows denormalize.
impl From<&MovieSummary> for Movie {
    fn from(summary: &MovieSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title.clone(),
            poster_path: summary.poster_path.clone(),
            overview: summary.overview.clone(),
            release_date: summary.release_date.clone(),
            vote_average: summary.vote_average,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fight_club() -> Movie {
        Movie {
            id: MovieId::new(550),
            title: "Fight Club".to_string(),
            poster_path: Some("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg".to_string()),
            release_date: Some("1999-10-15".to_string()),
            vote_average: 8.433,
            vote_count: 26280,
            genres: vec![Genre {
                id: 18,
                name: "Drama".to_string(),
            }],
            budget: 63_000_000,
            revenue: 100_853_753,
            ..Movie::default()
        }
    }

    #[test]
    fn deserializes_tmdb_details() {
        let json = r#"{
            "adult": false,
            "id": 550,
            "title": "Fight Club",
            "poster_path": null,
            "overview": "A ticking-time-bomb insomniac...",
            "release_date": "1999-10-15",
            "runtime": 139,
            "vote_average": 8.4,
            "vote_count": 26280,
            "genres": [{"id": 18, "name": "Drama"}, {"id": 53, "name": "Thriller"}],
            "budget": 63000000,
            "revenue": 100853753,
            "production_companies": [{"id": 508, "name": "Regency Enterprises", "logo_path": null, "origin_country": "US"}]
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, MovieId::new(550));
        assert_eq!(movie.runtime, Some(139));
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.genres_display(), "Drama - Thriller");
        assert_eq!(movie.production_companies_display(), "Regency Enterprises");
    }

    #[test]
    fn display_helpers() {
        let movie = fight_club();
        assert_eq!(movie.release_year(), Some("1999"));
        assert_eq!(movie.rating(), 8);
        assert_eq!(movie.budget_display(), "$63 million");
        assert_eq!(movie.revenue_display(), "$100.853753 million");
        assert_eq!(movie.production_companies_display(), "N/A");
    }

    #[test]
    fn unknown_money_and_missing_date() {
        let movie = Movie {
            id: MovieId::new(1),
            title: "Untitled".to_string(),
            ..Movie::default()
        };
        assert_eq!(movie.budget_display(), "Budget unknown");
        assert_eq!(movie.revenue_display(), "Revenue unknown");
        assert_eq!(movie.release_year(), None);
        assert_eq!(movie.genres_display(), "N/A");
    }

    #[test]
    fn poster_url_joins_base_and_path() {
        let movie = fight_club();
        assert_eq!(
            movie.poster_url("https://image.tmdb.org/t/p/w500/"),
            "https://image.tmdb.org/t/p/w500/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"
        );
        assert_eq!(
            poster_url("https://img", Some("/x.jpg")).as_deref(),
            Some("https://img/x.jpg")
        );
    }

    #[test]
    fn missing_poster_has_no_url() {
        assert_eq!(poster_url("https://img", None), None);
        assert_eq!(poster_url("https://img", Some("")), None);

        let movie = Movie {
            poster_path: None,
            ..fight_club()
        };
        assert_eq!(movie.poster_url("https://img"), PLACEHOLDER_POSTER);
    }
}

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One catalogue entry, shaped like the TMDB discover dump the data file
/// started life as. Unknown fields in hand-edited files are ignored and
/// absent fields fall back to defaults so old files keep loading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default = "default_language")]
    pub original_language: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub runtime: i64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub video: bool,
    #[serde(default)]
    pub poster_path: String,
    #[serde(default)]
    pub backdrop_path: String,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub name: String,
}

/// Raw create payload. Everything is optional at the wire level; `validate`
/// decides what is actually required and rejects the rest up front instead
/// of letting absent fields fall through to a generic failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateMovie {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<i64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub adult: Option<bool>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
}

/// A validated create payload. The store fills in the id.
#[derive(Clone, Debug)]
pub struct NewMovie {
    pub title: String,
    pub original_title: String,
    pub overview: String,
    pub release_date: String,
    pub runtime: i64,
    pub vote_average: f64,
    pub vote_count: i64,
    pub popularity: f64,
    pub adult: bool,
    pub poster_path: String,
    pub backdrop_path: String,
    pub genres: Vec<String>,
}

impl CreateMovie {
    pub fn validate(self) -> Result<NewMovie, AppError> {
        let title = self.title.unwrap_or_default().trim().to_string();
        if title.is_empty() {
            return Err(AppError::validation("title is required"));
        }

        let genres = self.genres.unwrap_or_default();
        if genres.is_empty() {
            return Err(AppError::validation("genres must be a non-empty array"));
        }

        let original_title = match self.original_title {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => title.clone(),
        };

        Ok(NewMovie {
            title,
            original_title,
            overview: self.overview.unwrap_or_default(),
            release_date: self.release_date.unwrap_or_default(),
            runtime: self.runtime.unwrap_or_default(),
            vote_average: self.vote_average.unwrap_or_default(),
            vote_count: self.vote_count.unwrap_or_default(),
            popularity: self.popularity.unwrap_or_default(),
            adult: self.adult.unwrap_or_default(),
            poster_path: self.poster_path.unwrap_or_default(),
            backdrop_path: self.backdrop_path.unwrap_or_default(),
            genres: genres.into_iter().map(|g| g.name).collect(),
        })
    }
}

impl NewMovie {
    /// Genre ids are assigned positionally from the submitted genre names,
    /// not looked up in a genre table.
    pub fn into_movie(self, id: i64) -> Movie {
        let genre_ids = (1..=self.genres.len() as i32).collect();
        Movie {
            id,
            title: self.title,
            original_title: self.original_title,
            original_language: default_language(),
            overview: self.overview,
            release_date: self.release_date,
            runtime: self.runtime,
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            popularity: self.popularity,
            adult: self.adult,
            video: false,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            genre_ids,
        }
    }
}

/// Form-encoded variant of the create payload, submitted by the catalogue's
/// add-movie screen. Numeric fields arrive as text and coerce leniently to
/// zero; genres arrive as one comma-separated field.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub vote_average: String,
    #[serde(default)]
    pub vote_count: String,
    #[serde(default)]
    pub popularity: String,
    #[serde(default)]
    pub adult: String,
    #[serde(default)]
    pub poster_path: String,
    #[serde(default)]
    pub backdrop_path: String,
    #[serde(default)]
    pub genres: String,
}

impl MovieForm {
    pub fn into_create(self) -> CreateMovie {
        let genres: Vec<Genre> = self
            .genres
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| Genre { name: name.to_string() })
            .collect();

        CreateMovie {
            title: Some(self.title),
            original_title: Some(self.original_title),
            overview: Some(self.overview),
            release_date: Some(self.release_date),
            runtime: self.runtime.trim().parse().ok(),
            vote_average: self.vote_average.trim().parse().ok(),
            vote_count: self.vote_count.trim().parse().ok(),
            popularity: self.popularity.trim().parse().ok(),
            adult: Some(self.adult == "true"),
            poster_path: Some(normalize_image_path(&self.poster_path)),
            backdrop_path: Some(normalize_image_path(&self.backdrop_path)),
            genres: (!genres.is_empty()).then_some(genres),
        }
    }
}

/// Image fields are stored as CDN-relative paths, so a bare filename gets a
/// leading slash. Absolute URLs get one too; the renderer strips it again.
fn normalize_image_path(path: &str) -> String {
    let path = path.trim();
    if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> CreateMovie {
        CreateMovie {
            title: Some("X".to_string()),
            genres: Some(vec![Genre { name: "Drama".to_string() }]),
            ..CreateMovie::default()
        }
    }

    #[test]
    fn rejects_missing_title() {
        let input = CreateMovie { title: None, ..minimal() };
        assert!(matches!(input.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn rejects_blank_title() {
        let input = CreateMovie { title: Some("   ".to_string()), ..minimal() };
        assert!(matches!(input.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn rejects_missing_or_empty_genres() {
        let input = CreateMovie { genres: None, ..minimal() };
        assert!(matches!(input.validate(), Err(AppError::Validation(_))));

        let input = CreateMovie { genres: Some(vec![]), ..minimal() };
        assert!(matches!(input.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn original_title_falls_back_to_title() {
        let movie = minimal().validate().unwrap().into_movie(1);
        assert_eq!(movie.original_title, "X");

        let input = CreateMovie { original_title: Some("Y".to_string()), ..minimal() };
        let movie = input.validate().unwrap().into_movie(1);
        assert_eq!(movie.original_title, "Y");
    }

    #[test]
    fn genre_ids_are_positional() {
        let input = CreateMovie {
            genres: Some(vec![
                Genre { name: "Drama".to_string() },
                Genre { name: "Action".to_string() },
                Genre { name: "Comedy".to_string() },
            ]),
            ..minimal()
        };
        let movie = input.validate().unwrap().into_movie(5);
        assert_eq!(movie.genre_ids, vec![1, 2, 3]);
    }

    #[test]
    fn unspecified_fields_get_defaults() {
        let movie = minimal().validate().unwrap().into_movie(2);
        assert_eq!(movie.id, 2);
        assert_eq!(movie.runtime, 0);
        assert_eq!(movie.vote_average, 0.0);
        assert_eq!(movie.vote_count, 0);
        assert_eq!(movie.popularity, 0.0);
        assert!(!movie.adult);
        assert!(!movie.video);
        assert_eq!(movie.original_language, "en");
        assert_eq!(movie.poster_path, "");
        assert_eq!(movie.backdrop_path, "");
    }

    #[test]
    fn movie_deserializes_with_missing_optional_fields() {
        let movie: Movie = serde_json::from_str(r#"{"id": 3, "title": "Bare"}"#).unwrap();
        assert_eq!(movie.id, 3);
        assert_eq!(movie.original_language, "en");
        assert!(movie.genre_ids.is_empty());
    }

    #[test]
    fn form_splits_genres_and_coerces_numbers() {
        let form = MovieForm {
            title: "X".to_string(),
            genres: "Drama, Action , ,Comedy".to_string(),
            runtime: "142".to_string(),
            vote_average: "8.1".to_string(),
            vote_count: "not-a-number".to_string(),
            adult: "true".to_string(),
            ..MovieForm::default()
        };
        let movie = form.into_create().validate().unwrap().into_movie(1);
        assert_eq!(movie.genre_ids, vec![1, 2, 3]);
        assert_eq!(movie.runtime, 142);
        assert_eq!(movie.vote_average, 8.1);
        assert_eq!(movie.vote_count, 0);
        assert!(movie.adult);
    }

    #[test]
    fn form_image_paths_gain_a_leading_slash() {
        let form = MovieForm {
            title: "X".to_string(),
            genres: "Drama".to_string(),
            poster_path: "abc.jpg".to_string(),
            backdrop_path: "/def.jpg".to_string(),
            ..MovieForm::default()
        };
        let movie = form.into_create().validate().unwrap().into_movie(1);
        assert_eq!(movie.poster_path, "/abc.jpg");
        assert_eq!(movie.backdrop_path, "/def.jpg");
    }

    #[test]
    fn form_without_genres_fails_validation() {
        let form = MovieForm { title: "X".to_string(), ..MovieForm::default() };
        assert!(matches!(form.into_create().validate(), Err(AppError::Validation(_))));
    }
}

use crate::models::{MovieRecord, MAX_CAST_MEMBERS};

/// Builds the bag-of-words document for one movie.
///
/// Segments are appended in a fixed order: genres, directors, lead cast,
/// overview. An absent segment contributes nothing, so a movie with no
/// metadata at all yields an empty string.
pub fn movie_features(movie: &MovieRecord) -> String {
    let mut segments: Vec<String> = Vec::with_capacity(4);

    if !movie.genres.is_empty() {
        segments.push(movie.genres.join(" "));
    }

    if !movie.directors.is_empty() {
        segments.push(movie.directors.join(" "));
    }

    if !movie.cast.is_empty() {
        let cast: Vec<&str> = movie
            .cast
            .iter()
            .take(MAX_CAST_MEMBERS)
            .map(String::as_str)
            .collect();
        segments.push(cast.join(" "));
    }

    if let Some(overview) = movie.overview.as_deref() {
        segments.push(overview.to_string());
    }

    segments.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_follow_fixed_order() {
        let mut movie = MovieRecord::new(1, "Heat");
        movie.genres = vec!["Crime".to_string(), "Drama".to_string()];
        movie.directors = vec!["Michael Mann".to_string()];
        movie.cast = vec!["Al Pacino".to_string(), "Robert De Niro".to_string()];
        movie.overview = Some("A thief and a detective.".to_string());

        assert_eq!(
            movie_features(&movie),
            "Crime Drama Michael Mann Al Pacino Robert De Niro A thief and a detective."
        );
    }

    #[test]
    fn test_genres_only_yields_joined_genres() {
        let mut movie = MovieRecord::new(2, "Genres only");
        movie.genres = vec!["Animation".to_string(), "Family".to_string()];

        assert_eq!(movie_features(&movie), "Animation Family");
    }

    #[test]
    fn test_missing_segments_leave_no_gaps() {
        let mut movie = MovieRecord::new(3, "Sparse");
        movie.directors = vec!["Greta Gerwig".to_string()];
        movie.overview = Some("Growing up.".to_string());

        assert_eq!(movie_features(&movie), "Greta Gerwig Growing up.");
    }

    #[test]
    fn test_empty_record_yields_empty_string() {
        assert_eq!(movie_features(&MovieRecord::new(4, "Nothing")), "");
    }

    #[test]
    fn test_cast_is_capped() {
        let mut movie = MovieRecord::new(5, "Ensemble");
        movie.cast = (1..=8).map(|i| format!("actor{}", i)).collect();

        assert_eq!(
            movie_features(&movie),
            "actor1 actor2 actor3 actor4 actor5"
        );
    }
}

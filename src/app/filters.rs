// src/app/filters.rs — composable predicate chain over the catalog collections
//
// Every active filter ANDs with the others; output preserves the relative
// order of the backing collection and recomputes from scratch on each call,
// so the same inputs always produce the same indices.
use crate::app::data::{Actor, Movie};
use crate::app::lookup::EntityIndex;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DurationFilter {
    #[default]
    All,
    Short,  // < 90 min
    Medium, // 90..=149 min
    Long,   // >= 150 min
}

impl DurationFilter {
    pub const ALL: [Self; 4] = [Self::All, Self::Short, Self::Medium, Self::Long];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All durations",
            Self::Short => "Short (< 1h30)",
            Self::Medium => "Medium (1h30 - 2h29)",
            Self::Long => "Long (2h30 +)",
        }
    }

    pub fn matches(self, duration: Option<i32>) -> bool {
        let minutes = duration.unwrap_or(0);
        match self {
            Self::All => true,
            Self::Short => minutes < 90,
            Self::Medium => (90..=149).contains(&minutes),
            Self::Long => minutes >= 150,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AgeFilter {
    #[default]
    All,
    Young,  // < 30
    Middle, // 30..=49
    Mature, // >= 50
}

impl AgeFilter {
    pub const ALL: [Self; 4] = [Self::All, Self::Young, Self::Middle, Self::Mature];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Young => "young",
            Self::Middle => "middle",
            Self::Mature => "mature",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "young" => Some(Self::Young),
            "middle" => Some(Self::Middle),
            "mature" => Some(Self::Mature),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All ages",
            Self::Young => "Under 30",
            Self::Middle => "30 - 49",
            Self::Mature => "50 +",
        }
    }

    pub fn matches(self, age: Option<i32>) -> bool {
        let years = age.unwrap_or(0);
        match self {
            Self::All => true,
            Self::Young => years < 30,
            Self::Middle => (30..=49).contains(&years),
            Self::Mature => years >= 50,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilmographyFilter {
    #[default]
    All,
    Few,      // <= 2 movies
    Moderate, // 3..=5
    Many,     // > 5
}

impl FilmographyFilter {
    pub const ALL: [Self; 4] = [Self::All, Self::Few, Self::Moderate, Self::Many];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Few => "few",
            Self::Moderate => "moderate",
            Self::Many => "many",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "few" => Some(Self::Few),
            "moderate" => Some(Self::Moderate),
            "many" => Some(Self::Many),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All filmographies",
            Self::Few => "Few films (up to 2)",
            Self::Moderate => "Some films (3 - 5)",
            Self::Many => "Many films (6 +)",
        }
    }

    pub fn matches(self, movie_count: usize) -> bool {
        match self {
            Self::All => true,
            Self::Few => movie_count <= 2,
            Self::Moderate => (3..=5).contains(&movie_count),
            Self::Many => movie_count > 5,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieFilters {
    pub query: String,
    pub duration: DurationFilter,
    pub actor_id: Option<String>,
    pub genre_id: Option<String>,
}

impl MovieFilters {
    /// Reset every filter to its bypass default in one operation.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActorFilters {
    pub query: String,
    pub age: AgeFilter,
    pub filmography: FilmographyFilter,
}

impl ActorFilters {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn movie_matches_text(
    movie: &Movie,
    actors: &[Actor],
    actor_index: &EntityIndex,
    needle: &str,
) -> bool {
    if contains_ci(&movie.title, needle) {
        return true;
    }
    if movie
        .description
        .as_deref()
        .is_some_and(|d| contains_ci(d, needle))
    {
        return true;
    }
    movie.actors.iter().any(|id| {
        actor_index
            .resolve(actors, id)
            .is_some_and(|a| contains_ci(&a.name, needle))
    })
}

fn actor_matches_text(
    actor: &Actor,
    movies: &[Movie],
    movie_index: &EntityIndex,
    needle: &str,
) -> bool {
    if contains_ci(&actor.name, needle) {
        return true;
    }
    if actor
        .description
        .as_deref()
        .is_some_and(|d| contains_ci(d, needle))
    {
        return true;
    }
    actor.movies.iter().any(|id| {
        movie_index
            .resolve(movies, id)
            .is_some_and(|m| contains_ci(&m.title, needle))
    })
}

/// Indices of movies passing all active filters, in original order.
pub fn filtered_movie_indices(
    movies: &[Movie],
    actors: &[Actor],
    actor_index: &EntityIndex,
    filters: &MovieFilters,
) -> Vec<usize> {
    let needle = filters.query.trim().to_lowercase();
    movies
        .iter()
        .enumerate()
        .filter(|(_, m)| {
            if !needle.is_empty() && !movie_matches_text(m, actors, actor_index, &needle) {
                return false;
            }
            if !filters.duration.matches(m.duration) {
                return false;
            }
            if let Some(actor_id) = &filters.actor_id {
                if !m.actors.iter().any(|id| id == actor_id) {
                    return false;
                }
            }
            if let Some(genre_id) = &filters.genre_id {
                if !m.genres.iter().any(|id| id == genre_id) {
                    return false;
                }
            }
            true
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Indices of actors passing all active filters, in original order.
pub fn filtered_actor_indices(
    actors: &[Actor],
    movies: &[Movie],
    movie_index: &EntityIndex,
    filters: &ActorFilters,
) -> Vec<usize> {
    let needle = filters.query.trim().to_lowercase();
    actors
        .iter()
        .enumerate()
        .filter(|(_, a)| {
            if !needle.is_empty() && !actor_matches_text(a, movies, movie_index, &needle) {
                return false;
            }
            filters.age.matches(a.age) && filters.filmography.matches(a.movies.len())
        })
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str, title: &str, duration: Option<i32>, actors: &[&str]) -> Movie {
        Movie {
            id: id.to_string(),
            title: title.to_string(),
            url: None,
            image: None,
            description: None,
            duration,
            actors: actors.iter().map(|s| s.to_string()).collect(),
            genres: Vec::new(),
            is_favorite: false,
            created_at: None,
        }
    }

    fn actor(id: &str, name: &str, age: Option<i32>, movies: &[&str]) -> Actor {
        Actor {
            id: id.to_string(),
            name: name.to_string(),
            age,
            image: None,
            description: None,
            movies: movies.iter().map(|s| s.to_string()).collect(),
            genres: Vec::new(),
            is_favorite: false,
            image_settings: None,
            created_at: None,
        }
    }

    fn sample() -> (Vec<Movie>, Vec<Actor>) {
        let movies = vec![
            movie("m1", "Inception", Some(148), &["a1"]),
            movie("m2", "Black Widow", Some(134), &["a2"]),
            movie("m3", "Titanic", Some(195), &["a1"]),
            movie("m4", "Short Cut", None, &[]),
        ];
        let actors = vec![
            actor("a1", "Leo", Some(49), &["m1", "m3"]),
            actor("a2", "Scarlett", Some(39), &["m2"]),
        ];
        (movies, actors)
    }

    fn movie_ids(movies: &[Movie], idxs: &[usize]) -> Vec<String> {
        idxs.iter().map(|i| movies[*i].id.clone()).collect()
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let (movies, actors) = sample();
        let index = EntityIndex::build(&actors);
        let got = filtered_movie_indices(&movies, &actors, &index, &MovieFilters::default());
        assert_eq!(got, vec![0, 1, 2, 3]);

        let blank = MovieFilters {
            query: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            filtered_movie_indices(&movies, &actors, &index, &blank),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn text_search_reaches_linked_actor_names() {
        let (movies, actors) = sample();
        let index = EntityIndex::build(&actors);
        let filters = MovieFilters {
            query: "leo".to_string(),
            ..Default::default()
        };
        let got = filtered_movie_indices(&movies, &actors, &index, &filters);
        assert_eq!(movie_ids(&movies, &got), vec!["m1", "m3"]);
    }

    #[test]
    fn duration_buckets_split_at_90_and_150() {
        let (movies, actors) = sample();
        let index = EntityIndex::build(&actors);

        let medium = MovieFilters {
            duration: DurationFilter::Medium,
            ..Default::default()
        };
        let got = filtered_movie_indices(&movies, &actors, &index, &medium);
        assert_eq!(movie_ids(&movies, &got), vec!["m1", "m2"]);

        let long = MovieFilters {
            duration: DurationFilter::Long,
            ..Default::default()
        };
        let got = filtered_movie_indices(&movies, &actors, &index, &long);
        assert_eq!(movie_ids(&movies, &got), vec!["m3"]);

        // Missing duration counts as 0 and lands in the short bucket.
        let short = MovieFilters {
            duration: DurationFilter::Short,
            ..Default::default()
        };
        let got = filtered_movie_indices(&movies, &actors, &index, &short);
        assert_eq!(movie_ids(&movies, &got), vec!["m4"]);
    }

    #[test]
    fn medium_search_and_text_compose_with_and() {
        let (movies, actors) = sample();
        let index = EntityIndex::build(&actors);
        let filters = MovieFilters {
            query: "leo".to_string(),
            duration: DurationFilter::Medium,
            ..Default::default()
        };
        let got = filtered_movie_indices(&movies, &actors, &index, &filters);
        assert_eq!(movie_ids(&movies, &got), vec!["m1"]);
    }

    #[test]
    fn filters_compose_the_same_as_sequential_application() {
        let (movies, actors) = sample();
        let index = EntityIndex::build(&actors);

        let text_only = MovieFilters {
            query: "leo".to_string(),
            ..Default::default()
        };
        let both = MovieFilters {
            query: "leo".to_string(),
            duration: DurationFilter::Long,
            ..Default::default()
        };

        // filter(filter(C, text), duration) == filter(C, text AND duration)
        let first_pass: Vec<Movie> = filtered_movie_indices(&movies, &actors, &index, &text_only)
            .into_iter()
            .map(|i| movies[i].clone())
            .collect();
        let duration_only = MovieFilters {
            duration: DurationFilter::Long,
            ..Default::default()
        };
        let sequential: Vec<String> = filtered_movie_indices(&first_pass, &actors, &index, &duration_only)
            .into_iter()
            .map(|i| first_pass[i].id.clone())
            .collect();
        let combined = movie_ids(
            &movies,
            &filtered_movie_indices(&movies, &actors, &index, &both),
        );
        assert_eq!(sequential, combined);
    }

    #[test]
    fn reference_filters_require_membership() {
        let (movies, actors) = sample();
        let index = EntityIndex::build(&actors);
        let filters = MovieFilters {
            actor_id: Some("a1".to_string()),
            ..Default::default()
        };
        let got = filtered_movie_indices(&movies, &actors, &index, &filters);
        assert_eq!(movie_ids(&movies, &got), vec!["m1", "m3"]);

        let filters = MovieFilters {
            actor_id: Some("a1".to_string()),
            genre_id: Some("g-none".to_string()),
            ..Default::default()
        };
        assert!(filtered_movie_indices(&movies, &actors, &index, &filters).is_empty());
    }

    #[test]
    fn age_buckets_treat_missing_age_as_zero() {
        let actors = vec![
            actor("a1", "Young One", Some(25), &[]),
            actor("a2", "No Age", None, &[]),
            actor("a3", "Veteran", Some(61), &[]),
        ];
        let movies: Vec<Movie> = Vec::new();
        let index = EntityIndex::build(&movies);

        let young = ActorFilters {
            age: AgeFilter::Young,
            ..Default::default()
        };
        let got = filtered_actor_indices(&actors, &movies, &index, &young);
        assert_eq!(got, vec![0, 1]);

        let mature = ActorFilters {
            age: AgeFilter::Mature,
            ..Default::default()
        };
        let got = filtered_actor_indices(&actors, &movies, &index, &mature);
        assert_eq!(got, vec![2]);
    }

    #[test]
    fn filmography_buckets_count_linked_movies() {
        let actors = vec![
            actor("a1", "Few", None, &["m1", "m2"]),
            actor("a2", "Mod", None, &["m1", "m2", "m3"]),
            actor("a3", "Many", None, &["m1", "m2", "m3", "m4", "m5", "m6"]),
        ];
        let movies: Vec<Movie> = Vec::new();
        let index = EntityIndex::build(&movies);

        for (filter, expected) in [
            (FilmographyFilter::Few, vec![0]),
            (FilmographyFilter::Moderate, vec![1]),
            (FilmographyFilter::Many, vec![2]),
        ] {
            let filters = ActorFilters {
                filmography: filter,
                ..Default::default()
            };
            assert_eq!(
                filtered_actor_indices(&actors, &movies, &index, &filters),
                expected
            );
        }
    }

    #[test]
    fn actor_text_search_reaches_linked_movie_titles() {
        let movies = vec![movie("m1", "Inception", Some(148), &["a1"])];
        let actors = vec![
            actor("a1", "Leo", Some(49), &["m1"]),
            actor("a2", "Scarlett", Some(39), &["m-gone"]),
        ];
        let index = EntityIndex::build(&movies);
        let filters = ActorFilters {
            query: "inception".to_string(),
            ..Default::default()
        };
        // The dangling "m-gone" reference on a2 must not panic the search.
        let got = filtered_actor_indices(&actors, &movies, &index, &filters);
        assert_eq!(got, vec![0]);
    }

    #[test]
    fn clear_resets_all_selections_at_once() {
        let mut filters = MovieFilters {
            query: "leo".to_string(),
            duration: DurationFilter::Long,
            actor_id: Some("a1".to_string()),
            genre_id: Some("g1".to_string()),
        };
        filters.clear();
        assert!(filters.is_default());
    }

    #[test]
    fn bucket_names_round_trip_for_prefs() {
        for d in DurationFilter::ALL {
            assert_eq!(DurationFilter::from_str(d.as_str()), Some(d));
        }
        for a in AgeFilter::ALL {
            assert_eq!(AgeFilter::from_str(a.as_str()), Some(a));
        }
        for f in FilmographyFilter::ALL {
            assert_eq!(FilmographyFilter::from_str(f.as_str()), Some(f));
        }
    }
}

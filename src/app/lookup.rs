// src/app/lookup.rs — id -> entity resolution tolerant of dangling references
//
// Reference lists on one entity may name ids that no longer exist in the
// opposite collection. Rendering substitutes a fixed placeholder for those;
// a dangling id must never fail a view.
use std::collections::HashMap;

use crate::app::data::{Actor, Genre, Movie};

pub const UNKNOWN_MOVIE: &str = "Unknown movie";
pub const UNKNOWN_ACTOR: &str = "Unknown actor";
pub const UNKNOWN_GENRE: &str = "Unknown genre";

pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Movie {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Actor {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Genre {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Positions of entities in a backing slice, keyed by id. Rebuilt whenever the
/// backing collection reloads; lookups are O(1) amortized.
#[derive(Debug, Default)]
pub struct EntityIndex {
    by_id: HashMap<String, usize>,
}

impl EntityIndex {
    pub fn build<T: Keyed>(items: &[T]) -> Self {
        let mut by_id = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            by_id.insert(item.key().to_string(), pos);
        }
        Self { by_id }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn resolve<'a, T: Keyed>(&self, items: &'a [T], id: &str) -> Option<&'a T> {
        self.by_id.get(id).and_then(|pos| items.get(*pos))
    }
}

pub fn movie_label(movies: &[Movie], index: &EntityIndex, id: &str) -> String {
    index
        .resolve(movies, id)
        .map(|m| m.title.clone())
        .unwrap_or_else(|| UNKNOWN_MOVIE.to_string())
}

pub fn actor_label(actors: &[Actor], index: &EntityIndex, id: &str) -> String {
    index
        .resolve(actors, id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| UNKNOWN_ACTOR.to_string())
}

pub fn genre_label(genres: &[Genre], index: &EntityIndex, id: &str) -> String {
    index
        .resolve(genres, id)
        .map(|g| g.name.clone())
        .unwrap_or_else(|| UNKNOWN_GENRE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data::GenreKind;

    fn actor(id: &str, name: &str) -> Actor {
        Actor {
            id: id.to_string(),
            name: name.to_string(),
            age: None,
            image: None,
            description: None,
            movies: Vec::new(),
            genres: Vec::new(),
            is_favorite: false,
            image_settings: None,
            created_at: None,
        }
    }

    #[test]
    fn resolves_present_ids() {
        let actors = vec![actor("a1", "Leo"), actor("a2", "Scarlett")];
        let index = EntityIndex::build(&actors);
        assert_eq!(index.resolve(&actors, "a2").unwrap().name, "Scarlett");
        assert!(index.contains("a1"));
    }

    #[test]
    fn dangling_id_yields_placeholder_not_panic() {
        let actors = vec![actor("a1", "Leo")];
        let index = EntityIndex::build(&actors);
        assert!(index.resolve(&actors, "a99").is_none());
        assert_eq!(actor_label(&actors, &index, "a99"), UNKNOWN_ACTOR);
    }

    #[test]
    fn empty_collection_resolves_nothing() {
        let genres: Vec<Genre> = Vec::new();
        let index = EntityIndex::build(&genres);
        assert_eq!(genre_label(&genres, &index, "g1"), UNKNOWN_GENRE);
    }

    #[test]
    fn rebuild_reflects_reloaded_collection() {
        let mut actors = vec![actor("a1", "Leo")];
        let index = EntityIndex::build(&actors);
        assert!(index.contains("a1"));

        actors = vec![actor("a2", "Ryan")];
        let index = EntityIndex::build(&actors);
        assert!(!index.contains("a1"));
        assert_eq!(actor_label(&actors, &index, "a2"), "Ryan");
    }

    #[test]
    fn genre_placeholder_is_type_specific() {
        let genres = vec![Genre {
            id: "g1".to_string(),
            name: "Drame".to_string(),
            kind: GenreKind::Movie,
            created_at: None,
        }];
        let index = EntityIndex::build(&genres);
        assert_eq!(genre_label(&genres, &index, "g1"), "Drame");
        assert_eq!(genre_label(&genres, &index, "gX"), UNKNOWN_GENRE);
    }
}

use crate::model::card::{CardRecord, Role, Tag};
use crate::model::catalog::Catalog;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::Serialize;

/// Maximum number of cards in a deck.
pub const DECK_SIZE: usize = 8;

/// An ordered sequence of up to [`DECK_SIZE`] resolved cards.
///
/// Built fresh per analysis request and discarded afterwards; uniqueness of
/// names is the caller's contract, not enforced here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Deck {
    cards: Vec<CardRecord>,
}

impl Deck {
    /// Resolve a list of requested names against the catalog.
    ///
    /// Unknown names are silently dropped, input order is preserved and the
    /// result is capped at [`DECK_SIZE`] entries. An empty request yields an
    /// empty deck.
    pub fn normalize<S: AsRef<str>>(catalog: &Catalog, names: &[S]) -> Self {
        let cards = names
            .iter()
            .filter_map(|name| catalog.get(name.as_ref()).cloned())
            .take(DECK_SIZE)
            .collect();
        Self { cards }
    }

    /// Draw up to [`DECK_SIZE`] distinct random cards from the catalog.
    pub fn sample<R: rand::Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Self {
        let mut pool: Vec<&CardRecord> = catalog.cards().collect();
        pool.shuffle(rng);
        let cards = pool.into_iter().take(DECK_SIZE).cloned().collect();
        Self { cards }
    }

    pub fn sample_with_seed(catalog: &Catalog, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::sample(catalog, &mut rng)
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn names(&self) -> Vec<&str> {
        self.cards.iter().map(|card| card.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cards.iter().any(|card| card.name == name)
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.cards.iter().any(|card| card.has_tag(tag))
    }

    pub fn count_tag(&self, tag: Tag) -> usize {
        self.cards.iter().filter(|card| card.has_tag(tag)).count()
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.cards.iter().filter(|card| card.has_role(role)).count()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

//! Leaderboards computed on demand from the registry and the store.
//!
//! Every ranking is sorted by descending average with a stable sort, so equal
//! averages keep the registry order.

use serde::Serialize;

use crate::data::{Average, Rating, User};
use crate::registry::RestaurantRegistry;
use crate::store::RatingStore;

/// Number of leading places flagged as highlighted.
pub const HIGHLIGHTED_PLACES: usize = 3;

/// One place in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    /// Zero based.
    pub rank: usize,
    pub highlighted: bool,
    #[serde(flatten)]
    pub entry: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserEntry {
    pub restaurant: String,
    pub rating: Rating,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallEntry {
    pub name: String,
    pub overall: Average,
    pub score_a: Option<Average>,
    pub score_b: Option<Average>,
}

impl OverallEntry {
    pub fn score_for(&self, user: User) -> Option<Average> {
        match user {
            User::A => self.score_a,
            User::B => self.score_b,
        }
    }

    /// How many users rated this restaurant.
    pub fn contributing_count(&self) -> usize {
        User::ALL
            .iter()
            .filter(|user| self.score_for(**user).is_some())
            .count()
    }
}

fn rank_descending<T, F>(mut entries: Vec<T>, key: F) -> Vec<Ranked<T>>
where
    F: Fn(&T) -> Average,
{
    entries.sort_by(|a, b| key(b).cmp(&key(a)));
    entries
        .into_iter()
        .enumerate()
        .map(|(rank, entry)| Ranked {
            rank,
            highlighted: rank < HIGHLIGHTED_PLACES,
            entry,
        })
        .collect()
}

/// Restaurants `user` rated, best first.
pub fn rank_by_user(
    registry: &RestaurantRegistry,
    store: &RatingStore,
    user: User,
) -> Vec<Ranked<UserEntry>> {
    let entries: Vec<UserEntry> = registry
        .list()
        .iter()
        .filter_map(|name| {
            store.get(name, user).map(|rating| UserEntry {
                restaurant: name.clone(),
                rating: *rating,
            })
        })
        .collect();
    rank_descending(entries, |e| e.rating.average())
}

/// Restaurants rated by anyone, ordered by the mean of the users who rated them.
///
/// Users without a rating are left out of the mean instead of counting as zero.
pub fn rank_overall(registry: &RestaurantRegistry, store: &RatingStore) -> Vec<Ranked<OverallEntry>> {
    let entries: Vec<OverallEntry> = registry
        .list()
        .iter()
        .filter_map(|name| {
            let score_of = |user| store.get(name, user).map(Rating::average);
            let score_a = score_of(User::A);
            let score_b = score_of(User::B);
            let overall = Average::mean(score_a.into_iter().chain(score_b))?;
            Some(OverallEntry {
                name: name.clone(),
                overall,
                score_a,
                score_b,
            })
        })
        .collect();
    rank_descending(entries, |e| e.overall)
}

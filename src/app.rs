use serde::Serialize;

use crate::config::AppConfig;
use crate::data::{Average, Category, Rating, Score, User};
use crate::draft::DraftSession;
use crate::error::RatingError;
use crate::ranking::{self, OverallEntry, Ranked, UserEntry};
use crate::registry::{normalize_name, RestaurantRegistry};
use crate::store::RatingStore;

/// Owner of all rating state.
///
/// A front end drives every change through this type and pulls freshly
/// computed rankings back out of it.
#[derive(Debug, Clone)]
pub struct App {
    config: AppConfig,
    registry: RestaurantRegistry,
    store: RatingStore,
    draft: DraftSession,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRanking {
    pub user: User,
    pub name: String,
    pub entries: Vec<Ranked<UserEntry>>,
}

/// Everything a front end needs to redraw, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub restaurants: Vec<String>,
    pub total_count: usize,
    pub rated_count: usize,
    pub users: Vec<UserRanking>,
    pub overall: Vec<Ranked<OverallEntry>>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let registry = config.restaurants.iter().collect::<RestaurantRegistry>();
        let draft = DraftSession::new(config.default_user);
        tracing::debug!("app ready with {} restaurants", registry.count());
        Self {
            config,
            registry,
            store: RatingStore::new(),
            draft,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn draft(&self) -> &DraftSession {
        &self.draft
    }

    pub fn store(&self) -> &RatingStore {
        &self.store
    }

    pub fn add_restaurant(&mut self, name: &str) -> bool {
        self.registry.add(name)
    }

    pub fn select_user(&mut self, user: User) {
        self.draft.select_user(user);
    }

    pub fn selected_user(&self) -> User {
        self.draft.selected_user()
    }

    /// Point the draft at a registered restaurant, or clear it with a blank name.
    pub fn select_restaurant(&mut self, name: &str) -> Result<(), RatingError> {
        let name = normalize_name(name);
        if !name.is_empty() && !self.registry.contains(&name) {
            return Err(RatingError::UnknownRestaurant { name });
        }
        self.draft.select_restaurant(&name);
        Ok(())
    }

    pub fn set_category_score(&mut self, category: Category, value: u8) -> Result<(), RatingError> {
        let score = Score::try_from(value)?;
        self.draft.set_category_score(category, score);
        Ok(())
    }

    /// Save the draft. `Ok(None)` means there was nothing to save.
    pub fn commit_draft(&mut self) -> Result<Option<Rating>, RatingError> {
        self.draft.commit(&mut self.store)
    }

    pub fn cancel_draft(&mut self) {
        self.draft.cancel();
    }

    pub fn restaurant_list(&self) -> &[String] {
        self.registry.list()
    }

    pub fn search_restaurants(&self, pattern: &str) -> Vec<&str> {
        self.registry.search(pattern)
    }

    pub fn rated_count(&self) -> usize {
        self.store.rated_restaurant_count()
    }

    pub fn total_count(&self) -> usize {
        self.registry.count()
    }

    pub fn rating(&self, restaurant: &str, user: User) -> Option<&Rating> {
        self.store.get(restaurant, user)
    }

    pub fn rank_by_user(&self, user: User) -> Vec<Ranked<UserEntry>> {
        ranking::rank_by_user(&self.registry, &self.store, user)
    }

    pub fn rank_overall(&self) -> Vec<Ranked<OverallEntry>> {
        ranking::rank_overall(&self.registry, &self.store)
    }

    pub fn live_average(&self) -> Average {
        self.draft.live_average()
    }

    pub fn can_commit(&self) -> bool {
        self.draft.can_commit()
    }

    pub fn user_name(&self, user: User) -> &str {
        self.config.user_name(user)
    }

    pub fn resolve_user(&self, name: &str) -> Result<User, RatingError> {
        self.config.resolve_user(name)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            restaurants: self.registry.list().to_vec(),
            total_count: self.total_count(),
            rated_count: self.rated_count(),
            users: User::ALL
                .into_iter()
                .map(|user| UserRanking {
                    user,
                    name: self.user_name(user).to_string(),
                    entries: self.rank_by_user(user),
                })
                .collect(),
            overall: self.rank_overall(),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

use serde::Serialize;

use crate::data::{Average, Category, Rating, Score, User};
use crate::error::RatingError;
use crate::registry::normalize_name;
use crate::store::{NewRatingProps, RatingStore};

/// The rating being put together before it is saved.
///
/// The selected user outlives each draft: saving or cancelling only resets the
/// restaurant and the three scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftSession {
    selected_user: User,
    restaurant: Option<String>,
    starter: Score,
    main: Score,
    dessert: Score,
}

impl DraftSession {
    pub fn new(selected_user: User) -> Self {
        Self {
            selected_user,
            restaurant: None,
            starter: Score::default(),
            main: Score::default(),
            dessert: Score::default(),
        }
    }

    pub fn select_user(&mut self, user: User) {
        tracing::debug!("draft user set to {user}");
        self.selected_user = user;
    }

    pub fn selected_user(&self) -> User {
        self.selected_user
    }

    /// Target `name`, or clear the target when `name` is blank.
    ///
    /// The name is not checked against the registry here.
    pub fn select_restaurant(&mut self, name: &str) {
        let name = normalize_name(name);
        self.restaurant = (!name.is_empty()).then_some(name);
        tracing::debug!("draft restaurant set to {:?}", self.restaurant);
    }

    pub fn restaurant(&self) -> Option<&str> {
        self.restaurant.as_deref()
    }

    pub fn set_category_score(&mut self, category: Category, value: Score) {
        match category {
            Category::Starter => self.starter = value,
            Category::Main => self.main = value,
            Category::Dessert => self.dessert = value,
        }
        tracing::debug!("draft {category} set to {value}");
    }

    pub fn score(&self, category: Category) -> Score {
        match category {
            Category::Starter => self.starter,
            Category::Main => self.main,
            Category::Dessert => self.dessert,
        }
    }

    pub fn live_average(&self) -> Average {
        Average::of_scores(self.starter, self.main, self.dessert)
    }

    pub fn can_commit(&self) -> bool {
        self.restaurant.is_some()
    }

    /// Save the draft for the selected user and start over.
    ///
    /// Returns `Ok(None)` and leaves everything untouched when no restaurant is
    /// selected. On error the draft is kept as it was.
    pub fn commit(&mut self, store: &mut RatingStore) -> Result<Option<Rating>, RatingError> {
        let Some(restaurant) = self.restaurant.clone() else {
            tracing::debug!("nothing to commit, no restaurant selected");
            return Ok(None);
        };

        let props = NewRatingProps::new(
            restaurant.as_str(),
            self.selected_user,
            self.starter,
            self.main,
            self.dessert,
        );
        let rating = store.upsert(props)?;
        tracing::info!(
            "user {} rated {restaurant} with average {}",
            self.selected_user,
            rating.average()
        );

        self.reset();
        Ok(Some(rating))
    }

    /// Drop the in-progress rating without saving it.
    pub fn cancel(&mut self) {
        tracing::debug!("draft cancelled");
        self.reset();
    }

    fn reset(&mut self) {
        *self = Self::new(self.selected_user);
    }
}

impl Default for DraftSession {
    fn default() -> Self {
        Self::new(User::default())
    }
}

use std::collections::HashMap;

use derive_builder::Builder;

use crate::data::{Rating, Score, User};
use crate::error::RatingError;
use crate::registry::normalize_name;

/// Everything needed to save one rating.
#[derive(Builder, Debug, Clone)]
pub struct NewRatingProps {
    #[builder(setter(into))]
    restaurant: String,
    user: User,
    #[builder(default)]
    starter: Score,
    #[builder(default)]
    main: Score,
    #[builder(default)]
    dessert: Score,
}

impl NewRatingProps {
    pub fn new(
        restaurant: impl Into<String>,
        user: User,
        starter: Score,
        main: Score,
        dessert: Score,
    ) -> Self {
        Self {
            restaurant: restaurant.into(),
            user,
            starter,
            main,
            dessert,
        }
    }

    /// Build props from raw scores, validating each against the scale.
    pub fn from_raw(
        restaurant: impl Into<String>,
        user: User,
        starter: u8,
        main: u8,
        dessert: u8,
    ) -> Result<Self, RatingError> {
        Ok(Self::new(
            restaurant,
            user,
            Score::try_from(starter)?,
            Score::try_from(main)?,
            Score::try_from(dessert)?,
        ))
    }
}

/// Ratings keyed by restaurant, then by user.
///
/// A restaurant only gets an entry once somebody rated it.
#[derive(Debug, Default, Clone)]
pub struct RatingStore {
    ratings: HashMap<String, HashMap<User, Rating>>,
}

impl RatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a rating, replacing whatever that user said about that restaurant before.
    pub fn upsert(&mut self, props: NewRatingProps) -> Result<Rating, RatingError> {
        let NewRatingProps {
            restaurant,
            user,
            starter,
            main,
            dessert,
        } = props;

        let restaurant = normalize_name(&restaurant);
        if restaurant.is_empty() {
            return Err(RatingError::EmptyRestaurant);
        }

        let rating = Rating::new(starter, main, dessert);
        let previous = self
            .ratings
            .entry(restaurant.clone())
            .or_default()
            .insert(user, rating);

        tracing::debug!(
            "rating for {restaurant} by user {user} {}: {starter}/{main}/{dessert} avg {}",
            if previous.is_some() { "replaced" } else { "created" },
            rating.average()
        );
        Ok(rating)
    }

    pub fn get(&self, restaurant: &str, user: User) -> Option<&Rating> {
        self.ratings.get(restaurant)?.get(&user)
    }

    /// Number of restaurants with at least one rating from anyone.
    pub fn rated_restaurant_count(&self) -> usize {
        self.ratings.values().filter(|by_user| !by_user.is_empty()).count()
    }

    pub fn is_rated(&self, restaurant: &str) -> bool {
        self.ratings
            .get(restaurant)
            .map_or(false, |by_user| !by_user.is_empty())
    }
}

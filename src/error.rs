use thiserror::Error;

/// Errors raised by the rating core when given input it can not accept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    #[error("restaurant name must not be empty")]
    EmptyRestaurant,

    #[error("score {value} is outside the 1-5 scale")]
    ScoreOutOfRange { value: u8 },

    #[error("unknown restaurant '{name}'")]
    UnknownRestaurant { name: String },

    #[error("unknown user '{name}'")]
    UnknownUser { name: String },

    #[error("unknown category '{name}', expected starter, main or dessert")]
    UnknownCategory { name: String },
}

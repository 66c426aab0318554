use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::RatingError;

/// One of the two people keeping score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum User {
    A,
    B,
}

impl User {
    /// Every user, in display order.
    pub const ALL: [User; 2] = [User::A, User::B];
}

impl Default for User {
    fn default() -> Self {
        User::A
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            User::A => f.write_str("a"),
            User::B => f.write_str("b"),
        }
    }
}

impl FromStr for User {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(User::A),
            "b" => Ok(User::B),
            _ => Err(RatingError::UnknownUser {
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Starter,
    Main,
    Dessert,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Starter, Category::Main, Category::Dessert];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Starter => f.write_str("starter"),
            Category::Main => f.write_str("main"),
            Category::Dessert => f.write_str("dessert"),
        }
    }
}

impl FromStr for Category {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "starter" | "entrada" => Ok(Category::Starter),
            "main" => Ok(Category::Main),
            "dessert" => Ok(Category::Dessert),
            _ => Err(RatingError::UnknownCategory {
                name: s.to_string(),
            }),
        }
    }
}

/// A single category score, always within `Score::MIN..=Score::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Score {
    fn default() -> Self {
        Score(Self::MIN)
    }
}

impl TryFrom<u8> for Score {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Score(value))
        } else {
            Err(RatingError::ScoreOutOfRange { value })
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A one-decimal average, kept in tenths so that ordering and equality are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Average(u16);

impl Average {
    pub fn from_tenths(tenths: u16) -> Self {
        Average(tenths)
    }

    pub fn tenths(self) -> u16 {
        self.0
    }

    /// Average of three category scores, rounded half-up to one decimal.
    pub fn of_scores(starter: Score, main: Score, dessert: Score) -> Self {
        let sum = u16::from(starter.0) + u16::from(main.0) + u16::from(dessert.0);
        // sum * 10 / 3, rounded half-up
        Average((sum * 20 + 3) / 6)
    }

    /// Mean of already-rounded averages, taken in `f64` and rounded to the
    /// nearest tenth of the exact binary result (ties go up).
    ///
    /// A mean such as (1.0 + 1.3) / 2 lands just below 1.15 in binary and so
    /// becomes 1.1, while (4.3 + 4.0) / 2 lands just above 4.15 and becomes 4.2.
    /// Returns `None` when there is nothing to average.
    pub fn mean<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Average>,
    {
        let (sum, count) = values
            .into_iter()
            .fold((0.0f64, 0u32), |(sum, count), avg| (sum + avg.as_f64(), count + 1));
        if count == 0 {
            return None;
        }
        Some(Average(nearest_tenths(sum / f64::from(count))))
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

/// Nearest whole number of tenths to the exact value of `x`, ties upward.
fn nearest_tenths(x: f64) -> u16 {
    if !x.is_normal() || x < 0.0 {
        return 0;
    }
    let bits = x.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    let mantissa = u128::from((bits & ((1u64 << 52) - 1)) | (1u64 << 52));
    // x == mantissa / 2^shift
    let shift = 1075 - exponent;
    if shift <= 0 {
        return u16::MAX;
    }
    let scaled = mantissa * 10;
    let whole = scaled >> shift;
    let rest = scaled - (whole << shift);
    let tenths = if rest >= 1u128 << (shift - 1) {
        whole + 1
    } else {
        whole
    };
    u16::try_from(tenths).unwrap_or(u16::MAX)
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl Serialize for Average {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// A saved rating of one restaurant by one user.
///
/// The average is derived on construction and can not be set on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rating {
    starter: Score,
    main: Score,
    dessert: Score,
    average: Average,
}

impl Rating {
    pub fn new(starter: Score, main: Score, dessert: Score) -> Self {
        Self {
            starter,
            main,
            dessert,
            average: Average::of_scores(starter, main, dessert),
        }
    }

    pub fn score(&self, category: Category) -> Score {
        match category {
            Category::Starter => self.starter,
            Category::Main => self.main,
            Category::Dessert => self.dessert,
        }
    }

    pub fn starter(&self) -> Score {
        self.starter
    }

    pub fn main(&self) -> Score {
        self.main
    }

    pub fn dessert(&self) -> Score {
        self.dessert
    }

    pub fn average(&self) -> Average {
        self.average
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(v: u8) -> Score {
        Score::try_from(v).unwrap()
    }

    #[test]
    fn score_rejects_values_outside_scale() {
        assert!(Score::try_from(0).is_err());
        assert!(Score::try_from(6).is_err());
        assert_eq!(score(1), Score::default());
        assert_eq!(score(5).value(), 5);
    }

    #[test]
    fn average_matches_one_decimal_rounding_for_every_triple() {
        for s in 1..=5u8 {
            for m in 1..=5u8 {
                for d in 1..=5u8 {
                    let avg = Average::of_scores(score(s), score(m), score(d));
                    let expected = ((f64::from(s + m + d) / 3.0) * 10.0).round() as u16;
                    assert_eq!(avg.tenths(), expected, "({s}, {m}, {d})");
                    // the shown value parses back to the same average
                    let shown: f64 = avg.to_string().parse().unwrap();
                    assert_eq!((shown * 10.0).round() as u16, avg.tenths());
                }
            }
        }
    }

    #[test]
    fn average_display_keeps_one_decimal() {
        assert_eq!(Average::from_tenths(50).to_string(), "5.0");
        assert_eq!(Average::from_tenths(43).to_string(), "4.3");
        assert_eq!(Average::of_scores(score(4), score(5), score(4)).to_string(), "4.3");
        assert_eq!(Average::of_scores(score(5), score(5), score(4)).to_string(), "4.7");
    }

    #[test]
    fn mean_rounds_from_the_binary_value() {
        let mean = Average::mean([Average::from_tenths(43), Average::from_tenths(40)]);
        assert_eq!(mean, Some(Average::from_tenths(42)));
        let mean = Average::mean([Average::from_tenths(10), Average::from_tenths(13)]);
        assert_eq!(mean, Some(Average::from_tenths(11)));
        let mean = Average::mean([Average::from_tenths(40), Average::from_tenths(20)]);
        assert_eq!(mean, Some(Average::from_tenths(30)));
        assert_eq!(Average::mean([Average::from_tenths(37)]), Some(Average::from_tenths(37)));
        assert_eq!(Average::mean(std::iter::empty()), None);
    }

    #[test]
    fn average_serializes_as_number() {
        let json = serde_json::to_string(&Average::from_tenths(47)).unwrap();
        assert_eq!(json, "4.7");
    }

    #[test]
    fn parse_users_and_categories() {
        assert_eq!("A".parse::<User>().unwrap(), User::A);
        assert_eq!(" b ".parse::<User>().unwrap(), User::B);
        assert!("c".parse::<User>().is_err());
        assert_eq!("entrada".parse::<Category>().unwrap(), Category::Starter);
        assert_eq!("Dessert".parse::<Category>().unwrap(), Category::Dessert);
        assert!("soup".parse::<Category>().is_err());
    }

    #[test]
    fn rating_derives_average() {
        let rating = Rating::new(score(5), score(4), score(3));
        assert_eq!(rating.average(), Average::from_tenths(40));
        assert_eq!(rating.score(Category::Main), score(4));
    }
}

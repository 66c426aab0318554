//! Application settings, read from the environment (and a `.env` file when present).
//!
//! | variable              | meaning                                  | default          |
//! |-----------------------|------------------------------------------|------------------|
//! | `RATING_RESTAURANTS`  | comma separated seed list                | twenty favourites|
//! | `RATING_DEFAULT_USER` | user selected at start, `a` or `b`       | `a`              |
//! | `RATING_USER_A_NAME`  | display name of user A                   | `pamolita`       |
//! | `RATING_USER_B_NAME`  | display name of user B                   | `ramiro`         |
//! | `RATING_LOG_LEVEL`    | tracing max level                        | `info`           |

use anyhow::Context;
use derive_builder::Builder;

use crate::data::User;
use crate::error::RatingError;

pub const DEFAULT_RESTAURANTS: &[&str] = &[
    "Evelia",
    "Rufino",
    "Tony wu",
    "Acido",
    "Mengano",
    "Niño gordo",
    "Anafe",
    "Bis bristo",
    "Ajo negro",
    "Aramburu",
    "Uddo",
    "Kuro Neko",
    "Crizia",
    "Idilio",
    "Piedra pasillo",
    "Tigre morado",
    "Kefi",
    "Mess cocina",
    "Raggio",
    "Marta restaurante",
];

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(default)]
pub struct AppConfig {
    #[builder(setter(into))]
    pub restaurants: Vec<String>,
    pub default_user: User,
    #[builder(setter(into))]
    pub user_a_name: String,
    #[builder(setter(into))]
    pub user_b_name: String,
    pub log_level: tracing::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            restaurants: DEFAULT_RESTAURANTS.iter().map(|s| s.to_string()).collect(),
            default_user: User::A,
            user_a_name: "pamolita".to_string(),
            user_b_name: "ramiro".to_string(),
            log_level: tracing::Level::INFO,
        }
    }
}

impl AppConfig {
    /// Load `.env` if there is one, then read the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(list) = lookup("RATING_RESTAURANTS") {
            config.restaurants = list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(name) = lookup("RATING_USER_A_NAME") {
            config.user_a_name = name;
        }
        if let Some(name) = lookup("RATING_USER_B_NAME") {
            config.user_b_name = name;
        }
        config.check_user_names()?;
        if let Some(user) = lookup("RATING_DEFAULT_USER") {
            config.default_user = config
                .resolve_user(&user)
                .with_context(|| format!("invalid RATING_DEFAULT_USER {user}"))?;
        }
        if let Some(level) = lookup("RATING_LOG_LEVEL") {
            config.log_level = level
                .parse()
                .with_context(|| format!("invalid RATING_LOG_LEVEL {level}"))?;
        }

        Ok(config)
    }

    /// Every user must be reachable by name: display names may not be blank,
    /// equal to each other, or equal to the other user's letter.
    pub fn check_user_names(&self) -> anyhow::Result<()> {
        for user in User::ALL {
            let name = self.user_name(user).trim();
            anyhow::ensure!(!name.is_empty(), "display name of user {user} is empty");
            for other in User::ALL.into_iter().filter(|other| *other != user) {
                anyhow::ensure!(
                    !name.eq_ignore_ascii_case(self.user_name(other).trim()),
                    "users {user} and {other} share the display name {name}"
                );
                anyhow::ensure!(
                    !name.eq_ignore_ascii_case(&other.to_string()),
                    "display name {name} of user {user} is the letter of user {other}"
                );
            }
        }
        Ok(())
    }

    pub fn user_name(&self, user: User) -> &str {
        match user {
            User::A => &self.user_a_name,
            User::B => &self.user_b_name,
        }
    }

    /// Find a user by `a`/`b` or by display name, ignoring case.
    pub fn resolve_user(&self, name: &str) -> Result<User, RatingError> {
        let wanted = name.trim();
        User::ALL
            .into_iter()
            .find(|user| self.user_name(*user).trim().eq_ignore_ascii_case(wanted))
            .map_or_else(|| wanted.parse(), Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.restaurants.len(), 20);
        assert_eq!(config.restaurants[0], "Evelia");
        assert_eq!(config.user_name(User::B), "ramiro");
    }

    #[test]
    fn reads_every_variable() {
        let config = AppConfig::from_lookup(lookup(&[
            ("RATING_RESTAURANTS", "Kefi, Raggio,, Uddo "),
            ("RATING_USER_A_NAME", "ana"),
            ("RATING_USER_B_NAME", "bruno"),
            ("RATING_DEFAULT_USER", "Bruno"),
            ("RATING_LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.restaurants, ["Kefi", "Raggio", "Uddo"]);
        assert_eq!(config.default_user, User::B);
        assert_eq!(config.user_name(User::A), "ana");
        assert_eq!(config.log_level, tracing::Level::DEBUG);
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(AppConfig::from_lookup(lookup(&[("RATING_DEFAULT_USER", "nobody")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("RATING_LOG_LEVEL", "loud")])).is_err());
    }

    #[test]
    fn colliding_display_names_are_errors() {
        let same = AppConfig::from_lookup(lookup(&[
            ("RATING_USER_A_NAME", "Sam"),
            ("RATING_USER_B_NAME", "sam"),
        ]));
        assert!(same.is_err());
        assert!(AppConfig::from_lookup(lookup(&[("RATING_USER_A_NAME", "b")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("RATING_USER_B_NAME", "A")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("RATING_USER_B_NAME", "  ")])).is_err());

        let own_letter = AppConfig::from_lookup(lookup(&[("RATING_USER_A_NAME", "a")])).unwrap();
        assert_eq!(own_letter.resolve_user("a").unwrap(), User::A);
        assert_eq!(own_letter.resolve_user("ramiro").unwrap(), User::B);
    }

    #[test]
    fn resolve_user_by_letter_or_name() {
        let config = AppConfig::default();
        assert_eq!(config.resolve_user("Pamolita").unwrap(), User::A);
        assert_eq!(config.resolve_user("b").unwrap(), User::B);
        assert!(config.resolve_user("someone").is_err());
    }

    #[test]
    fn builder_fills_defaults() {
        let config = AppConfigBuilder::default()
            .restaurants(vec!["A".to_string()])
            .default_user(User::B)
            .build()
            .unwrap();
        assert_eq!(config.restaurants, ["A"]);
        assert_eq!(config.user_name(User::A), "pamolita");
        assert_eq!(config.log_level, tracing::Level::INFO);
    }
}

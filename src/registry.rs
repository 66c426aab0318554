use fuzzy_matcher::{skim::SkimMatcherV2, FuzzyMatcher};

/// Trim `name` and collapse every run of whitespace inside it to one space.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Ordered list of known restaurants.
///
/// Insertion order is the dropdown order and also breaks ties in every ranking.
#[derive(Debug, Default, Clone)]
pub struct RestaurantRegistry {
    names: Vec<String>,
}

impl RestaurantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` unless it is blank or already present (exact match).
    ///
    /// The name is stored normalized. Returns whether the registry changed.
    pub fn add(&mut self, name: &str) -> bool {
        let name = normalize_name(name);
        if name.is_empty() {
            tracing::debug!("ignore blank restaurant name");
            return false;
        }
        if self.contains(&name) {
            tracing::debug!("ignore duplicate restaurant {name}");
            return false;
        }
        tracing::info!("restaurant added: {name}");
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn list(&self) -> &[String] {
        &self.names
    }

    pub fn count(&self) -> usize {
        self.names.len()
    }

    /// Fuzzy search over the registry, best match first.
    pub fn search(&self, pattern: &str) -> Vec<&str> {
        let matcher = SkimMatcherV2::default();
        let mut hits = self
            .names
            .iter()
            .filter_map(|name| {
                matcher
                    .fuzzy_match(name, pattern)
                    .map(|score| (score, name.as_str()))
            })
            .collect::<Vec<_>>();
        // stable, so equal scores stay in registry order
        hits.sort_by(|a, b| b.0.cmp(&a.0));
        hits.into_iter().map(|(_, name)| name).collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for RestaurantRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut registry = Self::new();
        for name in iter {
            registry.add(name.as_ref());
        }
        registry
    }
}

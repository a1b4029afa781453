use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;

/// Pet kinds the naming service knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Dog,
    Cat,
    Bird,
    Fish,
    Rabbit,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Dog,
        Category::Cat,
        Category::Bird,
        Category::Fish,
        Category::Rabbit,
    ];

    /// Path segment used by the service routes.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Dog => "dog",
            Category::Cat => "cat",
            Category::Bird => "bird",
            Category::Fish => "fish",
            Category::Rabbit => "rabbit",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Dog => "DOG",
            Category::Cat => "CAT",
            Category::Bird => "BIRD",
            Category::Fish => "FISH",
            Category::Rabbit => "RABBIT",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    /// Next category in display order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| {
                anyhow!(
                    "Unknown pet type '{}'. Available types: {}",
                    s,
                    Self::ALL
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

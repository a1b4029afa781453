use crate::category::Category;

/// Number of names requested per "generate", always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedCount(u8);

impl RequestedCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn clamped(n: i64) -> Self {
        Self(n.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for RequestedCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountDirection {
    Increase,
    Decrease,
}

/// Selected category plus requested count. Never touched by network activity.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    category: Option<Category>,
    count: RequestedCount,
}

impl Selection {
    pub fn with_count(count: i64) -> Self {
        Self {
            category: None,
            count: RequestedCount::clamped(count),
        }
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn count(&self) -> RequestedCount {
        self.count
    }

    pub fn select_category(&mut self, category: Category) {
        self.category = Some(category);
    }

    pub fn set_count(&mut self, n: i64) {
        self.count = RequestedCount::clamped(n);
    }

    /// Steps the count by one; a step past either bound is a no-op.
    pub fn adjust_count(&mut self, direction: CountDirection) {
        let current = self.count.get();
        let next = match direction {
            CountDirection::Increase if current < RequestedCount::MAX => current + 1,
            CountDirection::Decrease if current > RequestedCount::MIN => current - 1,
            _ => current,
        };
        self.count = RequestedCount(next);
    }
}

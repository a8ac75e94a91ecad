use itertools::Itertools;
use tracing::{debug, warn};

use crate::model::{category_of, BenefitRecord};

/// Fixed display priority of categories.
pub const CATEGORY_ORDER: [&str; 7] = [
    "Doplatky", "Rodina", "Dieťa", "Dospelý", "Žena", "Muž", "Senior",
];

/// Position of `category` in [`CATEGORY_ORDER`], or `-1` when it is not listed.
///
/// Unlisted categories therefore sort ahead of every listed one.
pub fn category_rank(category: &str) -> i32 {
    CATEGORY_ORDER
        .iter()
        .position(|c| *c == category)
        .map(|idx| idx as i32)
        .unwrap_or(-1)
}

/// Distinct categories in first-seen order, stably sorted by [`category_rank`].
pub fn build_categories(records: &[BenefitRecord]) -> Vec<String> {
    let mut categories: Vec<String> = records
        .iter()
        .map(|r| category_of(&r.popis))
        .unique()
        .map(str::to_string)
        .collect();
    categories.sort_by_key(|c| category_rank(c));
    debug!(count = categories.len(), "categories built");
    categories
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// The category selection control. An empty selection means "no filter";
/// that default is not stored as an option.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategorySelect {
    options: Vec<SelectOption>,
    selected: String,
}

impl CategorySelect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one option per category, value and label identical.
    pub fn populate(&mut self, categories: &[String]) {
        self.options
            .extend(categories.iter().map(|c| SelectOption {
                value: c.clone(),
                label: c.clone(),
            }));
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn select(&mut self, value: &str) {
        if !value.is_empty() && !self.options.iter().any(|o| o.value == value) {
            warn!(category = value, "category is not among the detected categories");
        }
        self.selected = value.to_string();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Cycles `"" -> first option -> ... -> last option -> ""`.
    pub fn select_next(&mut self) -> &str {
        let next = match self.position() {
            None => self.options.first(),
            Some(idx) => self.options.get(idx + 1),
        };
        self.selected = next.map(|o| o.value.clone()).unwrap_or_default();
        &self.selected
    }

    pub fn select_previous(&mut self) -> &str {
        let prev = match self.position() {
            None => self.options.last(),
            Some(0) => None,
            Some(idx) => self.options.get(idx - 1),
        };
        self.selected = prev.map(|o| o.value.clone()).unwrap_or_default();
        &self.selected
    }

    fn position(&self) -> Option<usize> {
        if self.selected.is_empty() {
            return None;
        }
        self.options.iter().position(|o| o.value == self.selected)
    }
}

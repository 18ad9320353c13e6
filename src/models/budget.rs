//! Budget table and category rules

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Planned spending for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    /// Planned amount in cents
    pub planned: Money,
}

impl BudgetLine {
    pub fn new(category: impl Into<String>, planned: Money) -> Self {
        Self {
            category: category.into(),
            planned,
        }
    }
}

/// Ordered mapping from spending category to planned amount
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetTable {
    lines: Vec<BudgetLine>,
}

impl BudgetTable {
    pub fn new(lines: Vec<BudgetLine>) -> Self {
        Self { lines }
    }

    /// Lines in table order
    pub fn lines(&self) -> &[BudgetLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Planned amount for a category (case-insensitive)
    pub fn planned_for(&self, category: &str) -> Option<Money> {
        self.lines
            .iter()
            .find(|l| l.category.eq_ignore_ascii_case(category))
            .map(|l| l.planned)
    }

    /// Sum of all planned amounts
    pub fn total_planned(&self) -> Money {
        self.lines.iter().map(|l| l.planned).sum()
    }
}

/// Assigns a category to rows whose description contains a keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub keyword: String,
    pub category: String,
}

impl CategoryRule {
    pub fn new(keyword: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            category: category.into(),
        }
    }

    /// Case-insensitive keyword match against a description
    pub fn matches(&self, description: &str) -> bool {
        !self.keyword.is_empty()
            && description
                .to_lowercase()
                .contains(&self.keyword.to_lowercase())
    }
}

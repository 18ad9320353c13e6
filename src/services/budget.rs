//! Budget comparison service
//!
//! Compares actual spending per category against the planned budget table.
//! Spending is the negated sum of a category's amounts, so outflows count as
//! positive spend and refunds reduce it.

use crate::models::{BudgetTable, Money, Transaction};

/// One category row in the comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetRow {
    pub category: String,
    pub planned: Money,
    pub spent: Money,
    /// Planned minus spent; negative means over budget
    pub variance: Money,
}

impl BudgetRow {
    pub fn is_over_budget(&self) -> bool {
        self.variance.is_negative()
    }
}

/// Comparison of spending against every budgeted category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetComparison {
    /// Rows in budget table order
    pub rows: Vec<BudgetRow>,
}

impl BudgetComparison {
    pub fn total_planned(&self) -> Money {
        self.rows.iter().map(|r| r.planned).sum()
    }

    pub fn total_spent(&self) -> Money {
        self.rows.iter().map(|r| r.spent).sum()
    }

    pub fn total_variance(&self) -> Money {
        self.total_planned() - self.total_spent()
    }

    pub fn over_budget(&self) -> impl Iterator<Item = &BudgetRow> {
        self.rows.iter().filter(|r| r.is_over_budget())
    }
}

/// Service for comparing transactions against a budget table
pub struct BudgetService<'a> {
    budget: &'a BudgetTable,
}

impl<'a> BudgetService<'a> {
    pub fn new(budget: &'a BudgetTable) -> Self {
        Self { budget }
    }

    /// Build the comparison
    ///
    /// Categories match case-insensitively. Transfers are left out, and
    /// transactions in categories absent from the table are ignored.
    pub fn compare(&self, transactions: &[Transaction]) -> BudgetComparison {
        let rows = self
            .budget
            .lines()
            .iter()
            .map(|line| {
                let spent = -transactions
                    .iter()
                    .filter(|t| !t.is_transfer)
                    .filter(|t| {
                        t.category
                            .as_deref()
                            .is_some_and(|c| c.eq_ignore_ascii_case(&line.category))
                    })
                    .map(|t| t.amount)
                    .sum::<Money>();

                BudgetRow {
                    category: line.category.clone(),
                    planned: line.planned,
                    spent,
                    variance: line.planned - spent,
                }
            })
            .collect();

        let comparison = BudgetComparison { rows };
        tracing::debug!(
            categories = comparison.rows.len(),
            over_budget = comparison.over_budget().count(),
            "compared spending to budget"
        );
        comparison
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLine, TxnDate};

    fn txn(category: Option<&str>, cents: i64) -> Transaction {
        let mut t = Transaction::new(TxnDate::default(), "", "x", Money::from_cents(cents));
        t.category = category.map(String::from);
        t
    }

    fn budget() -> BudgetTable {
        BudgetTable::new(vec![
            BudgetLine::new("Groceries", Money::from_cents(40000)),
            BudgetLine::new("Dining", Money::from_cents(15000)),
        ])
    }

    #[test]
    fn test_spent_is_negated_sum() {
        let budget = budget();
        let service = BudgetService::new(&budget);
        let rows = vec![
            txn(Some("Groceries"), -12050),
            txn(Some("groceries"), -5000),
            txn(Some("Groceries"), 2050),
            txn(Some("Dining"), -20000),
        ];

        let comparison = service.compare(&rows);

        assert_eq!(comparison.rows[0].spent, Money::from_cents(15000));
        assert_eq!(comparison.rows[0].variance, Money::from_cents(25000));
        assert!(!comparison.rows[0].is_over_budget());
        assert_eq!(comparison.rows[1].variance, Money::from_cents(-5000));
        assert_eq!(comparison.over_budget().count(), 1);
    }

    #[test]
    fn test_unmatched_category_spends_zero() {
        let budget = budget();
        let service = BudgetService::new(&budget);
        let rows = vec![txn(Some("Travel"), -99900), txn(None, -100)];

        let comparison = service.compare(&rows);

        assert_eq!(comparison.rows.len(), 2);
        assert!(comparison.rows.iter().all(|r| r.spent.is_zero()));
        assert_eq!(comparison.total_variance(), comparison.total_planned());
    }

    #[test]
    fn test_transfers_excluded() {
        let budget = budget();
        let service = BudgetService::new(&budget);
        let mut transfer = txn(Some("Groceries"), -10000);
        transfer.is_transfer = true;
        let rows = vec![transfer, txn(Some("Groceries"), -1000)];

        let comparison = service.compare(&rows);
        assert_eq!(comparison.rows[0].spent, Money::from_cents(1000));
    }

    #[test]
    fn test_totals() {
        let budget = budget();
        let service = BudgetService::new(&budget);
        let rows = vec![txn(Some("Groceries"), -10000), txn(Some("Dining"), -5000)];

        let comparison = service.compare(&rows);
        assert_eq!(comparison.total_planned(), Money::from_cents(55000));
        assert_eq!(comparison.total_spent(), Money::from_cents(15000));
        assert_eq!(comparison.total_variance(), Money::from_cents(40000));
    }
}

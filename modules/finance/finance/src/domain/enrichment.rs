//! Joins transactions with their category and fund.

use std::collections::HashMap;

use finance_sdk::{Category, EnrichedTransaction, FinancialTransaction, Fund};
use uuid::Uuid;

/// Lookup tables of one tenant's catalog.
pub struct CatalogIndex<'a> {
    funds: HashMap<Uuid, &'a Fund>,
    categories: HashMap<Uuid, &'a Category>,
}

impl<'a> CatalogIndex<'a> {
    #[must_use]
    pub fn new(funds: &'a [Fund], categories: &'a [Category]) -> Self {
        Self {
            funds: funds.iter().map(|f| (f.id, f)).collect(),
            categories: categories.iter().map(|c| (c.id, c)).collect(),
        }
    }

    #[must_use]
    pub fn enrich(&self, transaction: FinancialTransaction) -> EnrichedTransaction {
        let category = transaction
            .category_id
            .and_then(|id| self.categories.get(&id).copied());
        let fund = transaction
            .fund_id
            .and_then(|id| self.funds.get(&id).copied());

        EnrichedTransaction {
            category_name: category.map(|c| c.name.clone()),
            category_code: category.map(|c| c.code.clone()),
            fund_name: fund.map(|f| f.name.clone()),
            fund_code: fund.map(|f| f.code.clone()),
            transaction,
        }
    }

    #[must_use]
    pub fn enrich_all(&self, transactions: Vec<FinancialTransaction>) -> Vec<EnrichedTransaction> {
        transactions.into_iter().map(|t| self.enrich(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use finance_sdk::{TransactionStatus, TransactionType};
    use rust_decimal::Decimal;

    fn transaction(category_id: Option<Uuid>, fund_id: Option<Uuid>) -> FinancialTransaction {
        let now = Utc::now();
        FinancialTransaction {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            transaction_number: "TX-000001".to_owned(),
            transaction_type: TransactionType::Expense,
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            description: "Electricity bill".to_owned(),
            amount: Decimal::new(8900, 2),
            category_id,
            fund_id,
            status: TransactionStatus::Draft,
            created_by: Uuid::new_v4(),
            updated_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_enrich_joins_names_and_codes() {
        let tenant_id = Uuid::new_v4();
        let fund = Fund {
            id: Uuid::new_v4(),
            tenant_id,
            code: "general".to_owned(),
            name: "General Fund".to_owned(),
            description: String::new(),
            is_system: true,
            is_active: true,
        };
        let category = Category {
            id: Uuid::new_v4(),
            tenant_id,
            code: "utilities".to_owned(),
            name: "Utilities".to_owned(),
            category_type: TransactionType::Expense,
            is_system: true,
            is_active: true,
        };
        let funds = [fund.clone()];
        let categories = [category.clone()];
        let index = CatalogIndex::new(&funds, &categories);

        let enriched = index.enrich(transaction(Some(category.id), Some(fund.id)));

        assert_eq!(enriched.category_name.as_deref(), Some("Utilities"));
        assert_eq!(enriched.category_code.as_deref(), Some("utilities"));
        assert_eq!(enriched.fund_name.as_deref(), Some("General Fund"));
        assert_eq!(enriched.fund_code.as_deref(), Some("general"));
    }

    #[test]
    fn test_enrich_leaves_unset_and_dangling_references_empty() {
        let index = CatalogIndex::new(&[], &[]);

        let unset = index.enrich(transaction(None, None));
        let dangling = index.enrich(transaction(Some(Uuid::new_v4()), Some(Uuid::new_v4())));

        assert!(unset.category_name.is_none() && unset.fund_name.is_none());
        assert!(dangling.category_code.is_none() && dangling.fund_code.is_none());
        assert!(dangling.transaction.category_id.is_some());
    }
}

//! Public models for the finance module.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("unknown transaction type '{other}'")),
        }
    }
}

/// Lifecycle of a transaction.
///
/// `Draft -> Submitted -> Approved -> Posted`; `Voided` is reachable from
/// every state after `Draft`. `Posted` only moves to `Voided`, and `Voided`
/// is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Draft,
    Submitted,
    Approved,
    Posted,
    Voided,
}

impl TransactionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Posted => "posted",
            Self::Voided => "voided",
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Submitted)
                | (Self::Submitted, Self::Approved)
                | (Self::Approved, Self::Posted)
                | (Self::Submitted | Self::Approved | Self::Posted, Self::Voided)
        )
    }

    /// Only drafts may be edited or deleted.
    #[must_use]
    pub fn is_editable(self) -> bool {
        self == Self::Draft
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "approved" => Ok(Self::Approved),
            "posted" => Ok(Self::Posted),
            "voided" => Ok(Self::Voided),
            other => Err(format!("unknown transaction status '{other}'")),
        }
    }
}

/// A financial transaction row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialTransaction {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// `TX-000001` style, sequential per tenant.
    pub transaction_number: String,
    pub transaction_type: TransactionType,
    pub transaction_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category_id: Option<Uuid>,
    pub fund_id: Option<Uuid>,
    pub status: TransactionStatus,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fund {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub code: String,
    pub name: String,
    pub description: String,
    pub is_system: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub code: String,
    pub name: String,
    pub category_type: TransactionType,
    pub is_system: bool,
    pub is_active: bool,
}

/// A transaction joined with the names and codes of its category and fund.
///
/// The joined fields are `None` when the reference is unset or points to a
/// record that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedTransaction {
    #[serde(flatten)]
    pub transaction: FinancialTransaction,
    pub category_name: Option<String>,
    pub category_code: Option<String>,
    pub fund_name: Option<String>,
    pub fund_code: Option<String>,
}

/// Input for creating a draft transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub transaction_type: TransactionType,
    pub transaction_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category_id: Option<Uuid>,
    pub fund_id: Option<Uuid>,
}

/// Partial update of a draft transaction. `None` keeps the current value.
///
/// Category and fund use a nested option so they can be cleared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionPatch {
    pub transaction_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub category_id: Option<Option<Uuid>>,
    pub fund_id: Option<Option<Uuid>>,
}

impl TransactionPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transaction_date.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.category_id.is_none()
            && self.fund_id.is_none()
    }
}

/// Filter over the enriched transaction list. Unset fields match everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionQuery {
    pub status: Option<TransactionStatus>,
    pub transaction_type: Option<TransactionType>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub fund_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    /// Case-insensitive match on transaction number or description.
    pub text: Option<String>,
}

impl TransactionQuery {
    #[must_use]
    pub fn matches(&self, tx: &EnrichedTransaction) -> bool {
        let t = &tx.transaction;
        if self.status.is_some_and(|s| s != t.status) {
            return false;
        }
        if self.transaction_type.is_some_and(|ty| ty != t.transaction_type) {
            return false;
        }
        if self.date_from.is_some_and(|from| t.transaction_date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| t.transaction_date > to) {
            return false;
        }
        if self.fund_id.is_some_and(|id| t.fund_id != Some(id)) {
            return false;
        }
        if self.category_id.is_some_and(|id| t.category_id != Some(id)) {
            return false;
        }
        if let Some(text) = self.text.as_deref().map(str::trim)
            && !text.is_empty()
        {
            let needle = text.to_lowercase();
            return t.transaction_number.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enriched(number: &str, description: &str, status: TransactionStatus) -> EnrichedTransaction {
        let now = Utc::now();
        EnrichedTransaction {
            transaction: FinancialTransaction {
                id: Uuid::new_v4(),
                tenant_id: Uuid::new_v4(),
                transaction_number: number.to_owned(),
                transaction_type: TransactionType::Income,
                transaction_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
                description: description.to_owned(),
                amount: Decimal::new(12550, 2),
                category_id: None,
                fund_id: None,
                status,
                created_by: Uuid::new_v4(),
                updated_by: Uuid::new_v4(),
                created_at: now,
                updated_at: now,
            },
            category_name: None,
            category_code: None,
            fund_name: None,
            fund_code: None,
        }
    }

    #[test]
    fn status_transitions() {
        use TransactionStatus::{Approved, Draft, Posted, Submitted, Voided};

        assert!(Draft.can_transition_to(Submitted));
        assert!(Submitted.can_transition_to(Approved));
        assert!(Approved.can_transition_to(Posted));
        assert!(Submitted.can_transition_to(Voided));
        assert!(Approved.can_transition_to(Voided));
        assert!(Posted.can_transition_to(Voided));

        assert!(!Draft.can_transition_to(Approved));
        assert!(!Draft.can_transition_to(Voided));
        assert!(!Posted.can_transition_to(Draft));
        assert!(!Voided.can_transition_to(Submitted));
        assert!(!Submitted.can_transition_to(Submitted));
    }

    #[test]
    fn only_drafts_are_editable() {
        assert!(TransactionStatus::Draft.is_editable());
        assert!(!TransactionStatus::Submitted.is_editable());
        assert!(!TransactionStatus::Posted.is_editable());
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            TransactionStatus::Draft,
            TransactionStatus::Submitted,
            TransactionStatus::Approved,
            TransactionStatus::Posted,
            TransactionStatus::Voided,
        ] {
            assert_eq!(status.as_str().parse::<TransactionStatus>(), Ok(status));
        }
        assert!("pending".parse::<TransactionStatus>().is_err());
    }

    #[test]
    fn query_text_matches_number_or_description() {
        let tx = enriched("TX-000042", "Sunday offering", TransactionStatus::Posted);

        let by_number = TransactionQuery {
            text: Some("tx-0000".to_owned()),
            ..TransactionQuery::default()
        };
        let by_description = TransactionQuery {
            text: Some("OFFERING".to_owned()),
            ..TransactionQuery::default()
        };
        let no_match = TransactionQuery {
            text: Some("utilities".to_owned()),
            ..TransactionQuery::default()
        };

        assert!(by_number.matches(&tx));
        assert!(by_description.matches(&tx));
        assert!(!no_match.matches(&tx));
    }

    #[test]
    fn query_filters_combine() {
        let tx = enriched("TX-000001", "Tithe", TransactionStatus::Draft);

        let matching = TransactionQuery {
            status: Some(TransactionStatus::Draft),
            transaction_type: Some(TransactionType::Income),
            date_from: NaiveDate::from_ymd_opt(2024, 3, 1),
            date_to: NaiveDate::from_ymd_opt(2024, 3, 31),
            ..TransactionQuery::default()
        };
        let wrong_status = TransactionQuery {
            status: Some(TransactionStatus::Posted),
            ..TransactionQuery::default()
        };
        let too_late = TransactionQuery {
            date_from: NaiveDate::from_ymd_opt(2024, 4, 1),
            ..TransactionQuery::default()
        };
        let other_fund = TransactionQuery {
            fund_id: Some(Uuid::new_v4()),
            ..TransactionQuery::default()
        };

        assert!(matching.matches(&tx));
        assert!(TransactionQuery::default().matches(&tx));
        assert!(!wrong_status.matches(&tx));
        assert!(!too_late.matches(&tx));
        assert!(!other_fund.matches(&tx));
    }

    #[test]
    fn enriched_transaction_serializes_flat() {
        let tx = enriched("TX-000007", "Rent", TransactionStatus::Approved);

        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["transaction_number"], "TX-000007");
        assert_eq!(json["status"], "approved");
        assert!(json["fund_name"].is_null());
    }
}

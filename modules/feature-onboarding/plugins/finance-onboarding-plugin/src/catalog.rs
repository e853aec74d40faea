//! Default finance catalog of a new tenant.

use finance::TransactionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultFund {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultCategory {
    pub code: &'static str,
    pub name: &'static str,
    pub category_type: TransactionType,
}

pub const FUNDS: [DefaultFund; 3] = [
    DefaultFund {
        code: "general",
        name: "General Fund",
        description: "Unrestricted operating fund",
    },
    DefaultFund {
        code: "building",
        name: "Building Fund",
        description: "Construction, renovation and property",
    },
    DefaultFund {
        code: "missions",
        name: "Missions Fund",
        description: "Outreach and mission support",
    },
];

pub const CATEGORIES: [DefaultCategory; 8] = [
    DefaultCategory {
        code: "tithes",
        name: "Tithes",
        category_type: TransactionType::Income,
    },
    DefaultCategory {
        code: "offerings",
        name: "Offerings",
        category_type: TransactionType::Income,
    },
    DefaultCategory {
        code: "donations",
        name: "Donations",
        category_type: TransactionType::Income,
    },
    DefaultCategory {
        code: "other_income",
        name: "Other Income",
        category_type: TransactionType::Income,
    },
    DefaultCategory {
        code: "salaries",
        name: "Salaries",
        category_type: TransactionType::Expense,
    },
    DefaultCategory {
        code: "utilities",
        name: "Utilities",
        category_type: TransactionType::Expense,
    },
    DefaultCategory {
        code: "ministry",
        name: "Ministry Expenses",
        category_type: TransactionType::Expense,
    },
    DefaultCategory {
        code: "maintenance",
        name: "Maintenance",
        category_type: TransactionType::Expense,
    },
];

#[must_use]
pub fn total_defaults() -> usize {
    FUNDS.len() + CATEGORIES.len()
}

//! Default membership catalog seeded for every new tenant.

use crate::repo::{SeedCategory, SeedDefinition};

pub const MEMBERSHIP_TYPES: [SeedDefinition; 5] = [
    SeedDefinition {
        code: "member",
        name: "Member",
        description: "Full member of the church",
        sort_order: 1,
    },
    SeedDefinition {
        code: "regular_attender",
        name: "Regular Attender",
        description: "Attends regularly but has not joined as a member",
        sort_order: 2,
    },
    SeedDefinition {
        code: "visitor",
        name: "Visitor",
        description: "First-time or occasional visitor",
        sort_order: 3,
    },
    SeedDefinition {
        code: "child",
        name: "Child",
        description: "Child of a member or attender family",
        sort_order: 4,
    },
    SeedDefinition {
        code: "inactive",
        name: "Inactive",
        description: "No longer actively attending",
        sort_order: 5,
    },
];

pub const MEMBERSHIP_STAGES: [SeedDefinition; 6] = [
    SeedDefinition {
        code: "first_contact",
        name: "First Contact",
        description: "Initial visit or contact with the church",
        sort_order: 1,
    },
    SeedDefinition {
        code: "follow_up",
        name: "Follow Up",
        description: "Being contacted after the first visit",
        sort_order: 2,
    },
    SeedDefinition {
        code: "connected",
        name: "Connected",
        description: "Attending a small group or ministry",
        sort_order: 3,
    },
    SeedDefinition {
        code: "membership_class",
        name: "Membership Class",
        description: "Enrolled in the membership class",
        sort_order: 4,
    },
    SeedDefinition {
        code: "member",
        name: "Member",
        description: "Completed the membership process",
        sort_order: 5,
    },
    SeedDefinition {
        code: "serving",
        name: "Serving",
        description: "Actively serving in a ministry",
        sort_order: 6,
    },
];

pub const DISCIPLESHIP_PATHWAYS: [SeedDefinition; 1] = [SeedDefinition {
    code: "foundations",
    name: "Foundations of Faith",
    description: "Core discipleship pathway for new believers and members",
    sort_order: 1,
}];

/// Defaults of one category, in seeding order.
#[must_use]
pub fn defaults(category: SeedCategory) -> &'static [SeedDefinition] {
    match category {
        SeedCategory::MembershipType => &MEMBERSHIP_TYPES,
        SeedCategory::MembershipStage => &MEMBERSHIP_STAGES,
        SeedCategory::DiscipleshipPathway => &DISCIPLESHIP_PATHWAYS,
    }
}

/// Number of records a fresh tenant receives.
#[must_use]
pub fn total_defaults() -> usize {
    SeedCategory::ALL.iter().map(|c| defaults(*c).len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique_within_each_category() {
        for category in SeedCategory::ALL {
            let codes: HashSet<_> = defaults(category).iter().map(|d| d.code).collect();
            assert_eq!(codes.len(), defaults(category).len(), "{category}");
        }
    }

    #[test]
    fn catalog_sizes() {
        assert_eq!(defaults(SeedCategory::MembershipType).len(), 5);
        assert_eq!(defaults(SeedCategory::MembershipStage).len(), 6);
        assert_eq!(defaults(SeedCategory::DiscipleshipPathway).len(), 1);
        assert_eq!(total_defaults(), 12);
    }
}

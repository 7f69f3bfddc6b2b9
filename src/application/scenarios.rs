use serde::Serialize;

/// A canned command batch that shows off one part of the rules.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub commands: &'static [&'static str],
    pub expected_outcome: &'static str,
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        id: "basic-operations",
        title: "Basic Banking Operations",
        description: "Create accounts, deposit money, and transfer between accounts",
        commands: &[
            "create checking 12345678 1.0",
            "deposit 12345678 1000",
            "create savings 87654321 2.5",
            "transfer 12345678 87654321 500",
        ],
        expected_outcome: "Checking account has $500, Savings account has $500",
    },
    Scenario {
        id: "apr-accrual",
        title: "APR Interest Accrual",
        description: "See how interest compounds monthly on savings",
        commands: &[
            "create savings 11111111 6.0",
            "deposit 11111111 1000",
            "pass 12",
        ],
        expected_outcome: "After 12 months, balance grows to ~$1061.68 with 6% APR",
    },
    Scenario {
        id: "cd-account",
        title: "Certificate of Deposit",
        description: "CD account with high APR and withdrawal restrictions",
        commands: &[
            "create cd 22222222 4.5 5000",
            "pass 12",
            "withdraw 22222222 1000",
        ],
        expected_outcome: "CD grows with quarterly compounding, can withdraw after 12 months",
    },
    Scenario {
        id: "minimum-balance-fee",
        title: "Minimum Balance Fees",
        description: "Accounts under $100 are charged $25 monthly fee",
        commands: &[
            "create checking 33333333 1.0",
            "deposit 33333333 75",
            "pass 1",
        ],
        expected_outcome: "$75 - $25 fee = $50, then APR applied",
    },
    Scenario {
        id: "account-closure",
        title: "Zero Balance Account Closure",
        description: "Accounts with $0 are automatically closed",
        commands: &[
            "create checking 44444444 1.0",
            "deposit 44444444 20",
            "pass 1",
        ],
        expected_outcome: "Account closed due to $0 balance after fee",
    },
    Scenario {
        id: "complex-scenario",
        title: "Complete Banking Flow",
        description: "Multiple accounts with deposits, transfers, and time passage",
        commands: &[
            "create checking 10000001 1.0",
            "create savings 10000002 3.5",
            "deposit 10000001 1000",
            "deposit 10000002 1500",
            "transfer 10000001 10000002 400",
            "withdraw 10000002 200",
            "pass 3",
        ],
        expected_outcome: "Complex multi-account scenario with full transaction history",
    },
];

/// Syntax help for one command keyword, with ready-to-run examples.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CommandTemplate {
    pub command: &'static str,
    pub templates: &'static [&'static str],
    pub examples: &'static [&'static str],
}

pub const COMMAND_TEMPLATES: &[CommandTemplate] = &[
    CommandTemplate {
        command: "create",
        templates: &[
            "create checking [8-digit-id] [apr]",
            "create savings [8-digit-id] [apr]",
            "create cd [8-digit-id] [apr] [balance]",
        ],
        examples: &[
            "create checking 12345678 1.0",
            "create savings 87654321 2.5",
            "create cd 11111111 4.5 5000",
        ],
    },
    CommandTemplate {
        command: "deposit",
        templates: &["deposit [account-id] [amount]"],
        examples: &["deposit 12345678 500", "deposit 87654321 1000"],
    },
    CommandTemplate {
        command: "withdraw",
        templates: &["withdraw [account-id] [amount]"],
        examples: &["withdraw 12345678 300", "withdraw 87654321 500"],
    },
    CommandTemplate {
        command: "transfer",
        templates: &["transfer [from-id] [to-id] [amount]"],
        examples: &["transfer 12345678 87654321 200"],
    },
    CommandTemplate {
        command: "pass",
        templates: &["pass [months]"],
        examples: &["pass 1", "pass 12", "pass 60"],
    },
];

pub fn find(id: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|scenario| scenario.id == id)
}

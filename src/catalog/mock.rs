//! Fixed catalog and identity data for deployments without a remote service.
//!
//! Pure functions, no state; used whenever the auth mode is MOCK.

use super::{CatalogNode, Identity, IdentityKind, ObjectKind, WorkspaceEntry};

/// The fixed demo tree: one catalog, one schema, two tables.
pub fn catalogs() -> Vec<CatalogNode> {
    let mut transactions = CatalogNode::new("tbl_transactions", "transactions", ObjectKind::Table);
    transactions.parent_id = Some("sch_finance".to_string());
    let mut budget = CatalogNode::new("tbl_budget", "budget", ObjectKind::Table);
    budget.parent_id = Some("sch_finance".to_string());

    let mut finance = CatalogNode::new("sch_finance", "finance", ObjectKind::Schema);
    finance.parent_id = Some("cat_main".to_string());
    finance.children = vec![transactions, budget];

    let mut main = CatalogNode::new("cat_main", "main_catalog", ObjectKind::Catalog);
    main.children = vec![finance];

    vec![main]
}

/// The fixed identity list shown in requester/approver pickers.
pub fn identities() -> Vec<Identity> {
    vec![
        Identity {
            id: "user_alice".to_string(),
            display_name: "Alice Admin".to_string(),
            email: Some("alice@example.com".to_string()),
            kind: IdentityKind::User,
        },
        Identity {
            id: "user_bob".to_string(),
            display_name: "Bob Buyer".to_string(),
            email: Some("bob@example.com".to_string()),
            kind: IdentityKind::User,
        },
        Identity {
            id: "group_finance".to_string(),
            display_name: "Finance Team".to_string(),
            email: None,
            kind: IdentityKind::Group,
        },
    ]
}

/// One fixed mock workspace.
pub fn workspaces() -> Vec<WorkspaceEntry> {
    vec![WorkspaceEntry {
        id: "ws_mock".to_string(),
        name: "Mock Workspace".to_string(),
        url: "https://mock.workspace.invalid".to_string(),
    }]
}

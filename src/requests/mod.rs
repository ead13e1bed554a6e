//! Access-request records and their status state machine.

pub mod store;
pub mod workflow;

pub use store::RequestStore;
pub use workflow::AccessWorkflow;

use crate::catalog::ObjectKind;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Review status of a request.
///
/// PENDING is the only non-terminal state: `PENDING -> APPROVED` and
/// `PENDING -> REJECTED` are the two legal transitions, with no reversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        self != RequestStatus::Pending
    }
}

/// One access request against a single catalog object.
///
/// Records are mutated only to flip `status` and are never deleted. The
/// persisted collection is ordered newest-first by insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequest {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub object_id: String,
    pub object_name: String,
    #[serde(rename = "objectType")]
    pub object_kind: ObjectKind,
    pub permissions: BTreeSet<String>,
    pub status: RequestStatus,
    pub justification: String,
    /// Submission time, epoch milliseconds.
    pub timestamp: i64,
}

impl AccessRequest {
    /// Flip the status, refusing transitions out of a terminal state.
    pub(crate) fn transition(&mut self, to: RequestStatus) -> Result<(), ApiError> {
        if self.status.is_terminal() {
            return Err(ApiError::InvalidTransition {
                id: self.id.clone(),
                from: self.status,
            });
        }
        self.status = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(status: RequestStatus) -> AccessRequest {
        AccessRequest {
            id: "REQ-1".to_string(),
            user_id: "user_alice".to_string(),
            user_name: "Alice Admin".to_string(),
            object_id: "tbl_budget".to_string(),
            object_name: "budget".to_string(),
            object_kind: ObjectKind::Table,
            permissions: BTreeSet::from(["SELECT".to_string()]),
            status,
            justification: "quarter close".to_string(),
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_pending_can_move_to_either_terminal_state() {
        let mut req = request(RequestStatus::Pending);
        assert!(req.transition(RequestStatus::Approved).is_ok());
        assert_eq!(req.status, RequestStatus::Approved);

        let mut req = request(RequestStatus::Pending);
        assert!(req.transition(RequestStatus::Rejected).is_ok());
        assert_eq!(req.status, RequestStatus::Rejected);
    }

    #[test]
    fn test_terminal_states_refuse_transitions() {
        for from in [RequestStatus::Approved, RequestStatus::Rejected] {
            for to in [RequestStatus::Approved, RequestStatus::Rejected] {
                let mut req = request(from);
                match req.transition(to) {
                    Err(ApiError::InvalidTransition { id, from: got }) => {
                        assert_eq!(id, "REQ-1");
                        assert_eq!(got, from);
                    }
                    other => panic!("expected InvalidTransition, got {:?}", other),
                }
                assert_eq!(req.status, from);
            }
        }
    }

    #[test]
    fn test_wire_keys_match_contract() {
        let value = serde_json::to_value(request(RequestStatus::Pending)).unwrap();
        assert_eq!(value["userId"], "user_alice");
        assert_eq!(value["objectType"], "TABLE");
        assert_eq!(value["status"], "PENDING");
        assert_eq!(value["permissions"], serde_json::json!(["SELECT"]));
        assert_eq!(value["timestamp"], 1_700_000_000_000i64);
    }
}

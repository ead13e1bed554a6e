//! Submission and review orchestration over the request store.

use super::{AccessRequest, RequestStatus, RequestStore};
use crate::catalog::{CatalogNode, Identity};
use crate::error::ApiError;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicI64, Ordering};

/// Generates `REQ-{millis}` ids with a monotonic floor.
///
/// Wall-clock millis alone collide when several records are created in one
/// submission; the floor guarantees strictly increasing ids per process.
struct RequestIdGenerator {
    last: AtomicI64,
}

impl RequestIdGenerator {
    fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    fn next(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last
                .compare_exchange(prev, candidate, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return format!("REQ-{}", candidate),
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Orchestrates the request lifecycle: submit, approve, reject.
///
/// Every mutation runs a read-modify-write of the full collection under one
/// internal mutex, which is the in-process single-writer serialization
/// point. Writers in other processes are not serialized (last writer wins).
pub struct AccessWorkflow {
    store: RequestStore,
    ids: RequestIdGenerator,
    write_lock: Mutex<()>,
}

impl AccessWorkflow {
    pub fn new(store: RequestStore) -> Self {
        Self {
            store,
            ids: RequestIdGenerator::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// File one PENDING request per selected node, newest-first.
    ///
    /// The only validated input is the selection itself; empty permission
    /// sets and blank justifications are accepted. Returns the created
    /// records in selection order.
    pub fn submit(
        &self,
        nodes: &[CatalogNode],
        permissions: &BTreeSet<String>,
        justification: &str,
        requester: &Identity,
    ) -> Result<Vec<AccessRequest>, ApiError> {
        if nodes.is_empty() {
            return Err(ApiError::ValidationError(
                "Select at least one data object".to_string(),
            ));
        }

        let _guard = self.write_lock.lock();
        let existing = self.store.fetch_all();
        let timestamp = Utc::now().timestamp_millis();

        let created: Vec<AccessRequest> = nodes
            .iter()
            .map(|node| AccessRequest {
                id: self.ids.next(),
                user_id: requester.id.clone(),
                user_name: requester.display_name.clone(),
                object_id: node.id.clone(),
                object_name: node.name.clone(),
                object_kind: node.kind,
                permissions: permissions.clone(),
                status: RequestStatus::Pending,
                justification: justification.to_string(),
                timestamp,
            })
            .collect();

        let mut updated = created.clone();
        updated.extend(existing);
        self.store.save_all(&updated)?;
        Ok(created)
    }

    /// Approve a pending request by id.
    pub fn approve(&self, request_id: &str) -> Result<AccessRequest, ApiError> {
        self.resolve(request_id, RequestStatus::Approved)
    }

    /// Reject a pending request by id.
    pub fn reject(&self, request_id: &str) -> Result<AccessRequest, ApiError> {
        self.resolve(request_id, RequestStatus::Rejected)
    }

    fn resolve(&self, request_id: &str, verdict: RequestStatus) -> Result<AccessRequest, ApiError> {
        let _guard = self.write_lock.lock();
        let mut all = self.store.fetch_all();
        let request = all
            .iter_mut()
            .find(|r| r.id == request_id)
            .ok_or_else(|| ApiError::ValidationError(format!("Unknown request id: {}", request_id)))?;

        request.transition(verdict)?;
        let updated = request.clone();
        self.store.save_all(&all)?;
        Ok(updated)
    }

    /// The full collection, newest-first.
    pub fn list(&self) -> Vec<AccessRequest> {
        self.store.fetch_all()
    }

    /// Number of requests still awaiting review.
    pub fn pending_count(&self) -> usize {
        self.store
            .fetch_all()
            .iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .count()
    }
}

//! # Request Ledger Service


use crate::domain::errors::LedgerError;
use crate::domain::keys::KeyPrefix;
use bf_01_validator::MAX_REASON_LENGTH;
use shared_store::{
    decode, encode, BatchOperation, KVStoreError, KeyValueStore, Precondition, StoreHandle,
};
use shared_types::{
    BonafideRequest, Identity, IdentityId, RequestId, RequestStatus, RequestSummary, TimeSource,
};
use std::sync::Arc;

/// Compare-and-swap retries before a transition gives up.
///
/// A record only changes through a transition, and every transition out of
/// `pending` is terminal, so a lost race is settled by the first re-read.
pub const MAX_TRANSITION_ATTEMPTS: usize = 3;

/// The bonafide request ledger.
#[derive(Clone)]
pub struct RequestLedger {
    store: StoreHandle,
    time_source: Arc<dyn TimeSource>,
}

impl RequestLedger {
    pub fn new(store: StoreHandle, time_source: Arc<dyn TimeSource>) -> Self {
        Self { store, time_source }
    }

    /// Open a pending request for `identity`.
    ///
    /// Fails with [`LedgerError::AlreadyPending`] when the identity's pending
    /// projection key exists. The check and the three writes are one atomic
    /// batch, so concurrent submissions for one identity admit exactly one.
    pub async fn submit(
        &self,
        identity: &Identity,
        reason: &str,
    ) -> Result<BonafideRequest, LedgerError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(LedgerError::EmptyReason);
        }
        if reason.chars().count() > MAX_REASON_LENGTH {
            return Err(LedgerError::ReasonTooLong {
                max: MAX_REASON_LENGTH,
            });
        }

        let request = BonafideRequest {
            id: RequestId::new(),
            identity_id: identity.id,
            student_name: identity.full_name(),
            identifier: identity.identifier.clone(),
            department: identity.department.clone(),
            reason: reason.to_owned(),
            status: RequestStatus::Pending,
            created_at: self.time_source.now(),
            resolved_at: None,
            document_ref: None,
        };

        let pending_key = KeyPrefix::pending_key(&identity.id);
        let id_value = encode(&request.id)?;

        let result = self
            .store
            .conditional_batch_write(
                vec![Precondition::absent(pending_key.clone())],
                vec![
                    BatchOperation::put(KeyPrefix::request_key(&request.id), encode(&request)?),
                    BatchOperation::put(KeyPrefix::history_key(&request), id_value.clone()),
                    BatchOperation::put(pending_key, id_value),
                ],
            )
            .await;

        match result {
            Ok(()) => {
                tracing::info!(
                    subsystem = "bf-04",
                    request_id = %request.id,
                    identity_id = %identity.id,
                    "Bonafide request submitted"
                );
                Ok(request)
            }
            Err(KVStoreError::ConditionFailed { .. }) => {
                tracing::info!(
                    subsystem = "bf-04",
                    identity_id = %identity.id,
                    "Submission rejected: request already pending"
                );
                Err(LedgerError::AlreadyPending)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Every request of `identity`, newest first. Empty is a valid answer.
    pub async fn list_for(&self, identity: IdentityId) -> Result<Vec<BonafideRequest>, LedgerError> {
        let prefix = KeyPrefix::identity_prefix(&identity);
        let mut requests = self
            .store
            .run(move |kv| {
                kv.prefix_scan(&prefix)?
                    .into_iter()
                    .map(|(_, id_bytes)| {
                        let id: RequestId = decode(&id_bytes)?;
                        load(kv, &id)?.ok_or_else(|| {
                            KVStoreError::corruption(format!("history points at missing request {}", id))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .await?;

        // history keys ascend by (created_at, id)
        requests.reverse();
        Ok(requests)
    }

    /// Move a pending request to a terminal status.
    ///
    /// Approval requires a non-empty `document_ref`; a rejection drops any
    /// reference supplied. The write is conditional on the stored record
    /// being byte-for-byte what was read, and removes the pending projection
    /// in the same batch. Of several concurrent transitions exactly one
    /// wins; the others re-read a terminal status and fail with
    /// [`LedgerError::InvalidTransition`].
    pub async fn transition(
        &self,
        id: RequestId,
        new_status: RequestStatus,
        document_ref: Option<String>,
    ) -> Result<BonafideRequest, LedgerError> {
        let document_ref = document_ref
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());

        for attempt in 1..=MAX_TRANSITION_ATTEMPTS {
            let (current_bytes, current) = self.read(id).await?.ok_or(LedgerError::NotFound(id))?;

            if !current.status.can_transition_to(new_status) {
                tracing::info!(
                    subsystem = "bf-04",
                    request_id = %id,
                    from = %current.status,
                    to = %new_status,
                    "Transition rejected"
                );
                return Err(LedgerError::InvalidTransition {
                    from: current.status,
                    to: new_status,
                });
            }

            let document_ref = match new_status {
                RequestStatus::Approved => {
                    Some(document_ref.clone().ok_or(LedgerError::MissingDocumentRef)?)
                }
                _ => None,
            };

            let updated = BonafideRequest {
                status: new_status,
                resolved_at: Some(self.time_source.now()),
                document_ref,
                ..current
            };

            let request_key = KeyPrefix::request_key(&id);
            let result = self
                .store
                .conditional_batch_write(
                    vec![Precondition::equals(request_key.clone(), current_bytes)],
                    vec![
                        BatchOperation::put(request_key, encode(&updated)?),
                        BatchOperation::delete(KeyPrefix::pending_key(&updated.identity_id)),
                    ],
                )
                .await;

            match result {
                Ok(()) => {
                    tracing::info!(
                        subsystem = "bf-04",
                        request_id = %id,
                        status = %new_status,
                        "Bonafide request resolved"
                    );
                    return Ok(updated);
                }
                Err(KVStoreError::ConditionFailed { .. }) => {
                    tracing::debug!(subsystem = "bf-04", request_id = %id, attempt, "Transition lost race, re-reading");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(LedgerError::Store(KVStoreError::Busy {
            message: format!("request {} kept changing during transition", id),
        }))
    }

    pub async fn get(&self, id: RequestId) -> Result<BonafideRequest, LedgerError> {
        self.read(id)
            .await?
            .map(|(_, request)| request)
            .ok_or(LedgerError::NotFound(id))
    }

    /// Dashboard counts for one identity.
    pub async fn summary_for(&self, identity: IdentityId) -> Result<RequestSummary, LedgerError> {
        let requests = self.list_for(identity).await?;
        Ok(RequestSummary::from_requests(&requests))
    }

    /// Administrative queue, oldest first, optionally filtered by status.
    pub async fn list_all(
        &self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<BonafideRequest>, LedgerError> {
        let mut requests = self
            .store
            .run(move |kv| {
                kv.prefix_scan(KeyPrefix::Request.as_bytes())?
                    .into_iter()
                    .map(|(_, bytes)| decode::<BonafideRequest>(&bytes))
                    .filter(|decoded| match (decoded, status) {
                        (Ok(request), Some(wanted)) => request.status == wanted,
                        _ => true,
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .await?;

        requests.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(requests)
    }

    async fn read(&self, id: RequestId) -> Result<Option<(Vec<u8>, BonafideRequest)>, LedgerError> {
        match self.store.get(KeyPrefix::request_key(&id)).await? {
            Some(bytes) => {
                let request = decode(&bytes)?;
                Ok(Some((bytes, request)))
            }
            None => Ok(None),
        }
    }
}

fn load(kv: &dyn KeyValueStore, id: &RequestId) -> Result<Option<BonafideRequest>, KVStoreError> {
    kv.get(&KeyPrefix::request_key(id))?
        .map(|bytes| decode(&bytes))
        .transpose()
}

use std::collections::BTreeSet;

use async_trait::async_trait;
use kinograph_model::{FriendshipStatus, UserId};

use crate::error::Result;

/// Directed friendship edges with the request/confirm/cancel state machine.
///
/// At most one edge exists per ordered pair; `(a, b)` and `(b, a)` are
/// independent. Lifecycle per edge: absent, then `Unconfirmed` on request,
/// then `Confirmed` on approval, with cancellation deleting the edge from
/// either state.
#[async_trait]
pub trait FriendshipRepository: Send + Sync {
    /// Inserts an `Unconfirmed` edge. The caller guarantees both users
    /// exist and that the edge is absent.
    async fn send_request(&self, requester_id: UserId, receiver_id: UserId) -> Result<()>;

    /// Transitions the edge to `Confirmed`. Fails with `NotFound` when no
    /// such edge exists; re-confirming a confirmed edge is a no-op.
    async fn confirm(&self, requester_id: UserId, receiver_id: UserId) -> Result<()>;

    /// Deletes the directed edge regardless of status. Returns whether an
    /// edge was actually removed; absence is not an error.
    async fn cancel(&self, user_id: UserId, friend_id: UserId) -> Result<bool>;

    /// Ids of all outgoing edges, in any status.
    async fn friend_ids(&self, user_id: UserId) -> Result<BTreeSet<UserId>>;

    async fn exists(&self, requester_id: UserId, receiver_id: UserId) -> Result<bool>;

    async fn status_of(
        &self,
        requester_id: UserId,
        receiver_id: UserId,
    ) -> Result<Option<FriendshipStatus>>;
}

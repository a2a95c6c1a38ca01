use futures::future::{AbortHandle, AbortRegistration};
use tokio::sync::Mutex;

/// Tracks at most one outstanding remote request.
///
/// Starting a new request supersedes tracking of the previous one; the
/// superseded network call is not guaranteed to stop, it just can no
/// longer be cancelled from here. Cancellation is caller-initiated,
/// never time-based.
pub struct RequestSlot {
    inner: Mutex<SlotState>,
}

struct SlotState {
    seq: u64,
    handle: Option<AbortHandle>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SlotState {
                seq: 0,
                handle: None,
            }),
        }
    }

    /// Claim the slot for a new request. The returned sequence number
    /// identifies this claim; the registration aborts with the slot.
    pub async fn begin(&self) -> (u64, AbortRegistration) {
        let mut state = self.inner.lock().await;
        state.seq += 1;
        let (handle, registration) = AbortHandle::new_pair();
        state.handle = Some(handle);
        (state.seq, registration)
    }

    /// Release the slot, unless a newer request already claimed it.
    pub async fn finish(&self, seq: u64) {
        let mut state = self.inner.lock().await;
        if state.seq == seq {
            state.handle = None;
        }
    }

    /// Abort whichever request currently holds the slot, if any.
    pub async fn cancel(&self) {
        let mut state = self.inner.lock().await;
        if let Some(handle) = state.handle.take() {
            handle.abort();
        }
    }

    pub async fn is_busy(&self) -> bool {
        self.inner.lock().await.handle.is_some()
    }
}

impl Default for RequestSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::{Abortable, Aborted};

    #[tokio::test]
    async fn test_cancel_aborts_the_tracked_request() {
        let slot = RequestSlot::new();
        let (_, registration) = slot.begin().await;
        let fut = Abortable::new(std::future::pending::<()>(), registration);

        slot.cancel().await;
        assert_eq!(fut.await, Err(Aborted));
        assert!(!slot.is_busy().await);
    }

    #[tokio::test]
    async fn test_new_request_supersedes_previous_tracking() {
        let slot = RequestSlot::new();
        let (first_seq, first_reg) = slot.begin().await;
        let first = Abortable::new(std::future::pending::<()>(), first_reg);

        let (_, second_reg) = slot.begin().await;
        let second = Abortable::new(async { 7 }, second_reg);

        // cancelling now hits only the second request
        slot.cancel().await;
        assert_eq!(second.await, Err(Aborted));

        // the first request is no longer tracked, and finishing it must
        // not clear a newer claim
        slot.finish(first_seq).await;
        drop(first);
    }

    #[tokio::test]
    async fn test_finish_releases_only_own_claim() {
        let slot = RequestSlot::new();
        let (first_seq, _reg) = slot.begin().await;
        let (_second_seq, _reg2) = slot.begin().await;

        slot.finish(first_seq).await;
        assert!(slot.is_busy().await);
    }
}

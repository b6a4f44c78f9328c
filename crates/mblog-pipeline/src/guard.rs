//! Dedup guard for in-flight derivations.

use std::collections::HashSet;

use parking_lot::Mutex;

use mblog_models::MediaId;

/// Set of identifiers currently mid-derivation.
///
/// Prevents two worker cycles from deriving the same identifier at
/// once. Membership is held through a [`GuardToken`] so release
/// happens on every exit path, including early returns.
#[derive(Debug, Default)]
pub struct ProcessingGuard {
    inner: Mutex<HashSet<MediaId>>,
}

impl ProcessingGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an identifier for processing.
    ///
    /// Returns `None` if it is already mid-derivation; the caller
    /// drops the item in that case (no re-enqueue).
    pub fn begin(&self, id: &MediaId) -> Option<GuardToken<'_>> {
        if self.inner.lock().insert(id.clone()) {
            Some(GuardToken {
                guard: self,
                id: id.clone(),
            })
        } else {
            None
        }
    }

    /// Whether an identifier is currently mid-derivation.
    pub fn is_processing(&self, id: &MediaId) -> bool {
        self.inner.lock().contains(id)
    }

    fn finish(&self, id: &MediaId) {
        self.inner.lock().remove(id);
    }
}

/// Membership token; dropping it releases the identifier.
#[derive(Debug)]
pub struct GuardToken<'a> {
    guard: &'a ProcessingGuard,
    id: MediaId,
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.guard.finish(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_rejected_while_held() {
        let guard = ProcessingGuard::new();
        let id = MediaId::from_string("a");

        let token = guard.begin(&id).unwrap();
        assert!(guard.begin(&id).is_none());
        assert!(guard.is_processing(&id));

        drop(token);
        assert!(!guard.is_processing(&id));
        assert!(guard.begin(&id).is_some());
    }

    #[test]
    fn token_releases_on_early_exit() {
        let guard = ProcessingGuard::new();
        let id = MediaId::from_string("a");

        fn failing_cycle(guard: &ProcessingGuard, id: &MediaId) -> Result<(), ()> {
            let _token = guard.begin(id).ok_or(())?;
            Err(())
        }

        assert!(failing_cycle(&guard, &id).is_err());
        assert!(!guard.is_processing(&id));
    }

    #[test]
    fn distinct_ids_do_not_interfere() {
        let guard = ProcessingGuard::new();
        let a = MediaId::from_string("a");
        let b = MediaId::from_string("b");

        let _ta = guard.begin(&a).unwrap();
        let _tb = guard.begin(&b).unwrap();
        assert!(guard.is_processing(&a));
        assert!(guard.is_processing(&b));
    }
}

use alloc::vec::Vec;

use crate::ObserveOptions;
use crate::VisibilityEntry;
use crate::key::{KeyMap, SectionKey};

/// A live observation handed out by a [`VisibilityObserver`].
pub trait Subscription {
    /// Stops delivery for this target. Called exactly once per subscription.
    fn cancel(self);
}

/// The host's intersection observation capability.
///
/// Implementations deliver batches of [`VisibilityEntry`] tagged with the `id` passed here,
/// asynchronously and repeatedly as visibility crosses one of `options.thresholds`.
pub trait VisibilityObserver<K> {
    /// The host's handle for a region (a DOM element, a widget id, a layout rect, ...).
    type Target;
    type Subscription: Subscription;

    fn observe(
        &mut self,
        id: &K,
        target: Self::Target,
        options: &ObserveOptions,
    ) -> Self::Subscription;
}

/// Keeps at most one live subscription per section id.
///
/// This mirrors the "ref callback" pattern of UI frameworks: every render may call
/// [`ObserverRegistry::observe`] again with a fresh target (or `None` when the region went away)
/// and the registry makes sure the previous observation is cancelled first. Dropping the
/// registry cancels everything it still holds.
pub struct ObserverRegistry<K, O: VisibilityObserver<K>> {
    observer: O,
    options: ObserveOptions,
    subscriptions: KeyMap<K, O::Subscription>,
    disposed: bool,
}

impl<K: SectionKey, O: VisibilityObserver<K>> ObserverRegistry<K, O> {
    pub fn new(observer: O, options: ObserveOptions) -> Self {
        Self {
            observer,
            options,
            subscriptions: KeyMap::new(),
            disposed: false,
        }
    }

    pub fn options(&self) -> &ObserveOptions {
        &self.options
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn is_observing(&self, id: &K) -> bool {
        self.subscriptions.contains_key(id)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Registers `target` for `id`, or unregisters `id` when `target` is `None`.
    ///
    /// Any previous subscription for `id` is cancelled before the new one is created. Returns
    /// `true` when `id` is observed afterwards. After [`ObserverRegistry::dispose`] this is a
    /// no-op returning `false`.
    pub fn observe(&mut self, id: K, target: Option<O::Target>) -> bool {
        if self.disposed {
            vtrace!("ObserverRegistry: observe after dispose ignored");
            return false;
        }
        if let Some(previous) = self.subscriptions.remove(&id) {
            previous.cancel();
        }
        let Some(target) = target else {
            return false;
        };
        let subscription = self.observer.observe(&id, target, &self.options);
        self.subscriptions.insert(id, subscription);
        true
    }

    /// Cancels the subscription for `id`. Returns `true` if one existed.
    pub fn unobserve(&mut self, id: &K) -> bool {
        match self.subscriptions.remove(id) {
            Some(subscription) => {
                subscription.cancel();
                true
            }
            None => false,
        }
    }

    /// Drops entries for ids that are no longer observed.
    ///
    /// A host may still deliver a batch that was queued before a region was unregistered; those
    /// entries must not influence the tracker.
    pub fn retain_observed(&self, entries: &mut Vec<VisibilityEntry<K>>) {
        entries.retain(|e| self.subscriptions.contains_key(&e.id));
    }

    /// Cancels every subscription. Further `observe` calls are ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        vdebug!(live = self.subscriptions.len(), "ObserverRegistry::dispose");
        self.disposed = true;
        self.cancel_all();
    }
}

impl<K, O: VisibilityObserver<K>> ObserverRegistry<K, O> {
    fn cancel_all(&mut self) {
        for (_, subscription) in core::mem::take(&mut self.subscriptions) {
            subscription.cancel();
        }
    }
}

impl<K, O: VisibilityObserver<K>> Drop for ObserverRegistry<K, O> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

impl<K, O: VisibilityObserver<K>> core::fmt::Debug for ObserverRegistry<K, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("options", &self.options)
            .field("live", &self.subscriptions.len())
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    next_id: u64,
    listeners: Vec<(u64, Listener<E>)>,
}

/// Listeners interested in changes of one collection.
///
/// Delivery is synchronous and follows subscription order. The registry is not
/// locked while listeners run, so a listener may subscribe or drop handles.
pub struct Observers<E> {
    registry: Arc<Mutex<Registry<E>>>,
}

impl<E: 'static> Observers<E> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Registers `listener` until the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = {
            let mut registry = lock(&self.registry);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, Arc::new(listener)));
            id
        };

        let weak: Weak<Mutex<Registry<E>>> = Arc::downgrade(&self.registry);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    lock(&registry).listeners.retain(|(other, _)| *other != id);
                }
            })),
        }
    }

    pub fn notify(&self, event: &E) {
        let listeners: Vec<Listener<E>> = lock(&self.registry)
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.registry).listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: 'static> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<E>(registry: &Mutex<Registry<E>>) -> MutexGuard<'_, Registry<E>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle returned by `subscribe`. The listener is removed when it is dropped.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Keeps the listener registered for as long as the collection lives.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn delivers_in_subscription_order() {
        let observers: Observers<u32> = Observers::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let seen = Arc::clone(&seen);
            observers.subscribe(move |v| seen.lock().unwrap().push(("first", *v)))
        };
        let second = {
            let seen = Arc::clone(&seen);
            observers.subscribe(move |v| seen.lock().unwrap().push(("second", *v)))
        };

        observers.notify(&7);

        assert_eq!(*seen.lock().unwrap(), vec![("first", 7), ("second", 7)]);
        drop((first, second));
    }

    #[test]
    fn dropping_handle_unsubscribes() {
        let observers: Observers<()> = Observers::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let sub = {
            let calls = Arc::clone(&calls);
            observers.subscribe(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            })
        };
        observers.notify(&());
        sub.unsubscribe();
        observers.notify(&());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(observers.is_empty());
    }

    #[test]
    fn detached_listener_stays() {
        let observers: Observers<()> = Observers::new();
        let calls = Arc::new(AtomicUsize::new(0));

        {
            let calls = Arc::clone(&calls);
            observers
                .subscribe(move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                })
                .detach();
        }
        observers.notify(&());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(observers.len(), 1);
    }

    #[test]
    fn handle_outliving_registry_is_harmless() {
        let observers: Observers<()> = Observers::new();
        let sub = observers.subscribe(|_| {});
        drop(observers);
        drop(sub);
    }
}

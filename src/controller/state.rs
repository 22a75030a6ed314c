// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tokio::sync::watch;

/// Single-slot observable state.
///
/// Writers replace the whole value; readers either take a snapshot or
/// subscribe for change notifications. Updates are applied under the channel's
/// write lock, so concurrent writers are serialized.
#[derive(Debug)]
pub struct StateCell<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> StateCell<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Copy of the current value
    pub fn snapshot(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Receiver notified after every update
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    pub fn replace(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Derive the next value from the current one
    pub fn update(&self, next: impl FnOnce(&T) -> T) {
        self.tx.send_modify(|current| *current = next(current));
    }

    /// Like [`update`](Self::update), but `next` may decline by returning
    /// `None`. Returns whether the value was replaced.
    pub fn update_if(&self, next: impl FnOnce(&T) -> Option<T>) -> bool {
        self.tx.send_if_modified(|current| match next(current) {
            Some(value) => {
                *current = value;
                true
            }
            None => false,
        })
    }
}

impl<T: Clone + Default> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

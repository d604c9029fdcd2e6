//! Change notification plumbing.
//!
//! Stores notify registered observers after a mutation has been persisted.
//! Observers are plain callbacks; the stores never know what a callback does
//! with the event (render, log, queue a toast).

use std::fmt;

type Callback<E> = Box<dyn FnMut(&E)>;

/// A list of callbacks invoked for every emitted event.
pub struct Observers<E> {
    callbacks: Vec<Callback<E>>,
}

impl<E> Observers<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Register a callback for all future events.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Deliver `event` to every callback in registration order.
    pub fn emit(&mut self, event: &E) {
        for callback in &mut self.callbacks {
            callback(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_emit_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();

        let first = Rc::clone(&seen);
        observers.subscribe(move |n: &u32| first.borrow_mut().push(("first", *n)));
        let second = Rc::clone(&seen);
        observers.subscribe(move |n: &u32| second.borrow_mut().push(("second", *n)));

        observers.emit(&7);
        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
        assert_eq!(observers.len(), 2);
    }
}

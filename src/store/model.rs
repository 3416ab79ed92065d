//! Observable scope cell shared between the store and the views

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::domain::{ScopeId, ScopeRecord};

type Observer = Rc<dyn Fn()>;

/// One scope record with change notification.
///
/// The store and every view bound to a scope hold the same `Rc<ScopeModel>`.
pub struct ScopeModel {
    record: RefCell<ScopeRecord>,
    observers: RefCell<Vec<(u64, Observer)>>,
    next_observer: Cell<u64>,
}

impl ScopeModel {
    pub fn new(record: ScopeRecord) -> Rc<Self> {
        Rc::new(Self {
            record: RefCell::new(record),
            observers: RefCell::new(Vec::new()),
            next_observer: Cell::new(0),
        })
    }

    pub fn id(&self) -> Option<ScopeId> {
        self.record.borrow().id
    }

    pub fn value(&self) -> String {
        self.record.borrow().value.clone()
    }

    /// Copy of the current field values
    pub fn snapshot(&self) -> ScopeRecord {
        self.record.borrow().clone()
    }

    /// Read the record without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&ScopeRecord) -> R) -> R {
        f(&self.record.borrow())
    }

    /// Replace all fields. Observers run only when something changed.
    ///
    /// Returns whether the record changed.
    pub fn set(&self, record: ScopeRecord) -> bool {
        {
            let mut current = self.record.borrow_mut();
            if *current == record {
                return false;
            }
            *current = record;
        }
        self.notify();
        true
    }

    /// Register a change callback; it stays registered until the
    /// returned [`Subscription`] is dropped.
    pub fn observe(self: &Rc<Self>, on_change: impl Fn() + 'static) -> Subscription {
        let id = self.next_observer.get();
        self.next_observer.set(id + 1);
        self.observers.borrow_mut().push((id, Rc::new(on_change)));
        Subscription {
            model: Rc::downgrade(self),
            id,
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    fn notify(&self) {
        // Callbacks may read the record or drop subscriptions
        let observers: Vec<Observer> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for observer in observers {
            observer();
        }
    }

    fn unsubscribe(&self, id: u64) {
        self.observers.borrow_mut().retain(|(observer, _)| *observer != id);
    }
}

impl std::fmt::Debug for ScopeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeModel")
            .field("record", &*self.record.borrow())
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Keeps an observer registered on a [`ScopeModel`]; dropping it unsubscribes
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    model: Weak<ScopeModel>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(model) = self.model.upgrade() {
            model.unsubscribe(self.id);
        }
    }
}

/*!
Lazily constructed, race-tolerant default slots.

A [`DefaultSlot`] starts empty and becomes ready the first time a
constructor succeeds. Under contention the constructor may run more
than once, but only one value is ever published and every caller
returns that value. Once ready, a slot is never emptied again; it can
only be overwritten with [`DefaultSlot::set`].
*/

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwapOption;

use crate::core::error::Result;

/// How a slot publishes its first value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum InitStrategy {
    /// Serialize construction behind a mutex, re-checking under the lock
    Locked,
    /// Construct without locking and publish with compare-and-swap
    LockFree,
}

/// Observable state of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    /// At least one construction attempt is running
    Constructing,
    Ready,
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotState::Empty => write!(f, "Empty"),
            SlotState::Constructing => write!(f, "Constructing"),
            SlotState::Ready => write!(f, "Ready"),
        }
    }
}

// Decrements the in-flight counter even if the constructor panics
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Holder for a lazily constructed process default
pub struct DefaultSlot<T> {
    name: &'static str,
    value: ArcSwapOption<T>,
    init_lock: Mutex<()>,
    in_flight: AtomicUsize,
    strategy: InitStrategy,
}

impl<T> DefaultSlot<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an empty slot
    pub fn new(name: &'static str, strategy: InitStrategy) -> Self {
        Self {
            name,
            value: ArcSwapOption::empty(),
            init_lock: Mutex::new(()),
            in_flight: AtomicUsize::new(0),
            strategy,
        }
    }

    /// Create a slot that is ready from the start
    pub fn with_value(name: &'static str, strategy: InitStrategy, value: T) -> Self {
        let slot = Self::new(name, strategy);
        slot.value.store(Some(Arc::new(value)));
        slot
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn strategy(&self) -> InitStrategy {
        self.strategy
    }

    /// Current value, if the slot is ready
    pub fn get(&self) -> Option<T> {
        self.value.load_full().map(|value| T::clone(&value))
    }

    pub fn state(&self) -> SlotState {
        if self.value.load().is_some() {
            SlotState::Ready
        } else if self.in_flight.load(Ordering::Acquire) > 0 {
            SlotState::Constructing
        } else {
            SlotState::Empty
        }
    }

    /// Return the current value, constructing it first if the slot is empty
    ///
    /// A failing constructor leaves the slot as it was and its error
    /// goes to this caller only.
    pub fn get_or_init<F>(&self, construct: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(value) = self.get() {
            return Ok(value);
        }
        match self.strategy {
            InitStrategy::Locked => self.init_locked(construct),
            InitStrategy::LockFree => self.init_lock_free(construct),
        }
    }

    fn init_locked<F>(&self, construct: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        // The guarded data is (), so a poisoned lock carries no broken state.
        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = self.get() {
            return Ok(value);
        }

        let value = {
            let _in_flight = InFlight::enter(&self.in_flight);
            construct()?
        };
        self.value.store(Some(Arc::new(value.clone())));
        log::debug!("Initialized default {}", self.name);
        Ok(value)
    }

    fn init_lock_free<F>(&self, construct: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let candidate = {
            let _in_flight = InFlight::enter(&self.in_flight);
            Arc::new(construct()?)
        };

        let empty: Option<Arc<T>> = None;
        let previous = self.value.compare_and_swap(&empty, Some(Arc::clone(&candidate)));
        match &*previous {
            None => {
                log::debug!("Initialized default {}", self.name);
                Ok(T::clone(&candidate))
            }
            Some(winner) => {
                log::debug!("Lost initialization race for default {}, discarding candidate", self.name);
                Ok(T::clone(winner))
            }
        }
    }

    /// Overwrite the slot regardless of its state
    pub fn set(&self, value: T) {
        self.value.store(Some(Arc::new(value)));
        log::debug!("Default {} overridden", self.name);
    }
}

impl<T> fmt::Debug for DefaultSlot<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultSlot")
            .field("name", &self.name)
            .field("strategy", &self.strategy)
            .field("state", &self.state())
            .finish()
    }
}

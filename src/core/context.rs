//! Makes a serializer's converter set visible to the serde field adapters.
//!
//! serde has no side channel for configuration, so a `DocumentSerializer`
//! enters a scope around each (de)serialization call. The scope is per thread
//! and restores whatever was active before it when dropped.

use crate::core::registry::ConverterSet;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

thread_local! {
    static ACTIVE: RefCell<Option<Arc<ConverterSet>>> = const { RefCell::new(None) };
}

#[must_use = "the converter set is only active while the scope is alive"]
pub struct ConverterScope {
    previous: Option<Arc<ConverterSet>>,
    // Must be dropped on the thread that entered it.
    _not_send: PhantomData<*const ()>,
}

pub fn enter(converters: Arc<ConverterSet>) -> ConverterScope {
    let previous = ACTIVE.with(|active| active.replace(Some(converters)));
    ConverterScope {
        previous,
        _not_send: PhantomData,
    }
}

pub fn active() -> Option<Arc<ConverterSet>> {
    ACTIVE.with(|active| active.borrow().clone())
}

impl Drop for ConverterScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        ACTIVE.with(|active| *active.borrow_mut() = previous);
    }
}

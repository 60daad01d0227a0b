use std::sync::atomic::{AtomicU32, Ordering};

pub type ObjectId = u32;

pub type ColliderId = u32;

/// hands out increasing ids starting at 1, an id is never given out twice
pub(crate) struct IdDispatcher {
    current_id: AtomicU32,
}

impl IdDispatcher {
    pub(crate) const fn new() -> Self {
        Self {
            current_id: AtomicU32::new(0),
        }
    }

    pub(crate) fn gen_id(&self) -> u32 {
        self.current_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

pub(crate) static OBJECT_IDS: IdDispatcher = IdDispatcher::new();

pub(crate) static COLLIDER_IDS: IdDispatcher = IdDispatcher::new();

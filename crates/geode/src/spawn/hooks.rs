struct Callback<T> {
    id: u32,
    callback: Box<dyn FnMut(&T)>,
}

/// Observers of one kind of notification, called in registration order.
pub(crate) struct CallbackHook<T> {
    callback_id_count: u32,
    callbacks: Vec<Callback<T>>,
}

impl<T> Default for CallbackHook<T> {
    fn default() -> Self {
        Self {
            callback_id_count: 0,
            callbacks: Vec::new(),
        }
    }
}

impl<T> CallbackHook<T> {
    pub fn register_callback<F>(&mut self, callback: F) -> u32
    where
        F: FnMut(&T) + 'static,
    {
        self.callback_id_count += 1;
        let id = self.callback_id_count;
        self.callbacks.push(Callback {
            id,
            callback: Box::new(callback),
        });
        id
    }

    pub fn unregister_callback(&mut self, callback_id: u32) -> bool {
        let len = self.callbacks.len();
        self.callbacks.retain(|callback| callback.id != callback_id);
        self.callbacks.len() != len
    }

    pub fn emit(&mut self, value: &T) {
        for callback in self.callbacks.iter_mut() {
            (callback.callback)(value);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }
}

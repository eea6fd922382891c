use std::{cell::RefCell, collections::HashMap, rc::Rc};
use web_sys::{Storage, Window};

/// Minimal string key/value backend the session store persists into.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove_item(&self, key: &str);
}

pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "No window object".to_string())
}

pub fn local_storage() -> Result<Storage, String> {
    window()?
        .local_storage()
        .map_err(|_| "No localStorage".to_string())?
        .ok_or_else(|| "No localStorage".to_string())
}

/// `window.localStorage`. Only usable inside a browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        local_storage().ok()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| format!("Failed to store {}", key))
    }

    fn remove_item(&self, key: &str) {
        if let Ok(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

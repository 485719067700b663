use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::store::PortfolioStore;

/// In-process slot used by tests.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn with_raw(raw: &str) -> Self {
        MemoryStore {
            slot: Mutex::new(Some(raw.to_string())),
        }
    }
}

#[async_trait]
impl PortfolioStore for MemoryStore {
    async fn read_raw(&self) -> Result<Option<String>, AppError> {
        Ok(self.slot.lock().unwrap().clone())
    }

    async fn write_raw(&self, raw: &str) -> Result<(), AppError> {
        *self.slot.lock().unwrap() = Some(raw.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

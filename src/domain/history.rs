use super::account::AccountId;
use std::collections::HashMap;

/// Raw command strings echoed per account, oldest first.
#[derive(Debug, Default, Clone)]
pub struct TransactionLog {
    entries: HashMap<AccountId, Vec<String>>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: &AccountId, raw: &str) {
        self.entries
            .entry(id.clone())
            .or_default()
            .push(raw.to_string());
    }

    pub fn entries(&self, id: &AccountId) -> &[String] {
        self.entries.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn forget(&mut self, id: &AccountId) {
        self.entries.remove(id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

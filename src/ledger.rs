// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Owner of the transaction collection. Every mutation rewrites the whole
//! collection to the backing store before it becomes visible in memory.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::{LedgerError, LedgerResult};
use crate::models::{validate_transaction, NewTransaction, Transaction};
use crate::store::KeyValueStore;

pub const DEFAULT_COLLECTION_KEY: &str = "financial-transactions";

pub struct LedgerStore<S: KeyValueStore> {
    backend: S,
    key: String,
    transactions: Vec<Transaction>,
    recovered_from: Option<String>,
}

impl<S: KeyValueStore> LedgerStore<S> {
    /// Reads the collection once. Unreadable content is logged and replaced by
    /// an empty collection; failing to reach the backend is an error.
    pub fn load(backend: S, key: &str) -> LedgerResult<Self> {
        let raw = backend.get(key)?;
        let (transactions, recovered_from) = match raw {
            None => (Vec::new(), None),
            Some(text) if text.trim().is_empty() => (Vec::new(), None),
            Some(text) => match serde_json::from_str::<Vec<Transaction>>(&text) {
                Ok(list) => (list, None),
                Err(err) => {
                    warn!(key, error = %err, "stored transactions are malformed; starting empty");
                    (Vec::new(), Some(err.to_string()))
                }
            },
        };
        debug!(key, count = transactions.len(), "loaded transactions");
        Ok(Self {
            backend,
            key: key.to_string(),
            transactions,
            recovered_from,
        })
    }

    /// Diagnostic from `load` when stored data had to be discarded.
    pub fn recovered_from(&self) -> Option<&str> {
        self.recovered_from.as_deref()
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Most-recent-first snapshot.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn add(&mut self, draft: NewTransaction) -> LedgerResult<Transaction> {
        draft.validate()?;
        let txn = draft.into_transaction(self.fresh_id());
        let mut next = Vec::with_capacity(self.transactions.len() + 1);
        next.push(txn.clone());
        next.extend(self.transactions.iter().cloned());
        self.commit(next)?;
        Ok(txn)
    }

    /// Replaces the stored transaction with the same id.
    pub fn update(&mut self, txn: Transaction) -> LedgerResult<Transaction> {
        validate_transaction(&txn)?;
        let pos = self.position(&txn.id)?;
        let mut next = self.transactions.clone();
        if let Some(slot) = next.get_mut(pos) {
            *slot = txn.clone();
        }
        self.commit(next)?;
        Ok(txn)
    }

    pub fn delete(&mut self, id: &str) -> LedgerResult<Transaction> {
        let pos = self.position(id)?;
        let mut next = self.transactions.clone();
        let removed = next.remove(pos);
        self.commit(next)?;
        Ok(removed)
    }

    /// Removes everything, returning how many transactions were dropped.
    pub fn clear(&mut self) -> LedgerResult<usize> {
        let count = self.transactions.len();
        self.commit(Vec::new())?;
        Ok(count)
    }

    fn position(&self, id: &str) -> LedgerResult<usize> {
        self.transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn commit(&mut self, next: Vec<Transaction>) -> LedgerResult<()> {
        let json = serde_json::to_string(&next)?;
        self.backend.set(&self.key, &json)?;
        debug!(key = %self.key, count = next.len(), "saved transactions");
        self.transactions = next;
        self.recovered_from = None;
        Ok(())
    }
}

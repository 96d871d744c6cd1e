//! CRUD operations over the incomes and outcomes ledgers.

use crate::storage::{KeyValueStore, load_transactions, save_transactions};

use super::models::{Identity, Nature, NewTransaction, Transaction, TransactionPatch};

/// The ledger after an edit or delete, and whether anything changed.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerUpdate {
    /// The full ledger after the operation.
    pub transactions: Vec<Transaction>,
    /// `false` if no transaction matched the identity and the ledger was left
    /// unchanged.
    pub applied: bool,
}

/// Reads and writes the two ledgers through a [KeyValueStore].
///
/// Every operation loads the ledger from storage before changing it, so the
/// store holds no ledger state of its own.
#[derive(Debug)]
pub struct TransactionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> TransactionStore<S> {
    /// Create a store that persists ledgers to `storage`.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying key/value storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the underlying key/value storage.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Load the ledger `nature` in insertion order.
    pub fn ledger(&self, nature: Nature) -> Vec<Transaction> {
        load_transactions(&self.storage, nature.as_str())
    }

    /// Append `transaction` to the ledger `nature` and return the new ledger.
    pub fn add(&mut self, nature: Nature, transaction: NewTransaction) -> Vec<Transaction> {
        let mut transactions = self.ledger(nature);
        transactions.push(transaction.into_transaction(nature));
        save_transactions(&mut self.storage, nature.as_str(), &transactions);

        tracing::info!("Added transaction to {nature}");

        transactions
    }

    /// Apply `patch` to the first transaction in `nature` matching `identity`.
    ///
    /// The ledger is returned unchanged, and nothing is written, when no
    /// transaction matches.
    pub fn edit(
        &mut self,
        nature: Nature,
        identity: Identity,
        patch: &TransactionPatch,
    ) -> LedgerUpdate {
        let mut transactions = self.ledger(nature);

        let Some(transaction) = transactions
            .iter_mut()
            .find(|transaction| identity.matches(transaction))
        else {
            tracing::warn!("No transaction in {nature} matches {identity:?}, nothing to edit");
            return LedgerUpdate {
                transactions,
                applied: false,
            };
        };

        patch.apply(transaction);
        save_transactions(&mut self.storage, nature.as_str(), &transactions);

        tracing::info!("Edited transaction {identity:?} in {nature}");

        LedgerUpdate {
            transactions,
            applied: true,
        }
    }

    /// Remove the first transaction in `nature` matching `identity`.
    ///
    /// The ledger is returned unchanged, and nothing is written, when no
    /// transaction matches.
    pub fn delete(&mut self, nature: Nature, identity: Identity) -> LedgerUpdate {
        let mut transactions = self.ledger(nature);

        let Some(index) = transactions
            .iter()
            .position(|transaction| identity.matches(transaction))
        else {
            tracing::warn!("No transaction in {nature} matches {identity:?}, nothing to delete");
            return LedgerUpdate {
                transactions,
                applied: false,
            };
        };

        transactions.remove(index);
        save_transactions(&mut self.storage, nature.as_str(), &transactions);

        tracing::info!("Deleted transaction {identity:?} from {nature}");

        LedgerUpdate {
            transactions,
            applied: true,
        }
    }
}

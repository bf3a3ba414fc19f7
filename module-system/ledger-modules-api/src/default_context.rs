//! The [`Context`] used by the ledger binary and the tests.

use ledger_state::MemoryStorage;
use serde::{Deserialize, Serialize};

use crate::{Address, Context, Spec};

/// A sender and the timestamp its call executes at, backed by in-memory storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultContext {
    pub sender: Address,
    pub timestamp: u64,
}

impl Spec for DefaultContext {
    type Address = Address;
    type Storage = MemoryStorage;
    type Hasher = sha2::Sha256;
}

impl Context for DefaultContext {
    fn sender(&self) -> &Self::Address {
        &self.sender
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }

    fn new(sender: Self::Address, timestamp: u64) -> Self {
        Self { sender, timestamp }
    }
}

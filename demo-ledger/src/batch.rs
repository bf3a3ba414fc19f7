use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ledger_election::CallMessage;
use ledger_modules_api::default_context::DefaultContext;
use ledger_modules_api::Address;
use serde::{Deserialize, Serialize};

/// One call of a batch: who sends it, when it executes and what it does.
///
/// The ledger does not authenticate senders; whoever produced the batch vouches for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCall {
    pub sender: Address,
    pub timestamp: u64,
    pub call: CallMessage<DefaultContext>,
}

/// Reads a JSON array of calls.
pub fn from_json_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<BatchCall>> {
    let reader = BufReader::new(File::open(path)?);
    let calls = serde_json::from_reader(reader)?;
    Ok(calls)
}

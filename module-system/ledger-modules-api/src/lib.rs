//! The interface between the vote ledger's modules and the host that applies
//! calls to them.

mod address;
pub mod default_context;
mod error;
mod events;
mod prefix;
mod response;
pub mod runner;
#[cfg(test)]
mod tests;
pub mod utils;

use core::fmt::{Debug, Display};
use std::str::FromStr;

pub use address::{Address, AddressBech32, Bech32ParseError};
use borsh::{BorshDeserialize, BorshSerialize};
pub use error::Error;
pub use events::{EventLog, EventSink, TracingEventSink};
pub use ledger_state::{Event, StateMap, StateValue, StateVec, Storage, WorkingSet};
pub use prefix::Prefix;
pub use response::CallResponse;
pub use runner::{CallReceipt, CallRunner};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::digest::typenum::U32;
use sha2::Digest;

/// The bounds every address type used by the ledger has to satisfy.
pub trait AddressTrait:
    PartialEq
    + Eq
    + Debug
    + Display
    + Clone
    + AsRef<[u8]>
    + for<'a> TryFrom<&'a [u8], Error = anyhow::Error>
    + FromStr<Err = anyhow::Error>
    + From<[u8; 32]>
    + Serialize
    + DeserializeOwned
    + BorshSerialize
    + BorshDeserialize
    + Send
    + Sync
    + 'static
{
}

impl AddressTrait for Address {}

/// The `Spec` trait configures the key primitives used by a particular instance of the ledger.
/// `Spec` is almost always implemented on a Context object; since all Modules are generic
/// over a Context, the address format, storage backend and hasher can be swapped without
/// touching module implementations.
pub trait Spec {
    /// The Address type used on the ledger. Typically calculated as the hash of a public key.
    type Address: AddressTrait;

    /// State storage used by the ledger.
    type Storage: Storage + Send + Sync;

    /// The hasher preferred by the ledger, such as Sha256.
    type Hasher: Digest<OutputSize = U32>;
}

/// A context contains information which is passed to modules during
/// call execution: the authenticated sender and the single authoritative
/// timestamp of the call.
///
/// Every phase check made while executing one call resolves "now" to
/// [`Context::timestamp`], so the whole call observes one instant.
pub trait Context: Spec + Clone + Debug + PartialEq {
    /// Sender of the call.
    fn sender(&self) -> &Self::Address;

    /// The time at which the host executes the call, in seconds.
    fn timestamp(&self) -> u64;

    /// Constructor for the Context.
    fn new(sender: Self::Address, timestamp: u64) -> Self;
}

/// Every ledger module implements this trait.
pub trait Module {
    /// Execution context.
    type Context: Context;

    /// Configuration for the genesis method.
    type Config;

    /// Module defined argument to the call method.
    type CallMessage: Debug + BorshSerialize + BorshDeserialize;

    /// Module defined event resulting from a call method.
    type Event: Debug + BorshSerialize + BorshDeserialize;

    /// Genesis is called once, when the ledger is deployed, and can be used to set initial
    /// state values in the module.
    fn genesis(
        &self,
        _config: &Self::Config,
        _working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), Error> {
        Ok(())
    }

    /// Call allows interaction with the module and invokes state changes.
    /// It takes a module defined type and a context as parameters.
    fn call(
        &self,
        message: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<CallResponse, Error>;
}

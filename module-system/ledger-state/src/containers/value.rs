use std::marker::PhantomData;

use crate::codec::{BorshCodec, StateCodec, StateValueCodec};
use crate::{Prefix, Storage, WorkingSet};

/// A single slot stored directly under its prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct StateValue<V, Codec = BorshCodec> {
    _phantom: PhantomData<V>,
    codec: Codec,
    prefix: Prefix,
}

impl<V> StateValue<V> {
    /// Borsh encoded slot under `prefix`.
    pub fn new(prefix: Prefix) -> Self {
        Self::with_codec(prefix, BorshCodec)
    }
}

impl<V, Codec> StateValue<V, Codec> {
    /// Slot under `prefix` encoded with `codec`.
    pub fn with_codec(prefix: Prefix, codec: Codec) -> Self {
        Self {
            _phantom: PhantomData,
            codec,
            prefix,
        }
    }
}

impl<V, Codec> StateValue<V, Codec>
where
    Codec: StateCodec,
    Codec::ValueCodec: StateValueCodec<V>,
{
    /// Overwrites the slot.
    pub fn set<S: Storage>(&self, value: &V, working_set: &mut WorkingSet<S>) {
        working_set.set_singleton(&self.prefix, value, &self.codec)
    }

    /// Reads the slot, `None` until it is first set.
    pub fn get<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> Option<V> {
        working_set.get_singleton(&self.prefix, &self.codec)
    }
}

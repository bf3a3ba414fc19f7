use std::marker::PhantomData;

use crate::codec::{BorshCodec, EncodeKeyLike, StateCodec, StateKeyCodec, StateValueCodec};
use crate::{Prefix, Storage, WorkingSet};

/// Keyed container. Every entry lives in storage under `prefix ++ encode(key)`,
/// so two maps with distinct prefixes never see each other's entries.
///
/// Lookups accept any `Q` the key codec can encode like a `K`, e.g. `&[u8]`
/// for a `Vec<u8>` keyed map.
#[derive(Debug, Clone, PartialEq)]
pub struct StateMap<K, V, Codec = BorshCodec> {
    _phantom: (PhantomData<K>, PhantomData<V>),
    codec: Codec,
    prefix: Prefix,
}

impl<K, V> StateMap<K, V> {
    /// Borsh encoded map under `prefix`.
    pub fn new(prefix: Prefix) -> Self {
        Self::with_codec(prefix, BorshCodec)
    }
}

impl<K, V, Codec> StateMap<K, V, Codec> {
    /// Map under `prefix` encoded with `codec`.
    pub fn with_codec(prefix: Prefix, codec: Codec) -> Self {
        Self {
            _phantom: (PhantomData, PhantomData),
            codec,
            prefix,
        }
    }
}

impl<K, V, Codec> StateMap<K, V, Codec>
where
    Codec: StateCodec,
    Codec::KeyCodec: StateKeyCodec<K>,
    Codec::ValueCodec: StateValueCodec<V>,
{
    /// Stores `value` under `key`, replacing any previous entry.
    pub fn set<Q, S: Storage>(&self, key: &Q, value: &V, working_set: &mut WorkingSet<S>)
    where
        Codec::KeyCodec: EncodeKeyLike<Q, K>,
        Q: ?Sized,
    {
        working_set.set_value::<Q, K, V, Codec>(&self.prefix, key, value, &self.codec)
    }

    /// The entry under `key`, if any.
    pub fn get<Q, S: Storage>(&self, key: &Q, working_set: &mut WorkingSet<S>) -> Option<V>
    where
        Codec::KeyCodec: EncodeKeyLike<Q, K>,
        Q: ?Sized,
    {
        working_set.get_value::<Q, K, V, Codec>(&self.prefix, key, &self.codec)
    }

    /// Returns `true` if an entry exists under `key`.
    pub fn contains<Q, S: Storage>(&self, key: &Q, working_set: &mut WorkingSet<S>) -> bool
    where
        Codec::KeyCodec: EncodeKeyLike<Q, K>,
        Q: ?Sized,
    {
        self.get(key, working_set).is_some()
    }

    /// Drops the entry under `key` without decoding it.
    pub fn delete<Q, S: Storage>(&self, key: &Q, working_set: &mut WorkingSet<S>)
    where
        Codec::KeyCodec: EncodeKeyLike<Q, K>,
        Q: ?Sized,
    {
        working_set.delete_value::<Q, K, Codec>(&self.prefix, key, &self.codec);
    }
}

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// An event emitted by a module during a call.
///
/// The key names the event, the value holds its borsh-encoded payload.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Event {
    key: EventKey,
    value: EventValue,
}

impl Event {
    /// Creates an event by encoding `value` with borsh.
    pub fn new<V: BorshSerialize>(key: &str, value: &V) -> Self {
        Self {
            key: EventKey(key.as_bytes().to_vec()),
            value: EventValue(value.try_to_vec().expect("Failed to serialize event")),
        }
    }

    /// The key of the event.
    pub fn key(&self) -> &EventKey {
        &self.key
    }

    /// The encoded payload of the event.
    pub fn value(&self) -> &EventValue {
        &self.value
    }

    /// Decodes the payload back into a typed event.
    pub fn decode<V: BorshDeserialize>(&self) -> Result<V, std::io::Error> {
        V::try_from_slice(&self.value.0)
    }
}

/// The key of an [`Event`].
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct EventKey(Vec<u8>);

impl EventKey {
    /// Returns the raw bytes of the key.
    pub fn inner(&self) -> &Vec<u8> {
        &self.0
    }
}

impl std::fmt::Display for EventKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// The value of an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct EventValue(Vec<u8>);

impl EventValue {
    /// Returns the raw bytes of the value.
    pub fn inner(&self) -> &Vec<u8> {
        &self.0
    }
}

use std::fmt;
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use ledger_modules_api::Context;
use serde::{Deserialize, Serialize};

use crate::{Deadlines, Phase};

/// Size in bytes of an election name.
pub const ELECTION_NAME_LEN: usize = 32;

/// The unique key of an election.
///
/// Names are opaque 32 byte keys compared byte for byte. Text names are stored
/// left aligned and padded with zeros, so `"test"` and `"test\0"` are the same
/// name. A name made only of zeros is the empty name, which no election can use.
#[derive(
    BorshSerialize, BorshDeserialize, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct ElectionName([u8; ELECTION_NAME_LEN]);

/// Failure to turn text into an [`ElectionName`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ElectionNameError {
    /// The text does not fit into the name.
    #[error("Election name is {0} bytes long, at most 32 bytes are allowed")]
    TooLong(usize),
    /// The text looked like a hex encoded name but could not be decoded.
    #[error("Invalid hex election name: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl ElectionName {
    /// Wraps raw name bytes.
    pub const fn new(bytes: [u8; ELECTION_NAME_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw bytes of the name.
    pub fn as_bytes(&self) -> &[u8; ELECTION_NAME_LEN] {
        &self.0
    }

    /// Returns `true` for the all-zero name.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// The name as text, without its zero padding, if it is valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        let end = self
            .0
            .iter()
            .rposition(|b| *b != 0)
            .map_or(0, |last| last + 1);
        std::str::from_utf8(&self.0[..end]).ok()
    }
}

impl From<[u8; ELECTION_NAME_LEN]> for ElectionName {
    fn from(bytes: [u8; ELECTION_NAME_LEN]) -> Self {
        Self(bytes)
    }
}

impl FromStr for ElectionName {
    type Err = ElectionNameError;

    /// Parses either UTF-8 text of at most 32 bytes or `0x` followed by 64 hex digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(hex_name) = s.strip_prefix("0x") {
            if hex_name.len() == 2 * ELECTION_NAME_LEN {
                let mut bytes = [0u8; ELECTION_NAME_LEN];
                hex::decode_to_slice(hex_name, &mut bytes)?;
                return Ok(Self(bytes));
            }
        }

        let text = s.as_bytes();
        if text.len() > ELECTION_NAME_LEN {
            return Err(ElectionNameError::TooLong(text.len()));
        }

        let mut bytes = [0u8; ELECTION_NAME_LEN];
        bytes[..text.len()].copy_from_slice(text);
        Ok(Self(bytes))
    }
}

impl fmt::Display for ElectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(text),
            None => write!(f, "0x{}", hex::encode(self.0)),
        }
    }
}

impl fmt::Debug for ElectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElectionName({:?})", self.to_string())
    }
}

impl Serialize for ElectionName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ElectionName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = <String as Deserialize>::deserialize(deserializer)?;
        ElectionName::from_str(&name).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "native")]
impl schemars::JsonSchema for ElectionName {
    fn schema_name() -> String {
        "ElectionName".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <String as schemars::JsonSchema>::json_schema(gen)
    }
}

/// An election, as created. Elections are never mutated nor deleted.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Election<C: Context> {
    /// Unique name of the election.
    pub name: ElectionName,
    /// Free text describing what is being voted on.
    pub proposal: String,
    /// The account that created the election.
    pub creator: C::Address,
    /// Timestamp of the creating call; every deadline is relative to it.
    pub created_at: u64,
    /// Candidates can register strictly before this instant.
    pub registration_deadline: u64,
    /// Votes are accepted strictly before this instant.
    pub voting_deadline: u64,
    /// From this instant on the election is over.
    pub ending_time: u64,
}

impl<C: Context> Election<C> {
    /// The absolute deadlines of the election.
    pub fn deadlines(&self) -> Deadlines {
        Deadlines {
            registration: self.registration_deadline,
            voting: self.voting_deadline,
            ending: self.ending_time,
        }
    }

    /// The phase the election is in at `now`.
    pub fn phase_at(&self, now: u64) -> Phase {
        Phase::at(&self.deadlines(), now)
    }
}

/// A self-registered candidate. An account holds at most one candidate record.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Candidate<C: Context> {
    /// The account that registered, and the key of the record.
    pub address: C::Address,
    /// Display name.
    pub name: String,
    /// The election the candidate runs in.
    pub election_name: ElectionName,
    /// Number of distinct accounts that voted for the candidate.
    pub vote_count: u64,
}

/// One line of an election's tally.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct TallyEntry<A> {
    /// Address of the candidate.
    pub candidate: A,
    /// Display name of the candidate.
    pub name: String,
    /// Votes received.
    pub vote_count: u64,
}

use std::fmt;
use std::str::FromStr;

use bech32::{Error, FromBase32, ToBase32};
use borsh::{BorshDeserialize, BorshSerialize};
use derive_more::{Display, Into};

const HRP: &str = "vote";

pub(crate) fn vec_to_bech32m(vec: &[u8], hrp: &str) -> Result<String, Error> {
    let data = vec.to_base32();
    let bech32_addr = bech32::encode(hrp, data, bech32::Variant::Bech32m)?;
    Ok(bech32_addr)
}

pub(crate) fn bech32m_to_decoded_vec(bech32_addr: &str) -> Result<(String, Vec<u8>), Error> {
    let (hrp, data, _) = bech32::decode(bech32_addr)?;
    let vec = Vec::<u8>::from_base32(&data)?;
    Ok((hrp, vec))
}

/// Failure to parse a human readable address.
#[derive(Debug, thiserror::Error)]
pub enum Bech32ParseError {
    /// The string is not valid bech32.
    #[error("Bech32 error: {0}")]
    Bech32(#[from] bech32::Error),
    /// The human readable part is not the one used by the ledger.
    #[error("Wrong HRP: {0}")]
    WrongHRP(String),
    /// The payload does not have the length of an address.
    #[error("Invalid address length {0}, should be 32")]
    WrongLength(usize),
}

/// The bech32m rendering of an [`Address`].
#[derive(
    serde::Serialize,
    serde::Deserialize,
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    Debug,
    PartialEq,
    Clone,
    Eq,
    Into,
    Display,
)]
#[serde(try_from = "String", into = "String")]
#[display(fmt = "{}", "value")]
pub struct AddressBech32 {
    value: String,
}

impl AddressBech32 {
    fn to_byte_array(&self) -> Result<[u8; 32], Bech32ParseError> {
        let (_, data) = bech32m_to_decoded_vec(&self.value)?;

        let addr_bytes: [u8; 32] = data
            .as_slice()
            .try_into()
            .map_err(|_| Bech32ParseError::WrongLength(data.len()))?;

        Ok(addr_bytes)
    }
}

impl From<&Address> for AddressBech32 {
    fn from(addr: &Address) -> Self {
        // Encoding 32 bytes under a fixed, valid HRP cannot fail.
        let value = vec_to_bech32m(&addr.addr, HRP).expect("valid bech32m encoding");
        AddressBech32 { value }
    }
}

impl TryFrom<String> for AddressBech32 {
    type Error = Bech32ParseError;

    fn try_from(addr: String) -> Result<Self, Bech32ParseError> {
        AddressBech32::from_str(&addr)
    }
}

impl FromStr for AddressBech32 {
    type Err = Bech32ParseError;

    fn from_str(s: &str) -> Result<Self, Bech32ParseError> {
        let (hrp, data) = bech32m_to_decoded_vec(s)?;

        if HRP != hrp {
            return Err(Bech32ParseError::WrongHRP(hrp));
        }

        if data.len() != 32 {
            return Err(Bech32ParseError::WrongLength(data.len()));
        }

        Ok(AddressBech32 {
            value: s.to_string(),
        })
    }
}

/// The identity of an authenticated principal.
///
/// The ledger never authenticates; it only compares addresses for equality.
#[derive(
    PartialEq, Clone, Copy, Eq, PartialOrd, Ord, Hash, BorshDeserialize, BorshSerialize,
    schemars::JsonSchema,
)]
pub struct Address {
    addr: [u8; 32],
}

impl Address {
    /// Creates a new address containing the given bytes
    pub const fn new(addr: [u8; 32]) -> Self {
        Self { addr }
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.addr
    }
}

impl<'a> TryFrom<&'a [u8]> for Address {
    type Error = anyhow::Error;

    fn try_from(addr: &'a [u8]) -> Result<Self, Self::Error> {
        if addr.len() != 32 {
            anyhow::bail!("Address must be 32 bytes long");
        }
        let mut addr_bytes = [0u8; 32];
        addr_bytes.copy_from_slice(addr);
        Ok(Self { addr: addr_bytes })
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let addr = AddressBech32::from_str(s)?.to_byte_array()?;
        Ok(Self { addr })
    }
}

impl From<[u8; 32]> for Address {
    fn from(addr: [u8; 32]) -> Self {
        Self { addr }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", AddressBech32::from(self))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", AddressBech32::from(self))
    }
}

impl serde::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serde::Serialize::serialize(&AddressBech32::from(self), serializer)
        } else {
            serde::Serialize::serialize(&self.addr, serializer)
        }
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let addr: AddressBech32 = serde::Deserialize::deserialize(deserializer)?;
            let addr = addr.to_byte_array().map_err(serde::de::Error::custom)?;
            Ok(Self { addr })
        } else {
            let addr = <[u8; 32] as serde::Deserialize>::deserialize(deserializer)?;
            Ok(Self { addr })
        }
    }
}

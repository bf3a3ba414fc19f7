use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use ledger_state::{MemoryStorage, StateValue};

use crate::default_context::DefaultContext;
use crate::utils::generate_address;
use crate::{
    Address, AddressBech32, CallResponse, CallRunner, Context, Error, EventLog, Module, Prefix,
    WorkingSet,
};

#[test]
fn test_address_display_from_string() {
    let raw_address_str = "vote190vqdjtlpcq27xslcveglfmr4ynfwg7gmw86cnun4acakxrdd6gqr7z6ue";
    let address = Address::from_str(raw_address_str).unwrap();
    assert_eq!(address, generate_address::<DefaultContext>("alice"));
    assert_eq!(raw_address_str, format!("{}", address));
}

#[test]
fn test_address_display_round_trips() {
    let address = Address::from([7u8; 32]);
    let rendered = address.to_string();
    assert!(rendered.starts_with("vote1"));
    assert_eq!(Address::from_str(&rendered).unwrap(), address);
}

#[test]
fn test_pub_key_serialization() {
    let address = Address::from([11; 32]);
    let data: String = serde_json::to_string(&address).unwrap();
    let deserialized_address = serde_json::from_str::<Address>(&data).unwrap();

    assert_eq!(address, deserialized_address);
    assert_eq!(deserialized_address.as_ref(), &[11u8; 32][..]);
}

#[test]
fn test_wrong_hrp_is_rejected() {
    let mut bytes = [0u8; 32];
    bytes[0] = 1;
    let foreign = crate::address::vec_to_bech32m(&bytes, "sov").unwrap();

    let err = AddressBech32::from_str(&foreign).unwrap_err();
    assert!(matches!(err, crate::Bech32ParseError::WrongHRP(hrp) if hrp == "sov"));
    assert!(Address::from_str(&foreign).is_err());
}

#[test]
fn test_wrong_length_is_rejected() {
    let short = crate::address::vec_to_bech32m(&[1u8; 20], "vote").unwrap();
    let err = AddressBech32::from_str(&short).unwrap_err();
    assert!(matches!(err, crate::Bech32ParseError::WrongLength(20)));
}

#[test]
fn test_address_from_slice() {
    let bytes = [3u8; 32];
    assert_eq!(Address::try_from(&bytes[..]).unwrap(), Address::new(bytes));
    assert!(Address::try_from(&bytes[..31]).is_err());
}

#[test]
fn test_generated_addresses_are_deterministic() {
    let a = generate_address::<DefaultContext>("alice");
    let b = generate_address::<DefaultContext>("bob");
    assert_eq!(a, generate_address::<DefaultContext>("alice"));
    assert_ne!(a, b);
}

#[test]
fn test_prefix_combines_with_separator() {
    let prefix: ledger_state::Prefix =
        Prefix::new_storage("ledger::tests", "Counter", "value").into();
    assert_eq!(prefix.as_bytes(), b"ledger::tests/Counter/value/");
}

// A module that adds the call message to a counter, rejecting calls that
// would push it over a limit after having written the new value.
struct Counter {
    value: StateValue<u32>,
}

impl Default for Counter {
    fn default() -> Self {
        Self {
            value: StateValue::new(Prefix::new_storage(module_path!(), "Counter", "value").into()),
        }
    }
}

#[derive(Debug, BorshSerialize, BorshDeserialize, PartialEq)]
struct Incremented(u32);

impl Module for Counter {
    type Context = DefaultContext;
    type Config = u32;
    type CallMessage = u32;
    type Event = Incremented;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<MemoryStorage>,
    ) -> Result<(), Error> {
        self.value.set(config, working_set);
        Ok(())
    }

    fn call(
        &self,
        msg: Self::CallMessage,
        _context: &Self::Context,
        working_set: &mut WorkingSet<MemoryStorage>,
    ) -> Result<CallResponse, Error> {
        let new_value = self.value.get(working_set).unwrap_or_default() + msg;
        self.value.set(&new_value, working_set);
        working_set.add_event("incremented", &Incremented(new_value));
        if new_value > 10 {
            return Err(anyhow::anyhow!("Counter overflow: {}", new_value).into());
        }
        Ok(CallResponse::default())
    }
}

#[test]
fn test_runner_commits_accepted_calls() {
    let context = DefaultContext::new(generate_address::<DefaultContext>("sender"), 0);
    let mut runner = CallRunner::new(Counter::default(), MemoryStorage::new(), EventLog::default());
    runner.genesis(&1).unwrap();

    let receipt = runner.apply(4, &context).unwrap();
    assert_eq!(receipt.events.len(), 1);
    assert_eq!(
        receipt.events[0].decode::<Incremented>().unwrap(),
        Incremented(5)
    );

    let value = runner.query(|module, ws| module.value.get(ws));
    assert_eq!(value, Some(5));
    assert_eq!(runner.sink().events(), &receipt.events[..]);
}

#[test]
fn test_runner_reverts_rejected_calls() {
    let context = DefaultContext::new(generate_address::<DefaultContext>("sender"), 0);
    let mut runner = CallRunner::new(Counter::default(), MemoryStorage::new(), EventLog::default());
    runner.genesis(&8).unwrap();

    let err = runner.apply(5, &context).unwrap_err();
    assert_eq!(err.to_string(), "Counter overflow: 13");

    // Neither the write nor the event of the failed call survive.
    let value = runner.query(|module, ws| module.value.get(ws));
    assert_eq!(value, Some(8));
    assert!(runner.sink().events().is_empty());

    runner.apply(2, &context).unwrap();
    let value = runner.query(|module, ws| module.value.get(ws));
    assert_eq!(value, Some(10));
}

#[test]
fn test_error_downcast() {
    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("custom")]
    struct Custom;

    let err: Error = anyhow::Error::new(Custom).into();
    assert_eq!(err.downcast_ref::<Custom>(), Some(&Custom));
}

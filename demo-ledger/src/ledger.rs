use anyhow::Context as _;
use ledger_election::{
    Election, ElectionConfig, ElectionError, ElectionEvent, Elections, Phase, TallyEntry,
};
use ledger_modules_api::default_context::DefaultContext;
use ledger_modules_api::{Address, CallRunner, Context, EventSink, TracingEventSink};
use ledger_state::MemoryStorage;
use serde::Serialize;

use crate::batch::BatchCall;

type C = DefaultContext;

/// What happened to one call.
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The call was applied.
    Accepted { events: Vec<ElectionEvent<C>> },
    /// The call was rejected and changed nothing.
    Rejected { kind: &'static str, reason: String },
}

/// The state of one election at a given instant.
#[derive(Debug, PartialEq, Serialize)]
pub struct ElectionSummary {
    pub election: Election<C>,
    pub phase: Phase,
    pub tally: Vec<TallyEntry<Address>>,
}

/// An in-memory election ledger.
pub struct Ledger<E: EventSink = TracingEventSink> {
    runner: CallRunner<Elections<C>, E>,
}

impl<E: EventSink> Ledger<E> {
    /// Creates the ledger and applies its genesis.
    pub fn new(genesis: &ElectionConfig<C>, sink: E) -> anyhow::Result<Self> {
        let mut runner = CallRunner::new(Elections::default(), MemoryStorage::new(), sink);
        runner
            .genesis(genesis)
            .context("Failed to apply the genesis config")?;
        Ok(Self { runner })
    }

    /// Applies one call. Rejections are outcomes, not errors.
    pub fn apply(&mut self, batch_call: BatchCall) -> anyhow::Result<Outcome> {
        let context = C::new(batch_call.sender, batch_call.timestamp);
        match self.runner.apply(batch_call.call, &context) {
            Ok(receipt) => {
                let events = receipt
                    .events
                    .iter()
                    .map(|event| event.decode::<ElectionEvent<C>>())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Outcome::Accepted { events })
            }
            Err(err) => Ok(Outcome::Rejected {
                kind: err
                    .downcast_ref::<ElectionError>()
                    .map_or("ModuleError", ElectionError::kind),
                reason: err.to_string(),
            }),
        }
    }

    /// Every election in creation order, with its phase at `now` and its tally.
    pub fn summary(&self, now: u64) -> Vec<ElectionSummary> {
        self.runner.query(|module, ws| {
            let mut summaries = Vec::new();
            for index in 0..module.count_elections(ws) {
                let Some(name) = module.election_at(index, ws) else {
                    continue;
                };
                let Some(election) = module.get_election(&name, ws) else {
                    continue;
                };
                summaries.push(ElectionSummary {
                    phase: election.phase_at(now),
                    tally: module.tally(&name, ws),
                    election,
                });
            }
            summaries
        })
    }
}

//! Applies calls to a module one at a time, each either fully or not at all.

use ledger_state::{Event, Storage, WorkingSet};
use tracing::{debug, info};

use crate::{CallResponse, Error, EventSink, Module, Spec};

type StorageOf<M> = <<M as Module>::Context as Spec>::Storage;

/// The outcome of a call that committed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CallReceipt {
    /// The response of the module.
    pub response: CallResponse,
    /// The events the call emitted, in emission order.
    pub events: Vec<Event>,
}

/// Owns a module and its storage and applies calls to them in a total order.
///
/// Each call runs in a fresh revertable [`WorkingSet`]. If the module
/// returns an error the working set is reverted and the sink sees nothing;
/// otherwise the writes are committed to storage and the events forwarded to
/// the sink.
pub struct CallRunner<M: Module, E: EventSink> {
    module: M,
    storage: StorageOf<M>,
    sink: E,
}

impl<M: Module, E: EventSink> CallRunner<M, E> {
    /// Creates a runner over `storage`.
    pub fn new(module: M, storage: StorageOf<M>, sink: E) -> Self {
        Self {
            module,
            storage,
            sink,
        }
    }

    /// Runs the module's genesis. Like a call, it commits only if it succeeds.
    pub fn genesis(&mut self, config: &M::Config) -> Result<CallReceipt, Error> {
        let mut working_set = WorkingSet::new(self.storage.clone());
        match self.module.genesis(config, &mut working_set) {
            Ok(()) => {
                debug!("Genesis applied");
                Ok(self.commit(working_set, CallResponse::default()))
            }
            Err(e) => {
                working_set.revert();
                Err(e)
            }
        }
    }

    /// Applies one call on behalf of `context`.
    pub fn apply(
        &mut self,
        message: M::CallMessage,
        context: &M::Context,
    ) -> Result<CallReceipt, Error> {
        debug!(?message, "Applying call");
        let mut working_set = WorkingSet::new(self.storage.clone());
        match self.module.call(message, context, &mut working_set) {
            Ok(response) => Ok(self.commit(working_set, response)),
            Err(e) => {
                working_set.revert();
                info!(error = %e, "Call rejected, state left untouched");
                Err(e)
            }
        }
    }

    /// Runs a read-only query against the last committed state.
    ///
    /// Writes the query might make are discarded.
    pub fn query<R>(&self, query: impl FnOnce(&M, &mut WorkingSet<StorageOf<M>>) -> R) -> R {
        let mut working_set = WorkingSet::new(self.storage.clone());
        query(&self.module, &mut working_set)
    }

    /// The sink events are forwarded to.
    pub fn sink(&self) -> &E {
        &self.sink
    }

    fn commit(
        &mut self,
        mut working_set: WorkingSet<StorageOf<M>>,
        response: CallResponse,
    ) -> CallReceipt {
        let events = working_set.take_events();
        let mut checkpoint = working_set.checkpoint();
        let writes = checkpoint.freeze();
        debug!(
            writes = writes.ordered_writes.len(),
            events = events.len(),
            "Committing call"
        );
        self.storage.commit(&writes);

        for event in &events {
            self.sink.publish(event);
        }

        CallReceipt { response, events }
    }
}

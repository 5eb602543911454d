//! Node assembly — builds the stores, dispatcher, and services from a
//! configuration.

use std::sync::Arc;

use vox_ballot::VoteLedger;
use vox_notifier::{Dispatcher, Mailer, RetryPolicy};
use vox_store::poll::{NewPoll, PollStore};
use vox_store_memory::MemoryStore;
use vox_types::ServiceParams;
use vox_verification::{CodeDelivery, VerificationService};

use crate::config::NodeConfig;
use crate::error::NodeError;

/// The assembled service: stores, verification, ledger.
///
/// Construction order matters only in that the dispatcher worker must be
/// spawned on a running tokio runtime; everything else is plain wiring.
/// The node is cheap to share behind an `Arc`.
pub struct Node {
    store: Arc<MemoryStore>,
    verification: VerificationService,
    ledger: VoteLedger,
    params: ServiceParams,
}

impl Node {
    /// Build a node whose deliveries go through the retrying dispatcher
    /// backed by `mailer`. Must be called from within a tokio runtime.
    pub fn new(config: &NodeConfig, mailer: Arc<dyn Mailer>) -> Result<Self, NodeError> {
        let params = config.service_params();
        let handle = Dispatcher::spawn(mailer, RetryPolicy::from_params(&params));
        Self::with_delivery(config, Arc::new(handle))
    }

    /// Build a node with an explicit delivery seam. Tests use this to
    /// observe enqueued codes without a worker in between.
    pub fn with_delivery(
        config: &NodeConfig,
        delivery: Arc<dyn CodeDelivery>,
    ) -> Result<Self, NodeError> {
        let params = config.service_params();
        let store = Arc::new(MemoryStore::new());

        let verification =
            VerificationService::new(store.clone(), store.clone(), delivery, &params);
        let ledger = VoteLedger::new(store.clone(), store.clone(), store.clone());

        let node = Self {
            store,
            verification,
            ledger,
            params,
        };
        node.seed_polls(config)?;
        Ok(node)
    }

    fn seed_polls(&self, config: &NodeConfig) -> Result<(), NodeError> {
        for seed in &config.poll_seeds {
            let record = self.store.create_poll(NewPoll {
                title: seed.title.clone(),
                description: seed.description.clone(),
                option_a: seed.option_a.clone(),
                option_b: seed.option_b.clone(),
            })?;
            tracing::info!(id = record.id, slug = %record.slug, "seeded poll");
        }
        Ok(())
    }

    pub fn verification(&self) -> &VerificationService {
        &self.verification
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    pub fn params(&self) -> &ServiceParams {
        &self.params
    }
}

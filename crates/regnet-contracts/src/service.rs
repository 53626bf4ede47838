//! # Registry Service
//!
//! Runs each invocation as exactly one ledger transaction: open it, dispatch
//! the call, commit on success. On any error the transaction is dropped and
//! the host discards its writes, so a failed purchase leaves both balances
//! and the listing as they were.

use crate::adapters::router::{dispatch, Invocation};
use crate::config::RegistryConfig;
use crate::errors::{ErrorKind, RegistryError};
use chrono::{DateTime, Utc};
use regnet_ledger::{ClientIdentity, CommitReceipt, LedgerHost};
use regnet_telemetry::metrics::{
    OPERATIONS_TOTAL, OPERATION_DURATION, PROPERTY_TRANSFERS, TRANSACTIONS_ROLLED_BACK,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

/// Counters kept by the service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Invocations received.
    pub submitted: u64,
    /// Invocations whose transaction was committed.
    pub committed: u64,
    /// Invocations whose transaction was discarded.
    pub rolled_back: u64,
    /// Invocations rejected by caller authorization.
    pub unauthorized: u64,
}

/// Result of a committed invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationOutcome {
    /// Record returned by the operation.
    pub value: Value,
    /// Commit summary from the host.
    pub receipt: CommitReceipt,
}

/// Executes contract invocations against a ledger host.
pub struct RegistryService<H: LedgerHost> {
    config: RegistryConfig,
    host: Arc<H>,
    stats: Arc<RwLock<ServiceStats>>,
}

impl<H: LedgerHost> RegistryService<H> {
    /// Service over `host`.
    pub fn new(host: Arc<H>, config: RegistryConfig) -> Self {
        if let Err(e) = regnet_telemetry::register_metrics() {
            warn!(error = %e, "Metrics registration failed; continuing without export");
        }
        Self {
            config,
            host,
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// The ledger host.
    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    /// Active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Current counters.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// Run `invocation` for `identity`, timestamped now.
    pub async fn submit(
        &self,
        identity: ClientIdentity,
        invocation: &Invocation,
    ) -> Result<InvocationOutcome, RegistryError> {
        self.submit_at(identity, Utc::now(), invocation).await
    }

    /// Run `invocation` for `identity` with a client-supplied timestamp.
    #[instrument(
        skip(self, invocation),
        fields(msp_id = %identity.msp_id, function = %invocation.qualified_name())
    )]
    pub async fn submit_at(
        &self,
        identity: ClientIdentity,
        timestamp: DateTime<Utc>,
        invocation: &Invocation,
    ) -> Result<InvocationOutcome, RegistryError> {
        self.stats.write().await.submitted += 1;
        let label = metric_label(invocation);
        let started = Instant::now();

        let tx = self.host.begin_at(identity, timestamp);
        let result = match dispatch(&tx, &self.config, invocation).await {
            Ok(value) => self
                .host
                .commit(tx)
                .map(|receipt| InvocationOutcome { value, receipt })
                .map_err(RegistryError::from),
            // Dropping the transaction discards its writes.
            Err(e) => Err(e),
        };

        OPERATION_DURATION
            .with_label_values(&[label])
            .observe(started.elapsed().as_secs_f64());

        let mut stats = self.stats.write().await;
        match &result {
            Ok(outcome) => {
                stats.committed += 1;
                OPERATIONS_TOTAL.with_label_values(&[label, "committed"]).inc();
                if invocation.function == "purchaseProperty" {
                    PROPERTY_TRANSFERS.inc();
                }
                info!(
                    tx_id = %outcome.receipt.tx_id,
                    height = outcome.receipt.height,
                    "Transaction committed"
                );
            }
            Err(e) => {
                stats.rolled_back += 1;
                if e.kind() == ErrorKind::Unauthorized {
                    stats.unauthorized += 1;
                }
                OPERATIONS_TOTAL
                    .with_label_values(&[label, e.kind().as_str()])
                    .inc();
                TRANSACTIONS_ROLLED_BACK.inc();
                warn!(error = %e, kind = %e.kind(), "Transaction rolled back");
            }
        }
        result
    }
}

fn metric_label(invocation: &Invocation) -> &'static str {
    invocation
        .contract
        .functions()
        .iter()
        .copied()
        .find(|f| *f == invocation.function)
        .unwrap_or("unknown")
}

// =============================================================================
// TESTS
// =============================================================================

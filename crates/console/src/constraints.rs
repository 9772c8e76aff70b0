//! Constraint check aggregator.
//!
//! Fans the six constraint queries out concurrently per table and
//! fans the results back in. The aggregate is all-or-nothing: if any
//! of the six fails, that run's partial results are discarded and the
//! table's cache is left exactly as it was. Individual re-checks merge
//! a single kind. Cached results are keyed per table and never
//! invalidated automatically — only an explicit re-check overwrites.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use maskadmin_core::constraint::{
    classify_foreign_keys, ConstraintCheckState, ConstraintKind, ForeignKeyRef, ALL_KINDS,
};
use maskadmin_core::workflow::Id;

use crate::services::{ConstraintService, ServiceError};

/// Cached check results for one table.
#[derive(Debug, Clone, Default)]
pub struct TableReport {
    pub last_checked: Option<DateTime<Utc>>,
    kinds: HashMap<ConstraintKind, ConstraintCheckState>,
}

impl TableReport {
    /// Result for one kind, if it has been checked.
    pub fn kind(&self, kind: ConstraintKind) -> Option<&ConstraintCheckState> {
        self.kinds.get(&kind)
    }

    /// Kinds populated so far, in display order.
    pub fn checked_kinds(&self) -> Vec<ConstraintKind> {
        ALL_KINDS
            .into_iter()
            .filter(|k| self.kinds.contains_key(k))
            .collect()
    }
}

/// Aggregator for one connection's constraint checks.
pub struct ConstraintAggregator {
    service: Arc<dyn ConstraintService>,
    connection_id: Id,
    inner: Mutex<AggregatorState>,
}

#[derive(Default)]
struct AggregatorState {
    /// Keyed by `schema.table`.
    cache: HashMap<String, TableReport>,
    /// Advisory: suppresses the triggering control while a check runs.
    /// Not a lock — a racing caller is not blocked.
    loading: HashSet<String>,
}

impl ConstraintAggregator {
    pub fn new(service: Arc<dyn ConstraintService>, connection_id: Id) -> Self {
        Self {
            service,
            connection_id,
            inner: Mutex::new(AggregatorState::default()),
        }
    }

    /// Cached report for a table, if any check has completed.
    pub fn report(&self, schema: &str, table: &str) -> Option<TableReport> {
        self.lock().cache.get(&key(schema, table)).cloned()
    }

    /// Whether a check is currently running for a table. Advisory
    /// only.
    pub fn is_loading(&self, schema: &str, table: &str) -> bool {
        self.lock().loading.contains(&key(schema, table))
    }

    /// Run all six checks concurrently and merge the results.
    ///
    /// Any single failure fails the whole run: nothing from it is
    /// cached, and whatever was cached before remains.
    pub async fn check_all(&self, schema: &str, table: &str) -> Result<TableReport, ServiceError> {
        let table_key = key(schema, table);
        self.lock().loading.insert(table_key.clone());

        let result = futures::future::try_join_all(
            ALL_KINDS
                .into_iter()
                .map(|kind| self.service.check(kind, self.connection_id, schema, table)),
        )
        .await;

        self.lock().loading.remove(&table_key);

        match result {
            Ok(rows_per_kind) => {
                let mut report = TableReport {
                    last_checked: Some(Utc::now()),
                    kinds: HashMap::new(),
                };
                for (kind, rows) in ALL_KINDS.into_iter().zip(rows_per_kind) {
                    report
                        .kinds
                        .insert(kind, ConstraintCheckState::from_rows(kind, rows));
                }
                tracing::debug!(table = %table_key, "Constraint check complete");
                self.lock().cache.insert(table_key, report.clone());
                Ok(report)
            }
            Err(e) => {
                tracing::warn!(table = %table_key, error = %e, "Constraint check failed");
                Err(e)
            }
        }
    }

    /// Re-check one kind in isolation, merging only that kind into the
    /// table's cache and leaving the others untouched.
    pub async fn check_individual(
        &self,
        schema: &str,
        table: &str,
        kind: ConstraintKind,
    ) -> Result<ConstraintCheckState, ServiceError> {
        let table_key = key(schema, table);
        self.lock().loading.insert(table_key.clone());

        let result = self
            .service
            .check(kind, self.connection_id, schema, table)
            .await;

        let mut state = self.lock();
        state.loading.remove(&table_key);
        match result {
            Ok(rows) => {
                let check = ConstraintCheckState::from_rows(kind, rows);
                let report = state.cache.entry(table_key).or_default();
                report.last_checked = Some(Utc::now());
                report.kinds.insert(kind, check.clone());
                Ok(check)
            }
            Err(e) => Err(e),
        }
    }

    /// Foreign-key rows for a table, classified against it. Empty when
    /// foreign keys have not been checked.
    pub fn foreign_key_refs(&self, schema: &str, table: &str) -> Vec<ForeignKeyRef> {
        self.lock()
            .cache
            .get(&key(schema, table))
            .and_then(|report| report.kind(ConstraintKind::ForeignKeys))
            .map(|check| classify_foreign_keys(&check.rows, schema, table))
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AggregatorState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn key(schema: &str, table: &str) -> String {
    format!("{schema}.{table}")
}

//! Read-only SLA policy store.
//!
//! Loaded once per run so that administrative changes take effect on the next
//! invocation without ever rewriting a past run's decisions.

use crate::entity::{service_order::ServiceType, sla_policy};
use crate::error::{ConfigurationError, FetchError};
use sea_orm::{DatabaseConnection, EntityTrait};
use std::collections::HashMap;

/// SLA configuration for one service type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlaPolicy {
    pub total_duration_days: i32,
    pub warning_threshold_percent: f64,
}

impl SlaPolicy {
    /// Total allowed window in hours.
    pub fn total_hours(&self) -> f64 {
        f64::from(self.total_duration_days) * 24.0
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.total_duration_days <= 0 {
            return Err(ConfigurationError::NonPositiveDuration(
                self.total_duration_days,
            ));
        }
        if self.warning_threshold_percent <= 0.0 || self.warning_threshold_percent > 100.0 {
            return Err(ConfigurationError::ThresholdOutOfRange(
                self.warning_threshold_percent,
            ));
        }
        Ok(())
    }
}

/// Per-run snapshot of the `sla_policy` table, keyed by service type.
#[derive(Debug, Default)]
pub struct PolicyStore {
    policies: HashMap<ServiceType, SlaPolicy>,
}

impl PolicyStore {
    /// Builds a store from `(service type, policy)` pairs. The table carries a
    /// unique index on `service_type`; if duplicates appear anyway the first
    /// row wins and the rest are logged.
    pub fn new(entries: impl IntoIterator<Item = (ServiceType, SlaPolicy)>) -> Self {
        let mut policies = HashMap::new();
        for (service_type, policy) in entries {
            if policies.contains_key(&service_type) {
                tracing::warn!(
                    name = "sla.policy.duplicate",
                    target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                    message = "Duplicate SLA policy ignored, first row wins",
                    service_type = %service_type,
                );
                continue;
            }
            policies.insert(service_type, policy);
        }
        Self { policies }
    }

    /// Reads the whole policy table. A read failure here aborts the run.
    #[tracing::instrument(skip_all)]
    pub async fn load(db: &DatabaseConnection) -> Result<Self, FetchError> {
        let rows = sla_policy::Entity::find()
            .all(db)
            .await
            .map_err(FetchError::Policies)?;
        Ok(Self::new(rows.into_iter().map(|row| {
            (
                row.service_type,
                SlaPolicy {
                    total_duration_days: row.total_duration_days,
                    warning_threshold_percent: row.warning_threshold_percent,
                },
            )
        })))
    }

    /// Looks up the policy for a service type. `None` means the order is
    /// skipped, not that anything failed.
    pub fn lookup(&self, service_type: ServiceType) -> Option<&SlaPolicy> {
        self.policies.get(&service_type)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_entries_keep_first() {
        let store = PolicyStore::new([
            (
                ServiceType::NewService,
                SlaPolicy {
                    total_duration_days: 10,
                    warning_threshold_percent: 70.0,
                },
            ),
            (
                ServiceType::NewService,
                SlaPolicy {
                    total_duration_days: 99,
                    warning_threshold_percent: 50.0,
                },
            ),
        ]);

        assert_eq!(store.len(), 1);
        let policy = store.lookup(ServiceType::NewService).unwrap();
        assert_eq!(policy.total_duration_days, 10);
    }

    #[test]
    fn lookup_missing_type_is_none() {
        let store = PolicyStore::new([]);
        assert!(store.is_empty());
        assert!(store.lookup(ServiceType::LegalWarranty).is_none());
    }
}

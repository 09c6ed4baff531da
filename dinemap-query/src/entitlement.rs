//! Entitlement gating for multi-dimension filters.
//!
//! Combining more than one filter dimension is a premium feature. The
//! gate counts active dimensions (see
//! [`RestaurantFilter::dimension_count`]) and, above the threshold,
//! requires an explicit allow from the billing collaborator. Anything
//! else - a disallow, an anonymous user, a failed billing call - is
//! `PremiumRequired`: the gate fails closed and the query never runs.

use crate::error::{QueryError, Result};
use crate::filter::RestaurantFilter;
use async_trait::async_trait;
use dinemap_core::UserId;

/// Feature flag checked for multi-dimension filtering.
pub const ADVANCED_FILTERS_FEATURE: &str = "advanced-filters";

/// Outcome of an entitlement check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entitlement {
    pub allowed: bool,
}

/// Billing/entitlement collaborator.
#[async_trait]
pub trait EntitlementClient: Send + Sync {
    /// Check whether a customer may use a feature.
    async fn check(
        &self,
        customer: Option<&UserId>,
        feature_id: &str,
    ) -> std::result::Result<Entitlement, dinemap_core::Error>;
}

/// Auth collaborator: who is making this request, if anyone.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn current_user_id(&self) -> Option<UserId>;
}

/// The premium gate for a named feature.
#[derive(Debug, Clone)]
pub struct FeatureGate {
    feature_id: String,
    /// Dimension counts above this require entitlement.
    threshold: usize,
}

impl Default for FeatureGate {
    fn default() -> Self {
        Self::advanced_filters()
    }
}

impl FeatureGate {
    pub fn advanced_filters() -> Self {
        Self {
            feature_id: ADVANCED_FILTERS_FEATURE.to_string(),
            threshold: 1,
        }
    }

    pub fn feature_id(&self) -> &str {
        &self.feature_id
    }

    /// Whether this filter set is gated at all.
    pub fn requires_check(&self, filter: &RestaurantFilter) -> bool {
        filter.dimension_count() > self.threshold
    }

    /// Deny gated requests outright.
    ///
    /// Used by entry points with no identity to check: within the free
    /// tier they pass, above it they fail closed without a billing call.
    pub fn deny_if_gated(&self, filter: &RestaurantFilter) -> Result<()> {
        if self.requires_check(filter) {
            return Err(QueryError::PremiumRequired {
                feature: self.feature_id.clone(),
            });
        }
        Ok(())
    }

    /// Authorize a gated request against the billing collaborator.
    ///
    /// Only an explicit allow for an identified customer passes. An
    /// anonymous caller is denied without a billing call, and a failed
    /// check call is treated as a denial, not surfaced as an upstream
    /// error.
    pub async fn authorize(
        &self,
        client: &dyn EntitlementClient,
        customer: Option<&UserId>,
        filter: &RestaurantFilter,
    ) -> Result<()> {
        if !self.requires_check(filter) {
            return Ok(());
        }

        if customer.is_none() {
            return Err(QueryError::PremiumRequired {
                feature: self.feature_id.clone(),
            });
        }

        match client.check(customer, &self.feature_id).await {
            Ok(Entitlement { allowed: true }) => Ok(()),
            Ok(Entitlement { allowed: false }) => Err(QueryError::PremiumRequired {
                feature: self.feature_id.clone(),
            }),
            Err(err) => {
                tracing::warn!(
                    feature = %self.feature_id,
                    error = %err,
                    "entitlement check failed, denying"
                );
                Err(QueryError::PremiumRequired {
                    feature: self.feature_id.clone(),
                })
            }
        }
    }
}

// ============================================================================
// Static implementations (embedded mode, tests)
// ============================================================================

/// Entitlement client with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct StaticEntitlements {
    allowed: bool,
}

impl StaticEntitlements {
    pub fn allow_all() -> Self {
        Self { allowed: true }
    }

    pub fn deny_all() -> Self {
        Self { allowed: false }
    }
}

#[async_trait]
impl EntitlementClient for StaticEntitlements {
    async fn check(
        &self,
        _customer: Option<&UserId>,
        _feature_id: &str,
    ) -> std::result::Result<Entitlement, dinemap_core::Error> {
        Ok(Entitlement {
            allowed: self.allowed,
        })
    }
}

/// Auth provider with a fixed identity (or none).
#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    user: Option<UserId>,
}

impl StaticAuth {
    /// No authenticated user.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(id: impl Into<String>) -> Self {
        Self {
            user: Some(UserId::new(id)),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn current_user_id(&self) -> Option<UserId> {
        self.user.clone()
    }
}

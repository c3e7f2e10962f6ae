//! Partner availability matching.
//!
//! The matcher turns draft slots into an [`AvailabilityQuery`], hands it to a
//! [`PartnerLookup`] and relays the partners it gets back. Filtering against
//! `minAvailabilityPercentage` is the lookup's contract; the matcher only
//! re-filters when [`PlannerConfig::local_filter`] is set.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{PlannerConfig, Ranking};
use crate::error::{LookupError, PlannerError, Result};
use crate::query::{AvailabilityQuery, DraftSlot, PartnerMatch};

/// Credentials and request metadata handed to the lookup on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupContext {
    /// Bearer token for the availability service, if it requires one.
    pub bearer_token: Option<String>,
    /// Caller-assigned id used to correlate lookup requests in logs.
    pub request_id: Option<String>,
}

impl LookupContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_bearer_token(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
            request_id: None,
        }
    }

    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

/// The external partner availability search.
///
/// Implementations are expected to return only partners whose availability is
/// at least `query.min_availability_percentage`, and own any retry policy.
#[async_trait]
pub trait PartnerLookup: Send + Sync {
    async fn query_availability(
        &self,
        ctx: &LookupContext,
        query: &AvailabilityQuery,
    ) -> std::result::Result<Vec<PartnerMatch>, LookupError>;
}

#[derive(Debug, Clone, Default)]
pub struct AvailabilityMatcher {
    config: PlannerConfig,
}

impl AvailabilityMatcher {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Query `lookup` for partners able to cover `drafts` with at most
    /// `tolerance_percent` shortfall.
    ///
    /// The query has one entry per draft, in draft order, and a threshold of
    /// `100 - tolerance_percent`. Partners come back in lookup order unless
    /// [`Ranking::ByAvailability`] is configured. The lookup is called exactly
    /// once; dropping the returned future abandons it.
    ///
    /// # Errors
    /// Returns `PlannerError::Validation` if `drafts` is empty or
    /// `tolerance_percent > 100`, and `PlannerError::Lookup` if the lookup fails.
    #[tracing::instrument(
        name = "find_available_partners",
        skip_all,
        fields(slots = drafts.len(), tolerance = tolerance_percent, request_id = ctx.request_id.as_deref())
    )]
    pub async fn find_available_partners<L>(
        &self,
        drafts: &[DraftSlot],
        tolerance_percent: u8,
        lookup: &L,
        ctx: &LookupContext,
    ) -> Result<Vec<PartnerMatch>>
    where
        L: PartnerLookup + ?Sized,
    {
        let query = self.build_query(drafts, tolerance_percent)?;
        let threshold = query.min_availability_percentage;

        let partners = lookup.query_availability(ctx, &query).await?;
        let received = partners.len();
        let partners = self.post_process(partners, threshold);

        tracing::debug!(
            min_availability = threshold,
            received,
            returned = partners.len(),
            "partner lookup complete"
        );
        Ok(partners)
    }

    /// Validate inputs and build the query the lookup will receive.
    pub fn build_query(&self, drafts: &[DraftSlot], tolerance_percent: u8) -> Result<AvailabilityQuery> {
        if drafts.is_empty() {
            return Err(PlannerError::Validation("no draft schedule".to_string()));
        }
        if tolerance_percent > 100 {
            return Err(PlannerError::Validation(format!(
                "tolerance must be between 0 and 100, got {}",
                tolerance_percent
            )));
        }
        Ok(AvailabilityQuery::from_drafts(drafts, tolerance_percent))
    }

    /// Apply the configured local filter and ranking to a lookup result.
    pub fn post_process(&self, mut partners: Vec<PartnerMatch>, threshold: u8) -> Vec<PartnerMatch> {
        if self.config.local_filter {
            partners.retain(|p| p.meets(threshold));
        }
        if self.config.ranking == Ranking::ByAvailability {
            partners.sort_by(|a, b| b.availability_percentage.cmp(&a.availability_percentage));
        }
        partners
    }
}

/// A lookup that always answers with the same partner list.
///
/// Useful for wiring a console against fixed data. The list is returned
/// unfiltered, and the last query received is kept for inspection.
#[derive(Debug, Default)]
pub struct StaticLookup {
    partners: Vec<PartnerMatch>,
    last_query: Mutex<Option<AvailabilityQuery>>,
}

impl StaticLookup {
    pub fn new(partners: Vec<PartnerMatch>) -> Self {
        Self {
            partners,
            last_query: Mutex::new(None),
        }
    }

    pub fn last_query(&self) -> Option<AvailabilityQuery> {
        self.last_query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PartnerLookup for StaticLookup {
    async fn query_availability(
        &self,
        _ctx: &LookupContext,
        query: &AvailabilityQuery,
    ) -> std::result::Result<Vec<PartnerMatch>, LookupError> {
        *self
            .last_query
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(query.clone());
        Ok(self.partners.clone())
    }
}

/// Wraps a lookup with a deadline. An elapsed deadline is reported as
/// [`LookupError::Timeout`] and the inner call is dropped.
#[derive(Debug)]
pub struct TimeoutLookup<L> {
    inner: L,
    timeout: Duration,
}

impl<L> TimeoutLookup<L> {
    pub fn new(inner: L, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

#[async_trait]
impl<L: PartnerLookup> PartnerLookup for TimeoutLookup<L> {
    async fn query_availability(
        &self,
        ctx: &LookupContext,
        query: &AvailabilityQuery,
    ) -> std::result::Result<Vec<PartnerMatch>, LookupError> {
        tokio::time::timeout(self.timeout, self.inner.query_availability(ctx, query))
            .await
            .map_err(|_| LookupError::Timeout(self.timeout))?
    }
}

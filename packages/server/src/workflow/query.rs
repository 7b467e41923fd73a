use std::cmp::Ordering;

use common::{CertificationStatus, Submission};
use serde::Serialize;
use tracing::instrument;

use super::engine::WorkflowEngine;
use super::error::WorkflowError;
use crate::store::SubmissionFilter;

/// Listing order: most recent last relevant timestamp first, ties by id.
pub fn listing_order(a: &Submission, b: &Submission) -> Ordering {
    b.last_relevant_at()
        .cmp(&a.last_relevant_at())
        .then_with(|| a.id.cmp(&b.id))
}

/// An ordered snapshot of matching submissions.
///
/// Sorting needs every match, so the listing is materialized when built
/// rather than produced lazily; iteration and paging read the sorted vector.
/// Each call to `list_submissions` builds a fresh one; nothing about a
/// listing is remembered between calls.
#[derive(Clone, Debug, Default)]
pub struct Listing {
    items: Vec<Submission>,
}

impl Listing {
    fn new(mut items: Vec<Submission>) -> Self {
        items.sort_by(listing_order);
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Submission> {
        self.items.iter()
    }

    /// One page of the listing. `page` is 1-based; out-of-range pages are empty.
    pub fn page(&self, page: u64, per_page: u64) -> ListingPage<'_> {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let total = self.items.len() as u64;

        let start = ((page - 1).saturating_mul(per_page)).min(total) as usize;
        let end = (start as u64).saturating_add(per_page).min(total) as usize;

        ListingPage {
            items: &self.items[start..end],
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
        }
    }
}

impl IntoIterator for Listing {
    type Item = Submission;
    type IntoIter = std::vec::IntoIter<Submission>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Listing {
    type Item = &'a Submission;
    type IntoIter = std::slice::Iter<'a, Submission>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A slice of a [`Listing`] plus pagination metadata.
#[derive(Debug)]
pub struct ListingPage<'a> {
    pub items: &'a [Submission],
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// Number of submissions in one status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct StatusCount {
    pub status: CertificationStatus,
    #[schema(example = 12)]
    pub count: u64,
}

impl WorkflowEngine {
    /// All submissions matching `filter`, in listing order.
    ///
    /// Read-only and lock-free: results may reflect a concurrent transition
    /// either before or after it lands.
    #[instrument(skip(self))]
    pub async fn list_submissions(
        &self,
        filter: &SubmissionFilter,
    ) -> Result<Listing, WorkflowError> {
        let candidates = self.store.query(filter).await?;
        Ok(Listing::new(
            candidates.into_iter().filter(|s| filter.matches(s)).collect(),
        ))
    }

    /// Per-status totals, every status present, in lifecycle order.
    #[instrument(skip(self))]
    pub async fn status_counts(
        &self,
        academic_period_id: Option<&str>,
    ) -> Result<Vec<StatusCount>, WorkflowError> {
        let filter = SubmissionFilter {
            academic_period_id: academic_period_id.map(str::to_string),
            ..Default::default()
        };
        let listing = self.list_submissions(&filter).await?;

        Ok(CertificationStatus::ALL
            .iter()
            .map(|status| StatusCount {
                status: *status,
                count: listing.iter().filter(|s| s.status == *status).count() as u64,
            })
            .collect())
    }
}

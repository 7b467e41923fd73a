//! Listing filters shared by the store adapters and the engine.
//!
//! Adapters may push any subset of a filter down to their backend, but the
//! engine always re-applies [`SubmissionFilter::matches`] on what comes back.

use chrono::{DateTime, Utc};
use common::{CertificationStatus, Submission};

/// Inclusive bounds on a submission's last relevant timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| at >= from) && self.to.is_none_or(|to| at <= to)
    }
}

/// Listing filters. Every field is optional; set fields are AND-ed.
#[derive(Clone, Debug, Default)]
pub struct SubmissionFilter {
    pub status: Option<CertificationStatus>,
    /// `None` means every period.
    pub academic_period_id: Option<String>,
    /// Case-insensitive substring of the display name or external id.
    pub text: Option<String>,
    pub date_range: Option<DateRange>,
}

impl SubmissionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: CertificationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.academic_period_id = Some(period.into());
        self
    }

    /// Blank text is treated as no text filter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let text = text.trim();
        self.text = (!text.is_empty()).then(|| text.to_lowercase());
        self
    }

    pub fn with_date_range(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.date_range = (from.is_some() || to.is_some()).then_some(DateRange { from, to });
        self
    }

    pub fn matches(&self, submission: &Submission) -> bool {
        if self.status.is_some_and(|s| s != submission.status) {
            return false;
        }
        if let Some(ref period) = self.academic_period_id
            && *period != submission.academic_period_id
        {
            return false;
        }
        if let Some(ref text) = self.text {
            let needle = text.to_lowercase();
            if !submission.display_name.to_lowercase().contains(&needle)
                && !submission.external_id.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(range) = self.date_range
            && !range.contains(submission.last_relevant_at())
        {
            return false;
        }
        true
    }
}

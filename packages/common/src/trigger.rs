#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named action a reviewer requests on a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "verify"))]
    Verify,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "reject"))]
    Reject,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "advise_consultation"))]
    AdviseConsultation,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "cancel_advice"))]
    CancelAdvice,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "issue_certificate"))]
    IssueCertificate,
}

impl Trigger {
    pub const ALL: &'static [Trigger] = &[
        Self::Verify,
        Self::Reject,
        Self::AdviseConsultation,
        Self::CancelAdvice,
        Self::IssueCertificate,
    ];

    /// Whether the trigger must carry a non-blank reason.
    pub fn requires_reason(&self) -> bool {
        matches!(self, Self::Reject | Self::AdviseConsultation)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verify => "verify",
            Self::Reject => "reject",
            Self::AdviseConsultation => "advise_consultation",
            Self::CancelAdvice => "cancel_advice",
            Self::IssueCertificate => "issue_certificate",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Invalid trigger '{invalid}'. Valid values: verify, reject, advise_consultation, cancel_advice, issue_certificate"
)]
pub struct ParseTriggerError {
    invalid: String,
}

impl FromStr for Trigger {
    type Err = ParseTriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseTriggerError {
                invalid: s.to_string(),
            })
    }
}

#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a medical-document submission in the certification lifecycle.
///
/// This is the single source of truth for where a submission stands. When the
/// `sea-orm` feature is enabled, the enum is stored directly as a string column.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum CertificationStatus {
    /// Uploaded and waiting for review.
    #[default]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "pending"))]
    Pending,
    /// Referred for a medical consultation.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "for_consultation"))]
    ForConsultation,
    /// Documents checked and accepted.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "verified"))]
    Verified,
    /// Documents refused; a rejection reason is on record.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "rejected"))]
    Rejected,
    /// Certificate issued. Terminal.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "issued"))]
    Issued,
}

impl CertificationStatus {
    /// All possible status values, in lifecycle order.
    pub const ALL: &'static [CertificationStatus] = &[
        Self::Pending,
        Self::ForConsultation,
        Self::Verified,
        Self::Rejected,
        Self::Issued,
    ];

    /// Returns true if no trigger leaves this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Issued)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::ForConsultation => "for_consultation",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
            Self::Issued => "issued",
        }
    }
}

impl fmt::Display for CertificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid status '{invalid}'. Valid values: pending, for_consultation, verified, rejected, issued")]
pub struct ParseStatusError {
    invalid: String,
}

impl FromStr for CertificationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "for_consultation" => Ok(Self::ForConsultation),
            "verified" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            "issued" => Ok(Self::Issued),
            _ => Err(ParseStatusError {
                invalid: s.to_string(),
            }),
        }
    }
}

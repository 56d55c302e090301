//! Per-page view models handed to the presentation layer.
//!
//! Every builder takes a `DashboardResponse`. A not-ok response still yields a
//! complete view: empty series, placeholder KPIs and an error header.

use serde::Serialize;
use std::borrow::Cow;
use crate::models::KpiValue;
use crate::payload::{DashboardPayload, DashboardResponse};

pub mod bots;
pub mod overview;
pub mod performance;
pub mod preview;
pub mod risk;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageHeader {
    pub title: &'static str,
    pub status: PageStatus,
    pub subtitle: String,
    pub refreshed_at: Option<String>,
}

impl PageHeader {
    /// `ok_subtitle` replaces the default "Last refresh: ..." line on success.
    pub fn from_response(
        title: &'static str,
        response: &DashboardResponse,
        ok_subtitle: Option<&str>,
    ) -> Self {
        let refreshed_at = response.generated_at().map(str::to_string);

        match response.error_message() {
            Some(message) => Self {
                title,
                status: PageStatus::Error,
                subtitle: format!("Data error: {}", message),
                refreshed_at: None,
            },
            None => Self {
                title,
                status: PageStatus::Ok,
                subtitle: match ok_subtitle {
                    Some(text) => text.to_string(),
                    None => format!(
                        "Last refresh: {}",
                        refreshed_at.as_deref().unwrap_or("Unknown")
                    ),
                },
                refreshed_at,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LabeledKpi {
    pub label: &'static str,
    #[serde(flatten)]
    pub value: KpiValue,
}

/// The payload, or an empty one so downstream code sees empty collections.
pub(crate) fn payload_or_empty(response: &DashboardResponse) -> Cow<'_, DashboardPayload> {
    match response.payload() {
        Some(payload) => Cow::Borrowed(payload),
        None => Cow::Owned(DashboardPayload::default()),
    }
}

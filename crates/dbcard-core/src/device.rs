//! Visitor device classification from the User-Agent header.

use serde::Serialize;

/// Coarse device class recorded with each card view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Desktop,
}

/// User-Agent fragments that mark a handheld device.
const MOBILE_MARKERS: &[&str] = &["Mobile", "Android", "iPhone", "iPad"];

impl DeviceType {
    /// Classify a User-Agent string. Matching is case-sensitive.
    pub fn from_user_agent(user_agent: &str) -> Self {
        if MOBILE_MARKERS.iter().any(|m| user_agent.contains(m)) {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }
}

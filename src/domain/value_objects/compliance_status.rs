use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Outcome of a single regulation check.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    NonCompliant,
    Compliant,
    InProgress,
}

impl ComplianceStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NonCompliant => "non-compliant",
            Self::Compliant => "compliant",
            Self::InProgress => "in-progress",
        }
    }

    #[must_use]
    pub const fn color(&self) -> &str {
        match self {
            Self::NonCompliant => "red",
            Self::Compliant => "green",
            Self::InProgress => "yellow",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown compliance status: '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ComplianceStatus {
    type Err = UnknownStatus;

    // The evaluator is an LLM; its casing and separators drift ("non-Compliant").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "noncompliant" => Ok(Self::NonCompliant),
            "compliant" | "completed" => Ok(Self::Compliant),
            "inprogress" | "pending" => Ok(Self::InProgress),
            _ => Err(UnknownStatus(s.to_owned())),
        }
    }
}

impl<'de> Deserialize<'de> for ComplianceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use airsim_domain::DomainError;

/// Identifies the business rule that blocked an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    /// Short machine-readable rule name, e.g. `pilot_uncommanding`.
    pub rule: &'static str,
    /// Human-readable explanation.
    pub reason: String,
}

impl Denial {
    #[must_use]
    pub fn new(rule: &'static str, reason: impl Into<String>) -> Self {
        Self {
            rule,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Denial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason)
    }
}

/// Pilot count shortfall reported by a degraded takeoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffingShortfall {
    /// Pilots the airplane needs.
    pub required: u32,
    /// Pilots actually commanding the flight.
    pub actual: u32,
}

/// The caller-facing result of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The engine accepted the operation.
    Success,
    /// The engine accepted the operation but the flight is understaffed.
    SuccessDegraded(StaffingShortfall),
    /// A business rule blocked the operation before the engine ran.
    Denied(Denial),
    /// The engine or the store rejected the operation.
    EngineFailure(String),
    /// A submitted field could not be parsed or is missing.
    MalformedInput {
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl Outcome {
    /// Builds a denial outcome.
    #[must_use]
    pub fn denied(rule: &'static str, reason: impl Into<String>) -> Self {
        Self::Denied(Denial::new(rule, reason))
    }

    /// Returns whether the work done for this outcome should be committed.
    #[must_use]
    pub const fn commits(&self) -> bool {
        matches!(self, Self::Success | Self::SuccessDegraded(_))
    }

    /// Short label for the outcome kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::SuccessDegraded(_) => "success_degraded",
            Self::Denied(_) => "denied",
            Self::EngineFailure(_) => "engine_failure",
            Self::MalformedInput { .. } => "malformed_input",
        }
    }

    /// User-facing message describing the outcome of `operation`.
    #[must_use]
    pub fn message(&self, operation: &str) -> String {
        match self {
            Self::Success => format!("{operation} succeeded"),
            Self::SuccessDegraded(shortfall) => format!(
                "{operation} succeeded but the flight is delayed: {} of {} required pilots assigned",
                shortfall.actual, shortfall.required
            ),
            Self::Denied(denial) => denial.reason.clone(),
            Self::EngineFailure(detail) => format!("Error: {detail}"),
            Self::MalformedInput { field, reason } => format!("{field}: {reason}"),
        }
    }
}

impl From<DomainError> for Outcome {
    fn from(err: DomainError) -> Self {
        match err.field() {
            Some(field) if err.is_field_error() => Self::MalformedInput {
                field,
                reason: err.to_string(),
            },
            _ => Self::Denied(Denial::new(err.rule(), err.to_string())),
        }
    }
}

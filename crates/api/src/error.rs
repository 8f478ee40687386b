// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Business outcomes are never errors here; they travel as `Outcome`.
//! `ApiError` covers infrastructure that failed around a request.

use airsim::Outcome;
use airsim_persistence::PersistenceError;
use thiserror::Error;

/// Infrastructure failures while handling a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No connection could be obtained or the transaction could not be set up.
    #[error("storage unavailable: {0}")]
    Storage(#[from] PersistenceError),
    /// The worker running the request stopped before producing an outcome.
    #[error("request interrupted: {reason}")]
    Interrupted {
        /// Why the worker stopped.
        reason: String,
    },
}

impl ApiError {
    /// Reports the failure to the caller as an engine failure.
    #[must_use]
    pub fn into_outcome(self) -> Outcome {
        Outcome::EngineFailure(self.to_string())
    }
}

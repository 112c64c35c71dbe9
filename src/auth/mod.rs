//! Authentication service plumbing over HTTPS JSON

mod client;
mod coordinator;
mod outcome;
mod traits;

pub use client::{HttpTransport, DEFAULT_TIMEOUT_SECS};
pub use coordinator::SubmissionCoordinator;
pub use outcome::{Endpoint, SubmissionOutcome};

#[cfg(test)]
pub use outcome::FailureKind;
#[cfg(test)]
pub use traits::{MockAuthTransport, RawResponse};

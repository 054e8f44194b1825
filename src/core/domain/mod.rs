//! Domain types.

mod credential;
mod directive;
mod outcome;
mod plan;
mod remote;

pub use credential::{AttrValue, CredentialEntry};
pub use directive::Directive;
pub use outcome::{MetadataSync, Outcome, Report};
pub use plan::{Action, Mode, Plan, PlanEntry};
pub use remote::RemoteSecret;

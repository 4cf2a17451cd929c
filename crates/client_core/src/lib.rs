//! Client side of the portal: the multi-step briefing form and the HTTP
//! client that talks to the portal server.

pub mod form;
pub mod transport;

pub use form::{BriefingForm, FormError, FormPhase, FormSchema, StepDefinition, RETRY_MESSAGE};
pub use transport::{ClientError, PortalClient, SubmissionTransport};

//! Data-access layer of the loan admin console.
//! - `transport` attaches the session token and applies the 401 policy.
//! - `console` composes transport and normalizer into the screen operations.
//! - Failures are classified once in `errors` and never swallowed.

pub mod console;
pub mod endpoints;
pub mod errors;
pub mod observability;
pub mod session;
pub mod transport;

pub use console::{AdminClient, ConsoleApi};
pub use errors::{ConsoleError, FailureKind, Operation, TransportError};
pub use session::{Principal, Session};
pub use transport::{unauthorized_action, RequestKind, Transport, UnauthorizedAction};

mod driver;
mod machine;
mod state;

// Public API of the session subsystem.
pub use crate::error::TransitionError;
pub use driver::SessionDriver;
pub use machine::{Completion, SessionCommand, SessionIntent};
pub use state::{FailedOperation, SessionFailure, SessionPhase, SessionState, Ticket};

//! Action Toolkit - GitHub Actions host protocol
//!
//! Shared plumbing for actions that run as native binaries on an Actions
//! runner:
//!
//! - [`input`]: named inputs from `INPUT_*` environment variables
//! - [`context`]: the triggering event and workflow run metadata
//! - [`sink`]: log lines, outputs and failure status back to the runner
//! - [`command`]: `::name::data` workflow command formatting
//! - [`clock`]: wall-clock time and time-of-day formatting

pub mod clock;
pub mod command;
pub mod context;
pub mod error;
pub mod input;
pub mod sink;

pub use clock::{Clock, FixedClock, SystemClock, time_of_day};
pub use context::{Context, ContextArgs};
pub use error::{ActionError, Result};
pub use input::{EnvInputs, InputOptions, InputProvider, is_truthy};
pub use sink::{CommandSink, HostSink};

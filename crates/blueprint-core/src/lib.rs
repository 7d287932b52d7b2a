pub mod actions;
pub mod environment;
pub mod error;
pub mod io;
pub mod options;
pub mod paths;
pub mod runtime;
pub mod sam;
pub mod scaffold;
pub mod workflow;

pub use error::{BlueprintError, Result};

pub mod fixtures;
pub mod random;
mod spies;
mod stubs;

pub use spies::RecordingRuntime;
pub use stubs::RejectingRuntime;

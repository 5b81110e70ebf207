mod rejecting_runtime;

pub use rejecting_runtime::RejectingRuntime;

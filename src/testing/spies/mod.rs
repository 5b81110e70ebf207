mod recording_runtime;

pub use recording_runtime::RecordingRuntime;

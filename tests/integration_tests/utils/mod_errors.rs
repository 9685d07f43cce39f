use songbench::{CallError, ToolError};
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn missing_executable_names_the_file() {
    let e = ToolError::MissingExecutable(PathBuf::from("exe/word_count_mpi.exe"));
    assert_eq!(e.to_string(), "Executable not found: exe/word_count_mpi.exe");
}

#[test]
fn dataset_and_backend_messages() {
    assert_eq!(
        ToolError::DatasetNotFound(PathBuf::from("data/x.csv")).to_string(),
        "Dataset not found: data/x.csv"
    );
    assert_eq!(
        ToolError::BackendUnavailable("HTTP error: refused".into()).to_string(),
        "Backend unavailable: HTTP error: refused"
    );
}

#[test]
fn io_errors_convert() {
    let e: ToolError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
    assert_eq!(e.to_string(), "I/O error: denied");
}

#[test]
fn call_error_display() {
    assert_eq!(CallError::Timeout(Duration::from_secs(300)).to_string(), "timed out after 300s");
    let e = CallError::NonZeroExit { status: "exit status: 2".into(), stderr: "bad input".into() };
    assert_eq!(e.to_string(), "exit status: 2: bad input");
    assert_eq!(CallError::Spawn("no such file".into()).to_string(), "spawn failed: no such file");
}

use std::fs;
use tempfile::tempdir;

#[test]
fn configure_logging_writes_app_and_timings_in_dir() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("run_logs");
    songbench::logger::configure_logging(Some(&base), Some("debug"), Some(3)).unwrap();
    log::info!("hello app");
    log::info!(target: songbench::logger::TIMINGS_TARGET, "program=word_count_mpi processes=1 elapsed_s=0.100");
    assert!(base.join("app.log").exists());
    assert!(base.join("timings.log").exists());
    let timings = fs::read_to_string(base.join("timings.log")).unwrap();
    assert!(timings.contains("processes=1"));
    let app = fs::read_to_string(base.join("app.log")).unwrap();
    assert!(!app.contains("processes=1"));
}

// Real child processes: `sh` stands in for the MPI launcher and shell scripts for the executables.
#![cfg(unix)]

use songbench::benchmark::{BenchmarkOptions, ProcessLauncher, run_benchmark};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn options(root: &Path) -> BenchmarkOptions {
    fs::create_dir_all(root.join("exe")).unwrap();
    fs::write(root.join("songs.csv"), "artist,song,link,text\n").unwrap();
    // invoked as: sh launch.sh <n> <exe>
    fs::write(root.join("launch.sh"), "exec sh \"$2\" \"$1\"\n").unwrap();
    BenchmarkOptions {
        programs: vec!["fast".into(), "slow".into(), "broken".into()],
        process_counts: vec![1, 2],
        timeout_secs: 1,
        launcher: "sh".into(),
        process_flag: root.join("launch.sh").display().to_string(),
        exe_dir: root.join("exe"),
        exe_extension: ".sh".into(),
        dataset_path: root.join("songs.csv"),
        report_path: root.join("out/performance_analysis.txt"),
        system_description: "Linux com sh".into(),
    }
}

#[test]
fn real_processes_timeouts_and_failures() {
    let dir = tempdir().unwrap();
    let opts = options(dir.path());
    fs::write(opts.executable_path("fast"), "echo \"ran with $1\"\n").unwrap();
    fs::write(opts.executable_path("slow"), "sleep 5\n").unwrap();
    fs::write(opts.executable_path("broken"), "echo nope >&2\nexit 3\n").unwrap();

    let mut out = Vec::new();
    let summary = run_benchmark(&ProcessLauncher, &opts, &mut out).unwrap();

    assert_eq!(summary.runs.len(), 6);
    let ok: Vec<_> = summary.runs.iter().filter(|r| r.elapsed.is_some()).map(|r| r.program.as_str()).collect();
    assert_eq!(ok, vec!["fast", "fast"]);
    let slow = summary.runs.iter().find(|r| r.program == "slow").unwrap();
    assert!(slow.elapsed.is_none());

    let report = fs::read_to_string(&opts.report_path).unwrap();
    assert!(report.contains("Sistema: Linux com sh"));
    assert!(report.contains("PROGRAMA: FAST"));
    assert!(!report.contains("PROGRAMA: SLOW"));
    assert!(!report.contains("PROGRAMA: BROKEN"));
    let console = String::from_utf8(out).unwrap();
    assert_eq!(console.matches("FALHOU").count(), 4);
}

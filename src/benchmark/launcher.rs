use std::ffi::OsString;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::errors::CallError;
use crate::invoke::ExternalCall;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A fully resolved child-process command line plus its wall-clock budget.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub timeout: Duration,
}

impl Invocation {
    /// `<launcher> <flag> <n> <executable>`, e.g. `mpiexec -n 4 exe/word_count_mpi.exe`.
    pub fn mpi(
        launcher: &str,
        process_flag: &str,
        processes: usize,
        executable: &std::path::Path,
        timeout: Duration,
    ) -> Self {
        Self {
            program: launcher.into(),
            args: vec![process_flag.into(), processes.to_string().into(), executable.as_os_str().to_owned()],
            timeout,
        }
    }

    #[must_use]
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Launches real child processes, polling for exit and killing them at the timeout.
/// Output is captured through temp files so a child never stalls on a full pipe.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl ExternalCall<Invocation> for ProcessLauncher {
    type Output = ProcessOutput;

    fn call(&self, inv: &Invocation) -> Result<ProcessOutput, CallError> {
        let mut out_file = tempfile::tempfile().map_err(|e| CallError::Spawn(e.to_string()))?;
        let mut err_file = tempfile::tempfile().map_err(|e| CallError::Spawn(e.to_string()))?;
        let mut child = Command::new(&inv.program)
            .args(&inv.args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(clone_handle(&out_file)?))
            .stderr(Stdio::from(clone_handle(&err_file)?))
            .spawn()
            .map_err(|e| CallError::Spawn(format!("{}: {e}", inv.display())))?;

        let started = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if started.elapsed() >= inv.timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(CallError::Timeout(inv.timeout));
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => return Err(CallError::Spawn(format!("wait failed: {e}"))),
            }
        };

        let stdout = read_back(&mut out_file);
        let stderr = read_back(&mut err_file);
        if status.success() {
            Ok(ProcessOutput { stdout, stderr })
        } else {
            Err(CallError::NonZeroExit { status: status.to_string(), stderr })
        }
    }
}

fn clone_handle(f: &File) -> Result<File, CallError> {
    f.try_clone().map_err(|e| CallError::Spawn(e.to_string()))
}

fn read_back(f: &mut File) -> String {
    let mut buf = Vec::new();
    if f.seek(SeekFrom::Start(0)).is_ok() {
        let _ = f.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

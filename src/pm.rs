use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Captured run of a package-manager command.
#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Outcome of a deadline-bounded run.
#[derive(Debug)]
pub enum Wait {
    Completed(Captured),
    TimedOut,
}

pub fn capture(dir: &Path, tool: &str, args: &[&str]) -> Result<Captured> {
    let output = Command::new(tool)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .with_context(|| format!("failed to run {} {:?} in {}", tool, args, dir.display()))?;

    Ok(Captured {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

pub fn capture_deadline(
    dir: &Path,
    tool: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<Wait> {
    let mut child = Command::new(tool)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to run {} {:?} in {}", tool, args, dir.display()))?;

    // Pipes must be drained while polling; a full pipe blocks the child
    // before the deadline is ever reached.
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let deadline = Instant::now() + timeout;
    loop {
        match child
            .try_wait()
            .with_context(|| format!("failed to poll {} in {}", tool, dir.display()))?
        {
            Some(status) => {
                return Ok(Wait::Completed(Captured {
                    status,
                    stdout: stdout.join().unwrap_or_default(),
                    stderr: stderr.join().unwrap_or_default(),
                }));
            }
            None => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Ok(Wait::TimedOut);
                }
                std::thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

pub fn stream(dir: &Path, tool: &str, args: &[&str]) -> Result<ExitStatus> {
    let status = Command::new(tool)
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("failed to run {} {:?} in {}", tool, args, dir.display()))?;

    Ok(status)
}

fn drain(pipe: Option<impl Read + Send + 'static>) -> JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

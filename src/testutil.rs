#![cfg(test)]

use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        std::fs::create_dir_all(dir.path().join("project")).unwrap();
        std::fs::create_dir_all(dir.path().join("bin")).unwrap();
        std::fs::write(
            dir.path().join("project").join("package.json"),
            "{\"name\": \"web-app\", \"private\": true}\n",
        )
        .unwrap();
        Self { dir }
    }

    pub fn project_dir(&self) -> PathBuf {
        self.dir.path().join("project")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    /// Installs a shell-script stand-in for a package manager into bin/.
    #[cfg(unix)]
    pub fn write_tool(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin_dir().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}", body)).expect("failed to write tool");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("failed to chmod tool");
        path
    }

    #[cfg(unix)]
    pub fn fake_tool(&self, name: &str, exit_code: i32, stdout: &str, stderr: &str) -> PathBuf {
        let mut body = String::new();
        if !stdout.is_empty() {
            body.push_str(&format!("echo '{}'\n", stdout));
        }
        if !stderr.is_empty() {
            body.push_str(&format!("echo '{}' >&2\n", stderr));
        }
        body.push_str(&format!("exit {}\n", exit_code));
        self.write_tool(name, &body)
    }
}

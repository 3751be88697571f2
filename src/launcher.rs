use crate::services::{ServiceError, SiteLauncher};
use std::process::Command;

/// Opens URLs with the desktop's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn command_for(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut command = Command::new("open");
            command.arg(url);
            command
        } else if cfg!(target_os = "windows") {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", "", url]);
            command
        } else {
            let mut command = Command::new("xdg-open");
            command.arg(url);
            command
        }
    }

    pub fn try_open(&self, url: &str) -> Result<(), ServiceError> {
        run(Self::command_for(url), url)
    }
}

/// Runs the opener to completion so no exited child is left behind.
/// The platform openers hand the URL to the browser and return at once.
fn run(mut command: Command, url: &str) -> Result<(), ServiceError> {
    let status = command
        .status()
        .map_err(|e| ServiceError::Launch(format!("{url}: {e}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(ServiceError::Launch(format!(
            "{url}: opener exited with status: {status}"
        )))
    }
}

impl SiteLauncher for SystemLauncher {
    fn open(&self, url: &str) {
        log::info!("Opening {}", url);
        if let Err(e) = self.try_open(url) {
            log::warn!("Failed to open browser: {}", e);
        }
    }
}

use crate::domain::ports::ReportViewer;
use crate::utils::error::{Result, SearchError};
use std::path::Path;

/// 以系統預設程式開啟報表
#[derive(Debug, Clone, Default)]
pub struct SystemViewer;

impl ReportViewer for SystemViewer {
    fn open(&self, path: &Path) -> Result<()> {
        #[cfg(target_os = "windows")]
        let program = "explorer";
        #[cfg(target_os = "macos")]
        let program = "open";
        #[cfg(target_os = "linux")]
        let program = "xdg-open";

        #[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
        {
            tracing::debug!("Opening {} with {}", path.display(), program);
            std::process::Command::new(program)
                .arg(path)
                .spawn()
                .map_err(|e| SearchError::ViewerError {
                    message: format!("Failed to spawn {}: {}", program, e),
                })?;
            Ok(())
        }

        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            Err(SearchError::ViewerError {
                message: format!("Opening {} is not supported on this platform", path.display()),
            })
        }
    }
}

/// 不開啟任何東西 (`--no-open`、測試)
#[derive(Debug, Clone, Default)]
pub struct NoopViewer;

impl ReportViewer for NoopViewer {
    fn open(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

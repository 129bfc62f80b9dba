//! Photo acquisition for listings.
//!
//! Two sources: a library (files under a configured directory, picked by
//! path) and a camera (an external command that captures a photo and
//! prints the resulting path on stdout). Each source has its own
//! permission check.

use crate::utils::path::{expand_path, format_path_for_display, resolve_against};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A picked or captured photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    /// `file://` URI of the photo
    pub uri: String,
    /// Size in bytes, when the source reports one
    pub size: Option<u64>,
}

impl MediaAsset {
    pub fn from_path(path: &Path, size: Option<u64>) -> Self {
        Self {
            uri: format!("file://{}", path.display()),
            size,
        }
    }

    /// Short label for lists
    pub fn label(&self) -> &str {
        self.uri.rsplit('/').next().unwrap_or(&self.uri)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Library,
    Camera,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied(String),
}

impl Permission {
    pub fn is_granted(&self) -> bool {
        matches!(self, Permission::Granted)
    }
}

/// Where listing photos come from
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Check whether `kind` may be used
    fn request_permission(&self, kind: MediaKind) -> Permission;

    /// Resolve a comma-separated selection of library paths
    fn pick_from_library(&self, selection: &str) -> Result<Vec<MediaAsset>>;

    /// Capture one photo; `Ok(None)` means the capture was cancelled
    async fn capture(&self) -> Result<Option<MediaAsset>>;
}

/// [`MediaSource`] on the local filesystem
#[derive(Debug, Clone)]
pub struct FsMediaSource {
    library_dir: PathBuf,
    camera_command: Vec<String>,
}

impl FsMediaSource {
    pub fn new(library_dir: &str, camera_command: &[String]) -> Self {
        Self {
            library_dir: expand_path(library_dir),
            camera_command: camera_command
                .iter()
                .filter(|part| !part.trim().is_empty())
                .cloned()
                .collect(),
        }
    }

    pub fn library_dir(&self) -> &Path {
        &self.library_dir
    }

    fn asset_for(path: &Path) -> Result<MediaAsset> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("{} not found", format_path_for_display(path)))?;
        if !metadata.is_file() {
            bail!("{} is not a file", format_path_for_display(path));
        }
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Ok(MediaAsset::from_path(&path, Some(metadata.len())))
    }
}

#[async_trait]
impl MediaSource for FsMediaSource {
    fn request_permission(&self, kind: MediaKind) -> Permission {
        match kind {
            MediaKind::Library => {
                if std::fs::read_dir(&self.library_dir).is_ok() {
                    Permission::Granted
                } else {
                    Permission::Denied(format!(
                        "Photo library {} is not readable",
                        format_path_for_display(&self.library_dir)
                    ))
                }
            }
            MediaKind::Camera => {
                if self.camera_command.is_empty() {
                    Permission::Denied("No camera command is configured".to_string())
                } else {
                    Permission::Granted
                }
            }
        }
    }

    fn pick_from_library(&self, selection: &str) -> Result<Vec<MediaAsset>> {
        let assets = selection
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| Self::asset_for(&resolve_against(&self.library_dir, part)))
            .collect::<Result<Vec<_>>>()?;

        debug!("Picked {} photo(s) from library", assets.len());
        Ok(assets)
    }

    async fn capture(&self) -> Result<Option<MediaAsset>> {
        let Some((program, args)) = self.camera_command.split_first() else {
            bail!("No camera command is configured");
        };

        info!("Running camera command: {}", program);
        let output = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await
            .with_context(|| format!("Failed to run camera command: {program}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Camera command exited with {}: {}", output.status, stderr.trim());
            bail!("Camera command failed: {}", stderr.trim());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let Some(line) = stdout.lines().map(str::trim).find(|l| !l.is_empty()) else {
            info!("Camera capture cancelled");
            return Ok(None);
        };

        Self::asset_for(&resolve_against(&self.library_dir, line)).map(Some)
    }
}

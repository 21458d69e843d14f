//! Installs generated artifacts into the visualization tool's add-on tree

use crate::config::{DeployConfig, OutputLayout};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// A single failed install step
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("artifact not found: {0}")]
    MissingArtifact(PathBuf),

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    CommandFailed { command: String, status: ExitStatus },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a deployment; never fatal to the export
#[derive(Debug, Default)]
pub struct DeployReport {
    pub target: PathBuf,
    /// Target directory did not exist, nothing was copied
    pub target_missing: bool,
    /// Installed files
    pub copied: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, DeployError)>,
}

impl DeployReport {
    /// Every artifact landed, or there was nowhere to put them
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Copies artifacts, through `sudo` when configured
pub struct Deployer {
    config: DeployConfig,
}

impl Deployer {
    pub fn new(config: DeployConfig) -> Self {
        Self { config }
    }

    /// Copy the star and planet files into the target and the tour
    /// sub-directory into its counterpart below the target.
    pub fn deploy(&self, output_dir: &Path, layout: &OutputLayout) -> DeployReport {
        let target = self.config.target_dir.clone();
        let mut report = DeployReport { target: target.clone(), ..Default::default() };

        if !target.is_dir() {
            tracing::warn!("Deploy target {:?} not found, artifacts stay in {:?}", target, output_dir);
            report.target_missing = true;
            return report;
        }

        for source in [layout.star_path(output_dir), layout.planet_path(output_dir)] {
            self.record(&mut report, &source, self.copy_file(&source, &target));
        }

        let tour_dir = layout.tour_dir_path(output_dir);
        let tour_target = target.join(&layout.tour_dir);
        match self.make_dir(&tour_target) {
            Ok(()) => {
                for source in tour_files(&tour_dir, layout) {
                    self.record(&mut report, &source, self.copy_file(&source, &tour_target));
                }
            }
            Err(err) => self.record(&mut report, &tour_dir, Err(err)),
        }

        if report.is_complete() {
            tracing::info!("Deployed {} files to {:?}", report.copied.len(), target);
        } else {
            tracing::warn!(
                "Deployed {} files to {:?}, {} failed",
                report.copied.len(),
                target,
                report.failures.len()
            );
        }
        report
    }

    fn record(&self, report: &mut DeployReport, source: &Path, result: Result<PathBuf, DeployError>) {
        match result {
            Ok(dest) => report.copied.push(dest),
            Err(err) => {
                tracing::warn!("Error copying {:?}: {}", source, err);
                report.failures.push((source.to_path_buf(), err));
            }
        }
    }

    fn make_dir(&self, dir: &Path) -> Result<(), DeployError> {
        if self.config.privileged {
            run(Command::new("sudo").arg("mkdir").arg("-p").arg(dir))
        } else {
            fs::create_dir_all(dir)?;
            Ok(())
        }
    }

    fn copy_file(&self, source: &Path, dest_dir: &Path) -> Result<PathBuf, DeployError> {
        let file_name = match source.file_name() {
            Some(name) if source.is_file() => name,
            _ => return Err(DeployError::MissingArtifact(source.to_path_buf())),
        };
        let dest = dest_dir.join(file_name);

        if self.config.privileged {
            run(Command::new("sudo").arg("cp").arg(source).arg(dest_dir))?;
        } else {
            fs::copy(source, &dest)?;
        }
        Ok(dest)
    }
}

/// Files of the tour sub-directory; the tour script itself is always listed
/// so a missing script is reported.
fn tour_files(tour_dir: &Path, layout: &OutputLayout) -> Vec<PathBuf> {
    let script = tour_dir.join(&layout.tour_file);
    let mut files: Vec<PathBuf> = fs::read_dir(tour_dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.is_file() && *p != script)
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files.insert(0, script);
    files
}

fn run(command: &mut Command) -> Result<(), DeployError> {
    let description = format!("{:?}", command);
    let status = command.status().map_err(|source| DeployError::Spawn {
        command: description.clone(),
        source,
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(DeployError::CommandFailed { command: description, status })
    }
}

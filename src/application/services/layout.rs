//! Dashboard layout service
//!
//! Loads a dashboard document, runs the reorder engine on it and persists
//! concrete results. A move that resolves to "nothing to apply" leaves the
//! file untouched.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt, JsonResultExt};
use crate::domain::{self, build_tree, rebuild_items, Dashboard, Item, Metric, Tree};
use crate::infrastructure::traits::FileSystem;

/// How documents are written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Pretty-print JSON
    pub pretty: bool,
    /// Copy the previous file to `<file>.bak` before overwriting
    pub backup: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            backup: false,
        }
    }
}

/// Result of a drag-and-drop move.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// Out of range, degenerate or rejected: keep the prior arrangement
    Unchanged,
    /// New ordered item list
    Moved(Vec<Item>),
}

/// Service for reordering a persisted dashboard layout.
pub struct LayoutService {
    fs: Arc<dyn FileSystem>,
    options: SaveOptions,
}

impl LayoutService {
    /// Create a new layout service.
    pub fn new(fs: Arc<dyn FileSystem>, options: SaveOptions) -> Self {
        Self { fs, options }
    }

    /// Read and parse a dashboard document.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Dashboard> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::LayoutNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read layout", path)?;
        let dashboard: Dashboard = serde_json::from_str(&content).parsed_from(path)?;
        debug!(
            items = dashboard.items.len(),
            metrics = dashboard.metrics.len(),
            "layout loaded"
        );
        Ok(dashboard)
    }

    /// Serialize and write a dashboard document.
    #[instrument(level = "debug", skip(self, dashboard))]
    pub fn save(&self, path: &Path, dashboard: &Dashboard) -> ApplicationResult<()> {
        let mut content = if self.options.pretty {
            serde_json::to_string_pretty(dashboard)
        } else {
            serde_json::to_string(dashboard)
        }
        .map_err(|e| ApplicationError::OperationFailed {
            context: format!("serialize layout: {}", path.display()),
            source: Box::new(e),
        })?;
        content.push('\n');

        if self.options.backup && self.fs.exists(path) {
            let backup = backup_path(path);
            self.fs
                .copy(path, &backup)
                .with_path_context("backup layout", &backup)?;
            debug!("backup written: {}", backup.display());
        }
        self.fs
            .write(path, &content)
            .with_path_context("write layout", path)
    }

    /// Build the addressable tree of a document.
    pub fn tree(&self, path: &Path) -> ApplicationResult<Tree> {
        let dashboard = self.load(path)?;
        Ok(build_tree(&dashboard.items))
    }

    /// Move the node at `source` to `destination` and persist the result.
    ///
    /// Negative indices are treated like any other out-of-range index.
    #[instrument(level = "debug", skip(self))]
    pub fn move_item(
        &self,
        path: &Path,
        source: isize,
        destination: isize,
        dry_run: bool,
    ) -> ApplicationResult<MoveOutcome> {
        let mut dashboard = self.load(path)?;
        let tree = build_tree(&dashboard.items);

        let (Ok(source), Ok(destination)) = (usize::try_from(source), usize::try_from(destination))
        else {
            return Ok(MoveOutcome::Unchanged);
        };
        let Some(items) = domain::move_item(&tree, source, destination) else {
            info!(source, destination, "move has no effect");
            return Ok(MoveOutcome::Unchanged);
        };

        if !dry_run {
            dashboard.items = items.clone();
            self.save(path, &dashboard)?;
            info!(source, destination, "layout updated: {}", path.display());
        }
        Ok(MoveOutcome::Moved(items))
    }

    /// Reorder the metric list and persist it.
    #[instrument(level = "debug", skip(self))]
    pub fn move_metric(
        &self,
        path: &Path,
        from: isize,
        to: isize,
        dry_run: bool,
    ) -> ApplicationResult<Vec<Metric>> {
        let mut dashboard = self.load(path)?;
        let metrics = domain::move_metric(&dashboard.metrics, from, to);
        if !dry_run && metrics != dashboard.metrics {
            dashboard.metrics = metrics.clone();
            self.save(path, &dashboard)?;
        }
        Ok(metrics)
    }

    /// Rebuild `order` and `child_ids` from section membership.
    #[instrument(level = "debug", skip(self))]
    pub fn normalize(&self, path: &Path, dry_run: bool) -> ApplicationResult<Vec<Item>> {
        let mut dashboard = self.load(path)?;
        let tree = build_tree(&dashboard.items);
        let items = rebuild_items(tree.linearize());
        if !dry_run && items != dashboard.items {
            dashboard.items = items.clone();
            self.save(path, &dashboard)?;
        }
        Ok(items)
    }

    /// Validate the persisted item list.
    pub fn check(&self, path: &Path) -> ApplicationResult<()> {
        let dashboard = self.load(path)?;
        domain::validate_items(&dashboard.items)?;
        Ok(())
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_layout_path_when_deriving_backup_then_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/tmp/dash.json")),
            PathBuf::from("/tmp/dash.json.bak")
        );
    }
}

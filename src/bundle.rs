//! Bundled resource lookup
//!
//! The resolver only needs "give me the bytes of this resource, if present" and
//! a couple of metadata values. [`ResourceBundle`] is that seam; [`DirBundle`]
//! implements it over an application resources directory on disk.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const INFO_PLIST: &str = "Info.plist";
pub const BUNDLE_NAME_KEY: &str = "CFBundleName";
pub const BUNDLE_EXECUTABLE_KEY: &str = "CFBundleExecutable";

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Bundle directory not found: {path}")]
    NotFound { path: PathBuf },
}

/// Read access to an application's packaged resources.
pub trait ResourceBundle {
    /// Bytes of `<name>.<extension>`, or `None` if the bundle does not contain it.
    fn resource(&self, name: &str, extension: &str) -> Option<Vec<u8>>;

    /// A string value from the bundle's metadata.
    fn info_value(&self, key: &str) -> Option<String>;
}

/// Name used to build the default settings-bundle file name.
///
/// Prefers `CFBundleName`, falling back to `CFBundleExecutable`.
pub fn bundle_name<B: ResourceBundle + ?Sized>(bundle: &B) -> Option<String> {
    bundle
        .info_value(BUNDLE_NAME_KEY)
        .filter(|name| !name.is_empty())
        .or_else(|| {
            bundle
                .info_value(BUNDLE_EXECUTABLE_KEY)
                .filter(|name| !name.is_empty())
        })
}

/// A resources directory, with metadata read from its `Info.plist`.
///
/// Resources are looked up in the directory itself, then in the Swift Package
/// Manager folders of any Xcode project or workspace it contains.
#[derive(Debug, Clone)]
pub struct DirBundle {
    root: PathBuf,
    search_dirs: Vec<PathBuf>,
}

impl DirBundle {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, BundleError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(BundleError::NotFound { path: root });
        }

        let mut search_dirs = vec![root.clone()];
        search_dirs.extend(find_xcode_swiftpm_dirs(&root));
        Ok(Self { root, search_dirs })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resource_path(&self, file_name: &str) -> Option<PathBuf> {
        self.search_dirs
            .iter()
            .map(|dir| dir.join(file_name))
            .find(|path| path.is_file())
    }
}

impl ResourceBundle for DirBundle {
    fn resource(&self, name: &str, extension: &str) -> Option<Vec<u8>> {
        let file_name = format!("{name}.{extension}");
        let path = self.resource_path(&file_name)?;
        match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                tracing::warn!("Failed to read {}: {err}", path.display());
                None
            }
        }
    }

    fn info_value(&self, key: &str) -> Option<String> {
        let path = self.root.join(INFO_PLIST);
        if !path.is_file() {
            return None;
        }

        let info = match plist::Value::from_file(&path) {
            Ok(info) => info,
            Err(err) => {
                tracing::warn!("Failed to parse {}: {err}", path.display());
                return None;
            }
        };

        info.as_dictionary()?
            .get(key)?
            .as_string()
            .map(str::to_string)
    }
}

/// Find Swift Package Manager folders inside Xcode projects or workspaces
///
/// Checks:
/// - *.xcodeproj/project.xcworkspace/xcshareddata/swiftpm
/// - *.xcworkspace/xcshareddata/swiftpm
fn find_xcode_swiftpm_dirs(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut found = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let swiftpm = if name.ends_with(".xcodeproj") {
            path.join("project.xcworkspace")
                .join("xcshareddata")
                .join("swiftpm")
        } else if name.ends_with(".xcworkspace") {
            path.join("xcshareddata").join("swiftpm")
        } else {
            continue;
        };

        if swiftpm.is_dir() {
            found.push(swiftpm);
        }
    }

    // read_dir order is platform dependent
    found.sort();
    found
}

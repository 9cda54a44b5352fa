use crate::IngestError;
use globset::{GlobBuilder, GlobMatcher};
use ignore::{DirEntry, WalkBuilder};
use itertools::Itertools;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// pattern used for files found inside directory arguments
pub const DEFAULT_INPUT_GLOB: &str = "*.json";

/// Resolve the input arguments into the list of benchmark files to load.
///
/// Files are kept as given, directories are walked and filtered with `glob`,
/// anything else is reported and skipped. An empty result is an error.
pub fn collect_inputs<P: AsRef<Path>>(
    inputs: &[P],
    glob: &str,
) -> Result<Vec<PathBuf>, IngestError> {
    let matcher = GlobBuilder::new(glob).build()?.compile_matcher();
    debug!("Filtering directories with glob: {matcher:?}");

    let mut files = Vec::new();

    for input in inputs.iter().map(AsRef::as_ref) {
        if input.is_file() {
            files.push(input.to_path_buf());
        } else if input.is_dir() {
            let found = walk_directory(input, &matcher);

            if found.is_empty() {
                warn!("No files matching {glob} in {}", input.display());
            }
            files.extend(found);
        } else {
            warn!("File not found: {}", input.display());
        }
    }

    if files.is_empty() {
        Err(IngestError::NoValidFiles)
    } else {
        Ok(files)
    }
}

fn walk_directory(root: &Path, matcher: &GlobMatcher) -> Vec<PathBuf> {
    WalkBuilder::new(root)
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Failed to search {} for benchmark files: {e}", root.display());
                None
            }
        })
        .filter(|entry| entry.file_type().map_or(false, |kind| kind.is_file()))
        .filter(|entry| matcher.is_match(entry.file_name()))
        .map(DirEntry::into_path)
        .sorted()
        .collect_vec()
}

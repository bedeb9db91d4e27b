use std::fs;
use std::path::Path;

use crate::dataset::domain::dataset_error::DatasetError;
use crate::dataset::domain::sample::{ClassId, ClassLabel};

/// Indexes the entries of `root` as class labels.
///
/// Order is whatever the filesystem listing yields; it is not sorted, and
/// it defines the id of every label for the rest of the run.
pub fn list_class_labels(root: &Path) -> Result<Vec<ClassLabel>, DatasetError> {
    let labels: Vec<ClassLabel> = list_entry_names(root)?
        .into_iter()
        .enumerate()
        .map(|(i, name)| ClassLabel {
            id: ClassId(i),
            name,
        })
        .collect();
    log::info!("Indexed {} classes under {}", labels.len(), root.display());
    Ok(labels)
}

/// Names of every entry in `dir`, in listing order.
pub(crate) fn list_entry_names(dir: &Path) -> Result<Vec<String>, DatasetError> {
    if !dir.is_dir() {
        return Err(DatasetError::NotADirectory(dir.to_path_buf()));
    }
    let io_error = |source| DatasetError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let name = entry
            .file_name()
            .into_string()
            .map_err(DatasetError::InvalidName)?;
        names.push(name);
    }
    Ok(names)
}

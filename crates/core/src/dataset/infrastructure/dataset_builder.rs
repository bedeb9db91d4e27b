use std::path::Path;

use crate::dataset::domain::dataset_error::DatasetError;
use crate::dataset::domain::sample::{ClassLabel, Sample};
use crate::dataset::infrastructure::path_indexer::list_entry_names;

/// Expands `root/<label>/<file>` into one labeled sample per file.
///
/// Entries are not filtered by type; a non-image file surfaces later as a
/// decode error.
pub fn build_training_set(root: &Path, labels: &[ClassLabel]) -> Result<Vec<Sample>, DatasetError> {
    let mut samples = Vec::new();
    for label in labels {
        let class_dir = root.join(&label.name);
        let files = list_entry_names(&class_dir)?;
        log::debug!("Class {} ({}): {} files", label.id, label.name, files.len());
        samples.extend(
            files
                .into_iter()
                .map(|file| Sample::labeled(class_dir.join(file), label.id)),
        );
    }
    log::info!("Built training set: {} samples", samples.len());
    Ok(samples)
}

/// Lists the flat `root/<file>` test layout as unlabeled samples.
pub fn build_test_set(root: &Path) -> Result<Vec<Sample>, DatasetError> {
    let samples: Vec<Sample> = list_entry_names(root)?
        .into_iter()
        .map(|file| Sample::unlabeled(root.join(file)))
        .collect();
    log::info!("Built test set: {} samples", samples.len());
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::domain::sample::ClassId;
    use crate::dataset::infrastructure::path_indexer::list_class_labels;
    use std::fs;
    use tempfile::TempDir;

    fn make_dataset(classes: &[(&str, usize)]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for (name, count) in classes {
            let dir = tmp.path().join(name);
            fs::create_dir(&dir).unwrap();
            for i in 0..*count {
                fs::write(dir.join(format!("{i}.jpg")), b"jpeg").unwrap();
            }
        }
        tmp
    }

    #[test]
    fn test_two_classes_three_images_each() {
        let tmp = make_dataset(&[("alice", 3), ("bob", 3)]);
        let labels = list_class_labels(tmp.path()).unwrap();
        let samples = build_training_set(tmp.path(), &labels).unwrap();

        assert_eq!(samples.len(), 6);
        let ids: Vec<usize> = samples.iter().map(|s| s.class_id.unwrap().0).collect();
        assert_eq!(ids, vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_sample_paths_live_under_their_class() {
        let tmp = make_dataset(&[("alice", 2), ("bob", 1)]);
        let labels = list_class_labels(tmp.path()).unwrap();
        let samples = build_training_set(tmp.path(), &labels).unwrap();

        for sample in &samples {
            let id = sample.class_id.unwrap();
            let class_dir = tmp.path().join(&labels[id.0].name);
            assert_eq!(sample.path.parent().unwrap(), class_dir);
        }
    }

    #[test]
    fn test_ids_stay_in_label_range() {
        let tmp = make_dataset(&[("a", 1), ("b", 4), ("c", 2)]);
        let labels = list_class_labels(tmp.path()).unwrap();
        let samples = build_training_set(tmp.path(), &labels).unwrap();
        assert!(samples
            .iter()
            .all(|s| s.class_id.is_some_and(|id| id < ClassId(labels.len()))));
    }

    #[test]
    fn test_non_image_files_pass_through() {
        let tmp = make_dataset(&[("alice", 1)]);
        fs::write(tmp.path().join("alice").join("README"), b"text").unwrap();
        let labels = list_class_labels(tmp.path()).unwrap();
        assert_eq!(build_training_set(tmp.path(), &labels).unwrap().len(), 2);
    }

    #[test]
    fn test_file_at_class_level_fails() {
        let tmp = make_dataset(&[("alice", 1)]);
        fs::write(tmp.path().join("stray.jpg"), b"jpeg").unwrap();
        let labels = list_class_labels(tmp.path()).unwrap();
        let err = build_training_set(tmp.path(), &labels).unwrap_err();
        assert!(matches!(err, DatasetError::NotADirectory(_)));
    }

    #[test]
    fn test_test_set_is_flat_and_unlabeled() {
        let tmp = TempDir::new().unwrap();
        for name in ["1.jpg", "2.jpg", "3.jpg"] {
            fs::write(tmp.path().join(name), b"jpeg").unwrap();
        }
        let samples = build_test_set(tmp.path()).unwrap();
        assert_eq!(samples.len(), 3);
        assert!(samples.iter().all(|s| s.class_id.is_none()));
        assert!(samples.iter().all(|s| s.path.parent().unwrap() == tmp.path()));
    }

    #[test]
    fn test_test_set_missing_root_fails() {
        assert!(build_test_set(Path::new("/nonexistent/dataset/test")).is_err());
    }
}

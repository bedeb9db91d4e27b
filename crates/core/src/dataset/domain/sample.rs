use std::path::PathBuf;

/// Integer identity of a training subject.
///
/// Ids are positional: the n-th indexed class directory has id `n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub usize);

impl std::fmt::Display for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A training subject, named after its directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassLabel {
    pub id: ClassId,
    pub name: String,
}

/// Looks up a label by id.
///
/// Ids index the listing directly, so a reordered listing maps the same id
/// to a different name.
pub fn label_name(labels: &[ClassLabel], id: ClassId) -> Option<&str> {
    labels.get(id.0).map(|label| label.name.as_str())
}

/// An image file queued for face filtering; test images carry no class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    pub path: PathBuf,
    pub class_id: Option<ClassId>,
}

impl Sample {
    pub fn labeled(path: PathBuf, class_id: ClassId) -> Self {
        Self {
            path,
            class_id: Some(class_id),
        }
    }

    pub fn unlabeled(path: PathBuf) -> Self {
        Self {
            path,
            class_id: None,
        }
    }
}

use std::path::PathBuf;

use crate::shared::frame::Frame;

/// A test image redrawn with one face's rectangle and predicted label.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotatedImage {
    pub source: PathBuf,
    pub label: String,
    pub image: Frame,
}

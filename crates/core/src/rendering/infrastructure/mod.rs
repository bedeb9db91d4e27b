pub mod image_file_display;
pub mod overlay_annotator;

pub mod lbph_recognizer;
pub mod local_binary_pattern;

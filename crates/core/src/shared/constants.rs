pub const DEFAULT_TRAIN_ROOT: &str = "dataset/train";
pub const DEFAULT_TEST_ROOT: &str = "dataset/test";

/// Every image is resized to this square canvas before detection and rendering.
pub const CANVAS_SIZE: u32 = 350;

pub const DEFAULT_CASCADE_PATH: &str = "model/seeta_fd_frontal_v1.0.bin";
pub const CASCADE_MODEL_URL: &str =
    "https://github.com/atomashpolskiy/rustface/raw/master/model/seeta_fd_frontal_v1.0.bin";

pub const DEFAULT_OUTPUT_PATH: &str = "result.png";
pub const RESULT_TITLE: &str = "Final Result";

/// Label drawn when the recognizer rejects a face or returns an unknown id.
pub const UNKNOWN_LABEL: &str = "unknown";

pub mod shared {
    pub mod config;
    pub mod constants;
    pub mod face_rect;
    pub mod frame;
}

pub mod dataset {
    pub mod domain {
        pub mod dataset_error;
        pub mod sample;
    }
    pub mod infrastructure;
}

pub mod imaging {
    pub mod domain {
        pub mod image_reader;
        pub mod image_writer;
    }
    pub mod infrastructure;
}

pub mod detection {
    pub mod domain {
        pub mod face_crop;
        pub mod face_detector;
        pub mod face_filter;
    }
    pub mod infrastructure;
}

pub mod recognition {
    pub mod domain {
        pub mod face_recognizer;
        pub mod prediction;
        pub mod predictor;
    }
    pub mod infrastructure;
}

pub mod rendering {
    pub mod domain {
        pub mod annotated_image;
        pub mod composite;
        pub mod display_sink;
        pub mod face_annotator;
        pub mod result_renderer;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod pipeline_logger;
    pub mod recognize_faces_use_case;
}

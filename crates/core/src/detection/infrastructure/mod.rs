pub mod model_resolver;
pub mod seeta_cascade_detector;

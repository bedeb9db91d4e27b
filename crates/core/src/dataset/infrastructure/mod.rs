pub mod dataset_builder;
pub mod path_indexer;

pub mod search_pipeline;

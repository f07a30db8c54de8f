pub mod analysis;
pub mod engine;
pub mod parser;
pub mod prompt;
pub mod recommender;
pub mod types;

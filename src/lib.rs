pub mod cli;
pub mod config;
pub mod document;
pub mod extractor;
pub mod fetcher;
pub mod report;

pub mod completion;
pub mod page_loader;
pub mod transcripts;

pub mod config;
pub mod error;
pub mod pipeline;
pub mod store;
pub mod subtitle;
pub mod transcribe;
pub mod translate;

pub use config::Config;
pub use error::{Result, SonosubError};
pub use pipeline::{run_pipeline, PipelineConfig, PipelineResult};
pub use subtitle::{parse_document, subtitle_document_from_words, words_from_tokens};
pub use translate::translate_subtitle_document;

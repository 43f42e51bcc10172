pub mod localai;
pub mod openai;

pub use localai::LocalAiProvider;
pub use openai::OpenAiProvider;

pub mod preload;
pub mod provider;
pub mod providers;
pub mod types;

pub use preload::{PreloadError, preload};
pub use provider::{GenerateRequest, GeneratorError, ImageProvider};
pub use providers::{LocalAiProvider, OpenAiProvider};
pub use types::{GeneratedImage, PreparedImage, Preview};

//! Pictor library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod generate;
pub mod tui;

#[cfg(test)]
pub mod test_support;

#[derive(Clone, Debug, ValueEnum)]
pub enum Provider {
    OpenAi,
    LocalAi,
}

impl Provider {
    /// Config-file / env-var spelling of the provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::LocalAi => "localai",
        }
    }
}

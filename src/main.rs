use clap::Parser;
use pictor::Provider;
use pictor::core::config;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "pictor", about = "Terminal client for text-to-image generation")]
struct Args {
    /// Image provider to use (overrides config file and env)
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to pictor.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("pictor.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("pictor: {e}");
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(&file_config, args.provider.map(|p| p.as_str()));

    log::info!("Pictor starting up with provider: {}", resolved.provider);

    pictor::tui::run(resolved)
}

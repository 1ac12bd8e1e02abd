use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use engine::{
    OpenAiClient, openai::DEFAULT_BASE_URL, settings::DEFAULT_VISION_MODEL,
    vision::VisionDescriber,
};

/// Prints what the vision model sees in an image, without generating anything.
#[derive(clap::Parser)]
struct Arg {
    key: String,
    image: PathBuf,
    guidance: Option<String>,
    #[arg(long, default_value = DEFAULT_VISION_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    color_eyre::install()?;
    let Arg {
        key,
        image,
        guidance,
        model,
    } = Arg::parse();
    let client = OpenAiClient::new(key, DEFAULT_BASE_URL);

    let description = VisionDescriber::new(&client, model)
        .describe(&image, guidance.as_deref())
        .await?;
    println!("{description}");

    Ok(())
}

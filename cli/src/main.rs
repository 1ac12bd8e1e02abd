use std::{
    env,
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;
use color_eyre::Result;
use engine::{
    GenerationRequest, generate_image,
    settings::{API_KEY_ENV, Settings, load_config},
};
use log::LevelFilter;

mod cli;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Cli::parse();
    let config = load_config(args.config.as_deref())?;
    let settings = Settings::resolve(config, env::var(API_KEY_ENV).ok())
        .with_api_key(args.api_key)
        .with_vision_model(args.vision_model)
        .with_output_dir(args.output_dir);

    let prompt = match args.prompt {
        Some(prompt) => prompt,
        None if args.inspiration_image.is_some() => String::new(),
        None => ask_for_prompt()?,
    };

    let request = GenerationRequest {
        prompt,
        model: args.model,
        size: args.size,
        quality: args.quality.to_string(),
        inspiration_image: args.inspiration_image,
    };

    match generate_image(&settings, request).await {
        Ok(path) => {
            println!("✓ Image saved as: {}", path.display());
            println!("\n✓ Successfully generated image!");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            err.report();
            println!("\n✗ Failed to generate image.");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn ask_for_prompt() -> io::Result<String> {
    println!("OpenAI Image Generator");
    println!("{}", "-".repeat(40));
    print!("Describe the image you want: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

use std::path::PathBuf;

use engine::{Model, Quality, Size};

/// Generate images using OpenAI's gpt-image-1 or dall-e-3 models
#[derive(Debug, clap::Parser)]
#[command(name = "imagegen", version)]
pub struct Cli {
    /// The image description prompt (if not provided, will ask interactively)
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// OpenAI API key (overrides the OPENAI_API_KEY environment variable)
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Model to use for image generation
    #[arg(short, long, value_enum, default_value_t)]
    pub model: Model,

    /// Image size. dall-e-3: 1024x1024, 1024x1792, 1792x1024.
    /// gpt-image-1: 1024x1024, 1024x1536, 1536x1024
    #[arg(short, long, value_enum, default_value_t)]
    pub size: Size,

    /// Image quality. gpt-image-1: low/medium/high. dall-e-3: standard/hd
    #[arg(short, long, value_enum, default_value_t)]
    pub quality: Quality,

    /// Image whose style and content should inspire the result
    #[arg(short, long)]
    pub inspiration_image: Option<PathBuf>,

    /// Directory the image is written to (default: current directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Chat model used to describe the inspiration image
    #[arg(long)]
    pub vision_model: Option<String>,

    /// Config file to use instead of the default one
    #[arg(long)]
    pub config: Option<PathBuf>,
}

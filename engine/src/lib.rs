pub mod error;
pub use error::{GenerationError, Result};

pub mod image_model;
pub use image_model::{Model, ModelFamily, Quality, Size};

pub mod openai;
pub use openai::{OpenAiApi, OpenAiClient};

pub mod generator;
pub use generator::{GenerationRequest, Generator, compose_prompt, generate_image};

pub mod output;
pub mod settings;
pub mod vision;

#[cfg(test)]
mod fake_api;

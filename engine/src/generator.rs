use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Local;
use log::{debug, info, warn};

use crate::{
    error::{GenerationError, Result},
    image_model::{ImagePayload, Model, Size, quality::normalize_quality},
    openai::{ImageGenerationBody, OpenAiApi, OpenAiClient},
    output::save_image,
    settings::Settings,
    vision::VisionDescriber,
};

#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: Model,
    pub size: Size,
    /// Kept as text so qualities outside the known vocabulary reach the API unchanged
    pub quality: String,
    pub inspiration_image: Option<PathBuf>,
}

/// Prompt sent to the image model once the inspiration image has been described.
pub fn compose_prompt(description: &str, prompt: &str) -> String {
    if prompt.is_empty() {
        format!("Create an image based on this description: {description}")
    } else {
        format!("Create an image inspired by: {description}. Additional requirements: {prompt}")
    }
}

/// Resolves the API key from `settings` and runs one generation against OpenAI.
pub async fn generate_image(settings: &Settings, request: GenerationRequest) -> Result<PathBuf> {
    let api_key = settings
        .api_key
        .clone()
        .ok_or(GenerationError::MissingCredential)?;
    let client = OpenAiClient::new(api_key, &settings.base_url);

    Generator::new(&client, &settings.vision_model, &settings.output_dir)
        .generate(request)
        .await
}

pub struct Generator<'a> {
    api: &'a dyn OpenAiApi,
    vision_model: String,
    output_dir: PathBuf,
}

impl<'a> Generator<'a> {
    pub fn new(
        api: &'a dyn OpenAiApi,
        vision_model: impl Into<String>,
        output_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            api,
            vision_model: vision_model.into(),
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub async fn generate(&self, request: GenerationRequest) -> Result<PathBuf> {
        let prompt = self.build_prompt(&request).await?;
        let GenerationRequest {
            model,
            size,
            quality,
            ..
        } = request;

        info!("Generating image for: '{prompt}'...");
        info!("Model: {model}, Size: {size}, Quality: {quality}");

        if !model.supports_size(size) {
            warn!("{model} does not natively support {size}, sending it anyway");
        }

        let family = model.family();
        let quality = normalize_quality(family, &quality);
        info!("Using {model} with quality: {quality}");

        // The output location has to be usable before the image is paid for
        fs::create_dir_all(&self.output_dir)?;

        let format = family.response_format();
        let body = ImageGenerationBody {
            model: model.to_string(),
            prompt: prompt.clone(),
            size: size.to_string(),
            quality,
            n: 1,
            response_format: format.requested_format(),
        };

        info!("Calling OpenAI API...");
        let response = self.api.generate_image(&body).await?;
        let datum = response.data.into_iter().next().ok_or_else(|| {
            GenerationError::MalformedResponse("No image data received from API".into())
        })?;
        if let Some(revised) = &datum.revised_prompt {
            debug!("Revised prompt: {revised}");
        }

        let bytes = match format.extract(datum)? {
            ImagePayload::Inline(bytes) => {
                info!("Decoded base64 image from {model}");
                bytes
            }
            ImagePayload::Remote(url) => {
                info!("Downloading image...");
                let download = self.api.download(&url).await?;
                if !download.status.is_success() {
                    return Err(GenerationError::Download {
                        status: download.status,
                    });
                }
                download.body.to_vec()
            }
        };

        let path = save_image(&self.output_dir, &prompt, Local::now(), &bytes)?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }

    /// The user prompt, merged with a description of the inspiration image if
    /// there is one. A failed description falls back to the user prompt, which
    /// is otherwise passed on exactly as given.
    async fn build_prompt(&self, request: &GenerationRequest) -> Result<String> {
        let mut prompt = request.prompt.clone();

        if let Some(path) = &request.inspiration_image {
            let describer = VisionDescriber::new(self.api, self.vision_model.as_str());
            let guidance = Some(request.prompt.trim()).filter(|g| !g.is_empty());
            match describer.describe(path, guidance).await {
                Ok(description) => {
                    prompt = compose_prompt(&description, &request.prompt);
                    debug!("Inspired prompt: {prompt}");
                }
                Err(e) => {
                    warn!(
                        "Could not analyze inspiration image ({}): {e}. Using the original prompt.",
                        e.kind()
                    );
                }
            }
        }

        if prompt.trim().is_empty() {
            return Err(GenerationError::MissingPrompt);
        }
        Ok(prompt)
    }
}

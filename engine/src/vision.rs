use std::{fs, path::Path};

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use indoc::indoc;
use log::{debug, info};

use crate::{
    error::{GenerationError, Result},
    openai::{
        ChatRequest, OpenAiApi,
        wire::{ChatMessage, ContentPart, ImageUrl},
    },
};

const INSTRUCTION: &str = indoc! {"
    Analyze this image and describe it in detail so that the description can be used
    to create a new image inspired by it. Cover the artistic style, the colors and
    palette, the composition and framing, the mood and atmosphere, the lighting, and
    the key subjects and visual elements. Answer with the description only.
"};

const MAX_TOKENS: u32 = 500;

/// Turns a local image into a text description through a vision capable chat model.
pub struct VisionDescriber<'a> {
    api: &'a dyn OpenAiApi,
    model: String,
}

impl<'a> VisionDescriber<'a> {
    pub fn new(api: &'a dyn OpenAiApi, model: impl Into<String>) -> Self {
        Self {
            api,
            model: model.into(),
        }
    }

    pub async fn describe(&self, path: &Path, guidance: Option<&str>) -> Result<String> {
        let req = self.build_request(path, guidance)?;
        info!("Analyzing inspiration image {}...", path.display());

        let resp = self.api.chat_completion(&req).await?;
        let description = resp
            .first_text()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                GenerationError::MalformedResponse("No message in chat response".into())
            })?;

        debug!("Image description: {description}");
        Ok(description)
    }

    fn build_request(&self, path: &Path, guidance: Option<&str>) -> Result<ChatRequest> {
        if !path.is_file() {
            return Err(GenerationError::FileNotFound(path.to_path_buf()));
        }
        let data_url = format!(
            "data:{};base64,{}",
            mime_type(path),
            BASE64.encode(fs::read(path)?)
        );

        Ok(ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: instruction(guidance),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ],
            }],
            max_tokens: MAX_TOKENS,
        })
    }
}

fn instruction(guidance: Option<&str>) -> String {
    match guidance.map(str::trim).filter(|g| !g.is_empty()) {
        Some(g) => format!("{INSTRUCTION}\nThe user also asked to keep this in mind: {g}"),
        None => INSTRUCTION.to_string(),
    }
}

fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}

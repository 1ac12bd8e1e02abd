use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use super::ModelFamily;
use crate::{
    error::{GenerationError, Result},
    openai::ImageDatum,
};

/// Where the image bytes of a generation result live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    Inline(Vec<u8>),
    Remote(String),
}

/// Decoding strategy for the generation response of one model family.
pub trait ResponseFormat: Sync {
    /// Value for the `response_format` request field, if the family takes one.
    fn requested_format(&self) -> Option<&'static str>;

    fn extract(&self, datum: ImageDatum) -> Result<ImagePayload>;
}

pub struct InlineBase64;

impl ResponseFormat for InlineBase64 {
    fn requested_format(&self) -> Option<&'static str> {
        None
    }

    fn extract(&self, datum: ImageDatum) -> Result<ImagePayload> {
        let b64 = datum
            .b64_json
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                GenerationError::MalformedResponse(format!(
                    "No b64_json in response, got url: {:?}, revised_prompt: {:?}",
                    datum.url, datum.revised_prompt
                ))
            })?;
        let bytes = BASE64
            .decode(b64.trim())
            .map_err(|e| GenerationError::MalformedResponse(format!("Invalid base64: {e}")))?;
        Ok(ImagePayload::Inline(bytes))
    }
}

pub struct RemoteUrl;

impl ResponseFormat for RemoteUrl {
    fn requested_format(&self) -> Option<&'static str> {
        Some("url")
    }

    fn extract(&self, datum: ImageDatum) -> Result<ImagePayload> {
        datum
            .url
            .filter(|s| !s.is_empty())
            .map(ImagePayload::Remote)
            .ok_or_else(|| GenerationError::MalformedResponse("No URL in response".into()))
    }
}

impl ModelFamily {
    pub fn response_format(&self) -> &'static dyn ResponseFormat {
        match self {
            ModelFamily::InlineBase64 => &InlineBase64,
            ModelFamily::RemoteUrl => &RemoteUrl,
        }
    }
}

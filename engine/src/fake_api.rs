//! In-memory stand-in for the OpenAI endpoints, used by the tests.

use std::sync::Mutex;

use bytes::Bytes;
use reqwest::StatusCode;

use crate::{
    error::{GenerationError, Result},
    openai::{
        BoxFuture, ChatRequest, ChatResponse, Download, ImageDatum, ImageGenerationBody,
        ImagesResponse, OpenAiApi,
    },
};

#[derive(Default)]
pub struct FakeApi {
    /// `None` makes the chat endpoint answer 500
    pub chat_answer: Option<String>,
    pub images: Vec<ImageDatum>,
    /// Makes the generation endpoint answer with this status instead of `images`
    pub images_error: Option<StatusCode>,
    pub download_status: Option<StatusCode>,
    pub download_body: Vec<u8>,

    pub chat_requests: Mutex<Vec<String>>,
    pub image_requests: Mutex<Vec<ImageGenerationBody>>,
    pub downloads: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn chat_calls(&self) -> usize {
        self.chat_requests.lock().unwrap().len()
    }

    pub fn image_calls(&self) -> usize {
        self.image_requests.lock().unwrap().len()
    }

    pub fn download_calls(&self) -> usize {
        self.downloads.lock().unwrap().len()
    }
}

impl OpenAiApi for FakeApi {
    fn chat_completion<'a>(&'a self, req: &'a ChatRequest) -> BoxFuture<'a, Result<ChatResponse>> {
        Box::pin(async move {
            self.chat_requests
                .lock()
                .unwrap()
                .push(serde_json::to_string(req).unwrap());
            let answer = self.chat_answer.as_ref().ok_or(GenerationError::Api {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "vision unavailable".into(),
            })?;
            let body = serde_json::json!({"choices": [{"message": {"content": answer}}]});
            Ok(serde_json::from_value(body).unwrap())
        })
    }

    fn generate_image<'a>(
        &'a self,
        body: &'a ImageGenerationBody,
    ) -> BoxFuture<'a, Result<ImagesResponse>> {
        Box::pin(async move {
            self.image_requests.lock().unwrap().push(body.clone());
            if let Some(status) = self.images_error {
                return Err(GenerationError::Api {
                    status,
                    message: "Invalid prompt".into(),
                });
            }
            Ok(ImagesResponse {
                data: self.images.clone(),
            })
        })
    }

    fn download<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Download>> {
        Box::pin(async move {
            self.downloads.lock().unwrap().push(url.to_string());
            Ok(Download {
                status: self.download_status.unwrap_or(StatusCode::OK),
                body: Bytes::from(self.download_body.clone()),
            })
        })
    }
}

use std::{future::Future, pin::Pin};

use bytes::Bytes;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{GenerationError, Result};

pub mod wire;
pub use wire::{ChatRequest, ChatResponse, ImageDatum, ImageGenerationBody, ImagesResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Body and status of a plain GET
#[derive(Debug, Clone)]
pub struct Download {
    pub status: StatusCode,
    pub body: Bytes,
}

/// The three calls the program makes against the outside world.
pub trait OpenAiApi: Sync {
    fn chat_completion<'a>(&'a self, req: &'a ChatRequest) -> BoxFuture<'a, Result<ChatResponse>>;

    fn generate_image<'a>(
        &'a self,
        body: &'a ImageGenerationBody,
    ) -> BoxFuture<'a, Result<ImagesResponse>>;

    fn download<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Download>>;
}

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: serde::Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{path}", self.base_url);
        debug!("POST {url}");
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;
        decode_body(status, &text)
    }
}

/// Non-success statuses become `Api`, bodies of the wrong shape `MalformedResponse`.
fn decode_body<R: DeserializeOwned>(status: StatusCode, text: &str) -> Result<R> {
    if !status.is_success() {
        return Err(GenerationError::Api {
            status,
            message: wire::error_message(text),
        });
    }

    serde_json::from_str(text)
        .map_err(|e| GenerationError::MalformedResponse(format!("{e}:\n{text}")))
}

impl OpenAiApi for OpenAiClient {
    fn chat_completion<'a>(&'a self, req: &'a ChatRequest) -> BoxFuture<'a, Result<ChatResponse>> {
        Box::pin(self.post_json("chat/completions", req))
    }

    fn generate_image<'a>(
        &'a self,
        body: &'a ImageGenerationBody,
    ) -> BoxFuture<'a, Result<ImagesResponse>> {
        Box::pin(self.post_json("images/generations", body))
    }

    fn download<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Download>> {
        Box::pin(async move {
            debug!("GET {url}");
            let res = self.client.get(url).send().await?;
            let status = res.status();
            let body = res.bytes().await?;
            Ok(Download { status, body })
        })
    }
}

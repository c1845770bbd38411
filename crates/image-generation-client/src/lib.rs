//! OpenAI image generation client.
//!
//! Text-to-image via the OpenAI images endpoint; returns the URL of the generated picture.

use anyhow::Result;
use async_openai::types::{CreateImageRequestArgs, Image, ImageModel, ImageSize};
use async_trait::async_trait;
use openai_client::OpenAIClient;

/// Default image model.
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Size of every generated image.
const IMAGE_SIZE: ImageSize = ImageSize::S1024x1024;

/// Text-to-image backend. Handlers depend on this so tests can script results.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generates one image for `prompt` and returns its URL.
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}

/// OpenAI images client; shares the account client with chat completion.
#[derive(Clone)]
pub struct ImageGenerationClient {
    client: OpenAIClient,
    model: String,
}

impl ImageGenerationClient {
    pub fn new(api_key: String) -> Self {
        Self::from_client(OpenAIClient::new(api_key))
    }

    /// Client for a custom base URL (OpenAI-compatible services).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self::from_client(OpenAIClient::with_base_url(api_key, base_url))
    }

    pub fn from_client(client: OpenAIClient) -> Self {
        Self {
            client,
            model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }

    /// Sets the model (dall-e-2, dall-e-3, or any provider-specific name).
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    fn image_model(&self) -> ImageModel {
        match self.model.as_str() {
            "dall-e-2" => ImageModel::DallE2,
            "dall-e-3" => ImageModel::DallE3,
            other => ImageModel::Other(other.to_string()),
        }
    }
}

#[async_trait]
impl ImageGenerator for ImageGenerationClient {
    #[tracing::instrument(skip(self))]
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        tracing::info!(
            model = %self.model,
            size = ?IMAGE_SIZE,
            prompt_preview = %prompt.chars().take(100).collect::<String>(),
            api_key = %self.client.masked_key(),
            "OpenAI image generation request"
        );

        let request = CreateImageRequestArgs::default()
            .prompt(prompt)
            .model(self.image_model())
            .size(IMAGE_SIZE)
            .n(1)
            .build()?;

        let response = self.client.inner().images().create(request).await?;

        let url = response.data.iter().find_map(|image| match image.as_ref() {
            Image::Url { url, .. } => Some(url.clone()),
            _ => None,
        });
        match url {
            Some(url) => {
                tracing::info!(image_url = %url, "OpenAI image generation completed");
                Ok(url)
            }
            None => anyhow::bail!("No image URL in response"),
        }
    }
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use base64::engine::general_purpose;
use base64::Engine;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::discard_pages;
use super::script_prompt;
use super::ComicScript;
use super::STYLE_HINT;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::GenerationRequest;
use crate::domain::models::Page;
use crate::infrastructure::objects::ObjectStore;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<MessageRequest>,
    response_format: ResponseFormat,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionMessage {
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ImageRequest {
    model: String,
    prompt: String,
    n: usize,
    response_format: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ImageData {
    b64_json: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

pub struct OpenAI {
    url: String,
    token: String,
    model: String,
    image_model: String,
    timeout: String,
}

impl Default for OpenAI {
    fn default() -> OpenAI {
        return OpenAI {
            url: Config::get(ConfigKey::OpenAiURL),
            token: Config::get(ConfigKey::OpenAiToken),
            model: Config::get(ConfigKey::Model),
            image_model: Config::get(ConfigKey::ImageModel),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
        };
    }
}

impl OpenAI {
    async fn generate_script(&self, request: &GenerationRequest) -> Result<ComicScript> {
        let req = CompletionRequest {
            model: self.model.to_string(),
            messages: vec![
                MessageRequest {
                    role: "system".to_string(),
                    content: "You write comic page scripts as strict JSON.".to_string(),
                },
                MessageRequest {
                    role: "user".to_string(),
                    content: script_prompt(request),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/v1/chat/completions", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make script request to OpenAI"
            );
            bail!("Failed to make script request to OpenAI");
        }

        let ores = res.json::<CompletionResponse>().await?;
        if ores.choices.is_empty() {
            bail!("OpenAI returned no script choices");
        }

        let payload = ores.choices[0].message.content.to_string();
        tracing::debug!(body = payload.as_str(), "Comic script response");
        return Ok(ComicScript::parse(&payload)?.normalize(request.page_count.as_usize()));
    }

    async fn generate_image(&self, illustration: &str) -> Result<Vec<u8>> {
        let req = ImageRequest {
            model: self.image_model.to_string(),
            prompt: format!("{STYLE_HINT}{illustration}"),
            n: 1,
            response_format: "b64_json".to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/v1/images/generations", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make image request to OpenAI"
            );
            bail!("Failed to make image request to OpenAI");
        }

        let ores = res.json::<ImageResponse>().await?;
        if ores.data.is_empty() {
            bail!("OpenAI returned no image data");
        }

        return Ok(general_purpose::STANDARD.decode(&ores.data[0].b64_json)?);
    }
}

#[async_trait]
impl Backend for OpenAI {
    fn name(&self) -> BackendName {
        return BackendName::OpenAI;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("OpenAI URL is not defined");
        }
        if self.token.is_empty() {
            bail!("OpenAI token is not defined");
        }

        // OpenAI are trolls with their API where the index either returns a 404 or a
        // 418. If using the official API, don't bother health checking it.
        if self.url == "https://api.openai.com" {
            return Ok(());
        }

        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "OpenAI is not reachable");
            bail!("OpenAI is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "OpenAI health check failed");
            bail!("OpenAI health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn generate(&self, request: GenerationRequest) -> Result<Vec<Page>> {
        let script = self.generate_script(&request).await?;

        let mut pages: Vec<Page> = vec![];
        for (idx, script_page) in script.pages.iter().enumerate() {
            let bytes = match self.generate_image(&script_page.illustration).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    discard_pages(&pages);
                    return Err(err);
                }
            };

            let image_url = ObjectStore::create(bytes);
            pages.push(Page::new(idx + 1, &image_url, script_page.title.clone()));
        }

        tracing::debug!(pages = pages.len(), "Generated comic pages");
        return Ok(pages);
    }
}

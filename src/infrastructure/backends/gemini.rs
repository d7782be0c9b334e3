#[cfg(test)]
#[path = "gemini_test.rs"]
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
#[serde(rename_all = "camelCase")]
struct ContentPartsBlob {
    mime_type: String,
    data: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<ContentPartsBlob>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn text(&self) -> String {
        let mut text = "".to_string();
        for candidate in &self.candidates {
            for part in &candidate.content.parts {
                if let Some(part_text) = &part.text {
                    text += part_text;
                }
            }
        }

        return text;
    }

    fn image_bytes(&self) -> Result<Vec<u8>> {
        for candidate in &self.candidates {
            for part in &candidate.content.parts {
                if let Some(blob) = &part.inline_data {
                    if blob.mime_type.starts_with("image/") {
                        return Ok(general_purpose::STANDARD.decode(&blob.data)?);
                    }
                }
            }
        }

        bail!("No image parts found in response, the model may have returned text only");
    }
}

fn user_content(text: &str) -> Vec<Content> {
    return vec![Content {
        role: "user".to_string(),
        parts: vec![ContentPart {
            text: Some(text.to_string()),
            inline_data: None,
        }],
    }];
}

pub struct Gemini {
    url: String,
    token: String,
    model: String,
    image_model: String,
    timeout: String,
}

impl Default for Gemini {
    fn default() -> Gemini {
        return Gemini {
            url: "https://generativelanguage.googleapis.com".to_string(),
            token: Config::get(ConfigKey::GeminiToken),
            model: Config::get(ConfigKey::Model),
            image_model: Config::get(ConfigKey::ImageModel),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
        };
    }
}

impl Gemini {
    async fn generate_content(
        &self,
        model: &str,
        req: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/models/{model}:generateContent?key={key}",
                url = self.url,
                key = self.token,
            ))
            .json(req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                model = model,
                "Failed to make generate request to Gemini"
            );
            bail!(format!(
                "Failed to make generate request to Gemini, {}",
                res.status().as_u16()
            ));
        }

        return Ok(res.json::<GenerateContentResponse>().await?);
    }

    async fn generate_script(&self, request: &GenerationRequest) -> Result<ComicScript> {
        let req = GenerateContentRequest {
            contents: user_content(&script_prompt(request)),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
        };

        let res = self.generate_content(&self.model, &req).await?;
        let payload = res.text();
        if payload.is_empty() {
            bail!("Gemini returned an empty comic script");
        }

        tracing::debug!(body = payload.as_str(), "Comic script response");
        return Ok(ComicScript::parse(&payload)?.normalize(request.page_count.as_usize()));
    }

    async fn generate_image(&self, illustration: &str) -> Result<Vec<u8>> {
        let req = GenerateContentRequest {
            contents: user_content(&format!("{STYLE_HINT}{illustration}")),
            generation_config: None,
        };

        let res = self.generate_content(&self.image_model, &req).await?;
        return res.image_bytes();
    }
}

#[async_trait]
impl Backend for Gemini {
    fn name(&self) -> BackendName {
        return BackendName::Gemini;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Gemini URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Gemini token is not defined");
        }

        let url = format!(
            "{url}/v1beta/models/{model}?key={key}",
            url = self.url,
            model = self.model,
            key = self.token
        );

        let res = reqwest::Client::new()
            .get(&url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Gemini is not reachable");
            bail!("Gemini is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Gemini health check failed");
            bail!("Gemini health check failed");
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

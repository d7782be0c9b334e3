use anyhow::Result;
use base64::engine::general_purpose;
use base64::Engine;
use test_utils::png_fixture;
use test_utils::script_fixture_json;

use super::Candidate;
use super::Content;
use super::ContentPart;
use super::ContentPartsBlob;
use super::Gemini;
use super::GenerateContentResponse;
use crate::domain::models::Backend;
use crate::domain::models::GenerationRequest;
use crate::domain::models::PageCount;
use crate::infrastructure::objects::ObjectStore;

impl Gemini {
    fn with_url(url: String) -> Gemini {
        return Gemini {
            url,
            token: "abc".to_string(),
            model: "text-model".to_string(),
            image_model: "image-model".to_string(),
            timeout: "200".to_string(),
        };
    }
}

fn text_body(text: &str) -> String {
    let res = GenerateContentResponse {
        candidates: vec![Candidate {
            content: Content {
                role: "model".to_string(),
                parts: vec![ContentPart {
                    text: Some(text.to_string()),
                    inline_data: None,
                }],
            },
        }],
    };

    return serde_json::to_string(&res).unwrap();
}

fn image_body() -> String {
    let res = GenerateContentResponse {
        candidates: vec![Candidate {
            content: Content {
                role: "model".to_string(),
                parts: vec![ContentPart {
                    text: None,
                    inline_data: Some(ContentPartsBlob {
                        mime_type: "image/png".to_string(),
                        data: general_purpose::STANDARD.encode(png_fixture()),
                    }),
                }],
            },
        }],
    };

    return serde_json::to_string(&res).unwrap();
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1beta/models/text-model?key=abc")
        .with_status(200)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1beta/models/text-model?key=abc")
        .with_status(500)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_generates_comic_pages() -> Result<()> {
    let mut server = mockito::Server::new();
    let script_mock = server
        .mock("POST", "/v1beta/models/text-model:generateContent?key=abc")
        .with_status(200)
        .with_body(text_body(&script_fixture_json(2)))
        .create();
    let image_mock = server
        .mock("POST", "/v1beta/models/image-model:generateContent?key=abc")
        .with_status(200)
        .with_body(image_body())
        .expect(2)
        .create();

    let backend = Gemini::with_url(server.url());
    let request = GenerationRequest::new("A tomato plant in space", PageCount::Two);
    let pages = backend.generate(request).await?;

    script_mock.assert();
    image_mock.assert();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].page_number, 1);
    assert_eq!(pages[1].page_number, 2);
    assert_eq!(pages[0].title, Some("Scene 1".to_string()));

    for page in &pages {
        assert!(ObjectStore::is_managed(&page.image_url));
        assert_eq!(ObjectStore::resolve(&page.image_url), Some(png_fixture().to_vec()));
        ObjectStore::release(&page.image_url);
    }

    return Ok(());
}

#[tokio::test]
async fn it_pads_short_scripts_to_the_requested_page_count() -> Result<()> {
    let mut server = mockito::Server::new();
    let script_mock = server
        .mock("POST", "/v1beta/models/text-model:generateContent?key=abc")
        .with_status(200)
        .with_body(text_body(&script_fixture_json(1)))
        .create();
    let image_mock = server
        .mock("POST", "/v1beta/models/image-model:generateContent?key=abc")
        .with_status(200)
        .with_body(image_body())
        .expect(2)
        .create();

    let backend = Gemini::with_url(server.url());
    let request = GenerationRequest::new("A tomato plant in space", PageCount::Two);
    let pages = backend.generate(request).await?;

    script_mock.assert();
    image_mock.assert();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].title, pages[0].title);

    for page in &pages {
        ObjectStore::release(&page.image_url);
    }

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_invalid_scripts() {
    let mut server = mockito::Server::new();
    let script_mock = server
        .mock("POST", "/v1beta/models/text-model:generateContent?key=abc")
        .with_status(200)
        .with_body(text_body("this is not a script"))
        .create();

    let backend = Gemini::with_url(server.url());
    let request = GenerationRequest::new("A tomato plant in space", PageCount::One);
    let res = backend.generate(request).await;

    script_mock.assert();
    assert!(res.is_err());
}

#[tokio::test]
async fn it_fails_when_image_generation_fails() {
    let mut server = mockito::Server::new();
    let script_mock = server
        .mock("POST", "/v1beta/models/text-model:generateContent?key=abc")
        .with_status(200)
        .with_body(text_body(&script_fixture_json(2)))
        .create();
    let image_mock = server
        .mock("POST", "/v1beta/models/image-model:generateContent?key=abc")
        .with_status(500)
        .create();

    let backend = Gemini::with_url(server.url());
    let request = GenerationRequest::new("A tomato plant in space", PageCount::Two);
    let res = backend.generate(request).await;

    script_mock.assert();
    image_mock.assert();
    assert!(res.is_err());
}

#[tokio::test]
async fn it_fails_when_the_response_has_no_image_parts() {
    let mut server = mockito::Server::new();
    let _script_mock = server
        .mock("POST", "/v1beta/models/text-model:generateContent?key=abc")
        .with_status(200)
        .with_body(text_body(&script_fixture_json(1)))
        .create();
    let image_mock = server
        .mock("POST", "/v1beta/models/image-model:generateContent?key=abc")
        .with_status(200)
        .with_body(text_body("no image here"))
        .create();

    let backend = Gemini::with_url(server.url());
    let request = GenerationRequest::new("A tomato plant in space", PageCount::One);
    let res = backend.generate(request).await;

    image_mock.assert();
    assert!(res.is_err());
}

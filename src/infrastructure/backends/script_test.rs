use anyhow::Result;

use super::script_prompt;
use super::ComicScript;
use super::ScriptPage;
use crate::domain::models::GenerationRequest;
use crate::domain::models::PageCount;

fn script_fixture(total: usize) -> ComicScript {
    let pages = (1..=total)
        .map(|number| {
            return ScriptPage {
                title: Some(format!("Scene {number}")),
                illustration: format!("Panel layout {number}"),
            };
        })
        .collect();

    return ComicScript { pages };
}

#[test]
fn it_parses_scripts() -> Result<()> {
    let payload = r#"{"pages": [{"title": "Liftoff", "illustration": "A rocket on a vine"}]}"#;
    let script = ComicScript::parse(payload)?;

    assert_eq!(script.pages.len(), 1);
    assert_eq!(script.pages[0].title, Some("Liftoff".to_string()));
    assert_eq!(script.pages[0].illustration, "A rocket on a vine");

    return Ok(());
}

#[test]
fn it_parses_scripts_without_titles() -> Result<()> {
    let payload = r#"{"pages": [{"illustration": "A rocket on a vine"}]}"#;
    let script = ComicScript::parse(payload)?;

    assert_eq!(script.pages[0].title, None);

    return Ok(());
}

#[test]
fn it_rejects_invalid_scripts() {
    assert!(ComicScript::parse("not json").is_err());
    assert!(ComicScript::parse(r#"{"pages": []}"#).is_err());
}

#[test]
fn it_pads_short_scripts() {
    let script = script_fixture(1).normalize(3);

    assert_eq!(script.pages.len(), 3);
    assert_eq!(script.pages[1], script.pages[0]);
    assert_eq!(script.pages[2], script.pages[0]);
}

#[test]
fn it_truncates_long_scripts() {
    let script = script_fixture(5).normalize(2);

    assert_eq!(script.pages.len(), 2);
    assert_eq!(script.pages[1].title, Some("Scene 2".to_string()));
}

#[test]
fn it_keeps_exact_scripts() {
    let script = script_fixture(2).normalize(2);
    assert_eq!(script, script_fixture(2));
}

#[test]
fn it_builds_script_prompts() {
    let request = GenerationRequest::new("A tomato plant in space", PageCount::Two);
    let prompt = script_prompt(&request);

    assert!(prompt.contains("2-page comic"));
    assert!(prompt.contains("A tomato plant in space"));
    assert!(prompt.contains("\"pages\""));
}

use super::Page;

#[test]
fn it_executes_new() {
    let page = Page::new(1, "https://example.com/page-1.png", Some("Liftoff".to_string()));
    assert_eq!(page.page_number, 1);
    assert_eq!(page.image_url, "https://example.com/page-1.png");
    assert_eq!(page.title, Some("Liftoff".to_string()));
}

#[test]
fn it_displays_titles() {
    let page = Page::new(1, "blob:inkstrip/abc", Some("Liftoff".to_string()));
    assert_eq!(page.display_title(), "Liftoff");
}

#[test]
fn it_falls_back_to_generic_titles() {
    let untitled = Page::new(3, "blob:inkstrip/abc", None);
    assert_eq!(untitled.display_title(), "Page 3");

    let blank = Page::new(7, "blob:inkstrip/abc", Some("   ".to_string()));
    assert_eq!(blank.display_title(), "Page 7");
}

#[test]
fn it_serializes_with_camel_case_keys() {
    let page = Page::new(2, "blob:inkstrip/abc", None);
    let json = serde_json::to_value(&page).unwrap();

    assert_eq!(json["pageNumber"], 2);
    assert_eq!(json["imageUrl"], "blob:inkstrip/abc");
    assert!(json.get("title").is_none());
}

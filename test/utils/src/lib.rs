/// A handful of bytes with a PNG signature, enough to stand in for a
/// generated page image without shipping a real file.
pub fn png_fixture() -> &'static [u8] {
    return b"\x89PNG\r\n\x1a\n-fake-comic-page-bytes";
}

/// A comic script payload the way the text models return it.
pub fn script_fixture_json(total: usize) -> String {
    let pages = (1..=total)
        .map(|number| {
            return format!(
                r#"{{"title": "Scene {number}", "illustration": "Panel layout {number}"}}"#
            );
        })
        .collect::<Vec<String>>()
        .join(", ");

    return format!(r#"{{"pages": [{pages}]}}"#);
}

use scraper::{ElementRef, Html, Selector};

/// Text content of a node with surrounding whitespace (incl. `&nbsp;`) removed.
pub fn extract_text(node: ElementRef) -> String {
    node.text().collect::<String>().trim().to_string()
}

/// First whitespace-delimited word, e.g. `"T1"` out of `"T1 - Term One"`.
pub fn first_word(text: &str) -> Option<&str> {
    text.split_whitespace().next()
}

/// First element after `from` in document order (its own descendants
/// included) that matches `selector`.
pub fn find_next<'a>(
    document: &'a Html,
    from: ElementRef<'a>,
    selector: &Selector,
) -> Option<ElementRef<'a>> {
    document
        .root_element()
        .descendants()
        .skip_while(|node| node.id() != from.id())
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|element| selector.matches(element))
}

pub fn sel(selector: &str) -> Selector {
    Selector::parse(selector).expect("static selector is valid")
}

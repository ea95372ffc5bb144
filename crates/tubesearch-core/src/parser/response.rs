//! Unwrapping of search response documents
//!
//! Both the seed embedded in a results page and the first API response use
//! the "initial" shape, rooted at `contents`. Follow-up pages use the
//! "continuation" shape, rooted at `onResponseReceivedCommands`. Either way
//! the interesting part is a list of polymorphic elements that are flattened
//! into raw renderers plus at most one continuation token.

use serde_json::Value;

/// Raw renderers and the token for the next page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    /// Renderer objects such as `{"videoRenderer": {...}}`
    pub items: Vec<Value>,
    /// Token to request the following page, if any
    pub continuation: Option<String>,
}

/// One element of a contents list
#[derive(Debug)]
enum Element<'a> {
    /// `itemSectionRenderer` holding a list of renderers
    Section(&'a [Value]),
    /// `richItemRenderer` or `richSectionRenderer` holding one renderer
    Single(&'a Value),
    /// `continuationItemRenderer` holding the next-page token
    Continuation(&'a str),
    Unrecognized,
}

impl<'a> Element<'a> {
    fn classify(element: &'a Value) -> Self {
        if let Some(section) = element.get("itemSectionRenderer") {
            return section
                .get("contents")
                .and_then(Value::as_array)
                .map(|contents| Element::Section(contents.as_slice()))
                .unwrap_or(Element::Unrecognized);
        }

        for wrapper in ["richItemRenderer", "richSectionRenderer"] {
            if let Some(content) = element.get(wrapper).and_then(|w| w.get("content")) {
                return Element::Single(content);
            }
        }

        if let Some(token) = element
            .pointer("/continuationItemRenderer/continuationEndpoint/continuationCommand/token")
            .and_then(Value::as_str)
        {
            return Element::Continuation(token);
        }

        Element::Unrecognized
    }
}

/// Extracts raw renderers and the continuation token from a response
///
/// # Arguments
/// * `document` - Seed JSON, an initial API response or a continuation response
///
/// # Returns
/// `None` when the document matches neither known shape. Callers that only
/// care about items can treat that as an empty [`Batch`].
pub fn unwrap_response(document: &Value) -> Option<Batch> {
    let elements = if document.get("contents").is_some() {
        initial_contents(document)?
    } else if document.get("onResponseReceivedCommands").is_some() {
        continuation_contents(document)?
    } else {
        return None;
    };

    Some(flatten(elements))
}

/// Contents list of the initial shape, as a section list or a grid
fn initial_contents(document: &Value) -> Option<&[Value]> {
    let contents = &document["contents"];
    let primary = contents
        .pointer("/twoColumnSearchResultsRenderer/primaryContents")
        .unwrap_or(contents);

    primary
        .pointer("/sectionListRenderer/contents")
        .or_else(|| primary.pointer("/richGridRenderer/contents"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

/// Items of the first append action in the continuation shape
fn continuation_contents(document: &Value) -> Option<&[Value]> {
    document
        .pointer("/onResponseReceivedCommands/0/appendContinuationItemsAction/continuationItems")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

fn flatten(elements: &[Value]) -> Batch {
    let mut batch = Batch::default();

    for element in elements {
        match Element::classify(element) {
            Element::Section(contents) => {
                for inner in contents {
                    // Sections may themselves end with the continuation marker
                    match Element::classify(inner) {
                        Element::Continuation(token) => set_once(&mut batch, token),
                        Element::Single(content) => batch.items.push(content.clone()),
                        _ => batch.items.push(inner.clone()),
                    }
                }
            }
            Element::Single(content) => batch.items.push(content.clone()),
            Element::Continuation(token) => set_once(&mut batch, token),
            Element::Unrecognized => {}
        }
    }

    batch
}

fn set_once(batch: &mut Batch, token: &str) {
    if batch.continuation.is_none() {
        batch.continuation = Some(token.to_string());
    }
}

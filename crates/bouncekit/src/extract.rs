//! Open Graph metadata extraction
//!
//! Parses a fetched document with a lenient HTML5 parser and reads the
//! `og:title`, `og:description` and `og:image` properties out of its `meta`
//! tags. Extraction never fails: malformed markup is repaired by the parser
//! and missing tags leave the corresponding field empty.

use scraper::Html;

/// Social-preview properties scraped from a page
///
/// Absent properties are empty strings. A tag that is present but has an
/// empty `content` is indistinguishable from a missing tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewMetadata {
    /// `og:title`
    pub title: String,
    /// `og:description`
    pub description: String,
    /// `og:image`, exactly as written in the page (may be relative)
    pub image: String,
}

impl PreviewMetadata {
    /// Create metadata from its three fields
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image: image.into(),
        }
    }

    /// Returns true if no property was found
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.image.is_empty()
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Image => &mut self.image,
        }
    }

    fn with(mut self, field: Field, content: String, policy: DuplicatePolicy) -> Self {
        let slot = self.slot(field);
        match policy {
            DuplicatePolicy::LastWins => *slot = content,
            DuplicatePolicy::FirstWins if slot.is_empty() => *slot = content,
            DuplicatePolicy::FirstWins => {}
        }
        self
    }
}

/// Which tag wins when several `meta` tags map to the same property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The last matching tag in document order wins
    #[default]
    LastWins,
    /// The first matching tag with non-empty content wins
    FirstWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
    Image,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "og:title" => Some(Field::Title),
            "og:description" => Some(Field::Description),
            "og:image" => Some(Field::Image),
            _ => None,
        }
    }
}

/// Extract preview metadata using the default [`DuplicatePolicy::LastWins`]
pub fn extract(body: &[u8]) -> PreviewMetadata {
    extract_with_policy(body, DuplicatePolicy::default())
}

/// Extract preview metadata with an explicit duplicate policy
pub fn extract_with_policy(body: &[u8], policy: DuplicatePolicy) -> PreviewMetadata {
    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);

    // descendants() is a pre-order walk, i.e. document order
    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| node.value().as_element())
        .filter(|element| element.name().eq_ignore_ascii_case("meta"))
        .filter_map(|element| meta_entry(element.attrs()))
        .fold(PreviewMetadata::default(), |acc, (field, content)| {
            acc.with(field, content, policy)
        })
}

/// Map one `meta` tag's attributes to a recognized field and its content
fn meta_entry<'a>(attrs: impl Iterator<Item = (&'a str, &'a str)>) -> Option<(Field, String)> {
    let mut property = String::new();
    let mut name = String::new();
    let mut content = String::new();

    for (key, value) in attrs {
        if key.eq_ignore_ascii_case("property") {
            property = value.trim().to_lowercase();
        } else if key.eq_ignore_ascii_case("name") {
            name = value.trim().to_lowercase();
        } else if key.eq_ignore_ascii_case("content") {
            content = value.trim().to_string();
        }
    }

    let key = if property.is_empty() { name } else { property };
    Field::from_key(&key).map(|field| (field, content))
}

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::{SafeHtml, scheme};

/// Attributes whose values are followed as links.
const URL_ATTRIBUTES: &[&str] = &["href", "src", "cite"];

/// A named allow-list of tags, attributes per tag and link schemes.
///
/// Build one with the chained `allow_*` methods:
///
/// ```
/// use bloggerish::sanitizer::SanitizationPolicy;
///
/// let policy = SanitizationPolicy::new("links")
///     .allow_tags(&["b", "i"])
///     .allow_attributes("a", &["href"]);
/// assert!(policy.allows_tag("a"));
/// assert!(!policy.allows_attribute("a", "onclick"));
/// ```
#[derive(Debug, Clone)]
pub struct SanitizationPolicy {
    name: String,
    tags: HashMap<String, HashSet<String>>,
    url_schemes: HashSet<String>,
}

impl SanitizationPolicy {
    /// An empty policy: no tags, links limited to `http` and `https`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: HashMap::new(),
            url_schemes: ["http", "https"].into_iter().map(String::from).collect(),
        }
    }

    pub fn allow_tags(mut self, tags: &[&str]) -> Self {
        for tag in tags {
            self.tags.entry(tag.to_ascii_lowercase()).or_default();
        }
        self
    }

    /// Allows `tag` (if not already allowed) together with `attributes` on it.
    pub fn allow_attributes(mut self, tag: &str, attributes: &[&str]) -> Self {
        let allowed = self.tags.entry(tag.to_ascii_lowercase()).or_default();
        allowed.extend(attributes.iter().map(|a| a.to_ascii_lowercase()));
        self
    }

    /// Replaces the set of schemes accepted in link attributes.
    pub fn url_schemes(mut self, schemes: &[&str]) -> Self {
        self.url_schemes = schemes.iter().map(|s| s.to_ascii_lowercase()).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    /// Event handlers (`on*`) are refused whatever the policy says.
    pub fn allows_attribute(&self, tag: &str, attribute: &str) -> bool {
        if attribute.starts_with("on") {
            return false;
        }
        self.tags
            .get(tag)
            .is_some_and(|allowed| allowed.contains(attribute))
    }

    /// Checks an attribute value that survived [`allows_attribute`](Self::allows_attribute).
    pub fn allows_value(&self, attribute: &str, value: &str) -> bool {
        !URL_ATTRIBUTES.contains(&attribute) || scheme::is_allowed_url(value, &self.url_schemes)
    }

    pub fn sanitize(&self, input: &str) -> SafeHtml {
        super::sanitize(input, self)
    }
}

/// The policies the blog selects per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// No markup at all: titles, author names, echoed search queries.
    Plain,
    /// Inline formatting for comments.
    Comment,
    /// Profile bios, which may use paragraphs and lists.
    Bio,
    /// Post bodies.
    Post,
}

static PLAIN: LazyLock<SanitizationPolicy> = LazyLock::new(|| SanitizationPolicy::new("plain"));

static COMMENT: LazyLock<SanitizationPolicy> = LazyLock::new(|| {
    SanitizationPolicy::new("comment")
        .allow_tags(&["b", "i", "em", "strong", "code", "br"])
        .allow_attributes("a", &["href"])
});

static BIO: LazyLock<SanitizationPolicy> = LazyLock::new(|| {
    SanitizationPolicy::new("bio")
        .allow_tags(&[
            "b",
            "i",
            "em",
            "strong",
            "br",
            "ul",
            "ol",
            "li",
            "p",
            "blockquote",
        ])
        .allow_attributes("a", &["href", "target", "rel"])
});

static POST: LazyLock<SanitizationPolicy> = LazyLock::new(|| {
    SanitizationPolicy::new("post")
        .allow_tags(&[
            "b",
            "i",
            "em",
            "strong",
            "br",
            "ul",
            "ol",
            "li",
            "p",
            "h2",
            "h3",
            "pre",
            "code",
            "hr",
        ])
        .allow_attributes("a", &["href", "target", "rel"])
        .allow_attributes("blockquote", &["cite"])
});

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Plain,
        PolicyKind::Comment,
        PolicyKind::Bio,
        PolicyKind::Post,
    ];

    pub fn policy(self) -> &'static SanitizationPolicy {
        match self {
            PolicyKind::Plain => &*PLAIN,
            PolicyKind::Comment => &*COMMENT,
            PolicyKind::Bio => &*BIO,
            PolicyKind::Post => &*POST,
        }
    }

    pub fn sanitize(self, input: &str) -> SafeHtml {
        self.policy().sanitize(input)
    }
}

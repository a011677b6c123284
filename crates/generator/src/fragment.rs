//! Intermediate markup tree. The renderer builds fragments; the HTML
//! serializer is the only place user content meets output text, and it
//! escapes everything on the way through.

/// HTML-escape a string for both text nodes and attribute values.
///
/// Escapes: & < > " '
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Element(Element),
    Text(String),
}

impl Fragment {
    pub fn text(s: impl Into<String>) -> Fragment {
        Fragment::Text(s.into())
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Fragment::Text(text) => out.push_str(&escape(text)),
            Fragment::Element(el) => el.write_html(out),
        }
    }
}

impl From<Element> for Fragment {
    fn from(el: Element) -> Self {
        Fragment::Element(el)
    }
}

/// Elements with no closing tag and no children.
const VOID_TAGS: &[&str] = &["img", "input", "br", "hr", "meta", "link"];

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    classes: Vec<String>,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Fragment>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Element {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add one or more space-separated classes.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        self.classes
            .extend(class.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Boolean attribute (`required`, `allowfullscreen`), rendered without
    /// a value.
    pub fn flag(mut self, name: &'static str) -> Self {
        self.attrs.push((name, String::new()));
        self
    }

    pub fn child(mut self, child: impl Into<Fragment>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Fragment>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Fragment::text(text))
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape(&self.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() {
                out.push_str("=\"");
                out.push_str(&escape(value));
                out.push('"');
            }
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

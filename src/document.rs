use std::fmt;

pub mod attrs {
    pub const NAME: &str = "name";
    pub const CLASSNAME: &str = "classname";
    pub const TESTS: &str = "tests";
    pub const ERRORS: &str = "errors";
    pub const FAILURES: &str = "failures";
    pub const SKIPPED: &str = "skipped";
    pub const TIMESTAMP: &str = "timestamp";
    pub const TIME: &str = "time";
}

const TAG_REPORT: &str = "testsuites";
const TAG_TEST_SUITE: &str = "testsuite";
const TAG_TEST_CASE: &str = "testcase";
const TAG_FAILURE: &str = "failure";
const TAG_ERROR: &str = "error";
const TAG_SKIPPED: &str = "skipped";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    TestSuites,
    TestSuite,
    TestCase,
    Failure,
    Error,
    Skipped,
}

impl NodeKind {
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::TestSuites => TAG_REPORT,
            NodeKind::TestSuite => TAG_TEST_SUITE,
            NodeKind::TestCase => TAG_TEST_CASE,
            NodeKind::Failure => TAG_FAILURE,
            NodeKind::Error => TAG_ERROR,
            NodeKind::Skipped => TAG_SKIPPED,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Count(u64),
    Seconds(f64),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Count(n) => write!(f, "{n}"),
            // f64's Display already drops a trailing `.0`
            AttributeValue::Seconds(secs) => write!(f, "{secs}"),
        }
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        AttributeValue::Count(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Seconds(value)
    }
}

/// One element of a JUnit document. Attributes and children keep insertion
/// order so serialization is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    attributes: Vec<(&'static str, AttributeValue)>,
    children: Vec<Node>,
    text: Option<String>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    pub fn test_suites<T: Into<String>>(name: T) -> Self {
        Self::new(NodeKind::TestSuites)
            .with_attribute(attrs::NAME, AttributeValue::Text(name.into()))
    }

    pub fn test_suite() -> Self {
        Self::new(NodeKind::TestSuite)
    }

    pub fn test_case() -> Self {
        Self::new(NodeKind::TestCase)
    }

    pub fn failure<T: Into<String>>(message: T) -> Self {
        Self::new(NodeKind::Failure).with_text(message)
    }

    pub fn error<T: Into<String>>(message: T) -> Self {
        Self::new(NodeKind::Error).with_text(message)
    }

    pub fn skipped() -> Self {
        Self::new(NodeKind::Skipped)
    }

    pub fn with_attribute<T: Into<AttributeValue>>(mut self, key: &'static str, value: T) -> Self {
        self.attributes.push((key, value.into()));
        self
    }

    pub fn with_text<T: Into<String>>(mut self, text: T) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children<I: IntoIterator<Item = Node>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn attributes(&self) -> &[(&'static str, AttributeValue)] {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn find_children(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_keep_insertion_order() {
        let node = Node::test_case()
            .with_attribute(attrs::CLASSNAME, "a b")
            .with_attribute(attrs::NAME, "b")
            .with_attribute(attrs::TIME, 0.5);
        let keys: Vec<&str> = node.attributes().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["classname", "name", "time"]);
        assert_eq!(
            node.attribute(attrs::TIME),
            Some(&AttributeValue::Seconds(0.5))
        );
        assert_eq!(node.attribute(attrs::ERRORS), None);
    }

    #[test]
    fn attribute_values_render_like_js_numbers() {
        assert_eq!(AttributeValue::Seconds(2.0).to_string(), "2");
        assert_eq!(AttributeValue::Seconds(0.165).to_string(), "0.165");
        assert_eq!(AttributeValue::Seconds(-0.5).to_string(), "-0.5");
        assert_eq!(AttributeValue::Count(3).to_string(), "3");
        assert_eq!(AttributeValue::from("x").to_string(), "x");
    }

    #[test]
    fn find_children_filters_by_kind() {
        let node = Node::test_case()
            .with_child(Node::failure("one"))
            .with_child(Node::skipped())
            .with_child(Node::failure("two"));
        let failures: Vec<&str> = node
            .find_children(NodeKind::Failure)
            .filter_map(Node::text)
            .collect();
        assert_eq!(failures, vec!["one", "two"]);
        assert!(node.find_children(NodeKind::Skipped).all(Node::is_empty));
    }
}

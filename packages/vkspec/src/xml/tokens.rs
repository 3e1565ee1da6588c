//! Tag stream model of the registry document.

use roxmltree::{Document, Node, NodeId};

use crate::error::Result;

/// One attribute of a start tag, namespace prefix dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A start tag with its attributes in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    /// Local tag name (e.g., "command").
    pub name: String,
    pub attributes: Vec<Attribute>,
}

impl StartTag {
    /// Create a start tag without attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Value of the named attribute, empty if absent.
    #[must_use]
    pub fn attribute(&self, name: &str) -> &str {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map_or("", |a| a.value.as_str())
    }
}

/// One token of the registry tag stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Start(StartTag),
    End(String),
    Text(String),
}

/// A forward-only source of registry tokens.
pub trait TokenSource {
    /// Next token, or `None` once the document is exhausted.
    fn next_token(&mut self) -> Result<Option<Token>>;
}

/// Position of the next token in the document tree.
#[derive(Debug, Clone, Copy)]
enum Step {
    Enter(NodeId),
    Leave(NodeId),
}

/// Token stream of a parsed XML document.
///
/// Tokens are produced lazily by walking the tree in document order.
/// Comments and processing instructions are dropped. Self-closing elements
/// produce a start and an end token.
pub struct DocumentTokens<'input> {
    doc: Document<'input>,
    next: Option<Step>,
}

impl<'input> DocumentTokens<'input> {
    /// Parse XML text into a token stream.
    ///
    /// # Errors
    /// `VkSpecError::XmlParse` if the text is not well-formed XML.
    pub fn parse(text: &'input str) -> Result<Self> {
        let doc = Document::parse(text)?;
        let next = doc.root().first_child().map(|node| Step::Enter(node.id()));
        Ok(Self { doc, next })
    }
}

/// The step after `node` and its subtree are done.
fn step_after(node: Node<'_, '_>) -> Option<Step> {
    match node.next_sibling() {
        Some(sibling) => Some(Step::Enter(sibling.id())),
        None => node.parent().map(|parent| Step::Leave(parent.id())),
    }
}

fn start_tag(node: Node<'_, '_>) -> StartTag {
    StartTag {
        name: node.tag_name().name().to_string(),
        attributes: node
            .attributes()
            .map(|a| Attribute {
                name: a.name().to_string(),
                value: a.value().to_string(),
            })
            .collect(),
    }
}

impl TokenSource for DocumentTokens<'_> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        while let Some(step) = self.next.take() {
            match step {
                Step::Enter(id) => {
                    let Some(node) = self.doc.get_node(id) else {
                        break;
                    };
                    if node.is_element() {
                        self.next = Some(match node.first_child() {
                            Some(child) => Step::Enter(child.id()),
                            None => Step::Leave(id),
                        });
                        return Ok(Some(Token::Start(start_tag(node))));
                    }
                    self.next = step_after(node);
                    if node.is_text() {
                        if let Some(text) = node.text() {
                            return Ok(Some(Token::Text(text.to_string())));
                        }
                    }
                }
                Step::Leave(id) => {
                    let Some(node) = self.doc.get_node(id) else {
                        break;
                    };
                    self.next = step_after(node);
                    if node.is_element() {
                        return Ok(Some(Token::End(node.tag_name().name().to_string())));
                    }
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect(xml: &str) -> Vec<Token> {
        let mut source = DocumentTokens::parse(xml).unwrap();
        let mut tokens = Vec::new();
        while let Some(token) = source.next_token().unwrap() {
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn test_token_order() {
        let tokens = collect(r#"<param>const <type>char</type>* <name>pName</name></param>"#);
        assert_eq!(
            tokens,
            vec![
                Token::Start(StartTag::new("param")),
                Token::Text("const ".to_string()),
                Token::Start(StartTag::new("type")),
                Token::Text("char".to_string()),
                Token::End("type".to_string()),
                Token::Text("* ".to_string()),
                Token::Start(StartTag::new("name")),
                Token::Text("pName".to_string()),
                Token::End("name".to_string()),
                Token::End("param".to_string()),
            ]
        );
    }

    #[test]
    fn test_self_closing_and_attributes() {
        let tokens = collect(
            r#"<require><!-- note --><enum extends="VkObjectType" name="X"/></require>"#,
        );
        assert_eq!(tokens.len(), 4);
        let Token::Start(tag) = &tokens[1] else {
            panic!("expected start tag, got {:?}", tokens[1]);
        };
        assert_eq!(tag.attribute("extends"), "VkObjectType");
        assert_eq!(tag.attribute("name"), "X");
        assert_eq!(tag.attribute("missing"), "");
        assert_eq!(tokens[2], Token::End("enum".to_string()));
    }

    #[test]
    fn test_end_tags_after_nested_elements() {
        let tokens = collect("<!-- top --><a><b><c/></b>t<d/></a>");
        assert_eq!(
            tokens,
            vec![
                Token::Start(StartTag::new("a")),
                Token::Start(StartTag::new("b")),
                Token::Start(StartTag::new("c")),
                Token::End("c".to_string()),
                Token::End("b".to_string()),
                Token::Text("t".to_string()),
                Token::Start(StartTag::new("d")),
                Token::End("d".to_string()),
                Token::End("a".to_string()),
            ]
        );
    }

    #[test]
    fn test_entities_are_decoded() {
        let tokens = collect("<comment>a &amp; b</comment>");
        assert_eq!(tokens[1], Token::Text("a & b".to_string()));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(DocumentTokens::parse("<registry><types></registry>").is_err());
    }
}

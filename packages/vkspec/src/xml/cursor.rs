//! Forward-only cursor over the registry tag stream.

use super::tokens::{StartTag, Token, TokenSource};
use crate::error::{Result, VkSpecError};

/// Forward-only traversal over a [`TokenSource`].
///
/// The cursor knows nothing about the registry's semantics. Extractors
/// position it with five operations: [`next_element`](Self::next_element),
/// [`next_text`](Self::next_text), [`element_end`](Self::element_end),
/// [`attribute`](Self::attribute) and [`skip`](Self::skip).
pub struct RegistryCursor<S> {
    source: S,
    pending: Option<Token>,
}

impl<S: TokenSource> RegistryCursor<S> {
    /// Create a cursor at the start of `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            pending: None,
        }
    }

    fn advance(&mut self) -> Result<Option<Token>> {
        match self.pending.take() {
            Some(token) => Ok(Some(token)),
            None => self.source.next_token(),
        }
    }

    /// Advance to the next start tag among the current element's children.
    ///
    /// Text in between is skipped. Returns `None` once the enclosing element
    /// ends (its end tag is consumed) or the document is exhausted.
    pub fn next_element(&mut self) -> Result<Option<StartTag>> {
        loop {
            match self.advance()? {
                Some(Token::Start(tag)) => return Ok(Some(tag)),
                Some(Token::End(_)) | None => return Ok(None),
                Some(Token::Text(_)) => {}
            }
        }
    }

    /// Read the text run at the current position.
    ///
    /// Returns `None` without consuming anything if the next token is not text.
    pub fn next_text(&mut self) -> Result<Option<String>> {
        match self.advance()? {
            Some(Token::Text(text)) => Ok(Some(text)),
            other => {
                self.pending = other;
                Ok(None)
            }
        }
    }

    /// Advance past the end tag of the current element.
    ///
    /// Nested elements are skipped whole. Returns the end tag's name.
    ///
    /// # Errors
    /// `VkSpecError::UnexpectedEof` if the document ends first.
    pub fn element_end(&mut self) -> Result<String> {
        let mut depth = 0usize;
        loop {
            match self.advance()? {
                Some(Token::Start(_)) => depth += 1,
                Some(Token::End(name)) => {
                    if depth == 0 {
                        return Ok(name);
                    }
                    depth -= 1;
                }
                Some(Token::Text(_)) => {}
                None => return Err(VkSpecError::unexpected_eof("element end")),
            }
        }
    }

    /// Value of the named attribute of `tag`, empty if absent.
    #[must_use]
    pub fn attribute<'t>(&self, tag: &'t StartTag, name: &str) -> &'t str {
        tag.attribute(name)
    }

    /// Skip the rest of the element whose start tag was just returned.
    pub fn skip(&mut self) -> Result<()> {
        self.element_end().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::DocumentTokens;

    fn cursor(xml: &str) -> RegistryCursor<DocumentTokens<'_>> {
        RegistryCursor::new(DocumentTokens::parse(xml).unwrap())
    }

    #[test]
    fn test_next_element_skips_text() {
        let mut c = cursor("<a>text<b/>more<c/></a>");
        assert_eq!(c.next_element().unwrap().unwrap().name, "a");
        assert_eq!(c.next_element().unwrap().unwrap().name, "b");
        // </b> ends the child list of <b>
        assert!(c.next_element().unwrap().is_none());
        assert_eq!(c.next_element().unwrap().unwrap().name, "c");
    }

    #[test]
    fn test_next_text_pushes_back() {
        let mut c = cursor("<param><type>int</type></param>");
        c.next_element().unwrap();
        assert!(c.next_text().unwrap().is_none());
        let tag = c.next_element().unwrap().unwrap();
        assert_eq!(tag.name, "type");
        assert_eq!(c.next_text().unwrap().as_deref(), Some("int"));
    }

    #[test]
    fn test_element_end_respects_nesting() {
        let mut c = cursor("<a><b><a><b/></a></b><c/></a>");
        c.next_element().unwrap();
        c.next_element().unwrap();
        assert_eq!(c.element_end().unwrap(), "b");
        assert_eq!(c.next_element().unwrap().unwrap().name, "c");
        assert_eq!(c.element_end().unwrap(), "c");
        assert_eq!(c.element_end().unwrap(), "a");
    }

    /// Source that ends without closing its elements.
    struct Truncated(Vec<Token>);

    impl TokenSource for Truncated {
        fn next_token(&mut self) -> Result<Option<Token>> {
            Ok(self.0.pop())
        }
    }

    #[test]
    fn test_element_end_at_eof() {
        let mut c = RegistryCursor::new(Truncated(vec![
            Token::Text("body".to_string()),
            Token::Start(StartTag::new("a")),
        ]));
        c.next_element().unwrap();
        assert!(c.element_end().is_err());
    }

    #[test]
    fn test_skip_subtree() {
        let mut c = cursor("<r><x><y><z/></y></x><w/></r>");
        c.next_element().unwrap();
        c.next_element().unwrap();
        c.skip().unwrap();
        assert_eq!(c.next_element().unwrap().unwrap().name, "w");
    }

    #[test]
    fn test_attribute_absent_is_empty() {
        let c = cursor("<a/>");
        let tag = StartTag::new("command").with_attribute("alias", "vkFoo");
        assert_eq!(c.attribute(&tag, "alias"), "vkFoo");
        assert_eq!(c.attribute(&tag, "export"), "");
    }
}

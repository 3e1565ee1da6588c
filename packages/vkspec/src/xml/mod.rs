//! Registry document tokens and the cursor the extractors walk them with.
//!
//! Extractors only see [`RegistryCursor`]. The token stream behind it comes
//! from any [`TokenSource`]; [`DocumentTokens`] is the roxmltree-backed one.

mod cursor;
mod tokens;

pub use cursor::RegistryCursor;
pub use tokens::{Attribute, DocumentTokens, StartTag, Token, TokenSource};

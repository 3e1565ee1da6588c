//! Line scanner for the reference header.

use std::collections::BTreeMap;
use std::str::Lines;

use crate::alias::resolve_aliases;
use crate::config::{
    FLAGS, FLAG_BITS, MAX_ENUM_SENTINEL, STRUCTURE_TYPE_DECL, STRUCTURE_TYPE_FIELD, SUFFIX_64BIT,
};
use crate::error::Result;
use crate::types::Type;

const ENUM_PREFIX: &str = "typedef enum ";
const FLAGS64_PREFIX: &str = "typedef VkFlags64 ";
const STRUCT_PREFIX: &str = "typedef struct ";
const FEATURE_ALIAS_PREFIX: &str = "typedef VkPhysicalDevice";
const FEATURE_STRUCT_PREFIX: &str = "typedef struct VkPhysicalDevice";
const FEATURES_MARKER: &str = "Features";

/// Characters trimmed from the end of declaration lines.
const DECLARATION_TRAILER: &[char] = &[' ', ',', ';', '{', '\n'];

/// Characters trimmed from the end of value lines.
const VALUE_TRAILER: &[char] = &[' ', ',', ';', '\n'];

/// Sequential scanner over the lines of `vulkan_core.h`.
///
/// The scanner owns the state every scan routine works on: the remaining
/// lines, a single line of lookahead, the name of the type under
/// construction and the types recorded so far.
pub struct HeaderScanner<'a> {
    lines: Lines<'a>,
    pending: Option<&'a str>,
    pub(super) current: String,
    pub(super) types: BTreeMap<String, Type>,
}

impl<'a> HeaderScanner<'a> {
    /// Create a scanner over the full header text.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            pending: None,
            current: String::new(),
            types: BTreeMap::new(),
        }
    }

    /// Scan the whole header and return its types with aliases resolved.
    ///
    /// # Errors
    /// Malformed feature structures and alias cycles abort the scan.
    pub fn scan(mut self) -> Result<BTreeMap<String, Type>> {
        while let Some(raw) = self.next_line() {
            let line = raw.trim_end_matches(DECLARATION_TRAILER).trim();

            if let Some(name) = line.strip_prefix(ENUM_PREFIX) {
                self.begin(name.replace(FLAG_BITS, FLAGS));
                self.scan_enum();
                continue;
            }

            if let Some(bits) = line.strip_prefix(FLAGS64_PREFIX) {
                if bits.contains(FLAG_BITS) {
                    self.begin(bits.replace(FLAG_BITS, FLAGS));
                    self.scan_flags(bits);
                    continue;
                }
            }

            if line.contains(FEATURES_MARKER) {
                if line.starts_with(FEATURE_ALIAS_PREFIX) {
                    self.register_feature_alias(line)?;
                    continue;
                }
                if line.starts_with(FEATURE_STRUCT_PREFIX) {
                    self.begin_feature_struct(line)?;
                    self.scan_feature_struct()?;
                    continue;
                }
            }

            if let Some(name) = line.strip_prefix(STRUCT_PREFIX) {
                self.begin(name.to_string());
                self.scan_struct();
            }
        }

        resolve_aliases(&mut self.types)?;
        Ok(self.types)
    }

    pub(super) fn next_line(&mut self) -> Option<&'a str> {
        self.pending.take().or_else(|| self.lines.next())
    }

    /// Start a new type and make it the one under construction.
    pub(super) fn begin(&mut self, name: String) {
        self.types.insert(name.clone(), Type::new(name.clone()));
        self.current = name;
    }

    pub(super) fn push_declaration(&mut self, line: impl Into<String>) {
        if let Some(t) = self.types.get_mut(&self.current) {
            t.declaration.push(line.into());
        }
    }

    /// Consume lines up to and including the closing brace.
    pub(super) fn skip_body(&mut self) {
        while let Some(raw) = self.next_line() {
            if raw.contains('}') {
                return;
            }
        }
    }

    /// Copy enumerator assignments until the forced-width maximum.
    fn scan_enum(&mut self) {
        while let Some(raw) = self.next_line() {
            let line = trim_value_line(raw);
            if line.contains('=') {
                self.push_declaration(strip_wide_suffix(line));
            }
            if line.contains(MAX_ENUM_SENTINEL) {
                return;
            }
        }
    }

    /// Copy `static const` flag values while lines keep naming `bits`.
    ///
    /// The first unrelated line ends the scan and is left for the main loop.
    fn scan_flags(&mut self, bits: &str) {
        while let Some(raw) = self.next_line() {
            let line = trim_value_line(raw);
            if line.contains('#') || line.contains("//") {
                continue;
            }
            if !line.contains(bits) {
                self.pending = Some(raw);
                return;
            }
            if line.contains('=') {
                self.push_declaration(strip_wide_suffix(line));
            }
        }
    }

    /// Copy structure members, dropping structures without a type tag.
    fn scan_struct(&mut self) {
        let first = self.next_line().unwrap_or_default();
        if !first.trim().starts_with(STRUCTURE_TYPE_FIELD) {
            tracing::debug!(type_name = %self.current, "Discarding structure without a type tag");
            if !first.contains('}') {
                self.skip_body();
            }
            self.types.remove(&self.current);
            return;
        }
        self.push_declaration(STRUCTURE_TYPE_DECL);

        while let Some(raw) = self.next_line() {
            let member = trim_member(raw);
            if member.contains('}') {
                return;
            }
            self.push_declaration(member);
        }
    }
}

/// Trim an enumerator or flag value line.
fn trim_value_line(raw: &str) -> &str {
    raw.trim_end_matches(VALUE_TRAILER).trim()
}

/// Trim a structure member line.
pub(super) fn trim_member(raw: &str) -> &str {
    let member = raw.trim();
    member.strip_suffix(';').unwrap_or(member)
}

/// Drop the 64-bit literal suffix from a value starting with `0`.
///
/// Values like `0x00000001ULL` or `0ULL` lose their suffix. Values that do
/// not start with `0` are kept as written.
fn strip_wide_suffix(line: &str) -> String {
    match line.split_once(" = ") {
        Some((_, value)) if value.starts_with('0') => {
            line.strip_suffix(SUFFIX_64BIT).unwrap_or(line).to_string()
        }
        _ => line.to_string(),
    }
}

//! Translation state: naming paths and the per-namespace session.

use crate::decl::enumeration::StringEnum;
use crate::ident::to_upper_camel;

/// Names of the enclosing declarations, outermost first.
///
/// Used to name helper enumerations synthesized for anonymous
/// string-literal unions. Pushing returns a new path and leaves the
/// original untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingPath {
    segments: Vec<String>,
}

impl NamingPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Identifier for a declaration at this path: every segment in
    /// `UpperCamelCase`, concatenated.
    pub fn build_ident(&self) -> String {
        self.segments.iter().map(|s| to_upper_camel(s)).collect()
    }
}

/// Helper enumerations in registration order, unique by identifier.
#[derive(Debug, Default)]
pub struct HelperRegistry {
    helpers: Vec<StringEnum>,
}

impl HelperRegistry {
    pub fn get(&self, ident: &str) -> Option<&StringEnum> {
        self.helpers.iter().find(|h| h.ident == ident)
    }

    /// Add `helper` unless one with the same identifier exists.
    ///
    /// Returns whether it was added.
    pub fn register(&mut self, helper: StringEnum) -> bool {
        if let Some(existing) = self.get(&helper.ident) {
            if existing.variants != helper.variants {
                tracing::warn!(
                    ident = %helper.ident,
                    "helper enum already registered with different variants; keeping the first"
                );
            }
            return false;
        }
        tracing::debug!(
            ident = %helper.ident,
            variants = helper.variants.len(),
            "registered helper enum"
        );
        self.helpers.push(helper);
        true
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    pub fn into_helpers(self) -> Vec<StringEnum> {
        self.helpers
    }
}

/// State threaded through the translation of one namespace.
pub struct Session<'a> {
    helpers: HelperRegistry,
    is_copy_type: Box<dyn Fn(&str) -> bool + 'a>,
}

impl<'a> Session<'a> {
    /// A session passing identifiers matching `is_copy_type` by value.
    pub fn new(is_copy_type: impl Fn(&str) -> bool + 'a) -> Self {
        Self {
            helpers: HelperRegistry::default(),
            is_copy_type: Box::new(is_copy_type),
        }
    }

    pub fn is_copy_type(&self, ident: &str) -> bool {
        (self.is_copy_type)(ident)
    }

    pub fn helpers(&self) -> &HelperRegistry {
        &self.helpers
    }

    pub fn helpers_mut(&mut self) -> &mut HelperRegistry {
        &mut self.helpers
    }

    pub fn into_helpers(self) -> Vec<StringEnum> {
        self.helpers.into_helpers()
    }
}

impl Default for Session<'_> {
    fn default() -> Self {
        Self::new(|_| false)
    }
}

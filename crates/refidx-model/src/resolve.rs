//! Resolution of serialized text into references.
//!
//! [`resolve_str`] is the inverse of [`serialize`](crate::serialize). Text may be partial:
//! missing leading segments are taken from a parent reference when one is given, and from
//! the configured [`EntityDefaults`] otherwise.

use std::mem;

use crate::{
    EntityKind, EntityReference, ReferenceError,
    serialize::{ESCAPE, SEPARATORS},
};

/// Names used when a reference leaves a wiki, space or document segment unspecified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDefaults {
    /// Default wiki name.
    pub wiki: String,
    /// Default (top-level) space name.
    pub space: String,
    /// Default document name; a document with this name is its space's home page.
    pub document: String,
}

impl Default for EntityDefaults {
    fn default() -> Self {
        Self {
            wiki: String::from("xwiki"),
            space: String::from("Main"),
            document: String::from("WebHome"),
        }
    }
}

impl EntityDefaults {
    /// Returns the default segment name for `kind`, if that kind has one.
    pub fn default_name(&self, kind: EntityKind) -> Option<&str> {
        match kind {
            EntityKind::Wiki => Some(&self.wiki),
            EntityKind::Space => Some(&self.space),
            EntityKind::Document => Some(&self.document),
            EntityKind::Attachment | EntityKind::Object | EntityKind::ObjectProperty => None,
        }
    }
}

/// Resolves serialized `text` into a reference of `kind`.
///
/// Space paths without a wiki prefix are resolved relative to the wiki of `parent` (or the
/// default wiki), never relative to a parent space. Empty text resolves to the default
/// segment of `kind` under `parent`, e.g. the default document of the parent's space.
pub fn resolve_str(
    text: &str,
    kind: EntityKind,
    parent: Option<&EntityReference>,
    defaults: &EntityDefaults,
) -> Result<EntityReference, ReferenceError> {
    let parsed = if text.is_empty() {
        Parsed::default()
    } else {
        Parsed::parse(text)?
    };

    let wiki = match &parsed.wiki {
        Some(name) => EntityReference::wiki(name.as_str())?,
        None => match parent.and_then(|p| p.extract(EntityKind::Wiki)) {
            Some(wiki) => wiki.clone(),
            None => EntityReference::wiki(defaults.wiki.as_str())?,
        },
    };

    let resolution = Resolution {
        text,
        parsed,
        wiki,
        parent,
        defaults,
    };

    match kind {
        EntityKind::Wiki => resolution.wiki(),
        EntityKind::Space => resolution.space(),
        EntityKind::Document => resolution.document(),
        EntityKind::Attachment => resolution.attachment(),
        EntityKind::Object => resolution.object(),
        EntityKind::ObjectProperty => resolution.object_property(),
    }
}

/// One unescaped segment name and the separator that preceded it.
struct Segment {
    /// Separator before this segment, `None` for the first one.
    separator: Option<char>,
    /// Unescaped name.
    name: String,
}

/// Serialized text split by role.
#[derive(Default)]
struct Parsed {
    /// Explicit `wiki:` prefix.
    wiki: Option<String>,
    /// Dot-separated space and document names.
    names: Vec<String>,
    /// Name after `@`.
    attachment: Option<String>,
    /// Name after `^`.
    object: Option<String>,
    /// Name after the `.` that follows an object.
    property: Option<String>,
}

impl Parsed {
    /// Splits `text` into its wiki, path, and trailing attachment or object parts.
    fn parse(text: &str) -> Result<Self, ReferenceError> {
        let segments = split(text)?;
        let mut parsed = Self::default();
        let mut rest = segments.as_slice();

        if rest.len() > 1 && rest[1].separator == Some(':') {
            parsed.wiki = Some(rest[0].name.clone());
            rest = &rest[1..];
        }

        for (index, segment) in rest.iter().enumerate() {
            let separator = if index == 0 { None } else { segment.separator };
            let name = segment.name.clone();
            let in_path = parsed.attachment.is_none() && parsed.object.is_none();

            match separator {
                None | Some('.') if in_path => parsed.names.push(name),
                Some('.') if parsed.object.is_some() && parsed.property.is_none() => {
                    parsed.property = Some(name);
                }
                Some('@') if in_path => parsed.attachment = Some(name),
                Some('^') if in_path => parsed.object = Some(name),
                Some(sep) => {
                    return Err(ReferenceError::syntax(text, format!("unexpected '{sep}'")));
                }
                None => return Err(ReferenceError::syntax(text, "unexpected segment")),
            }
        }

        Ok(parsed)
    }

    /// Returns true if an attachment, object or property part is present.
    fn has_tail(&self) -> bool {
        self.attachment.is_some() || self.object.is_some() || self.property.is_some()
    }
}

/// Splits text on unescaped separators, removing escapes.
fn split(text: &str) -> Result<Vec<Segment>, ReferenceError> {
    let mut segments = Vec::new();
    let mut separator = None;
    let mut name = String::new();
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch == ESCAPE {
            let escaped = chars
                .next()
                .ok_or_else(|| ReferenceError::syntax(text, "dangling escape"))?;
            name.push(escaped);
        } else if SEPARATORS.contains(&ch) {
            segments.push(Segment {
                separator,
                name: mem::take(&mut name),
            });
            separator = Some(ch);
        } else {
            name.push(ch);
        }
    }

    segments.push(Segment { separator, name });
    Ok(segments)
}

/// State for resolving one piece of text.
struct Resolution<'a> {
    /// Original text, for error messages.
    text: &'a str,
    /// Parsed text.
    parsed: Parsed,
    /// Wiki the result lives in.
    wiki: EntityReference,
    /// Reference supplying missing segments.
    parent: Option<&'a EntityReference>,
    /// Defaults for segments neither the text nor the parent supply.
    defaults: &'a EntityDefaults,
}

impl Resolution<'_> {
    /// Resolves a wiki reference.
    fn wiki(self) -> Result<EntityReference, ReferenceError> {
        if self.parsed.has_tail() || self.parsed.names.len() > 1 || self.parsed.wiki.is_some() {
            return Err(self.error("expected a single wiki name"));
        }
        match self.parsed.names.first() {
            Some(name) => EntityReference::wiki(name.as_str()),
            None => Ok(self.wiki),
        }
    }

    /// Resolves a space reference.
    fn space(&self) -> Result<EntityReference, ReferenceError> {
        if self.parsed.has_tail() {
            return Err(self.error("space reference cannot name an attachment or object"));
        }
        if self.parsed.names.is_empty() {
            return self.fallback_space();
        }
        self.space_chain(&self.parsed.names)
    }

    /// Resolves a document reference.
    fn document(&self) -> Result<EntityReference, ReferenceError> {
        if self.parsed.has_tail() {
            return Err(self.error("document reference cannot name an attachment or object"));
        }
        self.path_document()
    }

    /// Resolves an attachment reference.
    fn attachment(&self) -> Result<EntityReference, ReferenceError> {
        if self.parsed.object.is_some() || self.parsed.property.is_some() {
            return Err(self.error("attachment reference cannot name an object"));
        }
        match &self.parsed.attachment {
            Some(name) => EntityReference::attachment(name.as_str(), &self.path_document()?),
            None => {
                let name = self.bare_name()?;
                let document = self.parent_of(EntityKind::Attachment, EntityKind::Document)?;
                EntityReference::attachment(name, document)
            }
        }
    }

    /// Resolves an object reference.
    fn object(&self) -> Result<EntityReference, ReferenceError> {
        if self.parsed.attachment.is_some() || self.parsed.property.is_some() {
            return Err(self.error("object reference cannot name an attachment or property"));
        }
        match &self.parsed.object {
            Some(name) => EntityReference::object(name.as_str(), &self.path_document()?),
            None => {
                let name = self.bare_name()?;
                let document = self.parent_of(EntityKind::Object, EntityKind::Document)?;
                EntityReference::object(name, document)
            }
        }
    }

    /// Resolves an object property reference.
    fn object_property(&self) -> Result<EntityReference, ReferenceError> {
        if self.parsed.attachment.is_some() {
            return Err(self.error("property reference cannot name an attachment"));
        }
        match (&self.parsed.object, &self.parsed.property) {
            (Some(object), Some(property)) => {
                let object = EntityReference::object(object.as_str(), &self.path_document()?)?;
                EntityReference::object_property(property.as_str(), &object)
            }
            (None, None) => {
                let name = self.bare_name()?;
                let object = self.parent_of(EntityKind::ObjectProperty, EntityKind::Object)?;
                EntityReference::object_property(name, object)
            }
            _ => Err(self.error("expected an object followed by a property name")),
        }
    }

    /// Builds the document named by the dotted path.
    fn path_document(&self) -> Result<EntityReference, ReferenceError> {
        let names = &self.parsed.names;
        match names.split_last() {
            None => EntityReference::document(
                self.defaults.document.as_str(),
                &self.fallback_space()?,
            ),
            Some((name, [])) => EntityReference::document(name.as_str(), &self.fallback_space()?),
            Some((name, spaces)) => {
                EntityReference::document(name.as_str(), &self.space_chain(spaces)?)
            }
        }
    }

    /// Builds nested spaces under the wiki.
    fn space_chain(&self, names: &[String]) -> Result<EntityReference, ReferenceError> {
        names.iter().try_fold(self.wiki.clone(), |parent, name| {
            EntityReference::space(name.as_str(), &parent)
        })
    }

    /// Returns the parent's space, or the default space when the text names its own wiki.
    fn fallback_space(&self) -> Result<EntityReference, ReferenceError> {
        let parent_space = self
            .parent
            .filter(|_| self.parsed.wiki.is_none())
            .and_then(|p| p.extract(EntityKind::Space));
        match parent_space {
            Some(space) => Ok(space.clone()),
            None => EntityReference::space(self.defaults.space.as_str(), &self.wiki),
        }
    }

    /// Returns the unqualified name of a relative reference.
    ///
    /// Dots are kept, so `logo.png` names one attachment rather than a path.
    fn bare_name(&self) -> Result<String, ReferenceError> {
        if self.parsed.wiki.is_some() || self.parsed.names.is_empty() {
            return Err(self.error("expected a name relative to the parent"));
        }
        Ok(self.parsed.names.join("."))
    }

    /// Returns the `needed` segment of the parent reference.
    fn parent_of(
        &self,
        kind: EntityKind,
        needed: EntityKind,
    ) -> Result<&EntityReference, ReferenceError> {
        self.parent
            .and_then(|p| p.extract(needed))
            .ok_or(ReferenceError::MissingParent { kind })
    }

    /// Creates a syntax error for the text being resolved.
    fn error(&self, message: &str) -> ReferenceError {
        ReferenceError::syntax(self.text, message)
    }
}

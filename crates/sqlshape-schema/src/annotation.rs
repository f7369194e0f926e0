//! Comment directives.
//!
//! Schema authors steer type inference by writing directives into column
//! comments:
//!
//! | directive | effect |
//! |---|---|
//! | `@bigint` | read a `bigint` column as an exact integer |
//! | `@json(Type)` | type expression for a `json` column |
//! | `@set` / `@set(Type)` | read a `set` column as a member set |
//! | `@enum(Type)` | type expression for an `enum` column |
//!
//! A directive starts at the beginning of the comment or after whitespace.
//! Kinds match case-insensitively; arguments run to the first `)`.
//! Parsing never fails: unknown kinds and unterminated arguments are
//! skipped, and for a repeated kind the first occurrence wins.

/// Directive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    BigInt,
    Json,
    Set,
    Enum,
}

impl AnnotationKind {
    fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "bigint" => Some(AnnotationKind::BigInt),
            "json" => Some(AnnotationKind::Json),
            "set" => Some(AnnotationKind::Set),
            "enum" => Some(AnnotationKind::Enum),
            _ => None,
        }
    }

    /// `@json` and `@enum` only mean something with a type argument.
    const fn requires_argument(self) -> bool {
        matches!(self, AnnotationKind::Json | AnnotationKind::Enum)
    }
}

/// One parsed directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub kind: AnnotationKind,
    /// Trimmed, non-empty argument text.
    pub argument: Option<String>,
}

/// The effective directives of one comment, at most one per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    items: Vec<Annotation>,
}

impl Annotations {
    /// Parse a column comment.
    pub fn parse(comment: &str) -> Self {
        let mut items: Vec<Annotation> = Vec::new();
        for annotation in Tokenizer::new(comment) {
            if items.iter().any(|a| a.kind == annotation.kind) {
                continue;
            }
            items.push(annotation);
        }
        Self { items }
    }

    pub fn get(&self, kind: AnnotationKind) -> Option<&Annotation> {
        self.items.iter().find(|a| a.kind == kind)
    }

    pub fn has(&self, kind: AnnotationKind) -> bool {
        self.get(kind).is_some()
    }

    /// Argument of the directive of `kind`, if present.
    pub fn argument(&self, kind: AnnotationKind) -> Option<&str> {
        self.get(kind).and_then(|a| a.argument.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Scans a comment for well-formed directives.
struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn at_boundary(&self, at: usize) -> bool {
        self.text[..at]
            .chars()
            .next_back()
            .is_none_or(char::is_whitespace)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Annotation;

    fn next(&mut self) -> Option<Annotation> {
        while let Some(offset) = self.text[self.pos..].find('@') {
            let at = self.pos + offset;
            let word_start = at + 1;
            let word_len = self.text[word_start..]
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(self.text.len() - word_start);
            let word_end = word_start + word_len;
            self.pos = word_end.max(word_start);

            if !self.at_boundary(at) {
                continue;
            }
            let Some(kind) = AnnotationKind::from_word(&self.text[word_start..word_end]) else {
                continue;
            };

            let mut argument = None;
            if self.text[word_end..].starts_with('(') {
                let arg_start = word_end + 1;
                // Unterminated: ignore this directive, keep scanning after its name.
                let Some(close) = self.text[arg_start..].find(')') else {
                    continue;
                };
                let arg = self.text[arg_start..arg_start + close].trim();
                if !arg.is_empty() {
                    argument = Some(arg.to_string());
                }
                self.pos = arg_start + close + 1;
            }

            if kind.requires_argument() && argument.is_none() {
                continue;
            }
            return Some(Annotation { kind, argument });
        }
        self.pos = self.text.len();
        None
    }
}

//! Column type resolution.
//!
//! Maps one [`ColumnMetadata`] plus its comment directives and a
//! [`TypeConfig`] to a [`FieldDescriptor`]. Resolution is a pure function:
//! the same inputs always produce the same descriptor.

use std::sync::OnceLock;

use regex::Regex;
use sqlshape_core::{CastKind, FieldDescriptor, Result, SchemaError};

use crate::annotation::{AnnotationKind, Annotations};
use crate::column::{ColumnDefault, ColumnMetadata, KeyKind};
use crate::config::TypeConfig;
use crate::naming;

/// Base type names recognized in declared types.
const TYPE_VOCABULARY: &[&str] = &[
    "tinyint",
    "smallint",
    "mediumint",
    "int",
    "integer",
    "bigint",
    "year",
    "float",
    "double",
    "real",
    "decimal",
    "numeric",
    "date",
    "datetime",
    "timestamp",
    "time",
    "json",
    "set",
    "enum",
    "char",
    "varchar",
    "binary",
    "varbinary",
    "tinytext",
    "text",
    "mediumtext",
    "longtext",
    "tinyblob",
    "blob",
    "mediumblob",
    "longblob",
    "bit",
    "geometry",
    "point",
];

const INTEGER_FAMILY: &[&str] = &["tinyint", "smallint", "mediumint", "int", "integer", "year"];
const FLOAT_FAMILY: &[&str] = &["float", "double", "real", "decimal", "numeric"];
const DATE_FAMILY: &[&str] = &["date", "datetime", "timestamp"];

/// Matches a declared type: the longest vocabulary word at the start,
/// then an optional parenthesized definition up to the last `)`.
fn declared_type_regex() -> Result<&'static Regex> {
    static PATTERN: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    let compiled = PATTERN.get_or_init(|| {
        let mut words: Vec<&str> = TYPE_VOCABULARY.to_vec();
        // Alternation is leftmost-first, so longer words must come first.
        words.sort_by_key(|w| std::cmp::Reverse(w.len()));
        Regex::new(&format!(
            r"(?is)^\s*({})\b(?:\s*\((.*)\))?",
            words.join("|")
        ))
    });
    compiled
        .as_ref()
        .map_err(|e| SchemaError::new(format!("Declared type pattern failed to compile: {}", e)).into())
}

/// A declared column type split into its base token and definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    /// Lowercase vocabulary word, e.g. `tinyint`.
    pub base: String,
    /// Text inside the parentheses, e.g. `1` or `'a','b'`.
    pub definition: Option<String>,
}

impl DeclaredType {
    /// Tokenize `declared`. Returns `None` for types outside the vocabulary.
    pub fn parse(declared: &str) -> Result<Option<Self>> {
        let regex = declared_type_regex()?;
        Ok(regex.captures(declared).map(|caps| DeclaredType {
            base: caps[1].to_ascii_lowercase(),
            definition: caps.get(2).map(|m| m.as_str().trim().to_string()),
        }))
    }

    fn is(&self, base: &str) -> bool {
        self.base == base
    }

    fn is_any(&self, family: &[&str]) -> bool {
        family.contains(&self.base.as_str())
    }
}

/// Decode the quoted literals of an `enum(...)`/`set(...)` definition.
///
/// `''` inside a literal is an escaped quote and `\x` an escaped `x`.
/// Text between literals (commas, whitespace) is skipped.
pub fn parse_literals(definition: &str) -> Vec<String> {
    let mut literals = Vec::new();
    let mut chars = definition.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\'' {
            continue;
        }
        let mut literal = String::new();
        while let Some(c) = chars.next() {
            match c {
                '\'' if chars.peek() == Some(&'\'') => {
                    chars.next();
                    literal.push('\'');
                }
                '\'' => break,
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        literal.push(escaped);
                    }
                }
                other => literal.push(other),
            }
        }
        literals.push(literal);
    }
    literals
}

/// Quote a literal for a type expression: `it's` → `'it\'s'`.
fn quote_literal(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len() + 2);
    out.push('\'');
    for c in literal.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// `'a'|'b'` for a definition with literals, `None` otherwise.
fn literal_union(definition: Option<&str>) -> Option<String> {
    let literals = parse_literals(definition?);
    if literals.is_empty() {
        return None;
    }
    Some(
        literals
            .iter()
            .map(|l| quote_literal(l))
            .collect::<Vec<_>>()
            .join("|"),
    )
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

/// Resolves columns against one configuration.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    config: &'a TypeConfig,
}

impl<'a> TypeResolver<'a> {
    pub fn new(config: &'a TypeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TypeConfig {
        self.config
    }

    /// Cast kind and semantic type of a column. First matching rule wins.
    fn classify(
        &self,
        declared: Option<&DeclaredType>,
        annotations: &Annotations,
    ) -> (CastKind, String) {
        let Some(ty) = declared else {
            return (CastKind::String, "string".to_string());
        };
        let definition = ty.definition.as_deref();

        if ty.is("json") {
            let semantic = annotations
                .argument(AnnotationKind::Json)
                .map_or_else(|| self.config.default_json_type.clone(), str::to_string);
            return (CastKind::Json, semantic);
        }
        if ty.is("bigint") {
            return if !self.config.type_bigint_as_string || annotations.has(AnnotationKind::BigInt)
            {
                (CastKind::BigInt, "bigint".to_string())
            } else {
                (CastKind::String, "string".to_string())
            };
        }
        if ty.is("tinyint") && definition == Some("1") && self.config.type_tinyint_one_as_boolean {
            return (CastKind::Boolean, "boolean".to_string());
        }
        if ty.is_any(INTEGER_FAMILY) {
            return (CastKind::Int, "number".to_string());
        }
        if ty.is_any(FLOAT_FAMILY) {
            return (CastKind::Float, "number".to_string());
        }
        if ty.is_any(DATE_FAMILY) {
            return (CastKind::Date, "Date".to_string());
        }
        if ty.is("set") {
            if !annotations.has(AnnotationKind::Set) {
                return (CastKind::String, "string".to_string());
            }
            let element = annotations
                .argument(AnnotationKind::Set)
                .map(str::to_string)
                .or_else(|| literal_union(definition))
                .unwrap_or_else(|| "string".to_string());
            return (CastKind::Set, format!("Set<{}>", element));
        }
        if ty.is("enum") {
            let semantic = annotations
                .argument(AnnotationKind::Enum)
                .map(str::to_string)
                .or_else(|| literal_union(definition))
                .unwrap_or_else(|| "string".to_string());
            return (CastKind::String, semantic);
        }
        (CastKind::String, "string".to_string())
    }

    /// Resolve one column.
    pub fn resolve(&self, column: &ColumnMetadata) -> Result<FieldDescriptor> {
        let declared = DeclaredType::parse(&column.declared_type)?;
        let annotations = Annotations::parse(&column.comment);
        let (cast_kind, semantic_type) = self.classify(declared.as_ref(), &annotations);

        let has_default = match &column.default {
            ColumnDefault::Text(_) => true,
            ColumnDefault::Null => column.nullable,
            ColumnDefault::Absent => false,
        };
        let extra = column.extra.as_str();

        tracing::debug!(
            column = %column.name,
            declared_type = %column.declared_type,
            cast_kind = cast_kind.as_str(),
            semantic_type = %semantic_type,
            "Resolved column type"
        );

        Ok(FieldDescriptor::new(
            naming::field_name(&column.name),
            column.name.clone(),
            cast_kind,
            semantic_type,
        )
        .primary_key(column.key_kind == KeyKind::Primary)
        .unique(column.key_kind == KeyKind::Unique)
        .auto_increment(contains_ignore_case(extra, "auto_increment"))
        .generated_always(
            contains_ignore_case(extra, "VIRTUAL GENERATED")
                || contains_ignore_case(extra, "STORED GENERATED"),
        )
        .invisible(contains_ignore_case(extra, "INVISIBLE"))
        .nullable(column.nullable)
        .has_default(has_default))
    }
}

/// Resolve one column with `config`.
pub fn resolve(column: &ColumnMetadata, config: &TypeConfig) -> Result<FieldDescriptor> {
    TypeResolver::new(config).resolve(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(declared: &str, comment: &str, config: &TypeConfig) -> (CastKind, String) {
        let col = ColumnMetadata::new("c", declared).comment(comment);
        let f = resolve(&col, config).unwrap();
        (f.cast_kind, f.semantic_type)
    }

    fn default_kind(declared: &str, comment: &str) -> (CastKind, String) {
        kind_of(declared, comment, &TypeConfig::default())
    }

    #[test]
    fn test_declared_type_longest_match() {
        let ty = DeclaredType::parse("tinyint(1) unsigned").unwrap().unwrap();
        assert_eq!(ty.base, "tinyint");
        assert_eq!(ty.definition.as_deref(), Some("1"));

        assert_eq!(DeclaredType::parse("DATETIME(3)").unwrap().unwrap().base, "datetime");
        assert_eq!(DeclaredType::parse("integer").unwrap().unwrap().base, "integer");
        assert_eq!(DeclaredType::parse("mediumtext").unwrap().unwrap().base, "mediumtext");
        assert_eq!(DeclaredType::parse("uuid").unwrap(), None);
        assert_eq!(DeclaredType::parse("interval").unwrap(), None);
    }

    #[test]
    fn test_resolve_is_pure() {
        let col = ColumnMetadata::new("tags", "set('a','b')").comment("@set");
        let config = TypeConfig::default();
        assert_eq!(resolve(&col, &config).unwrap(), resolve(&col, &config).unwrap());
    }

    #[test]
    fn test_tinyint_one_is_boolean() {
        assert_eq!(default_kind("tinyint(1)", ""), (CastKind::Boolean, "boolean".into()));
        assert_eq!(default_kind("tinyint(2)", ""), (CastKind::Int, "number".into()));
        assert_eq!(default_kind("tinyint", ""), (CastKind::Int, "number".into()));

        let config = TypeConfig::new().tinyint_one_as_boolean(false);
        assert_eq!(kind_of("tinyint(1)", "", &config), (CastKind::Int, "number".into()));
    }

    #[test]
    fn test_bigint_as_string_unless_annotated() {
        assert_eq!(default_kind("bigint unsigned", ""), (CastKind::String, "string".into()));
        assert_eq!(
            default_kind("bigint unsigned", "@bigint"),
            (CastKind::BigInt, "bigint".into())
        );

        let config = TypeConfig::new().bigint_as_string(false);
        assert_eq!(kind_of("bigint(20)", "", &config), (CastKind::BigInt, "bigint".into()));
    }

    #[test]
    fn test_json_semantic_type() {
        assert_eq!(default_kind("json", "@json(Foo)"), (CastKind::Json, "Foo".into()));
        assert_eq!(default_kind("json", ""), (CastKind::Json, "unknown".into()));
        assert_eq!(default_kind("json", "@json()"), (CastKind::Json, "unknown".into()));

        let config = TypeConfig::new().default_json_type("JsonValue");
        assert_eq!(kind_of("json", "", &config), (CastKind::Json, "JsonValue".into()));
    }

    #[test]
    fn test_set_requires_directive() {
        assert_eq!(default_kind("set('a','b')", ""), (CastKind::String, "string".into()));
        assert_eq!(
            default_kind("set('a','b')", "@set"),
            (CastKind::Set, "Set<'a'|'b'>".into())
        );
        assert_eq!(
            default_kind("set('a','b')", "@set(Flag)"),
            (CastKind::Set, "Set<Flag>".into())
        );
        assert_eq!(default_kind("set()", "@set"), (CastKind::Set, "Set<string>".into()));
    }

    #[test]
    fn test_enum_is_literal_union() {
        assert_eq!(
            default_kind("enum('draft','live')", ""),
            (CastKind::String, "'draft'|'live'".into())
        );
        assert_eq!(
            default_kind("enum('draft','live')", "@enum(Status)"),
            (CastKind::String, "Status".into())
        );
        assert_eq!(
            default_kind("enum('it''s','a\\\\b')", ""),
            (CastKind::String, r"'it\'s'|'a\\b'".into())
        );
    }

    #[test]
    fn test_families() {
        assert_eq!(default_kind("int unsigned", "").0, CastKind::Int);
        assert_eq!(default_kind("year", "").0, CastKind::Int);
        assert_eq!(default_kind("decimal(10,2)", ""), (CastKind::Float, "number".into()));
        assert_eq!(default_kind("double", "").0, CastKind::Float);
        assert_eq!(default_kind("timestamp", ""), (CastKind::Date, "Date".into()));
        assert_eq!(default_kind("date", "").0, CastKind::Date);
        assert_eq!(default_kind("time", "").0, CastKind::String);
        assert_eq!(default_kind("varchar(255)", "").0, CastKind::String);
        assert_eq!(default_kind("geometry", "").0, CastKind::String);
        assert_eq!(default_kind("point", "@bigint").0, CastKind::String);
    }

    #[test]
    fn test_unrecognized_type_is_string() {
        assert_eq!(default_kind("uuid", "@json(Foo)"), (CastKind::String, "string".into()));
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(parse_literals("'a','b c'"), vec!["a", "b c"]);
        assert_eq!(parse_literals("'it''s', 'x)y'"), vec!["it's", "x)y"]);
        assert!(parse_literals("").is_empty());
    }

    #[test]
    fn test_flags() {
        let col = ColumnMetadata::new("user_id", "int unsigned")
            .primary_key()
            .extra("AUTO_INCREMENT");
        let f = resolve(&col, &TypeConfig::default()).unwrap();
        assert_eq!(f.field_name, "userId");
        assert_eq!(f.column_name, "user_id");
        assert!(f.is_primary_key);
        assert!(f.is_auto_increment);
        assert!(!f.is_unique);
        assert!(!f.has_default);

        let col = ColumnMetadata::new("slug", "varchar(64)")
            .key(KeyKind::Unique)
            .extra("STORED GENERATED");
        let f = resolve(&col, &TypeConfig::default()).unwrap();
        assert!(f.is_unique);
        assert!(f.is_generated_always);

        let col = ColumnMetadata::new("updated_at", "timestamp")
            .with_default("CURRENT_TIMESTAMP")
            .extra("DEFAULT_GENERATED on update CURRENT_TIMESTAMP");
        let f = resolve(&col, &TypeConfig::default()).unwrap();
        assert!(f.has_default);
        assert!(!f.is_generated_always);

        let col = ColumnMetadata::new("secret", "text").extra("INVISIBLE");
        assert!(resolve(&col, &TypeConfig::default()).unwrap().is_invisible);
    }

    #[test]
    fn test_null_default_counts_only_when_nullable() {
        let col = ColumnMetadata::new("bio", "text").nullable().with_null_default();
        assert!(resolve(&col, &TypeConfig::default()).unwrap().has_default);

        let col = ColumnMetadata::new("bio", "text").with_null_default();
        assert!(!resolve(&col, &TypeConfig::default()).unwrap().has_default);
    }
}

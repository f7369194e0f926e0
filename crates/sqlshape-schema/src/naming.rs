//! Identifier casing for generated names.

use convert_case::{Case, Casing};

/// Recase `raw`, keeping it unchanged when casing would erase it
/// (a name made only of separators).
fn recase(raw: &str, case: Case) -> String {
    let cased = raw.to_case(case);
    if cased.is_empty() {
        raw.to_string()
    } else {
        cased
    }
}

/// Field name for a column: `created_at` → `createdAt`.
pub fn field_name(column: &str) -> String {
    recase(column, Case::Camel)
}

/// Row model name for a table: `blog_posts` → `BlogPosts`.
pub fn model_name(table: &str) -> String {
    recase(table, Case::Pascal)
}

/// Per-table accessor name: `blog_posts` → `blogPosts`.
pub fn accessor_name(table: &str) -> String {
    recase(table, Case::Camel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name() {
        assert_eq!(field_name("created_at"), "createdAt");
        assert_eq!(field_name("id"), "id");
        assert_eq!(field_name("already_camelCase"), "alreadyCamelCase");
    }

    #[test]
    fn test_model_and_accessor() {
        assert_eq!(model_name("blog_posts"), "BlogPosts");
        assert_eq!(accessor_name("blog_posts"), "blogPosts");
        assert_eq!(model_name("user"), "User");
    }

    #[test]
    fn test_separator_only_name_is_kept() {
        assert_eq!(field_name("__"), "__");
    }
}

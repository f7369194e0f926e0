//! Identifier quoting.
//!
//! Table and column names are never bound as parameters, so quoting is the
//! only thing standing between a schema name and the SQL text.

/// Quote an identifier with MySQL backticks, doubling embedded backticks.
///
/// ```
/// use sqlshape_core::quote_ident_mysql;
///
/// assert_eq!(quote_ident_mysql("users"), "`users`");
/// assert_eq!(quote_ident_mysql("we`ird"), "`we``ird`");
/// ```
pub fn quote_ident_mysql(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('`');
    for ch in name.chars() {
        if ch == '`' {
            out.push('`');
        }
        out.push(ch);
    }
    out.push('`');
    out
}

/// Quote and comma-join a list of identifiers.
pub fn quote_ident_list<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .map(quote_ident_mysql)
        .collect::<Vec<_>>()
        .join(", ")
}

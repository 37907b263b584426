// crates/districts-core/src/text.rs

/// Canonicalize a district name into the join key shared by polygons and
/// contact rows.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Ely Pūblic` -> `Ely Public`)
/// 2\) Normalize to lowercase
/// 3\) Drop every character that is not `[a-z0-9]`
///
/// The function is idempotent: `normalize_name(&normalize_name(s)) == normalize_name(s)`.
///
/// # Examples
///
/// ```rust
/// use districts_core::text::normalize_name;
///
/// assert_eq!(normalize_name("O'Brien School Dist."), "obrienschooldist");
/// assert_eq!(normalize_name("ISD #2142"), "isd2142");
/// ```
pub fn normalize_name(name: &str) -> String {
    deunicode::deunicode(name)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Clean a district name for display.
///
/// Removes the words `school district` and `public` (any case), collapses
/// runs of whitespace and trims the result. Labels, the form title and the
/// search list all use this form, and search selection compares against it.
///
/// # Examples
///
/// ```rust
/// use districts_core::text::clean_display_name;
///
/// assert_eq!(clean_display_name("Duluth Public School District"), "Duluth");
/// assert_eq!(clean_display_name("  Ely   School District "), "Ely");
/// ```
pub fn clean_display_name(name: &str) -> String {
    let stripped = strip_ascii_ci(&strip_ascii_ci(name, "school district"), "public");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase and trim a free-text search query.
pub fn fold_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Case-insensitive substring test used by the district search list.
///
/// `folded_query` must already be folded with [`fold_query`].
pub fn contains_folded(haystack: &str, folded_query: &str) -> bool {
    haystack.to_lowercase().contains(folded_query)
}

/// Remove every ASCII-case-insensitive occurrence of `pattern` from `s`.
///
/// `pattern` must be ASCII. Matching ASCII bytes can never split a
/// multi-byte character, so every cut lands on a char boundary.
fn strip_ascii_ci(s: &str, pattern: &str) -> String {
    let bytes = s.as_bytes();
    let pat = pattern.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    while i < bytes.len() {
        if !pat.is_empty()
            && bytes.len() - i >= pat.len()
            && bytes[i..i + pat.len()].eq_ignore_ascii_case(pat)
        {
            i += pat.len();
            continue;
        }
        let Some(ch) = s[i..].chars().next() else {
            break;
        };
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}

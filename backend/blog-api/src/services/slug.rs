/// Slug assignment
///
/// Titles and product names become URL-safe identifiers. Uniqueness within
/// a table is assigned by re-checking the store and appending a numeric
/// suffix; concurrent creates of the same title can still race (accepted —
/// the store's unique constraint is the final arbiter).
use crate::db::{Database, DbError};

/// Normalize free text into a lowercase hyphenated slug
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());

    for ch in input.to_lowercase().chars() {
        match ch {
            ' ' | '/' | '\\' | '_' => slug.push('-'),
            '&' => slug.push_str("and"),
            c if c.is_alphanumeric() || c == '-' => slug.push(c),
            // punctuation and anything else drops out
            _ => {}
        }
    }

    // Collapse hyphen runs and trim the ends.
    let mut collapsed = String::with_capacity(slug.len());
    for ch in slug.chars() {
        if ch == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(ch);
    }
    collapsed.trim_matches('-').to_string()
}

/// Produce a slug unique within `table`
///
/// Starting from the normalized base, checks the store for an existing row
/// with that exact slug and appends `-1`, `-2`, … until a free one is found.
pub async fn unique_slug(db: &Database, table: &str, title: &str) -> Result<String, DbError> {
    let base = slugify(title);
    let mut candidate = base.clone();
    let mut suffix = 1u32;

    loop {
        let count = db
            .from(table)
            .select("slug")
            .eq("slug", &candidate)
            .count()
            .await?;
        if count == 0 {
            return Ok(candidate);
        }
        candidate = format!("{}-{}", base, suffix);
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(
            slugify("What's New? (2024 Edition!)"),
            "whats-new-2024-edition"
        );
        assert_eq!(slugify("Tips: Budget, Style; Comfort."), "tips-budget-style-comfort");
    }

    #[test]
    fn ampersand_becomes_and() {
        assert_eq!(slugify("Bath & Towels"), "bath-and-towels");
    }

    #[test]
    fn slashes_become_hyphens() {
        assert_eq!(slugify("Indoor/Outdoor Living"), "indoor-outdoor-living");
    }

    #[test]
    fn collapses_and_trims_hyphens() {
        assert_eq!(slugify("  -- Spaced --  Out --  "), "spaced-out");
        assert_eq!(slugify("a -- b --- c"), "a-b-c");
    }

    #[test]
    fn empty_and_symbol_only_input_yields_empty_slug() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!! ??? ***"), "");
    }
}

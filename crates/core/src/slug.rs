//! URL slug derivation and editable-slug state.
//!
//! Category slugs are derived from the category name but remain user-editable.
//! [`SlugField`] tracks whether the user has hand-edited the slug away from
//! its derived value: the slug auto-follows name edits only until then.

/// Derive a URL slug from free-form text.
///
/// Lowercases, strips characters outside `[a-z0-9\s-]`, trims, collapses
/// internal whitespace runs to single hyphens, and collapses repeated hyphens.
/// The result is idempotent: `slugify(slugify(x)) == slugify(x)`.
#[must_use]
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut last_was_hyphen = false;
    for c in kept.trim().chars() {
        if c.is_whitespace() || c == '-' {
            if !last_was_hyphen {
                slug.push('-');
                last_was_hyphen = true;
            }
        } else {
            slug.push(c);
            last_was_hyphen = false;
        }
    }
    slug
}

/// An editable slug that auto-follows a name field until hand-edited.
///
/// The follow rule uses a single `touched` flag: a manual slug edit that
/// differs from the value derived from the current name marks the field
/// touched, and name edits stop recomputing the slug from then on. Setting
/// the slug to exactly the derived value keeps the pair in its derived
/// relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugField {
    value: String,
    touched: bool,
}

impl SlugField {
    /// Create a field pre-populated from an existing entity.
    ///
    /// An existing slug that doesn't match its derived value counts as
    /// touched, so editing the name won't clobber it.
    #[must_use]
    pub fn from_existing(name: &str, slug: &str) -> Self {
        Self {
            value: slug.to_string(),
            touched: slug != slugify(name),
        }
    }

    /// Current slug value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the slug has been hand-edited away from its derived value.
    #[must_use]
    pub const fn is_touched(&self) -> bool {
        self.touched
    }

    /// React to a name edit: recompute the slug unless touched.
    pub fn on_name_change(&mut self, name: &str) {
        if !self.touched {
            self.value = slugify(name);
        }
    }

    /// React to a manual slug edit.
    pub fn on_slug_edit(&mut self, slug: &str, current_name: &str) {
        self.value = slug.to_string();
        self.touched = slug != slugify(current_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_reference_case() {
        assert_eq!(slugify("Men's  Blue-Jeans!!"), "mens-blue-jeans");
    }

    #[test]
    fn test_slugify_idempotent() {
        for input in ["Men's  Blue-Jeans!!", "  --Weird -- input  ", "plain", ""] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn test_slugify_strips_and_collapses() {
        assert_eq!(slugify("  Summer   2024 Collection "), "summer-2024-collection");
        assert_eq!(slugify("a---b"), "a-b");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slug_follows_name_until_touched() {
        let mut field = SlugField::default();
        field.on_name_change("Shirts");
        assert_eq!(field.value(), "shirts");

        field.on_name_change("Dress Shirts");
        assert_eq!(field.value(), "dress-shirts");

        field.on_slug_edit("formal-shirts", "Dress Shirts");
        assert!(field.is_touched());

        // Further name edits must not clobber the manual slug.
        field.on_name_change("Casual Shirts");
        assert_eq!(field.value(), "formal-shirts");
    }

    #[test]
    fn test_manual_edit_to_derived_value_keeps_following() {
        let mut field = SlugField::default();
        field.on_name_change("Jackets");
        field.on_slug_edit("jackets", "Jackets");
        assert!(!field.is_touched());

        field.on_name_change("Winter Jackets");
        assert_eq!(field.value(), "winter-jackets");
    }

    #[test]
    fn test_from_existing_detects_customized_slug() {
        let derived = SlugField::from_existing("Shirts", "shirts");
        assert!(!derived.is_touched());

        let custom = SlugField::from_existing("Shirts", "tops");
        assert!(custom.is_touched());
    }
}

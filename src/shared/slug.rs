//! Slug derivation from human-readable names.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anything that is not a letter, digit, whitespace, underscore or hyphen
    static ref DISALLOWED: Regex = Regex::new(r"[^a-z0-9\s_-]").unwrap();
    /// Runs of separators that collapse into one hyphen
    static ref SEPARATOR_RUN: Regex = Regex::new(r"[\s_-]+").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref NON_PRODUCT_SLUG: Regex = Regex::new(r"[^a-z0-9-]").unwrap();
}

/// Category slug: lower-case, trim, drop punctuation, collapse separators
/// into single hyphens, strip hyphens at both ends.
///
/// Output is either empty or matches `^[a-z0-9]+(-[a-z0-9]+)*$`, and
/// `slugify(slugify(s)) == slugify(s)`.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let cleaned = DISALLOWED.replace_all(lowered.trim(), "");
    let hyphenated = SEPARATOR_RUN.replace_all(&cleaned, "-");
    hyphenated.trim_matches('-').to_string()
}

/// Product slug as the product form derives it: whitespace runs become a
/// hyphen, then everything outside `[a-z0-9-]` is dropped. Hyphen runs are
/// kept as typed.
pub fn product_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let hyphenated = WHITESPACE_RUN.replace_all(lowered.trim(), "-");
    NON_PRODUCT_SLUG.replace_all(&hyphenated, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::SLUG_REGEX;
    use fake::faker::company::en::CompanyName;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    #[test]
    fn test_slugify_examples() {
        assert_eq!(slugify("Women's Clothing"), "womens-clothing");
        assert_eq!(slugify("  T-Shirts & Tops  "), "t-shirts-tops");
        assert_eq!(slugify("snake_case__name"), "snake-case-name");
        assert_eq!(slugify("--Edge--"), "edge");
        assert_eq!(slugify("Size 10"), "size-10");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Café Noir"), "caf-noir");
        assert_eq!(slugify("日本 shoes"), "shoes");
    }

    #[test]
    fn test_slugify_idempotent_and_well_formed() {
        let mut inputs: Vec<String> = (0..200).map(|_| Sentence(1..8).fake()).collect();
        inputs.extend((0..100).map(|_| CompanyName().fake::<String>()));
        inputs.extend(
            [" a\t\tb ", "-_-", "A--B__C  D", "x\u{00a0}y", "Ünïcödé Ñame"]
                .iter()
                .map(|s| s.to_string()),
        );

        for input in inputs {
            let once = slugify(&input);
            assert_eq!(slugify(&once), once, "not idempotent for {:?}", input);
            assert!(
                once.is_empty() || SLUG_REGEX.is_match(&once),
                "malformed slug {:?} for {:?}",
                once,
                input
            );
        }
    }

    #[test]
    fn test_product_slug() {
        assert_eq!(product_slug("Classic Denim Jacket"), "classic-denim-jacket");
        assert_eq!(product_slug("  Tee (XL)  "), "tee-xl");
        assert_eq!(product_slug("a - b"), "a---b");
        assert_eq!(product_slug("???"), "");
    }
}

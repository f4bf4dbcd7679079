//! Pure functions over image path lists.
//!
//! Shared by the listing endpoint, which produces site-root paths from the
//! public directory, and by the picker, which buckets and filters them.

use std::collections::BTreeSet;

use reqwest::Url;
use serde::Serialize;

use crate::shared::constants::IMAGE_EXTENSIONS;

/// Shown when neither an explicit nor a fetched list has entries
pub const FALLBACK_IMAGES: [&str; 4] = [
    "/products/pic1.png",
    "/products/pic2.png",
    "/products/clothing/dress-style-1.png",
    "/products/towels/pic4.png",
];

/// Canonical site-root form of an image reference.
///
/// Absolute URLs keep only their path, backslashes become slashes and the
/// result always has exactly one leading slash. Blank input stays empty.
pub fn normalize_path(raw: &str) -> String {
    let mut path = raw.trim().to_string();

    if has_http_scheme(&path) {
        if let Ok(url) = Url::parse(&path) {
            path = url.path().to_string();
        }
    }

    let path = path.replace('\\', "/");
    let path = path.trim();
    if path.is_empty() {
        return String::new();
    }

    format!("/{}", path.trim_start_matches('/'))
}

fn has_http_scheme(raw: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        raw.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// True when the file name has a stem and a known image extension, ignoring case
pub fn is_image(path: &str) -> bool {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    file_name
        .rsplit_once('.')
        .map(|(stem, ext)| {
            !stem.is_empty()
                && IMAGE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

pub fn under_root(path: &str, root: &str) -> bool {
    path == root
        || path
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Normalize every entry and keep only images under `root`, in input order
pub fn filter_catalog<S: AsRef<str>>(raw: &[S], root: &str) -> Vec<String> {
    raw.iter()
        .map(|p| normalize_path(p.as_ref()))
        .filter(|p| is_image(p) && under_root(p, root))
        .collect()
}

/// Pick the first non-empty source: explicit list, fetched list, fallback
pub fn effective_catalog(explicit: Option<&[String]>, fetched: &[String], root: &str) -> Vec<String> {
    let (source, images) = match explicit {
        Some(list) if !list.is_empty() => ("explicit", filter_catalog(list, root)),
        _ if !fetched.is_empty() => ("fetched", filter_catalog(fetched, root)),
        _ => ("fallback", filter_catalog(&FALLBACK_IMAGES, root)),
    };

    tracing::debug!(source, count = images.len(), root, "Image catalog resolved");
    images
}

/// Every distinct ancestor folder of the given paths, sorted
pub fn folders<S: AsRef<str>>(images: &[S]) -> Vec<String> {
    let mut set = BTreeSet::new();
    for image in images {
        let parts: Vec<&str> = image.as_ref().split('/').filter(|s| !s.is_empty()).collect();
        let mut current = String::new();
        for part in parts.iter().take(parts.len().saturating_sub(1)) {
            current.push('/');
            current.push_str(part);
            set.insert(current.clone());
        }
    }
    set.into_iter().collect()
}

/// One folder tab; `folder: None` is the implicit "all" facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderFacet {
    pub folder: Option<String>,
    pub count: usize,
}

impl FolderFacet {
    pub fn label(&self) -> &str {
        self.folder.as_deref().unwrap_or("All")
    }
}

pub fn in_folder(path: &str, folder: Option<&str>) -> bool {
    match folder {
        None => true,
        Some(folder) => path
            .strip_prefix(folder)
            .is_some_and(|rest| rest.starts_with('/')),
    }
}

pub fn folder_facets<S: AsRef<str>>(images: &[S]) -> Vec<FolderFacet> {
    let mut facets = vec![FolderFacet {
        folder: None,
        count: images.len(),
    }];

    facets.extend(folders(images).into_iter().map(|folder| {
        let count = images
            .iter()
            .filter(|p| in_folder(p.as_ref(), Some(&folder)))
            .count();
        FolderFacet {
            folder: Some(folder),
            count,
        }
    }));

    facets
}

/// Case-insensitive substring match; a blank term matches everything
pub fn matches_search(path: &str, term: &str) -> bool {
    let term = term.trim();
    term.is_empty() || path.to_lowercase().contains(&term.to_lowercase())
}

/// Images inside `folder` that match `term`
pub fn visible<'a>(images: &'a [String], folder: Option<&str>, term: &str) -> Vec<&'a str> {
    images
        .iter()
        .map(String::as_str)
        .filter(|p| in_folder(p, folder) && matches_search(p, term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path("http://localhost:3000/products/pic1.png"),
            "/products/pic1.png"
        );
        assert_eq!(normalize_path("products\\towels\\pic4.png"), "/products/towels/pic4.png");
        assert_eq!(normalize_path("  /products/a.png "), "/products/a.png");
        assert_eq!(normalize_path("//products/a.png"), "/products/a.png");
        assert_eq!(normalize_path("   "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [
            "https://cdn.example.com/products/a.png?v=2",
            "products\\b.JPG",
            " c.webp",
            "/products/clothing/dress.png",
            "",
        ] {
            let once = normalize_path(raw);
            assert_eq!(normalize_path(&once), once, "input {:?}", raw);
        }
    }

    #[test]
    fn test_is_image() {
        assert!(is_image("/products/a.PNG"));
        assert!(is_image("/products/a.jpeg"));
        assert!(is_image("/products/logo.svg"));
        assert!(!is_image("/docs/readme.pdf"));
        assert!(!is_image("/products/png"));
        assert!(!is_image("/products/.png"));
        assert!(!is_image("/products/clothing.v2/.webp"));
        assert!(is_image("/products/clothing.v2/dress.webp"));
    }

    #[test]
    fn test_url_scheme_ignores_case() {
        assert_eq!(normalize_path("HTTP://cdn.example.com/products/a.png"), "/products/a.png");
        assert_eq!(normalize_path("Https://cdn.example.com/products/b.png"), "/products/b.png");
        assert_eq!(normalize_path("httpx/products/c.png"), "/httpx/products/c.png");
    }

    #[test]
    fn test_filter_catalog_scopes_to_root() {
        let raw = [
            "/docs/readme.pdf",
            "/other/pic.png",
            "/products/pic1.png",
            "/products/clothing/dress.png",
            "/productsextra/pic.png",
        ];

        assert_eq!(
            filter_catalog(&raw, "/products"),
            vec!["/products/pic1.png", "/products/clothing/dress.png"]
        );
    }

    #[test]
    fn test_effective_catalog_priority() {
        let explicit = vec!["/products/explicit.png".to_string()];
        let fetched = vec!["/products/fetched.png".to_string()];

        assert_eq!(
            effective_catalog(Some(explicit.as_slice()), &fetched, "/products"),
            vec!["/products/explicit.png"]
        );
        assert_eq!(
            effective_catalog(Some(&[][..]), &fetched, "/products"),
            vec!["/products/fetched.png"]
        );
        assert_eq!(effective_catalog(None, &[], "/products").len(), FALLBACK_IMAGES.len());
    }

    #[test]
    fn test_folder_facets_count_by_prefix() {
        let images: Vec<String> = vec![
            "/products/pic1.png".into(),
            "/products/clothing/dress.png".into(),
            "/products/clothing/summer/hat.png".into(),
            "/products/towels/pic4.png".into(),
        ];

        let facets = folder_facets(&images);
        let labels: Vec<&str> = facets.iter().map(FolderFacet::label).collect();
        assert_eq!(
            labels,
            vec![
                "All",
                "/products",
                "/products/clothing",
                "/products/clothing/summer",
                "/products/towels"
            ]
        );

        for facet in &facets[1..] {
            let folder = facet.folder.as_deref().unwrap();
            let expected = images
                .iter()
                .filter(|p| p.starts_with(&format!("{}/", folder)))
                .count();
            assert_eq!(facet.count, expected);
        }
        assert_eq!(facets[0].count, 4);
        assert_eq!(facets[2].count, 2);
    }

    #[test]
    fn test_visible_ands_folder_and_search() {
        let images: Vec<String> = vec![
            "/products/clothing/Dress.png".into(),
            "/products/clothing/shirt.png".into(),
            "/products/towels/dress-towel.png".into(),
        ];

        assert_eq!(
            visible(&images, Some("/products/clothing"), "DRESS"),
            vec!["/products/clothing/Dress.png"]
        );
        assert_eq!(visible(&images, None, "dress").len(), 2);
        assert_eq!(visible(&images, None, "  ").len(), 3);
    }
}

//! Sort keys for the two catalog orderings
//!
//! Standalone books sort by (author key, series, title); anthologies sort
//! by (title, series, author key). Field order inside each struct is the
//! comparison order, so the derived `Ord` is the ordering.

/// Drops a leading lowercase run ("de", "van der", ...) up to the first
/// uppercase letter. Strings without an uppercase letter are returned
/// unchanged.
pub fn author_key(author: &str) -> &str {
    match author.char_indices().find(|(_, c)| c.is_uppercase()) {
        Some((idx, _)) => &author[idx..],
        None => author,
    }
}

/// Borrowed key for the author ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthorSortKey<'a> {
    pub author_key: &'a str,
    pub series: &'a str,
    pub title: &'a str,
}

/// Owned key for the title ordering.
///
/// Owned because the catalog caches one per anthology.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TitleSortKey {
    pub title: String,
    pub series: String,
    pub author_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_key_strips_particles() {
        assert_eq!(author_key("de Vries"), "Vries");
        assert_eq!(author_key("van der Berg, Anna"), "Berg, Anna");
    }

    #[test]
    fn test_author_key_unchanged_when_capitalized() {
        assert_eq!(author_key("McKay"), "McKay");
        assert_eq!(author_key("Doe, Jane"), "Doe, Jane");
    }

    #[test]
    fn test_author_key_without_uppercase() {
        assert_eq!(author_key("anonymous"), "anonymous");
        assert_eq!(author_key(""), "");
    }

    #[test]
    fn test_author_key_non_ascii() {
        assert_eq!(author_key("d'Ávila"), "Ávila");
    }

    #[test]
    fn test_author_order_fields() {
        let a = AuthorSortKey { author_key: "Doe", series: "", title: "Beta" };
        let b = AuthorSortKey { author_key: "Doe", series: "", title: "Alpha" };
        let c = AuthorSortKey { author_key: "Doe", series: "A", title: "Aardvark" };
        assert!(b < a);
        // Series outranks title
        assert!(a < c);
    }

    #[test]
    fn test_title_order_fields() {
        let a = TitleSortKey {
            title: "Gamma".into(),
            series: "".into(),
            author_key: "Zed".into(),
        };
        let b = TitleSortKey {
            title: "Gamma".into(),
            series: "".into(),
            author_key: "Abe".into(),
        };
        assert!(b < a);
    }
}

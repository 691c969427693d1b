//! Navigation data model
//!
//! The whole dashboard is one ordered list of categories, each owning an
//! ordered list of sites. The persisted JSON document has exactly this shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookmarked site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Identifier, unique within the owning category
    pub id: String,
    pub name: String,
    pub url: String,
    pub description: String,
    /// Icon reference (icon class name or image URL)
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// A named group of sites. Insertion order of `sites` is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Identifier, unique within the collection
    pub id: String,
    pub name: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub sites: Vec<Site>,
}

/// The root aggregate persisted as one JSON document
pub type Collection = Vec<Category>;

/// Fields for a category that does not exist yet
#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    pub name: String,
    pub icon: String,
    pub color: Option<String>,
}

/// Partial update of a category; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub icon: Option<String>,
    /// `Some(None)` clears the color
    pub color: Option<Option<String>>,
}

/// Fields for a site that does not exist yet
#[derive(Debug, Clone, Default)]
pub struct NewSite {
    pub name: String,
    pub url: String,
    pub description: String,
    pub icon: String,
    pub tags: Option<Vec<String>>,
}

/// Partial update of a site; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct SiteUpdate {
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    /// `Some(None)` drops the tag set
    pub tags: Option<Option<Vec<String>>>,
}

impl Category {
    /// Build a category with no sites
    pub fn new(id: String, fields: NewCategory) -> Self {
        Self {
            id,
            name: fields.name,
            icon: fields.icon,
            color: fields.color,
            sites: Vec::new(),
        }
    }

    /// Merge a partial update into this category
    pub fn apply(&mut self, update: CategoryUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(icon) = update.icon {
            self.icon = icon;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
    }

    /// Position of a site by identifier
    pub fn site_index(&self, site_id: &str) -> Option<usize> {
        self.sites.iter().position(|s| s.id == site_id)
    }
}

impl Site {
    /// Build a site from its creation fields
    pub fn new(id: String, fields: NewSite) -> Self {
        Self {
            id,
            name: fields.name,
            url: fields.url,
            description: fields.description,
            icon: fields.icon,
            tags: fields.tags,
        }
    }

    /// Merge a partial update into this site. The identifier never changes.
    pub fn apply(&mut self, update: SiteUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(url) = update.url {
            self.url = url;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(icon) = update.icon {
            self.icon = icon;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
    }

    /// Case-insensitive match against name, description, URL and tags.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.url.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .flatten()
                .any(|t| t.to_lowercase().contains(needle))
    }
}

/// A search hit with the category it was found in
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SearchResult<'a> {
    pub site: &'a Site,
    pub category: &'a Category,
}

/// Derived statistics, recomputed on demand
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_categories: usize,
    pub total_sites: usize,
    pub categories_with_sites: usize,
    pub last_sync: Option<DateTime<Utc>>,
    pub has_unsaved_changes: bool,
    pub is_online: bool,
    pub can_sync: bool,
}

/// Count categories and sites in a collection
pub fn count(categories: &[Category]) -> (usize, usize, usize) {
    let total_sites = categories.iter().map(|c| c.sites.len()).sum();
    let with_sites = categories.iter().filter(|c| !c.sites.is_empty()).count();
    (categories.len(), total_sites, with_sites)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(id: &str, name: &str) -> Site {
        Site {
            id: id.to_string(),
            name: name.to_string(),
            url: format!("https://{}.example.com", id),
            description: String::new(),
            icon: "fas fa-link".to_string(),
            tags: None,
        }
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = serde_json::to_string(&site("a", "A")).unwrap();
        assert!(!json.contains("tags"));

        let cat = Category::new(
            "c".to_string(),
            NewCategory {
                name: "C".to_string(),
                icon: "x".to_string(),
                color: None,
            },
        );
        let json = serde_json::to_string(&cat).unwrap();
        assert!(!json.contains("color"));
        assert!(json.contains("\"sites\":[]"));
    }

    #[test]
    fn test_category_apply_partial() {
        let mut cat = Category::new(
            "c".to_string(),
            NewCategory {
                name: "Tools".to_string(),
                icon: "x".to_string(),
                color: Some("#fff".to_string()),
            },
        );

        cat.apply(CategoryUpdate {
            name: Some("Utilities".to_string()),
            ..Default::default()
        });
        assert_eq!(cat.name, "Utilities");
        assert_eq!(cat.icon, "x");
        assert_eq!(cat.color.as_deref(), Some("#fff"));

        cat.apply(CategoryUpdate {
            color: Some(None),
            ..Default::default()
        });
        assert!(cat.color.is_none());
    }

    #[test]
    fn test_site_apply_keeps_id() {
        let mut s = site("gh", "GitHub");
        s.apply(SiteUpdate {
            url: Some("https://github.com".to_string()),
            tags: Some(Some(vec!["code".to_string()])),
            ..Default::default()
        });
        assert_eq!(s.id, "gh");
        assert_eq!(s.name, "GitHub");
        assert_eq!(s.url, "https://github.com");
        assert_eq!(s.tags, Some(vec!["code".to_string()]));
    }

    #[test]
    fn test_site_matches() {
        let mut s = site("mdn", "MDN Web Docs");
        s.tags = Some(vec!["JavaScript".to_string()]);
        assert!(s.matches("web"));
        assert!(s.matches("javascript"));
        assert!(s.matches("mdn.example"));
        assert!(!s.matches("python"));
    }

    #[test]
    fn test_count() {
        let mut a = Category::new("a".into(), NewCategory::default());
        a.sites.push(site("1", "one"));
        a.sites.push(site("2", "two"));
        let b = Category::new("b".into(), NewCategory::default());
        assert_eq!(count(&[a, b]), (2, 2, 1));
    }
}

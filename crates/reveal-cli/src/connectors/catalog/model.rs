//! Catalog document: spaces, pages, comments and users in one JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use reveal_engine::TerminalError;

use crate::editor::EditorError;

/// Pages carrying this label may be changed from the client.
pub const EDITABLE_LABEL: &str = "editable-by-reveal";

/// Errors raised by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Could not read catalog: {0}")]
    Io(String),

    #[error("Catalog is malformed: {0}")]
    Parse(String),

    #[error("Could not encode catalog: {0}")]
    Serialize(String),

    #[error("Could not write catalog: {0}")]
    Write(String),

    #[error("Not logged in to a catalog")]
    NotConnected,

    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("No page or space selected")]
    NoSubject,

    #[error("Page '{0}' not found")]
    PageNotFound(String),

    #[error("Space '{0}' not found")]
    SpaceNotFound(String),

    #[error("Space '{0}' doesn't have a home page")]
    NoHomePage(String),

    #[error("Type search followed by the keywords to look for")]
    NoKeywords,

    #[error("Unknown relation '{0}'")]
    UnknownRelation(String),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Terminal(#[from] TerminalError),
}

// =============================================================================
// Document Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub secret: String,
    #[serde(default)]
    pub display_name: String,
}

impl User {
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Id of the space's home page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
}

impl Space {
    /// `Engineering (ENG)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.key)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    #[default]
    Page,
    Blog,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub space: String,
    pub title: String,
    #[serde(default)]
    pub kind: PageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub author: String,
    /// Catalog revision of the last change.
    #[serde(default)]
    pub updated: u64,
}

impl Page {
    pub fn is_editable(&self) -> bool {
        self.labels.iter().any(|l| l == EDITABLE_LABEL)
    }

    pub fn is_blog(&self) -> bool {
        self.kind == PageKind::Blog
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub page: String,
    pub author: String,
    pub body: String,
    #[serde(default)]
    pub created: u64,
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub spaces: Vec<Space>,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Bumped on every change; orders pages by recency.
    #[serde(default)]
    pub revision: u64,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(format!("{}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| CatalogError::Serialize(e.to_string()))?;
        fs::write(path, content)
            .map_err(|e| CatalogError::Write(format!("{}: {}", path.display(), e)))
    }

    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn page(&self, id: &str) -> Result<&Page, CatalogError> {
        self.pages
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::PageNotFound(id.to_string()))
    }

    fn page_mut(&mut self, id: &str) -> Result<&mut Page, CatalogError> {
        self.pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::PageNotFound(id.to_string()))
    }

    pub fn space(&self, key: &str) -> Result<&Space, CatalogError> {
        self.spaces
            .iter()
            .find(|s| s.key == key)
            .ok_or_else(|| CatalogError::SpaceNotFound(key.to_string()))
    }

    /// Child pages of a page, in document order. Blog posts are never children.
    pub fn children(&self, id: &str) -> Vec<&Page> {
        self.pages
            .iter()
            .filter(|p| !p.is_blog() && p.parent.as_deref() == Some(id))
            .collect()
    }

    /// Top of a space's page tree: the home page's children, or the
    /// parentless pages when the space has no home.
    pub fn top_level_pages(&self, key: &str) -> Result<Vec<&Page>, CatalogError> {
        let space = self.space(key)?;
        Ok(match &space.home {
            Some(home) => self.children(home),
            None => self
                .pages
                .iter()
                .filter(|p| p.space == key && !p.is_blog() && p.parent.is_none())
                .collect(),
        })
    }

    /// Blog posts of a space, newest first.
    pub fn blogs(&self, key: &str) -> Vec<&Page> {
        let mut blogs: Vec<&Page> = self
            .pages
            .iter()
            .filter(|p| p.space == key && p.is_blog())
            .collect();
        blogs.sort_by(|a, b| b.updated.cmp(&a.updated));
        blogs
    }

    /// Pages, newest change first.
    pub fn recently_updated(&self, limit: usize) -> Vec<&Page> {
        let mut pages: Vec<&Page> = self.pages.iter().filter(|p| !p.is_blog()).collect();
        pages.sort_by(|a, b| b.updated.cmp(&a.updated));
        pages.truncate(limit);
        pages
    }

    /// Pages whose title or body contains every keyword, ignoring case.
    pub fn search(&self, keywords: &str) -> Vec<&Page> {
        let words: Vec<String> = keywords
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        if words.is_empty() {
            return Vec::new();
        }
        self.pages
            .iter()
            .filter(|p| !p.is_blog())
            .filter(|p| {
                let title = p.title.to_lowercase();
                let body = p.body.to_lowercase();
                words
                    .iter()
                    .all(|w| title.contains(w.as_str()) || body.contains(w.as_str()))
            })
            .collect()
    }

    pub fn comments_for(&self, page: &str) -> Vec<&Comment> {
        self.comments.iter().filter(|c| c.page == page).collect()
    }

    fn touch(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    fn next_page_id(&self) -> String {
        let max = self
            .pages
            .iter()
            .filter_map(|p| p.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }

    /// Replace a page's title and body.
    pub fn update_page(&mut self, id: &str, title: &str, body: &str) -> Result<(), CatalogError> {
        let revision = self.touch();
        let page = self.page_mut(id)?;
        page.title = title.to_string();
        page.body = body.to_string();
        page.updated = revision;
        Ok(())
    }

    /// Add an editable child page under `parent`. Returns the new page id,
    /// or `None` when the title is empty or already taken in the space.
    pub fn create_page(
        &mut self,
        parent: &str,
        title: &str,
        body: &str,
        author: &str,
    ) -> Result<Option<String>, CatalogError> {
        let space = self.page(parent)?.space.clone();
        let title = title.trim();
        let taken = self
            .pages
            .iter()
            .any(|p| p.space == space && p.title.eq_ignore_ascii_case(title));
        if title.is_empty() || taken {
            return Ok(None);
        }

        let id = self.next_page_id();
        let revision = self.touch();
        self.pages.push(Page {
            id: id.clone(),
            space,
            title: title.to_string(),
            kind: PageKind::Page,
            parent: Some(parent.to_string()),
            body: body.to_string(),
            labels: vec![EDITABLE_LABEL.to_string()],
            author: author.to_string(),
            updated: revision,
        });
        Ok(Some(id))
    }

    pub fn add_comment(&mut self, page: &str, author: &str, body: &str) -> Result<(), CatalogError> {
        self.page(page)?;
        let created = self.touch();
        self.comments.push(Comment {
            page: page.to_string(),
            author: author.to_string(),
            body: body.to_string(),
            created,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Catalog {
        Catalog::parse(include_str!("../../../tests/fixtures/catalog.json")).unwrap()
    }

    #[test]
    fn test_fixture_lookups() {
        let catalog = fixture();
        assert_eq!(catalog.space("ENG").unwrap().label(), "Engineering (ENG)");
        assert_eq!(catalog.page("3").unwrap().title, "Release Process");
        assert!(catalog.page("3").unwrap().is_editable());
        assert!(!catalog.page("1").unwrap().is_editable());
        assert!(matches!(catalog.page("999"), Err(CatalogError::PageNotFound(_))));
        assert_eq!(catalog.user("ana").unwrap().label(), "Ana Lima");
    }

    #[test]
    fn test_page_tree() {
        let catalog = fixture();
        let top: Vec<&str> = catalog
            .top_level_pages("ENG")
            .unwrap()
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(top, vec!["Architecture", "Release Process"]);

        let children: Vec<&str> = catalog.children("3").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(children, vec!["4", "5"]);
        assert!(catalog.children("4").is_empty());
    }

    #[test]
    fn test_blogs_newest_first() {
        let catalog = fixture();
        let blogs: Vec<&str> = catalog.blogs("ENG").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(blogs, vec!["7", "6"]);
    }

    #[test]
    fn test_search_matches_all_keywords() {
        let catalog = fixture();
        let hits: Vec<&str> = catalog
            .search("ROLLBACK guide")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(hits, vec!["5"]);
        assert!(catalog.search("   ").is_empty());
        assert!(catalog.search("nonexistent").is_empty());
    }

    #[test]
    fn test_create_page() {
        let mut catalog = fixture();
        let id = catalog
            .create_page("3", "Hotfix Process", "Steps", "ana")
            .unwrap()
            .unwrap();

        assert_eq!(id, "12");
        let page = catalog.page(&id).unwrap();
        assert_eq!(page.space, "ENG");
        assert!(page.is_editable());
        assert_eq!(catalog.recently_updated(1)[0].id, id);

        assert!(catalog
            .create_page("3", "release process", "", "ana")
            .unwrap()
            .is_none());
        assert!(catalog.create_page("3", "  ", "", "ana").unwrap().is_none());
    }

    #[test]
    fn test_update_and_comment() {
        let mut catalog = fixture();
        catalog.update_page("3", "Release Process v2", "New body").unwrap();
        catalog.add_comment("3", "ana", "Looks good").unwrap();

        assert_eq!(catalog.page("3").unwrap().title, "Release Process v2");
        assert_eq!(catalog.comments_for("3").len(), 2);
        assert!(catalog.add_comment("999", "ana", "x").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let catalog = fixture();
        catalog.save(&path).unwrap();

        assert_eq!(Catalog::load(&path).unwrap(), catalog);
        assert!(matches!(
            Catalog::load(&dir.path().join("missing.json")),
            Err(CatalogError::Io(_))
        ));
    }

    #[test]
    fn test_save_failure_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = fixture().save(&dir.path().join("gone").join("catalog.json"));

        match result {
            Err(e @ CatalogError::Write(_)) => {
                assert!(e.to_string().starts_with("Could not write catalog: "));
            }
            other => panic!("Expected a write error, got {:?}", other),
        }
    }
}

//! Catalog operations.

use reveal_core::{Instruction, Outcome, Question};
use reveal_engine::render::wrap_lines;
use reveal_engine::Terminal;

use super::model::{Catalog, CatalogError, Page};
use super::{page_option, space_commands, space_option, CatalogConnector, PAGE, SPACE};

const RECENT_LIMIT: usize = 10;
const UPDATED_LIMIT: usize = 25;

const TITLE_PREFIX: &str = "TITLE=";
const NEW_PAGE_TEMPLATE: &str =
    "TITLE=PAGE TITLE HERE\nINSERT PAGE CONTENT BELOW THIS LINE! (DO NOT REMOVE!)\n\n";
const SAVE_ANSWER: &str = "save";

type OpResult = Result<Outcome, CatalogError>;

// =============================================================================
// Operation Names
// =============================================================================

/// Operations the catalog answers to, keyed by operation name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOperation {
    ListRecentPages,
    ListUpdatedPages,
    ListFavouritePages,
    ListRecentSpaces,
    ListFavouriteSpaces,
    ListAllSpaces,
    Search,
    ShowSpaceMenu,
    ShowSpaceHome,
    ListSpacePages,
    ListSpaceBlogs,
    ShowPage,
    ViewPage,
    EditPage,
    CreatePage,
    AddComment,
    ListComments,
    ShowPageInfo,
    OpenParent,
    ListChildren,
    ListSiblings,
    ToggleRelation,
    ToggleWatch,
}

impl CatalogOperation {
    pub const ALL: [CatalogOperation; 23] = [
        Self::ListRecentPages,
        Self::ListUpdatedPages,
        Self::ListFavouritePages,
        Self::ListRecentSpaces,
        Self::ListFavouriteSpaces,
        Self::ListAllSpaces,
        Self::Search,
        Self::ShowSpaceMenu,
        Self::ShowSpaceHome,
        Self::ListSpacePages,
        Self::ListSpaceBlogs,
        Self::ShowPage,
        Self::ViewPage,
        Self::EditPage,
        Self::CreatePage,
        Self::AddComment,
        Self::ListComments,
        Self::ShowPageInfo,
        Self::OpenParent,
        Self::ListChildren,
        Self::ListSiblings,
        Self::ToggleRelation,
        Self::ToggleWatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListRecentPages => "list_recent_pages",
            Self::ListUpdatedPages => "list_updated_pages",
            Self::ListFavouritePages => "list_favourite_pages",
            Self::ListRecentSpaces => "list_recent_spaces",
            Self::ListFavouriteSpaces => "list_favourite_spaces",
            Self::ListAllSpaces => "list_all_spaces",
            Self::Search => "search",
            Self::ShowSpaceMenu => "show_space_menu",
            Self::ShowSpaceHome => "show_space_home",
            Self::ListSpacePages => "list_space_pages",
            Self::ListSpaceBlogs => "list_space_blogs",
            Self::ShowPage => "show_page",
            Self::ViewPage => "view_page",
            Self::EditPage => "edit_page",
            Self::CreatePage => "create_page",
            Self::AddComment => "add_comment",
            Self::ListComments => "list_comments",
            Self::ShowPageInfo => "show_page_info",
            Self::OpenParent => "open_parent",
            Self::ListChildren => "list_children",
            Self::ListSiblings => "list_siblings",
            Self::ToggleRelation => "toggle_relation",
            Self::ToggleWatch => "toggle_watch",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }
}

/// Per-user marks that can be switched on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Favourite,
    Like,
}

impl Relation {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "favourite" => Some(Self::Favourite),
            "like" => Some(Self::Like),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Favourite => "FAVOURITE",
            Self::Like => "LIKE",
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

impl CatalogConnector {
    pub(super) fn run(
        &mut self,
        operation: CatalogOperation,
        instruction: &mut Instruction,
        io: &mut dyn Terminal,
    ) -> OpResult {
        match operation {
            CatalogOperation::ListRecentPages => {
                let pages = self.pages_by_id(&self.activity.recent_pages);
                Ok(listing(io, instruction.title.clone(), pages, "No results found"))
            }
            CatalogOperation::ListUpdatedPages => {
                let pages = self
                    .catalog
                    .recently_updated(UPDATED_LIMIT)
                    .into_iter()
                    .map(page_option)
                    .collect();
                Ok(listing(io, instruction.title.clone(), pages, "No results found"))
            }
            CatalogOperation::ListFavouritePages => {
                let pages = self.pages_by_id(&self.activity.favourite_pages);
                Ok(listing(io, instruction.title.clone(), pages, "No results found"))
            }
            CatalogOperation::ListRecentSpaces => {
                let spaces = self.spaces_by_key(&self.activity.recent_spaces);
                Ok(listing(io, instruction.title.clone(), spaces, "No results found"))
            }
            CatalogOperation::ListFavouriteSpaces => {
                let spaces = self.spaces_by_key(&self.activity.favourite_spaces);
                Ok(listing(io, instruction.title.clone(), spaces, "No results found"))
            }
            CatalogOperation::ListAllSpaces => {
                let spaces = self.catalog.spaces.iter().map(space_option).collect();
                let heading = "LIST OF ALL SPACES (you have access to)".to_string();
                Ok(listing(io, Some(heading), spaces, "No spaces found"))
            }
            CatalogOperation::Search => self.search(instruction, io),
            CatalogOperation::ShowSpaceMenu => self.show_space_menu(instruction),
            CatalogOperation::ShowSpaceHome => self.show_space_home(instruction, io),
            CatalogOperation::ListSpacePages => self.list_space_pages(instruction, io),
            CatalogOperation::ListSpaceBlogs => self.list_space_blogs(instruction, io),
            CatalogOperation::ShowPage => self.show_page(instruction, io),
            CatalogOperation::ViewPage => self.view_page(instruction, io),
            CatalogOperation::EditPage => self.edit_page(instruction, io),
            CatalogOperation::CreatePage => self.create_page(instruction, io),
            CatalogOperation::AddComment => self.add_comment(instruction, io),
            CatalogOperation::ListComments => self.list_comments(instruction, io),
            CatalogOperation::ShowPageInfo => self.show_page_info(instruction, io),
            CatalogOperation::OpenParent => self.open_parent(instruction, io),
            CatalogOperation::ListChildren => self.list_children(instruction),
            CatalogOperation::ListSiblings => self.list_siblings(instruction, io),
            CatalogOperation::ToggleRelation => self.toggle_relation(instruction, io),
            CatalogOperation::ToggleWatch => self.toggle_watch(instruction, io),
        }
    }

    fn pages_by_id(&self, ids: &[String]) -> Vec<Instruction> {
        ids.iter()
            .filter_map(|id| self.catalog.page(id).ok())
            .map(page_option)
            .collect()
    }

    fn spaces_by_key(&self, keys: &[String]) -> Vec<Instruction> {
        keys.iter()
            .filter_map(|key| self.catalog.space(key).ok())
            .map(space_option)
            .collect()
    }

    /// Apply `change` to a copy of the catalog and adopt the copy once it
    /// is written. A failed change or save leaves the loaded catalog as it
    /// was. Unchanged copies are not written.
    fn commit<R>(
        &mut self,
        change: impl FnOnce(&mut Catalog) -> Result<R, CatalogError>,
    ) -> Result<R, CatalogError> {
        let path = self.path.as_ref().ok_or(CatalogError::NotConnected)?;
        let mut next = self.catalog.clone();
        let result = change(&mut next)?;
        if next != self.catalog {
            next.save(path)?;
            self.catalog = next;
        }
        Ok(result)
    }

    fn author(&self) -> String {
        self.user
            .as_ref()
            .map(|u| u.label().to_string())
            .unwrap_or_default()
    }

    // =========================================================================
    // Search and Spaces
    // =========================================================================

    fn search(&mut self, instruction: &Instruction, io: &mut dyn Terminal) -> OpResult {
        let query = instruction
            .parameter_text()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or(CatalogError::NoKeywords)?;

        let pages = self
            .catalog
            .search(query)
            .into_iter()
            .map(page_option)
            .collect();
        let heading = format!("SEARCH RESULTS FOR: {}", query);
        Ok(listing(io, Some(heading), pages, "No results found"))
    }

    /// Key of the space in focus. A page subject stands for its space.
    fn space_key(&self, instruction: &Instruction) -> Result<String, CatalogError> {
        let subject = instruction.subject.as_deref().ok_or(CatalogError::NoSubject)?;
        if instruction.context.as_str() == PAGE {
            return Ok(self.catalog.page(subject)?.space.clone());
        }
        Ok(self.catalog.space(subject)?.key.clone())
    }

    fn show_space_menu(&mut self, instruction: &Instruction) -> OpResult {
        let key = self.space_key(instruction)?;
        let space = self.catalog.space(&key)?;
        let heading = format!("SPACE MENU FOR SPACE: {}", space.label());

        let options = space_commands()
            .iter()
            .map(|(name, entry)| entry.clone().with_subject(key.clone()).with_label(name))
            .collect();

        self.activity.visit_space(&key);
        Ok(Outcome::new(Some(key), SPACE)
            .with_heading(heading)
            .with_options(options))
    }

    fn show_space_home(&mut self, instruction: &mut Instruction, io: &mut dyn Terminal) -> OpResult {
        let key = self.space_key(instruction)?;
        let space = self.catalog.space(&key)?;
        let home = space
            .home
            .clone()
            .ok_or_else(|| CatalogError::NoHomePage(key.clone()))?;

        io.print(&format!("HOMEPAGE OF SPACE: {}", space.label()));
        instruction.subject = Some(home);
        instruction.context = PAGE.into();
        self.show_page(instruction, io)
    }

    fn list_space_pages(&mut self, instruction: &Instruction, io: &mut dyn Terminal) -> OpResult {
        let key = self.space_key(instruction)?;
        let space = self.catalog.space(&key)?;
        let heading = format!("LEVEL 1 PAGES OF SPACE: {}", space.label());
        let pages = self
            .catalog
            .top_level_pages(&key)?
            .into_iter()
            .map(page_option)
            .collect();

        let outcome = listing(io, Some(heading), pages, "No pages found");
        Ok(Outcome {
            subject: Some(key),
            context: SPACE.into(),
            ..outcome
        })
    }

    fn list_space_blogs(&mut self, instruction: &Instruction, io: &mut dyn Terminal) -> OpResult {
        let key = self.space_key(instruction)?;
        let heading = format!("BLOG POSTS FOR SPACE: {}", key);
        let blogs = self
            .catalog
            .blogs(&key)
            .into_iter()
            .map(page_option)
            .collect();

        let outcome = listing(io, Some(heading), blogs, "No blog posts found");
        Ok(Outcome {
            subject: Some(key),
            context: SPACE.into(),
            ..outcome
        })
    }

    // =========================================================================
    // Pages
    // =========================================================================

    /// Print a page's preview and focus it.
    pub(super) fn show_page(&mut self, instruction: &Instruction, io: &mut dyn Terminal) -> OpResult {
        let id = subject(instruction)?;
        let page = self.catalog.page(&id)?;

        io.print(&format!("PAGE: {}", page.title));
        let lines = wrap_lines(&page.body, self.max_width);
        let shown = lines.len().min(self.preview_lines);
        if shown > 0 {
            io.print(&lines[..shown].join("\n"));
        }
        if lines.len() > shown {
            io.print(&format!(
                "NOTE: Showing first {} lines out of {}.",
                shown,
                lines.len()
            ));
            if page.is_editable() {
                io.print("HINT: Type E or Edit to view and/or edit the entire page");
            } else {
                io.print("HINT: Type V or View to view the entire page");
            }
        }

        self.activity.visit_page(&id);
        Ok(Outcome::new(Some(id), PAGE))
    }

    /// Open the whole page in the editor. Changes to editable pages are
    /// kept only when the user confirms.
    fn view_page(&mut self, instruction: &Instruction, io: &mut dyn Terminal) -> OpResult {
        let id = subject(instruction)?;
        let page = self.catalog.page(&id)?;
        let before = page_text(page);
        let editable = page.is_editable();

        let after = self.editor.edit(&before)?;
        if changed(&before, &after) && editable {
            io.print("WARNING: Changes have been made to this page. Type \"save\" to keep changes made.");
            let answer = io.read_line("")?.unwrap_or_default();
            if answer.trim().eq_ignore_ascii_case(SAVE_ANSWER) {
                self.update_page(&id, &after, io);
            }
        }
        self.show_page(instruction, io)
    }

    fn edit_page(&mut self, instruction: &Instruction, io: &mut dyn Terminal) -> OpResult {
        let id = subject(instruction)?;
        let page = self.catalog.page(&id)?;

        if !page.is_editable() {
            io.print("WARNING: This page is marked as being not editable through this client");
        } else {
            let before = page_text(page);
            let after = self.editor.edit(&before)?;
            if changed(&before, &after) {
                self.update_page(&id, &after, io);
            }
        }
        self.show_page(instruction, io)
    }

    fn update_page(&mut self, id: &str, text: &str, io: &mut dyn Terminal) {
        let (title, body) = parse_page_text(text, 1);
        match self.commit(|catalog| catalog.update_page(id, &title, &body)) {
            Ok(()) => {
                tracing::info!("Updated page {}", id);
                io.print("INFO: Page updated successfully");
            }
            Err(e) => {
                tracing::warn!("Could not update page {}: {}", id, e);
                io.print("ERROR: Failed to update page. Check permissions or page restrictions");
            }
        }
    }

    /// Write a new child page in the editor. The new page takes focus.
    fn create_page(&mut self, instruction: &mut Instruction, io: &mut dyn Terminal) -> OpResult {
        let parent = subject(instruction)?;
        self.catalog.page(&parent)?;

        let after = self.editor.edit(NEW_PAGE_TEMPLATE)?;
        if changed(NEW_PAGE_TEMPLATE, &after) {
            let (title, body) = parse_page_text(&after, 2);
            let author = self.author();
            let created =
                self.commit(|catalog| catalog.create_page(&parent, &title, &body, &author));
            match created {
                Ok(Some(id)) => {
                    tracing::info!("Created page {} under {}", id, parent);
                    instruction.description = title;
                    instruction.subject = Some(id);
                }
                failed => {
                    if let Err(e) = failed {
                        tracing::warn!("Could not create page under {}: {}", parent, e);
                    }
                    io.print("ERROR: Failed to create page. Check permissions or title conflicts");
                    io.print("HINT: First create page with title only, then edit page to add content");
                }
            }
        }
        self.show_page(instruction, io)
    }

    /// Ask for the comment text, then post it.
    fn add_comment(&mut self, instruction: &Instruction, io: &mut dyn Terminal) -> OpResult {
        let id = subject(instruction)?;
        self.catalog.page(&id)?;

        let Some(answers) = instruction.answers() else {
            return Ok(Outcome::new(Some(id), PAGE)
                .asking(vec![Question::new("Enter your comment:").mandatory()]));
        };

        let author = self.author();
        self.commit(|catalog| {
            for text in answers.iter().filter_map(|q| q.answer_text()) {
                catalog.add_comment(&id, &author, text)?;
            }
            Ok(())
        })?;
        io.print("INFO: Comment added");
        self.show_page(instruction, io)
    }

    fn list_comments(&mut self, instruction: &Instruction, io: &mut dyn Terminal) -> OpResult {
        let id = subject(instruction)?;
        self.catalog.page(&id)?;

        let comments = self.catalog.comments_for(&id);
        if comments.is_empty() {
            io.print("NOTICE: Page doesn't have comments");
            return self.show_page(instruction, io);
        }

        io.print("COMMENTS FOR PAGE:");
        for comment in comments {
            io.print(&format!("COMMENT BY {}:", comment.author));
            io.print(&wrap_lines(&comment.body, self.max_width).join("\n"));
            io.print("");
        }
        Ok(Outcome::new(Some(id), PAGE))
    }

    fn show_page_info(&mut self, instruction: &Instruction, io: &mut dyn Terminal) -> OpResult {
        let id = subject(instruction)?;
        let page = self.catalog.page(&id)?;
        let space = self.catalog.space(&page.space)?;
        let parent = match &page.parent {
            Some(parent) => self.catalog.page(parent)?.title.clone(),
            None => "-".to_string(),
        };
        let labels = if page.labels.is_empty() {
            "-".to_string()
        } else {
            page.labels.join(", ")
        };

        let lines = [
            format!("PAGE INFO: {}", page.title),
            format!("Id: {}", page.id),
            format!("Space: {}", space.label()),
            format!("Author: {}", page.author),
            format!("Parent: {}", parent),
            format!("Children: {}", self.catalog.children(&id).len()),
            format!("Comments: {}", self.catalog.comments_for(&id).len()),
            format!("Labels: {}", labels),
            format!("Editable: {}", yes_no(page.is_editable())),
            format!("Favourite: {}", yes_no(self.activity.favourite_pages.contains(&id))),
            format!("Liked: {}", yes_no(self.activity.liked_pages.contains(&id))),
            format!("Watching: {}", yes_no(self.activity.watched_pages.contains(&id))),
        ];
        io.print(&wrap_lines(&lines.join("\n"), self.max_width).join("\n"));
        Ok(Outcome::new(Some(id), PAGE))
    }

    // =========================================================================
    // Page Tree
    // =========================================================================

    fn open_parent(&mut self, instruction: &mut Instruction, io: &mut dyn Terminal) -> OpResult {
        let id = subject(instruction)?;
        match self.catalog.page(&id)?.parent.clone() {
            Some(parent) => instruction.subject = Some(parent),
            None => io.print("NOTICE: This page doesn't have a parent"),
        }
        self.show_page(instruction, io)
    }

    fn list_children(&self, instruction: &Instruction) -> OpResult {
        let id = subject(instruction)?;
        let page = self.catalog.page(&id)?;
        let children: Vec<Instruction> = self
            .catalog
            .children(&id)
            .into_iter()
            .map(page_option)
            .collect();

        let outcome = Outcome::new(Some(id), PAGE);
        if children.is_empty() {
            return Ok(outcome.with_error("This page doesn't have children pages."));
        }
        Ok(outcome
            .with_heading(format!("CHILDREN PAGES OF PAGE: {}", page.title))
            .with_options(children))
    }

    fn list_siblings(&mut self, instruction: &Instruction, io: &mut dyn Terminal) -> OpResult {
        let id = subject(instruction)?;
        let page = self.catalog.page(&id)?;
        let Some(parent) = page.parent.clone() else {
            io.print("NOTICE: This page doesn't have sibling pages.");
            return self.show_page(instruction, io);
        };

        let siblings = self
            .catalog
            .children(&parent)
            .into_iter()
            .map(page_option)
            .collect();
        Ok(Outcome::new(Some(parent), PAGE)
            .with_heading(format!("SIBLING PAGES OF PAGE: {}", page.title))
            .with_options(siblings))
    }

    // =========================================================================
    // Relations
    // =========================================================================

    /// Switch a favourite or like on the page or space in focus.
    fn toggle_relation(&mut self, instruction: &mut Instruction, io: &mut dyn Terminal) -> OpResult {
        let name = instruction.parameter_text().unwrap_or_default().to_string();
        let relation =
            Relation::parse(&name).ok_or_else(|| CatalogError::UnknownRelation(name.clone()))?;
        let target = subject(instruction)?;

        if instruction.context.as_str() == SPACE {
            let space = self.catalog.space(&target)?.label();
            let list = match relation {
                Relation::Favourite => &mut self.activity.favourite_spaces,
                Relation::Like => return Err(CatalogError::UnknownRelation(name)),
            };
            if toggle(list, &target) {
                io.print(&format!("{} ADDED FOR SPACE: {}", relation.as_str(), space));
            } else {
                io.print(&format!("{} REMOVED", relation.as_str()));
            }
            return self.show_space_menu(instruction);
        }

        let title = self.catalog.page(&target)?.title.clone();
        let list = match relation {
            Relation::Favourite => &mut self.activity.favourite_pages,
            Relation::Like => &mut self.activity.liked_pages,
        };
        if toggle(list, &target) {
            io.print(&format!("{} ADDED FOR PAGE: {}", relation.as_str(), title));
        } else {
            io.print(&format!("{} REMOVED", relation.as_str()));
        }
        self.show_page(instruction, io)
    }

    fn toggle_watch(&mut self, instruction: &Instruction, io: &mut dyn Terminal) -> OpResult {
        let id = subject(instruction)?;
        self.catalog.page(&id)?;
        if toggle(&mut self.activity.watched_pages, &id) {
            io.print("WATCH ADDED");
        } else {
            io.print("WATCH REMOVED");
        }
        self.show_page(instruction, io)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn subject(instruction: &Instruction) -> Result<String, CatalogError> {
    instruction.subject.clone().ok_or(CatalogError::NoSubject)
}

/// Outcome listing `options` under `heading`. An empty list prints the
/// heading and `empty` instead.
fn listing(
    io: &mut dyn Terminal,
    heading: Option<String>,
    options: Vec<Instruction>,
    empty: &str,
) -> Outcome {
    let outcome = Outcome::global(None);
    if options.is_empty() {
        if let Some(heading) = heading {
            io.print(&heading);
        }
        io.print(empty);
        return outcome;
    }

    let outcome = outcome.with_options(options);
    match heading {
        Some(heading) => outcome.with_heading(heading),
        None => outcome,
    }
}

/// Editor form of a page: a title line followed by the body.
fn page_text(page: &Page) -> String {
    format!("{}{}\n{}", TITLE_PREFIX, page.title, page.body)
}

/// Split editor text into title and body. The body starts `skip` lines
/// below the top.
fn parse_page_text(text: &str, skip: usize) -> (String, String) {
    let mut lines = text.lines();
    let title = lines
        .next()
        .map(|l| l.trim_start_matches(TITLE_PREFIX).trim().to_string())
        .unwrap_or_default();
    let body = lines
        .skip(skip.saturating_sub(1))
        .collect::<Vec<_>>()
        .join("\n");
    (title, body.trim_end().to_string())
}

/// Editors tend to add a final newline; that alone is no change.
fn changed(before: &str, after: &str) -> bool {
    before.trim_end() != after.trim_end()
}

/// Add `id` to `list`, or take it out if present. Returns true when added.
fn toggle(list: &mut Vec<String>, id: &str) -> bool {
    match list.iter().position(|entry| entry == id) {
        Some(index) => {
            list.remove(index);
            false
        }
        None => {
            list.push(id.to_string());
            true
        }
    }
}

/// Move `id` to the front of a most-recent-first list.
pub(super) fn visit(list: &mut Vec<String>, id: &str) {
    list.retain(|entry| entry != id);
    list.insert(0, id.to_string());
    list.truncate(RECENT_LIMIT);
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names_round_trip() {
        for op in CatalogOperation::ALL {
            assert_eq!(CatalogOperation::parse(op.as_str()), Some(op));
        }
        assert_eq!(CatalogOperation::parse("drop_tables"), None);
    }

    #[test]
    fn test_parse_page_text() {
        let (title, body) = parse_page_text("TITLE= New Title \nline one\nline two\n", 1);
        assert_eq!(title, "New Title");
        assert_eq!(body, "line one\nline two");

        let (title, body) = parse_page_text(
            "TITLE=Fresh\nINSERT PAGE CONTENT BELOW THIS LINE! (DO NOT REMOVE!)\nHello\n",
            2,
        );
        assert_eq!(title, "Fresh");
        assert_eq!(body, "Hello");
    }

    #[test]
    fn test_trailing_newline_is_not_a_change() {
        assert!(!changed("TITLE=A\nbody", "TITLE=A\nbody\n"));
        assert!(changed("TITLE=A\nbody", "TITLE=B\nbody\n"));
    }

    #[test]
    fn test_toggle_and_visit() {
        let mut list = Vec::new();
        assert!(toggle(&mut list, "3"));
        assert!(toggle(&mut list, "4"));
        assert!(!toggle(&mut list, "3"));
        assert_eq!(list, vec!["4"]);

        let mut recent = Vec::new();
        for id in 0..12 {
            visit(&mut recent, &id.to_string());
        }
        visit(&mut recent, "5");
        assert_eq!(recent.len(), RECENT_LIMIT);
        assert_eq!(recent[0], "5");
        assert_eq!(recent[1], "11");
        assert_eq!(recent.iter().filter(|id| *id == "5").count(), 1);
    }
}

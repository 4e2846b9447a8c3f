//! Catalog connector
//!
//! A content service kept in one JSON file: spaces holding trees of pages,
//! blog posts, comments and the users allowed in. The connection endpoint
//! is the path of that file.
//!
//! Page edits, new pages and comments are written back to the file.
//! Favourites, likes, watches and the recently visited lists live only as
//! long as the connection.

mod model;
mod operations;

use std::path::PathBuf;

use reveal_core::{CommandTable, Context, DisplayConfig, Instruction, Outcome, ShortcutTable};
use reveal_engine::commands::MAIN_MENU;
use reveal_engine::{Connector, Menu, Terminal};

use crate::editor::Editor;

pub use model::{Catalog, CatalogError, Comment, Page, PageKind, Space, User, EDITABLE_LABEL};
pub use operations::{CatalogOperation, Relation};

/// Registry name of the connector.
pub const CONNECTOR_NAME: &str = "catalog";

pub(crate) const PAGE: &str = "page";
pub(crate) const SPACE: &str = "space";

const ENDPOINT_SCHEMES: [&str; 3] = ["file://", "https://", "http://"];

/// What the user did during this connection.
#[derive(Debug, Default)]
struct Activity {
    recent_pages: Vec<String>,
    recent_spaces: Vec<String>,
    favourite_pages: Vec<String>,
    favourite_spaces: Vec<String>,
    liked_pages: Vec<String>,
    watched_pages: Vec<String>,
}

impl Activity {
    fn visit_page(&mut self, id: &str) {
        operations::visit(&mut self.recent_pages, id);
    }

    fn visit_space(&mut self, key: &str) {
        operations::visit(&mut self.recent_spaces, key);
    }
}

/// Connector over a JSON catalog file.
pub struct CatalogConnector {
    path: Option<PathBuf>,
    catalog: Catalog,
    user: Option<User>,
    activity: Activity,
    editor: Box<dyn Editor>,
    preview_lines: usize,
    max_width: usize,
}

impl CatalogConnector {
    pub fn new(editor: Box<dyn Editor>, display: &DisplayConfig) -> Self {
        Self {
            path: None,
            catalog: Catalog::default(),
            user: None,
            activity: Activity::default(),
            editor,
            preview_lines: display.preview_lines,
            max_width: display.max_width,
        }
    }

    /// The logged-in user.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

/// Catalog file named by a connection endpoint.
pub fn catalog_path(endpoint: &str) -> PathBuf {
    let path = ENDPOINT_SCHEMES
        .iter()
        .find_map(|scheme| endpoint.strip_prefix(scheme))
        .unwrap_or(endpoint);
    PathBuf::from(path)
}

impl Connector for CatalogConnector {
    fn name(&self) -> String {
        match &self.path {
            Some(path) => format!("Catalog ({})", path.display()),
            None => "Catalog (NOT CONNECTED)".to_string(),
        }
    }

    fn connect(&mut self, endpoint: &str, username: &str, secret: &str) -> bool {
        let path = catalog_path(endpoint);
        let catalog = match Catalog::load(&path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("Could not open catalog: {}", e);
                return false;
            }
        };

        let Some(user) = catalog
            .user(username)
            .filter(|user| user.secret == secret)
            .cloned()
        else {
            tracing::warn!("Login to {} failed for user {}", path.display(), username);
            return false;
        };

        tracing::info!("Logged in to {} as {}", path.display(), user.label());
        self.path = Some(path);
        self.catalog = catalog;
        self.user = Some(user);
        self.activity = Activity::default();
        true
    }

    fn menu(&self, name: &str) -> Option<Menu> {
        (name == MAIN_MENU).then(main_menu)
    }

    fn commands(&self, context: &Context) -> Option<CommandTable> {
        match context.as_str() {
            Context::GLOBAL => Some(global_commands()),
            SPACE => Some(space_commands()),
            PAGE => Some(page_commands()),
            _ => None,
        }
    }

    fn shortcuts(&self) -> ShortcutTable {
        ShortcutTable::new()
            .with("/", "search")
            .with("e", "edit")
            .with("c", "create")
            .with("m", "comment")
            .with("i", "info")
            .with("p", "parent")
            .with("f", "favourite")
            .with("v", "view")
            .with("w", "watch")
    }

    fn perform(&mut self, instruction: &mut Instruction, io: &mut dyn Terminal) -> Outcome {
        let name = instruction.operation.name().to_string();
        let result = match CatalogOperation::parse(&name) {
            Some(_) if self.user.is_none() => Err(CatalogError::NotConnected),
            Some(operation) => self.run(operation, instruction, io),
            None => Err(CatalogError::UnknownOperation(name.clone())),
        };

        result.unwrap_or_else(|e| {
            tracing::debug!("{} failed: {}", name, e);
            Outcome::new(instruction.subject.clone(), instruction.context.clone())
                .with_error(e.to_string())
        })
    }
}

// =============================================================================
// Command Tables
// =============================================================================

fn main_menu() -> Menu {
    Menu::new()
        .with(
            "Pages visited recently",
            Instruction::connector("List recently visited pages", "list_recent_pages")
                .with_title("YOUR 10 MOST RECENTLY VISITED PAGES:"),
        )
        .with(
            "Pages updated recently",
            Instruction::connector("List recently updated pages", "list_updated_pages")
                .with_title("THE 25 MOST RECENTLY UPDATED PAGES:"),
        )
        .with(
            "Favourite pages",
            Instruction::connector("List favourite pages", "list_favourite_pages")
                .with_title("YOUR FAVOURITE PAGES:"),
        )
        .with(
            "Spaces visited recently",
            Instruction::connector("List recently visited spaces", "list_recent_spaces")
                .with_title("YOUR 10 MOST RECENTLY VISITED SPACES:"),
        )
        .with(
            "Favourite spaces",
            Instruction::connector("List favourite spaces", "list_favourite_spaces")
                .with_title("YOUR FAVOURITE SPACES:"),
        )
        .with(
            "All spaces",
            Instruction::connector("List all spaces", "list_all_spaces"),
        )
}

fn global_commands() -> CommandTable {
    CommandTable::new().with(
        "search",
        Instruction::connector("Search pages by keywords", "search").parameterized("keywords"),
    )
}

pub(crate) fn space_commands() -> CommandTable {
    CommandTable::new()
        .with(
            "home",
            Instruction::connector("Show space home page", "show_space_home").in_context(SPACE),
        )
        .with(
            "pages",
            Instruction::connector("List top level pages of space", "list_space_pages")
                .in_context(SPACE),
        )
        .with(
            "blogs",
            Instruction::connector("List blog posts of space", "list_space_blogs")
                .in_context(SPACE),
        )
        .with(
            "favourite",
            Instruction::connector("Add/remove space favourite", "toggle_relation")
                .in_context(SPACE)
                .with_parameter("favourite")
                .without_history(),
        )
}

fn page_commands() -> CommandTable {
    let page = |description: &str, operation: &str| {
        Instruction::connector(description, operation).in_context(PAGE)
    };

    CommandTable::new()
        .with("space", page("Show space menu of page", "show_space_menu"))
        .with("view", page("View page in editor", "view_page"))
        .with("edit", page("Edit page in editor", "edit_page"))
        .with("create", page("Create child page", "create_page"))
        .with("comment", page("Add comment to page", "add_comment"))
        .with("comments", page("Show page comments", "list_comments"))
        .with("info", page("Show page info", "show_page_info"))
        .with("parent", page("Open parent page", "open_parent"))
        .with("children", page("List children pages", "list_children"))
        .with("siblings", page("List sibling pages", "list_siblings"))
        .with(
            "favourite",
            page("Add/remove page favourite", "toggle_relation")
                .with_parameter("favourite")
                .without_history(),
        )
        .with(
            "like",
            page("Add/remove page like", "toggle_relation")
                .with_parameter("like")
                .without_history(),
        )
        .with(
            "watch",
            page("Start/stop watching page", "toggle_watch").without_history(),
        )
}

/// Option that opens a page.
pub(crate) fn page_option(page: &Page) -> Instruction {
    Instruction::connector(page.title.clone(), "show_page")
        .in_context(PAGE)
        .with_subject(page.id.clone())
}

/// Option that opens a space menu.
pub(crate) fn space_option(space: &Space) -> Instruction {
    Instruction::connector(space.label(), "show_space_menu")
        .in_context(SPACE)
        .with_subject(space.key.clone())
}

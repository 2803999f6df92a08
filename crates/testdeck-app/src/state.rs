//! Application state (Model in TEA pattern)

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use testdeck_core::{
    aggregate, apply_filter, filter_catalog, group_by_test_class, is_nested_class_node,
    CatalogNode, ClassDetail, Counts, ExecutionSummary, FilterState, MethodNode, ResultNode,
    ResultStatus,
};

use crate::cache::{DashboardCache, ExecutionCache};
use crate::config::Settings;
use crate::poller::DashboardPoller;

/// Text shown in place of method source that could not be fetched
pub const METHOD_CODE_FALLBACK: &str = "// Failed to load method code";

/// The three top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Dashboard,
    TestInfo,
    TestResults,
}

impl View {
    pub const ALL: [View; 3] = [View::Dashboard, View::TestInfo, View::TestResults];

    pub fn label(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::TestInfo => "Test Info",
            View::TestResults => "Test Results",
        }
    }

    pub fn index(self) -> usize {
        match self {
            View::Dashboard => 0,
            View::TestInfo => 1,
            View::TestResults => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> View {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> View {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Sidebar,
    Main,
    /// Result tree of the selected execution (Test Results view only)
    Detail,
}

/// Text field of the execution filter being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    RequesterIp,
    ClassName,
    Date,
}

impl FilterField {
    pub fn label(self) -> &'static str {
        match self {
            FilterField::RequesterIp => "Requester IP",
            FilterField::ClassName => "Class name",
            FilterField::Date => "Date (YYYY-MM-DD)",
        }
    }
}

/// Current input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Normal,
    /// Typing into the sidebar search box
    Search,
    /// Typing into one execution filter field
    FilterInput(FilterField),
}

/// Cursor movement request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

impl CursorMove {
    /// Apply to a cursor over `len` rows
    pub fn apply(self, cursor: usize, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let last = len - 1;
        match self {
            CursorMove::Up => cursor.saturating_sub(1),
            CursorMove::Down => (cursor + 1).min(last),
            CursorMove::PageUp => cursor.saturating_sub(10),
            CursorMove::PageDown => (cursor + 10).min(last),
            CursorMove::Top => 0,
            CursorMove::Bottom => last,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Panel load tracking
// ─────────────────────────────────────────────────────────────────────────────

/// What a panel should render while its data is (not) available
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Terminal "failed to load" placeholder
    Failed(String),
}

/// Load status plus the request token of the latest population request.
///
/// Every request bumps the generation; a completion carrying an older
/// generation is stale and must be dropped.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    pub status: PanelStatus,
    generation: u64,
}

impl Panel {
    /// Start a load that shows the loading placeholder.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.status = PanelStatus::Loading;
        self.generation
    }

    /// Start a background refresh: already rendered data stays visible.
    pub fn begin_refresh(&mut self) -> u64 {
        if self.status == PanelStatus::Ready {
            self.generation += 1;
            self.generation
        } else {
            self.begin_load()
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.status == PanelStatus::Loading
    }

    pub fn ready(&mut self) {
        self.status = PanelStatus::Ready;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = PanelStatus::Failed(message.into());
    }

    /// Back to idle; any request in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.status = PanelStatus::Idle;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sidebar catalog
// ─────────────────────────────────────────────────────────────────────────────

/// One rendered line of the sidebar tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub depth: usize,
    /// Slash-joined names from the root; identifies packages for expansion
    pub path: String,
    pub name: String,
    /// Fully qualified class name (classes only)
    pub class_name: Option<String>,
    pub has_children: bool,
    pub expanded: bool,
    pub checked: bool,
}

impl CatalogRow {
    pub fn is_class(&self) -> bool {
        self.class_name.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub tree: Option<Vec<CatalogNode>>,
    pub panel: Panel,
    pub expanded: HashSet<String>,
    pub search: String,
    /// Classes ticked for a batch run
    pub checked: BTreeSet<String>,
    pub cursor: usize,
}

impl CatalogState {
    /// Install a freshly loaded tree with every package expanded.
    pub fn set_tree(&mut self, nodes: Vec<CatalogNode>) {
        self.expanded.clear();
        collect_package_paths(&nodes, "", &mut self.expanded);
        self.tree = Some(nodes);
        self.clamp_cursor();
    }

    pub fn class_count(&self) -> usize {
        self.tree
            .as_ref()
            .map(|nodes| nodes.iter().map(CatalogNode::class_count).sum())
            .unwrap_or(0)
    }

    /// Rows currently visible, honoring the search keyword and expansion.
    ///
    /// While searching, every branch that survives the filter is expanded.
    pub fn visible_rows(&self) -> Vec<CatalogRow> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        let searching = !self.search.trim().is_empty();
        let mut rows = Vec::new();
        if searching {
            let filtered = filter_catalog(tree, &self.search);
            self.push_rows(&filtered, "", 0, true, &mut rows);
        } else {
            self.push_rows(tree, "", 0, false, &mut rows);
        }
        rows
    }

    fn push_rows(
        &self,
        nodes: &[CatalogNode],
        parent: &str,
        depth: usize,
        force_expand: bool,
        rows: &mut Vec<CatalogRow>,
    ) {
        for node in nodes {
            let path = join_path(parent, &node.name);
            let has_children = !node.children.is_empty();
            let expanded = has_children && (force_expand || self.expanded.contains(&path));
            let class_name = if node.is_class() {
                Some(node.class_name.clone().unwrap_or_else(|| node.name.clone()))
            } else {
                None
            };
            let checked = class_name
                .as_ref()
                .is_some_and(|name| self.checked.contains(name));

            rows.push(CatalogRow {
                depth,
                path: path.clone(),
                name: node.name.clone(),
                class_name,
                has_children,
                expanded,
                checked,
            });

            if expanded {
                self.push_rows(&node.children, &path, depth + 1, force_expand, rows);
            }
        }
    }

    pub fn selected_row(&self) -> Option<CatalogRow> {
        self.visible_rows().into_iter().nth(self.cursor)
    }

    pub fn toggle_expanded(&mut self, path: &str) {
        if !self.expanded.remove(path) {
            self.expanded.insert(path.to_string());
        }
        self.clamp_cursor();
    }

    /// Tick or untick a class. Returns whether it is now checked.
    pub fn toggle_checked(&mut self, class_name: &str) -> bool {
        if self.checked.remove(class_name) {
            false
        } else {
            self.checked.insert(class_name.to_string());
            true
        }
    }

    pub fn checked_classes(&self) -> Vec<String> {
        self.checked.iter().cloned().collect()
    }

    pub fn clear_checked(&mut self) {
        self.checked.clear();
    }

    pub fn run_button_label(&self, run_in_flight: bool) -> String {
        if run_in_flight {
            "Running...".to_string()
        } else if self.checked.is_empty() {
            "Run Selected Tests".to_string()
        } else {
            format!("Run Selected Tests ({})", self.checked.len())
        }
    }

    pub fn move_cursor(&mut self, movement: CursorMove) {
        self.cursor = movement.apply(self.cursor, self.visible_rows().len());
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.visible_rows().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

fn collect_package_paths(nodes: &[CatalogNode], parent: &str, out: &mut HashSet<String>) {
    for node in nodes {
        if !node.children.is_empty() {
            let path = join_path(parent, &node.name);
            collect_package_paths(&node.children, &path, out);
            out.insert(path);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Info (class detail)
// ─────────────────────────────────────────────────────────────────────────────

/// Source code of a method, fetched at most once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodCode {
    Loading,
    Loaded(String),
}

/// One rendered line of the method tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRow {
    pub depth: usize,
    pub label: String,
    /// Set for test methods; nested class headers have none
    pub unique_id: Option<String>,
    pub nested: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ClassPanel {
    /// Fully qualified name of the opened class
    pub opened: Option<String>,
    pub detail: Option<ClassDetail>,
    pub panel: Panel,
    pub cursor: usize,
    /// Methods whose source is expanded
    pub shown_code: HashSet<String>,
    /// Per-uniqueId source cache
    pub code: HashMap<String, MethodCode>,
}

impl ClassPanel {
    pub fn open(&mut self, class_name: impl Into<String>) {
        self.opened = Some(class_name.into());
        self.detail = None;
        self.panel.reset();
        self.cursor = 0;
        self.shown_code.clear();
    }

    /// Close the opened class and clear the panel.
    pub fn close(&mut self) {
        self.opened = None;
        self.detail = None;
        self.panel.reset();
        self.cursor = 0;
        self.shown_code.clear();
    }

    pub fn is_open(&self, class_name: &str) -> bool {
        self.opened.as_deref() == Some(class_name)
    }

    pub fn method_rows(&self) -> Vec<MethodRow> {
        let mut rows = Vec::new();
        if let Some(detail) = &self.detail {
            push_method_rows(&detail.methods, 0, &mut rows);
        }
        rows
    }

    pub fn selected_method(&self) -> Option<MethodRow> {
        self.method_rows().into_iter().nth(self.cursor)
    }

    pub fn move_cursor(&mut self, movement: CursorMove) {
        self.cursor = movement.apply(self.cursor, self.method_rows().len());
    }
}

fn push_method_rows(nodes: &[MethodNode], depth: usize, rows: &mut Vec<MethodRow>) {
    for node in nodes {
        match node {
            MethodNode::Method(method) => rows.push(MethodRow {
                depth,
                label: method.display_name.clone(),
                unique_id: Some(method.unique_id.clone()),
                nested: false,
            }),
            MethodNode::NestedClass(group) => {
                rows.push(MethodRow {
                    depth,
                    label: group.display_name.clone(),
                    unique_id: None,
                    nested: true,
                });
                push_method_rows(&group.children, depth + 1, rows);
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Results
// ─────────────────────────────────────────────────────────────────────────────

/// One rendered line of an execution's result tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub depth: usize,
    pub id: String,
    pub display_name: String,
    pub status: Option<ResultStatus>,
    pub duration_millis: u64,
    /// Shows the "Nested" badge
    pub nested: bool,
    /// Leaf counts for containers
    pub counts: Option<Counts>,
    pub error_message: Option<String>,
    pub stack_trace: Option<String>,
    pub stdout: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ResultsPanel {
    /// Execution list load status (data lives in the execution cache)
    pub list: Panel,
    /// Cursor over the filtered execution list
    pub cursor: usize,
    pub selected: Option<String>,
    /// Detail load status (data lives in the execution cache)
    pub detail: Panel,
    pub node_cursor: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// AppState
// ─────────────────────────────────────────────────────────────────────────────

/// Complete application state (the Model in TEA)
#[derive(Debug, Default)]
pub struct AppState {
    pub settings: Settings,
    pub active_view: View,
    pub focus: Focus,
    pub ui_mode: UiMode,

    pub catalog: CatalogState,
    pub class_panel: ClassPanel,
    pub results: ResultsPanel,

    pub executions: ExecutionCache,
    pub dashboard: DashboardCache,
    pub dashboard_panel: Panel,
    pub dashboard_cursor: usize,
    pub poller: DashboardPoller,

    pub filter: FilterState,
    /// Text being typed into a filter field
    pub input_buffer: String,

    /// Blocking notification; dismissed with Enter/Esc
    pub alert: Option<String>,
    /// Transient status bar message
    pub status_message: Option<String>,
    pub run_in_flight: bool,
    pub refresh_in_flight: bool,
    /// Incremented on every tick; drives the loading spinner
    pub tick_count: u64,

    quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("Alert: {}", message);
        self.alert = Some(message);
    }

    /// Cached executions passing the current filter, in cache order
    pub fn filtered_executions(&self) -> Vec<&ExecutionSummary> {
        self.executions
            .executions()
            .map(|list| apply_filter(list, &self.filter))
            .unwrap_or_default()
    }

    /// Execution under the list cursor
    pub fn execution_under_cursor(&self) -> Option<&ExecutionSummary> {
        self.filtered_executions().get(self.results.cursor).copied()
    }

    pub fn clamp_results_cursor(&mut self) {
        let len = self.filtered_executions().len();
        self.results.cursor = self.results.cursor.min(len.saturating_sub(1));
    }

    /// Flattened, sentinel-free result tree of the selected execution
    pub fn result_rows(&self) -> Vec<ResultRow> {
        let Some(selected) = self.results.selected.as_deref() else {
            return Vec::new();
        };
        let Some(results) = self.executions.detail_for(selected) else {
            return Vec::new();
        };
        let grouped = group_by_test_class(&results.results);
        let mut rows = Vec::new();
        push_result_rows(&grouped, 0, &mut rows);
        rows
    }

    pub fn selected_result_row(&self) -> Option<ResultRow> {
        self.result_rows().into_iter().nth(self.results.node_cursor)
    }

    /// Recent executions shown on the dashboard
    pub fn dashboard_executions(&self) -> &[ExecutionSummary] {
        self.dashboard
            .get()
            .map(|d| d.recent_executions.as_slice())
            .unwrap_or(&[])
    }
}

fn push_result_rows(nodes: &[ResultNode], depth: usize, rows: &mut Vec<ResultRow>) {
    for node in nodes {
        let row = match node {
            ResultNode::Test(leaf) => ResultRow {
                depth,
                id: leaf.id.clone(),
                display_name: leaf.display_name.clone(),
                status: leaf.status,
                duration_millis: leaf.duration_millis,
                nested: false,
                counts: None,
                error_message: leaf.error_message.clone(),
                stack_trace: leaf.stack_trace.clone(),
                stdout: leaf.stdout.clone(),
            },
            ResultNode::Container(container) => ResultRow {
                depth,
                id: container.id.clone(),
                display_name: container.display_name.clone(),
                status: container.status,
                duration_millis: container.duration_millis,
                nested: is_nested_class_node(node),
                counts: Some(aggregate(node)),
                error_message: container.error_message.clone(),
                stack_trace: None,
                stdout: None,
            },
        };
        rows.push(row);
        push_result_rows(node.children(), depth + 1, rows);
    }
}

//! Test utilities for TUI rendering verification
//!
//! Widgets and full frames are rendered into ratatui's `TestBackend` and
//! inspected as text.

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{Frame, Terminal};
use testdeck_app::AppState;
use testdeck_core::{
    CatalogNode, ClassDetail, ExecutionResults, MethodNode, NestedClassGroup, ResultNode,
    ResultStatus, TestMethod,
};

/// Standard test terminal size
pub const TEST_WIDTH: u16 = 120;
pub const TEST_HEIGHT: u16 = 32;

/// Wrapper around a `TestBackend` terminal
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draw a full frame, e.g. with `render::view`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        line_content(self.buffer(), line).contains(text)
    }

    /// Index of the first line containing `text`
    pub fn find_line(&self, text: &str) -> Option<u16> {
        let buffer = self.buffer();
        (0..buffer.area.height).find(|&y| line_content(buffer, y).contains(text))
    }

    /// All content as a string (for debugging failed assertions)
    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        result.push_str(&line_content(buffer, y));
        result.push('\n');
    }
    result
}

fn line_content(buffer: &Buffer, line: u16) -> String {
    let mut result = String::new();
    if line < buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, line)].symbol());
        }
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────────────────────────

/// `com.acme` with two classes and a `billing` sub-package
pub fn test_catalog() -> Vec<CatalogNode> {
    vec![CatalogNode::package(
        "com.acme",
        vec![
            CatalogNode::class("com.acme.FooTest"),
            CatalogNode::class("com.acme.BarTest"),
            CatalogNode::package(
                "billing",
                vec![CatalogNode::class("com.acme.billing.InvoiceTest")],
            ),
        ],
    )]
}

pub fn test_class_detail() -> ClassDetail {
    ClassDetail {
        class_name: "FooTest".to_string(),
        full_class_name: "com.acme.FooTest".to_string(),
        methods: vec![
            MethodNode::Method(TestMethod {
                unique_id: "[method:shouldAdd()]".to_string(),
                display_name: "shouldAdd()".to_string(),
                method_name: "shouldAdd".to_string(),
            }),
            MethodNode::NestedClass(NestedClassGroup {
                display_name: "WhenEmpty".to_string(),
                unique_id: None,
                children: vec![MethodNode::Method(TestMethod {
                    unique_id: "[method:returnsZero()]".to_string(),
                    display_name: "returnsZero()".to_string(),
                    method_name: "returnsZero".to_string(),
                })],
            }),
        ],
    }
}

/// Engine sentinel → FooTest → (passing leaf, failing leaf, nested class)
pub fn test_results() -> ExecutionResults {
    let mut failing = ResultNode::leaf("t2", "shouldReject()", ResultStatus::Failed);
    if let ResultNode::Test(leaf) = &mut failing {
        leaf.error_message = Some("expected: <1> but was: <2>".to_string());
        leaf.stack_trace = Some("org.opentest4j.AssertionFailedError".to_string());
    }
    ExecutionResults::new(vec![ResultNode::container(
        "[engine:junit-jupiter]",
        "JUnit Jupiter",
        vec![ResultNode::container(
            "c1",
            "FooTest",
            vec![
                ResultNode::leaf("t1", "shouldAdd()", ResultStatus::Success),
                failing,
                ResultNode::container(
                    "[class:com.acme.FooTest]/[nested-class:WhenEmpty]",
                    "WhenEmpty",
                    vec![ResultNode::leaf("t3", "returnsZero()", ResultStatus::Skipped)],
                ),
            ],
        )],
    )])
}

pub fn create_test_state() -> AppState {
    AppState::new()
}

/// State with the catalog loaded
pub fn state_with_catalog() -> AppState {
    let mut state = create_test_state();
    state.catalog.set_tree(test_catalog());
    state.catalog.panel.begin_load();
    state.catalog.panel.ready();
    state
}

//! Browser widget over [`MergeEditor`].
//!
//! `GridMergeWidget` mounts an N×N grid of `<div>` cells into a container and
//! wires the drag gesture:
//! - `mousedown` on a cell starts a selection
//! - `mouseenter` on a cell with the primary button held extends it
//! - `mouseup` anywhere in the document ends it (drags may leave the grid)
//!
//! Buttons and the size input belong to the host page, which calls the
//! exported `merge`/`reset`/`generate`/`save`/`set_size` methods. Generated
//! code is typed into a separate element on a `setTimeout` chain.

mod download;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent};

use crate::codegen::{RevealToken, Tick};
use crate::config::EditorConfig;
use crate::editor::MergeEditor;
use crate::types::{CellKind, GridCell};

use download::BrowserDownload;

/// Edge length of one grid cell in CSS pixels.
const CELL_SIZE_PX: u32 = 40;

/// Primary button bit in `MouseEvent.buttons`.
const PRIMARY_BUTTON: u16 = 1;

/// Shared state reachable from event and timer closures.
pub(crate) struct WidgetState {
    pub(crate) editor: MergeEditor,
    pub(crate) document: Document,
    pub(crate) grid_el: HtmlElement,
    pub(crate) code_el: HtmlElement,
    /// Cell elements in row-major order, rebuilt with the grid
    pub(crate) cells: Vec<HtmlElement>,
    pub(crate) cell_closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
    pub(crate) reveal_token: Option<RevealToken>,
    pub(crate) reveal_timer: Option<i32>,
    pub(crate) reveal_closure: Option<Closure<dyn FnMut()>>,
}

/// The merge-grid widget exported to JavaScript.
#[wasm_bindgen]
pub struct GridMergeWidget {
    state: Rc<RefCell<WidgetState>>,
    mouseup_closure: Closure<dyn FnMut(MouseEvent)>,
}

fn duration_to_ms(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[wasm_bindgen]
impl GridMergeWidget {
    /// Mount a widget into `container`; generated code is shown in `code_block`.
    ///
    /// `config` is an optional `{ gridSize, baseDelayMs, fileName }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        code_block: HtmlElement,
        config: JsValue,
    ) -> Result<GridMergeWidget, JsValue> {
        console_error_panic_hook::set_once();

        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?
        };

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;

        let grid_el: HtmlElement = document.create_element("div")?.dyn_into()?;
        grid_el.set_class_name("gm-grid");
        let style = grid_el.style();
        let _ = style.set_property("display", "inline-grid");
        let _ = style.set_property("user-select", "none");
        let _ = style.set_property("-webkit-user-select", "none");
        container.append_child(&grid_el)?;

        let state = Rc::new(RefCell::new(WidgetState {
            editor: MergeEditor::new(config),
            document: document.clone(),
            grid_el,
            code_el: code_block,
            cells: Vec::new(),
            cell_closures: Vec::new(),
            reveal_token: None,
            reveal_timer: None,
            reveal_closure: None,
        }));

        Self::rebuild_grid(&state)?;

        // Drags may end outside the grid, so listen on the whole document.
        let mouseup_closure = {
            let weak_state = Rc::downgrade(&state);
            let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
                if let Some(state) = weak_state.upgrade() {
                    Self::internal_mouse_up(&state);
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            document
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure
        };

        Ok(GridMergeWidget {
            state,
            mouseup_closure,
        })
    }

    /// Rebuild the grid at `n`×`n`. Values below 1 are ignored.
    #[wasm_bindgen(js_name = "setSize")]
    pub fn set_size(&mut self, n: i32) -> Result<bool, JsValue> {
        let applied = {
            let mut s = self.state.borrow_mut();
            let applied = s.editor.set_size(i64::from(n));
            if applied {
                s.reveal_token = None;
                if let (Some(timer_id), Some(window)) = (s.reveal_timer.take(), web_sys::window())
                {
                    window.clear_timeout_with_handle(timer_id);
                }
                s.code_el.set_text_content(Some(""));
            }
            applied
        };
        if applied {
            Self::rebuild_grid(&self.state)?;
        }
        Ok(applied)
    }

    /// Merge the current selection. Shows an alert and returns `false` when
    /// the selection is rejected; an empty selection returns `false` quietly.
    pub fn merge(&mut self) -> Result<bool, JsValue> {
        let result = self.state.borrow_mut().editor.commit_merge();
        match result {
            Ok(region) => {
                Self::refresh(&self.state);
                Ok(region.is_some())
            }
            Err(e) if e.is_validation() => {
                tracing::warn!(error = %e, "merge rejected");
                alert(&e.to_string());
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Clear all merges and the selection.
    pub fn reset(&mut self) {
        self.state.borrow_mut().editor.reset();
        Self::refresh(&self.state);
    }

    /// Generate the HTML document and start typing it into the code block.
    pub fn generate(&mut self) {
        {
            let mut s = self.state.borrow_mut();
            let token = s.editor.generate_code();
            s.reveal_token = Some(token);
            s.code_el.set_text_content(Some(""));
        }
        Self::schedule_reveal(&self.state, 0);
    }

    /// Show the rest of the generated code immediately.
    #[wasm_bindgen(js_name = "skipReveal")]
    pub fn skip_reveal(&mut self) {
        let mut s = self.state.borrow_mut();
        s.editor.finish_reveal();
        s.reveal_token = None;
        if let (Some(timer_id), Some(window)) = (s.reveal_timer.take(), web_sys::window()) {
            window.clear_timeout_with_handle(timer_id);
        }
        s.code_el.set_text_content(Some(s.editor.displayed_code()));
    }

    /// Offer the generated document as a download.
    pub fn save(&self) -> Result<(), JsValue> {
        let s = self.state.borrow();
        let mut sink = BrowserDownload::new(&s.document);
        match s.editor.export_as_file(&mut sink) {
            Ok(()) => Ok(()),
            Err(crate::error::GridMergeError::NothingGenerated) => {
                alert("generate code before saving");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn size(&self) -> u32 {
        self.state.borrow().editor.size()
    }

    /// Committed regions as an array of `{startRow, startCol, endRow, endCol, rowSpan, colSpan}`.
    pub fn regions(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.state.borrow().editor.regions())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    #[wasm_bindgen(js_name = "generatedCode")]
    pub fn generated_code(&self) -> Option<String> {
        self.state
            .borrow()
            .editor
            .generated_code()
            .map(str::to_string)
    }

    #[wasm_bindgen(js_name = "displayedCode")]
    pub fn displayed_code(&self) -> String {
        self.state.borrow().editor.displayed_code().to_string()
    }

    #[wasm_bindgen(js_name = "isTyping")]
    pub fn is_typing(&self) -> bool {
        self.state.borrow().editor.is_typing()
    }
}

impl GridMergeWidget {
    fn rebuild_grid(state: &Rc<RefCell<WidgetState>>) -> Result<(), JsValue> {
        {
            let weak_state = Rc::downgrade(state);
            let mut s = state.borrow_mut();
            s.grid_el.set_inner_html("");
            s.cells.clear();
            s.cell_closures.clear();

            let size = s.editor.size();
            let _ = s.grid_el.style().set_property(
                "grid-template-columns",
                &format!("repeat({size}, {CELL_SIZE_PX}px)"),
            );
            let _ = s
                .grid_el
                .style()
                .set_property("grid-auto-rows", &format!("{CELL_SIZE_PX}px"));

            let cells: Vec<GridCell> = s.editor.cells().collect();
            for cell in cells {
                let el: HtmlElement = s.document.create_element("div")?.dyn_into()?;
                el.set_id(&cell.id);
                let _ = el.style().set_property("box-sizing", "border-box");
                let _ = el.style().set_property("border", "1px solid #999");

                let (row, col) = (cell.row, cell.col);

                let down_state = weak_state.clone();
                let down = Closure::wrap(Box::new(move |event: MouseEvent| {
                    // Keep the browser from starting a text selection.
                    event.prevent_default();
                    if let Some(state) = down_state.upgrade() {
                        Self::internal_mouse_down(&state, row, col);
                    }
                }) as Box<dyn FnMut(MouseEvent)>);
                el.add_event_listener_with_callback("mousedown", down.as_ref().unchecked_ref())?;

                let enter_state = weak_state.clone();
                let enter = Closure::wrap(Box::new(move |event: MouseEvent| {
                    if event.buttons() & PRIMARY_BUTTON == 0 {
                        return;
                    }
                    if let Some(state) = enter_state.upgrade() {
                        Self::internal_mouse_enter(&state, row, col);
                    }
                }) as Box<dyn FnMut(MouseEvent)>);
                el.add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref())?;

                s.grid_el.append_child(&el)?;
                s.cells.push(el);
                s.cell_closures.push(down);
                s.cell_closures.push(enter);
            }
        }
        Self::refresh(state);
        Ok(())
    }

    /// Sync cell classes and spans with the editor.
    fn refresh(state: &Rc<RefCell<WidgetState>>) {
        let s = state.borrow();
        for (cell, el) in s.editor.cells().zip(s.cells.iter()) {
            let class = s.editor.classify(cell.row, cell.col);
            el.set_class_name(class.css_classes());
            let style = el.style();

            if class.kind == CellKind::Occluded {
                let _ = style.set_property("display", "none");
                continue;
            }
            let _ = style.set_property("display", "block");

            let (row_span, col_span) = s
                .editor
                .registry()
                .anchor_at(cell.position())
                .map_or((1, 1), |region| (region.row_span, region.col_span));
            let _ = style.set_property("grid-row", &format!("span {row_span}"));
            let _ = style.set_property("grid-column", &format!("span {col_span}"));

            let background = match (class.kind, class.selected) {
                (_, true) => "#cfe2ff",
                (CellKind::Merged, false) => "#e8f0fe",
                _ => "#fff",
            };
            let _ = style.set_property("background", background);
        }
    }

    fn internal_mouse_down(state: &Rc<RefCell<WidgetState>>, row: u32, col: u32) {
        state.borrow_mut().editor.begin_selection(row, col);
        Self::refresh(state);
    }

    fn internal_mouse_enter(state: &Rc<RefCell<WidgetState>>, row: u32, col: u32) {
        {
            let mut s = state.borrow_mut();
            if !s.editor.is_dragging() {
                return;
            }
            s.editor.extend_selection(row, col);
        }
        Self::refresh(state);
    }

    fn internal_mouse_up(state: &Rc<RefCell<WidgetState>>) {
        state.borrow_mut().editor.end_selection();
    }

    fn schedule_reveal(state: &Rc<RefCell<WidgetState>>, delay_ms: i32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        if let Some(timer_id) = s.reveal_timer.take() {
            window.clear_timeout_with_handle(timer_id);
        }
        if s.reveal_closure.is_none() {
            let weak_state = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    GridMergeWidget::handle_reveal_tick(&state);
                }
            }) as Box<dyn FnMut()>);
            s.reveal_closure = Some(closure);
        }
        let Some(callback) = s.reveal_closure.as_ref() else {
            return;
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms,
        ) {
            Ok(id) => s.reveal_timer = Some(id),
            Err(_) => s.reveal_timer = None,
        }
    }

    fn handle_reveal_tick(state: &Rc<RefCell<WidgetState>>) {
        let next = {
            let mut s = state.borrow_mut();
            s.reveal_timer = None;
            let Some(token) = s.reveal_token else {
                return;
            };
            let tick = s.editor.reveal_step(token);
            s.code_el.set_text_content(Some(s.editor.displayed_code()));
            match tick {
                Some(Tick {
                    next: Some(delay), ..
                }) => Some(delay),
                _ => {
                    s.reveal_token = None;
                    None
                }
            }
        };
        if let Some(delay) = next {
            Self::schedule_reveal(state, duration_to_ms(delay));
        }
    }
}

impl Drop for GridMergeWidget {
    fn drop(&mut self) {
        let Ok(s) = self.state.try_borrow() else {
            return;
        };
        if let (Some(timer_id), Some(window)) = (s.reveal_timer, web_sys::window()) {
            window.clear_timeout_with_handle(timer_id);
        }
        let _ = s.document.remove_event_listener_with_callback(
            "mouseup",
            self.mouseup_closure.as_ref().unchecked_ref(),
        );
        s.grid_el.remove();
    }
}

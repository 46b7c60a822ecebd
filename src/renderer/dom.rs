//! DOM display backend
//!
//! Every entity is an absolutely positioned `<div>` inside the game area,
//! styled by class name. The player is the page's existing `#frog` element.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::{Display, DisplayError, EntityKind, Handle, Hud, Style};
use crate::WorldSize;
use crate::sim::GamePhase;

const PLAYER_ID: &str = "frog";

pub struct DomDisplay {
    document: Document,
    area: HtmlElement,
    nodes: HashMap<Handle, HtmlElement>,
    next_handle: u32,
}

impl DomDisplay {
    /// Attach to the element with id `area_id`
    pub fn new(area_id: &'static str) -> Result<Self, DisplayError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(DisplayError::Backend("no document".into()))?;
        let area = document
            .get_element_by_id(area_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or(DisplayError::MissingElement(area_id))?;
        Ok(Self {
            document,
            area,
            nodes: HashMap::new(),
            next_handle: 1,
        })
    }

    /// Size of the game area in CSS pixels
    pub fn world_size(&self) -> WorldSize {
        let width = self.area.client_width();
        let height = self.area.client_height();
        if width <= 0 || height <= 0 {
            return WorldSize::default();
        }
        WorldSize::new(width as f32, height as f32)
    }

    fn element(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        if let Some(el) = self.element(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn insert(&mut self, el: HtmlElement) -> Handle {
        let handle = Handle(self.next_handle);
        self.next_handle += 1;
        self.nodes.insert(handle, el);
        handle
    }
}

fn px(value: f32) -> String {
    format!("{}px", value)
}

impl Display for DomDisplay {
    fn create_entity(&mut self, kind: EntityKind, style: &Style) -> Result<Handle, DisplayError> {
        if kind == EntityKind::Player {
            let el = self
                .element(PLAYER_ID)
                .ok_or(DisplayError::MissingElement(PLAYER_ID))?;
            return Ok(self.insert(el));
        }

        let el = self
            .document
            .create_element("div")
            .map_err(|e| DisplayError::Backend(format!("{:?}", e)))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| DisplayError::Backend("div is not an HtmlElement".into()))?;
        el.set_class_name(&kind.class_name());
        let css = el.style();
        if let Some(width) = style.width {
            let _ = css.set_property("width", &px(width));
        }
        if let Some(height) = style.height {
            let _ = css.set_property("height", &px(height));
        }
        self.area
            .append_child(&el)
            .map_err(|e| DisplayError::Backend(format!("{:?}", e)))?;
        Ok(self.insert(el))
    }

    fn set_position(&mut self, handle: Handle, x: f32, y: f32) {
        if let Some(el) = self.nodes.get(&handle) {
            let css = el.style();
            let _ = css.set_property("left", &px(x));
            let _ = css.set_property("top", &px(y));
        }
    }

    fn remove(&mut self, handle: Handle) -> Result<(), DisplayError> {
        let el = self
            .nodes
            .remove(&handle)
            .ok_or(DisplayError::UnknownHandle(handle))?;
        el.remove();
        Ok(())
    }

    fn query_height(&self, handle: Handle) -> Option<f32> {
        let height = self.nodes.get(&handle)?.offset_height();
        (height > 0).then_some(height as f32)
    }

    fn show_hud(&mut self, hud: &Hud) {
        self.set_text("score", &hud.score.to_string());
        self.set_text("high-score", &format!("Best: {}", hud.best));
        self.set_hidden("start-message", hud.phase != GamePhase::Idle);
        self.set_hidden("game-over", hud.phase != GamePhase::GameOver);
        if hud.phase == GamePhase::GameOver {
            self.set_text("final-score", &hud.score.to_string());
            self.set_text("final-high-score", &hud.best.to_string());
        }
        match &hud.diagnostics {
            Some(line) => {
                self.set_text("fps-counter", line);
                self.set_hidden("fps-counter", false);
            }
            None => self.set_hidden("fps-counter", true),
        }
    }
}

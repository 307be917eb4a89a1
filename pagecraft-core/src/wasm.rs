//! WebAssembly bindings for pagecraft-core.
//!
//! The page shell forwards DOM events here and re-renders the canvas and
//! properties panel from the returned markup.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::state::SAVE_NOTICE;
use crate::{BuilderState, Download, DropPayload, ElementId, FormValues, Target};

/// Initialize the builder WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();
}

/// Builder instance for WASM.
#[wasm_bindgen]
pub struct WasmBuilder {
    state: BuilderState,
}

#[wasm_bindgen]
impl WasmBuilder {
    /// Create a new, empty builder.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: BuilderState::new(),
        }
    }

    /// Handle a drop. `target_id` is the element under the pointer, if any.
    /// Returns the id of the created element.
    #[wasm_bindgen(js_name = handleDrop)]
    #[must_use]
    pub fn handle_drop(
        &mut self,
        uri_list: Option<String>,
        text: Option<String>,
        element_id: Option<String>,
        target_id: Option<String>,
    ) -> Option<String> {
        let payload = DropPayload {
            uri_list,
            text,
            element_id,
        };
        let target = target_id.map_or(Target::Background, |id| Target::Element(id.into()));
        self.state
            .handle_drop(&payload, &target)
            .map(|id| id.to_string())
    }

    /// Select the clicked element. Returns `false` if it no longer exists.
    #[wasm_bindgen(js_name = clickElement)]
    pub fn click_element(&mut self, id: &str) -> bool {
        self.state.select(&ElementId::from(id)).is_ok()
    }

    /// Background or placeholder click: clear the selection.
    #[wasm_bindgen(js_name = clickBackground)]
    pub fn click_background(&mut self) {
        self.state.deselect_all();
    }

    /// Delete affordance. Returns `false` if the element no longer exists.
    #[wasm_bindgen(js_name = deleteElement)]
    pub fn delete_element(&mut self, id: &str) -> bool {
        self.state.delete(&ElementId::from(id)).is_ok()
    }

    /// Markup for the properties panel.
    #[wasm_bindgen(js_name = propertiesHtml)]
    #[must_use]
    pub fn properties_html(&self) -> String {
        self.state.properties().to_html()
    }

    /// The properties panel as JSON.
    #[wasm_bindgen(js_name = propertiesJson)]
    #[must_use]
    pub fn properties_json(&self) -> String {
        serde_json::to_string(&self.state.properties()).unwrap_or_default()
    }

    /// Apply a submitted form (JSON object of field name to value) to the
    /// selection. Returns the number of fields that took effect.
    ///
    /// # Errors
    ///
    /// Returns an error string if JSON parsing fails.
    #[wasm_bindgen(js_name = applyProperties)]
    pub fn apply_properties(&mut self, json: &str) -> Result<usize, String> {
        let values: FormValues = serde_json::from_str(json).map_err(|e| e.to_string())?;
        Ok(self
            .state
            .apply_to_selection(&values)
            .map_or(0, |(_, fields)| fields))
    }

    /// Markup for the editing surface.
    #[wasm_bindgen(js_name = canvasHtml)]
    #[must_use]
    pub fn canvas_html(&self) -> String {
        self.state.canvas_html()
    }

    /// Open the preview modal and return its content.
    #[wasm_bindgen(js_name = previewHtml)]
    pub fn preview_html(&mut self) -> String {
        self.state.open_preview()
    }

    /// Close the preview modal.
    #[wasm_bindgen(js_name = closePreview)]
    pub fn close_preview(&mut self) {
        self.state.close_preview();
    }

    /// The standalone HTML document.
    #[wasm_bindgen(js_name = fullDocument)]
    #[must_use]
    pub fn full_document(&self) -> String {
        self.state.full_document()
    }

    /// Confirm the save and download the document.
    ///
    /// # Errors
    ///
    /// Returns the JS exception if the browser refuses any step.
    pub fn save(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        window.alert_with_message(SAVE_NOTICE)?;
        offer_download(&window, &self.state.save())
    }
}

impl Default for WasmBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Click a temporary link to an object URL, then release the URL at once.
fn offer_download(window: &web_sys::Window, download: &Download) -> Result<(), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(JsValue::from)?;

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(&download.mime);
    let parts = js_sys::Array::of1(&JsValue::from_str(&download.body));
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    anchor.set_href(&url);
    anchor.set_download(&download.file_name);
    anchor.click();
    web_sys::Url::revoke_object_url(&url)
}

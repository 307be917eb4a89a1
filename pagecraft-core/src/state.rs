//! Builder state and action dispatch.

use crate::apply::apply;
use crate::event::{Action, DropPayload, Outcome, Target};
use crate::export::{Download, ExportConfig, PageExporter};
use crate::form::{FormSpec, PropertiesPanel};
use crate::markup::render_canvas;
use crate::{Canvas, CanvasError, CanvasResult, Element, ElementFactory, ElementId, FormValues};

/// Confirmation shown when the page is saved.
pub const SAVE_NOTICE: &str =
    "Website saved! In a real application, this would save your website to a server.";

/// The complete builder state: canvas, id source, and preview modal.
///
/// Every handler runs to completion before the next one; there is no shared
/// mutable state outside this struct.
#[derive(Debug, Clone)]
pub struct BuilderState {
    canvas: Canvas,
    factory: ElementFactory,
    exporter: PageExporter,
    preview_open: bool,
}

impl BuilderState {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_factory(ElementFactory::new())
    }

    /// Create an empty builder with a custom element factory.
    #[must_use]
    pub fn with_factory(factory: ElementFactory) -> Self {
        Self {
            canvas: Canvas::new(),
            factory,
            exporter: PageExporter::with_defaults(),
            preview_open: false,
        }
    }

    /// Replace the export configuration.
    #[must_use]
    pub fn with_export_config(mut self, config: ExportConfig) -> Self {
        self.exporter = PageExporter::new(config);
        self
    }

    /// Restore a builder from a canvas snapshot.
    ///
    /// New ids continue after the highest counter found in the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is not valid JSON for a canvas.
    pub fn from_snapshot(json: &str) -> CanvasResult<Self> {
        Self::restore(json, ElementFactory::new())
    }

    /// Restore a snapshot using a custom element factory.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is not valid JSON for a canvas.
    pub fn restore(json: &str, factory: ElementFactory) -> CanvasResult<Self> {
        let canvas = Canvas::from_json(json)?;
        let factory = factory.resume_after(canvas.elements().map(Element::id));
        tracing::debug!(elements = canvas.len(), "restored canvas snapshot");
        Ok(Self {
            canvas,
            ..Self::with_factory(factory)
        })
    }

    /// Serialize the canvas for debugging or later restore.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn snapshot_json(&self) -> CanvasResult<String> {
        self.canvas.to_json()
    }

    /// The canvas model.
    #[must_use]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Whether the preview modal is open.
    #[must_use]
    pub fn preview_open(&self) -> bool {
        self.preview_open
    }

    /// Handle a drop on the canvas. Returns the new element, if one was made.
    ///
    /// An image URL wins over everything else and is always appended. A type
    /// tag is placed after the element it landed on, or at the end. Anything
    /// else is ignored.
    pub fn handle_drop(&mut self, payload: &DropPayload, target: &Target) -> Option<ElementId> {
        if let Some(url) = payload.image_url() {
            let element = self.factory.create_image(url);
            let id = self.canvas.append(element);
            tracing::debug!(element = %id, url, "created image from dropped url");
            self.select_new(&id);
            return Some(id);
        }

        let Some(tag) = payload.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            if let Some(moved) = &payload.element_id {
                tracing::debug!(element = %moved, "reorder by move handle is not supported");
            }
            return None;
        };

        let element = match self.factory.create(tag) {
            Ok(element) => element,
            Err(err) => {
                tracing::debug!(%err, "ignoring drop");
                return None;
            }
        };

        let id = match target {
            Target::Background | Target::Placeholder => self.canvas.append(element),
            Target::Element(existing) => self.canvas.place(element, Some(existing)),
        };
        tracing::debug!(element = %id, tag, position = ?self.canvas.position(&id), "placed element");
        self.select_new(&id);
        Some(id)
    }

    fn select_new(&mut self, id: &ElementId) {
        if let Err(err) = self.canvas.select(id) {
            tracing::warn!(%err, "new element could not be selected");
        }
    }

    /// Select an element and return its properties form.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found; the selection is unchanged.
    pub fn select(&mut self, id: &ElementId) -> CanvasResult<FormSpec> {
        self.canvas.select(id)?;
        self.canvas
            .selected()
            .map(FormSpec::for_element)
            .ok_or_else(|| CanvasError::ElementNotFound(id.to_string()))
    }

    /// Clear the selection; the properties panel goes back to its prompt.
    pub fn deselect_all(&mut self) -> Option<ElementId> {
        self.canvas.deselect_all()
    }

    /// Remove an element, clearing the selection if it was selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn delete(&mut self, id: &ElementId) -> CanvasResult<Element> {
        self.canvas.remove(id)
    }

    /// Apply a form submission to a specific element.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn apply_to(&mut self, id: &ElementId, values: &FormValues) -> CanvasResult<usize> {
        let element = self
            .canvas
            .get_mut(id)
            .ok_or_else(|| CanvasError::ElementNotFound(id.to_string()))?;
        Ok(apply(element, values))
    }

    /// Apply a form submission to the current selection.
    ///
    /// Returns `None` when nothing is selected.
    pub fn apply_to_selection(&mut self, values: &FormValues) -> Option<(ElementId, usize)> {
        let element = self.canvas.selected_mut()?;
        let fields = apply(element, values);
        Some((element.id().clone(), fields))
    }

    /// What the properties panel shows for the current selection.
    #[must_use]
    pub fn properties(&self) -> PropertiesPanel {
        self.canvas
            .selected()
            .map_or(PropertiesPanel::Empty, |element| {
                PropertiesPanel::Form(FormSpec::for_element(element))
            })
    }

    /// The editing surface markup.
    #[must_use]
    pub fn canvas_html(&self) -> String {
        render_canvas(&self.canvas)
    }

    /// The clean fragment used for preview.
    #[must_use]
    pub fn clean_export(&self) -> String {
        self.exporter.clean_export(&self.canvas)
    }

    /// The standalone HTML document.
    #[must_use]
    pub fn full_document(&self) -> String {
        self.exporter.full_document(&self.canvas)
    }

    /// Open the preview modal and return its content.
    pub fn open_preview(&mut self) -> String {
        self.preview_open = true;
        self.clean_export()
    }

    /// Close the preview modal. The canvas is untouched.
    pub fn close_preview(&mut self) {
        self.preview_open = false;
    }

    /// "Save" the page: a confirmation and the document as a download.
    ///
    /// No network call is made.
    #[must_use]
    pub fn save(&self) -> Download {
        let download = self.exporter.download(&self.canvas);
        tracing::info!(
            file = %download.file_name,
            bytes = download.body.len(),
            elements = self.canvas.len(),
            "saving page"
        );
        download
    }

    fn click(&mut self, target: &Target) -> Outcome {
        match target {
            Target::Background | Target::Placeholder => match self.deselect_all() {
                Some(_) => Outcome::Deselected,
                None => Outcome::Nothing,
            },
            Target::Element(id) => match self.select(id) {
                Ok(_) => Outcome::Selected { id: id.clone() },
                Err(err) => {
                    tracing::debug!(%err, "ignoring click");
                    Outcome::Nothing
                }
            },
        }
    }

    /// Run one user action to completion.
    ///
    /// Nothing here fails loudly: anything that cannot happen is logged and
    /// reported as [`Outcome::Nothing`].
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        match action {
            Action::Drop { payload, target } => self
                .handle_drop(&payload, &target)
                .map_or(Outcome::Nothing, |id| Outcome::Created { id }),
            Action::Click { target } => self.click(&target),
            Action::Delete { id } => match self.delete(&id) {
                Ok(_) => Outcome::Deleted { id },
                Err(err) => {
                    tracing::debug!(%err, "ignoring delete");
                    Outcome::Nothing
                }
            },
            Action::Apply { values } => self
                .apply_to_selection(&values)
                .map_or(Outcome::Nothing, |(id, fields)| Outcome::Applied { id, fields }),
            Action::Preview => Outcome::Preview {
                html: self.open_preview(),
            },
            Action::ClosePreview => {
                self.close_preview();
                Outcome::PreviewClosed
            }
            Action::Save => Outcome::Saved {
                notice: SAVE_NOTICE.to_string(),
                download: self.save(),
            },
        }
    }
}

impl Default for BuilderState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Clock;
    use crate::ElementType;

    fn builder() -> BuilderState {
        BuilderState::with_factory(ElementFactory::with_clock(Clock::Fixed(42)))
    }

    fn drop_tag(state: &mut BuilderState, tag: &str, target: Target) -> Option<ElementId> {
        state.handle_drop(&DropPayload::type_tag(tag), &target)
    }

    fn types(state: &BuilderState) -> Vec<ElementType> {
        state.canvas().elements().map(Element::element_type).collect()
    }

    #[test]
    fn test_drop_on_background_appends_and_selects() {
        let mut state = builder();
        let a = drop_tag(&mut state, "heading", Target::Placeholder).expect("created");
        let b = drop_tag(&mut state, "paragraph", Target::Background).expect("created");
        assert_eq!(types(&state), [ElementType::Heading, ElementType::Paragraph]);
        assert_eq!(state.canvas().selected_id(), Some(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_drop_on_element_inserts_after_it() {
        let mut state = builder();
        let first = drop_tag(&mut state, "heading", Target::Background).expect("created");
        drop_tag(&mut state, "spacer", Target::Background).expect("created");
        drop_tag(&mut state, "button", Target::Element(first)).expect("created");
        assert_eq!(
            types(&state),
            [ElementType::Heading, ElementType::Button, ElementType::Spacer]
        );
    }

    #[test]
    fn test_drop_on_stale_element_appends() {
        let mut state = builder();
        drop_tag(&mut state, "heading", Target::Background);
        drop_tag(&mut state, "divider", Target::Element(ElementId::from("element-0-99")));
        assert_eq!(types(&state), [ElementType::Heading, ElementType::Divider]);
    }

    #[test]
    fn test_unknown_tag_and_move_payload_are_no_ops() {
        let mut state = builder();
        assert!(drop_tag(&mut state, "widget", Target::Background).is_none());
        let moved = DropPayload::moved(&ElementId::from("element-1-1"));
        assert!(state.handle_drop(&moved, &Target::Background).is_none());
        assert!(state.canvas().is_empty());
    }

    #[test]
    fn test_image_url_drop_wins_and_appends() {
        let mut state = builder();
        let first = drop_tag(&mut state, "heading", Target::Background).expect("created");
        drop_tag(&mut state, "spacer", Target::Background);
        let payload = DropPayload {
            uri_list: Some("https://x.com/photo.png?size=large".to_string()),
            text: Some("heading".to_string()),
            element_id: None,
        };
        let id = state
            .handle_drop(&payload, &Target::Element(first))
            .expect("created");
        assert_eq!(state.canvas().position(&id), Some(2));
        assert_eq!(state.canvas().selected_id(), Some(&id));
    }

    #[test]
    fn test_select_replaces_previous_selection() {
        let mut state = builder();
        let a = drop_tag(&mut state, "heading", Target::Background).expect("created");
        let b = drop_tag(&mut state, "spacer", Target::Background).expect("created");
        assert_eq!(state.canvas().selected_id(), Some(&b));
        let form = state.select(&a).expect("select");
        assert_eq!(form.element_type, ElementType::Heading);
        assert!(state.canvas().is_selected(&a));
        assert!(!state.canvas().is_selected(&b));
    }

    #[test]
    fn test_background_click_deselects() {
        let mut state = builder();
        drop_tag(&mut state, "heading", Target::Background);
        assert_eq!(
            state.dispatch(Action::Click {
                target: Target::Background
            }),
            Outcome::Deselected
        );
        assert_eq!(state.properties(), PropertiesPanel::Empty);
        assert_eq!(
            state.dispatch(Action::Click {
                target: Target::Background
            }),
            Outcome::Nothing
        );
    }

    #[test]
    fn test_apply_without_selection_is_no_op() {
        let mut state = builder();
        drop_tag(&mut state, "heading", Target::Background);
        state.deselect_all();
        let outcome = state.dispatch(Action::Apply {
            values: FormValues::from([("text", "Changed")]),
        });
        assert_eq!(outcome, Outcome::Nothing);
        assert!(state.clean_export().contains("Heading Text"));
    }

    #[test]
    fn test_preview_does_not_touch_canvas() {
        let mut state = builder();
        drop_tag(&mut state, "paragraph", Target::Background);
        let before = state.canvas().clone();
        let Outcome::Preview { html } = state.dispatch(Action::Preview) else {
            panic!("expected preview");
        };
        assert!(state.preview_open());
        assert!(html.starts_with("<div><p>"));
        assert_eq!(state.dispatch(Action::ClosePreview), Outcome::PreviewClosed);
        assert!(!state.preview_open());
        assert_eq!(state.canvas(), &before);
    }

    #[test]
    fn test_save_returns_notice_and_download() {
        let mut state = builder();
        drop_tag(&mut state, "button", Target::Background);
        match state.dispatch(Action::Save) {
            Outcome::Saved { notice, download } => {
                assert_eq!(notice, SAVE_NOTICE);
                assert_eq!(download.file_name, "my-website.html");
                assert!(download.body.contains("<button"));
            }
            other => panic!("expected save, got {other:?}"),
        }
    }

    #[test]
    fn test_restored_builder_issues_fresh_ids() {
        let mut state = builder();
        let heading = drop_tag(&mut state, "heading", Target::Background).expect("created");
        let json = state.snapshot_json().expect("serialize");

        let mut restored = BuilderState::restore(
            &json,
            ElementFactory::with_clock(Clock::Fixed(42)),
        )
        .expect("restore");
        let spacer = drop_tag(&mut restored, "spacer", Target::Background).expect("created");

        assert_ne!(heading, spacer);
        assert_eq!(restored.canvas().selected_id(), Some(&spacer));
        assert_eq!(
            restored.canvas().selected().map(Element::element_type),
            Some(ElementType::Spacer)
        );
        restored.delete(&heading).expect("delete heading");
        assert_eq!(types(&restored), [ElementType::Spacer]);
    }

    #[test]
    fn test_snapshot_round_trip_keeps_order() {
        let mut state = builder();
        drop_tag(&mut state, "heading", Target::Background);
        drop_tag(&mut state, "image", Target::Background);
        let json = state.snapshot_json().expect("serialize");
        let restored = BuilderState::from_snapshot(&json).expect("restore");
        assert_eq!(restored.canvas(), state.canvas());
    }
}

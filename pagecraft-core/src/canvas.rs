//! Ordered canvas model with single selection.

use serde::{Deserialize, Serialize};

use crate::{CanvasError, CanvasResult, Element, ElementId};

/// The working area: placed elements in display (and export) order.
///
/// The selection always points at a live element or is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    /// Elements in display order.
    elements: Vec<Element>,
    /// Currently selected element, if any.
    selected: Option<ElementId>,
}

impl Canvas {
    /// Create an empty canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element at the end.
    pub fn append(&mut self, element: Element) -> ElementId {
        self.insert_at(self.elements.len(), element)
    }

    /// Insert an element immediately after `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` is not on the canvas; the canvas is left
    /// unchanged and `element` is dropped.
    pub fn insert_after(&mut self, target: &ElementId, element: Element) -> CanvasResult<ElementId> {
        let index = self
            .position(target)
            .ok_or_else(|| CanvasError::ElementNotFound(target.to_string()))?;
        Ok(self.insert_at(index + 1, element))
    }

    /// Insert after `target` when it is on the canvas, otherwise append.
    pub fn place(&mut self, element: Element, target: Option<&ElementId>) -> ElementId {
        if let Some(t) = target {
            if let Some(index) = self.position(t) {
                return self.insert_at(index + 1, element);
            }
            tracing::warn!(target_id = %t, "drop target is gone, appending instead");
        }
        self.append(element)
    }

    fn insert_at(&mut self, index: usize, element: Element) -> ElementId {
        let id = element.id().clone();
        self.elements.insert(index, element);
        id
    }

    /// Remove an element, clearing the selection if it pointed at it.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn remove(&mut self, id: &ElementId) -> CanvasResult<Element> {
        let index = self
            .position(id)
            .ok_or_else(|| CanvasError::ElementNotFound(id.to_string()))?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        Ok(self.elements.remove(index))
    }

    /// Index of an element in display order.
    #[must_use]
    pub fn position(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Elements in display order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Select an element, replacing any previous selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn select(&mut self, id: &ElementId) -> CanvasResult<()> {
        if self.position(id).is_none() {
            return Err(CanvasError::ElementNotFound(id.to_string()));
        }
        self.selected = Some(id.clone());
        Ok(())
    }

    /// Clear the selection. Returns the previously selected id.
    pub fn deselect_all(&mut self) -> Option<ElementId> {
        self.selected.take()
    }

    /// The selected element id.
    #[must_use]
    pub fn selected_id(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    /// The selected element.
    #[must_use]
    pub fn selected(&self) -> Option<&Element> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// The selected element, mutably.
    pub fn selected_mut(&mut self) -> Option<&mut Element> {
        let id = self.selected.clone()?;
        self.get_mut(&id)
    }

    /// Whether `id` is the current selection.
    #[must_use]
    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Number of placed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the canvas is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether the empty-state placeholder is displayed.
    #[must_use]
    pub fn shows_placeholder(&self) -> bool {
        self.is_empty()
    }

    /// Serialize the canvas to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CanvasResult<String> {
        serde_json::to_string_pretty(self).map_err(CanvasError::Serialization)
    }

    /// Deserialize a canvas from JSON. A selection pointing at a missing
    /// element is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let mut canvas: Self = serde_json::from_str(json)?;
        if let Some(id) = canvas.selected.clone() {
            if canvas.position(&id).is_none() {
                canvas.selected = None;
            }
        }
        Ok(canvas)
    }
}

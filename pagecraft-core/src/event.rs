//! Builder actions and drag payloads.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::export::Download;
use crate::{ElementId, FormValues};

static HTTP_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("scheme pattern is valid"));

static IMAGE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|gif|svg|webp)(\?.*)?$").expect("extension pattern is valid")
});

/// Whether `url` is an http(s) link to an image file.
#[must_use]
pub fn is_image_url(url: &str) -> bool {
    HTTP_SCHEME.is_match(url) && IMAGE_EXTENSION.is_match(url)
}

/// Data carried by a drop, one field per drag carrier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropPayload {
    /// `text/uri-list` carrier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri_list: Option<String>,
    /// `text/plain` carrier: a block type tag or a URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// `application/element-id` carrier set by an element's move handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
}

impl DropPayload {
    /// A sidebar drag carrying a type tag.
    #[must_use]
    pub fn type_tag(tag: impl Into<String>) -> Self {
        Self {
            text: Some(tag.into()),
            ..Self::default()
        }
    }

    /// A drag from another page carrying a link.
    #[must_use]
    pub fn uri_list(list: impl Into<String>) -> Self {
        Self {
            uri_list: Some(list.into()),
            ..Self::default()
        }
    }

    /// A drag started from an element's move handle.
    #[must_use]
    pub fn moved(id: &ElementId) -> Self {
        Self {
            element_id: Some(id.to_string()),
            ..Self::default()
        }
    }

    /// The dropped URL: the first entry of the URI list, else the plain text.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        let from_list = self.uri_list.as_deref().and_then(|list| {
            list.lines()
                .map(str::trim)
                .find(|line| !line.is_empty() && !line.starts_with('#'))
        });
        from_list
            .or_else(|| self.text.as_deref().map(str::trim))
            .filter(|url| !url.is_empty())
    }

    /// The dropped URL if it points at an image.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.url().filter(|url| is_image_url(url))
    }
}

/// What a drop or click landed on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Target {
    /// The canvas background.
    #[default]
    Background,
    /// The empty-state placeholder.
    Placeholder,
    /// An element, or anything inside it.
    Element(ElementId),
}

/// A user interaction, dispatched through [`crate::BuilderState::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Drop a payload onto the canvas.
    Drop {
        /// Dragged data.
        payload: DropPayload,
        /// Where it landed.
        #[serde(default)]
        target: Target,
    },
    /// Click on the canvas.
    Click {
        /// What was clicked.
        target: Target,
    },
    /// An element's delete affordance.
    Delete {
        /// Element to remove.
        id: ElementId,
    },
    /// "Apply Changes" on the properties form of the selection.
    Apply {
        /// Submitted field values.
        values: FormValues,
    },
    /// Open the preview modal.
    Preview,
    /// Close the preview modal.
    ClosePreview,
    /// Save the page (confirmation plus download).
    Save,
}

/// Result of dispatching an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The action had no effect.
    Nothing,
    /// A new element was placed and selected.
    Created {
        /// New element.
        id: ElementId,
    },
    /// An element was selected.
    Selected {
        /// Selected element.
        id: ElementId,
    },
    /// The selection was cleared.
    Deselected,
    /// An element was removed.
    Deleted {
        /// Removed element.
        id: ElementId,
    },
    /// Properties were applied to the selection.
    Applied {
        /// Edited element.
        id: ElementId,
        /// Number of fields that took effect.
        fields: usize,
    },
    /// The preview modal opened with this clean fragment.
    Preview {
        /// Clean export fragment.
        html: String,
    },
    /// The preview modal closed.
    PreviewClosed,
    /// The page was "saved".
    Saved {
        /// Confirmation shown to the user.
        notice: String,
        /// File offered for download.
        download: Download,
    },
}

//! Panel DOM construction.
//!
//! Builds the container and its children from a resolved [`PopoverConfig`]:
//!
//! ```text
//! div#id.bobpop[popover]
//! ├── button#id_xbutton     (close control, when enabled)
//! ├── div#id_title          (only for a non-empty title)
//! ├── div#id_body
//! └── div#id_controls       (when OK and/or Cancel are requested)
//!     ├── button#id_cancel
//!     └── button#id_ok
//! ```

use crate::config::{Controls, PopoverConfig};
use crate::document::{Document, NodeId};

/// Class carried by every panel container, used for bulk operations.
pub const MARKER_CLASS: &str = "bobpop";

/// Class added to containers that draw a decorative tail.
pub const TAIL_CLASS: &str = "bobpop-tail";

/// Shared class for every button the builder creates.
pub const BUTTON_CLASS: &str = "bobpop-button";

/// What activating a control means for the dismissal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlRole {
    Close,
    Ok,
    Cancel,
}

impl ControlRole {
    fn id_suffix(&self) -> &'static str {
        match self {
            ControlRole::Close => "xbutton",
            ControlRole::Ok => "ok",
            ControlRole::Cancel => "cancel",
        }
    }

    fn class_name(&self) -> &'static str {
        match self {
            ControlRole::Close => "bobpop-close",
            ControlRole::Ok => "bobpop-button-ok",
            ControlRole::Cancel => "bobpop-button-cancel",
        }
    }
}

/// Handles to the nodes of one built panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelNodes {
    pub container: NodeId,
    pub title: Option<NodeId>,
    pub body: NodeId,
    pub button_row: Option<NodeId>,
    /// Every control together with the outcome it records.
    pub controls: Vec<(NodeId, ControlRole)>,
    /// Element that received the anchor-name stamp, if any.
    pub anchor_target: Option<NodeId>,
}

impl PanelNodes {
    pub fn control(&self, role: ControlRole) -> Option<NodeId> {
        self.controls
            .iter()
            .find(|(_, r)| *r == role)
            .map(|(node, _)| *node)
    }

    pub fn role_of(&self, node: NodeId) -> Option<ControlRole> {
        self.controls
            .iter()
            .find(|(n, _)| *n == node)
            .map(|(_, role)| *role)
    }
}

/// Builds a panel's subtree into a [`Document`].
pub struct PanelBuilder<'a, D: Document> {
    doc: &'a mut D,
    config: &'a PopoverConfig,
}

impl<'a, D: Document> PanelBuilder<'a, D> {
    pub fn new(doc: &'a mut D, config: &'a PopoverConfig) -> Self {
        Self { doc, config }
    }

    /// Build and attach the panel. `config.id` must already be unique.
    pub fn build(mut self) -> PanelNodes {
        let controls = self.config.controls();
        let container = self.container();

        let mut nodes = PanelNodes {
            container,
            title: None,
            body: container,
            button_row: None,
            controls: Vec::new(),
            anchor_target: None,
        };

        if controls.contains(Controls::CLOSE) {
            let close = self.close_button(container);
            nodes.controls.push((close, ControlRole::Close));
        }

        if self.config.has_title() {
            nodes.title = Some(self.title(container));
        }

        nodes.body = self.body(container);

        if controls.has_button_row() {
            let row = self.button_row(container);
            if controls.contains(Controls::CANCEL) {
                let text = self.config.cancel_button_text.clone();
                let cancel = self.button(row, ControlRole::Cancel, &text);
                nodes.controls.push((cancel, ControlRole::Cancel));
            }
            if controls.contains(Controls::OK) {
                let text = self.config.ok_button_text.clone();
                let ok = self.button(row, ControlRole::Ok, &text);
                nodes.controls.push((ok, ControlRole::Ok));
            }
            nodes.button_row = Some(row);
        }

        self.accessibility(&nodes);

        if self.config.anchor.is_some() {
            nodes.anchor_target = self.anchor(container);
        }

        self.doc.append_to_body(container);
        nodes
    }

    fn container(&mut self) -> NodeId {
        let config = self.config;
        let doc = &mut *self.doc;
        let node = doc.create_element("div");

        doc.set_attribute(node, "id", &config.id);
        doc.set_attribute(node, "popover", config.dismiss_mode.as_attr());
        doc.add_class(node, MARKER_CLASS);

        let styles: [(&str, &str); 17] = [
            ("max-width", &config.max_width),
            ("max-height", &config.max_height),
            ("overflow", &config.overflow),
            ("scrollbar-width", &config.scrollbar_width),
            ("padding", &config.padding),
            ("border", &config.border),
            ("border-radius", &config.border_radius),
            ("font-family", &config.font_family),
            ("color", &config.color),
            ("background", &config.background),
            ("box-shadow", &config.box_shadow),
            ("z-index", &config.z_index),
            ("position", &config.position),
            ("--bobpop-backdrop-color", &config.backdrop_color),
            ("--bobpop-backdrop-blur", &config.backdrop_blur),
            ("--bobpop-button-background", &config.button_background),
            ("--bobpop-button-color", &config.button_color),
        ];
        for (property, value) in styles {
            doc.set_style(node, property, value);
        }

        if let Some(margin) = &config.margin {
            doc.set_style(node, "margin", margin);
        }

        // Undo anything a surrounding modal may have applied to block interaction.
        doc.set_style(node, "pointer-events", "all");
        doc.set_style(node, "user-select", "auto");
        doc.remove_attribute(node, "inert");

        if config.transition {
            doc.add_class(node, &config.transition_kind.class_name());
            doc.set_style(node, "transition-duration", &config.transition_duration);
        }

        if let Some(placement) = config.tail {
            doc.add_class(node, TAIL_CLASS);
            doc.set_attribute(node, "data-tail", placement.as_str());
        }

        node
    }

    fn close_button(&mut self, container: NodeId) -> NodeId {
        let text = self.config.close_button_text.clone();
        let button = self.button(container, ControlRole::Close, &text);
        let doc = &mut *self.doc;
        doc.set_attribute(button, "aria-label", "Close");
        doc.set_style(button, "position", "absolute");
        doc.set_style(button, "top", "8px");
        doc.set_style(button, "right", "8px");
        doc.set_style(button, "color", &self.config.close_button_color);
        button
    }

    fn title(&mut self, container: NodeId) -> NodeId {
        let config = self.config;
        let doc = &mut *self.doc;
        let node = doc.create_element("div");
        doc.set_attribute(node, "id", &format!("{}_title", config.id));
        doc.set_style(node, "text-align", config.title_align.as_css());
        doc.set_style(node, "font-weight", &config.title_font_weight);
        doc.set_style(node, "font-size", &config.title_font_size);
        doc.set_style(node, "padding", &config.title_padding);
        if config.title_separator {
            doc.set_style(
                node,
                "border-bottom",
                &format!("1px solid {}", config.title_separator_color),
            );
        }
        doc.set_inner_html(node, &config.title);
        doc.append_child(container, node);
        node
    }

    fn body(&mut self, container: NodeId) -> NodeId {
        let config = self.config;
        let doc = &mut *self.doc;
        let node = doc.create_element("div");
        doc.set_attribute(node, "id", &format!("{}_body", config.id));
        doc.set_style(node, "text-align", config.body_align.as_css());
        // Without a title the body sits flush against the top edge.
        let padding = if config.has_title() {
            config.body_padding.as_str()
        } else {
            "0"
        };
        doc.set_style(node, "padding", padding);
        doc.set_inner_html(node, &config.body);
        doc.append_child(container, node);
        node
    }

    fn button_row(&mut self, container: NodeId) -> NodeId {
        let doc = &mut *self.doc;
        let row = doc.create_element("div");
        doc.set_attribute(row, "id", &format!("{}_controls", self.config.id));
        doc.add_class(row, "bobpop-controls");
        doc.set_style(row, "display", "flex");
        doc.set_style(row, "justify-content", "flex-end");
        doc.set_style(row, "gap", ".5rem");
        doc.set_style(row, "margin-top", "15px");
        doc.append_child(container, row);
        row
    }

    fn button(&mut self, parent: NodeId, role: ControlRole, text: &str) -> NodeId {
        let id = &self.config.id;
        let doc = &mut *self.doc;
        let button = doc.create_element("button");
        doc.set_attribute(button, "id", &format!("{id}_{}", role.id_suffix()));
        doc.set_attribute(button, "type", "button");
        doc.add_class(button, BUTTON_CLASS);
        doc.add_class(button, role.class_name());
        // The platform's invoker hides the panel; the engine only records the outcome.
        doc.set_attribute(button, "popovertarget", id);
        doc.set_attribute(button, "popovertargetaction", "hide");
        doc.set_text(button, text);
        doc.append_child(parent, button);
        button
    }

    fn accessibility(&mut self, nodes: &PanelNodes) {
        let id = &self.config.id;
        let doc = &mut *self.doc;
        let container = nodes.container;
        doc.set_attribute(container, "role", "alertdialog");
        doc.set_attribute(container, "aria-hidden", "false");
        if nodes.title.is_some() {
            doc.set_attribute(container, "aria-labelledby", &format!("{id}_title"));
        }
        doc.set_attribute(container, "aria-describedby", &format!("{id}_body"));
    }

    /// Bind the container to its anchor, returning the stamped target if it resolved.
    fn anchor(&mut self, container: NodeId) -> Option<NodeId> {
        let config = self.config;
        let name = config.anchor.as_deref()?;
        let doc = &mut *self.doc;

        doc.set_style(container, "position-anchor", name);
        doc.set_style(container, "position-area", &config.position_area);
        doc.set_style(container, "position-try-fallbacks", &config.position_try_fallbacks);
        doc.set_style(container, "position-try-order", &config.position_try_order);
        if config.margin.is_none() {
            doc.set_style(container, "margin", &config.anchor_margin);
        }

        let target_id = config.anchor_to_id.as_deref()?;
        match doc.element_by_id(target_id) {
            Some(target) => {
                doc.set_style(target, "anchor-name", name);
                Some(target)
            }
            None => {
                tracing::debug!("anchor target '{}' not found, skipping anchor-name", target_id);
                None
            }
        }
    }
}

//! Minimal page model the slider engine mutates.
//!
//! Reifies exactly the parts of the host page the widget contract touches:
//! an element tree with class lists, the handful of inline style properties
//! the engine writes, declarative attributes, and layout rects maintained by
//! the host. On the web the adapter mirrors the live DOM into this model and
//! flushes mutations back; tests and native embedders drive it directly.

use crate::error::{SliderError, SliderResult};
use crate::geometry::ClipRegion;
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a page element.
pub type ElementId = Uuid;

/// Element tag, as far as the engine cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Div,
    Image,
    Span,
}

/// Inline style properties the engine writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    /// Visible sub-region (`clip` / `clip-path` on the web).
    pub clip: Option<ClipRegion>,
    /// Horizontal offset in pixels (handle position).
    pub left: Option<f64>,
    /// Vertical offset in pixels (handle position).
    pub top: Option<f64>,
    /// Fixed height in pixels (wrapper layout stability).
    pub height: Option<f64>,
}

/// One element in the page model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub classes: Vec<String>,
    pub attributes: HashMap<String, String>,
    pub children: Vec<ElementId>,
    pub parent: Option<ElementId>,
    /// Layout rect in page space, maintained by the host. For images this is
    /// the rendered size; for containers, the page offset.
    pub bounds: Rect,
    pub style: ElementStyle,
    /// Native drag-and-drop flag (images only). The engine clears it so a
    /// mouse-down on an image starts a slider drag, not an image drag.
    pub draggable: bool,
}

impl Element {
    fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            kind,
            classes: Vec::new(),
            attributes: HashMap::new(),
            children: Vec::new(),
            parent: None,
            bounds: Rect::ZERO,
            style: ElementStyle::default(),
            draggable: true,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

/// The element tree of one host page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageModel {
    elements: HashMap<ElementId, Element>,
    /// Top-level elements in document order.
    roots: Vec<ElementId>,
}

impl PageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, kind: ElementKind) -> ElementId {
        let id = Uuid::new_v4();
        self.elements.insert(id, Element::new(id, kind));
        id
    }

    /// Create an element and append it as the last child of `parent`.
    pub fn create_child(&mut self, parent: ElementId, kind: ElementKind) -> SliderResult<ElementId> {
        let id = self.create_element(kind);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Add a detached element to the top level of the page.
    pub fn add_root(&mut self, id: ElementId) {
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    pub fn element(&self, id: ElementId) -> SliderResult<&Element> {
        self.elements.get(&id).ok_or(SliderError::ElementNotFound(id))
    }

    pub fn element_mut(&mut self, id: ElementId) -> SliderResult<&mut Element> {
        self.elements.get_mut(&id).ok_or(SliderError::ElementNotFound(id))
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent or the top level.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> SliderResult<()> {
        self.element(parent)?;
        self.detach(child)?;
        self.element_mut(child)?.parent = Some(parent);
        self.element_mut(parent)?.children.push(child);
        Ok(())
    }

    fn detach(&mut self, id: ElementId) -> SliderResult<()> {
        let parent = self.element(id)?.parent;
        match parent {
            Some(p) => {
                let siblings = &mut self.element_mut(p)?.children;
                siblings.retain(|c| *c != id);
            }
            None => self.roots.retain(|r| *r != id),
        }
        self.element_mut(id)?.parent = None;
        Ok(())
    }

    /// Wrap `id` in a new element of `kind`, inserted at the wrapped
    /// element's position in the tree.
    pub fn wrap(&mut self, id: ElementId, kind: ElementKind) -> SliderResult<ElementId> {
        let parent = self.element(id)?.parent;
        let wrapper = self.create_element(kind);

        match parent {
            Some(p) => {
                // Take the wrapped element's slot among its siblings.
                let siblings = &mut self.element_mut(p)?.children;
                let slot = siblings.iter().position(|c| *c == id);
                match slot {
                    Some(i) => siblings[i] = wrapper,
                    None => siblings.push(wrapper),
                }
                self.element_mut(wrapper)?.parent = Some(p);
            }
            None => {
                let slot = self.roots.iter().position(|r| *r == id);
                match slot {
                    Some(i) => self.roots[i] = wrapper,
                    None => self.roots.push(wrapper),
                }
            }
        }

        self.element_mut(id)?.parent = Some(wrapper);
        self.element_mut(wrapper)?.children.push(id);
        Ok(wrapper)
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, id: ElementId, class: &str) -> SliderResult<()> {
        let element = self.element_mut(id)?;
        if !element.has_class(class) {
            element.classes.push(class.to_string());
        }
        Ok(())
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) -> SliderResult<()> {
        self.element_mut(id)?.classes.retain(|c| c != class);
        Ok(())
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> SliderResult<()> {
        self.element_mut(id)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Update an element's layout rect. Called by the host whenever layout
    /// changes; the engine only ever reads bounds.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) -> SliderResult<()> {
        self.element_mut(id)?.bounds = bounds;
        Ok(())
    }

    /// All elements carrying `attribute`, in document order.
    pub fn find_with_attribute(&self, attribute: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        for root in &self.roots {
            self.collect_with_attribute(*root, attribute, &mut found);
        }
        found
    }

    fn collect_with_attribute(&self, id: ElementId, attribute: &str, found: &mut Vec<ElementId>) {
        let Some(element) = self.elements.get(&id) else {
            return;
        };
        if element.has_attribute(attribute) {
            found.push(id);
        }
        for child in &element.children {
            self.collect_with_attribute(*child, attribute, found);
        }
    }

    /// All image elements under `id`, depth-first in document order.
    pub fn images_in(&self, id: ElementId) -> Vec<ElementId> {
        let mut images = Vec::new();
        self.collect_images(id, &mut images);
        images
    }

    fn collect_images(&self, id: ElementId, images: &mut Vec<ElementId>) {
        let Some(element) = self.elements.get(&id) else {
            return;
        };
        if element.kind == ElementKind::Image {
            images.push(id);
        }
        for child in &element.children {
            self.collect_images(*child, images);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Size};

    #[test]
    fn test_class_list_dedupes() {
        let mut page = PageModel::new();
        let id = page.create_element(ElementKind::Div);
        page.add_class(id, "active").unwrap();
        page.add_class(id, "active").unwrap();
        assert_eq!(page.element(id).unwrap().classes, vec!["active"]);

        page.remove_class(id, "active").unwrap();
        assert!(!page.element(id).unwrap().has_class("active"));
    }

    #[test]
    fn test_wrap_takes_the_wrapped_elements_slot() {
        let mut page = PageModel::new();
        let first = page.create_element(ElementKind::Div);
        let second = page.create_element(ElementKind::Div);
        page.add_root(first);
        page.add_root(second);

        let wrapper = page.wrap(first, ElementKind::Div).unwrap();

        assert_eq!(page.element(first).unwrap().parent, Some(wrapper));
        assert_eq!(page.element(wrapper).unwrap().children, vec![first]);
        assert_eq!(page.find_with_attribute("nope"), Vec::<ElementId>::new());
        // Wrapper sits where the wrapped element was; the sibling is intact.
        assert!(page.element(wrapper).unwrap().parent.is_none());
        assert!(page.element(second).unwrap().parent.is_none());
    }

    #[test]
    fn test_wrap_nested_element() {
        let mut page = PageModel::new();
        let outer = page.create_element(ElementKind::Div);
        page.add_root(outer);
        let inner = page.create_child(outer, ElementKind::Div).unwrap();

        let wrapper = page.wrap(inner, ElementKind::Div).unwrap();

        assert_eq!(page.element(outer).unwrap().children, vec![wrapper]);
        assert_eq!(page.element(wrapper).unwrap().parent, Some(outer));
        assert_eq!(page.element(inner).unwrap().parent, Some(wrapper));
    }

    #[test]
    fn test_images_in_document_order() {
        let mut page = PageModel::new();
        let root = page.create_element(ElementKind::Div);
        page.add_root(root);
        let before = page.create_child(root, ElementKind::Image).unwrap();
        let nested = page.create_child(root, ElementKind::Div).unwrap();
        let after = page.create_child(nested, ElementKind::Image).unwrap();

        assert_eq!(page.images_in(root), vec![before, after]);
    }

    #[test]
    fn test_find_with_attribute() {
        let mut page = PageModel::new();
        let plain = page.create_element(ElementKind::Div);
        page.add_root(plain);
        let root = page.create_element(ElementKind::Div);
        page.add_root(root);
        page.set_attribute(root, "data-pixelcompare", "").unwrap();

        assert_eq!(page.find_with_attribute("data-pixelcompare"), vec![root]);
    }

    #[test]
    fn test_missing_element_is_an_error() {
        let mut page = PageModel::new();
        let stale = Uuid::new_v4();
        assert!(matches!(
            page.add_class(stale, "x"),
            Err(SliderError::ElementNotFound(_))
        ));
    }

    #[test]
    fn test_bounds_roundtrip() {
        let mut page = PageModel::new();
        let id = page.create_element(ElementKind::Image);
        let rect = Rect::from_origin_size(Point::new(10.0, 20.0), Size::new(400.0, 300.0));
        page.set_bounds(id, rect).unwrap();
        assert_eq!(page.element(id).unwrap().bounds, rect);
    }
}

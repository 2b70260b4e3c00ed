//! Instance manager: root discovery, DOM restructuring, and shared fan-out.
//!
//! The manager is the only owner of the page-wide signals (resize and
//! release); instances never install ambient listeners themselves, so
//! tearing one down is just unregistering it here.

use crate::config::SliderConfig;
use crate::error::{SliderError, SliderResult};
use crate::input::PointerEvent;
use crate::orientation::Orientation;
use crate::page::{ElementId, ElementKind, PageModel};
use crate::widget::SliderInstance;

/// Attribute flagging an element as a widget root.
pub const DATA_ATTR: &str = "data-pixelcompare";
/// Attribute selecting hover interaction for one root.
pub const HOVER_ATTR: &str = "data-hover";
/// Legacy attribute selecting a vertical default for one root.
pub const VERTICAL_ATTR: &str = "data-vertical";
/// Attribute overriding the orientation for one root.
pub const ORIENTATION_ATTR: &str = "data-pixelcompare-orientation";

const WRAPPER_CLASS: &str = "pixelcompare-wrapper";
const CONTAINER_CLASS: &str = "pixelcompare-container";
const BEFORE_CLASS: &str = "pixelcompare-before";
const AFTER_CLASS: &str = "pixelcompare-after";
const HANDLE_CLASS: &str = "pixelcompare-handle";
const OVERLAY_CLASS: &str = "pixelcompare-overlay";

/// Builds and owns every slider instance on a page.
#[derive(Debug, Default)]
pub struct SliderManager {
    instances: Vec<SliderInstance>,
}

impl SliderManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover every declared widget root, build one instance per root,
    /// and finish with the startup resize pass that lays all of them out at
    /// their default offsets.
    ///
    /// Fails fast on malformed markup (a root with fewer than two images)
    /// instead of faulting on a later event.
    pub fn mount(&mut self, page: &mut PageModel, defaults: SliderConfig) -> SliderResult<()> {
        // Build every instance before registering any, so a malformed root
        // leaves the manager empty instead of half-mounted with instances
        // that never saw the startup resize.
        let mut mounted = Vec::new();
        for root in page.find_with_attribute(DATA_ATTR) {
            let instance = build_instance(page, root, defaults)?;
            log::debug!(
                "mounted slider on {root} ({:?})",
                instance.orientation()
            );
            mounted.push(instance);
        }
        self.instances.append(&mut mounted);
        self.dispatch_resize(page)
    }

    pub fn instances(&self) -> &[SliderInstance] {
        &self.instances
    }

    /// Look up an instance by its wrapper element.
    pub fn instance(&self, wrapper: ElementId) -> Option<&SliderInstance> {
        self.instances.iter().find(|i| i.wrapper() == wrapper)
    }

    /// Route a targeted event to the instance mounted on `wrapper`.
    pub fn dispatch(
        &mut self,
        page: &mut PageModel,
        wrapper: ElementId,
        event: &PointerEvent,
    ) -> SliderResult<()> {
        let instance = self
            .instances
            .iter_mut()
            .find(|i| i.wrapper() == wrapper)
            .ok_or(SliderError::UnknownInstance(wrapper))?;
        instance.handle_event(page, event)
    }

    /// Page-wide resize: every live instance re-applies geometry at its own
    /// current offset.
    pub fn dispatch_resize(&mut self, page: &mut PageModel) -> SliderResult<()> {
        for instance in &mut self.instances {
            instance.resize(page)?;
        }
        Ok(())
    }

    /// Page-wide release: a mouse-up or touch-end anywhere ends every
    /// in-progress drag.
    pub fn dispatch_release(&mut self, page: &mut PageModel) -> SliderResult<()> {
        for instance in &mut self.instances {
            instance.handle_event(page, &PointerEvent::Release)?;
        }
        Ok(())
    }

    /// Remove the instance mounted on `wrapper` from all fan-out. Returns
    /// whether an instance was removed.
    pub fn unregister(&mut self, wrapper: ElementId) -> bool {
        let len = self.instances.len();
        self.instances.retain(|i| i.wrapper() != wrapper);
        self.instances.len() != len
    }
}

/// Read one root's declarative attributes on top of the page defaults.
/// Every instance gets its own copy; nothing is shared mutably.
fn instance_config(page: &PageModel, root: ElementId, defaults: SliderConfig) -> SliderResult<SliderConfig> {
    let element = page.element(root)?;
    let mut config = defaults;
    config.hover = element.has_attribute(HOVER_ATTR);
    if element.has_attribute(VERTICAL_ATTR) {
        config.orientation = Orientation::Vertical;
    }
    if let Some(value) = element.attribute(ORIENTATION_ATTR) {
        match Orientation::parse(value) {
            Some(orientation) => config.orientation = orientation,
            // Unrecognized values degrade to the computed default.
            None => log::debug!("ignoring unrecognized orientation {value:?}"),
        }
    }
    Ok(config)
}

/// Wrap one root, locate its image pair, and generate the handle structure.
fn build_instance(
    page: &mut PageModel,
    root: ElementId,
    defaults: SliderConfig,
) -> SliderResult<SliderInstance> {
    let config = instance_config(page, root, defaults)?;
    let orientation = config.orientation;

    let wrapper = page.wrap(root, ElementKind::Div)?;
    page.add_class(wrapper, WRAPPER_CLASS)?;
    page.add_class(wrapper, orientation.class_name())?;
    page.add_class(wrapper, CONTAINER_CLASS)?;

    // The pair is the first two images under the root, in document order;
    // anything after them is left alone.
    let images = page.images_in(wrapper);
    if images.len() < 2 {
        return Err(SliderError::MissingImages { found: images.len() });
    }
    let (before, after) = (images[0], images[1]);
    for image in [before, after] {
        page.element_mut(image)?.draggable = false;
    }
    page.add_class(before, BEFORE_CLASS)?;
    page.add_class(after, AFTER_CLASS)?;

    let handle = page.create_child(wrapper, ElementKind::Div)?;
    page.add_class(handle, HANDLE_CLASS)?;
    let (toward_before, toward_after) = orientation.arrows();
    for arrow in [toward_before, toward_after] {
        let span = page.create_child(handle, ElementKind::Span)?;
        page.add_class(span, arrow.class_name())?;
    }

    let overlay = if config.overlay {
        let overlay = page.create_child(wrapper, ElementKind::Div)?;
        page.add_class(overlay, OVERLAY_CLASS)?;
        Some(overlay)
    } else {
        None
    };

    Ok(SliderInstance::new(config, wrapper, before, after, handle, overlay))
}

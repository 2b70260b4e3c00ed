//! One mounted comparison slider and its interaction state machine.

use super::state::SliderState;
use crate::config::SliderConfig;
use crate::error::SliderResult;
use crate::geometry::{self, OffsetMetrics};
use crate::input::PointerEvent;
use crate::orientation::{Axis, Orientation};
use crate::page::{ElementId, PageModel};
use crate::position;
use kurbo::{Point, Rect};

/// Class toggled on the wrapper for the duration of a drag.
pub const ACTIVE_CLASS: &str = "active";

/// One before/after pair wired to a handle.
///
/// Owns the element references established at mount time (the pairing never
/// changes), an immutable config, and the mutable drag state. All event
/// handling is synchronous: a move event resolves the fraction and applies
/// geometry before returning, since it drives a live drag.
#[derive(Debug, Clone)]
pub struct SliderInstance {
    config: SliderConfig,
    state: SliderState,
    wrapper: ElementId,
    before: ElementId,
    after: ElementId,
    handle: ElementId,
    overlay: Option<ElementId>,
}

impl SliderInstance {
    pub(crate) fn new(
        config: SliderConfig,
        wrapper: ElementId,
        before: ElementId,
        after: ElementId,
        handle: ElementId,
        overlay: Option<ElementId>,
    ) -> Self {
        Self {
            config,
            state: SliderState::new(config.default_offset_pct),
            wrapper,
            before,
            after,
            handle,
            overlay,
        }
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn state(&self) -> &SliderState {
        &self.state
    }

    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    /// The wrapper element; also the instance's identity for dispatch.
    pub fn wrapper(&self) -> ElementId {
        self.wrapper
    }

    pub fn before_image(&self) -> ElementId {
        self.before
    }

    pub fn after_image(&self) -> ElementId {
        self.after
    }

    pub fn handle(&self) -> ElementId {
        self.handle
    }

    pub fn overlay(&self) -> Option<ElementId> {
        self.overlay
    }

    /// The element whose press starts a drag.
    pub fn drag_target(&self) -> ElementId {
        if self.config.move_with_handle_only {
            self.handle
        } else {
            self.wrapper
        }
    }

    /// Route one input event through the state machine.
    pub fn handle_event(&mut self, page: &mut PageModel, event: &PointerEvent) -> SliderResult<()> {
        match *event {
            PointerEvent::Press { target, .. } => {
                if !self.config.hover && target == self.drag_target() {
                    self.start_move(page)?;
                }
            }
            PointerEvent::TouchStart { target, travel, .. } => {
                if self.config.hover || target != self.drag_target() {
                    return Ok(());
                }
                if self.orientation().rejects_gesture(travel) {
                    // Orthogonal swipe: leave the gesture to the page.
                    log::debug!("touch rejected by axis filter: {travel:?}");
                    return Ok(());
                }
                self.start_move(page)?;
            }
            PointerEvent::Move { position } => {
                if self.state.active {
                    self.move_to(page, position)?;
                }
            }
            PointerEvent::Release => {
                if !self.config.hover {
                    self.end_move(page)?;
                }
            }
            PointerEvent::Enter { .. } => {
                if self.config.hover {
                    self.start_move(page)?;
                }
            }
            PointerEvent::Leave => {
                if self.config.hover {
                    self.end_move(page)?;
                }
            }
            PointerEvent::Click { position } => {
                if self.config.click_to_move {
                    // Click jumps the divider without entering a drag; it
                    // still needs fresh layout to resolve against.
                    self.snapshot_bounds(page)?;
                    self.move_to(page, position)?;
                }
            }
        }
        Ok(())
    }

    /// Idle -> Dragging: mark active and capture the layout snapshot.
    fn start_move(&mut self, page: &mut PageModel) -> SliderResult<()> {
        self.snapshot_bounds(page)?;
        self.state.active = true;
        page.add_class(self.wrapper, ACTIVE_CLASS)
    }

    /// Dragging -> Idle.
    fn end_move(&mut self, page: &mut PageModel) -> SliderResult<()> {
        self.state.active = false;
        page.remove_class(self.wrapper, ACTIVE_CLASS)
    }

    /// Resolve `position` against the drag-start snapshot and re-apply
    /// geometry.
    fn move_to(&mut self, page: &mut PageModel, position: Point) -> SliderResult<()> {
        let Some(bounds) = self.state.bounds else {
            return Ok(());
        };
        self.state.offset_pct = position::slider_fraction(position, bounds, self.orientation());
        self.apply_geometry(page)
    }

    /// Capture the container origin and the before image's rendered size.
    /// The element may have moved or resized since the last interaction, so
    /// this runs at the start of every gesture, never from a stale cache.
    fn snapshot_bounds(&mut self, page: &mut PageModel) -> SliderResult<()> {
        let origin = page.element(self.wrapper)?.bounds.origin();
        let size = page.element(self.before)?.bounds.size();
        self.state.bounds = Some(Rect::from_origin_size(origin, size));
        Ok(())
    }

    /// Re-snapshot layout and re-apply geometry at the current fraction.
    /// Never resets the divider position.
    pub fn resize(&mut self, page: &mut PageModel) -> SliderResult<()> {
        self.snapshot_bounds(page)?;
        self.apply_geometry(page)
    }

    /// Move the divider programmatically. The fraction is clamped before any
    /// geometry is derived from it.
    pub fn set_offset(&mut self, page: &mut PageModel, pct: f64) -> SliderResult<()> {
        self.state.offset_pct = position::min_max(pct, 0.0, 1.0);
        self.apply_geometry(page)
    }

    /// Write the current fraction to the page: clip regions on both images,
    /// the handle offset on the slider axis, and the wrapper height pinned
    /// to the before image so layout stays stable regardless of clip.
    fn apply_geometry(&mut self, page: &mut PageModel) -> SliderResult<()> {
        let size = page.element(self.before)?.bounds.size();
        let metrics = OffsetMetrics::new(self.state.offset_pct, size);
        let clips = geometry::clip_regions(self.orientation(), &metrics);

        page.element_mut(self.before)?.style.clip = Some(clips.before);
        page.element_mut(self.after)?.style.clip = Some(clips.after);

        let handle_pos = geometry::handle_position(self.orientation(), &metrics);
        let handle = page.element_mut(self.handle)?;
        match self.orientation().axis() {
            Axis::X => handle.style.left = Some(handle_pos.x),
            Axis::Y => handle.style.top = Some(handle_pos.y),
        }

        page.element_mut(self.wrapper)?.style.height = Some(metrics.height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ClipRegion;
    use crate::page::ElementKind;
    use kurbo::{Size, Vec2};

    const WIDTH: f64 = 400.0;
    const HEIGHT: f64 = 300.0;

    fn build(config: SliderConfig) -> (PageModel, SliderInstance) {
        let mut page = PageModel::new();
        let wrapper = page.create_element(ElementKind::Div);
        page.add_root(wrapper);
        let before = page.create_child(wrapper, ElementKind::Image).unwrap();
        let after = page.create_child(wrapper, ElementKind::Image).unwrap();
        let handle = page.create_child(wrapper, ElementKind::Div).unwrap();

        page.set_bounds(wrapper, Rect::from_origin_size(Point::ZERO, Size::new(WIDTH, HEIGHT)))
            .unwrap();
        for img in [before, after] {
            page.set_bounds(img, Rect::from_origin_size(Point::ZERO, Size::new(WIDTH, HEIGHT)))
                .unwrap();
        }

        let instance = SliderInstance::new(config, wrapper, before, after, handle, None);
        (page, instance)
    }

    fn press(instance: &SliderInstance) -> PointerEvent {
        PointerEvent::Press {
            target: instance.drag_target(),
            position: Point::ZERO,
        }
    }

    #[test]
    fn test_press_on_handle_starts_drag() {
        let (mut page, mut instance) = build(SliderConfig::default());

        instance.handle_event(&mut page, &press(&instance)).unwrap();

        assert!(instance.state().active);
        assert_eq!(
            instance.state().bounds,
            Some(Rect::from_origin_size(Point::ZERO, Size::new(WIDTH, HEIGHT)))
        );
        assert!(page.element(instance.wrapper()).unwrap().has_class(ACTIVE_CLASS));
    }

    #[test]
    fn test_press_on_wrapper_ignored_when_handle_only() {
        let (mut page, mut instance) = build(SliderConfig::default());

        let event = PointerEvent::Press {
            target: instance.wrapper(),
            position: Point::ZERO,
        };
        instance.handle_event(&mut page, &event).unwrap();

        assert!(!instance.state().active);
    }

    #[test]
    fn test_whole_container_is_the_target_when_configured() {
        let config = SliderConfig {
            move_with_handle_only: false,
            ..SliderConfig::default()
        };
        let (mut page, mut instance) = build(config);
        assert_eq!(instance.drag_target(), instance.wrapper());

        let event = PointerEvent::Press {
            target: instance.wrapper(),
            position: Point::ZERO,
        };
        instance.handle_event(&mut page, &event).unwrap();
        assert!(instance.state().active);
    }

    #[test]
    fn test_move_while_dragging_applies_geometry() {
        let (mut page, mut instance) = build(SliderConfig::default());
        instance.handle_event(&mut page, &press(&instance)).unwrap();

        let event = PointerEvent::Move {
            position: Point::new(100.0, 0.0),
        };
        instance.handle_event(&mut page, &event).unwrap();

        assert!((instance.state().offset_pct - 0.25).abs() < f64::EPSILON);
        let before = page.element(instance.before_image()).unwrap();
        assert_eq!(
            before.style.clip,
            Some(ClipRegion::Rect(Rect::new(0.0, 0.0, 100.0, HEIGHT)))
        );
        let handle = page.element(instance.handle()).unwrap();
        assert_eq!(handle.style.left, Some(100.0));
        assert_eq!(handle.style.top, None);
        let wrapper = page.element(instance.wrapper()).unwrap();
        assert_eq!(wrapper.style.height, Some(HEIGHT));
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let (mut page, mut instance) = build(SliderConfig::default());

        let event = PointerEvent::Move {
            position: Point::new(100.0, 0.0),
        };
        instance.handle_event(&mut page, &event).unwrap();

        assert!((instance.state().offset_pct - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_release_ends_drag() {
        let (mut page, mut instance) = build(SliderConfig::default());
        instance.handle_event(&mut page, &press(&instance)).unwrap();

        instance.handle_event(&mut page, &PointerEvent::Release).unwrap();

        assert!(!instance.state().active);
        assert!(!page.element(instance.wrapper()).unwrap().has_class(ACTIVE_CLASS));
        // Position survives the release.
        assert!((instance.state().offset_pct - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_vertical_drag_moves_handle_top() {
        let config = SliderConfig {
            orientation: Orientation::Vertical,
            ..SliderConfig::default()
        };
        let (mut page, mut instance) = build(config);
        instance.handle_event(&mut page, &press(&instance)).unwrap();
        instance
            .handle_event(&mut page, &PointerEvent::Move { position: Point::new(0.0, 75.0) })
            .unwrap();

        assert!((instance.state().offset_pct - 0.25).abs() < f64::EPSILON);
        let handle = page.element(instance.handle()).unwrap();
        assert_eq!(handle.style.top, Some(75.0));
        assert_eq!(handle.style.left, None);
    }

    #[test]
    fn test_hover_mode_enter_move_leave() {
        let config = SliderConfig {
            hover: true,
            ..SliderConfig::default()
        };
        let (mut page, mut instance) = build(config);

        // Press and release are the non-hover path; both are ignored.
        let press = PointerEvent::Press {
            target: instance.handle(),
            position: Point::ZERO,
        };
        instance.handle_event(&mut page, &press).unwrap();
        assert!(!instance.state().active);

        instance
            .handle_event(&mut page, &PointerEvent::Enter { position: Point::ZERO })
            .unwrap();
        assert!(instance.state().active);

        instance
            .handle_event(&mut page, &PointerEvent::Move { position: Point::new(300.0, 0.0) })
            .unwrap();
        assert!((instance.state().offset_pct - 0.75).abs() < f64::EPSILON);

        instance.handle_event(&mut page, &PointerEvent::Release).unwrap();
        assert!(instance.state().active, "window release must not end a hover drag");

        instance.handle_event(&mut page, &PointerEvent::Leave).unwrap();
        assert!(!instance.state().active);
    }

    #[test]
    fn test_click_to_move_jumps_without_drag() {
        let config = SliderConfig {
            click_to_move: true,
            ..SliderConfig::default()
        };
        let (mut page, mut instance) = build(config);

        instance
            .handle_event(&mut page, &PointerEvent::Click { position: Point::new(300.0, 0.0) })
            .unwrap();

        assert!(!instance.state().active);
        assert!((instance.state().offset_pct - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_click_ignored_by_default() {
        let (mut page, mut instance) = build(SliderConfig::default());
        instance
            .handle_event(&mut page, &PointerEvent::Click { position: Point::new(300.0, 0.0) })
            .unwrap();
        assert!((instance.state().offset_pct - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_orthogonal_touch_is_rejected() {
        let (mut page, mut instance) = build(SliderConfig::default());

        let event = PointerEvent::TouchStart {
            target: instance.drag_target(),
            position: Point::ZERO,
            travel: Vec2::new(1.0, -12.0),
        };
        instance.handle_event(&mut page, &event).unwrap();
        assert!(!instance.state().active);

        let event = PointerEvent::TouchStart {
            target: instance.drag_target(),
            position: Point::ZERO,
            travel: Vec2::new(12.0, 1.0),
        };
        instance.handle_event(&mut page, &event).unwrap();
        assert!(instance.state().active);
    }

    #[test]
    fn test_resize_keeps_current_offset() {
        let (mut page, mut instance) = build(SliderConfig::default());

        // Resize before any drag: geometry lands at the untouched default.
        instance.resize(&mut page).unwrap();
        assert!((instance.state().offset_pct - 0.5).abs() < f64::EPSILON);
        assert_eq!(page.element(instance.handle()).unwrap().style.left, Some(200.0));

        // The page shrinks; the fraction holds and pixels follow.
        let half = Size::new(200.0, 150.0);
        page.set_bounds(instance.before_image(), Rect::from_origin_size(Point::ZERO, half))
            .unwrap();
        instance.resize(&mut page).unwrap();
        assert!((instance.state().offset_pct - 0.5).abs() < f64::EPSILON);
        assert_eq!(page.element(instance.handle()).unwrap().style.left, Some(100.0));
    }

    #[test]
    fn test_set_offset_clamps() {
        let (mut page, mut instance) = build(SliderConfig::default());
        instance.set_offset(&mut page, 3.0).unwrap();
        assert_eq!(instance.state().offset_pct, 1.0);
        assert_eq!(page.element(instance.handle()).unwrap().style.left, Some(WIDTH));
    }
}

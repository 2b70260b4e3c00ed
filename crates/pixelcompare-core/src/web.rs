//! Browser adapter for WebAssembly builds.
//!
//! Mirrors every declared widget root into the page model, lets the manager
//! restructure and mount it, replays the generated structure onto the live
//! DOM, then forwards browser events into the engine and flushes style and
//! class mutations back after each dispatch. All slider math stays in the
//! platform-agnostic modules; this file is wiring only.

use crate::config::SliderConfig;
use crate::error::SliderError;
use crate::geometry::ClipRegion;
use crate::input::PointerEvent;
use crate::manager::{DATA_ATTR, HOVER_ATTR, ORIENTATION_ATTR, SliderManager, VERTICAL_ATTR};
use crate::page::{ElementId, ElementKind, PageModel};
use kurbo::{Point, Rect, Size, Vec2};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element as DomElement, Event, HtmlElement, MouseEvent, TouchEvent};

/// Engine state plus the mapping from model elements to live DOM nodes.
struct Runtime {
    page: PageModel,
    manager: SliderManager,
    dom: HashMap<ElementId, DomElement>,
}

/// Mount every `[data-pixelcompare]` root in the document with default
/// configuration. Exported entry point for plain script usage.
#[wasm_bindgen(js_name = pixelcompareMount)]
pub fn mount() -> Result<(), JsValue> {
    mount_with(SliderConfig::default())
}

/// Mount every declared root with the given page defaults.
pub fn mount_with(defaults: SliderConfig) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let mut runtime = Runtime {
        page: PageModel::new(),
        manager: SliderManager::new(),
        dom: HashMap::new(),
    };

    import_roots(&document, &mut runtime)?;
    runtime
        .manager
        .mount(&mut runtime.page, defaults)
        .map_err(js_error)?;
    realize_structure(&document, &mut runtime)?;

    let runtime = Rc::new(RefCell::new(runtime));
    sync_layout(&mut runtime.borrow_mut());
    {
        let rt = &mut *runtime.borrow_mut();
        rt.manager.dispatch_resize(&mut rt.page).map_err(js_error)?;
    }
    flush(&runtime.borrow())?;

    wire_instances(&runtime)?;
    wire_window(&runtime)?;
    Ok(())
}

fn js_error(err: SliderError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Mirror each declared root and its images into the page model.
fn import_roots(document: &Document, rt: &mut Runtime) -> Result<(), JsValue> {
    let roots = document.query_selector_all(&format!("[{DATA_ATTR}]"))?;
    for i in 0..roots.length() {
        let Some(node) = roots.item(i) else { continue };
        let Ok(root) = node.dyn_into::<DomElement>() else {
            continue;
        };

        let model_root = rt.page.create_element(ElementKind::Div);
        rt.page.add_root(model_root);
        for attr in [DATA_ATTR, HOVER_ATTR, VERTICAL_ATTR, ORIENTATION_ATTR] {
            if let Some(value) = root.get_attribute(attr) {
                rt.page.set_attribute(model_root, attr, &value).map_err(js_error)?;
            }
        }

        let images = root.query_selector_all("img")?;
        for j in 0..images.length() {
            let Some(img) = images.item(j).and_then(|n| n.dyn_into::<DomElement>().ok()) else {
                continue;
            };
            let model_img = rt
                .page
                .create_child(model_root, ElementKind::Image)
                .map_err(js_error)?;
            let rect = img.get_bounding_client_rect();
            rt.page
                .set_bounds(
                    model_img,
                    Rect::from_origin_size(Point::ZERO, Size::new(rect.width(), rect.height())),
                )
                .map_err(js_error)?;
            rt.dom.insert(model_img, img);
        }

        rt.dom.insert(model_root, root);
    }
    Ok(())
}

/// Replay the structure the manager generated in the model (wrapper, handle,
/// arrows, overlay) onto the live DOM.
fn realize_structure(document: &Document, rt: &mut Runtime) -> Result<(), JsValue> {
    let instances: Vec<_> = rt.manager.instances().to_vec();
    for instance in &instances {
        let root_id = rt
            .page
            .element(instance.wrapper())
            .map_err(js_error)?
            .children
            .first()
            .copied()
            .ok_or_else(|| JsValue::from_str("wrapper lost its root"))?;
        let root = rt
            .dom
            .get(&root_id)
            .ok_or_else(|| JsValue::from_str("unmapped root element"))?
            .clone();

        let wrapper = create_mirror(document, rt, instance.wrapper())?;
        if let Some(parent) = root.parent_node() {
            parent.insert_before(&wrapper, Some(&root))?;
        }
        wrapper.append_child(&root)?;

        let handle = create_mirror(document, rt, instance.handle())?;
        let arrow_ids: Vec<ElementId> =
            rt.page.element(instance.handle()).map_err(js_error)?.children.clone();
        for arrow_id in arrow_ids {
            let arrow = create_mirror(document, rt, arrow_id)?;
            handle.append_child(&arrow)?;
        }
        wrapper.append_child(&handle)?;

        if let Some(overlay_id) = instance.overlay() {
            let overlay = create_mirror(document, rt, overlay_id)?;
            wrapper.append_child(&overlay)?;
        }

        for image_id in [instance.before_image(), instance.after_image()] {
            let classes = rt.page.element(image_id).map_err(js_error)?.classes.join(" ");
            if let Some(img) = rt.dom.get(&image_id) {
                img.set_attribute("draggable", "false")?;
                img.set_class_name(&classes);
            }
        }
    }
    Ok(())
}

/// Create the DOM counterpart of a model element, carrying its classes, and
/// register it in the element map.
fn create_mirror(
    document: &Document,
    rt: &mut Runtime,
    id: ElementId,
) -> Result<DomElement, JsValue> {
    let model = rt.page.element(id).map_err(js_error)?;
    let tag = match model.kind {
        ElementKind::Span => "span",
        ElementKind::Div | ElementKind::Image => "div",
    };
    let element = document.create_element(tag)?;
    element.set_class_name(&model.classes.join(" "));
    rt.dom.insert(id, element.clone());
    Ok(element)
}

/// Refresh every instance's layout in the model from the live DOM: wrapper
/// page offsets plus the rendered size of both images.
fn sync_layout(rt: &mut Runtime) {
    let targets: Vec<(ElementId, ElementId, ElementId)> = rt
        .manager
        .instances()
        .iter()
        .map(|i| (i.wrapper(), i.before_image(), i.after_image()))
        .collect();

    for (wrapper, before, after) in targets {
        if let Some(el) = rt.dom.get(&wrapper) {
            let origin = match el.dyn_ref::<HtmlElement>() {
                Some(html) => Point::new(html.offset_left() as f64, html.offset_top() as f64),
                None => Point::ZERO,
            };
            let rect = el.get_bounding_client_rect();
            let bounds = Rect::from_origin_size(origin, Size::new(rect.width(), rect.height()));
            let _ = rt.page.set_bounds(wrapper, bounds);
        }
        for image in [before, after] {
            if let Some(el) = rt.dom.get(&image) {
                let rect = el.get_bounding_client_rect();
                let bounds =
                    Rect::from_origin_size(Point::ZERO, Size::new(rect.width(), rect.height()));
                let _ = rt.page.set_bounds(image, bounds);
            }
        }
    }
}

/// Write the engine's current style and class state back to the live DOM.
fn flush(rt: &Runtime) -> Result<(), JsValue> {
    for instance in rt.manager.instances() {
        for id in [
            instance.wrapper(),
            instance.before_image(),
            instance.after_image(),
            instance.handle(),
        ] {
            let model = rt.page.element(id).map_err(js_error)?;
            let Some(element) = rt.dom.get(&id) else { continue };

            element.set_class_name(&model.classes.join(" "));

            let Some(html) = element.dyn_ref::<HtmlElement>() else {
                continue;
            };
            let style = html.style();
            if let Some(clip) = &model.style.clip {
                let property = match clip {
                    ClipRegion::Rect(_) => "clip",
                    ClipRegion::Polygon(_) => "clip-path",
                };
                style.set_property(property, &clip.to_css())?;
            }
            if let Some(left) = model.style.left {
                style.set_property("left", &format!("{left}px"))?;
            }
            if let Some(top) = model.style.top {
                style.set_property("top", &format!("{top}px"))?;
            }
            if let Some(height) = model.style.height {
                style.set_property("height", &format!("{height}px"))?;
            }
        }
    }
    Ok(())
}

/// Route one event through the manager and flush the result.
fn dispatch(runtime: &Rc<RefCell<Runtime>>, wrapper: ElementId, event: PointerEvent) {
    {
        let rt = &mut *runtime.borrow_mut();
        if let Err(err) = rt.manager.dispatch(&mut rt.page, wrapper, &event) {
            log::warn!("slider dispatch failed: {err}");
            return;
        }
    }
    if let Err(err) = flush(&runtime.borrow()) {
        log::warn!("slider flush failed: {err:?}");
    }
}

fn mouse_point(event: &MouseEvent) -> Point {
    Point::new(event.page_x() as f64, event.page_y() as f64)
}

fn touch_point(event: &TouchEvent) -> Option<Point> {
    let touch = event.changed_touches().get(0)?;
    Some(Point::new(touch.page_x() as f64, touch.page_y() as f64))
}

fn on_mouse(
    target: &web_sys::EventTarget,
    event: &str,
    callback: impl FnMut(MouseEvent) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(MouseEvent)>::new(callback);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn on_touch(
    target: &web_sys::EventTarget,
    event: &str,
    callback: impl FnMut(TouchEvent) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(TouchEvent)>::new(callback);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Install the per-instance listener set the interaction model expects.
fn wire_instances(runtime: &Rc<RefCell<Runtime>>) -> Result<(), JsValue> {
    struct Wiring {
        wrapper: ElementId,
        hover: bool,
        click_to_move: bool,
        wrapper_el: DomElement,
        target_id: ElementId,
        target_el: DomElement,
        handle_el: DomElement,
        first_image_el: Option<DomElement>,
    }

    let wirings: Vec<Wiring> = {
        let rt = runtime.borrow();
        rt.manager
            .instances()
            .iter()
            .filter_map(|instance| {
                let wrapper_el = rt.dom.get(&instance.wrapper())?.clone();
                let target_el = rt.dom.get(&instance.drag_target())?.clone();
                let handle_el = rt.dom.get(&instance.handle())?.clone();
                Some(Wiring {
                    wrapper: instance.wrapper(),
                    hover: instance.config().hover,
                    click_to_move: instance.config().click_to_move,
                    wrapper_el,
                    target_id: instance.drag_target(),
                    target_el,
                    handle_el,
                    first_image_el: rt.dom.get(&instance.before_image()).cloned(),
                })
            })
            .collect()
    };

    for wiring in wirings {
        let wrapper = wiring.wrapper;

        if wiring.hover {
            let rt = runtime.clone();
            on_mouse(&wiring.wrapper_el, "mouseenter", move |e| {
                sync_layout(&mut rt.borrow_mut());
                dispatch(&rt, wrapper, PointerEvent::Enter { position: mouse_point(&e) });
            })?;
            let rt = runtime.clone();
            on_mouse(&wiring.wrapper_el, "mouseleave", move |_| {
                dispatch(&rt, wrapper, PointerEvent::Leave);
            })?;
            let rt = runtime.clone();
            on_mouse(&wiring.wrapper_el, "mousemove", move |e| {
                dispatch(&rt, wrapper, PointerEvent::Move { position: mouse_point(&e) });
            })?;
        } else {
            let target = wiring.target_id;
            let rt = runtime.clone();
            on_mouse(&wiring.target_el, "mousedown", move |e| {
                sync_layout(&mut rt.borrow_mut());
                dispatch(&rt, wrapper, PointerEvent::Press { target, position: mouse_point(&e) });
            })?;
            let rt = runtime.clone();
            on_touch(&wiring.target_el, "touchstart", move |e| {
                let Some(position) = touch_point(&e) else { return };
                sync_layout(&mut rt.borrow_mut());
                // Raw touchstart carries no travel yet; the axis filter only
                // sees movement once the platform reports a swipe.
                let event = PointerEvent::TouchStart { target, position, travel: Vec2::ZERO };
                dispatch(&rt, wrapper, event);
            })?;
            let rt = runtime.clone();
            on_mouse(&wiring.wrapper_el, "mousemove", move |e| {
                dispatch(&rt, wrapper, PointerEvent::Move { position: mouse_point(&e) });
            })?;
            let rt = runtime.clone();
            on_touch(&wiring.wrapper_el, "touchmove", move |e| {
                if let Some(position) = touch_point(&e) {
                    dispatch(&rt, wrapper, PointerEvent::Move { position });
                }
            })?;
        }

        // Scrolling is always suppressed while touching the handle.
        on_touch(&wiring.handle_el, "touchmove", move |e| {
            e.prevent_default();
        })?;

        // A mouse-down on an image must not start a native image drag.
        if let Some(image) = &wiring.first_image_el {
            on_mouse(image, "mousedown", move |e| {
                e.prevent_default();
            })?;
        }

        if wiring.click_to_move {
            let rt = runtime.clone();
            on_mouse(&wiring.wrapper_el, "click", move |e| {
                sync_layout(&mut rt.borrow_mut());
                dispatch(&rt, wrapper, PointerEvent::Click { position: mouse_point(&e) });
            })?;
        }
    }
    Ok(())
}

/// Install the window-level shared listeners: release fan-out and resize.
fn wire_window(runtime: &Rc<RefCell<Runtime>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    for event in ["mouseup", "touchend"] {
        let rt = runtime.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            {
                let inner = &mut *rt.borrow_mut();
                if let Err(err) = inner.manager.dispatch_release(&mut inner.page) {
                    log::warn!("release fan-out failed: {err}");
                    return;
                }
            }
            if let Err(err) = flush(&rt.borrow()) {
                log::warn!("slider flush failed: {err:?}");
            }
        });
        window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let rt = runtime.clone();
    let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        {
            let inner = &mut *rt.borrow_mut();
            sync_layout(inner);
            if let Err(err) = inner.manager.dispatch_resize(&mut inner.page) {
                log::warn!("resize fan-out failed: {err}");
                return;
            }
        }
        if let Err(err) = flush(&rt.borrow()) {
            log::warn!("slider flush failed: {err:?}");
        }
    });
    window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

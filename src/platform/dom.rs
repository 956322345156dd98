//! Page updates for controller effects
//!
//! Every lookup is optional: a missing element skips its update.

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::consts::COMPACT_ANIMATION_DURATION;
use crate::stage::{STAGE_CLASSES, StagePresentation, aria_label, doll_filter};

const SHAKE_STYLE_ID: &str = "shake-style";
const SHAKE_ANIMATION: &str = "shake 0.5s cubic-bezier(.36,.07,.19,.97) both";
const SHAKE_KEYFRAMES: &str = "
    @keyframes shake {
        10%, 90% { transform: translate3d(-1px, 0, 0); }
        20%, 80% { transform: translate3d(2px, 0, 0); }
        30%, 50%, 70% { transform: translate3d(-4px, 0, 0); }
        40%, 60% { transform: translate3d(4px, 0, 0); }
    }
";

/// Stage container element
pub fn stage_element(document: &Document, rank: u8) -> Option<Element> {
    document.get_element_by_id(&format!("stage{}", rank))
}

/// The clickable child of a stage
pub fn stage_doll(document: &Document, rank: u8) -> Option<HtmlElement> {
    stage_element(document, rank)?
        .query_selector(".doll")
        .ok()??
        .dyn_into::<HtmlElement>()
        .ok()
}

/// Window inner size in CSS pixels
pub fn viewport_size(window: &Window) -> (f32, f32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w as f32, h as f32)
}

/// Make a stage's clickable element reachable from the keyboard
pub fn tag_doll(doll: &HtmlElement, rank: u8) {
    let _ = doll.set_attribute("tabindex", "0");
    let _ = doll.set_attribute("role", "button");
    let _ = doll.set_attribute("aria-label", &aria_label(rank));
    let style = doll.style();
    let _ = style.set_property("touch-action", "manipulation");
    let _ = style.set_property("cursor", "pointer");
}

/// Hover or press feedback on a stage's clickable element
pub fn highlight_doll(doll: &HtmlElement, on: bool) {
    let _ = doll.style().set_property("filter", doll_filter(on));
}

/// Toggle the pressed look while a finger is down
pub fn set_touch_active(doll: &HtmlElement, on: bool) {
    let classes = doll.class_list();
    let _ = if on {
        classes.add_1("touch-active")
    } else {
        classes.remove_1("touch-active")
    };
    highlight_doll(doll, on);
}

/// Slow the stage animations down for small screens
pub fn use_compact_animations(document: &Document) {
    let Some(root) = document
        .document_element()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let _ = root
        .style()
        .set_property("--animation-duration", COMPACT_ANIMATION_DURATION);
}

/// Replace every stage's presentation classes
pub fn apply_stages(document: &Document, stages: &[StagePresentation]) {
    for (i, presentation) in stages.iter().enumerate() {
        let Some(el) = stage_element(document, i as u8 + 1) else {
            continue;
        };
        let classes = el.class_list();
        for class in STAGE_CLASSES {
            let _ = classes.remove_1(class);
        }
        for class in presentation.classes() {
            let _ = classes.add_1(class);
        }
    }
}

/// Tint the starfield behind a stage
pub fn set_starfield(document: &Document, rank: u8, color: &str) {
    let Some(el) = document
        .get_element_by_id(&format!("starfield{}", rank))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let background = format!("radial-gradient(circle, {} 1px, transparent 1px)", color);
    let _ = el.style().set_property("background", &background);
}

pub fn show_final_message(document: &Document) {
    if let Some(el) = document.get_element_by_id("final-message") {
        let _ = el.class_list().add_1("active");
    }
}

/// Start or stop the page shake animation
pub fn set_shake(document: &Document, on: bool) {
    let Some(body) = document.body() else { return };
    if on {
        ensure_shake_keyframes(document);
        let _ = body.style().set_property("animation", SHAKE_ANIMATION);
    } else {
        let _ = body.style().remove_property("animation");
    }
}

fn ensure_shake_keyframes(document: &Document) {
    if document.get_element_by_id(SHAKE_STYLE_ID).is_some() {
        return;
    }
    let (Some(head), Ok(style)) = (document.head(), document.create_element("style")) else {
        return;
    };
    style.set_id(SHAKE_STYLE_ID);
    style.set_text_content(Some(SHAKE_KEYFRAMES));
    let _ = head.append_child(&style);
}

fn sparkle_id(id: u32) -> String {
    format!("sparkle-{}", id)
}

/// Sparkle marker at the pointer
pub fn add_sparkle(document: &Document, id: u32, pos: Vec2) {
    let (Some(body), Ok(el)) = (document.body(), document.create_element("div")) else {
        return;
    };
    el.set_id(&sparkle_id(id));
    el.set_class_name("click-effect");
    el.set_text_content(Some("✨"));
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let style = html.style();
        let _ = style.set_property("left", &format!("{}px", pos.x));
        let _ = style.set_property("top", &format!("{}px", pos.y));
    }
    let _ = body.append_child(&el);
}

pub fn remove_sparkle(document: &Document, id: u32) {
    if let Some(el) = document.get_element_by_id(&sparkle_id(id)) {
        el.remove();
    }
}

//! Leptos DragDrop Utilities
//!
//! Sortable lists for Leptos using mouse events.
//! Pressing an item starts a drag and drops a placeholder slot next to it;
//! moving the mouse walks the placeholder through the list and releasing
//! moves the item into the placeholder's slot.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Attribute carrying the item id on every sortable element
pub const ITEM_ATTR: &str = "data-sortable-id";
/// Attribute carrying the list key on a sortable container
pub const LIST_ATTR: &str = "data-sortable-list";
/// Attribute marking a drag handle inside an item
pub const HANDLE_ATTR: &str = "data-drag-handle";

/// Auto-scroll tuning
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollConfig {
    /// Distance in pixels from a viewport edge that triggers scrolling
    pub margin: f64,
    /// Pixels scrolled per mousemove event, per axis
    pub step: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { margin: 50.0, step: 5.0 }
    }
}

/// An active drag within one list
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub list: &'static str,
    pub item_id: u32,
    /// Index of the dragged item when the drag started
    pub from: usize,
    /// Placeholder position: it sits before the item at this index (len = end)
    pub slot: usize,
}

/// Move reported when the mouse is released
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropMove {
    pub list: &'static str,
    pub item_id: u32,
    pub from: usize,
    pub to: usize,
}

/// One rendered position in a sortable list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortSlot {
    Item(u32),
    Placeholder,
}

/// Sortable state signals
#[derive(Clone, Copy)]
pub struct SortableSignals {
    pub session_read: ReadSignal<Option<DragSession>>,
    pub session_write: WriteSignal<Option<DragSession>>,
}

pub fn create_sortable_signals() -> SortableSignals {
    let (session_read, session_write) = signal(None::<DragSession>);
    SortableSignals {
        session_read,
        session_write,
    }
}

/// Whether `item_id` is the item currently being dragged (tracked)
pub fn is_dragging(sortable: SortableSignals, item_id: u32) -> bool {
    sortable
        .session_read
        .with(|s| s.map(|s| s.item_id == item_id).unwrap_or(false))
}

// ========================
// Slot Arithmetic
// ========================

/// Placeholder slot for a pointer over the item at `target_index`.
///
/// Below the item's vertical midpoint the placeholder goes after it,
/// otherwise before it. Depends only on its inputs, so repeated identical
/// pointer positions always yield the same slot.
pub fn slot_for_pointer(target_index: usize, top: f64, height: f64, pointer_y: f64) -> usize {
    if pointer_y > top + height / 2.0 {
        target_index + 1
    } else {
        target_index
    }
}

/// Final index of the dragged item once the placeholder at `slot` is resolved
pub fn drop_index(from: usize, slot: usize) -> usize {
    if slot > from {
        slot - 1
    } else {
        slot
    }
}

/// Resolve a finished drag against the list's order at release time.
///
/// The slot always indexes the current order (that is where the placeholder
/// is rendered), so the dragged item's index is looked up again rather than
/// taken from the press. None when the item has left the list.
pub fn resolve_drop(session: &DragSession, order: &[u32]) -> Option<DropMove> {
    let from = order.iter().position(|id| *id == session.item_id)?;
    let slot = session.slot.min(order.len());
    Some(DropMove {
        list: session.list,
        item_id: session.item_id,
        from,
        to: drop_index(from, slot),
    })
}

/// Move the element at `from` to index `to`, shifting the others.
/// Returns false (leaving `order` untouched) when `from` is out of range.
pub fn move_item<T>(order: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= order.len() {
        return false;
    }
    let item = order.remove(from);
    let to = to.min(order.len());
    order.insert(to, item);
    true
}

/// Render order for a list, with the placeholder spliced in while this list
/// has an active drag.
pub fn layout_slots(order: &[u32], session: Option<DragSession>, list: &str) -> Vec<SortSlot> {
    let mut slots: Vec<SortSlot> = order.iter().copied().map(SortSlot::Item).collect();
    if let Some(session) = session.filter(|s| s.list == list) {
        let at = session.slot.min(slots.len());
        slots.insert(at, SortSlot::Placeholder);
    }
    slots
}

/// Scroll delta for a pointer at (x, y) in a viewport of (width, height).
/// Each axis is handled independently with a constant step.
pub fn autoscroll_delta(x: f64, y: f64, width: f64, height: f64, cfg: ScrollConfig) -> (f64, f64) {
    let dx = if x < cfg.margin {
        -cfg.step
    } else if x > width - cfg.margin {
        cfg.step
    } else {
        0.0
    };
    let dy = if y < cfg.margin {
        -cfg.step
    } else if y > height - cfg.margin {
        cfg.step
    } else {
        0.0
    };
    (dx, dy)
}

// ========================
// Event Handlers
// ========================

/// Create mousedown handler for a sortable item.
///
/// Starts a drag only when the press lands on the item element itself or on
/// a drag handle inside it, so buttons and editable names keep working.
pub fn make_on_mousedown(
    sortable: SortableSignals,
    list: &'static str,
    item_id: u32,
    order: Signal<Vec<u32>>,
) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || sortable.session_read.get_untracked().is_some() {
            return;
        }
        if !press_starts_drag(&ev) {
            return;
        }
        let Some(from) = order.with_untracked(|ids| ids.iter().position(|id| *id == item_id)) else {
            return;
        };
        ev.prevent_default();
        sortable.session_write.set(Some(DragSession {
            list,
            item_id,
            from,
            slot: from + 1,
        }));
    }
}

fn press_starts_drag(ev: &web_sys::MouseEvent) -> bool {
    let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
        return false;
    };
    if target.has_attribute(ITEM_ATTR) {
        return true;
    }
    matches!(target.closest(&format!("[{HANDLE_ATTR}]")), Ok(Some(_)))
}

/// Slot under the pointer, if it points at another item of the dragged list
fn pointed_slot<O>(session: &DragSession, ev: &web_sys::MouseEvent, order_of: &O) -> Option<usize>
where
    O: Fn(&'static str) -> Vec<u32>,
{
    let doc = web_sys::window()?.document()?;
    let under = doc.element_from_point(ev.client_x() as f32, ev.client_y() as f32)?;
    let item = under.closest(&format!("[{ITEM_ATTR}]")).ok()??;
    let list = item.closest(&format!("[{LIST_ATTR}]")).ok()??;
    if list.get_attribute(LIST_ATTR).as_deref() != Some(session.list) {
        return None;
    }
    let id: u32 = item.get_attribute(ITEM_ATTR)?.parse().ok()?;
    if id == session.item_id {
        return None;
    }
    let index = order_of(session.list).iter().position(|other| *other == id)?;
    let rect = item.get_bounding_client_rect();
    Some(slot_for_pointer(index, rect.top(), rect.height(), f64::from(ev.client_y())))
}

fn autoscroll(ev: &web_sys::MouseEvent, cfg: ScrollConfig) {
    let Some(win) = web_sys::window() else { return };
    let width = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let (dx, dy) = autoscroll_delta(f64::from(ev.client_x()), f64::from(ev.client_y()), width, height, cfg);
    if dx != 0.0 || dy != 0.0 {
        win.scroll_by_with_x_and_y(dx, dy);
    }
}

/// Bind document mousemove/mouseup handlers for every sortable list.
///
/// `order_of` returns the current item order of a list by key; `on_drop`
/// receives the resolved move after the placeholder is removed. Leaving a
/// list does not cancel the drag, only releasing the mouse ends it.
pub fn bind_global_handlers<O, F>(sortable: SortableSignals, scroll: ScrollConfig, order_of: O, on_drop: F)
where
    O: Fn(&'static str) -> Vec<u32> + 'static,
    F: Fn(DropMove) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let order_of = std::rc::Rc::new(order_of);
    let order_of_up = order_of.clone();
    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(session) = sortable.session_read.get_untracked() else {
            return;
        };
        ev.prevent_default();
        if let Some(slot) = pointed_slot(&session, &ev, &*order_of) {
            if slot != session.slot {
                sortable.session_write.set(Some(DragSession { slot, ..session }));
            }
        }
        autoscroll(&ev, scroll);
    });

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let Some(session) = sortable.session_read.get_untracked() else {
            return;
        };
        sortable.session_write.set(None);
        if let Some(mv) = resolve_drop(&session, &order_of_up(session.list)) {
            on_drop(mv);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
    on_mouseup.forget();
}

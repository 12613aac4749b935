use std::cell::RefCell;
use std::rc::Rc;

use trends_shared::{ClassChange, Flag, RowId, Visibility};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::dom;
use crate::error::ClientError;
use crate::page::PageContext;

struct HiderRows {
    ctx: Rc<PageContext>,
    rows: Vec<Element>,
    state: RefCell<Visibility>,
}

impl HiderRows {
    fn apply(&self, changes: &[ClassChange]) {
        for change in changes {
            let Some(row) = self.rows.get(change.row.0) else {
                continue;
            };
            let class = match change.flag {
                Flag::Hidden => &self.ctx.classes.hidden,
                Flag::Hiding => &self.ctx.classes.hiding,
            };
            row.class_list().toggle_with_force(class, change.on).ok();
        }
    }

    fn toggle(&self, hider: RowId) {
        let changes = self.state.borrow_mut().toggle(hider);
        self.apply(&changes);
    }
}

/// Register click handlers on every hider element and expand the one named
/// by the URL fragment. Returns the number of hiders registered.
pub fn register_hiders(ctx: &Rc<PageContext>) -> Result<usize, ClientError> {
    let rows = hider_elements(ctx);
    let tags: Vec<_> = rows.iter().map(dom::row_tags).collect();
    let state = Visibility::new(&tags, &ctx.classes);
    let hiders: Vec<RowId> = state.hiders().collect();
    if hiders.is_empty() {
        return Ok(0);
    }

    let page = Rc::new(HiderRows {
        ctx: Rc::clone(ctx),
        rows,
        state: RefCell::new(state),
    });
    for &hider in &hiders {
        bind_hider(&page, hider)?;
    }
    reveal_fragment(&page);
    Ok(hiders.len())
}

/// Every `.hider` element plus every element grouped under one, in
/// discovery order. Hiders need not be table rows.
fn hider_elements(ctx: &PageContext) -> Vec<Element> {
    let mut rows = dom::elements(&ctx.document.get_elements_by_class_name(&ctx.classes.hider));
    let owners: Vec<String> = rows
        .iter()
        .map(Element::id)
        .filter(|id| !id.is_empty())
        .collect();
    for owner in owners {
        let dependents = dom::elements(&ctx.document.get_elements_by_class_name(&owner));
        push_unique(&mut rows, dependents);
    }
    rows
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, more: impl IntoIterator<Item = T>) {
    for item in more {
        if !items.contains(&item) {
            items.push(item);
        }
    }
}

fn bind_hider(page: &Rc<HiderRows>, hider: RowId) -> Result<(), ClientError> {
    let element = page.rows[hider.0].clone();
    let page = Rc::clone(page);
    let on_click = Closure::<dyn Fn(Event)>::new(move |event: Event| {
        if clicked_link(&event) {
            return;
        }
        page.toggle(hider);
    });
    element
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|e| ClientError::js("binding hider", e))?;
    on_click.forget();
    Ok(())
}

/// Links inside a hider navigate instead of toggling.
fn clicked_link(event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .is_some_and(|target| matches!(target.closest("a"), Ok(Some(_))))
}

fn reveal_fragment(page: &HiderRows) {
    let Ok(hash) = page.ctx.window.location().hash() else {
        return;
    };
    let Some(id) = fragment_target(&hash) else {
        return;
    };
    let Some(reveal) = page.state.borrow_mut().reveal(id) else {
        tracing::debug!(id, "fragment does not name a hider");
        return;
    };
    page.apply(&reveal.changes);

    let Some(target) = page.rows.get(reveal.target.0) else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_block(ScrollLogicalPosition::Center);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

/// The element id named by a `location.hash` value.
fn fragment_target(hash: &str) -> Option<&str> {
    let id = hash.strip_prefix('#').unwrap_or(hash);
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::{fragment_target, push_unique};

    #[test]
    fn strips_the_hash() {
        assert_eq!(fragment_target("#row-7"), Some("row-7"));
        assert_eq!(fragment_target("row-7"), Some("row-7"));
    }

    #[test]
    fn dependents_are_collected_once() {
        let mut rows = vec![1, 2];
        push_unique(&mut rows, [2, 3, 1, 4, 3]);
        assert_eq!(rows, [1, 2, 3, 4]);
    }

    #[test]
    fn empty_fragments_name_nothing() {
        assert_eq!(fragment_target(""), None);
        assert_eq!(fragment_target("#"), None);
    }
}

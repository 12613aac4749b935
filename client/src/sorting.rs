use std::cell::RefCell;
use std::rc::Rc;

use trends_shared::{
    Body, Direction, Placement, RowId, RowSorter, SortController, SortHeader, SortRequest,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlTableElement, HtmlTableSectionElement};

use crate::dom;
use crate::error::ClientError;
use crate::page::PageContext;

/// Register a click handler on every header below each sortable element.
/// Returns the number of headers registered.
pub fn register_sortables(ctx: &Rc<PageContext>) -> Result<usize, ClientError> {
    let sortables = dom::elements(&ctx.document.get_elements_by_class_name(&ctx.classes.sortable));
    let mut registered = 0;
    for sortable in sortables {
        let Some(table) = sortable
            .closest("table")
            .map_err(|e| ClientError::js("finding sortable table", e))?
            .and_then(|table| table.dyn_into::<HtmlTableElement>().ok())
        else {
            tracing::warn!(class = %ctx.classes.sortable, "sortable element outside a table");
            continue;
        };

        let controller = Rc::new(RefCell::new(SortController::new()));
        for header in dom::elements(&sortable.get_elements_by_tag_name("th")) {
            let handle = controller
                .borrow_mut()
                .register(SortHeader::new(header_column(&header)));
            bind_header(ctx, &table, &controller, header, handle)?;
            registered += 1;
        }
    }
    Ok(registered)
}

fn header_column(header: &Element) -> usize {
    let Some(row) = header.parent_element() else {
        return 0;
    };
    let siblings = dom::elements(&row.children());
    let spans: Vec<_> = siblings.iter().map(dom::span).collect();
    let position = siblings
        .iter()
        .position(|sibling| sibling == header)
        .unwrap_or(0);
    SortHeader::from_row(&spans, position).column
}

fn bind_header(
    ctx: &Rc<PageContext>,
    table: &HtmlTableElement,
    controller: &Rc<RefCell<SortController>>,
    header: Element,
    handle: usize,
) -> Result<(), ClientError> {
    let ctx = Rc::clone(ctx);
    let table = table.clone();
    let controller = Rc::clone(controller);
    let target = header.clone();
    let on_click = Closure::<dyn Fn()>::new(move || {
        let Some(request) = controller.borrow_mut().activate(handle) else {
            return;
        };
        for body in dom::elements(&table.t_bodies()) {
            let Ok(body) = body.dyn_into::<HtmlTableSectionElement>() else {
                continue;
            };
            if let Err(err) = sort_body(&ctx, &body, request) {
                tracing::warn!(%err, "table body left partially sorted");
            }
        }
        if let Some(direction) = controller.borrow().indicator(handle) {
            show_indicator(&ctx, &table, &header, direction);
        }
    });
    target
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|e| ClientError::js("binding sort header", e))?;
    on_click.forget();
    Ok(())
}

fn sort_body(
    ctx: &PageContext,
    body: &HtmlTableSectionElement,
    request: SortRequest,
) -> Result<(), ClientError> {
    let elements = dom::elements(&body.rows());
    let model = Body::new(
        elements
            .iter()
            .map(|row| dom::read_row(row, &ctx.classes))
            .collect(),
    );

    let mut failure = None;
    let sorter = RowSorter::new(&model, request.column, request.direction, ctx.collator.as_ref());
    sorter.sort(&mut |row: RowId, placement: Placement| {
        let element = &elements[row.0];
        let moved = match placement {
            Placement::Append => body.append_child(element).map(drop),
            Placement::After(anchor) => elements[anchor.0].after_with_node_1(element),
        };
        if let Err(e) = moved {
            failure.get_or_insert_with(|| ClientError::js("moving table row", e));
        }
    });
    failure.map_or(Ok(()), Err)
}

fn show_indicator(ctx: &PageContext, table: &HtmlTableElement, header: &Element, direction: Direction) {
    let (asc, desc) = (&ctx.classes.ascending, &ctx.classes.descending);
    for th in dom::elements(&table.get_elements_by_tag_name("th")) {
        th.class_list().remove_2(asc, desc).ok();
    }
    let class = match direction {
        Direction::Ascending => asc,
        Direction::Descending => desc,
    };
    header.class_list().add_1(class).ok();
}

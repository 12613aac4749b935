//! Reading server-rendered table markup into the shared row model.

use trends_shared::{Cell, Row, RowKind, RowTags, Span, TableClasses, ValueOverride};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCollection, HtmlElement};

pub fn elements(collection: &HtmlCollection) -> Vec<Element> {
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .collect()
}

pub fn class_tokens(element: &Element) -> Vec<String> {
    let list = element.class_list();
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

pub fn row_tags(element: &Element) -> RowTags {
    let id = element.id();
    RowTags {
        id: (!id.is_empty()).then_some(id),
        classes: class_tokens(element),
    }
}

pub fn span(element: &Element) -> Span {
    Span::parse_or_default(element.get_attribute("colspan").as_deref())
}

pub fn read_cell(element: &Element, classes: &TableClasses) -> Cell {
    Cell {
        span: span(element),
        override_value: element
            .get_attribute(&classes.value_attribute)
            .map(|raw| parse_override(&raw)),
        inner_text: element
            .dyn_ref::<HtmlElement>()
            .map(HtmlElement::inner_text),
        text_content: element.text_content(),
    }
}

pub fn read_row(element: &Element, classes: &TableClasses) -> Row {
    let tags = row_tags(element);
    let kind = RowKind::classify(&tags, classes);
    let cells = elements(&element.children())
        .iter()
        .map(|cell| read_cell(cell, classes))
        .collect();
    Row::new(tags, kind, cells)
}

/// A value override holding a JSON string array sorts as a sequence.
pub fn parse_override(raw: &str) -> ValueOverride {
    if raw.trim_start().starts_with('[')
        && let Ok(items) = serde_json::from_str::<Vec<String>>(raw)
    {
        return ValueOverride::List(items);
    }
    ValueOverride::Text(raw.to_string())
}

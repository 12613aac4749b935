use std::rc::Rc;

use trends_shared::config::CONFIG_ELEMENT_ID;
use trends_shared::{Collate, TableClasses};
use web_sys::{Document, Window};

use crate::collation::BrowserCollation;
use crate::error::ClientError;
use crate::{hiding, sorting};

/// Everything the page's handlers share. Built once on load.
pub struct PageContext {
    pub window: Window,
    pub document: Document,
    pub classes: TableClasses,
    pub collator: Box<dyn Collate>,
}

impl PageContext {
    pub fn load() -> Result<Self, ClientError> {
        let window = web_sys::window().ok_or(ClientError::NoWindow)?;
        let document = window.document().ok_or(ClientError::NoDocument)?;
        let classes = load_classes(&document);
        let collator = Box::new(BrowserCollation::new(classes.locale.as_deref()));
        Ok(Self {
            window,
            document,
            classes,
            collator,
        })
    }
}

fn load_classes(document: &Document) -> TableClasses {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return TableClasses::default();
    };
    match TableClasses::from_json(&json) {
        Ok(classes) => classes,
        Err(err) => {
            tracing::warn!(%err, "falling back to default table classes");
            TableClasses::default()
        }
    }
}

/// Wire up sorting and hiding for the current document.
pub fn init() -> Result<(), ClientError> {
    let ctx = Rc::new(PageContext::load()?);
    let headers = sorting::register_sortables(&ctx)?;
    let hiders = hiding::register_hiders(&ctx)?;
    tracing::info!(headers, hiders, "table behaviour registered");
    Ok(())
}

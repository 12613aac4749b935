use std::cmp::Ordering;

use js_sys::{Array, Function, Intl, Object};
use trends_shared::Collate;
use wasm_bindgen::JsValue;

/// String ordering through the browser's `Intl.Collator`.
pub struct BrowserCollation {
    compare: Function,
}

impl BrowserCollation {
    pub fn new(locale: Option<&str>) -> Self {
        let locales = Array::new();
        match locale {
            Some(tag) if is_language_tag(tag) => {
                locales.push(&JsValue::from_str(tag));
            }
            Some(tag) => tracing::warn!(tag, "ignoring malformed collation locale"),
            None => {}
        }
        let collator = Intl::Collator::new(&locales, &Object::new());
        Self {
            compare: collator.compare(),
        }
    }
}

impl Collate for BrowserCollation {
    fn collate(&self, a: &str, b: &str) -> Ordering {
        self.compare
            .call2(&JsValue::NULL, &JsValue::from_str(a), &JsValue::from_str(b))
            .ok()
            .and_then(|result| result.as_f64())
            .and_then(|result| result.partial_cmp(&0.0))
            .unwrap_or_else(|| a.cmp(b))
    }
}

/// Loose BCP 47 shape check so `Intl.Collator` never throws on config input.
fn is_language_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag.split('-').all(|part| {
            (1..=8).contains(&part.len()) && part.chars().all(|c| c.is_ascii_alphanumeric())
        })
}

#[cfg(test)]
mod tests {
    use super::is_language_tag;

    #[test]
    fn accepts_language_tags() {
        assert!(is_language_tag("en"));
        assert!(is_language_tag("de-DE"));
        assert!(is_language_tag("zh-Hant-TW"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(!is_language_tag(""));
        assert!(!is_language_tag("en_US"));
        assert!(!is_language_tag("en--US"));
        assert!(!is_language_tag("a very long tag"));
    }
}

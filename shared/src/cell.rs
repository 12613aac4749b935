use std::fmt;

use crate::column::Span;

/// Explicit sort value attached to a cell, taking precedence over its text.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueOverride {
    Text(String),
    List(Vec<String>),
}

/// One table cell as seen by the sorter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub span: Span,
    pub override_value: Option<ValueOverride>,
    pub inner_text: Option<String>,
    pub text_content: Option<String>,
}

impl Cell {
    /// A single-column cell whose rendered and raw text are both `text`.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            inner_text: Some(text.clone()),
            text_content: Some(text),
            ..Self::default()
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_override(mut self, value: ValueOverride) -> Self {
        self.override_value = Some(value);
        self
    }

    /// Resolve the sort value: a non-empty override, then non-empty rendered
    /// text, then raw text content.
    pub fn value(&self) -> CellValue {
        match &self.override_value {
            Some(ValueOverride::List(items)) if !items.is_empty() => {
                return CellValue::List(items.clone());
            }
            Some(ValueOverride::Text(text)) if !text.is_empty() => {
                return CellValue::parse(text);
            }
            _ => {}
        }
        if let Some(text) = self.inner_text.as_deref().filter(|t| !t.is_empty()) {
            return CellValue::parse(text);
        }
        self.text_content
            .as_deref()
            .map(CellValue::parse)
            .unwrap_or(CellValue::Empty)
    }
}

/// A cell's extracted sort key.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl CellValue {
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return CellValue::Empty;
        }
        match parse_numeric(text) {
            Some(n) => CellValue::Number(n),
            None => CellValue::Text(text.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(text) => f.write_str(text),
            CellValue::List(items) => f.write_str(&items.join(",")),
        }
    }
}

/// Number parsing in the browser's `Number(text)` sense: surrounding
/// whitespace is ignored and whitespace alone is zero, unsigned `0x`/`0o`/`0b`
/// integers and signed `Infinity` are accepted, `inf`/`nan` spellings are not.
fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    if let Some((radix, digits)) = radix_prefix(trimmed) {
        return parse_radix(digits, radix);
    }
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    if unsigned == "Infinity" {
        return trimmed.parse::<f64>().ok();
    }
    if unsigned
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

fn radix_prefix(text: &str) -> Option<(u32, &str)> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    Some((radix, &text[2..]))
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0, |acc: f64, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        let cell = Cell::text("3 days ago").with_override(ValueOverride::Text("259200".into()));
        assert_eq!(cell.value(), CellValue::Number(259200.0));
    }

    #[test]
    fn empty_override_falls_through() {
        let cell = Cell::text("scout").with_override(ValueOverride::Text(String::new()));
        assert_eq!(cell.value(), CellValue::Text("scout".into()));
    }

    #[test]
    fn list_override() {
        let cell =
            Cell::text("cp_process").with_override(ValueOverride::List(vec!["a".into(), "b".into()]));
        assert_eq!(cell.value(), CellValue::List(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn falls_back_to_text_content() {
        let cell = Cell {
            inner_text: Some(String::new()),
            text_content: Some("koth_product".into()),
            ..Cell::default()
        };
        assert_eq!(cell.value(), CellValue::Text("koth_product".into()));
        assert_eq!(Cell::default().value(), CellValue::Empty);
    }

    #[test]
    fn numeric_parsing() {
        assert_eq!(CellValue::parse("42"), CellValue::Number(42.0));
        assert_eq!(CellValue::parse(" -1.5 "), CellValue::Number(-1.5));
        assert_eq!(CellValue::parse("1e3"), CellValue::Number(1000.0));
        assert_eq!(CellValue::parse("Infinity"), CellValue::Number(f64::INFINITY));
        assert_eq!(CellValue::parse("inf"), CellValue::Text("inf".into()));
        assert_eq!(CellValue::parse("NaN"), CellValue::Text("NaN".into()));
        assert_eq!(CellValue::parse("12%"), CellValue::Text("12%".into()));
        assert_eq!(CellValue::parse(""), CellValue::Empty);
    }

    #[test]
    fn numeric_parsing_follows_browser_number() {
        assert_eq!(CellValue::parse("0x10"), CellValue::Number(16.0));
        assert_eq!(CellValue::parse("0o17"), CellValue::Number(15.0));
        assert_eq!(CellValue::parse("0B101"), CellValue::Number(5.0));
        assert_eq!(CellValue::parse("-0x10"), CellValue::Text("-0x10".into()));
        assert_eq!(CellValue::parse("0x"), CellValue::Text("0x".into()));
        assert_eq!(CellValue::parse("0x1g"), CellValue::Text("0x1g".into()));
        assert_eq!(CellValue::parse("-Infinity"), CellValue::Number(f64::NEG_INFINITY));
        // Whitespace-only text is zero, unlike a truly empty cell.
        assert_eq!(CellValue::parse("   "), CellValue::Number(0.0));
        assert_eq!(CellValue::parse(" \n"), CellValue::Number(0.0));
    }

    #[test]
    fn display_joins_lists() {
        let value = CellValue::List(vec!["x".into(), "y".into()]);
        assert_eq!(value.to_string(), "x,y");
    }
}

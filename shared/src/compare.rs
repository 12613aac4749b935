use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

/// Locale-aware string ordering.
pub trait Collate {
    fn collate(&self, a: &str, b: &str) -> Ordering;
}

/// Plain code point ordering, for hosts without collation data.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodepointCollation;

impl Collate for CodepointCollation {
    fn collate(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

#[cfg(feature = "icu")]
pub use icu_collation::IcuCollation;

#[cfg(feature = "icu")]
mod icu_collation {
    use std::cmp::Ordering;
    use std::fmt;

    use icu::collator::{Collator, CollatorBorrowed, options::CollatorOptions};
    use icu::locale::{Locale, locale};

    use super::Collate;

    /// ICU4X root or tailored collation.
    pub struct IcuCollation {
        locale: Locale,
        collator: Option<CollatorBorrowed<'static>>,
    }

    impl IcuCollation {
        /// Build a collator for `locale`. Unknown or unparsable tags use the root
        /// collation; if no collation data loads at all, code point order is used.
        pub fn new(locale: Option<&str>) -> Self {
            let locale: Locale = locale
                .and_then(|tag| match tag.parse() {
                    Ok(locale) => Some(locale),
                    Err(err) => {
                        tracing::warn!(tag, %err, "ignoring unparsable collation locale");
                        None
                    }
                })
                .unwrap_or(locale!("und"));
            let collator = match Collator::try_new(locale.clone().into(), CollatorOptions::default()) {
                Ok(collator) => Some(collator),
                Err(err) => {
                    tracing::warn!(%locale, %err, "collation data unavailable");
                    None
                }
            };
            Self { locale, collator }
        }

        pub fn locale(&self) -> &Locale {
            &self.locale
        }
    }

    impl Default for IcuCollation {
        fn default() -> Self {
            Self::new(None)
        }
    }

    impl fmt::Debug for IcuCollation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("IcuCollation")
                .field("locale", &self.locale)
                .field("loaded", &self.collator.is_some())
                .finish()
        }
    }

    impl Collate for IcuCollation {
        fn collate(&self, a: &str, b: &str) -> Ordering {
            match &self.collator {
                Some(collator) => collator.compare(a, b),
                None => a.cmp(b),
            }
        }
    }
}

/// Compare two cell values in `direction`.
///
/// Numbers compare numerically, lists lexicographically, text through the
/// collator. Values of different kinds rank `Empty < Number < Text < List`.
/// Descending swaps the operands rather than negating the result.
pub fn compare_values<C: Collate + ?Sized>(
    a: &CellValue,
    b: &CellValue,
    direction: Direction,
    collator: &C,
) -> Ordering {
    match direction {
        Direction::Ascending => compare_ascending(a, b, collator),
        Direction::Descending => compare_ascending(b, a, collator),
    }
}

fn compare_ascending<C: Collate + ?Sized>(a: &CellValue, b: &CellValue, collator: &C) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (CellValue::List(x), CellValue::List(y)) => x.cmp(y),
        (CellValue::Text(x), CellValue::Text(y)) => collator.collate(x, y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &CellValue) -> u8 {
    match value {
        CellValue::Empty => 0,
        CellValue::Number(_) => 1,
        CellValue::Text(_) => 2,
        CellValue::List(_) => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::parse(s)
    }

    fn sorted<C: Collate>(values: &[&str], direction: Direction, collator: &C) -> Vec<String> {
        let mut values: Vec<CellValue> = values.iter().map(|v| text(v)).collect();
        values.sort_by(|a, b| compare_values(a, b, direction, collator));
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn numbers_sort_numerically() {
        let collator = CodepointCollation;
        assert_eq!(sorted(&["10", "2", "33"], Direction::Ascending, &collator), ["2", "10", "33"]);
        assert_eq!(sorted(&["10", "2", "33"], Direction::Descending, &collator), ["33", "10", "2"]);
    }

    #[test]
    fn empty_is_minimal() {
        let collator = CodepointCollation;
        let empty = CellValue::Empty;
        assert_eq!(
            compare_values(&empty, &text("a"), Direction::Ascending, &collator),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&empty, &text("-5"), Direction::Ascending, &collator),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&empty, &empty, Direction::Descending, &collator),
            Ordering::Equal
        );
    }

    #[test]
    fn lists_compare_lexicographically() {
        let a = CellValue::List(vec!["a".into(), "z".into()]);
        let b = CellValue::List(vec!["b".into()]);
        let collator = CodepointCollation;
        assert_eq!(compare_values(&a, &b, Direction::Ascending, &collator), Ordering::Less);
        assert_eq!(compare_values(&a, &b, Direction::Descending, &collator), Ordering::Greater);
    }

    #[test]
    fn mixed_kinds_rank_by_kind() {
        let collator = CodepointCollation;
        let cases = [
            (text("9"), text("1a")),
            (text("100"), CellValue::List(vec!["0".into()])),
            (text("zzz"), CellValue::List(vec!["a".into()])),
        ];
        for (lower, higher) in cases {
            assert_eq!(
                compare_values(&lower, &higher, Direction::Ascending, &collator),
                Ordering::Less
            );
        }
    }

    /// Collator that is not antisymmetric: everything is "less".
    struct AlwaysLess;

    impl Collate for AlwaysLess {
        fn collate(&self, _: &str, _: &str) -> Ordering {
            Ordering::Less
        }
    }

    #[test]
    fn descending_swaps_operands_instead_of_negating() {
        let (a, b) = (text("x"), text("y"));
        assert_eq!(compare_values(&a, &b, Direction::Ascending, &AlwaysLess), Ordering::Less);
        // Negation would have produced Greater here.
        assert_eq!(compare_values(&a, &b, Direction::Descending, &AlwaysLess), Ordering::Less);
    }

    #[test]
    fn direction_toggles() {
        assert_eq!(Direction::Ascending.toggled(), Direction::Descending);
        assert_eq!(Direction::Descending.toggled(), Direction::Ascending);
    }

    #[cfg(feature = "icu")]
    mod icu_collator {
        use icu::locale::locale;

        use super::*;

        #[test]
        fn text_uses_collation_not_bytes() {
            let collator = IcuCollation::default();
            assert_eq!(
                sorted(&["banana", "Cherry", "apple"], Direction::Ascending, &collator),
                ["apple", "banana", "Cherry"]
            );
            assert_eq!(CodepointCollation.collate("Cherry", "apple"), Ordering::Less);
        }

        #[test]
        fn bad_locale_falls_back_to_root() {
            let collator = IcuCollation::new(Some("not a locale!"));
            assert_eq!(collator.locale(), &locale!("und"));
            assert_eq!(collator.collate("a", "B"), Ordering::Less);
        }
    }
}

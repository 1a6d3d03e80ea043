//! Display-side derivations: categories, filtering and random selection.
//!
//! Nothing here prints. A [`QuoteView`] sink receives the results so the
//! same logic drives a terminal, a test recorder or anything else.

use rand::Rng;

use crate::constants::ALL_CATEGORIES;
use crate::quote::{Quote, QuoteCollection};

/// Shown when the current filter matches no quotes.
pub const EMPTY_PLACEHOLDER: &str = "No quotes found for this category.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Failure,
}

/// A transient, user-facing status message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Failure,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == StatusKind::Success
    }
}

/// Rendering surface the presenter and sync loop call into.
pub trait QuoteView {
    fn show_quote(&mut self, quote: &Quote);
    fn show_empty(&mut self);
    fn show_categories(&mut self, categories: &[String], selected: &str);
    fn show_status(&mut self, status: &Status);
}

/// `"all"` followed by each category in order of first appearance.
pub fn distinct_categories(collection: &QuoteCollection) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for quote in collection {
        if !categories.iter().any(|c| *c == quote.category) {
            categories.push(quote.category.clone());
        }
    }
    categories
}

/// Every quote for `"all"`, otherwise those whose category matches exactly.
pub fn filter_by_category<'a>(collection: &'a QuoteCollection, category: &str) -> Vec<&'a Quote> {
    if category == ALL_CATEGORIES {
        return collection.iter().collect();
    }
    collection
        .iter()
        .filter(|q| q.category == category)
        .collect()
}

/// Uniform pick over `items`. `None` is the "no quotes" signal.
pub fn pick_random<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..items.len());
    items.get(idx)
}

/// Keep `requested` only if it is still a known category, else `"all"`.
pub fn resolve_filter<'a>(categories: &'a [String], requested: Option<&str>) -> &'a str {
    requested
        .and_then(|r| categories.iter().find(|c| c.as_str() == r))
        .map(String::as_str)
        .unwrap_or(ALL_CATEGORIES)
}

/// One full refresh: category list, filtered pick, quote or placeholder.
/// Returns the quote that was shown.
pub fn render<V: QuoteView + ?Sized, R: Rng + ?Sized>(
    view: &mut V,
    collection: &QuoteCollection,
    filter: Option<&str>,
    rng: &mut R,
) -> Option<Quote> {
    let categories = distinct_categories(collection);
    let selected = resolve_filter(&categories, filter);
    view.show_categories(&categories, selected);

    let filtered = filter_by_category(collection, selected);
    match pick_random(&filtered, rng) {
        Some(quote) => {
            view.show_quote(quote);
            Some((*quote).clone())
        }
        None => {
            view.show_empty();
            None
        }
    }
}

pub fn format_quote(quote: &Quote) -> String {
    format!("\"{}\"\n- {}", quote.text, quote.category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn sample() -> QuoteCollection {
        QuoteCollection::from(vec![
            Quote::new("a", "X"),
            Quote::new("b", "Y"),
            Quote::new("c", "X"),
        ])
    }

    #[derive(Default)]
    struct Recorder {
        quotes: Vec<Quote>,
        empties: usize,
        categories: Vec<(Vec<String>, String)>,
    }

    impl QuoteView for Recorder {
        fn show_quote(&mut self, quote: &Quote) {
            self.quotes.push(quote.clone());
        }
        fn show_empty(&mut self) {
            self.empties += 1;
        }
        fn show_categories(&mut self, categories: &[String], selected: &str) {
            self.categories
                .push((categories.to_vec(), selected.to_string()));
        }
        fn show_status(&mut self, _status: &Status) {}
    }

    #[test]
    fn test_distinct_categories_first_appearance() {
        assert_eq!(distinct_categories(&sample()), vec!["all", "X", "Y"]);
    }

    #[test]
    fn test_distinct_categories_empty() {
        assert_eq!(distinct_categories(&QuoteCollection::new()), vec!["all"]);
    }

    #[test]
    fn test_distinct_categories_not_sorted() {
        let quotes = QuoteCollection::from(vec![Quote::new("1", "Zen"), Quote::new("2", "Art")]);
        assert_eq!(distinct_categories(&quotes), vec!["all", "Zen", "Art"]);
    }

    #[test]
    fn test_filter_all_returns_everything() {
        let quotes = sample();
        let filtered = filter_by_category(&quotes, "all");
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_filter_exact_match() {
        let quotes = sample();
        let texts: Vec<&str> = filter_by_category(&quotes, "X")
            .iter()
            .map(|q| q.text.as_str())
            .collect();
        assert_eq!(texts, vec!["a", "c"]);
        assert!(filter_by_category(&quotes, "x").is_empty());
    }

    #[test]
    fn test_pick_random_empty_signal() {
        let empty: Vec<Quote> = Vec::new();
        assert!(pick_random(&empty, &mut rng()).is_none());
    }

    #[test]
    fn test_pick_random_stays_in_bounds_and_covers() {
        let items = [1, 2, 3];
        let mut rng = rng();
        let mut seen = [false; 3];
        for _ in 0..200 {
            let v = *pick_random(&items, &mut rng).unwrap();
            seen[v - 1] = true;
        }
        assert!(seen.iter().all(|s| *s), "every index should be reachable");
    }

    #[test]
    fn test_pick_random_is_deterministic_with_seed() {
        let quotes = sample();
        let a = pick_random(quotes.as_slice(), &mut rng()).cloned();
        let b = pick_random(quotes.as_slice(), &mut rng()).cloned();
        assert_eq!(a, b);
    }

    #[test]
    fn test_resolve_filter() {
        let categories = distinct_categories(&sample());
        assert_eq!(resolve_filter(&categories, Some("Y")), "Y");
        assert_eq!(resolve_filter(&categories, Some("Gone")), "all");
        assert_eq!(resolve_filter(&categories, None), "all");
    }

    #[test]
    fn test_render_shows_quote_from_filter() {
        let mut view = Recorder::default();
        let shown = render(&mut view, &sample(), Some("Y"), &mut rng());
        assert_eq!(shown, Some(Quote::new("b", "Y")));
        assert_eq!(view.quotes, vec![Quote::new("b", "Y")]);
        assert_eq!(view.categories[0].1, "Y");
    }

    #[test]
    fn test_render_empty_collection_shows_placeholder() {
        let mut view = Recorder::default();
        let shown = render(&mut view, &QuoteCollection::new(), None, &mut rng());
        assert!(shown.is_none());
        assert_eq!(view.empties, 1);
        assert!(view.quotes.is_empty());
    }

    #[test]
    fn test_format_quote() {
        let q = Quote::new("Be kind.", "Life");
        assert_eq!(format_quote(&q), "\"Be kind.\"\n- Life");
    }
}

//! Transient filter state for the product list.
//!
//! Exists only for the page session; the backend does the actual narrowing,
//! this module just tracks the current selections and turns them into query
//! parameters.

/// One dropdown-style selector: a list of options behind an "All ..."
/// sentinel, plus the current choice.
#[derive(Debug, Clone)]
pub struct Selector {
    sentinel: &'static str,
    options: Vec<String>,
    selected: Option<String>,
}

impl Selector {
    pub fn new(sentinel: &'static str) -> Self {
        Self {
            sentinel,
            options: Vec::new(),
            selected: None,
        }
    }

    pub fn sentinel(&self) -> &'static str {
        self.sentinel
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Replace the option list after a refresh. Blank entries are dropped.
    /// The previous choice survives if still present, otherwise the selector
    /// falls back to the sentinel.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options
            .into_iter()
            .filter(|o| !o.trim().is_empty())
            .collect();
        if let Some(current) = &self.selected {
            if !self.options.contains(current) {
                self.selected = None;
            }
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Label shown in the filter bar: the choice, or the sentinel.
    pub fn label(&self) -> &str {
        self.selected.as_deref().unwrap_or(self.sentinel)
    }

    /// Cycle forward through sentinel -> options -> sentinel.
    pub fn select_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let next = match self.position() {
            None => Some(0),
            Some(i) if i + 1 < self.options.len() => Some(i + 1),
            Some(_) => None,
        };
        self.selected = next.map(|i| self.options[i].clone());
    }

    /// Cycle backward through sentinel -> options -> sentinel.
    pub fn select_previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let previous = match self.position() {
            None => Some(self.options.len() - 1),
            Some(0) => None,
            Some(i) => Some(i - 1),
        };
        self.selected = previous.map(|i| self.options[i].clone());
    }

    /// Drop the selection but keep the options.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Back to the pristine sentinel-only state.
    pub fn reset(&mut self) {
        self.options.clear();
        self.selected = None;
    }

    fn position(&self) -> Option<usize> {
        let current = self.selected.as_deref()?;
        self.options.iter().position(|o| o == current)
    }
}

/// The combination of search text, category, subcategory, and brand used to
/// narrow the product list query.
#[derive(Debug, Clone)]
pub struct FilterSelection {
    pub search: String,
    pub category: Selector,
    pub subcategory: Selector,
    pub brand: Selector,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self {
            search: String::new(),
            category: Selector::new("All Categories"),
            subcategory: Selector::new("All Subcategories"),
            brand: Selector::new("All Brands"),
        }
    }

    /// Query parameters for the product listing, empty selections omitted.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if !self.search.trim().is_empty() {
            params.push(("search", self.search.trim()));
        }
        if let Some(category) = self.category.selected() {
            params.push(("category", category));
        }
        if let Some(subcategory) = self.subcategory.selected() {
            params.push(("subcategory", subcategory));
        }
        if let Some(brand) = self.brand.selected() {
            params.push(("brand", brand));
        }
        params
    }

    pub fn is_empty(&self) -> bool {
        self.params().is_empty()
    }

    /// Reset everything. Subcategory options are emptied outright; they only
    /// repopulate on the next option-list refresh.
    pub fn clear(&mut self) {
        self.search.clear();
        self.category.clear_selection();
        self.brand.clear_selection();
        self.subcategory.reset();
    }
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_refresh_preserves_existing_selection() {
        let mut selector = Selector::new("All Brands");
        selector.set_options(strings(&["Dell", "Sony"]));
        selector.select_next();
        assert_eq!(selector.selected(), Some("Dell"));

        selector.set_options(strings(&["Dell", "HP"]));
        assert_eq!(selector.selected(), Some("Dell"));
    }

    #[test]
    fn test_refresh_falls_back_to_sentinel_when_choice_gone() {
        let mut selector = Selector::new("All Brands");
        selector.set_options(strings(&["Dell", "Sony"]));
        selector.select_next();
        selector.set_options(strings(&["HP"]));
        assert_eq!(selector.selected(), None);
        assert_eq!(selector.label(), "All Brands");
    }

    #[test]
    fn test_blank_options_dropped() {
        let mut selector = Selector::new("All Brands");
        selector.set_options(strings(&["Dell", "", "  ", "Sony"]));
        assert_eq!(selector.options(), &["Dell".to_string(), "Sony".to_string()]);
    }

    #[test]
    fn test_cycling_wraps_through_sentinel() {
        let mut selector = Selector::new("All Categories");
        selector.set_options(strings(&["Tools", "Toys"]));
        selector.select_next();
        assert_eq!(selector.selected(), Some("Tools"));
        selector.select_next();
        assert_eq!(selector.selected(), Some("Toys"));
        selector.select_next();
        assert_eq!(selector.selected(), None);
        selector.select_previous();
        assert_eq!(selector.selected(), Some("Toys"));
    }

    #[test]
    fn test_params_skip_empty_selections() {
        let mut filters = FilterSelection::new();
        assert!(filters.params().is_empty());
        assert!(filters.is_empty());

        filters.search = "lamp".to_string();
        filters.category.set_options(strings(&["Furniture"]));
        filters.category.select_next();

        let params = filters.params();
        assert_eq!(
            params,
            vec![("search", "lamp"), ("category", "Furniture")]
        );
    }

    #[test]
    fn test_search_is_trimmed() {
        let mut filters = FilterSelection::new();
        filters.search = "  lamp ".to_string();
        assert_eq!(filters.params(), vec![("search", "lamp")]);
        filters.search = "   ".to_string();
        assert!(filters.params().is_empty());
    }

    #[test]
    fn test_clear_resets_subcategory_options() {
        let mut filters = FilterSelection::new();
        filters.search = "lamp".to_string();
        filters.brand.set_options(strings(&["IKEA"]));
        filters.brand.select_next();
        filters.subcategory.set_options(strings(&["Lighting"]));
        filters.subcategory.select_next();

        filters.clear();

        assert!(filters.is_empty());
        assert!(filters.subcategory.options().is_empty());
        assert_eq!(filters.subcategory.label(), "All Subcategories");
        // Brand keeps its option list, just not the choice
        assert_eq!(filters.brand.options().len(), 1);
    }
}

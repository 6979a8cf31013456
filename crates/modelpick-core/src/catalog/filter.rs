//! Incremental search over a catalog.
//!
//! The filtered view is always derived from `(catalog, query)` on demand; no
//! filtered list is ever stored.

use super::ModelDescriptor;

/// Catalogs larger than this show the search input.
pub const SEARCH_THRESHOLD: usize = 10;

/// Whether a catalog of `catalog_size` entries gets a search input.
pub fn search_visible(catalog_size: usize) -> bool {
    catalog_size > SEARCH_THRESHOLD
}

/// Returns the entries matching `query`, in catalog order.
///
/// A blank query returns the whole catalog. Otherwise an entry matches when
/// its name, id or description contains the lower-cased query as a substring.
pub fn filter<'a>(catalog: &'a [ModelDescriptor], query: &str) -> Vec<&'a ModelDescriptor> {
    if query.trim().is_empty() {
        return catalog.iter().collect();
    }

    let query = query.to_lowercase();
    catalog
        .iter()
        .filter(|model| matches_query(model, &query))
        .collect()
}

fn matches_query(model: &ModelDescriptor, query: &str) -> bool {
    model.name.to_lowercase().contains(query)
        || model.id.to_lowercase().contains(query)
        || model
            .description
            .as_ref()
            .is_some_and(|desc| desc.to_lowercase().contains(query))
}

/// Query text owned by the search input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query: String,
}

impl SearchState {
    pub fn query(&self) -> &str {
        &self.query
    }

    /// True when the query narrows the catalog (non-blank).
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
    }

    /// Deletes the word before the cursor along with trailing whitespace.
    pub fn clear_word_left(&mut self) {
        let trimmed_len = self.query.trim_end().len();
        self.query.truncate(trimmed_len);
        let keep = self
            .query
            .char_indices()
            .rev()
            .find(|(_, ch)| ch.is_whitespace())
            .map_or(0, |(idx, ch)| idx + ch.len_utf8());
        self.query.truncate(keep);
    }

    /// Resets to the never-searched state.
    pub fn clear(&mut self) {
        self.query.clear();
    }

    pub fn visible<'a>(&self, catalog: &'a [ModelDescriptor]) -> Vec<&'a ModelDescriptor> {
        filter(catalog, &self.query)
    }
}

//! Search result view

use crate::error::{Error, Result};
use crate::model::show::Show;

/// A read-only, index-addressable view over the shows matched by one search
/// call.
///
/// Shows are kept in the order the service returned them; the service
/// promises that a perfect match, if any, comes first. The term and language
/// that produced the result are kept for display purposes.
#[derive(Debug)]
pub struct Search {
    shows: Vec<Show>,
    term: String,
    language: String,
}

impl Search {
    pub(crate) fn new(shows: Vec<Show>, term: &str, language: &str) -> Self {
        Self {
            shows,
            term: term.to_string(),
            language: language.to_string(),
        }
    }

    /// The search term that produced this result
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The language the search was made in
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }

    /// The show at `index`.
    ///
    /// # Errors
    /// `Error::IndexNotFound` when the index is out of range.
    pub fn get(&self, index: usize) -> Result<&Show> {
        self.shows
            .get(index)
            .ok_or_else(|| Error::IndexNotFound(format!("search index {index}")))
    }

    /// Mutable access to the show at `index`, needed for operations that
    /// populate season data.
    ///
    /// # Errors
    /// `Error::IndexNotFound` when the index is out of range.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Show> {
        self.shows
            .get_mut(index)
            .ok_or_else(|| Error::IndexNotFound(format!("search index {index}")))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Show> {
        self.shows.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Show> {
        self.shows.iter_mut()
    }
}

impl IntoIterator for Search {
    type Item = Show;
    type IntoIter = std::vec::IntoIter<Show>;

    fn into_iter(self) -> Self::IntoIter {
        self.shows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Search {
    type Item = &'a Show;
    type IntoIter = std::slice::Iter<'a, Show>;

    fn into_iter(self) -> Self::IntoIter {
        self.shows.iter()
    }
}

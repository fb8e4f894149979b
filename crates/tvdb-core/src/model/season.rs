//! Season entity: an ordered collection of episodes

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeBounds;

use crate::error::{Error, Result};
use crate::model::clamp_range;
use crate::model::episode::Episode;

/// The episodes of one season, keyed by episode number.
///
/// Iteration always yields episodes in ascending episode number, regardless
/// of the order they were added in.
#[derive(Debug, Clone, Default)]
pub struct Season {
    season_number: u32,
    episodes: BTreeMap<u32, Episode>,
}

impl Season {
    pub(crate) fn new(season_number: u32) -> Self {
        Self {
            season_number,
            episodes: BTreeMap::new(),
        }
    }

    pub fn season_number(&self) -> u32 {
        self.season_number
    }

    /// Add an episode, keyed by its `EpisodeNumber`. An existing episode
    /// with the same number is overwritten.
    ///
    /// # Errors
    /// `Error::BadData` when the episode carries no usable number.
    pub(crate) fn push(&mut self, episode: Episode) -> Result<()> {
        let number = episode.episode_number()?;
        self.episodes.insert(number, episode);
        Ok(())
    }

    /// The episode with the given number.
    ///
    /// # Errors
    /// `Error::IndexNotFound` when the number does not exist.
    pub fn episode(&self, number: u32) -> Result<&Episode> {
        self.episodes
            .get(&number)
            .ok_or_else(|| Error::IndexNotFound(format!("Episode {number}")))
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Episodes in ascending episode number. Reverse with `.rev()`.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Episode> {
        self.episodes.values()
    }

    /// Episodes at the sorted positions covered by `range`. Out-of-range
    /// bounds are clamped, so a fully out-of-range slice is empty rather
    /// than an error.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Vec<&Episode> {
        let (start, end) = clamp_range(range, self.episodes.len());
        self.episodes.values().skip(start).take(end - start).collect()
    }

    /// The first episode matching the predicate, in ascending order
    pub fn find<P>(&self, mut predicate: P) -> Option<&Episode>
    where
        P: FnMut(&Episode) -> bool,
    {
        self.episodes.values().find(|ep| predicate(ep))
    }

    /// All episodes matching the predicate
    pub fn filter<P>(&self, mut predicate: P) -> Vec<&Episode>
    where
        P: FnMut(&Episode) -> bool,
    {
        self.episodes.values().filter(|ep| predicate(ep)).collect()
    }

    /// Like [`find`], for predicates that can fail. A predicate error stops
    /// the scan and is reported as `Error::Predicate`.
    ///
    /// [`find`]: Season::find
    pub fn try_find<P>(&self, mut predicate: P) -> Result<Option<&Episode>>
    where
        P: FnMut(&Episode) -> Result<bool>,
    {
        for episode in self.episodes.values() {
            if predicate(episode).map_err(|e| Error::Predicate(e.to_string()))? {
                return Ok(Some(episode));
            }
        }
        Ok(None)
    }

    /// Like [`filter`], for predicates that can fail.
    ///
    /// [`filter`]: Season::filter
    pub fn try_filter<P>(&self, mut predicate: P) -> Result<Vec<&Episode>>
    where
        P: FnMut(&Episode) -> Result<bool>,
    {
        let mut matches = Vec::new();
        for episode in self.episodes.values() {
            if predicate(episode).map_err(|e| Error::Predicate(e.to_string()))? {
                matches.push(episode);
            }
        }
        Ok(matches)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Season {:03}>", self.season_number)
    }
}

impl<'a> IntoIterator for &'a Season {
    type Item = &'a Episode;
    type IntoIter = std::collections::btree_map::Values<'a, u32, Episode>;

    fn into_iter(self) -> Self::IntoIter {
        self.episodes.values()
    }
}

//! Show entity with lazy season population

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeBounds;
use std::sync::Arc;

use tracing::debug;

use crate::api::Context;
use crate::attrs::{AttributeMap, Value};
use crate::error::{Error, Result};
use crate::mirror::type_mask;
use crate::model::actor::Actor;
use crate::model::banner::Banner;
use crate::model::clamp_range;
use crate::model::episode::Episode;
use crate::model::season::Season;
use crate::urls;
use crate::xml::Document;

/// A single show: its top-level fields plus, once populated, every season
/// and episode.
///
/// A show coming out of a search carries only the basic field set and no
/// season data. The full payload is fetched on the first call to any
/// accessor that needs it (`num_seasons`, `seasons`, `season`, `slice`,
/// `find`, `filter`) or explicitly via [`update`]; the fetched top-level
/// fields are merged over the basic set, incoming values winning. Exactly
/// one fetch happens per show unless [`update`] is called again.
///
/// [`update`]: Show::update
pub struct Show {
    ctx: Arc<Context>,
    language: String,
    data: AttributeMap,
    seasons: BTreeMap<u32, Season>,
    actors: Vec<Actor>,
    banners: Vec<Banner>,
    populated: bool,
}

impl Show {
    pub(crate) fn new(ctx: Arc<Context>, language: &str, data: AttributeMap) -> Self {
        Self {
            ctx,
            language: language.to_string(),
            data,
            seasons: BTreeMap::new(),
            actors: Vec::new(),
            banners: Vec::new(),
            populated: false,
        }
    }

    /// Look a top-level field up by name.
    ///
    /// # Errors
    /// `Error::AttributeNotFound` when the show does not carry the field.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.data.get(name).ok_or_else(|| Error::AttributeNotFound {
            entity: "Show",
            name: name.to_string(),
        })
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.data
    }

    /// The language this show's data was requested in
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The show's native series id
    pub fn series_id(&self) -> Result<u32> {
        match self.get("id")? {
            Value::Int(v) => Ok(*v as u32),
            other => Err(Error::BadData(format!(
                "show field id is not numeric: {other}"
            ))),
        }
    }

    /// Display name of the show
    pub fn series_name(&self) -> Result<&str> {
        match self.get("SeriesName")? {
            Value::Text(s) => Ok(s),
            other => Err(Error::BadData(format!(
                "show field SeriesName is not text: {other}"
            ))),
        }
    }

    /// Whether the full data set has been fetched
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Loaded actor objects; empty until actor loading has run
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Loaded banner objects; empty until banner loading has run
    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    /// Fetch the full data set now, merging the returned top-level fields
    /// and rebuilding the season structure. Safe to call repeatedly;
    /// identical upstream data leaves the structure unchanged.
    pub async fn update(&mut self) -> Result<()> {
        self.populate().await
    }

    async fn ensure_populated(&mut self) -> Result<()> {
        if self.populated {
            return Ok(());
        }
        self.populate().await
    }

    async fn populate(&mut self) -> Result<()> {
        let ctx = Arc::clone(&self.ctx);
        let series_id = self.series_id()?;

        let mirror = ctx.mirrors.mirror(type_mask::XML)?;
        let url = urls::series(mirror.url(), &ctx.config.api_key, series_id, &self.language);
        debug!(series_id, "populating show");

        let raw = ctx.loader.load(&url, true).await?;
        let doc = Document::parse(&raw)?;

        let ignore_case = ctx.config.ignore_case;
        let series = doc.records("Series").next().ok_or_else(|| {
            Error::BadData(format!("no Series record in payload for id {series_id}"))
        })?;
        self.data
            .merge(AttributeMap::from_fields(series, ignore_case));

        for fields in doc.records("Episode") {
            let episode = Episode::new(AttributeMap::from_fields(fields, ignore_case));
            let season_number = episode.season_number()?;
            self.seasons
                .entry(season_number)
                .or_insert_with(|| Season::new(season_number))
                .push(episode)?;
        }
        self.populated = true;

        if ctx.config.load_actors {
            self.load_actors().await?;
        }
        if ctx.config.load_banners {
            self.load_banners().await?;
        }

        Ok(())
    }

    /// Fetch the extended actor list, replacing any previously loaded one.
    /// Needs only the series id, not season data.
    pub async fn load_actors(&mut self) -> Result<()> {
        let ctx = Arc::clone(&self.ctx);
        let series_id = self.series_id()?;

        let mirror = ctx.mirrors.mirror(type_mask::XML)?;
        let url = urls::actors(mirror.url(), &ctx.config.api_key, series_id);
        debug!(series_id, "loading actors");

        let raw = ctx.loader.load(&url, true).await?;
        let doc = Document::parse(&raw)?;

        let banner_mirror = ctx.mirrors.mirror(type_mask::BANNER)?;
        self.actors = doc
            .records("Actor")
            .map(|fields| {
                Actor::new(
                    banner_mirror.url(),
                    AttributeMap::from_fields(fields, ctx.config.ignore_case),
                )
            })
            .collect();

        Ok(())
    }

    /// Fetch the extended banner list, replacing any previously loaded one.
    /// Needs only the series id, not season data.
    pub async fn load_banners(&mut self) -> Result<()> {
        let ctx = Arc::clone(&self.ctx);
        let series_id = self.series_id()?;

        let mirror = ctx.mirrors.mirror(type_mask::XML)?;
        let url = urls::banners(mirror.url(), &ctx.config.api_key, series_id);
        debug!(series_id, "loading banners");

        let raw = ctx.loader.load(&url, true).await?;
        let doc = Document::parse(&raw)?;

        let banner_mirror = ctx.mirrors.mirror(type_mask::BANNER)?;
        self.banners = doc
            .records("Banner")
            .map(|fields| {
                Banner::new(
                    banner_mirror.url(),
                    AttributeMap::from_fields(fields, ctx.config.ignore_case),
                )
            })
            .collect();

        Ok(())
    }

    /// Number of seasons, populating on first access
    pub async fn num_seasons(&mut self) -> Result<usize> {
        self.ensure_populated().await?;
        Ok(self.seasons.len())
    }

    /// The season with the given number, populating on first access.
    ///
    /// # Errors
    /// `Error::IndexNotFound` when the season does not exist.
    pub async fn season(&mut self, number: u32) -> Result<&Season> {
        self.ensure_populated().await?;
        self.seasons
            .get(&number)
            .ok_or_else(|| Error::IndexNotFound(format!("Season {number}")))
    }

    /// Seasons in ascending season number, populating on first access.
    /// Reverse with `.rev()`.
    pub async fn seasons(&mut self) -> Result<impl DoubleEndedIterator<Item = &Season>> {
        self.ensure_populated().await?;
        Ok(self.seasons.values())
    }

    /// Seasons at the sorted positions covered by `range`, clamped to
    /// bounds, populating on first access.
    pub async fn slice<R: RangeBounds<usize>>(&mut self, range: R) -> Result<Vec<&Season>> {
        self.ensure_populated().await?;
        let (start, end) = clamp_range(range, self.seasons.len());
        Ok(self
            .seasons
            .values()
            .skip(start)
            .take(end - start)
            .collect())
    }

    /// The first episode across all seasons matching the predicate, scanned
    /// in ascending season and episode order. Populates on first access.
    pub async fn find<P>(&mut self, mut predicate: P) -> Result<Option<&Episode>>
    where
        P: FnMut(&Episode) -> bool,
    {
        self.ensure_populated().await?;
        Ok(self
            .seasons
            .values()
            .flat_map(|season| season.iter())
            .find(|ep| predicate(ep)))
    }

    /// All episodes across all seasons matching the predicate. Populates on
    /// first access.
    pub async fn filter<P>(&mut self, mut predicate: P) -> Result<Vec<&Episode>>
    where
        P: FnMut(&Episode) -> bool,
    {
        self.ensure_populated().await?;
        Ok(self
            .seasons
            .values()
            .flat_map(|season| season.iter())
            .filter(|ep| predicate(ep))
            .collect())
    }

    /// Like [`find`], for predicates that can fail; predicate errors come
    /// back as `Error::Predicate`.
    ///
    /// [`find`]: Show::find
    pub async fn try_find<P>(&mut self, mut predicate: P) -> Result<Option<&Episode>>
    where
        P: FnMut(&Episode) -> Result<bool>,
    {
        self.ensure_populated().await?;
        for season in self.seasons.values() {
            for episode in season.iter() {
                if predicate(episode).map_err(|e| Error::Predicate(e.to_string()))? {
                    return Ok(Some(episode));
                }
            }
        }
        Ok(None)
    }

    /// Like [`filter`], for predicates that can fail.
    ///
    /// [`filter`]: Show::filter
    pub async fn try_filter<P>(&mut self, mut predicate: P) -> Result<Vec<&Episode>>
    where
        P: FnMut(&Episode) -> Result<bool>,
    {
        self.ensure_populated().await?;
        let mut matches = Vec::new();
        for season in self.seasons.values() {
            for episode in season.iter() {
                if predicate(episode).map_err(|e| Error::Predicate(e.to_string()))? {
                    matches.push(episode);
                }
            }
        }
        Ok(matches)
    }
}

impl fmt::Debug for Show {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Show")
            .field("language", &self.language)
            .field("data", &self.data)
            .field("seasons", &self.seasons)
            .field("populated", &self.populated)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Show {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.series_name() {
            Ok(name) => write!(f, "<Show - {name}>"),
            Err(_) => write!(f, "<Show>"),
        }
    }
}

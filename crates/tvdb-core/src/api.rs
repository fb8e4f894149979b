//! Main catalog client API
//!
//! [`Tvdb`] composes the loader, the mirror directory and the XML layer into
//! the public operations: free-text search, series lookup by three id kinds,
//! episode lookup by id/sort-order/air-date. Search results are memoized per
//! session.
//!
//! # Example
//! ```no_run
//! use tvdb_core::{ClientConfig, Tvdb};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tvdb_core::Error> {
//!     let db = Tvdb::new(ClientConfig::new("B43FF87DE395DF56")).await?;
//!
//!     let mut search = db.search("Dexter", "en", true).await?;
//!     let show = search.get_mut(0)?;
//!     println!("{}", show.series_name()?);
//!
//!     let season_one = show.season(1).await?;
//!     println!("{} episodes", season_one.len());
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use tracing::debug;

use crate::attrs::AttributeMap;
use crate::error::{Error, Result};
use crate::language::Language;
use crate::loader::{HttpLoader, Loader};
use crate::mirror::{type_mask, MirrorList};
use crate::model::{Episode, Search, Show};
use crate::urls;
use crate::xml::Document;

/// Configuration for the catalog client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key used for every request
    pub api_key: String,
    /// Directory for the on-disk response cache; `None` disables it
    pub cache_dir: Option<PathBuf>,
    /// Load the extended actor list automatically when a show populates
    pub load_actors: bool,
    /// Load the extended banner list automatically when a show populates
    pub load_banners: bool,
    /// Make entity attribute lookup case-insensitive
    pub ignore_case: bool,
    /// Per-request timeout, passed through to the HTTP loader
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// A configuration with the given API key and everything else off
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            cache_dir: None,
            load_actors: false,
            load_banners: false,
            ignore_case: false,
            timeout: None,
        }
    }
}

/// A series identifier in one of the id namespaces the service understands.
///
/// IMDB and zap2it ids are normalized before the lookup: `Imdb("0773262")`
/// becomes `tt0773262`, `Zap2it("1234")` becomes `EP00001234`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesId {
    /// The service's native numeric id
    Tvdb(u32),
    /// An IMDB id, with or without the `tt` prefix
    Imdb(String),
    /// A zap2it id, with or without the `EP` prefix
    Zap2it(String),
}

impl SeriesId {
    fn normalize(&self) -> String {
        match self {
            SeriesId::Tvdb(id) => id.to_string(),
            SeriesId::Imdb(raw) => {
                if raw.starts_with("tt") {
                    raw.clone()
                } else {
                    format!("tt{raw}")
                }
            }
            SeriesId::Zap2it(raw) => {
                if raw.starts_with("EP") {
                    raw.clone()
                } else {
                    format!("EP{raw:0>8}")
                }
            }
        }
    }
}

/// How to look an episode up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeQuery {
    /// By the episode's native id
    Id(u32),
    /// By position in the default broadcast order
    Default {
        series_id: u32,
        season_number: u32,
        episode_number: u32,
    },
    /// By position in the DVD order
    Dvd {
        series_id: u32,
        season_number: u32,
        episode_number: u32,
    },
    /// By absolute episode number
    Absolute { series_id: u32, absolute_number: u32 },
}

/// Shared state handed to every [`Show`] so it can populate itself
pub(crate) struct Context {
    pub(crate) loader: Box<dyn Loader>,
    pub(crate) mirrors: MirrorList,
    pub(crate) config: ClientConfig,
}

/// The catalog client.
///
/// Construction fetches the mirror directory once; afterwards every
/// operation validates its arguments before touching the network.
pub struct Tvdb {
    ctx: Arc<Context>,
    search_cache: Mutex<HashMap<(String, String), Vec<AttributeMap>>>,
}

impl Tvdb {
    /// Create a client backed by the HTTP loader.
    ///
    /// # Errors
    /// Fails when the HTTP client cannot be built or the mirror directory
    /// cannot be fetched and parsed.
    pub async fn new(config: ClientConfig) -> Result<Self> {
        let loader = HttpLoader::new(config.cache_dir.clone(), config.timeout)?;
        Self::with_loader(config, Box::new(loader)).await
    }

    /// Create a client over a caller-supplied loader. This is the seam used
    /// by tests and by callers with their own transport.
    pub async fn with_loader(config: ClientConfig, loader: Box<dyn Loader>) -> Result<Self> {
        let raw = loader.load(&urls::mirrors(&config.api_key), true).await?;
        let mirrors = MirrorList::from_document(&Document::parse(&raw)?);
        debug!(mirrors = mirrors.len(), "mirror directory loaded");

        Ok(Self {
            ctx: Arc::new(Context {
                loader,
                mirrors,
                config,
            }),
            search_cache: Mutex::new(HashMap::new()),
        })
    }

    /// The mirror directory built at construction
    pub fn mirrors(&self) -> &MirrorList {
        &self.ctx.mirrors
    }

    fn validate_language(language: &str) -> Result<()> {
        if language == "all" || Language::is_supported(language) {
            Ok(())
        } else {
            Err(Error::InvalidArgument(format!(
                "{language} is not a valid language"
            )))
        }
    }

    /// Search the catalog for shows by name.
    ///
    /// `language` must be a supported abbreviation or `"all"`. Results are
    /// memoized per `(term, language)` for the lifetime of the client, so a
    /// repeated identical search does not touch the network; passing
    /// `use_cache = false` forces a fresh fetch and refreshes the memo.
    /// The service's own result order is preserved.
    ///
    /// # Errors
    /// `Error::InvalidArgument` for an unsupported language, raised before
    /// any network traffic.
    pub async fn search(&self, term: &str, language: &str, use_cache: bool) -> Result<Search> {
        Self::validate_language(language)?;
        debug!(term, language, "searching");

        let key = (term.to_string(), language.to_string());
        let memoized = if use_cache {
            self.search_cache
                .lock()
                .expect("search cache lock poisoned")
                .get(&key)
                .cloned()
        } else {
            None
        };

        let records = match memoized {
            Some(records) => {
                debug!(term, "search served from session memo");
                records
            }
            None => {
                let url = urls::search(term, language);
                let raw = self.ctx.loader.load(&url, use_cache).await?;
                let doc = Document::parse(&raw)?;
                let records: Vec<AttributeMap> = doc
                    .records("Series")
                    .map(|fields| AttributeMap::from_fields(fields, self.ctx.config.ignore_case))
                    .collect();
                self.search_cache
                    .lock()
                    .expect("search cache lock poisoned")
                    .insert(key, records.clone());
                records
            }
        };

        let shows = records
            .into_iter()
            .map(|data| Show::new(Arc::clone(&self.ctx), language, data))
            .collect();
        Ok(Search::new(shows, term, language))
    }

    /// Fetch a show by id.
    ///
    /// # Errors
    /// - `Error::InvalidArgument` for an unsupported language (pre-network)
    /// - `Error::IdNotFound` when the service reports not-found or answers
    ///   with an empty payload or zero series records
    pub async fn get_series(
        &self,
        id: SeriesId,
        language: &str,
        use_cache: bool,
    ) -> Result<Show> {
        Self::validate_language(language)?;

        let mirror = self.ctx.mirrors.mirror(type_mask::XML)?;
        let normalized = id.normalize();
        let url = match &id {
            SeriesId::Tvdb(series_id) => urls::series(
                mirror.url(),
                &self.ctx.config.api_key,
                *series_id,
                language,
            ),
            SeriesId::Imdb(_) => urls::series_by_imdb(mirror.url(), &normalized),
            SeriesId::Zap2it(_) => urls::series_by_zap2it(mirror.url(), &normalized),
        };
        debug!(id = %normalized, language, "fetching series");

        let raw = match self.ctx.loader.load(&url, use_cache).await {
            Ok(raw) => raw,
            Err(Error::NotFound(_)) => {
                return Err(Error::IdNotFound(format!("series {normalized} not found")))
            }
            Err(e) => return Err(e),
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::IdNotFound(format!(
                "no show with id {normalized} found"
            )));
        }

        let doc = Document::parse(&raw)?;
        let first = doc.records("Series").next();
        match first {
            Some(fields) => Ok(Show::new(
                Arc::clone(&self.ctx),
                language,
                AttributeMap::from_fields(fields, self.ctx.config.ignore_case),
            )),
            None => Err(Error::IdNotFound(format!(
                "no show with id {normalized} found"
            ))),
        }
    }

    /// Fetch a single episode. Episodes fetched this way carry no season
    /// back-link; their season and episode numbers are in their fields.
    ///
    /// # Errors
    /// - `Error::InvalidArgument` for an unsupported language (pre-network)
    /// - `Error::IdNotFound` when the service reports not-found
    /// - `Error::BadData` when the payload parses but holds zero episodes;
    ///   this is kept distinct from not-found because the service sometimes
    ///   answers success with an error-shaped body
    pub async fn get_episode(
        &self,
        query: EpisodeQuery,
        language: &str,
        use_cache: bool,
    ) -> Result<Episode> {
        Self::validate_language(language)?;

        let mirror = self.ctx.mirrors.mirror(type_mask::XML)?;
        let api_key = &self.ctx.config.api_key;
        let url = match &query {
            EpisodeQuery::Id(episode_id) => {
                urls::episode(mirror.url(), api_key, *episode_id, language)
            }
            EpisodeQuery::Default {
                series_id,
                season_number,
                episode_number,
            } => urls::default_order(
                mirror.url(),
                api_key,
                *series_id,
                *season_number,
                *episode_number,
                language,
            ),
            EpisodeQuery::Dvd {
                series_id,
                season_number,
                episode_number,
            } => urls::dvd_order(
                mirror.url(),
                api_key,
                *series_id,
                *season_number,
                *episode_number,
                language,
            ),
            EpisodeQuery::Absolute {
                series_id,
                absolute_number,
            } => urls::absolute_order(
                mirror.url(),
                api_key,
                *series_id,
                *absolute_number,
                language,
            ),
        };
        debug!(?query, language, "fetching episode");

        let raw = match self.ctx.loader.load(&url, use_cache).await {
            Ok(raw) => raw,
            Err(Error::NotFound(_)) => {
                return Err(Error::IdNotFound(format!("episode {query:?} not found")))
            }
            Err(e) => return Err(e),
        };

        let doc = Document::parse(&raw)?;
        let first = doc.records("Episode").next();
        match first {
            Some(fields) => Ok(Episode::new(AttributeMap::from_fields(
                fields,
                self.ctx.config.ignore_case,
            ))),
            None => Err(Error::BadData(format!(
                "no episode data in payload for {query:?}"
            ))),
        }
    }

    /// Fetch the episode of a series that first aired on the given date.
    ///
    /// # Errors
    /// - `Error::InvalidArgument` for an unsupported language (pre-network)
    /// - `Error::NotFound` when the payload carries the service's explicit
    ///   error marker
    /// - `Error::BadData` when the payload holds zero episodes
    pub async fn get_episode_by_air_date(
        &self,
        series_id: u32,
        language: &str,
        air_date: NaiveDate,
        use_cache: bool,
    ) -> Result<Episode> {
        Self::validate_language(language)?;

        let mirror = self.ctx.mirrors.mirror(type_mask::XML)?;
        let url = urls::air_date(
            mirror.url(),
            &self.ctx.config.api_key,
            series_id,
            air_date,
            language,
        );
        debug!(series_id, %air_date, "fetching episode by air date");

        let raw = self.ctx.loader.load(&url, use_cache).await?;
        let doc = Document::parse(&raw)?;

        if doc.has("Error") {
            return Err(Error::NotFound(format!(
                "no episode of series {series_id} aired on {air_date}"
            )));
        }

        let first = doc.records("Episode").next();
        match first {
            Some(fields) => Ok(Episode::new(AttributeMap::from_fields(
                fields,
                self.ctx.config.ignore_case,
            ))),
            None => Err(Error::BadData(format!(
                "no episode data in air-date payload for series {series_id}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const MIRRORS_XML: &str = r#"<Mirrors><Mirror>
        <id>1</id>
        <mirrorpath>http://thetvdb.com</mirrorpath>
        <typemask>7</typemask>
    </Mirror></Mirrors>"#;

    /// Serves only the mirror directory and counts every call
    struct CountingLoader {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Loader for CountingLoader {
        async fn load(&self, url: &str, _use_cache: bool) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if url.contains("mirrors.xml") {
                Ok(MIRRORS_XML.as_bytes().to_vec())
            } else if url.contains("GetSeries.php") {
                Ok(b"<Data></Data>".to_vec())
            } else {
                panic!("unexpected fetch in validation test: {url}");
            }
        }
    }

    async fn client() -> (Tvdb, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = CountingLoader {
            calls: Arc::clone(&calls),
        };
        let db = Tvdb::with_loader(ClientConfig::new("KEY"), Box::new(loader))
            .await
            .unwrap();
        (db, calls)
    }

    #[test]
    fn test_series_id_normalization() {
        assert_eq!(SeriesId::Tvdb(79349).normalize(), "79349");
        assert_eq!(SeriesId::Imdb("0773262".into()).normalize(), "tt0773262");
        assert_eq!(SeriesId::Imdb("tt0773262".into()).normalize(), "tt0773262");
        assert_eq!(SeriesId::Zap2it("1234".into()).normalize(), "EP00001234");
        assert_eq!(
            SeriesId::Zap2it("EP00001234".into()).normalize(),
            "EP00001234"
        );
    }

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::new("KEY");
        assert_eq!(config.api_key, "KEY");
        assert!(config.cache_dir.is_none());
        assert!(!config.load_actors);
        assert!(!config.load_banners);
        assert!(!config.ignore_case);
        assert!(config.timeout.is_none());
    }

    #[tokio::test]
    async fn test_search_rejects_bad_language_before_network() {
        let (db, calls) = client().await;
        let baseline = calls.load(Ordering::SeqCst);

        let result = db.search("dexter", "xx", true).await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        assert_eq!(calls.load(Ordering::SeqCst), baseline);
    }

    #[tokio::test]
    async fn test_get_series_rejects_bad_language_before_network() {
        let (db, calls) = client().await;
        let baseline = calls.load(Ordering::SeqCst);

        let result = db.get_series(SeriesId::Tvdb(79349), "klingon", true).await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        assert_eq!(calls.load(Ordering::SeqCst), baseline);
    }

    #[tokio::test]
    async fn test_get_episode_rejects_bad_language_before_network() {
        let (db, calls) = client().await;
        let baseline = calls.load(Ordering::SeqCst);

        let result = db
            .get_episode(EpisodeQuery::Id(308834), "nope", true)
            .await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        assert_eq!(calls.load(Ordering::SeqCst), baseline);
    }

    #[tokio::test]
    async fn test_air_date_rejects_bad_language_before_network() {
        let (db, calls) = client().await;
        let baseline = calls.load(Ordering::SeqCst);

        let date = NaiveDate::from_ymd_opt(2006, 10, 29).unwrap();
        let result = db.get_episode_by_air_date(79349, "zz", date, true).await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        assert_eq!(calls.load(Ordering::SeqCst), baseline);
    }

    #[tokio::test]
    async fn test_all_is_a_valid_search_language() {
        let (db, _calls) = client().await;
        let search = db.search("dexter", "all", true).await.unwrap();
        assert!(search.is_empty());
        assert_eq!(search.language(), "all");
    }
}

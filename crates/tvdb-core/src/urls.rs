//! URL templates for the catalog backend.
//!
//! Series and episode payloads are always requested in their plain `.xml`
//! flavor; the zipped bundles the service also offers are never used.

use chrono::NaiveDate;

const BASE: &str = "http://www.thetvdb.com";

/// The mirror directory
pub fn mirrors(api_key: &str) -> String {
    format!("{BASE}/api/{api_key}/mirrors.xml")
}

/// Free-text series search. The term is percent-encoded.
pub fn search(series: &str, language: &str) -> String {
    format!(
        "{BASE}/api/GetSeries.php?seriesname={}&language={}",
        urlencoding::encode(series),
        language
    )
}

/// The full series payload: top-level fields plus every episode
pub fn series(mirror: &str, api_key: &str, series_id: u32, language: &str) -> String {
    format!("{mirror}/api/{api_key}/series/{series_id}/all/{language}.xml")
}

/// Series lookup by IMDB id. The language parameter is ignored by the
/// service for remote-id lookups.
pub fn series_by_imdb(mirror: &str, imdb_id: &str) -> String {
    format!("{mirror}/api/GetSeriesByRemoteID.php?imdbid={imdb_id}&language=en")
}

/// Series lookup by zap2it id
pub fn series_by_zap2it(mirror: &str, zap2it_id: &str) -> String {
    format!("{mirror}/api/GetSeriesByRemoteID.php?language=en&zap2it={zap2it_id}")
}

/// A single episode by its native id
pub fn episode(mirror: &str, api_key: &str, episode_id: u32, language: &str) -> String {
    format!("{mirror}/api/{api_key}/episodes/{episode_id}/{language}.xml")
}

/// A single episode by its default broadcast-order position
pub fn default_order(
    mirror: &str,
    api_key: &str,
    series_id: u32,
    season_number: u32,
    episode_number: u32,
    language: &str,
) -> String {
    format!(
        "{mirror}/api/{api_key}/series/{series_id}/default/{season_number}/{episode_number}/{language}.xml"
    )
}

/// A single episode by its DVD-order position
pub fn dvd_order(
    mirror: &str,
    api_key: &str,
    series_id: u32,
    season_number: u32,
    episode_number: u32,
    language: &str,
) -> String {
    format!(
        "{mirror}/api/{api_key}/series/{series_id}/dvd/{season_number}/{episode_number}/{language}.xml"
    )
}

/// A single episode by its absolute number
pub fn absolute_order(
    mirror: &str,
    api_key: &str,
    series_id: u32,
    absolute_number: u32,
    language: &str,
) -> String {
    format!(
        "{mirror}/api/{api_key}/series/{series_id}/absolute/{absolute_number}/{language}.xml"
    )
}

/// A single episode by its first-aired date
pub fn air_date(
    mirror: &str,
    api_key: &str,
    series_id: u32,
    date: NaiveDate,
    language: &str,
) -> String {
    format!(
        "{mirror}/api/GetEpisodeByAirDate.php?apikey={api_key}&seriesid={series_id}&airdate={}&language={language}",
        date.format("%Y-%m-%d")
    )
}

/// The extended actor list of a series
pub fn actors(mirror: &str, api_key: &str, series_id: u32) -> String {
    format!("{mirror}/api/{api_key}/series/{series_id}/actors.xml")
}

/// The extended banner list of a series
pub fn banners(mirror: &str, api_key: &str, series_id: u32) -> String {
    format!("{mirror}/api/{api_key}/series/{series_id}/banners.xml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_encodes_term() {
        let url = search("How I Met Your Mother", "en");
        assert_eq!(
            url,
            "http://www.thetvdb.com/api/GetSeries.php?seriesname=How%20I%20Met%20Your%20Mother&language=en"
        );
    }

    #[test]
    fn test_series_url() {
        let url = series("http://thetvdb.com", "KEY", 79349, "en");
        assert_eq!(url, "http://thetvdb.com/api/KEY/series/79349/all/en.xml");
    }

    #[test]
    fn test_air_date_url() {
        let date = NaiveDate::from_ymd_opt(2006, 10, 29).unwrap();
        let url = air_date("http://thetvdb.com", "KEY", 79349, date, "en");
        assert!(url.contains("airdate=2006-10-29"));
        assert!(url.contains("seriesid=79349"));
    }

    #[test]
    fn test_order_urls() {
        assert!(
            default_order("http://m", "K", 1, 2, 3, "en").contains("/series/1/default/2/3/en.xml")
        );
        assert!(dvd_order("http://m", "K", 1, 2, 3, "en").contains("/series/1/dvd/2/3/en.xml"));
        assert!(
            absolute_order("http://m", "K", 1, 20, "en").contains("/series/1/absolute/20/en.xml")
        );
    }
}

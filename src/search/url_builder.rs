use url::form_urlencoded::Serializer;
use url::Url;

use super::time_filter::time_filter_token;
use super::types::{non_blank, SearchParams};
use crate::error::{SearchError, SearchResult};

/// Fixed base path every generated URL starts with
pub const BASE_URL: &str = "https://www.linkedin.com/jobs/search/";

const SEARCH_PATH: &str = "/jobs/search/";

pub const KEY_KEYWORDS: &str = "keywords";
pub const KEY_LOCATION: &str = "location";
pub const KEY_GEO_ID: &str = "geoId";
pub const KEY_DISTANCE: &str = "distance";
pub const KEY_TIME_POSTED: &str = "f_TPR";
pub const KEY_EXPERIENCE: &str = "f_E";
pub const KEY_JOB_TYPE: &str = "f_JT";
pub const KEY_WORKPLACE: &str = "f_WT";
pub const KEY_SORT_BY: &str = "sortBy";
pub const KEY_CURRENT_JOB_ID: &str = "currentJobId";
pub const KEY_ORIGIN: &str = "origin";

/// Build the canonical search URL for `params`.
///
/// Parameters are appended in a fixed order and form-encoded, so spaces
/// become `+` and commas `%2C`.
pub fn build_search_url(params: &SearchParams) -> String {
    let mut query = Serializer::new(String::new());

    if let Some(keywords) = non_blank(params.keywords.as_deref()) {
        query.append_pair(KEY_KEYWORDS, keywords);
    }
    if let Some(location) = non_blank(params.location.as_deref()) {
        query.append_pair(KEY_LOCATION, location);
    }
    if let Some(geo_id) = non_blank(params.geo_id.as_deref()) {
        query.append_pair(KEY_GEO_ID, geo_id);
    }
    if let Some(distance) = params.distance.filter(|d| *d > 0.0) {
        query.append_pair(KEY_DISTANCE, &distance.to_string());
    }
    if let Some(token) = time_filter_value(params) {
        query.append_pair(KEY_TIME_POSTED, &token);
    }
    for (key, codes) in [
        (KEY_EXPERIENCE, &params.experience_level),
        (KEY_JOB_TYPE, &params.job_type),
        (KEY_WORKPLACE, &params.workplace_type),
    ] {
        if !codes.is_empty() {
            query.append_pair(key, &codes.join(","));
        }
    }
    if let Some(sort_by) = params.sort_by {
        query.append_pair(KEY_SORT_BY, sort_by.as_code());
    }
    if let Some(job_id) = non_blank(params.current_job_id.as_deref()) {
        query.append_pair(KEY_CURRENT_JOB_ID, job_id);
    }
    if let Some(origin) = params.origin.as_deref().filter(|o| !o.is_empty()) {
        query.append_pair(KEY_ORIGIN, origin);
    }

    let query = query.finish();
    if query.is_empty() {
        BASE_URL.to_string()
    } else {
        format!("{}?{}", BASE_URL, query)
    }
}

/// `f_TPR` value: the explicit token wins, then positive custom hours
fn time_filter_value(params: &SearchParams) -> Option<String> {
    if let Some(token) = params.time_posted.as_deref().filter(|t| !t.is_empty()) {
        return Some(token.to_string());
    }
    params
        .custom_hours
        .filter(|hours| *hours > 0.0)
        .map(time_filter_token)
}

/// Decode a job search URL back into search criteria.
///
/// The time filter comes back as `time_posted`; keys the builder never
/// emits are ignored.
pub fn parse_search_url(url: &str) -> SearchResult<SearchParams> {
    let parsed = Url::parse(url).map_err(|e| SearchError::InvalidUrl(e.to_string()))?;
    if parsed.path() != SEARCH_PATH && parsed.path() != SEARCH_PATH.trim_end_matches('/') {
        return Err(SearchError::InvalidUrl(format!(
            "'{}' is not a job search path",
            parsed.path()
        )));
    }

    let mut params = SearchParams::empty();
    for (key, value) in parsed.query_pairs() {
        let value = value.into_owned();
        match key.as_ref() {
            KEY_KEYWORDS => params.keywords = Some(value),
            KEY_LOCATION => params.location = Some(value),
            KEY_GEO_ID => params.geo_id = Some(value),
            KEY_DISTANCE => params.distance = value.parse().ok(),
            KEY_TIME_POSTED => params.time_posted = Some(value),
            KEY_EXPERIENCE => params.experience_level = split_codes(&value),
            KEY_JOB_TYPE => params.job_type = split_codes(&value),
            KEY_WORKPLACE => params.workplace_type = split_codes(&value),
            KEY_SORT_BY => params.sort_by = value.parse().ok(),
            KEY_CURRENT_JOB_ID => params.current_job_id = Some(value),
            KEY_ORIGIN => params.origin = Some(value),
            _ => {}
        }
    }
    Ok(params)
}

fn split_codes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::types::SortBy;

    fn query_value(url: &str, key: &str) -> Option<String> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn keywords_encode_spaces() {
        let url = build_search_url(&SearchParams::default().with_keywords("Software Engineer"));
        assert!(url.starts_with(BASE_URL));
        assert!(url.contains("keywords=Software+Engineer"));
        assert!(url.contains("origin=JOB_SEARCH_PAGE_JOB_FILTER"));
    }

    #[test]
    fn emits_keys_in_canonical_order() {
        let params = SearchParams {
            keywords: Some("rust".into()),
            location: Some("Berlin".into()),
            geo_id: Some("101282230".into()),
            distance: Some(25.0),
            time_posted: Some("r86400".into()),
            experience_level: vec!["4".into()],
            job_type: vec!["F".into()],
            workplace_type: vec!["2".into()],
            sort_by: Some(SortBy::DatePosted),
            current_job_id: Some("42".into()),
            origin: Some("JOB_SEARCH_PAGE_JOB_FILTER".into()),
            ..SearchParams::empty()
        };
        let url = build_search_url(&params);
        let keys: Vec<String> = Url::parse(&url)
            .unwrap()
            .query_pairs()
            .map(|(k, _)| k.into_owned())
            .collect();
        assert_eq!(
            keys,
            vec![
                "keywords", "location", "geoId", "distance", "f_TPR", "f_E", "f_JT", "f_WT",
                "sortBy", "currentJobId", "origin"
            ]
        );
    }

    #[test]
    fn time_posted_wins_over_custom_hours() {
        let params = SearchParams {
            time_posted: Some("r3600".into()),
            custom_hours: Some(5.0),
            ..SearchParams::empty()
        };
        assert_eq!(query_value(&build_search_url(&params), "f_TPR").as_deref(), Some("r3600"));
    }

    #[test]
    fn custom_hours_round_down_to_seconds() {
        let params = SearchParams {
            time_posted: Some(String::new()),
            custom_hours: Some(2.5),
            ..SearchParams::empty()
        };
        assert_eq!(query_value(&build_search_url(&params), "f_TPR").as_deref(), Some("r9000"));

        let params = SearchParams { custom_hours: Some(0.0), ..SearchParams::empty() };
        assert_eq!(query_value(&build_search_url(&params), "f_TPR"), None);
    }

    #[test]
    fn blank_text_fields_are_omitted() {
        let params = SearchParams {
            keywords: Some("   ".into()),
            location: Some("".into()),
            geo_id: Some(" ".into()),
            current_job_id: Some("\t".into()),
            ..SearchParams::empty()
        };
        assert_eq!(build_search_url(&params), BASE_URL);
    }

    #[test]
    fn non_positive_distance_is_omitted() {
        for distance in [None, Some(0.0), Some(-10.0)] {
            let params = SearchParams { distance, ..SearchParams::empty() };
            assert_eq!(query_value(&build_search_url(&params), "distance"), None);
        }
        let params = SearchParams { distance: Some(25.0), ..SearchParams::empty() };
        assert!(build_search_url(&params).contains("distance=25"));
    }

    #[test]
    fn multi_value_filters_keep_order() {
        let params = SearchParams {
            experience_level: vec!["2".into(), "4".into()],
            job_type: vec!["F".into(), "C".into()],
            workplace_type: vec!["2".into(), "3".into()],
            ..SearchParams::empty()
        };
        let url = build_search_url(&params);
        assert!(url.contains("f_E=2%2C4"));
        assert!(url.contains("f_JT=F%2CC"));
        assert!(url.contains("f_WT=2%2C3"));
    }

    #[test]
    fn parse_recovers_raw_values() {
        let params = SearchParams {
            keywords: Some("C++ & Rust developer".into()),
            location: Some("São Paulo, Brazil".into()),
            distance: Some(50.0),
            time_posted: Some("r604800".into()),
            experience_level: vec!["4".into(), "5".into()],
            sort_by: Some(SortBy::Relevance),
            origin: Some("SWITCH_SEARCH_VERTICAL".into()),
            ..SearchParams::empty()
        };
        let decoded = parse_search_url(&build_search_url(&params)).unwrap();
        assert_eq!(decoded, params);
    }

    #[test]
    fn parse_rejects_foreign_urls() {
        assert!(matches!(parse_search_url("not a url"), Err(SearchError::InvalidUrl(_))));
        assert!(matches!(
            parse_search_url("https://www.linkedin.com/feed/"),
            Err(SearchError::InvalidUrl(_))
        ));
    }
}

//! One-way filter-state → URL query-string sync.
//!
//! `category`/`neighborhood`/`region` carry comma-separated slug lists; the
//! page writes the string on every filter change and reads it back once on
//! entry. The search query and sort key are deliberately not persisted,
//! matching the original page.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use thriftmap_engine::FilterSpec;

/// Unreserved characters stay literal; the comma separator is appended
/// un-encoded between slugs.
const QUERY_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn encode_list(slugs: &[String]) -> String {
    slugs
        .iter()
        .map(|s| utf8_percent_encode(s, QUERY_ENCODE).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn decode_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter(|s| !s.is_empty())
        .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
        .collect()
}

/// Render the structural filter selection as a query string (no leading `?`).
/// Empty groups are omitted; a fully empty selection yields an empty string.
#[must_use]
pub fn query_string(spec: &FilterSpec) -> String {
    let mut parts = Vec::new();
    if !spec.categories.is_empty() {
        parts.push(format!("category={}", encode_list(&spec.categories)));
    }
    if !spec.neighborhoods.is_empty() {
        parts.push(format!("neighborhood={}", encode_list(&spec.neighborhoods)));
    }
    if !spec.regions.is_empty() {
        parts.push(format!("region={}", encode_list(&spec.regions)));
    }
    parts.join("&")
}

/// Ingest query parameters into the filter spec. Unknown keys are ignored;
/// recognized keys replace that group's selection.
pub fn apply_query_pairs(spec: &mut FilterSpec, pairs: &[(String, String)]) {
    for (key, value) in pairs {
        match key.as_str() {
            "category" => spec.categories = decode_list(value),
            "neighborhood" => spec.neighborhoods = decode_list(value),
            "region" => spec.regions = decode_list(value),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spec_renders_empty_string() {
        assert_eq!(query_string(&FilterSpec::default()), "");
    }

    #[test]
    fn groups_render_as_comma_lists() {
        let mut spec = FilterSpec::default();
        spec.add_category("vintage");
        spec.add_category("thrift");
        spec.add_region("brooklyn");
        assert_eq!(query_string(&spec), "category=vintage,thrift&region=brooklyn");
    }

    #[test]
    fn non_slug_characters_are_percent_encoded() {
        let mut spec = FilterSpec::default();
        spec.add_neighborhood("hell's kitchen");
        assert_eq!(query_string(&spec), "neighborhood=hell%27s%20kitchen");
    }

    #[test]
    fn round_trip_preserves_the_selection() {
        let mut spec = FilterSpec::default();
        spec.add_category("vintage");
        spec.add_neighborhood("hell's kitchen");
        spec.add_region("manhattan");

        let rendered = query_string(&spec);
        let pairs: Vec<(String, String)> = rendered
            .split('&')
            .map(|part| {
                let (k, v) = part.split_once('=').unwrap();
                (k.to_string(), v.to_string())
            })
            .collect();

        let mut restored = FilterSpec::default();
        apply_query_pairs(&mut restored, &pairs);
        assert_eq!(restored.categories, spec.categories);
        assert_eq!(restored.neighborhoods, spec.neighborhoods);
        assert_eq!(restored.regions, spec.regions);
    }

    #[test]
    fn unknown_keys_and_empty_segments_are_ignored() {
        let mut spec = FilterSpec::default();
        apply_query_pairs(
            &mut spec,
            &[
                ("stores".to_string(), "a,b".to_string()),
                ("category".to_string(), "vintage,,thrift".to_string()),
            ],
        );
        assert_eq!(spec.categories, vec!["vintage", "thrift"]);
        assert!(spec.neighborhoods.is_empty());
    }
}

//! URI helpers shared by the query renderers and the search response.

use std::collections::BTreeMap;

use url::Url;

/// Append path segments to a URI, keeping its query string.
///
/// Segments are percent-encoded by `url`, so identifiers containing `/` or
/// `:` stay a single segment.
pub fn with_path_segments<I, S>(base: &Url, segments: I) -> Url
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut uri = base.clone();
    if let Ok(mut path) = uri.path_segments_mut() {
        path.pop_if_empty();
        for segment in segments {
            let segment = segment.as_ref();
            if !segment.is_empty() {
                path.push(segment);
            }
        }
    }
    uri
}

/// Replace the query string of a URI with the given pairs, sorted by key.
///
/// The sort is stable, so repeated keys keep their relative order.
pub fn with_query_pairs(base: &Url, pairs: &[(String, String)]) -> Url {
    let mut uri = base.clone();
    uri.set_query(None);
    uri.set_fragment(None);

    if pairs.is_empty() {
        return uri;
    }

    let mut sorted: Vec<&(String, String)> = pairs.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    {
        let mut query = uri.query_pairs_mut();
        for (key, value) in sorted {
            query.append_pair(key, value);
        }
    }
    uri
}

/// Replace the query string of a URI with a parameter map.
pub fn with_query_parameters(base: &Url, parameters: &BTreeMap<String, String>) -> Url {
    let pairs: Vec<(String, String)> = parameters
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    with_query_pairs(base, &pairs)
}

/// Percent-decode a value the way HTML forms encode it (`+` is a space).
///
/// Values that are not valid percent-encoding are returned unchanged.
pub fn decode(value: &str) -> String {
    let spaced = value.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_string(),
    }
}

/// Last non-empty path segment of a URI string, if it parses.
pub fn last_path_segment(uri: &str) -> Option<String> {
    let parsed = Url::parse(uri).ok()?;
    parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(|segment| decode(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.dev.nva.aws.unit.no/cristin").unwrap()
    }

    #[test]
    fn test_path_segments_are_appended_and_encoded() {
        let uri = with_path_segments(&base(), ["person", "0000-0001-2345-6789", ""]);
        assert_eq!(
            uri.as_str(),
            "https://api.dev.nva.aws.unit.no/cristin/person/0000-0001-2345-6789"
        );

        let uri = with_path_segments(&base(), ["organization", "a/b"]);
        assert_eq!(uri.path(), "/cristin/organization/a%2Fb");
    }

    #[test]
    fn test_query_pairs_sorted_by_key() {
        let pairs = vec![
            ("results".to_string(), "10".to_string()),
            ("keyword".to_string(), "b".to_string()),
            ("page".to_string(), "2".to_string()),
            ("keyword".to_string(), "a".to_string()),
        ];
        let uri = with_query_pairs(&base(), &pairs);
        assert_eq!(uri.query(), Some("keyword=b&keyword=a&page=2&results=10"));
    }

    #[test]
    fn test_query_replaced_not_appended() {
        let start = Url::parse("https://host/path?page=1&stale=yes").unwrap();
        let mut parameters = BTreeMap::new();
        parameters.insert("page".to_string(), "2".to_string());
        let uri = with_query_parameters(&start, &parameters);
        assert_eq!(uri.as_str(), "https://host/path?page=2");

        let uri = with_query_parameters(&start, &BTreeMap::new());
        assert_eq!(uri.as_str(), "https://host/path");
    }

    #[test]
    fn test_values_with_spaces_are_form_encoded() {
        let pairs = vec![("query".to_string(), "cancer research, 2020".to_string())];
        let uri = with_query_pairs(&base(), &pairs);
        assert_eq!(uri.query(), Some("query=cancer+research%2C+2020"));
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode("NOT+STARTED"), "NOT STARTED");
        assert_eq!(decode("185.90.0.0"), "185.90.0.0");
        assert_eq!(decode("https%3A%2F%2Fhost%2Forg%2F1.0.0.0"), "https://host/org/1.0.0.0");
        assert_eq!(decode("%FF%FE"), "%FF%FE");
    }

    #[test]
    fn test_last_path_segment() {
        assert_eq!(
            last_path_segment("https://api.nva.no/cristin/organization/185.90.0.0"),
            Some("185.90.0.0".to_string())
        );
        assert_eq!(last_path_segment("not a uri"), None);
    }
}

use url::form_urlencoded;

/// Ordered query-string parameters.
///
/// A `None` value is emitted as the bare key (`?flag`), not `flag=`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: Option<String>) {
        self.pairs.push((key.into(), value));
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, Some(value.to_string()));
        self
    }

    pub fn with_opt<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.push(key, value.map(|v| v.to_string()));
        self
    }

    pub fn with_flag(mut self, key: impl Into<String>) -> Self {
        self.push(key, None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `k=v&flag`. Keys are emitted verbatim; only values are escaped.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| match value {
                Some(v) => format!("{key}={}", escape_value(v)),
                None => key.clone(),
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, Option<V>)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.push(k, v.map(|v| v.to_string()));
        }
        params
    }
}

fn escape_value(v: &str) -> String {
    form_urlencoded::byte_serialize(v.as_bytes()).collect()
}

/// Append `?query` to `path` only when a non-empty parameter set is supplied.
pub fn build_path_with_query(path: &str, params: Option<&QueryParams>) -> String {
    match params {
        Some(p) if !p.is_empty() => format!("{path}?{}", p.to_query_string()),
        _ => path.to_string(),
    }
}

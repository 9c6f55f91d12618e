//! Document location holding the encoded timer list

use std::collections::HashMap;

use url::Url;

/// Query parameter that carries the encoded list
pub const CONFIG_PARAM: &str = "config";

/// Named parameters of the current location
pub trait LocationState: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn delete(&mut self, key: &str);

    /// Full shareable address, if the location has one
    fn href(&self) -> Option<String> {
        None
    }
}

/// Parameters kept in a map, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryLocation {
    params: HashMap<String, String>,
}

impl MemoryLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }
}

impl LocationState for MemoryLocation {
    fn get(&self, key: &str) -> Option<String> {
        self.params.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.params.insert(key.to_string(), value.to_string());
    }

    fn delete(&mut self, key: &str) {
        self.params.remove(key);
    }
}

/// Parameters stored in the query string of a URL
#[derive(Debug, Clone)]
pub struct UrlLocation {
    url: Url,
}

impl UrlLocation {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Url::parse(input).map(Self::new)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn rewrite<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut Vec<(String, String)>),
    {
        let mut pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        edit(&mut pairs);

        if pairs.is_empty() {
            self.url.set_query(None);
        } else {
            self.url.query_pairs_mut().clear().extend_pairs(pairs.iter());
        }
    }
}

impl LocationState for UrlLocation {
    fn get(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    fn set(&mut self, key: &str, value: &str) {
        self.rewrite(|pairs| {
            pairs.retain(|(k, _)| k != key);
            pairs.push((key.to_string(), value.to_string()));
        });
    }

    fn delete(&mut self, key: &str) {
        self.rewrite(|pairs| pairs.retain(|(k, _)| k != key));
    }

    fn href(&self) -> Option<String> {
        Some(self.url.to_string())
    }
}

use std::collections::HashMap;
use std::io;
use std::path::Path;
use tracing::debug;

/// Immutable MSISDN → user id table, loaded once at startup.
///
/// Safe to share across request handlers behind an `Arc`; nothing mutates it
/// after construction.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MsisdnLookup {
    entries: HashMap<String, String>,
}

impl MsisdnLookup {
    /// Parses `key=value` lines.
    ///
    /// A line is kept only when it splits into exactly two parts on `=`;
    /// anything else is skipped. Later duplicates overwrite earlier ones and
    /// carriage returns are stripped from the value.
    pub fn parse(contents: &str) -> Self {
        let mut entries = HashMap::new();
        let mut skipped = 0usize;

        for line in contents.split('\n') {
            let parts: Vec<&str> = line.split('=').collect();
            if let [key, value] = parts[..] {
                entries.insert(key.to_string(), value.replace('\r', ""));
            } else {
                skipped += 1;
            }
        }

        if skipped > 0 {
            debug!(skipped, "Skipped malformed lookup lines");
        }

        Self { entries }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::parse(&contents))
    }

    /// Resolves an MSISDN. A miss is an ordinary outcome.
    pub fn resolve(&self, msisdn: &str) -> Option<&str> {
        self.entries.get(msisdn).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MsisdnLookup {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

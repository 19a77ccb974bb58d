use serde::{Deserialize, Serialize};

/// How a blog's listing URL was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionTier {
    /// "View all" link on the card itself
    DirectLink,
    /// "View all" control on the blog's own page
    AuxiliaryContext,
    /// Primary link plus the fixed listing suffix
    Synthesized,
}

impl ResolutionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionTier::DirectLink => "direct_link",
            ResolutionTier::AuxiliaryContext => "auxiliary_context",
            ResolutionTier::Synthesized => "synthesized",
        }
    }
}

impl std::fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogEntry {
    pub name: String,
    pub url: String,
}

impl BlogEntry {
    pub fn new(name: String, url: String) -> Self {
        Self { name, url }
    }
}

/// Result of one directory scrape
#[derive(Debug, Clone, Default)]
pub struct DirectoryReport {
    pub entries: Vec<BlogEntry>,
    pub direct: usize,
    pub auxiliary: usize,
    pub synthesized: usize,
    pub skipped: usize,
}

impl DirectoryReport {
    pub fn record(&mut self, entry: BlogEntry, tier: ResolutionTier) {
        match tier {
            ResolutionTier::DirectLink => self.direct += 1,
            ResolutionTier::AuxiliaryContext => self.auxiliary += 1,
            ResolutionTier::Synthesized => self.synthesized += 1,
        }
        self.entries.push(entry);
    }
}

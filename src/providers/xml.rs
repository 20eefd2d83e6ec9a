//! Raw serde structs for the provider's XML payloads.
//!
//! Everything is `#[serde(default)]` so a missing element or attribute
//! deserializes to an empty value instead of failing; defaulting to real
//! zeros/empties happens in the mapping layer.

use serde::Deserialize;

/// `value="..."` attribute carrier (`<minplayers value="3"/>` and friends)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ValueAttr {
    #[serde(rename = "@value")]
    pub value: String,
}

/// Search payload root: `<items><item .../></items>`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchItems {
    #[serde(rename = "item")]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchItem {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "name")]
    pub names: Vec<NameElement>,
    pub yearpublished: Option<ValueAttr>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NameElement {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "@value")]
    pub value: String,
}

/// Details payload root: `<items><item .../></items>` with one item
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThingItems {
    #[serde(rename = "item")]
    pub items: Vec<ThingItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThingItem {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "name")]
    pub names: Vec<NameElement>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub yearpublished: Option<ValueAttr>,
    pub minplayers: Option<ValueAttr>,
    pub maxplayers: Option<ValueAttr>,
    pub playingtime: Option<ValueAttr>,
    pub minplaytime: Option<ValueAttr>,
    pub maxplaytime: Option<ValueAttr>,
    pub minage: Option<ValueAttr>,
    pub statistics: Option<Statistics>,
    #[serde(rename = "poll")]
    pub polls: Vec<PollElement>,
    #[serde(rename = "poll-summary")]
    pub poll_summary: Option<PollSummary>,
}

impl ThingItem {
    /// The primary name, falling back to the first listed one
    pub fn primary_name(&self) -> &str {
        self.names
            .iter()
            .find(|name| name.kind == "primary")
            .or_else(|| self.names.first())
            .map(|name| name.value.as_str())
            .unwrap_or("")
    }
}

impl SearchItem {
    pub fn primary_name(&self) -> &str {
        self.names
            .iter()
            .find(|name| name.kind == "primary")
            .or_else(|| self.names.first())
            .map(|name| name.value.as_str())
            .unwrap_or("")
    }
}

/// `<statistics><ratings><average value=".."/>...</ratings></statistics>`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub ratings: Ratings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Ratings {
    pub average: Option<ValueAttr>,
    pub averageweight: Option<ValueAttr>,
}

/// `<poll name="...">` with one or more `<results>` blocks
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PollElement {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "results")]
    pub results: Vec<PollResults>,
}

/// One `<results>` block; `numplayers` is only present on the
/// player-count poll
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PollResults {
    #[serde(rename = "@numplayers")]
    pub numplayers: Option<String>,
    #[serde(rename = "result")]
    pub entries: Vec<PollEntry>,
}

/// `<result value=".." numvotes=".."/>`; `name` is used by poll-summary
/// entries instead
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PollEntry {
    #[serde(rename = "@name")]
    pub name: Option<String>,
    #[serde(rename = "@value")]
    pub value: String,
    #[serde(rename = "@numvotes")]
    pub numvotes: Option<String>,
}

/// `<poll-summary>` with named best/recommended entries
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PollSummary {
    #[serde(rename = "result")]
    pub entries: Vec<PollEntry>,
}

impl PollSummary {
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name.as_deref() == Some(name))
            .map(|entry| entry.value.as_str())
    }
}

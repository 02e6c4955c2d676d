/// Host-page configuration for a tree menu instance.
///
/// The host hands over a flat string map (data attributes in the original
/// deployment); only the recognized keys below are read.
use std::collections::HashMap;

use serde::Deserialize;

use crate::errors::MenuResult;

/// Recognized option keys, with their raw wire names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeMenuConfig {
    /// `"true"` enables the mutation UI.
    #[serde(rename = "treemenu-editmode", default, deserialize_with = "string_flag")]
    pub edit_mode: bool,

    /// Cache-invalidation token compared against stored session records.
    #[serde(rename = "treemenu-version", default)]
    pub version: Option<String>,

    /// Menu source URL.
    #[serde(rename = "menu", default)]
    pub menu_url: Option<String>,

    /// Prefix prepended to relative links; trailing slash/backslash dropped.
    #[serde(rename = "urlroot", default, deserialize_with = "url_root")]
    pub url_root: String,

    /// CSS selector of the element whose scroll offsets are persisted.
    #[serde(rename = "scrollelement", default)]
    pub scroll_element: Option<String>,
}

impl TreeMenuConfig {
    /// Read the recognized options out of a JSON object (unknown keys are
    /// ignored, as the host map carries plenty of unrelated attributes).
    pub fn from_value(value: &serde_json::Value) -> MenuResult<Self> {
        Ok(TreeMenuConfig::deserialize(value)?)
    }

    /// Build from key-value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> MenuResult<Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Ok(TreeMenuConfig::deserialize(serde_json::to_value(map)?)?)
    }
}

/// Strip a trailing `/` or `\` from the url root; absent means empty.
pub fn normalize_url_root(raw: &str) -> String {
    raw.trim_end_matches(['/', '\\']).to_string()
}

fn string_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref() == Some("true"))
}

fn url_root<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(normalize_url_root(raw.as_deref().unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_recognized_keys() {
        let config = TreeMenuConfig::from_pairs([
            ("treemenu-editmode", "true"),
            ("treemenu-version", "3"),
            ("menu", "/data/menu.json"),
            ("urlroot", "/help/"),
            ("scrollelement", "#sidebar"),
            ("unrelated-attribute", "ignored"),
        ])
        .unwrap();

        assert!(config.edit_mode);
        assert_eq!(config.version.as_deref(), Some("3"));
        assert_eq!(config.menu_url.as_deref(), Some("/data/menu.json"));
        assert_eq!(config.url_root, "/help");
        assert_eq!(config.scroll_element.as_deref(), Some("#sidebar"));
    }

    #[test]
    fn edit_mode_requires_exact_true() {
        let config = TreeMenuConfig::from_pairs([("treemenu-editmode", "TRUE")]).unwrap();
        assert!(!config.edit_mode);

        let config = TreeMenuConfig::from_pairs::<&str, &str>([]).unwrap();
        assert!(!config.edit_mode);
    }

    #[test]
    fn url_root_normalization() {
        assert_eq!(normalize_url_root("/help/"), "/help");
        assert_eq!(normalize_url_root("\\help\\"), "\\help");
        assert_eq!(normalize_url_root(""), "");
    }
}

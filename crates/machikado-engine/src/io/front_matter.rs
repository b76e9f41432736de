//! YAML front-matter between `---` fences.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

const FENCE: &str = "---";

/// Split a file into its front-matter block and Markdown body.
///
/// The opening fence must be the first line. Without a closing fence the
/// whole text is body.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some(first_line_end) = content.find('\n') else {
        return (None, content);
    };
    if content[..first_line_end].trim_end() != FENCE {
        return (None, content);
    }

    let yaml_start = first_line_end + 1;
    let mut offset = yaml_start;
    for line in content[yaml_start..].split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let yaml = &content[yaml_start..offset];
            let body = &content[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Deserialize a front-matter block; a missing or blank block gives the defaults.
pub fn parse_front_matter<T>(yaml: Option<&str>) -> Result<T, serde_yaml_ng::Error>
where
    T: DeserializeOwned + Default,
{
    match yaml {
        Some(yaml) if !yaml.trim().is_empty() => serde_yaml_ng::from_str(yaml),
        _ => Ok(T::default()),
    }
}

/// `key:` with no value reads as YAML null; treat it like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopFrontMatter {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scene_tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub access_tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub business_tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFrontMatter {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

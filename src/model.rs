//! Template catalog data model and engine generation detection.

use std::fmt::Write;

use serde::Serialize;

/// The two incompatible generations of the meme engine API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineGeneration {
    /// Engine versions before `0.2.0`.
    Legacy,
    /// Engine versions `0.2.0` and later.
    Current,
}

/// Version threshold separating the legacy and current engine APIs.
const CURRENT_GENERATION_SINCE: (u64, u64, u64) = (0, 2, 0);

/// Parse a dotted version string into `(major, minor, patch)`.
///
/// Missing components default to zero; any non-numeric component fails the
/// parse.
fn parse_version(version: &str) -> Option<(u64, u64, u64)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().unwrap_or("0").parse().ok()?;
    let patch = parts.next().unwrap_or("0").parse().ok()?;
    Some((major, minor, patch))
}

/// Detect the engine API generation from a reported version string.
///
/// Versions below `0.2.0` select [`EngineGeneration::Legacy`]; everything
/// else, including unparsable versions, selects [`EngineGeneration::Current`].
#[must_use]
pub fn detect_generation(version: &str) -> EngineGeneration {
    match parse_version(version) {
        Some(v) if v < CURRENT_GENERATION_SINCE => EngineGeneration::Legacy,
        _ => EngineGeneration::Current,
    }
}

/// Parameter shape a template requires from the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemeParams {
    /// Minimum number of input images.
    pub min_images: u32,
    /// Maximum number of input images.
    pub max_images: u32,
    /// Minimum number of input texts.
    pub min_texts: u32,
    /// Maximum number of input texts.
    pub max_texts: u32,
    /// Texts used when the caller supplies none.
    pub default_texts: Vec<String>,
    /// Free-form schema describing the template's extra options.
    pub options: serde_json::Value,
}

/// One meme template from the engine catalog.
///
/// Read-only after the catalog is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Meme {
    /// Stable template key.
    pub key: String,
    /// Alias keywords that resolve to this template.
    pub keywords: Vec<String>,
    /// Parameter shape required for generation.
    pub params: MemeParams,
    /// Descriptive tags.
    pub tags: Vec<String>,
}

impl Meme {
    /// Human-readable info card for this template.
    ///
    /// Count lines collapse to a single value when min equals max and are
    /// omitted entirely when the maximum is zero.
    #[must_use]
    pub fn description(&self) -> String {
        let mut info = String::new();
        if !self.key.is_empty() {
            let _ = writeln!(info, "名称：{}", self.key);
        }
        if !self.keywords.is_empty() {
            let _ = writeln!(info, "别名：{:?}", self.keywords);
        }
        let p = &self.params;
        if p.max_images > 0 {
            let _ = if p.min_images == p.max_images {
                writeln!(info, "所需图片：{}张", p.min_images)
            } else {
                writeln!(info, "所需图片：{}~{}张", p.min_images, p.max_images)
            };
        }
        if p.max_texts > 0 {
            let _ = if p.min_texts == p.max_texts {
                writeln!(info, "所需文本：{}段", p.min_texts)
            } else {
                writeln!(info, "所需文本：{}~{}段", p.min_texts, p.max_texts)
            };
        }
        if !p.default_texts.is_empty() {
            let _ = writeln!(info, "默认文本：{:?}", p.default_texts);
        }
        if !self.tags.is_empty() {
            let _ = writeln!(info, "标签：{:?}", self.tags);
        }
        info
    }
}

/// Display label attached to a template on the catalog index image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemeLabel {
    /// Recently added template.
    New,
    /// Frequently used template.
    Hot,
}

/// Per-template display properties for the catalog index image.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemeProperties {
    /// Render the entry struck through as disabled.
    pub disabled: bool,
    /// Labels shown next to the entry.
    pub labels: Vec<MemeLabel>,
}

/// Sort orders for the catalog index image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemeSortBy {
    /// Template key.
    Key,
    /// First keyword.
    Keywords,
    /// First keyword, by pinyin reading.
    KeywordsPinyin,
    /// Template creation date.
    DateCreated,
    /// Template modification date.
    DateModified,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meme(key: &str, keywords: &[&str], params: MemeParams, tags: &[&str]) -> Meme {
        Meme {
            key: key.to_string(),
            keywords: keywords.iter().map(ToString::to_string).collect(),
            params,
            tags: tags.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn detect_legacy_versions() {
        assert_eq!(detect_generation("0.0.1"), EngineGeneration::Legacy);
        assert_eq!(detect_generation("0.1.8"), EngineGeneration::Legacy);
        assert_eq!(detect_generation("0.1"), EngineGeneration::Legacy);
    }

    #[test]
    fn detect_current_versions() {
        assert_eq!(detect_generation("0.2.0"), EngineGeneration::Current);
        assert_eq!(detect_generation("0.4.1"), EngineGeneration::Current);
        assert_eq!(detect_generation("1.0.0"), EngineGeneration::Current);
        assert_eq!(detect_generation("999.0.0"), EngineGeneration::Current);
    }

    #[test]
    fn detect_unparsable_defaults_to_current() {
        assert_eq!(detect_generation(""), EngineGeneration::Current);
        assert_eq!(detect_generation("dev"), EngineGeneration::Current);
        assert_eq!(detect_generation("0.2.0-rc1"), EngineGeneration::Current);
    }

    #[test]
    fn detect_trims_whitespace() {
        assert_eq!(detect_generation("0.1.8\n"), EngineGeneration::Legacy);
        assert_eq!(detect_generation(" 0.2.0 "), EngineGeneration::Current);
    }

    #[test]
    fn description_single_image_count() {
        let m = meme(
            "ksyx",
            &["看upx", "看寺"],
            MemeParams { min_images: 1, max_images: 1, ..MemeParams::default() },
            &[],
        );
        let info = m.description();
        assert!(info.contains("名称：ksyx"));
        assert!(info.contains("别名："));
        assert!(info.contains("看upx"));
        assert!(info.contains("所需图片：1张"));
        assert!(!info.contains("所需文本"));
    }

    #[test]
    fn description_count_range() {
        let m = meme(
            "petpet",
            &["摸摸"],
            MemeParams { min_images: 1, max_images: 3, min_texts: 0, max_texts: 2, ..MemeParams::default() },
            &[],
        );
        let info = m.description();
        assert!(info.contains("所需图片：1~3张"));
        assert!(info.contains("所需文本：0~2段"));
    }

    #[test]
    fn description_omits_zero_max_lines() {
        let m = meme(
            "say",
            &["说"],
            MemeParams { min_texts: 1, max_texts: 1, ..MemeParams::default() },
            &[],
        );
        let info = m.description();
        assert!(!info.contains("所需图片"));
        assert!(info.contains("所需文本：1段"));
    }

    #[test]
    fn description_default_texts_and_tags() {
        let m = meme(
            "luotianyi",
            &["洛天依说"],
            MemeParams {
                min_texts: 1,
                max_texts: 1,
                default_texts: vec!["好耶".to_string()],
                ..MemeParams::default()
            },
            &["vocaloid"],
        );
        let info = m.description();
        assert!(info.contains("默认文本："));
        assert!(info.contains("好耶"));
        assert!(info.contains("标签："));
        assert!(info.contains("vocaloid"));
    }

    #[test]
    fn description_empty_key_omits_name_line() {
        let m = meme("", &[], MemeParams::default(), &[]);
        assert!(!m.description().contains("名称"));
    }

    #[test]
    fn properties_default_is_enabled_and_unlabeled() {
        let props = MemeProperties::default();
        assert!(!props.disabled);
        assert!(props.labels.is_empty());
    }

    #[test]
    fn sort_by_serializes_snake_case() {
        let json = serde_json::to_string(&MemeSortBy::KeywordsPinyin).unwrap();
        assert_eq!(json, "\"keywords_pinyin\"");
    }

    #[test]
    fn label_serializes_lowercase() {
        let json = serde_json::to_string(&MemeLabel::Hot).unwrap();
        assert_eq!(json, "\"hot\"");
    }
}

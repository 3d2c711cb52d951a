//! 小说体裁
//!
//! 固定枚举集合，附带用于提示词构造的静态描述表

use serde::{Deserialize, Serialize};

/// 小说体裁
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Fantasy,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Mystery,
    Adventure,
    Horror,
}

impl Genre {
    /// 全部体裁（用于 API 列表）
    pub const ALL: [Genre; 5] = [
        Genre::Fantasy,
        Genre::SciFi,
        Genre::Mystery,
        Genre::Adventure,
        Genre::Horror,
    ];

    /// 展示名称
    pub fn name(&self) -> &'static str {
        match self {
            Genre::Fantasy => "Fantasy",
            Genre::SciFi => "Sci-Fi",
            Genre::Mystery => "Mystery",
            Genre::Adventure => "Adventure",
            Genre::Horror => "Horror",
        }
    }

    /// 文件名安全的小写标识（下载文件名用）
    pub fn slug(&self) -> &'static str {
        match self {
            Genre::Fantasy => "fantasy",
            Genre::SciFi => "sci-fi",
            Genre::Mystery => "mystery",
            Genre::Adventure => "adventure",
            Genre::Horror => "horror",
        }
    }

    /// 体裁描述，嵌入到生成提示词中
    pub fn description(&self) -> &'static str {
        match self {
            Genre::Fantasy => "A magical tale of wizards, kingdoms, and mythical creatures.",
            Genre::SciFi => "A futuristic story of technology, space, or artificial intelligence.",
            Genre::Mystery => "A suspenseful investigation with clues and a twist.",
            Genre::Adventure => "A journey through exotic lands filled with challenges and rewards.",
            Genre::Horror => "A chilling narrative with fear, suspense, and supernatural events.",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip_uses_display_names() {
        let json = serde_json::to_string(&Genre::SciFi).unwrap();
        assert_eq!(json, "\"Sci-Fi\"");

        let parsed: Genre = serde_json::from_str("\"Fantasy\"").unwrap();
        assert_eq!(parsed, Genre::Fantasy);
    }

    #[test]
    fn test_unknown_genre_rejected() {
        let parsed: Result<Genre, _> = serde_json::from_str("\"Romance\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_every_genre_has_description() {
        for genre in Genre::ALL {
            assert!(!genre.description().is_empty());
            assert!(!genre.slug().is_empty());
        }
    }

    #[test]
    fn test_slug_is_lowercase() {
        assert_eq!(Genre::SciFi.slug(), "sci-fi");
        assert_eq!(Genre::Horror.slug(), "horror");
    }
}

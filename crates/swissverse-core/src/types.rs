use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Every remote collection the site reads or the admin surface writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    GalleryImages,
    GlossaryTerms,
    TimelineMoments,
    Resources,
    SiteLinks,
    YoutubeVideos,
    SectionTitles,
    SeoMetadata,
    Profiles,
    UserRoles,
}

impl Table {
    pub fn all() -> &'static [Table] {
        &[
            Table::GalleryImages,
            Table::GlossaryTerms,
            Table::TimelineMoments,
            Table::Resources,
            Table::SiteLinks,
            Table::YoutubeVideos,
            Table::SectionTitles,
            Table::SeoMetadata,
            Table::Profiles,
            Table::UserRoles,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Table::GalleryImages => "gallery_images",
            Table::GlossaryTerms => "glossary_terms",
            Table::TimelineMoments => "timeline_moments",
            Table::Resources => "resources",
            Table::SiteLinks => "site_links",
            Table::YoutubeVideos => "youtube_videos",
            Table::SectionTitles => "section_titles",
            Table::SeoMetadata => "seo_metadata",
            Table::Profiles => "profiles",
            Table::UserRoles => "user_roles",
        }
    }

    /// Tables whose rows carry `display_order` and take part in the
    /// reorder/insert protocol.
    pub fn is_orderable(self) -> bool {
        !matches!(
            self,
            Table::SectionTitles | Table::SeoMetadata | Table::Profiles | Table::UserRoles
        )
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Table {
    type Err = crate::error::SwissverseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Table::all()
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| crate::error::SwissverseError::UnknownTable(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

// ---------------------------------------------------------------------------
// Icon
// ---------------------------------------------------------------------------

/// Closed set of icon identifiers a row may reference by string key.
///
/// Stored keys outside the set fall back to `Generic` rather than failing;
/// the mapping to a renderable glyph is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Globe,
    Book,
    Video,
    Image,
    Link,
    Document,
    Download,
    Github,
    Youtube,
    Twitter,
    Generic,
}

impl Icon {
    pub fn as_str(self) -> &'static str {
        match self {
            Icon::Globe => "globe",
            Icon::Book => "book",
            Icon::Video => "video",
            Icon::Image => "image",
            Icon::Link => "link",
            Icon::Document => "document",
            Icon::Download => "download",
            Icon::Github => "github",
            Icon::Youtube => "youtube",
            Icon::Twitter => "twitter",
            Icon::Generic => "generic",
        }
    }

    /// Resolve a stored key, falling back to `Generic` on anything unknown.
    pub fn from_key(key: &str) -> Icon {
        match key {
            "globe" => Icon::Globe,
            "book" => Icon::Book,
            "video" => Icon::Video,
            "image" => Icon::Image,
            "link" => Icon::Link,
            "document" => Icon::Document,
            "download" => Icon::Download,
            "github" => Icon::Github,
            "youtube" => Icon::Youtube,
            "twitter" => Icon::Twitter,
            _ => Icon::Generic,
        }
    }

    /// Terminal glyph used by the CLI listings.
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Globe => "🌐",
            Icon::Book => "📖",
            Icon::Video => "🎬",
            Icon::Image => "🖼",
            Icon::Link => "🔗",
            Icon::Document => "📄",
            Icon::Download => "⬇",
            Icon::Github => "🐙",
            Icon::Youtube => "▶",
            Icon::Twitter => "🐦",
            Icon::Generic => "•",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = crate::error::SwissverseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(crate::error::SwissverseError::UnknownRole(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn table_round_trip() {
        for &t in Table::all() {
            assert_eq!(Table::from_str(t.as_str()).unwrap(), t);
        }
    }

    #[test]
    fn table_unknown_fails() {
        assert!(Table::from_str("moments").is_err());
    }

    #[test]
    fn orderable_split() {
        assert!(Table::Resources.is_orderable());
        assert!(Table::TimelineMoments.is_orderable());
        assert!(!Table::SectionTitles.is_orderable());
        assert!(!Table::UserRoles.is_orderable());
    }

    #[test]
    fn icon_known_keys_round_trip() {
        for icon in [Icon::Globe, Icon::Github, Icon::Download] {
            assert_eq!(Icon::from_key(icon.as_str()), icon);
        }
    }

    #[test]
    fn icon_unknown_key_falls_back() {
        assert_eq!(Icon::from_key("sparkles"), Icon::Generic);
        assert_eq!(Icon::from_key(""), Icon::Generic);
    }

    #[test]
    fn role_parse() {
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert!(Role::from_str("superuser").is_err());
    }
}

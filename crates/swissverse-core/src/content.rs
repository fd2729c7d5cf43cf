//! Typed rows for every remote collection, and the `Orderable` trait that
//! admits a row type to the shared reorder/insert protocol.

use crate::error::{Result, SwissverseError};
use crate::slug::slugify;
use crate::types::{Icon, Role, Table};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Orderable
// ---------------------------------------------------------------------------

/// A content row participating in a `display_order`-based total order.
///
/// `id` is assigned by the backend at insert; rows built locally carry an
/// empty id until then, and never fabricate one.
pub trait Orderable: Serialize + DeserializeOwned + Clone {
    const TABLE: Table;

    fn id(&self) -> &str;
    fn display_order(&self) -> f64;
    fn set_display_order(&mut self, order: f64);
    fn is_active(&self) -> bool;

    /// Filter delimiting the subset this row is ordered within.
    /// `None` means the whole table is one scope.
    fn scope(&self) -> Option<(&'static str, String)> {
        None
    }

    /// `(source_field, slug_field)` when edits of the source field must also
    /// rewrite a derived slug in the same update.
    fn slug_source() -> Option<(&'static str, &'static str)> {
        None
    }

    /// Client-side check run before any insert reaches the network.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SwissverseError::Validation(format!("{field} is required")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// TimelineMoment
// ---------------------------------------------------------------------------

/// One moment on the history timeline. Ordered within its year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineMoment {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub year: i32,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default)]
    pub display_order: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TimelineMoment {
    pub fn new(year: i32, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            year,
            title: title.into(),
            description: description.into(),
            media_url: None,
            display_order: 0.0,
            is_active: true,
            created_at: None,
        }
    }
}

impl Orderable for TimelineMoment {
    const TABLE: Table = Table::TimelineMoments;

    fn id(&self) -> &str {
        &self.id
    }
    fn display_order(&self) -> f64 {
        self.display_order
    }
    fn set_display_order(&mut self, order: f64) {
        self.display_order = order;
    }
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn scope(&self) -> Option<(&'static str, String)> {
        Some(("year", self.year.to_string()))
    }
    fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        require("description", &self.description)
    }
}

// ---------------------------------------------------------------------------
// GlossaryTerm
// ---------------------------------------------------------------------------

/// Glossary entry. `slug` is derived from `term` and kept in sync on edits;
/// `related_terms` are soft slug references resolved by lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaryTerm {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub term: String,
    pub slug: String,
    pub definition: String,
    #[serde(default)]
    pub related_terms: Vec<String>,
    #[serde(default)]
    pub display_order: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl GlossaryTerm {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        let term = term.into();
        let slug = slugify(&term);
        Self {
            id: String::new(),
            term,
            slug,
            definition: definition.into(),
            related_terms: Vec::new(),
            display_order: 0.0,
            is_active: true,
            created_at: None,
        }
    }

    /// Resolve `related_terms` against a term list, dropping dangling slugs.
    pub fn related<'a>(&self, all: &'a [GlossaryTerm]) -> Vec<&'a GlossaryTerm> {
        self.related_terms
            .iter()
            .filter_map(|slug| all.iter().find(|t| &t.slug == slug))
            .collect()
    }
}

impl Orderable for GlossaryTerm {
    const TABLE: Table = Table::GlossaryTerms;

    fn id(&self) -> &str {
        &self.id
    }
    fn display_order(&self) -> f64 {
        self.display_order
    }
    fn set_display_order(&mut self, order: f64) {
        self.display_order = order;
    }
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn slug_source() -> Option<(&'static str, &'static str)> {
        Some(("term", "slug"))
    }
    fn validate(&self) -> Result<()> {
        require("term", &self.term)?;
        require("definition", &self.definition)?;
        crate::slug::validate_slug(&self.slug)
    }
}

// ---------------------------------------------------------------------------
// Resource
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    /// Stored icon key; resolved through `Icon::from_key`, unknown keys fall
    /// back instead of failing.
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub display_order: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            url: url.into(),
            description: None,
            category: category.into(),
            icon: Icon::Link.as_str().to_string(),
            display_order: 0.0,
            is_active: true,
            created_at: None,
        }
    }

    pub fn icon(&self) -> Icon {
        Icon::from_key(&self.icon)
    }
}

impl Orderable for Resource {
    const TABLE: Table = Table::Resources;

    fn id(&self) -> &str {
        &self.id
    }
    fn display_order(&self) -> f64 {
        self.display_order
    }
    fn set_display_order(&mut self, order: f64) {
        self.display_order = order;
    }
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        require("url", &self.url)?;
        require("category", &self.category)
    }
}

// ---------------------------------------------------------------------------
// GalleryImage
// ---------------------------------------------------------------------------

/// Gallery entry. `image_url` is the public URL handed back by the blob
/// storage collaborator; this layer only stores the string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub display_order: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl GalleryImage {
    pub fn new(title: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            image_url: image_url.into(),
            alt_text: String::new(),
            display_order: 0.0,
            is_active: true,
            created_at: None,
        }
    }
}

impl Orderable for GalleryImage {
    const TABLE: Table = Table::GalleryImages;

    fn id(&self) -> &str {
        &self.id
    }
    fn display_order(&self) -> f64 {
        self.display_order
    }
    fn set_display_order(&mut self, order: f64) {
        self.display_order = order;
    }
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        require("image_url", &self.image_url)
    }
}

// ---------------------------------------------------------------------------
// SiteLink
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteLink {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub display_order: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SiteLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            label: label.into(),
            url: url.into(),
            icon: Icon::Link.as_str().to_string(),
            display_order: 0.0,
            is_active: true,
            created_at: None,
        }
    }

    pub fn icon(&self) -> Icon {
        Icon::from_key(&self.icon)
    }
}

impl Orderable for SiteLink {
    const TABLE: Table = Table::SiteLinks;

    fn id(&self) -> &str {
        &self.id
    }
    fn display_order(&self) -> f64 {
        self.display_order
    }
    fn set_display_order(&mut self, order: f64) {
        self.display_order = order;
    }
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn validate(&self) -> Result<()> {
        require("label", &self.label)?;
        require("url", &self.url)
    }
}

// ---------------------------------------------------------------------------
// YoutubeVideo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeVideo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    /// The 11-character YouTube id, not a full URL.
    pub video_id: String,
    #[serde(default)]
    pub display_order: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl YoutubeVideo {
    pub fn new(title: impl Into<String>, video_id: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            video_id: video_id.into(),
            display_order: 0.0,
            is_active: true,
            created_at: None,
        }
    }
}

impl Orderable for YoutubeVideo {
    const TABLE: Table = Table::YoutubeVideos;

    fn id(&self) -> &str {
        &self.id
    }
    fn display_order(&self) -> f64 {
        self.display_order
    }
    fn set_display_order(&mut self, order: f64) {
        self.display_order = order;
    }
    fn is_active(&self) -> bool {
        self.is_active
    }
    fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        require("video_id", &self.video_id)
    }
}

// ---------------------------------------------------------------------------
// Singletons and users (not orderable)
// ---------------------------------------------------------------------------

/// Singleton per section name: the editable heading of a page section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionTitle {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub section: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

/// Singleton per page name: metadata injected into the document head by the
/// site (injection itself is outside this layer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub page: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Role grant checked by the backend's access policy. This layer only
/// represents the rows; enforcement is not its job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssignment {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub user_id: String,
    pub role: Role,
}

fn default_active() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

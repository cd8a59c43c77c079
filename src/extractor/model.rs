use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The nine report sections, in extraction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Basic,
    OpenGraph,
    Twitter,
    Schema,
    Technical,
    Links,
    Headings,
    Images,
    Performance,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Basic,
        Category::OpenGraph,
        Category::Twitter,
        Category::Schema,
        Category::Technical,
        Category::Links,
        Category::Headings,
        Category::Images,
        Category::Performance,
    ];

    /// Key used for this section in the JSON report.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Basic => "basic",
            Category::OpenGraph => "open_graph",
            Category::Twitter => "twitter",
            Category::Schema => "schema",
            Category::Technical => "technical",
            Category::Links => "links",
            Category::Headings => "headings",
            Category::Images => "images",
            Category::Performance => "performance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root output of a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// The URL exactly as given by the caller.
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub seo: SeoSections,
    /// Extractors that failed during this run; not part of the JSON output.
    #[serde(skip)]
    pub failures: Vec<ExtractorFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorFailure {
    pub category: Category,
    pub message: String,
}

/// All nine sections. Every key is always present in the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoSections {
    pub basic: BasicMetadata,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub schema: StructuredData,
    pub technical: TechnicalMetadata,
    pub links: LinkInventory,
    pub headings: HeadingInventory,
    pub images: ImageInventory,
    pub performance: PerformanceMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub author: Option<String>,
    pub canonical: Option<String>,
    pub robots: Option<String>,
    pub viewport: Option<String>,
    pub charset: Option<String>,
    pub language: Option<String>,
    pub hreflang: Vec<Hreflang>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hreflang {
    pub lang: String,
    pub href: Option<String>,
}

/// A single Open Graph value: either a plain string or one level of
/// `parent:child` nesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OgValue {
    Text(String),
    Nested(BTreeMap<String, String>),
}

pub type OpenGraph = BTreeMap<String, OgValue>;

pub type TwitterCard = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredData {
    pub json_ld: Vec<Value>,
    pub microdata: BTreeMap<String, Vec<BTreeMap<String, String>>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HtmlVersion {
    #[serde(rename = "HTML4")]
    Html4,
    #[serde(rename = "XHTML")]
    Xhtml,
    #[serde(rename = "HTML5")]
    Html5,
    #[default]
    Unknown,
}

impl fmt::Display for HtmlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HtmlVersion::Html4 => "HTML4",
            HtmlVersion::Xhtml => "XHTML",
            HtmlVersion::Html5 => "HTML5",
            HtmlVersion::Unknown => "Unknown",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalMetadata {
    pub has_viewport: bool,
    pub has_charset: bool,
    pub has_canonical: bool,
    pub has_robots: bool,
    pub has_sitemap: bool,
    #[serde(rename = "hasRSS")]
    pub has_rss: bool,
    #[serde(rename = "hasAMP")]
    pub has_amp: bool,
    pub has_mobile_alternate: bool,
    pub doctype: Option<String>,
    pub html_version: HtmlVersion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub url: String,
    pub text: Option<String>,
    pub rel: Option<String>,
    pub is_nofollow: bool,
    pub is_sponsored: bool,
    #[serde(rename = "isUGC")]
    pub is_ugc: bool,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInventory {
    pub internal: Vec<LinkRecord>,
    pub external: Vec<LinkRecord>,
    pub nofollow: Vec<LinkRecord>,
    pub counts: LinkCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCounts {
    pub internal: usize,
    pub external: usize,
    pub nofollow: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRecord {
    pub text: String,
    pub id: Option<String>,
    pub length: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingInventory {
    pub h1: Vec<HeadingRecord>,
    pub h2: Vec<HeadingRecord>,
    pub h3: Vec<HeadingRecord>,
    pub h4: Vec<HeadingRecord>,
    pub h5: Vec<HeadingRecord>,
    pub h6: Vec<HeadingRecord>,
    pub counts: HeadingCounts,
}

impl HeadingInventory {
    /// Mutable bucket for heading level 1..=6.
    pub fn level_mut(&mut self, level: u8) -> Option<&mut Vec<HeadingRecord>> {
        match level {
            1 => Some(&mut self.h1),
            2 => Some(&mut self.h2),
            3 => Some(&mut self.h3),
            4 => Some(&mut self.h4),
            5 => Some(&mut self.h5),
            6 => Some(&mut self.h6),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub h4: usize,
    pub h5: usize,
    pub h6: usize,
}

impl HeadingCounts {
    pub fn total(&self) -> usize {
        self.h1 + self.h2 + self.h3 + self.h4 + self.h5 + self.h6
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub src: String,
    pub alt: Option<String>,
    pub has_alt: bool,
    pub is_lazy: bool,
    pub srcset: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInventory {
    pub with_alt: Vec<ImageRecord>,
    pub without_alt: Vec<ImageRecord>,
    pub lazy_loaded: Vec<ImageRecord>,
    pub counts: ImageCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCounts {
    pub total: usize,
    pub with_alt: usize,
    pub without_alt: usize,
    pub lazy_loaded: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub total_images: usize,
    pub total_scripts: usize,
    pub total_stylesheets: usize,
    pub inline_scripts: usize,
    pub inline_styles: usize,
    pub total_links: usize,
    pub total_headings: usize,
    pub html_size: usize,
    pub estimated_page_weight: PageWeight,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWeight {
    pub html: u64,
    pub estimated_external_resources: u64,
    pub total_estimated: u64,
}

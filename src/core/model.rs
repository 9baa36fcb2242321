use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate project slug `{0}`")]
    DuplicateSlug(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Pdf,
    Svg,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(rename = "type")]
    pub kind: PlanType,
    pub src: String,
    #[serde(default)]
    pub label: Option<String>,
    /// 1-based page of a multi-page PDF.
    #[serde(default)]
    pub page: Option<u32>,
    /// Total pages of the PDF, when known; bounds page navigation.
    #[serde(default, rename = "pageCount")]
    pub page_count: Option<u32>,
}

impl Plan {
    /// Page to open, PDFs only. Missing or zero pages open the first page.
    pub fn page_index(&self) -> Option<u32> {
        match self.kind {
            PlanType::Pdf => {
                let page = self.page.unwrap_or(1).max(1);
                Some(match self.page_count {
                    Some(n) => page.min(n.max(1)),
                    None => page,
                })
            }
            PlanType::Svg => None,
        }
    }

    /// Stable key for a plan within its project's list.
    pub fn key(&self, index: usize) -> String {
        match self.page {
            Some(page) => format!("{}-{}", self.src, page),
            None => format!("{}-{}", self.src, index),
        }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or("View Plan")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    /// Source photo used when generating the splat offline.
    #[serde(default)]
    pub building_photo_path: Option<String>,
    #[serde(default)]
    pub splat_url: Option<String>,
    #[serde(default)]
    pub fallback_media_url: Option<String>,
    #[serde(default)]
    pub plans: Vec<Plan>,
}

impl Project {
    pub fn splat(&self) -> Option<&str> {
        non_empty(self.splat_url.as_deref())
    }

    pub fn fallback(&self) -> Option<&str> {
        non_empty(self.fallback_media_url.as_deref())
    }

    pub fn href(&self) -> String {
        format!("/project/{}", self.slug)
    }

    /// Description split into paragraphs on blank lines.
    pub fn paragraphs(&self) -> Vec<&str> {
        paragraphs(&self.description)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Accolade {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub splat_url: Option<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub accolades: Vec<Accolade>,
}

pub const CERTIFICATIONS_TITLE: &str = "Certifications";

impl Profile {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn photo(&self) -> Option<&str> {
        non_empty(self.photo.as_deref())
    }

    pub fn splat(&self) -> Option<&str> {
        non_empty(self.splat_url.as_deref())
    }

    pub fn locations_line(&self) -> String {
        self.locations.join(" & ")
    }

    pub fn certifications(&self) -> Option<&Accolade> {
        self.accolades
            .iter()
            .find(|a| a.title == CERTIFICATIONS_TITLE)
    }

    pub fn accolades_excluding_certifications(&self) -> impl Iterator<Item = &Accolade> {
        self.accolades
            .iter()
            .filter(|a| a.title != CERTIFICATIONS_TITLE)
    }
}

/// Read-only project collection bundled with the site.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let projects: Vec<Project> = serde_json::from_str(json)?;
        Self::new(projects)
    }

    pub fn new(projects: Vec<Project>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for p in &projects {
            if !seen.insert(p.slug.as_str()) {
                return Err(CatalogError::DuplicateSlug(p.slug.clone()));
            }
            if p.splat().is_none() && p.fallback().is_none() {
                log::warn!(
                    "[catalog] project `{}` has neither splat nor fallback media; it will render the gradient placeholder",
                    p.slug
                );
            }
        }
        Ok(Self { projects })
    }

    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    pub fn by_slug(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.slug == slug)
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.projects.iter().map(|p| p.slug.as_str())
    }

    /// Projects that will fall through to the gradient placeholder.
    pub fn missing_media(&self) -> impl Iterator<Item = &Project> {
        self.projects
            .iter()
            .filter(|p| p.splat().is_none() && p.fallback().is_none())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Gallery,
    About,
    Project(String),
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let mut segments = trimmed.split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next(), segments.next()) {
            (None, _, _) => Route::Gallery,
            (Some("about"), None, _) => Route::About,
            (Some("project"), Some(slug), None) => Route::Project(slug.to_string()),
            _ => Route::NotFound,
        }
    }
}

#[inline]
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

pub fn paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

use serde::{Deserialize, Serialize};

use crate::id::IdStr;

/// Skill grouping used by the about section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Tools,
    Other,
}

/// One technology or competency listed on the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: SkillCategory,
    /// Optional icon identifier for the presentation layer.
    pub icon: Option<String>,
}

/// Link to an external profile (GitHub, LinkedIn, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub icon: String,
}

/// The site owner's profile record — static content supplied at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub tagline: String,
    pub bio: String,
    pub photo_url: Option<String>,
    pub email: String,
    pub skills: Vec<Skill>,
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Ongoing,
    Completed,
}

/// One portfolio project entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: IdStr,
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub thumbnail_url: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub technologies: Vec<String>,
    pub live_url: Option<String>,
    pub source_url: Option<String>,
    pub featured: bool,
    pub category: Option<String>,
    /// ISO-8601 date (`YYYY-MM-DD`) the project was completed, if it was.
    pub completed_date: Option<String>,
    pub status: Option<ProjectStatus>,
}

/// Everything the presentation layer needs to render the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    pub projects: Vec<Project>,
}

/// A contact-form submission, validated by the core before any dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

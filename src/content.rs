use serde::Deserialize;

use crate::error::SiteError;

const PORTFOLIO_JSON: &str = include_str!("../content/portfolio.json");
const DEFAULT_CATEGORY_ICON: &str = "code";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    pub profile: Profile,
    #[serde(default)]
    pub badges: Vec<BadgeText>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub quotes: Vec<Quote>,
    #[serde(default)]
    pub media: Option<MediaSource>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub summary: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BadgeText {
    pub text: String,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: u32,
    #[serde(default)]
    pub suffix: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MediaSource {
    Youtube {
        #[serde(rename = "videoId")]
        video_id: String,
        title: String,
    },
    Audio {
        src: String,
        title: String,
    },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub status: String,
    pub role: String,
    #[serde(default)]
    pub project_link: Option<String>,
    pub github_link: String,
}

impl Project {
    pub fn is_live(&self) -> bool {
        self.status.contains("Live")
    }

    /// The store link is only offered for shipped projects.
    pub fn store_link(&self) -> Option<&str> {
        if !self.is_live() {
            return None;
        }

        self.project_link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub title: String,
    pub date: String,
    pub organization: String,
    pub description: String,
    pub icon: String,
    pub certificate_image: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<String>,
}

impl SkillGroup {
    pub fn icon(&self) -> &'static str {
        category_icon(&self.category)
    }
}

impl PortfolioData {
    pub fn load() -> Result<Self, SiteError> {
        Self::from_json(PORTFOLIO_JSON)
    }

    pub fn from_json(raw: &str) -> Result<Self, SiteError> {
        Ok(serde_json::from_str(raw)?)
    }
}

pub fn category_icon(category: &str) -> &'static str {
    match category {
        "Mobile Development" => "mobile-alt",
        "AI & Machine Learning" => "robot",
        "Backend Technologies" => "server",
        "Cloud & DevOps" => "cloud",
        "Tools & Platforms" => "tools",
        "Architecture & Design" => "layer-group",
        _ => DEFAULT_CATEGORY_ICON,
    }
}

use folio_protocol::{Portfolio, Project};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("portfolio: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a portfolio content file (JSON).
pub fn parse_portfolio(data: &[u8]) -> Result<Portfolio, ContentError> {
    Ok(serde_json::from_slice(data)?)
}

/// Read-only query layer over the project records.
#[derive(Debug, Clone)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// All projects, in the order they were supplied.
    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    /// Projects flagged as featured.
    pub fn featured(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.featured).collect()
    }

    /// Look up a project by id.
    pub fn by_id(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == *id)
    }

    /// Projects in the given category.
    pub fn by_category(&self, category: &str) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| p.category.as_deref() == Some(category))
            .collect()
    }

    /// Distinct categories, in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for project in &self.projects {
            if let Some(category) = project.category.as_deref()
                && !seen.contains(&category)
            {
                seen.push(category);
            }
        }
        seen
    }
}

//! Prompt Loader
//!
//! Loads prompt templates from files or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;
use crate::config::Variant;
use crate::conversation::CONFIRMATION_PHRASE;

/// Context for rendering prompt templates
#[derive(Debug, Clone, Serialize)]
pub struct PromptContext {
    /// Sentence the model must use when asking to generate the itinerary
    pub confirmation_phrase: String,
    /// Selects the richer wording and itinerary shape
    pub detailed: bool,
}

impl PromptContext {
    pub fn for_variant(variant: Variant) -> Self {
        debug!(%variant, "PromptContext::for_variant: called");
        Self {
            confirmation_phrase: CONFIRMATION_PHRASE.to_string(),
            detailed: variant == Variant::Detailed,
        }
    }
}

/// The three texts a session needs, rendered for one variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    pub system: String,
    pub itinerary: String,
    pub greeting: String,
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (e.g., `.tripplanner/prompts/`)
    user_dir: Option<PathBuf>,
    /// Repo default directory (e.g., `prompts/`)
    repo_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader rooted at `base`
    ///
    /// Looks for `.tripplanner/prompts/` and `prompts/` under `base`.
    pub fn new(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        debug!(?base, "PromptLoader::new: called");
        let user_dir = base.join(".tripplanner/prompts");
        let repo_dir = base.join("prompts");

        let user_dir_exists = user_dir.exists();
        let repo_dir_exists = repo_dir.exists();
        debug!(
            ?user_dir,
            %user_dir_exists,
            ?repo_dir,
            %repo_dir_exists,
            "PromptLoader::new: checking directories"
        );

        Self {
            hbs: Self::engine(),
            user_dir: if user_dir_exists { Some(user_dir) } else { None },
            repo_dir: if repo_dir_exists { Some(repo_dir) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts (for testing)
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Self::engine(),
            user_dir: None,
            repo_dir: None,
        }
    }

    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        // Prompts are plain text, not HTML
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. User override: `.tripplanner/prompts/{name}.pmt`
    /// 2. Repo default: `prompts/{name}.pmt`
    /// 3. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        for dir in [&self.user_dir, &self.repo_dir].into_iter().flatten() {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found on disk");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: found in embedded");
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &PromptContext) -> Result<String> {
        let template = self.load_template(template_name)?;
        info!("Rendering template '{}' (detailed: {})", template_name, context.detailed);

        self.hbs
            .render_template(&template, context)
            .map(|s| s.trim().to_string())
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    /// Render every prompt a session needs for `variant`
    pub fn prompt_set(&self, variant: Variant) -> Result<PromptSet> {
        debug!(%variant, "PromptLoader::prompt_set: called");
        let context = PromptContext::for_variant(variant);
        Ok(PromptSet {
            system: self.render("system", &context)?,
            itinerary: self.render("itinerary", &context)?,
            greeting: self.render("greeting", &context)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_carries_confirmation_phrase() {
        let loader = PromptLoader::embedded_only();
        let set = loader.prompt_set(Variant::Classic).unwrap();
        assert!(set.system.contains(CONFIRMATION_PHRASE));
        assert!(!set.system.contains("{{"));
    }

    #[test]
    fn test_detailed_itinerary_mentions_transport() {
        let loader = PromptLoader::embedded_only();
        let detailed = loader.prompt_set(Variant::Detailed).unwrap();
        let classic = loader.prompt_set(Variant::Classic).unwrap();

        assert!(detailed.itinerary.contains("\"transport\""));
        assert!(detailed.itinerary.contains("\"alternative\""));
        assert!(!classic.itinerary.contains("\"transport\""));
        assert!(detailed.system.contains("dietary and mobility concerns right after trip duration"));
    }

    #[test]
    fn test_itinerary_prompt_is_not_html_escaped() {
        let loader = PromptLoader::embedded_only();
        let set = loader.prompt_set(Variant::Detailed).unwrap();
        assert!(set.itinerary.contains("\"time\": \"Morning\""));
        assert!(!set.itinerary.contains("&quot;"));
    }

    #[test]
    fn test_greeting_is_trimmed() {
        let loader = PromptLoader::embedded_only();
        let set = loader.prompt_set(Variant::Classic).unwrap();
        assert!(set.greeting.starts_with("Hi there!"));
        assert!(!set.greeting.ends_with('\n'));
    }

    #[test]
    fn test_user_override_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let user_dir = dir.path().join(".tripplanner/prompts");
        let repo_dir = dir.path().join("prompts");
        std::fs::create_dir_all(&user_dir).unwrap();
        std::fs::create_dir_all(&repo_dir).unwrap();
        std::fs::write(user_dir.join("greeting.pmt"), "Bonjour! Where to?").unwrap();
        std::fs::write(repo_dir.join("greeting.pmt"), "Repo greeting").unwrap();
        std::fs::write(repo_dir.join("system.pmt"), "Plan trips. Ask: {{confirmation_phrase}}").unwrap();

        let loader = PromptLoader::new(dir.path());
        let set = loader.prompt_set(Variant::Classic).unwrap();

        assert_eq!(set.greeting, "Bonjour! Where to?");
        assert_eq!(set.system, format!("Plan trips. Ask: {}", CONFIRMATION_PHRASE));
        // No override on disk, so the embedded template is used
        assert!(set.itinerary.contains("\"itinerary\""));
    }

    #[test]
    fn test_prompt_loader_unknown_template() {
        let loader = PromptLoader::embedded_only();
        assert!(loader.load_template("nonexistent-template").is_err());
    }
}

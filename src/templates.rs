//! Named text templates.
//!
//! Built-in templates are compiled into the binary; a configured templates
//! directory may override any of them by file name (`robots.hbs`, `story.hbs`).

use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

pub const ROBOTS: &str = "robots";
pub const STORY: &str = "story";

const BUILT_IN: [(&str, &str); 2] = [
    (ROBOTS, include_str!("../templates/robots.hbs")),
    (STORY, include_str!("../templates/story.hbs")),
];

#[derive(Debug, Error)]
pub enum TemplateLoadError {
    #[error("template '{name}' failed to compile: {source}")]
    Compile {
        name: &'static str,
        #[source]
        source: Box<TemplateError>,
    },
}

/// Registry of the templates used by the HTTP handlers.
#[derive(Debug)]
pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    /// Built-in templates only.
    pub fn new() -> Result<Self, TemplateLoadError> {
        Self::load(None)
    }

    /// Built-in templates, with overrides from `dir` when given.
    pub fn load(dir: Option<&Path>) -> Result<Self, TemplateLoadError> {
        let mut registry = Handlebars::new();

        for (name, source) in BUILT_IN {
            let override_path = dir
                .map(|dir| dir.join(format!("{name}.hbs")))
                .filter(|path| path.is_file());

            let result = match &override_path {
                Some(path) => {
                    tracing::info!(template = name, path = %path.display(), "Loading template override");
                    registry.register_template_file(name, path)
                }
                None => registry.register_template_string(name, source),
            };

            result.map_err(|e| TemplateLoadError::Compile {
                name,
                source: Box::new(e),
            })?;
        }

        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String, RenderError> {
        self.registry.render(name, context)
    }
}

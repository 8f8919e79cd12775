//! Template rendering
//!
//! Thin wrapper over a `minijinja` environment whose loader is rooted at the
//! configured templates directory. Cloning is cheap, so handlers capture a
//! clone at registration time.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use minijinja::Environment;
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Templates {
    dir: PathBuf,
    env: Arc<Environment<'static>>,
}

impl Templates {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(&dir));

        Self {
            dir,
            env: Arc::new(env),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Render `name` with `context`; a missing template is an error
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(context)?)
    }
}

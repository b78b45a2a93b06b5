//! Template engine
//!
//! Parses each distinct template string once and keeps the prepared form
//! (compiled closures, or the AST when interpreting) in a bounded FIFO
//! cache. Rendering a batch reuses one prepared template for every file.

use crate::config::{Backend, EngineConfig};
use crate::context::EvaluationContext;
use crate::error::{ConfigError, SyntaxError};
use crate::template::{compile, evaluate, parse, CompiledTemplate, Template};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

/// A parsed template ready to render
#[derive(Debug)]
pub struct PreparedTemplate {
    source: String,
    template: Template,
    compiled: Option<CompiledTemplate>,
}

impl PreparedTemplate {
    /// Parse `source` and prepare it for `backend`
    pub fn new(source: &str, backend: Backend) -> Result<Self, SyntaxError> {
        let template = parse(source)?;
        let compiled = match backend {
            Backend::Compiled => Some(compile(&template)),
            Backend::Interpreted => None,
        };

        tracing::debug!(
            "Prepared template '{}' ({} nodes, {})",
            source,
            template.nodes.len(),
            backend.canonical_name()
        );

        Ok(Self {
            source: source.to_string(),
            template,
            compiled,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn backend(&self) -> Backend {
        if self.compiled.is_some() {
            Backend::Compiled
        } else {
            Backend::Interpreted
        }
    }

    pub fn render(&self, ctx: &dyn EvaluationContext) -> String {
        match &self.compiled {
            Some(compiled) => compiled.render(ctx),
            None => evaluate(&self.template, ctx),
        }
    }
}

/// FIFO cache of prepared templates keyed by source text
#[derive(Debug, Default)]
struct TemplateCache {
    capacity: usize,
    order: VecDeque<String>,
    entries: HashMap<String, Arc<PreparedTemplate>>,
}

impl TemplateCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    fn get(&self, source: &str) -> Option<Arc<PreparedTemplate>> {
        self.entries.get(source).cloned()
    }

    fn insert(&mut self, prepared: Arc<PreparedTemplate>) {
        if self.capacity == 0 || self.entries.contains_key(prepared.source()) {
            return;
        }
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
        self.order.push_back(prepared.source().to_string());
        self.entries.insert(prepared.source().to_string(), prepared);
    }

    fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }
}

/// Renders templates for batches of files
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    cache: Mutex<TemplateCache>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            cache: Mutex::new(TemplateCache::new(config.cache_capacity)),
            config,
        }
    }

    /// Engine configured from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(EngineConfig::from_env()?))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse (or fetch from cache) a template string
    pub fn prepare(&self, source: &str) -> Result<Arc<PreparedTemplate>, SyntaxError> {
        if let Some(prepared) = self.lock_cache().get(source) {
            return Ok(prepared);
        }

        let prepared = Arc::new(PreparedTemplate::new(source, self.config.backend)?);
        self.lock_cache().insert(prepared.clone());
        Ok(prepared)
    }

    /// Render one context
    pub fn render(&self, source: &str, ctx: &dyn EvaluationContext) -> Result<String, SyntaxError> {
        Ok(self.prepare(source)?.render(ctx))
    }

    /// Render every context in order. Only a syntax error in the template fails.
    pub fn render_batch<C: EvaluationContext>(
        &self,
        source: &str,
        contexts: &[C],
    ) -> Result<Vec<String>, SyntaxError> {
        let prepared = self.prepare(source)?;
        tracing::debug!("Rendering '{}' for {} files", source, contexts.len());
        Ok(contexts.iter().map(|ctx| prepared.render(ctx)).collect())
    }

    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    /// Number of templates currently cached
    pub fn cached_len(&self) -> usize {
        self.lock_cache().entries.len()
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, TemplateCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

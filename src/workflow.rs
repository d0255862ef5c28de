use std::sync::Arc;

use anyhow::{Context, Result};
use frontpage::api::{ContentSource, HnClient, Item};
use frontpage::app_dirs;
use frontpage::session::{FileStore, KeyValueStore, MemoryStore, Session};
use frontpage::ui::ReaderUi;
use tokio::runtime::Runtime;
use tracing::info;

use crate::settings::ResolvedConfig;

/// Coordinates building and running the reader from resolved settings.
pub(crate) struct ReaderWorkflow {
    config: ResolvedConfig,
    client: Arc<HnClient>,
}

impl ReaderWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
        let client = HnClient::new(&config.base_url, config.timeout())
            .with_context(|| format!("failed to create API client for {}", config.base_url))?;
        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }

    /// Open the interactive reader.
    pub(crate) fn run(self, runtime: &Runtime) -> Result<()> {
        let session = open_session(self.config.persist_session)?;
        info!(
            section = %self.config.section,
            persist = self.config.persist_session,
            "starting reader"
        );
        let source: Arc<dyn ContentSource> = self.client;
        ReaderUi::new(source, runtime.handle().clone())
            .with_session(session)
            .with_config(self.config.ui_config())
            .run()
    }

    /// Fetch the first page of the configured section.
    pub(crate) fn first_page(&self, runtime: &Runtime) -> Result<Vec<Item>> {
        let section = self.config.section;
        runtime
            .block_on(self.client.fetch_page(section, 0, self.config.page_size))
            .with_context(|| format!("Failed to load {section} stories"))
    }

    pub(crate) fn section(&self) -> frontpage::Section {
        self.config.section
    }
}

/// Session backed by the session file, or by memory when persistence is off.
fn open_session(persist: bool) -> Result<Session> {
    let store: Box<dyn KeyValueStore> = if persist {
        let path = app_dirs::session_file()?;
        Box::new(FileStore::open(path)?)
    } else {
        Box::new(MemoryStore::new())
    };
    Ok(Session::hydrate(store)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_session_starts_logged_out() {
        let session = open_session(false).unwrap();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn workflow_uses_configured_section() {
        let config = ResolvedConfig {
            section: frontpage::Section::Jobs,
            ..ResolvedConfig::default()
        };
        let workflow = ReaderWorkflow::from_config(config).unwrap();
        assert_eq!(workflow.section(), frontpage::Section::Jobs);
    }

    #[test]
    fn workflow_rejects_unusable_base_url() {
        let config = ResolvedConfig {
            base_url: "mailto:someone@example.com".into(),
            ..ResolvedConfig::default()
        };
        assert!(ReaderWorkflow::from_config(config).is_err());
    }
}

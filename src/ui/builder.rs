use std::sync::Arc;

use anyhow::Result;
use tokio::runtime::Handle;

use super::App;
use super::config::UiConfig;
use super::theme::Theme;
use crate::api::{ContentSource, Section};
use crate::session::{MemoryStore, Session};

/// Builder for the interactive reader.
///
/// ```no_run
/// # use std::{sync::Arc, time::Duration};
/// # use frontpage::api::{HnClient, Section, DEFAULT_BASE_URL};
/// # use frontpage::ui::ReaderUi;
/// # fn main() -> anyhow::Result<()> {
/// let runtime = tokio::runtime::Runtime::new()?;
/// let client = HnClient::new(DEFAULT_BASE_URL, Duration::from_secs(10))?;
/// ReaderUi::new(Arc::new(client), runtime.handle().clone())
///     .with_section(Section::Ask)
///     .with_auto_refresh(true)
///     .run()?;
/// # Ok(())
/// # }
/// ```
pub struct ReaderUi {
    source: Arc<dyn ContentSource>,
    runtime: Handle,
    session: Option<Session>,
    config: UiConfig,
}

impl ReaderUi {
    pub fn new(source: Arc<dyn ContentSource>, runtime: Handle) -> Self {
        Self {
            source,
            runtime,
            session: None,
            config: UiConfig::default(),
        }
    }

    /// Use `session` instead of a throwaway in-memory one.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_config(mut self, config: UiConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.config.section = section;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    pub fn with_refresh_interval(mut self, seconds: u64) -> Self {
        self.config.refresh_interval_secs = seconds;
        self
    }

    pub fn with_auto_refresh(mut self, enabled: bool) -> Self {
        self.config.auto_refresh = enabled;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.config.theme = theme;
        self
    }

    /// Build the [`App`] without starting the terminal.
    pub fn into_app<'a>(self) -> Result<App<'a>> {
        let session = match self.session {
            Some(session) => session,
            None => Session::hydrate(Box::new(MemoryStore::new()))?,
        };
        Ok(App::new(self.source, self.runtime, session, self.config))
    }

    /// Run the reader until the user quits.
    pub fn run(self) -> Result<()> {
        let mut app = self.into_app()?;
        app.run()
    }
}

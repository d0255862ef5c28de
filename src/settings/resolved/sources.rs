use std::fmt;

/// Where a configuration value came from, for error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
    CliFlag(&'static str),
    Environment(&'static str),
    ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
            Self::Environment(var) => write!(f, "environment variable `{var}`"),
            Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
        }
    }
}

/// Origins of the explicitly set keys.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
    entries: Vec<(&'static str, SettingSource)>,
}

impl ConfigSources {
    pub(crate) fn record(&mut self, key: &'static str, source: Option<SettingSource>) {
        if let Some(source) = source {
            self.entries.push((key, source));
        }
    }

    /// Origin of `key`, falling back to the key itself when it was not
    /// set explicitly.
    pub(crate) fn source_for(&self, key: &'static str) -> SettingSource {
        self.entries
            .iter()
            .find(|(recorded, _)| *recorded == key)
            .map(|(_, source)| source.clone())
            .unwrap_or(SettingSource::ConfigKey(key))
    }
}

use std::path::PathBuf;
use std::time::Duration;

use crate::io::advisor::{AdvisoryUnavailable, OllamaAdvisor};
use crate::io::config_io::{self, ConfigError};
use crate::io::local_store::JsonFileStore;
use crate::io::remote::{HttpRemoteClient, RemoteUnavailable};
use crate::model::config::Config;
use crate::ops::merge::MergePolicy;
use crate::ops::sync::{Session, StatusSink};

/// Command-line overrides applied on top of the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub remote: Option<String>,
    pub cache: Option<PathBuf>,
}

/// Resolved configuration plus where it came from
#[derive(Debug, Clone)]
pub struct Context {
    pub config_path: PathBuf,
    pub config: Config,
}

/// The session type both front ends drive
pub type HttpSession<S> = Session<HttpRemoteClient, JsonFileStore, S>;

impl Context {
    pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
        let config_path = overrides
            .config
            .clone()
            .unwrap_or_else(config_io::config_path);
        let mut config = config_io::read_config(&config_path)?;
        if let Some(url) = &overrides.remote {
            config.remote.url = url.clone();
        }
        if let Some(cache) = &overrides.cache {
            config.cache.path = cache.to_string_lossy().into_owned();
        }
        Ok(Context {
            config_path,
            config,
        })
    }

    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.config.cache.path)
    }

    pub fn remote(&self) -> Result<HttpRemoteClient, RemoteUnavailable> {
        HttpRemoteClient::new(
            &self.config.remote.url,
            Duration::from_secs(self.config.remote.timeout_secs),
        )
    }

    pub fn advisor(&self) -> Result<OllamaAdvisor, AdvisoryUnavailable> {
        OllamaAdvisor::new(
            &self.config.advisor.endpoint,
            &self.config.advisor.model,
            Duration::from_secs(self.config.advisor.timeout_secs),
        )
    }

    pub fn merge_policy(&self) -> MergePolicy {
        MergePolicy {
            dedupe_local: self.config.merge.dedupe_local,
        }
    }

    /// A session that has not loaded anything yet
    pub fn session<S: StatusSink>(&self, sink: S) -> Result<HttpSession<S>, RemoteUnavailable> {
        Ok(Session::new(self.remote()?, self.store(), sink).with_policy(self.merge_policy()))
    }

    /// Where the TUI writes its log when `DEACON_LOG` is set
    pub fn log_path(&self) -> PathBuf {
        self.config_path
            .parent()
            .map(|p| p.join("deacon.log"))
            .unwrap_or_else(|| PathBuf::from("deacon.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn overrides_win_over_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            "[remote]\nurl = \"http://file/api\"\n[cache]\npath = \"file.json\"\n",
        )
        .unwrap();

        let ctx = Context::load(&Overrides {
            config: Some(path.clone()),
            remote: Some("http://flag/api".into()),
            cache: None,
        })
        .unwrap();
        assert_eq!(ctx.config.remote.url, "http://flag/api");
        assert_eq!(ctx.config.cache.path, "file.json");
        assert_eq!(ctx.log_path(), tmp.path().join("deacon.log"));
    }

    #[test]
    fn bad_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[remote]\ntimeout_secs = \"soon\"\n").unwrap();
        let err = Context::load(&Overrides {
            config: Some(path),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}

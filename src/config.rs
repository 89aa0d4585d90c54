use std::path::PathBuf;
use std::sync::Arc;
use std::{env, fs, io};

use anyhow::{bail, Context, Result};
use clap::Args;
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::session::{FileStorage, Session};
use crate::client::{ClientBuilder, DEFAULT_BASE_URL, DEFAULT_LOGIN_PATH};
use crate::dirs::ensure_dir_exists;

pub struct PathSet {
    pub config_path: PathBuf,
    pub data_path: PathBuf,
}

impl PathSet {
    pub fn new(config_path: Option<PathBuf>, data_path: Option<PathBuf>) -> Result<Self> {
        let config_path = if let Some(path) = config_path {
            path
        } else if let Ok(path) = env::var("MFM_CONFIG") {
            PathBuf::from(path)
        } else {
            Self::home_dir()?.join(".config").join("mfm")
        };

        let data_path = if let Some(path) = data_path {
            path
        } else if let Ok(path) = env::var("MFM_DATA") {
            PathBuf::from(path)
        } else {
            Self::home_dir()?.join(".local").join("share").join("mfm")
        };

        ensure_dir_exists(&config_path)
            .with_context(|| format!("ensure config directory: {}", config_path.display()))?;
        ensure_dir_exists(&data_path)
            .with_context(|| format!("ensure data directory: {}", data_path.display()))?;

        Ok(Self {
            config_path,
            data_path,
        })
    }

    pub fn load_config<T, F>(&self, name: &str, default_func: F) -> Result<T>
    where
        T: CommonConfig + DeserializeOwned,
        F: FnOnce() -> T,
    {
        let path = self.config_path.join(format!("{name}.toml"));
        let mut cfg: T = match fs::read_to_string(&path) {
            Ok(s) => toml::from_str(&s).context("parse config toml")?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!("Config file for {name} not found, using defaults");
                default_func()
            }
            Err(err) => {
                return Err(err).context(format!("read config file: {}", path.display()));
            }
        };

        cfg.complete(self).context("validate config")?;
        Ok(cfg)
    }

    fn home_dir() -> Result<PathBuf> {
        let dir = env::var_os("HOME")
            .or_else(|| env::var_os("USERPROFILE"))
            .map(PathBuf::from);
        match dir {
            Some(dir) => Ok(dir),
            None => {
                bail!("could not determine home directory, please specify config path manually")
            }
        }
    }
}

pub trait CommonConfig {
    fn default() -> Self;
    fn complete(&mut self, ps: &PathSet) -> Result<()>;
}

/// See: [`shellexpand::full`].
pub fn expandenv(name: &str, s: impl AsRef<str>) -> Result<String> {
    let s =
        shellexpand::full(s.as_ref()).with_context(|| format!("expand env value for '{name}'"))?;
    Ok(s.to_string())
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend API, including the `/api` prefix.
    #[serde(default = "ClientConfig::default_server")]
    pub server: String,

    /// Login screen a 401 sends the user back to.
    #[serde(default = "ClientConfig::default_login_path")]
    pub login_path: String,

    /// Directory holding the durable session files. Defaults to the data
    /// directory.
    #[serde(default = "ClientConfig::default_storage_dir")]
    pub storage_dir: String,
}

impl CommonConfig for ClientConfig {
    fn default() -> Self {
        Self {
            server: Self::default_server(),
            login_path: Self::default_login_path(),
            storage_dir: Self::default_storage_dir(),
        }
    }

    fn complete(&mut self, ps: &PathSet) -> Result<()> {
        // Scheme validation happens in ClientBuilder::build.
        self.server = expandenv("server", &self.server)?;
        if self.server.is_empty() {
            bail!("server cannot be empty");
        }

        if self.login_path.is_empty() {
            bail!("login_path cannot be empty");
        }

        self.storage_dir = expandenv("storage_dir", &self.storage_dir)?;
        if self.storage_dir.is_empty() {
            let path = ps.data_path.join("session");
            self.storage_dir = format!("{}", path.display());
        }
        ensure_dir_exists(&PathBuf::from(&self.storage_dir)).context("ensure storage dir")?;

        Ok(())
    }
}

impl ClientConfig {
    pub fn default_server() -> String {
        String::from(DEFAULT_BASE_URL)
    }

    pub fn default_login_path() -> String {
        String::from(DEFAULT_LOGIN_PATH)
    }

    pub fn default_storage_dir() -> String {
        String::new()
    }

    /// Builds a client wired to this config's backend, session storage and
    /// login path. The unauthorized hook is left to the caller.
    pub fn client_builder(&self) -> ClientBuilder {
        let storage = FileStorage::new(PathBuf::from(&self.storage_dir));
        let session = Session::new(Arc::new(storage));
        ClientBuilder::new(&self.server)
            .with_session(session)
            .with_login_path(&self.login_path)
    }
}

/// Config location flags shared by every console command.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Config directory path
    #[arg(long)]
    pub config_path: Option<PathBuf>,

    /// Data directory path
    #[arg(long)]
    pub data_path: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self, name: &str) -> Result<ClientConfig> {
        let ps = PathSet::new(self.config_path.clone(), self.data_path.clone())?;
        ps.load_config(name, ClientConfig::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_completes() {
        let dir = PathBuf::from("_test_config_paths");
        let ps = PathSet::new(Some(dir.join("config")), Some(dir.join("data"))).unwrap();

        let mut cfg = <ClientConfig as CommonConfig>::default();
        cfg.complete(&ps).unwrap();

        assert_eq!(cfg.server, DEFAULT_BASE_URL);
        assert_eq!(cfg.login_path, DEFAULT_LOGIN_PATH);
        assert!(cfg.storage_dir.contains("session"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_server_is_rejected() {
        let dir = PathBuf::from("_test_config_empty_server");
        let ps = PathSet::new(Some(dir.join("config")), Some(dir.join("data"))).unwrap();

        let mut cfg = <ClientConfig as CommonConfig>::default();
        cfg.server = String::new();
        assert!(cfg.complete(&ps).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_config_parses_toml() {
        let cfg: ClientConfig = toml::from_str(
            r#"
            server = "https://mfm.example.com/api"
            login_path = "/login"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server, "https://mfm.example.com/api");
        assert_eq!(cfg.login_path, "/login");
        assert!(cfg.storage_dir.is_empty());
    }
}

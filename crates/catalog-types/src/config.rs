use clap::Parser;
use std::{fs, path::PathBuf};

#[derive(Debug, Clone, Parser)]
pub struct BackendConfig {
    #[arg(
        long,
        env = "CATALOG_DATABASE_URL",
        help = "Database URL e.g. sqlite://file.db, default is sqlite://[data-dir]/catalog.db, where data-dir is set by --data-dir"
    )]
    database_url: Option<String>,

    #[arg(
        long,
        env = "CATALOG_DATA_DIR",
        help = "Data directory (databases, configs etc.), default is system default like ~/.local/share/catalog",
        default_value_t = default_data_dir()
    )]
    data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("catalog"))
        .unwrap_or_else(|| PathBuf::from("catalog"))
        .to_string_lossy()
        .to_string()
}

impl BackendConfig {
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Makes sure data directory exists, it's needed only for default database location
    pub fn prepare_data_dir(&self) -> std::io::Result<()> {
        let dir = self.data_dir();
        if !fs::exists(&dir)? {
            fs::create_dir_all(&dir)
        } else if !dir.is_dir() {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                format!("Data directory {dir:?} is not a directory"),
            ))
        } else {
            Ok(())
        }
    }

    pub fn database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| format!("sqlite://{}/catalog.db?mode=rwc", self.data_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_default() {
        let config = BackendConfig::parse_from(["test", "--data-dir", "/tmp/catalog-test"]);
        assert_eq!(
            config.database_url(),
            "sqlite:///tmp/catalog-test/catalog.db?mode=rwc"
        );
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/catalog-test"));
    }

    #[test]
    fn test_database_url_explicit() {
        let config = BackendConfig::parse_from(["test", "--database-url", "sqlite::memory:"]);
        assert_eq!(config.database_url(), "sqlite::memory:");
    }
}

use crate::{
    config::BoardConfig,
    domain::{BoardMeta, Task},
    error::Result,
    storage::Storage,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File-based storage implementation
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const BOARD_DIR: &'static str = ".taskboard";
    const TASKS_FILE: &'static str = "tasks.json";
    const BOARD_FILE: &'static str = "board.json";
    const CONFIG_FILE: &'static str = "config.toml";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::BOARD_DIR),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn tasks_file(&self) -> PathBuf {
        self.root_path.join(Self::TASKS_FILE)
    }

    fn board_file(&self) -> PathBuf {
        self.root_path.join(Self::BOARD_FILE)
    }

    pub fn config_file(&self) -> PathBuf {
        self.root_path.join(Self::CONFIG_FILE)
    }

    /// Reads `config.toml`, falling back to defaults when it is absent
    pub async fn load_config(&self) -> Result<BoardConfig> {
        match read_optional(&self.config_file()).await? {
            Some(contents) => BoardConfig::from_toml_str(&contents),
            None => Ok(BoardConfig::default()),
        }
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        match read_optional(path).await? {
            Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            None => Ok(None),
        }
    }
}

async fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let config_path = self.config_file();
        if !config_path.exists() {
            fs::write(&config_path, BoardConfig::default().to_toml_string()?).await?;
        }

        Ok(())
    }

    async fn load_tasks(&self) -> Result<Option<Vec<Task>>> {
        self.read_json(&self.tasks_file()).await
    }

    async fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(tasks)?;
        fs::write(self.tasks_file(), json).await?;
        debug!(count = tasks.len(), "wrote task list");
        Ok(())
    }

    async fn load_board(&self) -> Result<Option<BoardMeta>> {
        self.read_json(&self.board_file()).await
    }

    async fn save_board(&self, meta: &BoardMeta) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(meta)?;
        fs::write(self.board_file(), json).await?;
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.board_file().exists()
    }
}

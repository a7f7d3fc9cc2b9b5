//! 配置服务

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::utils::datetime::{DEFAULT_DATE_FORMAT, is_valid_date_format};

/// 浏览器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowserConfig {
    /// Blob key 的目录分隔符
    pub delimiter: char,
    /// 时间显示格式 (`strftime`)
    pub date_format: String,
    /// 是否显示已禁用的 Key Vault 条目
    pub show_disabled_items: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            delimiter: '/',
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            show_disabled_items: true,
        }
    }
}

impl BrowserConfig {
    /// 校验时间格式
    pub fn validate(&self) -> CoreResult<()> {
        if is_valid_date_format(&self.date_format) {
            Ok(())
        } else {
            Err(CoreError::Config(format!(
                "Invalid dateFormat: {:?}",
                self.date_format
            )))
        }
    }
}

/// 配置服务 trait
#[async_trait]
pub trait ConfigService: Send + Sync {
    /// 加载配置
    async fn load(&self) -> CoreResult<BrowserConfig>;

    /// 保存配置
    async fn save(&self, config: &BrowserConfig) -> CoreResult<()>;
}

/// 基于 JSON 文件的配置服务
pub struct JsonConfigService {
    path: PathBuf,
}

impl JsonConfigService {
    /// `<config_dir>/azct/config.json`
    pub fn new() -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("azct");
        Self::with_path(dir.join("config.json"))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Default for JsonConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigService for JsonConfigService {
    async fn load(&self) -> CoreResult<BrowserConfig> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            log::debug!("No config at {}, using defaults", self.path.display());
            return Ok(BrowserConfig::default());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CoreError::Config(format!("{}: {e}", self.path.display())))?;

        let config: BrowserConfig = serde_json::from_str(&content)
            .map_err(|e| CoreError::Config(format!("{}: {e}", self.path.display())))?;
        config.validate()?;
        Ok(config)
    }

    async fn save(&self, config: &BrowserConfig) -> CoreResult<()> {
        config.validate()?;
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| CoreError::Config(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(config).map_err(|e| CoreError::Config(e.to_string()))?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| CoreError::Config(e.to_string()))?;

        log::info!("Config saved to {}", self.path.display());
        Ok(())
    }
}

/// 内存配置服务
#[derive(Default)]
pub struct InMemoryConfigService {
    config: RwLock<BrowserConfig>,
}

impl InMemoryConfigService {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }
}

#[async_trait]
impl ConfigService for InMemoryConfigService {
    async fn load(&self) -> CoreResult<BrowserConfig> {
        Ok(self.config.read().await.clone())
    }

    async fn save(&self, config: &BrowserConfig) -> CoreResult<()> {
        *self.config.write().await = config.clone();
        Ok(())
    }
}

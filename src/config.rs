//! 平台配置 - 收件人列表和 signal-cli 连接方式

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 默认的 signal-cli 命令名
pub const DEFAULT_SIGNAL_CLI: &str = "signal-cli";

/// signal-cli daemon 所在的 D-Bus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbusBus {
    #[default]
    System,
    Session,
}

impl DbusBus {
    /// 对应的 signal-cli 全局参数
    pub fn cli_flag(&self) -> &'static str {
        match self {
            DbusBus::System => "--dbus-system",
            DbusBus::Session => "--dbus",
        }
    }
}

impl std::str::FromStr for DbusBus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "system" => Ok(DbusBus::System),
            "session" => Ok(DbusBus::Session),
            other => bail!("unknown D-Bus bus '{}', expected 'system' or 'session'", other),
        }
    }
}

/// 命令行对配置文件的覆盖项
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// 非空时替换文件中的收件人
    pub recipients: Vec<String>,
    pub bus: Option<DbusBus>,
    pub signal_cli: Option<String>,
    /// 只能打开，不能关闭文件里的 dry_run
    pub dry_run: bool,
}

/// 平台配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// 收件人（电话号码或群组），单个字符串或列表；可由命令行补上，校验在合并之后
    #[serde(default, deserialize_with = "one_or_many")]
    pub recipients: Vec<String>,
    /// signal-cli 路径，未设置时从 PATH 查找
    #[serde(default)]
    pub signal_cli: Option<String>,
    #[serde(default)]
    pub bus: DbusBus,
    /// 只记录日志不发送
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

impl SignalConfig {
    pub fn new<I, S>(recipients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            recipients: recipients.into_iter().map(Into::into).collect(),
            signal_cli: None,
            bus: DbusBus::default(),
            dry_run: false,
        }
    }

    /// 默认配置路径: ~/.signal-notify/config.json
    pub fn default_path() -> Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(".signal-notify/config.json"))
    }

    /// 只解析，不校验
    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: SignalConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        debug!(path = %path.display(), recipients = config.recipients.len(), "Loaded config");
        Ok(config)
    }

    /// 从 JSON 文件加载并校验
    pub fn load(path: &Path) -> Result<Self> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// 加载默认路径的配置
    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_path()?)
    }

    /// 配置文件 + 命令行覆盖
    ///
    /// 未指定路径时读取默认配置；默认配置不存在且命令行给了收件人时从空配置开始。
    pub fn resolve(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        match path {
            Some(path) => Self::resolve_at(path, true, overrides),
            None => Self::resolve_at(&Self::default_path()?, false, overrides),
        }
    }

    fn resolve_at(path: &Path, required: bool, overrides: ConfigOverrides) -> Result<Self> {
        let base = if required || path.exists() || overrides.recipients.is_empty() {
            Self::read(path)?
        } else {
            debug!(path = %path.display(), "No config file, using command line only");
            Self::new(Vec::<String>::new())
        };

        let config = base.with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// 应用命令行覆盖项
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if !overrides.recipients.is_empty() {
            self.recipients = overrides.recipients;
        }
        if let Some(bus) = overrides.bus {
            self.bus = bus;
        }
        if overrides.signal_cli.is_some() {
            self.signal_cli = overrides.signal_cli;
        }
        self.dry_run |= overrides.dry_run;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.recipients.is_empty() {
            bail!("'recipients' must contain at least one entry");
        }
        if self.recipients.iter().any(|r| r.trim().is_empty()) {
            bail!("'recipients' must not contain blank entries");
        }
        if let Some(cli) = &self.signal_cli {
            if cli.trim().is_empty() {
                bail!("'signal_cli' must not be blank");
            }
        }
        Ok(())
    }

    /// 解析 signal-cli 路径：显式配置 > PATH > 命令名
    pub fn signal_cli_path(&self) -> String {
        if let Some(cli) = &self.signal_cli {
            return cli.clone();
        }
        which::which(DEFAULT_SIGNAL_CLI)
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| DEFAULT_SIGNAL_CLI.to_string())
    }
}

use crate::domain::model::{Strictness, ValueKind};
use crate::utils::error::{DocStoreError, Result};
use crate::utils::validation::{validate_non_empty, validate_unique, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

/// 時間型別轉換器的註冊設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// 全域模式，未覆寫的型別都套用此模式
    #[serde(default)]
    pub mode: Strictness,
    /// 要註冊的型別，未指定時註冊全部
    pub types: Option<Vec<ValueKind>>,
    /// 個別型別的模式覆寫，key 為型別名稱 (例如 "duration")
    pub overrides: Option<HashMap<String, Strictness>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    converters: ConverterConfig,
}

impl ConverterConfig {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn relaxed() -> Self {
        Self {
            mode: Strictness::Relaxed,
            ..Self::default()
        }
    }

    /// 依布林值選擇模式
    pub fn with_relaxed(relaxed: bool) -> Self {
        if relaxed {
            Self::relaxed()
        } else {
            Self::strict()
        }
    }

    pub fn with_types(mut self, kinds: impl IntoIterator<Item = ValueKind>) -> Self {
        self.types = Some(kinds.into_iter().collect());
        self
    }

    pub fn with_override(mut self, kind: ValueKind, mode: Strictness) -> Self {
        self.overrides
            .get_or_insert_with(HashMap::new)
            .insert(kind.as_str().to_string(), mode);
        self
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DocStoreError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析 `[converters]` 區段
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let file: ConfigFile =
            toml::from_str(&processed_content).map_err(|e| DocStoreError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        tracing::info!(
            "Loaded converter config: mode={}, types={:?}",
            file.converters.mode,
            file.converters.types
        );
        Ok(file.converters)
    }

    /// 替換環境變數 (例如 ${CONVERTER_MODE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 要註冊的型別，依宣告順序
    pub fn registered_kinds(&self) -> Vec<ValueKind> {
        match &self.types {
            Some(kinds) => kinds.clone(),
            None => ValueKind::ALL.to_vec(),
        }
    }

    /// 該型別實際使用的模式
    pub fn mode_for(&self, kind: ValueKind) -> Strictness {
        self.overrides
            .as_ref()
            .and_then(|overrides| overrides.get(kind.as_str()))
            .copied()
            .unwrap_or(self.mode)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(kinds) = &self.types {
            validate_non_empty("converters.types", kinds)?;
            validate_unique("converters.types", kinds)?;
        }

        let registered = self.registered_kinds();
        for name in self.overrides.iter().flat_map(|overrides| overrides.keys()) {
            let kind: ValueKind = name.parse().map_err(|reason| DocStoreError::InvalidConfigValueError {
                field: "converters.overrides".to_string(),
                value: name.clone(),
                reason,
            })?;

            if !registered.contains(&kind) {
                return Err(DocStoreError::InvalidConfigValueError {
                    field: "converters.overrides".to_string(),
                    value: name.clone(),
                    reason: "Override given for a type that is not registered".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Validate for ConverterConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

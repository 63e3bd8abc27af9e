use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::core::cost::{AlternativeMaterial, CostInputs, MaterialCosts, OwnershipBand};

/// Clamps a monetary or length value to the valid range. Negative and
/// non-finite values silently become 0 at this boundary.
pub fn coerce_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MaterialCostConfig {
    pub material: f64,
    pub maintenance: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CostsConfig {
    pub wood: MaterialCostConfig,
    pub vinyl: MaterialCostConfig,
}

impl Default for CostsConfig {
    fn default() -> Self {
        CostsConfig {
            wood: MaterialCostConfig {
                material: 10.0,
                maintenance: 1.0,
            },
            vinyl: MaterialCostConfig {
                material: 20.0,
                maintenance: 0.0,
            },
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InputsConfig {
    pub length_feet: f64,
    pub ownership_years: u32,
    pub material: String,
}

impl Default for InputsConfig {
    fn default() -> Self {
        InputsConfig {
            length_feet: 100.0,
            ownership_years: 50,
            material: "wood".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OpenAiProviderConfig {
    pub base_url: String,
    pub model: String,
    pub api_key_env: Option<String>,
}

impl OpenAiProviderConfig {
    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or("OPENAI_API_KEY")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub openai: Option<OpenAiProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            openai: Some(OpenAiProviderConfig {
                base_url: "https://api.openai.com".to_string(),
                model: "gpt-4".to_string(),
                api_key_env: None,
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub inputs: InputsConfig,
    #[serde(default)]
    pub costs: CostsConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "fencost")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Builds model inputs from this config. Cost and length values are
    /// coerced to non-negative here; ownership years and material must be
    /// valid, anything else is a config error.
    pub fn cost_inputs(&self) -> Result<CostInputs> {
        let ownership = OwnershipBand::from_years(self.inputs.ownership_years)
            .context("Invalid inputs.ownership_years in config")?;
        let material: AlternativeMaterial = self
            .inputs
            .material
            .parse()
            .context("Invalid inputs.material in config")?;

        Ok(CostInputs {
            length_feet: coerce_amount(self.inputs.length_feet),
            ownership,
            material,
            wood: MaterialCosts {
                material: coerce_amount(self.costs.wood.material),
                maintenance: coerce_amount(self.costs.wood.maintenance),
            },
            vinyl: MaterialCosts {
                material: coerce_amount(self.costs.vinyl.material),
                maintenance: coerce_amount(self.costs.vinyl.maintenance),
            },
        })
    }
}

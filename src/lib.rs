pub mod cli;
pub mod core;
pub mod providers;

use crate::core::cache::Cache;
use crate::core::config::{AppConfig, coerce_amount};
use crate::core::cost::{AlternativeMaterial, OwnershipBand};
use crate::core::suggest::SuggestionProvider;
use crate::providers::openai::OpenAiSuggestionProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Command-line overrides for one comparison, mirroring the editable
/// fields of the original form. Cost overrides apply to the selected
/// alternative material.
#[derive(Debug, Default, Clone)]
pub struct CompareOptions {
    pub length_feet: Option<f64>,
    pub ownership: Option<OwnershipBand>,
    pub material: Option<AlternativeMaterial>,
    pub material_cost: Option<f64>,
    pub maintenance_cost: Option<f64>,
    pub no_suggestions: bool,
}

pub enum AppCommand {
    Compare(CompareOptions),
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Fence cost calculator starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Compare(options) => {
            let mut inputs = config.cost_inputs()?;

            if let Some(length_feet) = options.length_feet {
                inputs.length_feet = coerce_amount(length_feet);
            }
            if let Some(ownership) = options.ownership {
                inputs.ownership = ownership;
            }
            if let Some(material) = options.material {
                inputs.material = material;
            }

            let selected = match inputs.material {
                AlternativeMaterial::Wood => &mut inputs.wood,
                AlternativeMaterial::Vinyl => &mut inputs.vinyl,
            };
            if let Some(material_cost) = options.material_cost {
                selected.material = coerce_amount(material_cost);
            }
            if let Some(maintenance_cost) = options.maintenance_cost {
                selected.maintenance = coerce_amount(maintenance_cost);
            }

            let provider = if options.no_suggestions {
                None
            } else {
                config.providers.openai.as_ref().map(|openai| {
                    let api_key = std::env::var(openai.api_key_env()).ok();
                    let cache = Arc::new(Cache::new());
                    OpenAiSuggestionProvider::new(&openai.base_url, &openai.model, api_key, cache)
                })
            };

            cli::compare::run(
                &inputs,
                provider
                    .as_ref()
                    .map(|p| p as &(dyn SuggestionProvider + Send + Sync)),
            )
            .await
        }
    }
}

//! Lifetime fence cost model and core types

use std::fmt::Display;
use std::str::FromStr;

/// Material cost per foot of the reference Buckley steel fence. It needs
/// no maintenance and no replacement over any supported ownership band.
pub const BUCKLEY_MATERIAL_COST: f64 = 30.0;

/// Wood fences are replaced every 15 years.
pub const WOOD_REPLACEMENT_INTERVAL_YEARS: u32 = 15;

/// Installation surcharge per foot added to each wood replacement.
pub const WOOD_INSTALL_SURCHARGE: f64 = 10.0;

/// Vinyl fences are replaced every 20 years.
pub const VINYL_REPLACEMENT_INTERVAL_YEARS: u32 = 20;

/// Installation surcharge per foot added to each vinyl replacement.
pub const VINYL_INSTALL_SURCHARGE: f64 = 7.5;

/// Vinyl maintenance is fixed at zero regardless of the configured rate.
/// Policy carried over from the original model; pending product confirmation.
pub const VINYL_MAINTENANCE_RATE: f64 = 0.0;

/// Supported ownership durations. The model works on the band's upper
/// representative year count, not arbitrary durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum OwnershipBand {
    UpToTenYears,
    TenToTwentyYears,
    TwentyToThirtyYears,
    ThirtyToFortyYears,
    FortyToFiftyYears,
    FiftyPlusYears,
}

impl OwnershipBand {
    pub fn years(&self) -> u32 {
        match self {
            OwnershipBand::UpToTenYears => 10,
            OwnershipBand::TenToTwentyYears => 15,
            OwnershipBand::TwentyToThirtyYears => 30,
            OwnershipBand::ThirtyToFortyYears => 40,
            OwnershipBand::FortyToFiftyYears => 45,
            OwnershipBand::FiftyPlusYears => 50,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OwnershipBand::UpToTenYears => "0-10 years",
            OwnershipBand::TenToTwentyYears => "10-20 years",
            OwnershipBand::TwentyToThirtyYears => "20-30 years",
            OwnershipBand::ThirtyToFortyYears => "30-40 years",
            OwnershipBand::FortyToFiftyYears => "40-50 years",
            OwnershipBand::FiftyPlusYears => "50 years or more",
        }
    }

    pub fn from_years(years: u32) -> anyhow::Result<Self> {
        match years {
            10 => Ok(OwnershipBand::UpToTenYears),
            15 => Ok(OwnershipBand::TenToTwentyYears),
            30 => Ok(OwnershipBand::TwentyToThirtyYears),
            40 => Ok(OwnershipBand::ThirtyToFortyYears),
            45 => Ok(OwnershipBand::FortyToFiftyYears),
            50 => Ok(OwnershipBand::FiftyPlusYears),
            _ => Err(anyhow::anyhow!(
                "Invalid ownership years: {} (expected one of 10, 15, 30, 40, 45, 50)",
                years
            )),
        }
    }
}

impl Display for OwnershipBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for OwnershipBand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let years: u32 = s
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid ownership years: {}", s))?;
        Self::from_years(years)
    }
}

/// The alternative fence material being compared against Buckley.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlternativeMaterial {
    Wood,
    Vinyl,
}

impl Display for AlternativeMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AlternativeMaterial::Wood => "Wood",
                AlternativeMaterial::Vinyl => "Vinyl",
            }
        )
    }
}

impl FromStr for AlternativeMaterial {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wood" => Ok(AlternativeMaterial::Wood),
            "vinyl" => Ok(AlternativeMaterial::Vinyl),
            _ => Err(anyhow::anyhow!(
                "Invalid fence material: {} (expected wood or vinyl)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceVariant {
    Buckley,
    Wood,
    Vinyl,
}

impl From<AlternativeMaterial> for FenceVariant {
    fn from(material: AlternativeMaterial) -> Self {
        match material {
            AlternativeMaterial::Wood => FenceVariant::Wood,
            AlternativeMaterial::Vinyl => FenceVariant::Vinyl,
        }
    }
}

/// Per-foot cost assumptions for one material.
#[derive(Debug, Clone, Copy)]
pub struct MaterialCosts {
    /// Material cost in $/ft.
    pub material: f64,
    /// Maintenance cost in $/ft per year.
    pub maintenance: f64,
}

/// Everything the model needs for one comparison. All monetary and length
/// fields are expected to be non-negative; coercion happens at the input
/// boundary (config load, CLI parse), never here.
#[derive(Debug, Clone, Copy)]
pub struct CostInputs {
    pub length_feet: f64,
    pub ownership: OwnershipBand,
    pub material: AlternativeMaterial,
    pub wood: MaterialCosts,
    pub vinyl: MaterialCosts,
}

impl CostInputs {
    pub fn alternative_costs(&self) -> MaterialCosts {
        match self.material {
            AlternativeMaterial::Wood => self.wood,
            AlternativeMaterial::Vinyl => self.vinyl,
        }
    }
}

/// Per-foot cost breakdown for one fence variant. Derived and recomputed
/// on demand; never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    pub material: f64,
    pub maintenance: f64,
    pub replacement: f64,
    pub total: f64,
}

/// Savings of Buckley over the alternative. Negative values mean the
/// alternative is cheaper and are valid, displayable results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsResult {
    pub per_foot: f64,
    pub total: f64,
}

/// Computes the lifetime cost-per-foot breakdown for one fence variant.
///
/// Replacement cost covers full rebuilds over the ownership duration:
/// one per elapsed replacement interval, each billed at material cost plus
/// the per-material installation surcharge. Durations below the first
/// interval yield zero replacement cost by design.
pub fn compute_breakdown(variant: FenceVariant, inputs: &CostInputs) -> CostBreakdown {
    let years = inputs.ownership.years();
    match variant {
        FenceVariant::Buckley => CostBreakdown {
            material: BUCKLEY_MATERIAL_COST,
            maintenance: 0.0,
            replacement: 0.0,
            total: BUCKLEY_MATERIAL_COST,
        },
        FenceVariant::Wood => {
            let maintenance = f64::from(years) * inputs.wood.maintenance;
            let replacements = years / WOOD_REPLACEMENT_INTERVAL_YEARS;
            let replacement =
                f64::from(replacements) * (inputs.wood.material + WOOD_INSTALL_SURCHARGE);
            CostBreakdown {
                material: inputs.wood.material,
                maintenance,
                replacement,
                total: inputs.wood.material + maintenance + replacement,
            }
        }
        FenceVariant::Vinyl => {
            let replacements = years / VINYL_REPLACEMENT_INTERVAL_YEARS;
            let replacement =
                f64::from(replacements) * (inputs.vinyl.material + VINYL_INSTALL_SURCHARGE);
            CostBreakdown {
                material: inputs.vinyl.material,
                maintenance: VINYL_MAINTENANCE_RATE,
                replacement,
                total: inputs.vinyl.material + replacement,
            }
        }
    }
}

/// Computes the savings of the reference fence over the chosen alternative.
pub fn compute_savings(inputs: &CostInputs) -> SavingsResult {
    let reference = compute_breakdown(FenceVariant::Buckley, inputs);
    let alternative = compute_breakdown(inputs.material.into(), inputs);

    let per_foot = alternative.total - reference.total;
    SavingsResult {
        per_foot,
        total: per_foot * inputs.length_feet,
    }
}

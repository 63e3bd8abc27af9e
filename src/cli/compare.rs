use super::ui;
use crate::core::cost::{
    self, CostBreakdown, CostInputs, FenceVariant, SavingsResult, compute_breakdown,
    compute_savings,
};
use crate::core::suggest::{SuggestionGuard, SuggestionProvider};
use anyhow::Result;
use comfy_table::Cell;

fn display_comparison(
    inputs: &CostInputs,
    reference: &CostBreakdown,
    alternative: &CostBreakdown,
) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Cost ($/ft)"),
        ui::header_cell("Buckley Fence"),
        ui::header_cell(&format!("{} Fence", inputs.material)),
    ]);

    let rows: [(&str, f64, f64); 3] = [
        ("Material", reference.material, alternative.material),
        ("Maintenance", reference.maintenance, alternative.maintenance),
        ("Replacement", reference.replacement, alternative.replacement),
    ];
    for (label, reference_value, alternative_value) in rows {
        table.add_row(vec![
            Cell::new(label),
            ui::money_cell(reference_value),
            ui::money_cell(alternative_value),
        ]);
    }

    table.add_row(vec![
        Cell::new("Total").add_attribute(comfy_table::Attribute::Bold),
        ui::total_cell(reference.total),
        ui::total_cell(alternative.total),
    ]);
    table.add_row(vec![
        Cell::new("Total Project Cost").add_attribute(comfy_table::Attribute::Bold),
        ui::total_cell(reference.total * inputs.length_feet),
        ui::total_cell(alternative.total * inputs.length_feet),
    ]);

    let mut output = format!(
        "{}\n{}\n\n",
        ui::style_text("Fence Cost Calculator", ui::StyleType::Title),
        ui::style_text("(Cost per foot)", ui::StyleType::Subtle)
    );
    output.push_str(&table.to_string());
    output
}

fn display_savings(inputs: &CostInputs, savings: &SavingsResult) -> String {
    let amount_style = if savings.total >= 0.0 {
        ui::StyleType::Savings
    } else {
        ui::StyleType::Loss
    };

    let mut output = format!(
        "{}\n",
        ui::style_text("Your Savings with Buckley Fence", ui::StyleType::TotalLabel)
    );
    output.push_str(&format!(
        "Total Savings: {} over {}\n",
        ui::style_text(&format!("${:.2}", savings.total), amount_style),
        inputs.ownership
    ));
    output.push_str(&format!("${:.2} saved per foot\n", savings.per_foot));
    output.push_str(&ui::style_text(
        "Based on current material, maintenance, and replacement cost estimates",
        ui::StyleType::Subtle,
    ));
    output
}

fn display_assumptions() -> String {
    ui::style_text(
        &format!(
            "Note: Calculations assume:\n\
             - Wood fences need replacement every {} years (including ${}/ft installation)\n\
             - Vinyl fences need replacement every {} years (including ${}/ft installation)",
            cost::WOOD_REPLACEMENT_INTERVAL_YEARS,
            cost::WOOD_INSTALL_SURCHARGE,
            cost::VINYL_REPLACEMENT_INTERVAL_YEARS,
            cost::VINYL_INSTALL_SURCHARGE
        ),
        ui::StyleType::Subtle,
    )
}

/// Renders the cost comparison and savings for the given inputs, then asks
/// the suggestion provider what the savings could buy instead. Suggestions
/// are only fetched for positive savings; a `None` provider skips them.
pub async fn run(
    inputs: &CostInputs,
    suggestions: Option<&(dyn SuggestionProvider + Send + Sync)>,
) -> Result<()> {
    let reference = compute_breakdown(FenceVariant::Buckley, inputs);
    let alternative = compute_breakdown(inputs.material.into(), inputs);
    let savings = compute_savings(inputs);

    println!("{}", display_comparison(inputs, &reference, &alternative));
    println!("{}", display_savings(inputs, &savings));

    if let Some(provider) = suggestions
        && savings.total > 0.0
    {
        let amount = format!("{:.2}", savings.total);

        let pb = ui::new_spinner("Loading suggestions...");
        let guard = SuggestionGuard::new();
        let lines = guard.fetch(provider, &amount).await;
        pb.finish_and_clear();

        if let Some(lines) = lines {
            ui::print_separator();
            println!(
                "{}",
                ui::style_text("Or you could buy...", ui::StyleType::TotalLabel)
            );
            for line in lines {
                println!("{line}");
            }
        }
    }

    println!("\n{}", display_assumptions());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cost::{AlternativeMaterial, MaterialCosts, OwnershipBand};

    fn sample_inputs() -> CostInputs {
        CostInputs {
            length_feet: 100.0,
            ownership: OwnershipBand::FiftyPlusYears,
            material: AlternativeMaterial::Wood,
            wood: MaterialCosts {
                material: 10.0,
                maintenance: 1.0,
            },
            vinyl: MaterialCosts {
                material: 20.0,
                maintenance: 0.0,
            },
        }
    }

    #[test]
    fn test_display_comparison_contains_breakdown() {
        let inputs = sample_inputs();
        let reference = compute_breakdown(FenceVariant::Buckley, &inputs);
        let alternative = compute_breakdown(FenceVariant::Wood, &inputs);

        let output = display_comparison(&inputs, &reference, &alternative);
        assert!(output.contains("Buckley Fence"));
        assert!(output.contains("Wood Fence"));
        assert!(output.contains("30.00"));
        assert!(output.contains("120.00"));
        // Project totals over 100 ft
        assert!(output.contains("3000.00"));
        assert!(output.contains("12000.00"));
    }

    #[test]
    fn test_display_savings_formats_amounts() {
        let inputs = sample_inputs();
        let savings = compute_savings(&inputs);

        let output = display_savings(&inputs, &savings);
        assert!(output.contains("$9000.00"));
        assert!(output.contains("50 years or more"));
        assert!(output.contains("$90.00 saved per foot"));
    }

    #[test]
    fn test_display_savings_handles_negative_delta() {
        let mut inputs = sample_inputs();
        inputs.ownership = OwnershipBand::UpToTenYears;
        inputs.material = AlternativeMaterial::Vinyl;
        let savings = compute_savings(&inputs);

        let output = display_savings(&inputs, &savings);
        assert!(output.contains("$-1000.00"));
        assert!(output.contains("$-10.00 saved per foot"));
    }

    #[test]
    fn test_display_assumptions_names_intervals() {
        let output = display_assumptions();
        assert!(output.contains("every 15 years"));
        assert!(output.contains("every 20 years"));
        assert!(output.contains("$7.5/ft installation"));
    }

    #[tokio::test]
    async fn test_run_skips_fetch_for_negative_savings() {
        struct PanickingProvider;

        #[async_trait::async_trait]
        impl SuggestionProvider for PanickingProvider {
            async fn fetch_suggestions(&self, _amount: &str) -> Result<Vec<String>> {
                panic!("fetch must not be triggered for non-positive savings");
            }
        }

        let mut inputs = sample_inputs();
        inputs.ownership = OwnershipBand::UpToTenYears;
        inputs.material = AlternativeMaterial::Vinyl;
        assert!(compute_savings(&inputs).total < 0.0);

        run(&inputs, Some(&PanickingProvider)).await.unwrap();
    }
}

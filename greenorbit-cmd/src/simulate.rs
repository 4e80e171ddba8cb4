//! Impact simulation commands: single prediction and slider sweeps.

use greenorbit_model::simulation::{sweep, ImpactTerms, Parameter};
use greenorbit_model::{ImpactResult, SimulationInputs, SimulationSession};
use log::{info, warn};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct SimulationReport {
    inputs: SimulationInputs,
    terms: ImpactTerms,
    impact: ImpactResult,
}

/// Apply slider overrides to a fresh session and print the predicted impact.
pub fn run_simulate<W: Write>(
    overrides: &[(Parameter, Option<i32>)],
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut session = SimulationSession::new();
    for (parameter, value) in overrides {
        let Some(value) = *value else { continue };
        let stored = session.set(*parameter, value);
        if stored != value {
            warn!(
                "{} = {} is not a slider position, using {}",
                parameter, value, stored
            );
        }
    }
    session.toggle();

    let inputs = session.inputs();
    let impact = session.impact();
    info!("Simulated impact for {:?}", inputs);

    if json {
        let report = SimulationReport {
            inputs,
            terms: ImpactTerms::from_inputs(&inputs),
            impact,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Simulation Parameters")?;
    for parameter in Parameter::ALL {
        let spec = parameter.spec();
        writeln!(
            out,
            "  {:<20} {:>5} {:<10} {}",
            spec.label,
            inputs.get(parameter),
            spec.unit,
            spec.impact_note
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Predicted Impact")?;
    for line in impact.lines() {
        writeln!(
            out,
            "  {:<24} {:>8}  [{}]",
            line.label,
            line.value_text,
            bar(line.progress)
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Overall Environmental Score: {}", impact.overall_text())?;
    Ok(())
}

/// Write the impact at every position of `parameter` as CSV, others at defaults.
pub fn run_sweep<W: Write>(parameter: Parameter, out: W) -> anyhow::Result<()> {
    let base = SimulationInputs::default();
    let rows = sweep(&base, parameter);

    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        parameter.spec().id,
        "pollution_improvement_percent",
        "temperature_reduction_degrees_c",
        "greenery_increase_percent",
        "overall_score_percent",
    ])?;
    for (value, impact) in &rows {
        wtr.write_record([
            value.to_string(),
            format!("{:.2}", impact.pollution_improvement_percent),
            format!("{:.2}", impact.temperature_reduction_degrees_c),
            format!("{:.2}", impact.greenery_increase_percent),
            format!("{:.2}", impact.overall_score_percent),
        ])?;
    }
    wtr.flush()?;
    info!("Swept {} over {} positions", parameter, rows.len());
    Ok(())
}

/// Twenty-cell text progress bar for a 0..=100 fill.
fn bar(progress: f64) -> String {
    let filled = (progress.clamp(0.0, 100.0) / 5.0).round() as usize;
    format!("{}{}", "#".repeat(filled), "-".repeat(20 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(overrides: &[(Parameter, Option<i32>)], json: bool) -> String {
        let mut buf = Vec::new();
        run_simulate(overrides, json, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn defaults_render_default_scenario() {
        let text = render(&[], false);
        assert!(text.contains("Trees to Plant"));
        assert!(text.contains("+31.0%"));
        assert!(text.contains("-6.8°C"));
        assert!(text.contains("+35.0%"));
        assert!(text.contains("Overall Environmental Score: +11.5%"));
    }

    #[test]
    fn overrides_are_clamped_before_the_model() {
        let value: serde_json::Value = serde_json::from_str(&render(
            &[(Parameter::Trees, Some(5000)), (Parameter::Ev, Some(-10))],
            true,
        ))
        .unwrap();
        assert_eq!(value["inputs"]["tree_count"], 2000);
        assert_eq!(value["inputs"]["ev_adoption_percent"], 0);
        assert_eq!(value["inputs"]["solar_panel_count"], 200);
        assert_eq!(value["terms"]["tree"], 40.0);
    }

    #[test]
    fn saturated_json_hits_every_ceiling() {
        let overrides = [
            (Parameter::Trees, Some(2000)),
            (Parameter::Solar, Some(1000)),
            (Parameter::Ev, Some(100)),
            (Parameter::Buildings, Some(50)),
        ];
        let value: serde_json::Value =
            serde_json::from_str(&render(&overrides, true)).unwrap();
        let impact = &value["impact"];
        assert_eq!(impact["pollution_improvement_percent"], 50.0);
        assert_eq!(impact["temperature_reduction_degrees_c"], 20.0);
        assert_eq!(impact["greenery_increase_percent"], 80.0);
        assert_eq!(impact["overall_score_percent"], 40.0);
    }

    #[test]
    fn sweep_covers_every_slider_position() {
        let mut buf = Vec::new();
        run_sweep(Parameter::Ev, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        // header + 0, 5, ..., 100
        assert_eq!(lines.len(), 22);
        assert!(lines[0].starts_with("ev,"));
        assert_eq!(lines[1], "0,16.00,6.80,35.00,7.75");
        assert_eq!(lines[21], "100,50.00,6.80,35.00,20.25");
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(0.0), "-".repeat(20));
        assert_eq!(bar(50.0), format!("{}{}", "#".repeat(10), "-".repeat(10)));
        assert_eq!(bar(250.0), "#".repeat(20));
    }
}

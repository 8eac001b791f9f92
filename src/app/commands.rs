use crate::adapters::output::{
    render_reports_text, render_series_text, write_fields_csv, write_json, write_reports_csv,
    write_series_csv, OutputFormat,
};
use crate::app::resolve_permittivity;
use crate::config::cli::Command;
use crate::core::environment::{check_altitude_failure, pressure_kpa};
use crate::core::line::{characteristic_impedance, nominal_loss_db, skin_loss_factor};
use crate::core::mission::{altitude_profile, breakdown_series, run_mission_for, AltitudeProfile};
use crate::core::phase::{compute_phase_checked, routed_phase_checked, strain_phase_checked};
use crate::core::routing::routing_delta_length;
use crate::core::sweep::{phase_sweep_series, sweep_skin_loss_vs_frequency};
use crate::domain::model::{CableSpec, MissionReport, Series};
use crate::domain::ports::CableLookup;
use crate::utils::error::Result;
use serde_json::json;

/// What a subcommand produced, before formatting.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    Summary {
        text: String,
        fields: serde_json::Value,
    },
    Series(Series),
    Reports(Vec<MissionReport>),
    Cables(Vec<CableSpec>),
}

pub fn execute<C>(command: &Command, catalog: &C) -> Result<CommandOutput>
where
    C: CableLookup + ?Sized,
{
    match command {
        Command::Phase { freq_ghz, setup } => {
            let setup = setup.to_setup();
            let result = compute_phase_checked(catalog, *freq_ghz, &setup)?;
            let dphi = result.value();
            Ok(CommandOutput::Summary {
                text: format!("ΔPhase @ {:.2} GHz: {:.2}°", freq_ghz, dphi),
                fields: json!({
                    "cable": setup.cable_type,
                    "freq_ghz": freq_ghz,
                    "delta_phase_deg": dphi,
                    "guard_reason": result.guard_reason(),
                }),
            })
        }
        Command::Sweep { sweep, setup } => {
            let series = phase_sweep_series(catalog, &sweep.to_request(), &setup.to_setup())?;
            Ok(CommandOutput::Series(series))
        }
        Command::Strain(args) => {
            let epsilon_r =
                resolve_permittivity(catalog, args.cable.as_deref(), args.epsilon_r, "strain")?;
            let result = strain_phase_checked(
                args.freq_hz,
                args.length_m,
                epsilon_r,
                args.delta_t,
                args.g_load,
                &args.coefficients(),
            );
            let dphi = result.value();
            Ok(CommandOutput::Summary {
                text: format!("Δφ (strain model) @ {:.3e} Hz: {:.4}°", args.freq_hz, dphi),
                fields: json!({
                    "frequency_hz": args.freq_hz,
                    "epsilon_r": epsilon_r,
                    "delta_phase_deg": dphi,
                    "guard_reason": result.guard_reason(),
                }),
            })
        }
        Command::Routed(args) => {
            let epsilon_r =
                resolve_permittivity(catalog, args.cable.as_deref(), args.epsilon_r, "routed")?;
            let route = args.route.to_geometry();
            let result = routed_phase_checked(
                args.freq_hz,
                args.length_m,
                epsilon_r,
                args.delta_t,
                args.alpha_per_c,
                &route,
            );
            let dphi = result.value();
            Ok(CommandOutput::Summary {
                text: format!(
                    "Δφ (routing + temperature) @ {:.3e} Hz: {:.4}° (route ΔL = {:.3e} m)",
                    args.freq_hz,
                    dphi,
                    route.delta_length_m()
                ),
                fields: json!({
                    "frequency_hz": args.freq_hz,
                    "epsilon_r": epsilon_r,
                    "route_delta_length_m": route.delta_length_m(),
                    "delta_phase_deg": dphi,
                    "guard_reason": result.guard_reason(),
                }),
            })
        }
        Command::Routing(args) => {
            let route = args.to_geometry();
            let dl = routing_delta_length(
                route.g_load,
                route.spans,
                route.clamp_spacing_m,
                route.sag_at_1g_m,
            );
            Ok(CommandOutput::Summary {
                text: format!(
                    "Extra length @ {:.1} G over {} spans: {:.6e} m",
                    route.g_load, route.spans, dl
                ),
                fields: json!({
                    "g_load": route.g_load,
                    "spans": route.spans,
                    "delta_length_m": dl,
                }),
            })
        }
        Command::Mission(args) => {
            let inputs = args.to_inputs();
            let report = run_mission_for(catalog, &args.cable, &inputs)?;
            let verdict = check_altitude_failure(
                catalog.resolve(&args.cable)?,
                inputs.altitude_ft,
                inputs.operating_voltage_v,
            );
            Ok(CommandOutput::Summary {
                text: format!(
                    "{} @ {:.0} ft ({:.2} kPa): Vb = {:.2} V, leakage = {:.6} V/m -> {}\n{}",
                    report.cable,
                    report.altitude_ft,
                    pressure_kpa(report.altitude_ft),
                    report.breakdown_v,
                    report.noise_ingress,
                    report.status,
                    verdict.message()
                ),
                fields: json!({
                    "cable": report.cable,
                    "altitude_ft": report.altitude_ft,
                    "breakdown_v": report.breakdown_v,
                    "noise_ingress": report.noise_ingress,
                    "status": report.status.to_string(),
                }),
            })
        }
        Command::AltitudeProfile {
            mission,
            max_ft,
            step_ft,
        } => {
            let profile = AltitudeProfile {
                max_ft: *max_ft,
                step_ft: *step_ft,
            };
            let reports = altitude_profile(
                catalog,
                &mission.cable,
                &profile,
                mission.op_voltage,
                mission.field_vpm,
            )?;
            Ok(CommandOutput::Reports(reports))
        }
        Command::Line {
            cable,
            freq_ghz,
            length_m,
            sweep,
            range,
        } => {
            if *sweep {
                return Ok(CommandOutput::Series(sweep_skin_loss_vs_frequency(
                    catalog,
                    &range.to_request(),
                    cable,
                )?));
            }
            let spec = catalog.resolve(cable)?;
            let z0 = characteristic_impedance(spec);
            let skin = skin_loss_factor(spec, freq_ghz * 1e9);
            let loss = nominal_loss_db(spec, *length_m);
            Ok(CommandOutput::Summary {
                text: format!(
                    "{}: Z0 = {:.2} Ω, skin loss @ {:.2} GHz = {:.4e}, {:.2} m loss = {:.2} dB",
                    spec.name, z0, freq_ghz, skin, length_m, loss
                ),
                fields: json!({
                    "cable": spec.name,
                    "impedance_ohm": z0,
                    "skin_loss_factor": skin,
                    "nominal_loss_db": loss,
                }),
            })
        }
        Command::Cables => {
            let cables = catalog
                .names()
                .into_iter()
                .filter_map(|name| catalog.find(name).cloned())
                .collect();
            Ok(CommandOutput::Cables(cables))
        }
    }
}

fn render_cables_text(cables: &[CableSpec]) -> String {
    let mut out = format!(
        "{:<10} {:>6} {:>6} {:>8} {:>8} {:>6}\n",
        "Cable", "VF", "εr", "ppm/°C", "gap mm", "SE dB"
    );
    for c in cables {
        out.push_str(&format!(
            "{:<10} {:>6.3} {:>6.2} {:>8.1} {:>8.3} {:>6.1}\n",
            c.name,
            c.velocity_factor,
            c.relative_permittivity,
            c.temp_coeff_ppm_per_c,
            c.gap_m() * 1000.0,
            c.shielding_effectiveness_db
        ));
    }
    out
}

/// Formats `output` for stdout or a file.
pub fn render(output: &CommandOutput, command: &str, format: OutputFormat) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match (format, output) {
        (OutputFormat::Text, CommandOutput::Summary { text, .. }) => {
            buf.extend_from_slice(text.as_bytes());
            buf.push(b'\n');
        }
        (OutputFormat::Text, CommandOutput::Series(series)) => {
            buf.extend_from_slice(render_series_text(series).as_bytes())
        }
        (OutputFormat::Text, CommandOutput::Reports(reports)) => {
            buf.extend_from_slice(render_reports_text(reports).as_bytes())
        }
        (OutputFormat::Text, CommandOutput::Cables(cables)) => {
            buf.extend_from_slice(render_cables_text(cables).as_bytes())
        }
        (OutputFormat::Csv, CommandOutput::Summary { fields, .. }) => {
            write_fields_csv(fields, &mut buf)?
        }
        (OutputFormat::Csv, CommandOutput::Series(series)) => write_series_csv(series, &mut buf)?,
        (OutputFormat::Csv, CommandOutput::Reports(reports)) => {
            write_reports_csv(reports, &mut buf)?
        }
        (OutputFormat::Csv, CommandOutput::Cables(cables)) => {
            let mut wtr = csv::Writer::from_writer(&mut buf);
            for cable in cables {
                wtr.serialize(cable)?;
            }
            wtr.flush()?;
        }
        (OutputFormat::Json, CommandOutput::Summary { fields, .. }) => {
            write_json(command, fields, &mut buf)?
        }
        (OutputFormat::Json, CommandOutput::Series(series)) => {
            write_json(command, series, &mut buf)?
        }
        (OutputFormat::Json, CommandOutput::Reports(reports)) => {
            let payload = json!({
                "reports": reports,
                "series": breakdown_series(reports),
            });
            write_json(command, &payload, &mut buf)?
        }
        (OutputFormat::Json, CommandOutput::Cables(cables)) => {
            write_json(command, cables, &mut buf)?
        }
    }
    Ok(buf)
}

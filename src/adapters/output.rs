use crate::domain::model::{MissionReport, Series};
use crate::utils::error::{Result, SimError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// JSON envelope stamped with the tool version and generation time.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport<T: Serialize> {
    pub tool: &'static str,
    pub version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub command: String,
    pub result: T,
}

impl<T: Serialize> RunReport<T> {
    pub fn new(command: impl Into<String>, result: T) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            generated_at: Utc::now(),
            command: command.into(),
            result,
        }
    }
}

/// Two columns headed by the axis labels.
pub fn write_series_csv<W: Write>(series: &Series, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([series.x_label.as_str(), series.y_label.as_str()])?;
    for (x, y) in series.points() {
        wtr.write_record([x.to_string(), y.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_reports_csv<W: Write>(reports: &[MissionReport], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for report in reports {
        wtr.serialize(report)?;
    }
    wtr.flush()?;
    Ok(())
}

/// `field,value` rows for a flat JSON object.
pub fn write_fields_csv<W: Write>(fields: &serde_json::Value, writer: W) -> Result<()> {
    let object = fields.as_object().ok_or_else(|| SimError::ValidationError {
        message: "CSV output needs a flat object of fields".to_string(),
    })?;

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["field", "value"])?;
    for (key, value) in object {
        let rendered = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        wtr.write_record([key.as_str(), rendered.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write, T: Serialize>(command: &str, result: &T, mut writer: W) -> Result<()> {
    let report = RunReport::new(command, result);
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writeln!(writer)?;
    Ok(())
}

pub fn render_series_text(series: &Series) -> String {
    let mut out = format!("{}\n{:>16}  {:>16}\n", series.title, series.x_label, series.y_label);
    for (x, y) in series.points() {
        out.push_str(&format!("{:>16.4}  {:>16.6}\n", x, y));
    }
    out
}

pub fn render_reports_text(reports: &[MissionReport]) -> String {
    let mut out = format!(
        "{:>10}  {:>14}  {:>14}  {}\n",
        "Altitude", "Breakdown_V", "Noise_Ingress", "Status"
    );
    for r in reports {
        out.push_str(&format!(
            "{:>10.0}  {:>14.2}  {:>14.6}  {}\n",
            r.altitude_ft, r.breakdown_v, r.noise_ingress, r.status
        ));
    }
    out
}

//! CLI helper functions

use crate::{
    analysis::{CrossReferenceAnalyzer, CrossReferenceReport},
    config::CleaningConfig,
    error::{CleanError, FieldKind},
    etl::Pipeline,
    olympics::{
        BiographyCleaner, BiographyRecord, RawBiography, RawResult, ResultCleaner, ResultRecord,
    },
    storage::{CsvReader, CsvWriter, JsonReportWriter},
    transform::{
        HistoricalDate, LifeEvent, LifeEventParser, MeasurementParser, RoleFilter, parse_name,
    },
};
use eyre::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Counts from a completed cleaning run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanSummary {
    pub bios_total: usize,
    pub bios_retained: usize,
    pub bios_removed: usize,
    /// Percentage of biographies retained, to one decimal place
    pub retention_rate: f64,
    pub results_total: usize,
    /// Unparseable fields among the retained biographies
    pub field_issues: BTreeMap<FieldKind, usize>,
    #[serde(skip)]
    pub bios_path: PathBuf,
    #[serde(skip)]
    pub results_path: PathBuf,
    #[serde(skip)]
    pub report_path: PathBuf,
}

#[derive(Serialize)]
struct RunReport<'a> {
    summary: &'a CleanSummary,
    cross_reference: &'a CrossReferenceReport,
}

fn retention_rate(retained: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (retained as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Run the whole cleaning pipeline
///
/// Pipeline (bios): CsvReader → BiographyCleaner → RoleFilter → CsvWriter
/// Pipeline (results): CsvReader → ResultCleaner → CsvWriter
/// Then: CrossReferenceAnalyzer → JsonReportWriter
///
/// Both pipelines are staged before either writer runs, so a fatal source
/// error leaves the output directory untouched.
pub fn clean(
    bios_path: impl AsRef<Path>,
    results_path: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
    config: &CleaningConfig,
) -> Result<CleanSummary> {
    let out_dir = out_dir.as_ref();
    let bios_out = out_dir.join(&config.output.bios);
    let results_out = out_dir.join(&config.output.results);
    let report_out = out_dir.join(&config.output.report);

    let bios_pipeline = Pipeline::new(
        CsvReader::<RawBiography>::new(bios_path.as_ref()),
        BiographyCleaner::new(config),
        CsvWriter::<BiographyRecord>::new(&bios_out),
    )
    .with_filter(RoleFilter::new(&config.roles));
    let results_pipeline = Pipeline::new(
        CsvReader::<RawResult>::new(results_path.as_ref()),
        ResultCleaner,
        CsvWriter::<ResultRecord>::new(&results_out),
    );

    log::info!("Cleaning biographies from {}", bios_path.as_ref().display());
    let bios = bios_pipeline.stage().wrap_err("Failed to clean biographies")?;
    log::info!("Cleaning results from {}", results_path.as_ref().display());
    let results = results_pipeline.stage().wrap_err("Failed to clean results")?;

    std::fs::create_dir_all(out_dir).map_err(|source| CleanError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let bios = bios_pipeline
        .finish(bios)
        .wrap_err("Failed to write biographies")?;
    let results = results_pipeline
        .finish(results)
        .wrap_err("Failed to write results")?;

    let mut field_issues = BTreeMap::new();
    for issue in bios.loaded.iter().flat_map(|b| &b.issues) {
        *field_issues.entry(issue.field).or_insert(0) += 1;
    }
    for (field, count) in &field_issues {
        log::info!("{} unparseable {} value(s) set to missing", count, field);
    }

    let cross_reference = CrossReferenceAnalyzer.analyze(&bios.loaded, &results.loaded);

    let summary = CleanSummary {
        bios_total: bios.extracted,
        bios_retained: bios.loaded.len(),
        bios_removed: bios.extracted - bios.loaded.len(),
        retention_rate: retention_rate(bios.loaded.len(), bios.extracted),
        results_total: results.loaded.len(),
        field_issues,
        bios_path: bios_out,
        results_path: results_out,
        report_path: report_out,
    };

    JsonReportWriter::new(&summary.report_path).write(&RunReport {
        summary: &summary,
        cross_reference: &cross_reference,
    })?;

    Ok(summary)
}

/// Write the default configuration, refusing to replace an existing file
/// unless `force` is set
pub fn init_config(path: impl AsRef<Path>, force: bool) -> Result<()> {
    let path = path.as_ref();
    if path.exists() && !force {
        eyre::bail!(
            "{} already exists, use --force to overwrite",
            path.display()
        );
    }
    CleaningConfig::default()
        .write(path)
        .with_context(|| format!("Failed to initialize config at {}", path.display()))
}

/// Which raw field `parse_field` interprets
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ParseTarget {
    Name,
    Born,
    Died,
    Measurements,
    Roles,
}

fn date_json(date: &HistoricalDate) -> Value {
    json!({
        "value": date.canonical(),
        "precision": date.precision(),
    })
}

fn life_event_json(event: &LifeEvent) -> Value {
    json!({
        "date": date_json(&event.date),
        "place": event.place,
        "unparsed_date": event.unparsed_date,
        "unparsed_place": event.unparsed_place,
    })
}

/// Run one field parser over a raw value, for inspection
pub fn parse_field(target: ParseTarget, value: &str, config: &CleaningConfig) -> Result<Value> {
    let output = match target {
        ParseTarget::Name => match parse_name(value).value() {
            Some(parts) => serde_json::to_value(parts)?,
            None => json!({ "unparseable": value }),
        },
        ParseTarget::Born | ParseTarget::Died => {
            life_event_json(&LifeEventParser::new(&config.dates).parse(value))
        }
        ParseTarget::Measurements => {
            let reading = MeasurementParser::new(&config.measurements).parse(value);
            let unparsed: Vec<Value> = reading
                .unparsed
                .iter()
                .map(|(field, raw)| json!({ "field": field, "raw": raw }))
                .collect();
            json!({
                "height_cm": reading.measurements.height_cm,
                "weight_kg": reading.measurements.weight_kg,
                "unparsed": unparsed,
            })
        }
        ParseTarget::Roles => {
            let roles = RoleFilter::new(&config.roles);
            json!({
                "competitor": roles.is_competitor(value),
                "additional_roles": roles.additional_roles(value),
            })
        }
    };
    Ok(output)
}

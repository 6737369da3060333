//! Biography/result cross-reference
//!
//! Joins the two tables on `athlete_id` to find athletes who competed for a
//! country other than the one they were born in, and tallies a few
//! aggregates for the run report. Neither input table is modified.

use crate::olympics::{BiographyRecord, ResultRecord};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// An athlete whose birth country differs from a country they competed for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryMismatch {
    pub athlete_id: u64,
    pub birth_country: String,
    pub competing_country: String,
}

impl CountryMismatch {
    pub fn new(
        athlete_id: u64,
        birth_country: impl Into<String>,
        competing_country: impl Into<String>,
    ) -> Self {
        Self {
            athlete_id,
            birth_country: birth_country.into(),
            competing_country: competing_country.into(),
        }
    }
}

/// Side report produced by [`CrossReferenceAnalyzer`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrossReferenceReport {
    pub athletes: usize,
    pub results: usize,
    pub athletes_with_results: usize,
    /// Results whose athlete is not among the analyzed biographies
    pub unmatched_results: usize,
    pub athletes_by_sex: BTreeMap<String, usize>,
    pub female_with_title: usize,
    pub titled_female_medalists: usize,
    pub mismatches: Vec<CountryMismatch>,
}

impl CrossReferenceReport {
    pub fn contains_mismatch(
        &self,
        athlete_id: u64,
        birth_country: &str,
        competing_country: &str,
    ) -> bool {
        self.mismatches.iter().any(|m| {
            m.athlete_id == athlete_id
                && m.birth_country == birth_country
                && m.competing_country == competing_country
        })
    }
}

/// Joins biographies and results on athlete identifier
///
/// # Example
/// ```
/// use olympics_cleaner::analysis::CrossReferenceAnalyzer;
/// use olympics_cleaner::olympics::{BiographyRecord, ResultRecord};
///
/// let mut bio = BiographyRecord { athlete_id: 1, ..Default::default() };
/// bio.born.place.country = Some("USA".to_string());
/// let result = ResultRecord { athlete_id: 1, noc: Some("CAN".to_string()), ..Default::default() };
///
/// let report = CrossReferenceAnalyzer.analyze(&[bio], &[result]);
/// assert!(report.contains_mismatch(1, "USA", "CAN"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossReferenceAnalyzer;

impl CrossReferenceAnalyzer {
    pub fn analyze(
        &self,
        bios: &[BiographyRecord],
        results: &[ResultRecord],
    ) -> CrossReferenceReport {
        let index: HashMap<u64, usize> = bios
            .iter()
            .enumerate()
            .map(|(position, bio)| (bio.athlete_id, position))
            .collect();

        let mut by_athlete: Vec<Vec<&ResultRecord>> = vec![Vec::new(); bios.len()];
        let mut unmatched_results = 0;
        for result in results {
            match index.get(&result.athlete_id) {
                Some(&position) => by_athlete[position].push(result),
                None => unmatched_results += 1,
            }
        }
        if unmatched_results > 0 {
            log::warn!(
                "{} result(s) reference athletes missing from the biographies",
                unmatched_results
            );
        }

        let mut report = CrossReferenceReport {
            athletes: bios.len(),
            results: results.len(),
            unmatched_results,
            ..CrossReferenceReport::default()
        };

        for (bio, athlete_results) in bios.iter().zip(&by_athlete) {
            let sex = bio.sex().filter(|s| !s.is_empty()).unwrap_or("Unknown");
            *report.athletes_by_sex.entry(sex.to_string()).or_default() += 1;

            if !athlete_results.is_empty() {
                report.athletes_with_results += 1;
            }

            if bio.is_female() && bio.has_title {
                report.female_with_title += 1;
                if athlete_results.iter().any(|r| r.has_medal()) {
                    report.titled_female_medalists += 1;
                }
            }

            let Some(birth_country) = bio.birth_country() else {
                continue;
            };
            let mut seen: Vec<&str> = Vec::new();
            for result in athlete_results {
                let Some(competing) = result.noc.as_deref() else {
                    continue;
                };
                if competing != birth_country && !seen.contains(&competing) {
                    seen.push(competing);
                    report
                        .mismatches
                        .push(CountryMismatch::new(bio.athlete_id, birth_country, competing));
                }
            }
        }

        log::info!(
            "Cross-reference found {} birth/competing country mismatch(es)",
            report.mismatches.len()
        );
        report
    }
}

//! Enrolment records and columnar table interchange
//!
//! The ingestion collaborator hands over a cleaned table; this module only
//! converts between that table (Polars `DataFrame`, CSV or Parquet on disk) and
//! typed `EnrolmentRecord`s. No cleaning or schema repair happens here.
//!
//! Preconditions on input (not re-checked by the scoring core):
//!   - Year in [2010, 2026], Month in [1, 12]
//!   - Age_Group is Child or Adult, Enrolment_Count >= 0
//!   - No duplicate (Year, Month, State, District, Age_Group) keys

use anyhow::{anyhow, bail, Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

/// Column contract of a cleaned enrolment table
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Year",            // Calendar year
    "Month",           // 1-12
    "State",           // State name
    "District",        // District name within state
    "Age_Group",       // "Child" | "Adult"
    "Enrolment_Count", // Non-negative count
];

/// Age class of an enrolment count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeClass {
    Child,
    Adult,
}

impl AgeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeClass::Child => "Child",
            AgeClass::Adult => "Adult",
        }
    }
}

impl FromStr for AgeClass {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("child") {
            Ok(AgeClass::Child)
        } else if s.eq_ignore_ascii_case("adult") {
            Ok(AgeClass::Adult)
        } else {
            Err(anyhow!("Unknown age group '{}'", s))
        }
    }
}

/// A (year, month) pair; orders chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// One cleaned enrolment count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolmentRecord {
    pub period: Period,
    pub state: String,
    pub district: String,
    pub age_class: AgeClass,
    pub count: u64,
}

impl EnrolmentRecord {
    pub fn new(
        year: i32,
        month: u32,
        state: &str,
        district: &str,
        age_class: AgeClass,
        count: u64,
    ) -> Self {
        Self {
            period: Period::new(year, month),
            state: state.to_string(),
            district: district.to_string(),
            age_class,
            count,
        }
    }
}

/// Headline statistics of an input batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub states: usize,
    pub districts: usize,
    pub first_period: Option<Period>,
    pub last_period: Option<Period>,
    pub child_enrolments: u64,
    pub adult_enrolments: u64,
    pub total_enrolments: u64,
}

/// Summarize a batch of records
pub fn summarize(records: &[EnrolmentRecord]) -> DatasetSummary {
    let states: BTreeSet<&str> = records.iter().map(|r| r.state.as_str()).collect();
    let districts: BTreeSet<(&str, &str)> = records
        .iter()
        .map(|r| (r.state.as_str(), r.district.as_str()))
        .collect();

    let child_enrolments: u64 = records
        .iter()
        .filter(|r| r.age_class == AgeClass::Child)
        .fold(0u64, |sum, r| sum.saturating_add(r.count));
    let adult_enrolments: u64 = records
        .iter()
        .filter(|r| r.age_class == AgeClass::Adult)
        .fold(0u64, |sum, r| sum.saturating_add(r.count));

    DatasetSummary {
        total_records: records.len(),
        states: states.len(),
        districts: districts.len(),
        first_period: records.iter().map(|r| r.period).min(),
        last_period: records.iter().map(|r| r.period).max(),
        child_enrolments,
        adult_enrolments,
        total_enrolments: child_enrolments.saturating_add(adult_enrolments),
    }
}

/// Convert a cleaned enrolment table into records
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<EnrolmentRecord>> {
    // VALIDATE: Check all expected columns present
    let actual_cols: HashSet<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    for &expected in REQUIRED_COLUMNS {
        if !actual_cols.contains(expected) {
            bail!(
                "Missing expected column '{}'. Available columns: {:?}",
                expected,
                actual_cols
            );
        }
    }

    // Integer columns may arrive as i32/u32/i64 depending on the reader
    let years_col = df.column("Year")?.cast(&DataType::Int64)?;
    let months_col = df.column("Month")?.cast(&DataType::Int64)?;
    let counts_col = df.column("Enrolment_Count")?.cast(&DataType::Int64)?;

    let years = years_col.i64()?;
    let months = months_col.i64()?;
    let counts = counts_col.i64()?;
    let states = df.column("State")?.str()?;
    let districts = df.column("District")?.str()?;
    let age_groups = df.column("Age_Group")?.str()?;

    let mut records = Vec::with_capacity(df.height());

    for i in 0..df.height() {
        let year = years.get(i).ok_or_else(|| anyhow!("Row {}: missing Year", i))?;
        let month = months.get(i).ok_or_else(|| anyhow!("Row {}: missing Month", i))?;
        let count = counts
            .get(i)
            .ok_or_else(|| anyhow!("Row {}: missing Enrolment_Count", i))?;
        let state = states.get(i).ok_or_else(|| anyhow!("Row {}: missing State", i))?;
        let district = districts
            .get(i)
            .ok_or_else(|| anyhow!("Row {}: missing District", i))?;
        let age_group = age_groups
            .get(i)
            .ok_or_else(|| anyhow!("Row {}: missing Age_Group", i))?;

        let age_class: AgeClass = age_group
            .parse()
            .with_context(|| format!("Row {}: invalid Age_Group", i))?;

        records.push(EnrolmentRecord {
            period: Period::new(
                i32::try_from(year).with_context(|| format!("Row {}: Year out of range", i))?,
                u32::try_from(month).with_context(|| format!("Row {}: Month out of range", i))?,
            ),
            state: state.to_string(),
            district: district.to_string(),
            age_class,
            count: u64::try_from(count)
                .with_context(|| format!("Row {}: negative Enrolment_Count", i))?,
        });
    }

    Ok(records)
}

/// Convert records back into a table with the cleaned-table column contract
pub fn records_to_frame(records: &[EnrolmentRecord]) -> Result<DataFrame> {
    let years: Vec<i64> = records.iter().map(|r| r.period.year as i64).collect();
    let months: Vec<i64> = records.iter().map(|r| r.period.month as i64).collect();
    let states: Vec<&str> = records.iter().map(|r| r.state.as_str()).collect();
    let districts: Vec<&str> = records.iter().map(|r| r.district.as_str()).collect();
    let age_groups: Vec<&str> = records.iter().map(|r| r.age_class.as_str()).collect();
    let counts: Vec<i64> = records
        .iter()
        .map(|r| i64::try_from(r.count))
        .collect::<std::result::Result<_, _>>()
        .with_context(|| "Enrolment_Count exceeds i64 range")?;

    let df = df!(
        "Year" => years,
        "Month" => months,
        "State" => states,
        "District" => districts,
        "Age_Group" => age_groups,
        "Enrolment_Count" => counts
    )
    .with_context(|| "Failed to build enrolment DataFrame")?;

    Ok(df)
}

/// Load cleaned records from a CSV or Parquet file (by extension)
pub fn load_records(path: &Path) -> Result<Vec<EnrolmentRecord>> {
    let is_parquet = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("parquet"));

    let df = if is_parquet {
        LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to scan parquet: {:?}", path))?
            .collect()
            .with_context(|| format!("Failed to load parquet: {:?}", path))?
    } else {
        CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.into()))
            .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
            .finish()
            .with_context(|| format!("Failed to load CSV: {:?}", path))?
    };

    let records = records_from_frame(&df)
        .with_context(|| format!("Failed to convert enrolment table: {:?}", path))?;

    tracing::info!("Loaded {} enrolment records from {:?}", records.len(), path);
    Ok(records)
}

/// Write records as a cleaned CSV table
pub fn write_records_csv(records: &[EnrolmentRecord], path: &Path) -> Result<()> {
    let mut df = records_to_frame(records)?;
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {:?}", path))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("Failed to write CSV: {:?}", path))?;

    Ok(())
}

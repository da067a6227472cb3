//! USGS FDSN event CSV ingestion and cleaning.
//!
//! Input is the `format=csv` output of the FDSN event query service, or a
//! previously cleaned file written by [`write_earthquake_csv`]. Columns are
//! looked up by header name; the `place` column is quoted and may contain commas.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use foundation::math::GeoPoint;
use serde::Serialize;

pub const COL_TIME: &str = "time";
pub const COL_LATITUDE: &str = "latitude";
pub const COL_LONGITUDE: &str = "longitude";
pub const COL_DEPTH: &str = "depth";
pub const COL_MAG: &str = "mag";
pub const COL_MAG_TYPE: &str = "magType";
pub const COL_ID: &str = "id";
pub const COL_PLACE: &str = "place";

#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeRecord {
    pub time: Option<DateTime<Utc>>,
    pub latitude: f64,
    pub longitude: f64,
    pub depth_km: Option<f64>,
    pub magnitude: f64,
    pub mag_type: Option<String>,
    pub id: Option<String>,
    pub place: String,
}

impl EarthquakeRecord {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Row counts from one cleaning pass.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Rows missing a usable latitude, longitude or magnitude.
    pub rows_dropped: usize,
}

#[derive(Debug)]
pub enum CsvError {
    Io { path: PathBuf, source: std::io::Error },
    Csv(csv::Error),
    MissingColumn(&'static str),
}

impl std::fmt::Display for CsvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CsvError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            CsvError::Csv(e) => write!(f, "csv error: {e}"),
            CsvError::MissingColumn(name) => write!(f, "missing required column `{name}`"),
        }
    }
}

impl std::error::Error for CsvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CsvError::Io { source, .. } => Some(source),
            CsvError::Csv(e) => Some(e),
            CsvError::MissingColumn(_) => None,
        }
    }
}

impl From<csv::Error> for CsvError {
    fn from(e: csv::Error) -> Self {
        CsvError::Csv(e)
    }
}

struct Columns {
    latitude: usize,
    longitude: usize,
    mag: usize,
    time: Option<usize>,
    depth: Option<usize>,
    mag_type: Option<usize>,
    id: Option<usize>,
    place: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, CsvError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let required = |name: &'static str| find(name).ok_or(CsvError::MissingColumn(name));
        Ok(Self {
            latitude: required(COL_LATITUDE)?,
            longitude: required(COL_LONGITUDE)?,
            mag: required(COL_MAG)?,
            time: find(COL_TIME),
            depth: find(COL_DEPTH),
            mag_type: find(COL_MAG_TYPE),
            id: find(COL_ID),
            place: find(COL_PLACE),
        })
    }
}

/// Parses and cleans earthquake rows, dropping rows without usable coordinates or magnitude.
pub fn read_earthquake_csv<R: Read>(
    reader: R,
) -> Result<(Vec<EarthquakeRecord>, CleanReport), CsvError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let cols = Columns::from_headers(rdr.headers()?)?;

    let mut report = CleanReport::default();
    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        report.rows_read += 1;
        match parse_row(&row, &cols) {
            Some(rec) => records.push(rec),
            None => report.rows_dropped += 1,
        }
    }
    report.rows_kept = records.len();
    Ok((records, report))
}

pub fn read_earthquake_csv_path(
    path: impl AsRef<Path>,
) -> Result<(Vec<EarthquakeRecord>, CleanReport), CsvError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CsvError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_earthquake_csv(file)
}

#[derive(Serialize)]
struct CleanRow<'a> {
    time: String,
    latitude: f64,
    longitude: f64,
    depth: Option<f64>,
    mag: f64,
    #[serde(rename = "magType")]
    mag_type: Option<&'a str>,
    id: Option<&'a str>,
    place: &'a str,
}

/// Writes records with the cleaned column set (`time,latitude,longitude,depth,mag,magType,id,place`).
pub fn write_earthquake_csv<W: Write>(
    writer: W,
    records: &[EarthquakeRecord],
) -> Result<(), CsvError> {
    let mut wtr = csv::Writer::from_writer(writer);
    // Serde only emits the header alongside the first row.
    if records.is_empty() {
        wtr.write_record([
            COL_TIME,
            COL_LATITUDE,
            COL_LONGITUDE,
            COL_DEPTH,
            COL_MAG,
            COL_MAG_TYPE,
            COL_ID,
            COL_PLACE,
        ])?;
    }
    for rec in records {
        wtr.serialize(CleanRow {
            time: rec.time.map(|t| t.to_rfc3339()).unwrap_or_default(),
            latitude: rec.latitude,
            longitude: rec.longitude,
            depth: rec.depth_km,
            mag: rec.magnitude,
            mag_type: rec.mag_type.as_deref(),
            id: rec.id.as_deref(),
            place: &rec.place,
        })?;
    }
    wtr.flush().map_err(|e| CsvError::Csv(e.into()))?;
    Ok(())
}

/// Reads a raw export, cleans it, and writes the cleaned file (creating parent dirs).
pub fn clean_earthquake_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<CleanReport, CsvError> {
    let output = output.as_ref();
    let (records, report) = read_earthquake_csv_path(input)?;

    let io_err = |source| CsvError::Io {
        path: output.to_path_buf(),
        source,
    };
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = File::create(output).map_err(io_err)?;
    write_earthquake_csv(file, &records)?;
    Ok(report)
}

fn parse_row(row: &csv::StringRecord, cols: &Columns) -> Option<EarthquakeRecord> {
    let field = |idx: Option<usize>| {
        idx.and_then(|i| row.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };
    let number = |idx: Option<usize>| {
        field(idx)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    };

    let latitude = number(Some(cols.latitude))?;
    let longitude = number(Some(cols.longitude))?;
    let magnitude = number(Some(cols.mag))?;

    Some(EarthquakeRecord {
        time: field(cols.time).and_then(parse_time),
        latitude,
        longitude,
        depth_km: number(cols.depth),
        magnitude,
        mag_type: field(cols.mag_type).map(str::to_string),
        id: field(cols.id).map(str::to_string),
        place: field(cols.place).unwrap_or_default().to_string(),
    })
}

/// Accepts RFC 3339 (`2024-03-01T12:00:00.120Z`) and the space-separated
/// form produced by dataframe exports (`2024-03-01 12:00:00.120000+00:00`).
pub fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|t| t.and_utc())
}

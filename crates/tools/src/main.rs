use std::env;
use std::path::PathBuf;

use compute::analysis::{Histogram, Statistics};
use compute::{EarthquakeDataset, FeltAreaConfig, MagnitudeRange, compute_felt_area};
use foundation::DEFAULT_CIRCLE_POINTS;
use foundation::math::{EarthModel, GeoPoint};
use serde::Serialize;
use serde_json::{Map, json};

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "clean" => cmd_clean(args),
        "summary" => cmd_summary(args),
        "felt-area" => cmd_felt_area(args),
        _ => Err(usage()),
    }
}

fn cmd_clean(args: Vec<String>) -> Result<(), String> {
    // quakes clean <raw.csv> <cleaned.csv>
    if args.len() != 2 {
        return Err(usage());
    }
    let input = PathBuf::from(&args[0]);
    let output = PathBuf::from(&args[1]);

    let report = formats::clean_earthquake_file(&input, &output).map_err(|e| e.to_string())?;
    eprintln!(
        "wrote {} ({} rows read, {} kept, {} dropped)",
        output.display(),
        report.rows_read,
        report.rows_kept,
        report.rows_dropped
    );
    Ok(())
}

#[derive(Debug, PartialEq)]
struct SummaryArgs {
    input: PathBuf,
    min_mag: Option<f64>,
    max_mag: Option<f64>,
    bin_width: f64,
}

fn parse_summary_args(args: &[String]) -> Result<SummaryArgs, String> {
    let Some(input) = args.first() else {
        return Err(usage());
    };
    let mut parsed = SummaryArgs {
        input: PathBuf::from(input),
        min_mag: None,
        max_mag: None,
        bin_width: 0.1,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--min-mag" => parsed.min_mag = Some(flag_f64(args, &mut i)?),
            "--max-mag" => parsed.max_mag = Some(flag_f64(args, &mut i)?),
            "--bin-width" => parsed.bin_width = flag_f64(args, &mut i)?,
            s => return Err(format!("unknown arg: {s}\n\n{}", usage())),
        }
        i += 1;
    }
    Ok(parsed)
}

#[derive(Serialize)]
struct SummaryReport {
    range: MagnitudeRange,
    summary: compute::analysis::Summary,
    histogram: Histogram,
}

fn cmd_summary(args: Vec<String>) -> Result<(), String> {
    // quakes summary <cleaned.csv> [--min-mag X] [--max-mag Y] [--bin-width W]
    let args = parse_summary_args(&args)?;
    let (dataset, _) = EarthquakeDataset::load_csv(&args.input).map_err(|e| e.to_string())?;

    let full = dataset.full_range();
    let range = MagnitudeRange::new(
        args.min_mag.unwrap_or(full.min),
        args.max_mag.unwrap_or(full.max),
    );
    let magnitudes = dataset.filter_magnitude(range).magnitudes();
    let report = SummaryReport {
        range,
        summary: Statistics::summarize(&magnitudes),
        histogram: Histogram::build(&magnitudes, args.bin_width).map_err(|e| e.to_string())?,
    };

    let payload = serde_json::to_string_pretty(&report).map_err(|e| format!("json: {e}"))?;
    println!("{payload}");
    Ok(())
}

#[derive(Debug, PartialEq)]
struct FeltAreaArgs {
    lat: f64,
    lon: f64,
    mag: f64,
    calibration: f64,
    points: usize,
    model: EarthModel,
}

fn parse_felt_area_args(args: &[String]) -> Result<FeltAreaArgs, String> {
    let mut lat = None;
    let mut lon = None;
    let mut mag = None;
    let mut calibration = None;
    let mut points = DEFAULT_CIRCLE_POINTS;
    let mut model = EarthModel::Sphere;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--lat" => lat = Some(flag_f64(args, &mut i)?),
            "--lon" => lon = Some(flag_f64(args, &mut i)?),
            "--mag" => mag = Some(flag_f64(args, &mut i)?),
            "--calibration" => calibration = Some(flag_f64(args, &mut i)?),
            "--points" => {
                let v = flag_value(args, &mut i)?;
                points = v
                    .parse()
                    .map_err(|_| format!("--points expects an integer, got {v:?}"))?;
            }
            "--model" => {
                let v = flag_value(args, &mut i)?;
                model = EarthModel::parse(v)
                    .ok_or_else(|| format!("--model expects sphere or wgs84, got {v:?}"))?;
            }
            s => return Err(format!("unknown arg: {s}\n\n{}", usage())),
        }
        i += 1;
    }

    let require = |v: Option<f64>, flag: &str| v.ok_or_else(|| format!("{flag} is required"));
    Ok(FeltAreaArgs {
        lat: require(lat, "--lat")?,
        lon: require(lon, "--lon")?,
        mag: require(mag, "--mag")?,
        calibration: require(calibration, "--calibration")?,
        points,
        model,
    })
}

fn cmd_felt_area(args: Vec<String>) -> Result<(), String> {
    // quakes felt-area --lat X --lon Y --mag M --calibration C [--points N] [--model M]
    let args = parse_felt_area_args(&args)?;
    let config = FeltAreaConfig::new(args.calibration)
        .with_points(args.points)
        .with_model(args.model);
    let area = compute_felt_area(GeoPoint::new(args.lat, args.lon), args.mag, &config)
        .map_err(|e| e.to_string())?;

    let mut props = Map::new();
    props.insert("magnitude".to_string(), json!(area.magnitude));
    props.insert("radius_km".to_string(), json!(area.radius_km));
    props.insert("parts".to_string(), json!(area.parts.len()));
    let fc = formats::feature_collection(vec![formats::multipolygon_feature(&area.parts, props)]);

    let payload = serde_json::to_string_pretty(&fc).map_err(|e| format!("json: {e}"))?;
    println!("{payload}");
    Ok(())
}

fn flag_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn flag_f64(args: &[String], i: &mut usize) -> Result<f64, String> {
    let flag = args[*i].clone();
    let v = flag_value(args, i)?;
    v.parse()
        .map_err(|_| format!("{flag} expects a number, got {v:?}"))
}

fn usage() -> String {
    let exe = env::args().next().unwrap_or_else(|| "quakes".to_string());
    format!(
        "Usage:\n  {exe} clean <raw.csv> <cleaned.csv>\n  {exe} summary <cleaned.csv> [--min-mag X] [--max-mag Y] [--bin-width W]\n  {exe} felt-area --lat X --lon Y --mag M --calibration C [--points N] [--model sphere|wgs84]\n\nNotes:\n- `clean` drops rows missing latitude, longitude or mag.\n- `summary` prints KPIs and a magnitude histogram as JSON.\n- `felt-area` prints a GeoJSON FeatureCollection; rings crossing the antimeridian become separate polygons.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn summary_args_with_range() {
        let parsed = parse_summary_args(&args("q.csv --min-mag 5 --bin-width 0.5")).unwrap();
        assert_eq!(parsed.input, PathBuf::from("q.csv"));
        assert_eq!(parsed.min_mag, Some(5.0));
        assert_eq!(parsed.max_mag, None);
        assert_eq!(parsed.bin_width, 0.5);
    }

    #[test]
    fn summary_args_reject_unknown_flag() {
        assert!(parse_summary_args(&args("q.csv --verbose")).is_err());
        assert!(parse_summary_args(&[]).is_err());
    }

    #[test]
    fn felt_area_args_parse() {
        let parsed = parse_felt_area_args(&args(
            "--lat -17.87 --lon -178.45 --mag 4.7 --calibration 1 --model wgs84 --points 36",
        ))
        .unwrap();
        assert_eq!(parsed.lat, -17.87);
        assert_eq!(parsed.points, 36);
        assert_eq!(parsed.model, EarthModel::Wgs84);
    }

    #[test]
    fn felt_area_requires_calibration() {
        let err = parse_felt_area_args(&args("--lat 0 --lon 0 --mag 5")).unwrap_err();
        assert!(err.contains("--calibration"));
    }

    #[test]
    fn missing_flag_value_is_reported() {
        let err = parse_felt_area_args(&args("--lat")).unwrap_err();
        assert!(err.contains("--lat requires a value"));
    }
}

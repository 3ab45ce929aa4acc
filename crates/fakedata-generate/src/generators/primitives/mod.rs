use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Duration, Months, NaiveDateTime, NaiveTime, Utc};
use rand::{Rng, RngCore};

use crate::generators::{BoundFn, Generator, GeneratorRegistry, ParametricGenerator, pick};
use crate::params::{
    OptionsError, parse_date_bound, parse_int_bound, split_list, split_range, strip_quotes,
};

const DEFAULT_INT_MIN: i64 = 0;
const DEFAULT_INT_MAX: i64 = 1000;
const DEFAULT_ENUM: &[&str] = &["foo", "bar", "baz"];
const ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ID_LEN: usize = 10;

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register(Generator::parametric(
        "int",
        "integer. Accepts a range min,max (default: 0,1000)",
        Arc::new(IntRangeGenerator),
    ));
    registry.register(Generator::parametric(
        "date",
        "YYYY-MM-DD. Accepts a range min,max in YYYY-MM-DD form (default: the last year)",
        Arc::new(DateRangeGenerator::new(|| Utc::now().naive_utc())),
    ));
    registry.register(Generator::parametric(
        "enum",
        "a random value from a comma-separated list (default: foo,bar,baz)",
        Arc::new(EnumGenerator),
    ));
    registry.register(Generator::parametric(
        "file",
        "a random line from a file. Pass the path with file:path/to/file.txt",
        Arc::new(FileGenerator),
    ));
    registry.register(Generator::simple(
        "double",
        "double number",
        Arc::new(double),
    ));
    registry.register(Generator::simple(
        "latitude",
        "latitude with 6 decimals",
        Arc::new(latitude),
    ));
    registry.register(Generator::simple(
        "longitude",
        "longitude with 6 decimals",
        Arc::new(longitude),
    ));
    registry.register(Generator::simple(
        "id",
        "random 10 character alphanumeric id",
        Arc::new(id),
    ));
    registry.register(Generator::simple(
        "uuid",
        "random v4 UUID",
        Arc::new(uuid_v4),
    ));
    registry.register(Generator::simple(
        "unixtime",
        "current unix time in nanoseconds",
        Arc::new(unixtime),
    ));
}

struct IntRangeGenerator;

impl ParametricGenerator for IntRangeGenerator {
    fn bind(&self, options: &str) -> Result<BoundFn, OptionsError> {
        let range = split_range(options);
        let min = match range.min {
            Some(value) => parse_int_bound("min", value)?,
            None => DEFAULT_INT_MIN,
        };
        let max = match range.max {
            Some(value) => parse_int_bound("max", value)?,
            None => DEFAULT_INT_MAX,
        };
        if min > max {
            return Err(OptionsError::InvertedRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Box::new(move |rng: &mut dyn RngCore| {
            rng.random_range(min..=max).to_string()
        }))
    }
}

/// Dates drawn from `[min, max)` at second resolution.
pub struct DateRangeGenerator {
    now: fn() -> NaiveDateTime,
}

impl DateRangeGenerator {
    pub fn new(now: fn() -> NaiveDateTime) -> Self {
        Self { now }
    }
}

impl ParametricGenerator for DateRangeGenerator {
    fn bind(&self, options: &str) -> Result<BoundFn, OptionsError> {
        let now = (self.now)();
        let range = split_range(options);
        let min = match range.min {
            Some(value) => parse_date_bound("min", value)?.and_time(NaiveTime::default()),
            None => now.checked_sub_months(Months::new(12)).unwrap_or(now),
        };
        let max = match range.max {
            Some(value) => parse_date_bound("max", value)?.and_time(NaiveTime::default()),
            None => now,
        };
        if min > max {
            return Err(OptionsError::InvertedRange {
                min: min.format("%Y-%m-%d").to_string(),
                max: max.format("%Y-%m-%d").to_string(),
            });
        }

        let span = (max - min).num_seconds();
        Ok(Box::new(move |rng: &mut dyn RngCore| {
            let offset = if span > 0 {
                rng.random_range(0..span)
            } else {
                0
            };
            (min + Duration::seconds(offset))
                .format("%Y-%m-%d")
                .to_string()
        }))
    }
}

struct EnumGenerator;

impl ParametricGenerator for EnumGenerator {
    fn bind(&self, options: &str) -> Result<BoundFn, OptionsError> {
        let mut values = split_list(options);
        if values.is_empty() {
            values = DEFAULT_ENUM.iter().map(|value| value.to_string()).collect();
        }
        Ok(Box::new(move |rng: &mut dyn RngCore| {
            pick(&values, rng).clone()
        }))
    }
}

struct FileGenerator;

impl ParametricGenerator for FileGenerator {
    fn bind(&self, options: &str) -> Result<BoundFn, OptionsError> {
        let path = strip_quotes(options);
        if path.is_empty() {
            return Err(OptionsError::MissingPath);
        }
        let contents =
            std::fs::read_to_string(path).map_err(|source| OptionsError::UnreadableFile {
                path: path.to_string(),
                source,
            })?;

        let lines = file_lines(&contents);
        if lines.is_empty() {
            return Err(OptionsError::EmptyFile(path.to_string()));
        }
        tracing::debug!(path = %path, lines = lines.len(), "file generator loaded");

        Ok(Box::new(move |rng: &mut dyn RngCore| {
            pick(&lines, rng).clone()
        }))
    }
}

/// Split on `\n`, dropping a trailing `\r` per line and one trailing empty
/// line.
fn file_lines(contents: &str) -> Vec<String> {
    let mut lines: Vec<String> = contents
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

fn double(rng: &mut dyn RngCore) -> String {
    // Box-Muller; 1 - u keeps the log argument in (0, 1].
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    let normal = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    format!("{:.4}", normal * 1000.0)
}

fn latitude(rng: &mut dyn RngCore) -> String {
    format!("{:.6}", rng.random::<f64>() * 180.0 - 90.0)
}

fn longitude(rng: &mut dyn RngCore) -> String {
    format!("{:.6}", rng.random::<f64>() * 360.0 - 180.0)
}

fn id(rng: &mut dyn RngCore) -> String {
    (0..ID_LEN)
        .map(|_| char::from(*pick(ID_CHARSET, rng)))
        .collect()
}

fn uuid_v4(rng: &mut dyn RngCore) -> String {
    let bytes: [u8; 16] = rng.random();
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .to_string()
}

fn unixtime(_rng: &mut dyn RngCore) -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 6, 15)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap_or_default()
    }

    #[test]
    fn int_defaults_to_zero_through_thousand() {
        let bound = IntRangeGenerator.bind("").expect("bind");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1000 {
            let value: i64 = bound(&mut rng).parse().expect("integer");
            assert!((0..=1000).contains(&value));
        }
    }

    #[test]
    fn int_missing_min_defaults_to_zero() {
        let bound = IntRangeGenerator.bind(",3").expect("bind");
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..200 {
            let value: i64 = bound(&mut rng).parse().expect("integer");
            assert!((0..=3).contains(&value));
        }
    }

    #[test]
    fn int_rejects_inverted_and_malformed_ranges() {
        assert!(matches!(
            IntRangeGenerator.bind("100,50"),
            Err(OptionsError::InvertedRange { .. })
        ));
        assert!(matches!(
            IntRangeGenerator.bind("2000"),
            Err(OptionsError::InvertedRange { .. })
        ));
        assert!(matches!(
            IntRangeGenerator.bind("a,5"),
            Err(OptionsError::InvalidInt { bound: "min", .. })
        ));
        assert!(matches!(
            IntRangeGenerator.bind("1,b"),
            Err(OptionsError::InvalidInt { bound: "max", .. })
        ));
    }

    #[test]
    fn date_default_window_is_last_year_at_bind_time() {
        let bound = DateRangeGenerator::new(fixed_now).bind("").expect("bind");
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let min = NaiveDate::from_ymd_opt(2019, 6, 15).unwrap_or_default();
        let max = NaiveDate::from_ymd_opt(2020, 6, 15).unwrap_or_default();
        for _ in 0..1000 {
            let value = NaiveDate::parse_from_str(&bound(&mut rng), "%Y-%m-%d").expect("date");
            assert!(value >= min && value <= max, "{value}");
        }
    }

    #[test]
    fn date_rejects_min_after_now_without_max() {
        let result = DateRangeGenerator::new(fixed_now).bind("2021-01-01");
        assert!(matches!(result, Err(OptionsError::InvertedRange { .. })));
    }

    #[test]
    fn date_equal_bounds_yield_that_day() {
        let bound = DateRangeGenerator::new(fixed_now)
            .bind("2016-03-01,2016-03-01")
            .expect("bind");
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        assert_eq!(bound(&mut rng), "2016-03-01");
    }

    #[test]
    fn date_rejects_malformed_bounds() {
        let generator = DateRangeGenerator::new(fixed_now);
        assert!(matches!(
            generator.bind("2016/01/01"),
            Err(OptionsError::InvalidDate { bound: "min", .. })
        ));
        assert!(matches!(
            generator.bind("2016-01-01,soon"),
            Err(OptionsError::InvalidDate { bound: "max", .. })
        ));
    }

    #[test]
    fn file_lines_trims_single_trailing_newline() {
        assert_eq!(file_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(file_lines("a\r\nb"), vec!["a", "b"]);
        assert_eq!(file_lines("a\n\n"), vec!["a", ""]);
        assert!(file_lines("").is_empty());
    }

    #[test]
    fn file_requires_a_path() {
        assert!(matches!(
            FileGenerator.bind(""),
            Err(OptionsError::MissingPath)
        ));
        assert!(matches!(
            FileGenerator.bind("''"),
            Err(OptionsError::MissingPath)
        ));
    }

    #[test]
    fn id_is_ten_alphanumerics() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let value = id(&mut rng);
        assert_eq!(value.len(), ID_LEN);
        assert!(value.chars().all(|ch| ch.is_ascii_alphanumeric()));
    }

    #[test]
    fn uuid_is_version_four() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let value = uuid::Uuid::parse_str(&uuid_v4(&mut rng)).expect("uuid");
        assert_eq!(value.get_version_num(), 4);
    }
}

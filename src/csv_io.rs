//! CSV reading and writing: input series, index output and parameter tables.

use std::io::{Read, Write};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use csv::StringRecord;

use sindex_distr::{Family, FitStats, Method, Params};
use sindex_index::{IndexResult, ParamRow, ParamTable};
use sindex_series::{DailySeries, Series, SeriesMeta};

use crate::convert::parse_date;

/// Trailing statistic columns of a parameter table.
const STAT_COLUMNS: [&str; 6] = ["prob_zero", "n_obs", "n_na", "pct_na", "ks_pval", "ad_pval"];

/// Parses a numeric cell; empty, `NA` and `NaN` are missing.
fn parse_optional(field: &str) -> Result<Option<f64>> {
    let field = field.trim();
    if field.is_empty() || field.eq_ignore_ascii_case("na") || field.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let v: f64 = field
        .parse()
        .with_context(|| format!("invalid number {field:?}"))?;
    Ok(Some(v))
}

fn format_optional(v: Option<f64>) -> String {
    match v {
        Some(v) if !v.is_nan() => v.to_string(),
        _ => String::new(),
    }
}

fn column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("column {name:?} not found"))
}

fn field<'a>(record: &'a StringRecord, idx: usize) -> &'a str {
    record.get(idx).unwrap_or("")
}

/// Reads a daily series from `date,value` style CSV.
///
/// Dates must be strictly increasing. The value column name becomes the
/// series name.
pub fn read_series<R: Read>(reader: R, date_column: &str, value_column: &str) -> Result<DailySeries> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers().context("failed to read CSV headers")?.clone();
    let date_idx = column(&headers, date_column)?;
    let value_idx = column(&headers, value_column)?;

    let mut series = DailySeries::new();
    for (i, record) in reader.records().enumerate() {
        let line = i + 2;
        let record = record.with_context(|| format!("line {line}"))?;
        let date = parse_date(field(&record, date_idx)).with_context(|| format!("line {line}"))?;
        let value = parse_optional(field(&record, value_idx)).with_context(|| format!("line {line}"))?;
        series
            .push(date, value)
            .with_context(|| format!("line {line}"))?;
    }
    Ok(series.with_meta(SeriesMeta::new().with_name(value_column)))
}

/// Writes the index values as `date,<name>`; missing values are empty.
pub fn write_index<W: Write>(writer: W, result: &IndexResult) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    let name = result.values().meta().name().unwrap_or("value");
    let value_column = format!("{name}_index");
    writer.write_record(["date", value_column.as_str()])?;
    for (date, value) in result.values().iter() {
        writer.write_record([date.to_string(), format_optional(value)])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a parameter table for one family and method.
pub fn write_params<W: Write>(
    writer: W,
    table: &ParamTable,
    family: Family,
    method: Method,
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    let names = family.param_names(method);
    let mut header = vec!["date", "family", "method"];
    header.extend_from_slice(names);
    header.extend_from_slice(&STAT_COLUMNS);
    writer.write_record(&header)?;

    for (date, row) in table.iter() {
        if row.family() != family || row.method() != method {
            bail!(
                "row for {date} is {}/{}, expected {family}/{method}",
                row.family(),
                row.method()
            );
        }
        let stats = row.stats();
        let mut record = vec![
            date.to_string(),
            family.to_string(),
            method.to_string(),
        ];
        record.extend(row.param_values().into_iter().map(|v| format_optional(Some(v))));
        record.push(stats.prob_zero().to_string());
        record.push(stats.n_obs().to_string());
        record.push(stats.n_na().to_string());
        record.push(stats.pct_na().to_string());
        record.push(format_optional(stats.ks_pval()));
        record.push(format_optional(stats.ad_pval()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a parameter table written by [`write_params`].
///
/// Rows with any empty parameter cell are undefined fits.
pub fn read_params<R: Read>(reader: R) -> Result<ParamTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers().context("failed to read CSV headers")?.clone();
    let date_idx = column(&headers, "date")?;
    let family_idx = column(&headers, "family")?;
    let method_idx = column(&headers, "method")?;
    let stat_idx = STAT_COLUMNS
        .iter()
        .map(|name| column(&headers, name))
        .collect::<Result<Vec<_>>>()?;

    let mut table = ParamTable::new();
    for (i, record) in reader.records().enumerate() {
        let line = i + 2;
        let record = record.with_context(|| format!("line {line}"))?;
        let row = parse_param_row(&headers, &record, family_idx, method_idx, &stat_idx)
            .with_context(|| format!("line {line}"))?;
        let date: NaiveDate = parse_date(field(&record, date_idx))?;
        table.insert(date, row);
    }
    Ok(table)
}

fn parse_param_row(
    headers: &StringRecord,
    record: &StringRecord,
    family_idx: usize,
    method_idx: usize,
    stat_idx: &[usize],
) -> Result<ParamRow> {
    let family: Family = field(record, family_idx).parse()?;
    let method: Method = field(record, method_idx).parse()?;

    let mut values = Vec::with_capacity(family.n_params());
    for name in family.param_names(method) {
        let idx = column(headers, name)?;
        values.push(parse_optional(field(record, idx))?);
    }
    let params = match values.iter().copied().collect::<Option<Vec<f64>>>() {
        Some(v) => Some(Params::from_values(family, method, &v)?),
        None => None,
    };

    let stat = |k: usize| parse_optional(field(record, stat_idx[k]));
    let prob_zero = stat(0)?.unwrap_or(0.0);
    let n_obs = stat(1)?.unwrap_or(0.0) as usize;
    let n_na = stat(2)?.unwrap_or(0.0) as usize;
    let stats = FitStats::new(n_obs, n_na, prob_zero).with_pvalues(stat(4)?, stat(5)?);
    Ok(ParamRow::new(family, method, params, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn series_with_missing_cells() {
        let src = "date,pr,tas\n2000-01-01,1.5,3\n2000-01-02,,4\n2000-01-03,NA,5\n2000-01-04,0,6\n";
        let s = read_series(src.as_bytes(), "date", "pr").unwrap();
        assert_eq!(s.len(), 4);
        assert_eq!(s.n_missing(), 2);
        assert_eq!(s.value_at(ymd(2000, 1, 1)), Some(1.5));
        assert_eq!(s.value_at(ymd(2000, 1, 4)), Some(0.0));
        assert_eq!(s.meta().name(), Some("pr"));
    }

    #[test]
    fn series_errors_name_the_line() {
        let src = "date,value\n2000-01-01,1\n2000-01-01,2\n";
        let err = read_series(src.as_bytes(), "date", "value").unwrap_err();
        assert!(format!("{err:#}").contains("line 3"));

        let src = "date,value\n2000-01-01,abc\n";
        let err = read_series(src.as_bytes(), "date", "value").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));

        let err = read_series("day,value\n".as_bytes(), "date", "value").unwrap_err();
        assert!(format!("{err:#}").contains("\"date\""));
    }

    #[test]
    fn params_round_trip() {
        let mut table = ParamTable::new();
        let gamma = Params::from_values(Family::Gamma, Method::Mle, &[2.5, 0.125]).unwrap();
        table.insert(
            ymd(2001, 3, 1),
            ParamRow::new(
                Family::Gamma,
                Method::Mle,
                Some(gamma),
                FitStats::new(30, 1, 0.1).with_pvalues(Some(0.42), None),
            ),
        );
        table.insert(
            ymd(2001, 3, 2),
            ParamRow::new(Family::Gamma, Method::Mle, None, FitStats::new(30, 9, 0.0)),
        );

        let mut buf = Vec::new();
        write_params(&mut buf, &table, Family::Gamma, Method::Mle).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with(
            "date,family,method,shape,rate,prob_zero,n_obs,n_na,pct_na,ks_pval,ad_pval\n"
        ));

        let back = read_params(buf.as_slice()).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn params_family_mismatch_fails() {
        let mut table = ParamTable::new();
        table.insert(
            ymd(2001, 3, 1),
            ParamRow::new(Family::Gev, Method::Mle, None, FitStats::new(0, 0, 0.0)),
        );
        let mut buf = Vec::new();
        assert!(write_params(&mut buf, &table, Family::Gamma, Method::Mle).is_err());
    }
}

//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use sindex_distr::{Family, Method};
use sindex_index::IndexConfig;
use sindex_reference::RefYears;
use sindex_window::{Interpolation, OutOfRange, Reduction};

use crate::config::IndexToml;

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date {s:?}, expected YYYY-MM-DD"))
}

/// Resolves the reference-year policy.
///
/// At most one of `ref_years` or `ref_trailing` may be set; neither means
/// every available year.
pub fn parse_ref_years(index: &IndexToml) -> Result<RefYears> {
    match (&index.ref_years, index.ref_trailing) {
        (None, None) => Ok(RefYears::All),
        (Some(years), None) => Ok(RefYears::Years(years.clone())),
        (None, Some(n)) => Ok(RefYears::Trailing(n)),
        (Some(_), Some(_)) => bail!("set at most one of ref_years or ref_trailing"),
    }
}

/// Builds an [`IndexConfig`] from the TOML index configuration.
///
/// The result is validated so configuration errors surface before any
/// input is read.
pub fn build_index_config(index: &IndexToml) -> Result<IndexConfig> {
    let reduction: Reduction = index.agg_fun.parse()?;
    let family: Family = index.distr.parse()?;
    let method: Method = index.method.parse()?;
    let out_of_range: OutOfRange = index.ref_out_of_range.parse()?;
    let interpolation: Interpolation = index.agg_interpolation.parse()?;

    let cfg = IndexConfig::new()
        .with_agg_length(index.agg_length)
        .with_reduction(reduction)
        .with_family(family)
        .with_method(method)
        .with_ks_thres(index.ks_thres)
        .with_ad_thres(index.ad_thres)
        .with_ref_years(parse_ref_years(index)?)
        .with_ref_out_of_range(out_of_range)
        .with_ref_na_thres(index.ref_na_thres)
        .with_agg_na_thres(index.agg_na_thres)
        .with_interpolation(interpolation)
        .with_digits(index.digits);
    cfg.validate()?;
    Ok(cfg)
}

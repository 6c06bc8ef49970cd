use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SindexConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Index settings.
    #[serde(default)]
    pub index: IndexToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub reference: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub params_in: Option<PathBuf>,
    pub params_out: Option<PathBuf>,
    #[serde(default = "default_date_column")]
    pub date_column: String,
    #[serde(default = "default_value_column")]
    pub value_column: String,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: None,
            reference: None,
            output: None,
            params_in: None,
            params_out: None,
            date_column: default_date_column(),
            value_column: default_value_column(),
            start: None,
            end: None,
        }
    }
}

fn default_date_column() -> String {
    "date".to_string()
}
fn default_value_column() -> String {
    "value".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexToml {
    #[serde(default = "default_agg_length")]
    pub agg_length: usize,
    #[serde(default = "default_agg_fun")]
    pub agg_fun: String,
    #[serde(default = "default_distr")]
    pub distr: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub ks_thres: Option<f64>,
    #[serde(default)]
    pub ad_thres: Option<f64>,
    /// Explicit reference years; mutually exclusive with `ref_trailing`.
    #[serde(default)]
    pub ref_years: Option<Vec<i32>>,
    /// Number of years immediately before each output year.
    #[serde(default)]
    pub ref_trailing: Option<u32>,
    #[serde(default = "default_out_of_range")]
    pub ref_out_of_range: String,
    #[serde(default = "default_na_thres")]
    pub ref_na_thres: f64,
    #[serde(default = "default_na_thres")]
    pub agg_na_thres: f64,
    #[serde(default = "default_interpolation")]
    pub agg_interpolation: String,
    #[serde(default = "default_digits")]
    pub digits: u32,
}

impl Default for IndexToml {
    fn default() -> Self {
        Self {
            agg_length: default_agg_length(),
            agg_fun: default_agg_fun(),
            distr: default_distr(),
            method: default_method(),
            ks_thres: None,
            ad_thres: None,
            ref_years: None,
            ref_trailing: None,
            ref_out_of_range: default_out_of_range(),
            ref_na_thres: default_na_thres(),
            agg_na_thres: default_na_thres(),
            agg_interpolation: default_interpolation(),
            digits: default_digits(),
        }
    }
}

fn default_agg_length() -> usize {
    30
}
fn default_agg_fun() -> String {
    "sum".to_string()
}
fn default_distr() -> String {
    "gamma".to_string()
}
fn default_method() -> String {
    "mle".to_string()
}
fn default_out_of_range() -> String {
    "skip".to_string()
}
fn default_na_thres() -> f64 {
    10.0
}
fn default_interpolation() -> String {
    "none".to_string()
}
fn default_digits() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: SindexConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.io.date_column, "date");
        assert_eq!(cfg.io.value_column, "value");
        assert_eq!(cfg.index.agg_length, 30);
        assert_eq!(cfg.index.distr, "gamma");
        assert_eq!(cfg.index.digits, 3);
        assert!(cfg.index.ks_thres.is_none());
    }

    #[test]
    fn parses_both_tables() {
        let src = r#"
            [io]
            input = "obs.csv"
            value_column = "pr"
            start = "2000-01-01"

            [index]
            agg_length = 90
            distr = "gev"
            method = "lmoments"
            ks_thres = 0.05
            ref_trailing = 30
        "#;
        let cfg: SindexConfig = toml::from_str(src).unwrap();
        assert_eq!(cfg.io.input, Some(PathBuf::from("obs.csv")));
        assert_eq!(cfg.io.value_column, "pr");
        assert_eq!(cfg.io.start.as_deref(), Some("2000-01-01"));
        assert_eq!(cfg.index.agg_length, 90);
        assert_eq!(cfg.index.ks_thres, Some(0.05));
        assert_eq!(cfg.index.ref_trailing, Some(30));
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(toml::from_str::<SindexConfig>("[index]\nwindow = 3").is_err());
        assert!(toml::from_str::<SindexConfig>("[plot]\n").is_err());
    }
}

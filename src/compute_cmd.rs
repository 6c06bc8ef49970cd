//! Compute command: read a daily series, compute the index, write CSV.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use sindex_calendar::date_sequence;
use sindex_index::{IndexResult, compute_index};
use sindex_series::{DailySeries, Series};

use crate::cli::ComputeArgs;
use crate::config::{IoConfig, SindexConfig};
use crate::convert;
use crate::csv_io;

/// Run the compute pipeline.
pub fn run(args: ComputeArgs) -> Result<()> {
    let _cmd = info_span!("compute").entered();

    // 1. Load optional TOML config
    let mut config = match args.config {
        Some(ref path) => load_config(path)?,
        None => SindexConfig::default(),
    };

    // 2. Merge CLI flags, which override the config file
    merge_args(&mut config.io, args);

    // 3. Compute and write
    let result = execute(&config)?;
    write_outputs(&config, &result)
}

fn load_config(path: &Path) -> Result<SindexConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse configuration TOML")
}

fn merge_args(io: &mut IoConfig, args: ComputeArgs) {
    if args.input.is_some() {
        io.input = args.input;
    }
    if args.reference.is_some() {
        io.reference = args.reference;
    }
    if args.output.is_some() {
        io.output = args.output;
    }
    if args.start.is_some() {
        io.start = args.start;
    }
    if args.end.is_some() {
        io.end = args.end;
    }
    if args.params_in.is_some() {
        io.params_in = args.params_in;
    }
    if args.params_out.is_some() {
        io.params_out = args.params_out;
    }
}

fn read_series_file(path: &Path, io: &IoConfig) -> Result<DailySeries> {
    let file =
        File::open(path).with_context(|| format!("failed to open CSV: {}", path.display()))?;
    csv_io::read_series(BufReader::new(file), &io.date_column, &io.value_column)
        .with_context(|| format!("failed to read series: {}", path.display()))
}

/// Reads inputs and computes the index for every output date.
pub fn execute(config: &SindexConfig) -> Result<IndexResult> {
    let io = &config.io;
    let index_cfg = convert::build_index_config(&config.index)?
        .with_keep_details(io.params_out.is_some());

    // 1. Read inputs
    let input = io
        .input
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no input path: set [io].input in config or use --input"))?;
    info!(path = %input.display(), "reading series");
    let series = read_series_file(input, io)?;
    let Some((first, last)) = series.date_range() else {
        bail!("input series is empty: {}", input.display());
    };
    info!(n = series.len(), n_missing = series.n_missing(), %first, %last, "series loaded");

    let reference = match io.reference {
        Some(ref path) => {
            info!(path = %path.display(), "reading reference series");
            Some(read_series_file(path, io)?)
        }
        None => None,
    };

    let params = match io.params_in {
        Some(ref path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open CSV: {}", path.display()))?;
            let table = csv_io::read_params(BufReader::new(file))
                .with_context(|| format!("failed to read parameter table: {}", path.display()))?;
            info!(n_rows = table.len(), "parameter table loaded");
            Some(table)
        }
        None => None,
    };

    // 2. Output dates
    let start = match io.start {
        Some(ref s) => convert::parse_date(s)?,
        None => first,
    };
    let end = match io.end {
        Some(ref s) => convert::parse_date(s)?,
        None => last,
    };
    if end < start {
        bail!("end date {end} precedes start date {start}");
    }
    let dates = date_sequence(start, end);

    // 3. Compute
    let result = compute_index(
        &dates,
        &series,
        reference.as_ref().map(|s| s as &dyn Series),
        params.as_ref(),
        &index_cfg,
    )
    .context("index computation failed")?;

    let n_diag = result.diagnostics().len();
    if n_diag > 0 {
        warn!(n_diagnostics = n_diag, "computation produced diagnostics");
    }
    info!(
        n_dates = result.values().len(),
        n_missing = result.values().n_missing(),
        "index computed"
    );
    Ok(result)
}

fn write_outputs(config: &SindexConfig, result: &IndexResult) -> Result<()> {
    let io = &config.io;
    match io.output {
        Some(ref path) => {
            info!(path = %path.display(), "writing index");
            let file = File::create(path)
                .with_context(|| format!("failed to create output: {}", path.display()))?;
            csv_io::write_index(BufWriter::new(file), result)?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            csv_io::write_index(&mut lock, result)?;
            lock.flush()?;
        }
    }

    if let Some(ref path) = io.params_out {
        let details = result
            .details()
            .context("parameter table was not retained")?;
        info!(path = %path.display(), n_rows = details.params.len(), "writing parameter table");
        let file = File::create(path)
            .with_context(|| format!("failed to create output: {}", path.display()))?;
        let meta = result.metadata();
        csv_io::write_params(BufWriter::new(file), &details.params, meta.distr, meta.method)?;
    }
    Ok(())
}

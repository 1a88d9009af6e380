pub mod bench;

use std::{num::NonZeroUsize, thread::available_parallelism, time::Duration};

use astar_core::{SolverOutcome, utils::human_duration};
use comfy_table::{Cell, ContentArrangement, Table};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use nonzero_ext::nonzero;
use num_format::{Locale, ToFormattedString};

use crate::pool::QueryReport;

/// Minimal estimated runtime after which to show a progress bar instead of simple log messages.
pub const PROGRESS_BAR_THRESHOLD: Duration = Duration::from_millis(500);

/// Initializes `env_logger` (default level `info`) behind a bridge that keeps progress bars intact.
pub fn init_logging() -> MultiProgress {
    let logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).build();
    let level = logger.filter();
    let progress = MultiProgress::new();

    if let Err(e) = LogWrapper::new(progress.clone(), logger).try_init() {
        eprintln!("Failed to initialize logging: {}", e);
    }
    log::set_max_level(level);

    progress
}

pub fn should_use_progress_bar(remaining: usize, first_duration: Duration) -> bool {
    first_duration.mul_f64(remaining as f64) >= PROGRESS_BAR_THRESHOLD
}

pub fn create_progress_bar(progress: &MultiProgress, len: usize) -> ProgressBar {
    let pb = progress.add(ProgressBar::new(len as u64));
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} ({eta})",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

pub fn parse_num_worker_threads(s: &str) -> Result<NonZeroUsize, String> {
    if s == "auto" {
        Ok(available_parallelism().unwrap_or(nonzero!(1usize)))
    } else {
        s.parse::<NonZeroUsize>()
            .map_err(|_| format!("Invalid value for --worker-threads: {}", s))
    }
}

pub fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid value for --timeout: {}", s))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("Invalid timeout {}: {}", s, e))
}

/// Aggregated statistics over a batch of queries.
#[derive(Debug, Default)]
pub struct Stats {
    pub processed: usize,
    pub errors: usize,
    pub solved: usize,
    pub unsolvable: usize,
    pub timeouts: usize,
    pub verified: usize,
    pub failed_verifications: usize,
    pub explored: Vec<usize>,
    pub solve_durations: Vec<Duration>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: &QueryReport) {
        self.processed += 1;
        match report.outcome {
            SolverOutcome::Solved => self.solved += 1,
            SolverOutcome::Unsolvable => self.unsolvable += 1,
            SolverOutcome::Timeout => self.timeouts += 1,
        }
        match report.verification {
            Some(Ok(())) => self.verified += 1,
            Some(Err(_)) => self.failed_verifications += 1,
            None => {}
        }
        self.explored.push(report.num_explored);
        self.solve_durations.push(report.duration);
    }

    pub fn record_error(&mut self) {
        self.processed += 1;
        self.errors += 1;
    }

    pub fn summary_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["", "count", "min", "avg", "median", "max"]);

        let fmt = |n: usize| n.to_formatted_string(&Locale::en);

        table.add_row(vec![
            Cell::new("queries"),
            Cell::new(fmt(self.processed)),
        ]);
        for (label, count) in [
            ("solved", self.solved),
            ("unsolvable", self.unsolvable),
            ("timeout", self.timeouts),
            ("errors", self.errors),
        ] {
            table.add_row(vec![Cell::new(label), Cell::new(fmt(count))]);
        }
        if self.verified + self.failed_verifications > 0 {
            table.add_row(vec![
                Cell::new("verified"),
                Cell::new(format!(
                    "{}/{}",
                    fmt(self.verified),
                    fmt(self.verified + self.failed_verifications)
                )),
            ]);
        }

        if let Some((min, avg, median, max)) = summarize(&self.explored, |&n| n as f64) {
            table.add_row(vec![
                Cell::new("explored"),
                Cell::new(fmt(self.explored.iter().sum())),
                Cell::new(fmt(min as usize)),
                Cell::new(fmt(avg.round() as usize)),
                Cell::new(fmt(median.round() as usize)),
                Cell::new(fmt(max as usize)),
            ]);
        }
        if let Some((min, avg, median, max)) =
            summarize(&self.solve_durations, Duration::as_secs_f64)
        {
            let total: Duration = self.solve_durations.iter().sum();
            table.add_row(vec![
                Cell::new("time"),
                Cell::new(human_duration(total)),
                Cell::new(human_duration(Duration::from_secs_f64(min))),
                Cell::new(human_duration(Duration::from_secs_f64(avg))),
                Cell::new(human_duration(Duration::from_secs_f64(median))),
                Cell::new(human_duration(Duration::from_secs_f64(max))),
            ]);
        }

        table
    }

    pub fn print_summary(&self) {
        println!("\n{}", self.summary_table());
    }
}

/// Returns `(min, avg, median, max)` of the values, or `None` if there are none.
fn summarize<T>(values: &[T], to_f64: impl Fn(&T) -> f64) -> Option<(f64, f64, f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let mut sorted: Vec<f64> = values.iter().map(to_f64).collect();
    sorted.sort_by(f64::total_cmp);

    let avg = sorted.iter().sum::<f64>() / sorted.len() as f64;
    let median = if sorted.len() % 2 == 1 {
        sorted[sorted.len() / 2]
    } else {
        let hi = sorted.len() / 2;
        (sorted[hi - 1] + sorted[hi]) / 2.0
    };
    Some((sorted[0], avg, median, sorted[sorted.len() - 1]))
}

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::services::{
    format_count, year_summary, ActivitySource, Config, GridReport, IntensityBucket, Overrides,
    YearStats, YearSummary,
};
use crate::services::stats::WEEKDAY_LABELS;
use crate::types::{CommitmapError, YearGrid, DAYS_PER_WEEK};

/// Commit activity heatmap for the terminal
#[derive(Parser)]
#[command(name = "commitmap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
struct GlobalArgs {
    /// Analytics API base URL
    #[arg(long, global = true, env = "COMMITMAP_API_URL")]
    api_url: Option<String>,

    /// Author email to fetch activity for
    #[arg(long, global = true, env = "COMMITMAP_EMAIL")]
    email: Option<String>,

    /// Earliest selectable year
    #[arg(long, global = true)]
    min_year: Option<i32>,

    /// Latest selectable year
    #[arg(long, global = true)]
    max_year: Option<i32>,

    /// Config file (default: ~/.commitmap/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read activity from a JSON file instead of the API
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Year to show (default: current year)
    #[arg(long, global = true)]
    year: Option<i32>,

    /// Seed for generated sample activity
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui,

    /// Print the year heatmap
    Grid {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show year statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl GlobalArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            api_url: self.api_url.clone(),
            email: self.email.clone(),
            min_year: self.min_year,
            max_year: self.max_year,
        }
    }

    fn load_config(&self, today: NaiveDate) -> anyhow::Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load_from(path, self.overrides(), today)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::load(self.overrides(), today)?,
        };
        Ok(config)
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let today = Local::now().date_naive();
        let config = self.global.load_config(today)?;
        let source = ActivitySource::select(self.global.input.clone(), &config);
        tracing::debug!(source = %source.describe(), url = %config.activity_url(), "resolved source");

        match self.command {
            None | Some(Commands::Tui) => {
                crate::tui::run(config, source, self.global.year, self.global.seed)
            }
            Some(Commands::Grid { json }) => {
                let grid = load_year(&self.global, &config, &source, today)?.grid;
                if json {
                    println!("{}", serde_json::to_string_pretty(&GridReport::from_grid(&grid))?);
                } else {
                    print!("{}", render_text_grid(&grid));
                }
                Ok(())
            }
            Some(Commands::Stats { json }) => {
                let stats = load_year(&self.global, &config, &source, today)?.stats;
                if json {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                } else {
                    print!("{}", render_text_stats(&stats));
                }
                Ok(())
            }
        }
    }
}

/// Resolve the year, load activity inline and build grid and stats
fn load_year(
    args: &GlobalArgs,
    config: &Config,
    source: &ActivitySource,
    today: NaiveDate,
) -> anyhow::Result<YearSummary> {
    let year = args.year.unwrap_or_else(|| today.year());
    if !config.year_bounds.contains(year) {
        return Err(CommitmapError::InvalidYear(year).into());
    }

    let supplied = source
        .load(config)
        .with_context(|| format!("failed to load activity from {}", source.describe()))?;

    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    Ok(year_summary(year, supplied.as_ref(), today, &mut rng)?)
}

/// Seven rows (Mon..Sun) of one character per week
pub fn render_text_grid(grid: &YearGrid) -> String {
    let mut out = format!("{}  ({} .. {})\n", grid.year(), grid.start(), grid.end());

    for day in 0..DAYS_PER_WEEK {
        out.push_str(WEEKDAY_LABELS[day]);
        out.push(' ');
        for week in 0..grid.weeks().len() {
            let ch = grid
                .cell(week, day)
                .map(|cell| IntensityBucket::classify(i64::from(cell.count)).to_char())
                .unwrap_or(' ');
            out.push(ch);
        }
        out.push('\n');
    }

    let legend: Vec<String> = IntensityBucket::ALL
        .iter()
        .map(|b| format!("{} {}", b.to_char(), b.range_label()))
        .collect();
    out.push_str(&format!("    {}\n", legend.join("  ")));
    out
}

pub fn render_text_stats(stats: &YearStats) -> String {
    let mut out = format!("Year:           {}\n", stats.year);
    out.push_str(&format!("Total:          {}\n", format_count(stats.total_commits)));
    out.push_str(&format!("Active days:    {}\n", stats.active_days));
    out.push_str(&format!(
        "Per active day: {:.1}\n",
        stats.average_per_active_day()
    ));
    out.push_str(&format!("Longest streak: {}\n", stats.longest_streak));
    out.push_str(&format!("Current streak: {}\n", stats.current_streak));
    if let Some((date, count)) = stats.busiest_day {
        out.push_str(&format!(
            "Busiest day:    {} ({})\n",
            date,
            format_count(u64::from(count))
        ));
    }
    if let Some(weekday) = stats.busiest_weekday() {
        out.push_str(&format!("Busiest weekday: {}\n", weekday));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{build_grid, start_date};
    use crate::types::ActivityMap;

    fn sample_map() -> ActivityMap {
        [
            (NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(), 2),
            (NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(), 12),
        ]
        .into_iter()
        .collect()
    }

    fn sample_grid() -> YearGrid {
        build_grid(start_date(2025).unwrap(), &sample_map()).unwrap()
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["commitmap"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_grid_json() {
        let cli = Cli::try_parse_from(["commitmap", "grid", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Grid { json: true })));
    }

    #[test]
    fn test_cli_parse_stats() {
        let cli = Cli::try_parse_from(["commitmap", "stats"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Stats { json: false })));
    }

    #[test]
    fn test_cli_parse_global_after_subcommand() {
        let cli = Cli::try_parse_from([
            "commitmap",
            "grid",
            "--year",
            "2024",
            "--seed",
            "7",
            "--min-year",
            "2020",
        ])
        .unwrap();
        assert_eq!(cli.global.year, Some(2024));
        assert_eq!(cli.global.seed, Some(7));
        assert_eq!(cli.global.overrides().min_year, Some(2020));
    }

    #[test]
    fn test_cli_parse_rejects_bad_year() {
        assert!(Cli::try_parse_from(["commitmap", "--year", "soon"]).is_err());
    }

    #[test]
    fn test_render_text_grid_shape() {
        let text = render_text_grid(&sample_grid());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "2025  (2025-01-06 .. 2026-01-11)");
        // header + 7 weekday rows + legend
        assert_eq!(lines.len(), 9);
        for row in &lines[1..8] {
            assert_eq!(row.chars().count(), 4 + 53);
        }
        assert!(lines[1].starts_with("Mon ░"));
        assert!(lines[2].starts_with("Tue █"));
        assert!(lines[3].starts_with("Wed ·"));
        assert_eq!(lines[8], "    · 0  ░ 1-3  ▒ 4-6  ▓ 7-9  █ 10+");
    }

    #[test]
    fn test_render_text_stats() {
        let stats = YearStats::from_activity(2025, &sample_map()).unwrap();
        let text = render_text_stats(&stats);

        assert!(text.contains("Total:          14 коммитов"));
        assert!(text.contains("Longest streak: 2"));
        assert!(text.contains("Busiest day:    2025-01-07 (12 коммитов)"));
        assert!(text.contains("Busiest weekday: Tue"));
    }

    #[test]
    fn test_load_year_rejects_year_outside_bounds() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let config = Config::resolve(Default::default(), Overrides::default(), today).unwrap();
        let args = GlobalArgs {
            year: Some(2010),
            ..GlobalArgs::default()
        };

        let err = load_year(&args, &config, &ActivitySource::Synthetic, today).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CommitmapError>(),
            Some(CommitmapError::InvalidYear(2010))
        ));
    }

    #[test]
    fn test_load_year_seeded_synthetic_is_stable() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let config = Config::resolve(Default::default(), Overrides::default(), today).unwrap();
        let args = GlobalArgs {
            year: Some(2024),
            seed: Some(42),
            ..GlobalArgs::default()
        };

        let a = load_year(&args, &config, &ActivitySource::Synthetic, today).unwrap();
        let b = load_year(&args, &config, &ActivitySource::Synthetic, today).unwrap();
        assert_eq!(
            GridReport::from_grid(&a.grid).weeks,
            GridReport::from_grid(&b.grid).weeks
        );
        assert_eq!(a.stats, b.stats);
    }
}

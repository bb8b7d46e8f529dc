use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::io::Write;

use crate::model::config::AppConfig;
use crate::model::history::LiveEvent;
use crate::model::world::World;
use pasture_data::PopulationStats;

/// Headless driver around a [`World`].
pub struct App {
    pub running: bool,
    pub world: World,
    pub started_at: String,
    /// Print a stats row every this many ticks (0 disables).
    pub report_every: u64,
}

/// End-of-run report, printable as a table or as JSON.
#[derive(Serialize, Debug, Clone)]
pub struct RunSummary {
    pub started_at: String,
    pub seed: Option<u64>,
    pub fingerprint: String,
    pub ticks: u64,
    pub population: PopulationStats,
    pub counters: Vec<(String, u64)>,
    pub mean_tick_us: u64,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        Ok(Self {
            running: true,
            world: World::new(config)?,
            started_at: Utc::now().to_rfc3339(),
            report_every: 0,
        })
    }

    /// One tick. The app stops once every species has died out.
    pub fn tick(&mut self) -> Vec<LiveEvent> {
        let batch = self.world.update();
        if self.world.is_empty() {
            tracing::info!(tick = self.world.tick, "All agents gone, stopping");
            self.running = false;
        }
        batch
    }

    /// Runs up to `ticks` ticks.
    ///
    /// Events go to `events` as JSON lines when a sink is given; a stats row
    /// goes to `report` every `report_every` ticks.
    pub fn run(
        &mut self,
        ticks: u64,
        mut events: Option<&mut dyn Write>,
        report: &mut dyn Write,
    ) -> Result<RunSummary> {
        if self.report_every > 0 {
            writeln!(report, "{}", table_header())?;
        }
        for _ in 0..ticks {
            if !self.running {
                break;
            }
            let batch = self.tick();
            if let Some(sink) = events.as_mut() {
                for event in &batch {
                    writeln!(sink, "{}", event.to_json_line()?)?;
                }
            }
            if self.report_every > 0 && self.world.tick % self.report_every == 0 {
                writeln!(report, "{}", table_row(&self.world.pop_stats))?;
            }
        }
        Ok(self.summary())
    }

    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let metrics = &self.world.metrics;
        RunSummary {
            started_at: self.started_at.clone(),
            seed: self.world.config.world.seed,
            fingerprint: self.world.config.fingerprint(),
            ticks: self.world.tick,
            population: self.world.pop_stats,
            counters: metrics.counters(),
            mean_tick_us: metrics.mean_tick_duration().as_micros() as u64,
        }
    }
}

fn table_header() -> String {
    format!("{:>8} {:>8} {:>8} {:>8}", "tick", "growers", "grazers", "hunters")
}

fn table_row(stats: &PopulationStats) -> String {
    format!(
        "{:>8} {:>8} {:>8} {:>8}",
        stats.tick, stats.growers, stats.grazers, stats.hunters
    )
}

impl RunSummary {
    #[must_use]
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("started      {}\n", self.started_at));
        match self.seed {
            Some(seed) => out.push_str(&format!("seed         {seed}\n")),
            None => out.push_str("seed         (entropy)\n"),
        }
        out.push_str(&format!("config       {}\n", &self.fingerprint[..16.min(self.fingerprint.len())]));
        out.push_str(&format!("mean tick    {} us\n\n", self.mean_tick_us));
        out.push_str(&table_header());
        out.push('\n');
        out.push_str(&table_row(&self.population));
        out.push('\n');
        if !self.counters.is_empty() {
            out.push('\n');
            for (name, value) in &self.counters {
                out.push_str(&format!("{name:<13}{value}\n"));
            }
        }
        out
    }
}

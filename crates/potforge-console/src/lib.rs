//! Colorful console output for heuristic synthesis.
//!
//! Provides a custom `tracing` layer that formats generation events with
//! colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Generation lifecycle, model size, strategy progress
//! - **DEBUG**: Individual LP solves (not rendered)
//! - **WARN**: Skipped constraints and early strategy stops

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static GENERATE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "potforge=info,potforge_solver=info,potforge_lp=warn";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the PotForge banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(PotForgeConsoleLayer)
            .try_init();
    });
}

// Marks the start of generation for elapsed time tracking.
fn mark_generate_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    GENERATE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = GENERATE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 ____       _   _____
|  _ \ ___ | |_|  ___|__  _ __ __ _  ___
| |_) / _ \| __| |_ / _ \| '__/ _` |/ _ \
|  __/ (_) | |_|  _| (_) | | | (_| |  __/
|_|   \___/ \__|_|  \___/|_|  \__, |\___|
                              |___/
"#;

    let version_line = format!("            v{} - Potential Heuristic Synthesis\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats generation events with colors.
pub struct PotForgeConsoleLayer;

impl<S: Subscriber> Layer<S> for PotForgeConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !target.starts_with("potforge_solver")
            && !target.starts_with("potforge_lp")
            && !target.starts_with("potforge::")
        {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    objective: Option<String>,
    disambiguation: Option<String>,
    strategy: Option<String>,
    reason: Option<String>,
    error: Option<String>,
    path: Option<String>,
    vars: Option<u64>,
    facts: Option<u64>,
    ops: Option<u64>,
    mgroups: Option<u64>,
    pairs: Option<u64>,
    lp_vars: Option<u64>,
    op_constraints: Option<u64>,
    maxpots: Option<u64>,
    skipped_ops: Option<u64>,
    functions: Option<u64>,
    solves: Option<u64>,
    failed_solves: Option<u64>,
    computed: Option<u64>,
    total: Option<u64>,
    solved: Option<u64>,
    samples: Option<u64>,
    states: Option<u64>,
    dead_ends: Option<u64>,
    duplicates: Option<u64>,
    duration_ms: Option<u64>,
    value: Option<f64>,
    rhs: Option<f64>,
    h2: Option<bool>,
    solved_flag: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let slot = match field.name() {
            "vars" => &mut self.vars,
            "facts" => &mut self.facts,
            "ops" => &mut self.ops,
            "mgroups" => &mut self.mgroups,
            "pairs" => &mut self.pairs,
            "lp_vars" => &mut self.lp_vars,
            "op_constraints" => &mut self.op_constraints,
            "maxpots" => &mut self.maxpots,
            "skipped_ops" => &mut self.skipped_ops,
            "functions" => &mut self.functions,
            "solves" => &mut self.solves,
            "failed_solves" => &mut self.failed_solves,
            "computed" => &mut self.computed,
            "total" => &mut self.total,
            "solved" => &mut self.solved,
            "samples" => &mut self.samples,
            "states" => &mut self.states,
            "dead_ends" => &mut self.dead_ends,
            "duplicates" => &mut self.duplicates,
            "duration_ms" => &mut self.duration_ms,
            _ => return,
        };
        *slot = Some(value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "value" => self.value = Some(value),
            "rhs" => self.rhs = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "h2" => self.h2 = Some(value),
            "solved" => self.solved_flag = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "event" => &mut self.event,
            "objective" => &mut self.objective,
            "disambiguation" => &mut self.disambiguation,
            "strategy" => &mut self.strategy,
            "reason" => &mut self.reason,
            "error" => &mut self.error,
            "path" => &mut self.path,
            _ => return,
        };
        *slot = Some(value.to_string());
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    if level > Level::INFO {
        return String::new();
    }
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "generate_start" => format_generate_start(v),
        "mutexes_computed" => format_mutexes(v),
        "model_built" => format_model(v),
        "init_constraint" => format_init_constraint(v),
        "init_constraint_skipped" | "diverse_stopped" => format_warning(event, v),
        "objective_solved" => format_objective_solved(v),
        "conditioned_progress" => format_progress("conditioned", v.computed, v.total, v),
        "sampling_progress" => format_progress("sampled", v.solved, v.samples, v),
        "diverse_sampled" => format_diverse_sampled(v),
        "diverse_done" => format_diverse_done(v),
        "generate_end" => format_generate_end(v),
        "artifact_written" => format_artifact(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_generate_start(v: &EventVisitor) -> String {
    mark_generate_start();
    format!(
        "{} {} Generating │ {} vars │ {} facts │ {} operators │ {} │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.vars).bright_yellow(),
        count(v.facts).bright_yellow(),
        count(v.ops).bright_yellow(),
        v.objective.as_deref().unwrap_or("?").white().bold(),
        v.disambiguation.as_deref().unwrap_or("?").bright_magenta()
    )
}

fn format_mutexes(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} Mutexes │ {} groups │ {} pairs",
        format_elapsed(),
        "◆".bright_blue(),
        count(v.mgroups).white(),
        count(v.pairs).white()
    );
    if v.h2 == Some(true) {
        output.push_str(&format!(" │ {}", "h²".bright_magenta()));
    }
    output
}

fn format_model(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} Model │ {} LP vars │ {} op constraints │ {} maxpots",
        format_elapsed(),
        "◆".bright_blue(),
        count(v.lp_vars).white(),
        count(v.op_constraints).white(),
        count(v.maxpots).bright_magenta()
    );
    if let Some(skipped) = v.skipped_ops.filter(|&s| s > 0) {
        output.push_str(&format!(
            " │ {} unreachable ops",
            skipped.to_formatted_string(&Locale::en).yellow()
        ));
    }
    output
}

fn format_init_constraint(v: &EventVisitor) -> String {
    format!(
        "{} {} Initial state pinned │ h = {} │ lower bound {}",
        format_elapsed(),
        "◆".bright_blue(),
        format!("{:.3}", v.value.unwrap_or(0.0)).bright_green(),
        format!("{:.2}", v.rhs.unwrap_or(0.0)).bright_yellow()
    )
}

fn format_warning(event: &str, v: &EventVisitor) -> String {
    let detail = v
        .reason
        .as_deref()
        .or(v.error.as_deref())
        .unwrap_or("unknown reason");
    format!(
        "{} {} {} │ {}",
        format_elapsed(),
        "!".bright_yellow().bold(),
        event.replace('_', " ").yellow(),
        detail
    )
}

fn format_objective_solved(v: &EventVisitor) -> String {
    let objective = v.objective.as_deref().unwrap_or("objective");
    let status = match (v.solved_flag, v.functions) {
        (Some(true), _) => "solved".bright_green().to_string(),
        (Some(false), _) => "no optimal solution".bright_red().to_string(),
        (None, functions) => format!("{} functions", count(functions))
            .bright_green()
            .to_string(),
    };
    format!(
        "{} {} {} │ {}",
        format_elapsed(),
        "●".bright_cyan(),
        objective.white().bold(),
        status
    )
}

fn format_progress(label: &str, done: Option<u64>, total: Option<u64>, v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} {:>10} / {} {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        count(done).white(),
        count(total).white(),
        label
    );
    if v.functions.is_some() {
        output.push_str(&format!(
            " │ {} functions",
            count(v.functions).bright_magenta().bold()
        ));
    }
    output
}

fn format_diverse_sampled(v: &EventVisitor) -> String {
    format!(
        "{} {} Sampled │ {} states │ {} dead ends │ {} duplicates",
        format_elapsed(),
        "◆".bright_blue(),
        count(v.states).bright_yellow(),
        count(v.dead_ends).white(),
        count(v.duplicates).bright_black()
    )
}

fn format_diverse_done(v: &EventVisitor) -> String {
    format!(
        "{} {} Ensemble covers all states │ {} functions",
        format_elapsed(),
        "●".bright_cyan(),
        count(v.functions).bright_magenta().bold()
    )
}

fn format_generate_end(v: &EventVisitor) -> String {
    let functions = v.functions.unwrap_or(0);
    let strategy = v.strategy.as_deref().unwrap_or("Unknown");
    let duration = format_duration_ms(v.duration_ms.unwrap_or(0));

    let mut output = format!(
        "{} {} Generation complete │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        strategy.white().bold(),
        duration.yellow()
    );

    // Summary box
    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    let (status_text, status_colored) = if functions > 0 {
        let text = "POTENTIAL HEURISTIC READY";
        (text, text.bright_green().bold().to_string())
    } else {
        let text = "NO POTENTIAL FUNCTION FOUND";
        (text, text.bright_red().bold().to_string())
    };
    let inner_width: usize = 58;
    let total_pad = inner_width.saturating_sub(status_text.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(
        &"╠══════════════════════════════════════════════════════════╣"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    let rows = [
        ("Functions:", count(v.functions)),
        ("LP solves:", count(v.solves)),
        ("Failed solves:", count(v.failed_solves)),
    ];
    for (label, value) in rows {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
        output.push('\n');
    }

    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn format_artifact(v: &EventVisitor) -> String {
    format!(
        "{} {} Wrote {} functions to {}",
        format_elapsed(),
        "✓".bright_green(),
        count(v.functions).bright_magenta().bold(),
        v.path.as_deref().unwrap_or("?").white()
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

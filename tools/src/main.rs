//! report-runner: headless report renderer for AreaPulse.
//!
//! Usage:
//!   report-runner --data-dir ./data
//!   report-runner --data-dir ./data --cluster S1-2-BE
//!   report-runner --data-dir ./data --show-targets
//!   report-runner --data-dir ./data --ipc-mode

use anyhow::Result;
use areapulse_core::{
    action::DashAction,
    cluster::ClusterAggregate,
    dataset::Dataset,
    engine::{DashEngine, HoverBands, ReviewStanding, TargetView},
    event::DashEvent,
    highlights::ClusterHighlight,
    kpi::RegionKpi,
    quiz::PendingReset,
    selection::ClusterSelection,
    series::NC_APP_ADOPTION_TARGET,
};
use chrono::Month;
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Action { action: DashAction },
    FireReset { reset: PendingReset },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    selection:     ClusterSelection,
    hovered_store: Option<String>,
    quiz_cursor:   usize,
    quiz_answered: usize,
    quiz_total:    usize,
    quiz_passed:   bool,
    clusters:      Vec<ClusterAggregate>,
    highlights:    Vec<ClusterHighlight>,
    reviews:       Vec<ReviewStanding>,
    hover:         Option<HoverBands>,
    targets:       TargetView,
    events:        Vec<DashEvent>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let show_targets = args.iter().any(|a| a == "--show-targets");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");
    let cluster = args
        .windows(2)
        .find(|w| w[0] == "--cluster")
        .map(|w| w[1].as_str());

    let dataset = Dataset::load(data_dir)?;
    let mut engine = DashEngine::new(dataset)?;

    if let Some(id) = cluster {
        engine.apply(DashAction::SelectCluster {
            selection: ClusterSelection::Only(id.to_string()),
        });
    }

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
        return Ok(());
    }

    println!("AreaPulse — report-runner");
    println!("  data_dir:  {data_dir}");
    println!("  selection: {:?}", engine.selection());
    println!();

    if show_targets {
        unlock_targets(&mut engine);
    }

    print_report(&engine);
    Ok(())
}

// ── IPC mode ─────────────────────────────────────────────────────────────────

/// Line-delimited JSON over stdin/stdout. The front end sends actions
/// and fires reset tokens when their delay elapses; every command gets
/// the fresh UI state (plus the events the command produced) back.
fn run_ipc_loop(engine: &mut DashEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {
                let state = build_ui_state(engine, Vec::new());
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
            IpcCommand::Action { action } => {
                let events = engine.apply(action);
                let state = build_ui_state(engine, events);
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
            IpcCommand::FireReset { reset } => {
                let events = engine.fire_reset(reset).into_iter().collect();
                let state = build_ui_state(engine, events);
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn build_ui_state(engine: &DashEngine, events: Vec<DashEvent>) -> UiState {
    UiState {
        selection:     engine.selection().clone(),
        hovered_store: engine.hovered_store().map(str::to_string),
        quiz_cursor:   engine.quiz().cursor(),
        quiz_answered: engine.quiz().answered(),
        quiz_total:    engine.quiz().total(),
        quiz_passed:   engine.quiz().passed(),
        clusters:      engine.cluster_overview(),
        highlights:    engine.highlights(),
        reviews:       engine.review_standings(),
        hover:         engine.hover_bands(),
        targets:       engine.targets(),
        events,
    }
}

// ── Plain report mode ────────────────────────────────────────────────────────

/// Drive the quiz with the dataset's own answer key so the targets
/// section can print.
fn unlock_targets(engine: &mut DashEngine) {
    let key: Vec<usize> = engine.dataset().quiz.iter().map(|q| q.correct).collect();
    for (i, &option) in key.iter().enumerate() {
        engine.apply(DashAction::SelectAnswer { option });
        if i + 1 < key.len() {
            engine.apply(DashAction::NextQuestion);
        }
    }
    engine.apply(DashAction::SubmitQuiz);
}

fn print_report(engine: &DashEngine) {
    println!("=== REGION RANKING ===");
    for kpi in RegionKpi::ALL {
        let mut line = format!("  {:<14} |", kpi.label());
        for entry in engine.region_ranking() {
            let value = entry.row.kpi(kpi);
            match entry.rank(kpi) {
                Some(rank) => {
                    line.push_str(&format!("  {}: {:.1} ({rank})", entry.row.region, value))
                }
                None => line.push_str(&format!("  {}: {:.1}", entry.row.region, value)),
            }
        }
        println!("{line}");
    }

    println!();
    println!("=== CLUSTER OVERVIEW ===");
    for c in engine.cluster_overview() {
        println!(
            "  {:<10} ({} {}) | Sales vs TGT: {}  NC vs TGT: {}  WRC: {:.1}%  Unreg: {:.1}%  VLTZ: {:.1}%  RET: {:.1}%  Trade-In: {:.1}%",
            c.cluster,
            c.member_count,
            if c.member_count == 1 { "store" } else { "stores" },
            fmt_ratio(c.sales_vs_target),
            fmt_ratio(c.nc_vs_target),
            c.wrc,
            c.unregistered_rate,
            c.vltz,
            c.retention,
            c.trade_in_rate,
        );
    }

    println!();
    println!("=== HIGHLIGHTS ===");
    let highlights = engine.highlights();
    if highlights.is_empty() {
        println!("  (no cluster clears a callout criterion)");
    }
    for h in &highlights {
        println!("  {:<10} score {:.1}", h.cluster, h.score);
    }

    println!();
    println!("=== TRADE-IN FOCUS ===");
    for c in engine.trade_in_focus() {
        println!("  {:<10} {:.1}%", c.cluster, c.trade_in_rate);
    }

    println!();
    println!("=== REVIEW STANDINGS ===");
    for s in engine.review_standings() {
        println!(
            "  #{:<3} {:<18} {:>4} reviews  (was #{}, {:+})  cluster: {}",
            s.current_rank,
            s.store,
            s.reviews,
            s.last_rank,
            s.change,
            s.cluster.as_deref().unwrap_or("-"),
        );
    }

    println!();
    println!("=== MONTHLY SERIES ===");
    for p in engine.month_series() {
        println!(
            "  {:<10} {:<10} | RET {:.1}%  ACB {:.0}  App {:.1}%",
            p.cluster,
            month_label(p.month),
            p.retention,
            p.active_customers,
            p.app_adoption,
        );
    }

    println!();
    println!("=== AUDITS ===");
    for a in engine.audit_overview() {
        println!(
            "  {:<10} | Mystery shop {:.1}%  Compliance {:.1}%",
            a.cluster, a.mystery_shop, a.compliance
        );
    }

    println!();
    println!("=== APP ADOPTION ===");
    for snap in engine.adoption_snapshot() {
        println!(
            "  {:<12} {:<10} {:.1}%  ({})",
            snap.store,
            snap.cluster,
            snap.adoption,
            month_label(snap.month)
        );
    }
    println!("  area average: {:.1}%", engine.adoption_area_average());
    match engine.nc_adoption_mean() {
        Some(mean) => println!(
            "  NC adoption mean: {mean:.1}% (target {NC_APP_ADOPTION_TARGET:.0}%)"
        ),
        None => println!("  NC adoption mean: N/A"),
    }

    println!();
    println!("=== NEXT-PERIOD TARGETS ===");
    match engine.targets() {
        TargetView::Locked => {
            println!("  (locked — pass the knowledge check, or rerun with --show-targets)")
        }
        TargetView::Unlocked(rows) => {
            for r in rows {
                println!(
                    "  {:<12} sales £{:.2} (cluster £{:.2})  NC {:.0} (cluster {:.0})",
                    r.store, r.sales_target, r.cluster_sales_target, r.nc_target, r.cluster_nc_target
                );
            }
        }
    }
}

fn fmt_ratio(value: Option<f64>) -> String {
    match value {
        Some(p) => format!("{p:.1}%"),
        None => "N/A".to_string(),
    }
}

fn month_label(month: Month) -> &'static str {
    month.name()
}

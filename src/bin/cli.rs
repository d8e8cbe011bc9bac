use anyhow::{Context, anyhow};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use timeline_layout::{
    CalendarLayout, CalendarView, GanttLayout, LayoutConfig, RawTask, TaskDiagnostic,
    TimelineEngine, ViewMode, ZoomLevel, ZoomState, load_tasks, load_tasks_from_csv,
    load_tasks_from_json, normalize_tasks,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "timeline", about = "Calendar and Gantt layout explorer")]
struct Args {
    /// Task snapshot to load at startup (.json or .csv)
    #[arg(long)]
    tasks: Option<PathBuf>,
    /// Layout configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override today's date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init();
    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Calendar,
    Gantt,
}

struct Session {
    engine: TimelineEngine,
    tasks: Vec<RawTask>,
    today: NaiveDate,
    screen: Screen,
    view: CalendarView,
    zoom: ZoomState,
    selected: Option<String>,
}

impl Session {
    fn new(engine: TimelineEngine, today: NaiveDate) -> Self {
        let view = engine.calendar_view(ViewMode::Month, today);
        let zoom = engine.zoom_state(ZoomLevel::Day);
        Self {
            engine,
            tasks: Vec::new(),
            today,
            screen: Screen::Calendar,
            view,
            zoom,
            selected: None,
        }
    }

    fn calendar_layout(&self) -> CalendarLayout {
        self.engine
            .calendar(&self.tasks, &self.view, self.today, self.selected.as_deref())
    }

    fn gantt_layout(&self) -> GanttLayout {
        self.engine
            .gantt(&self.tasks, &self.zoom, self.today, self.selected.as_deref())
    }

    fn diagnostics(&self) -> Vec<TaskDiagnostic> {
        normalize_tasks(&self.tasks).diagnostics
    }

    fn render(&self) -> String {
        match self.screen {
            Screen::Calendar => render_calendar(&self.calendar_layout()),
            Screen::Gantt => render_gantt(&self.gantt_layout()),
        }
    }

    fn render_json(&self) -> anyhow::Result<String> {
        let json = match self.screen {
            Screen::Calendar => serde_json::to_string_pretty(&self.calendar_layout())?,
            Screen::Gantt => serde_json::to_string_pretty(&self.gantt_layout())?,
        };
        Ok(json)
    }
}

fn render_calendar(layout: &CalendarLayout) -> String {
    let mut out = String::new();
    let (first, last) = match (layout.cells.first(), layout.cells.last()) {
        (Some(first), Some(last)) => (first.date, last.date),
        _ => return "Empty calendar.\n".to_string(),
    };
    out.push_str(&format!(
        "Calendar {} view anchored at {} ({}..{}, {} cells)\n",
        layout.view.mode.as_str(),
        layout.view.anchor,
        first,
        last,
        layout.cells.len()
    ));
    for cell in layout.cells.iter().filter(|cell| !cell.day_tasks.is_empty()) {
        let mut line = format!(
            "  {}  tasks={} starting={} due={}",
            cell.date,
            cell.day_tasks.len(),
            cell.starting_tasks.len(),
            cell.due_tasks.len()
        );
        if !cell.overflow.shown.is_empty() {
            line.push_str(&format!(" shown={}", cell.overflow.shown.join(",")));
        }
        if cell.overflow.hidden > 0 {
            line.push_str(&format!(" +{} more", cell.overflow.hidden));
        }
        if cell.is_today {
            line.push_str(" (today)");
        }
        out.push_str(&line);
        out.push('\n');
    }
    for legend in &layout.legend {
        out.push_str(&format!(
            "  project {} [{}] tasks={}\n",
            legend.project_name, legend.project_id, legend.task_count
        ));
    }
    if let Some(selected) = &layout.selected_task_id {
        out.push_str(&format!("  selected={selected}\n"));
    }
    out
}

fn render_gantt(layout: &GanttLayout) -> String {
    let timeline = &layout.timeline;
    let mut out = format!(
        "Gantt {} zoom={} width={} columns={}",
        timeline.range,
        timeline.zoom,
        timeline.column_width,
        timeline.columns.len()
    );
    match timeline.today_offset {
        Some(offset) => out.push_str(&format!(" today={offset}\n")),
        None => out.push_str(" today=none\n"),
    }
    for group in &timeline.groups {
        out.push_str(&format!("[{}] {}\n", group.project_id, group.project_name));
        for task in &group.task_layouts {
            let mut line = format!(
                "  {} offset={} duration={} bar={}+{} {} {}",
                task.task_id,
                task.day_offset_from_range_start,
                task.duration_in_days,
                task.bar.offset,
                task.bar.width,
                task.status.display().label,
                task.priority.display().label,
            );
            if task.is_overdue {
                line.push_str(" overdue");
            }
            if task.is_selected {
                line.push_str(" *selected*");
            }
            if let Some(milestone) = &task.milestone {
                line.push_str(&format!(
                    " milestone={}@{}",
                    milestone.name, milestone.day_offset
                ));
            }
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                     Show this help\n  show                     Render the current view\n  load <json|csv> <path>   Load a task snapshot\n  month | week             Switch to the calendar view\n  gantt                    Switch to the Gantt view\n  prev | next | today      Navigate the calendar anchor\n  zoom <in|out>            Change Gantt zoom\n  select <id>              Highlight a task\n  clear                    Clear the selection\n  json                     Print the current layout as JSON\n  diagnostics              List rejected or adjusted tasks\n  quit|exit                Exit"
    );
}

fn load_snapshot(session: &mut Session, format: &str, path: &str) -> anyhow::Result<()> {
    let tasks = match format {
        "json" => load_tasks_from_json(path)?,
        "csv" => load_tasks_from_csv(path)?,
        other => return Err(anyhow!("unsupported format '{other}' (use json or csv)")),
    };
    info!(count = tasks.len(), path, "loaded task snapshot");
    session.tasks = tasks;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let config = match &args.config {
        Some(path) => LayoutConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LayoutConfig::default(),
    };
    let engine = TimelineEngine::new(config)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let mut session = Session::new(engine, today);

    if let Some(path) = &args.tasks {
        session.tasks =
            load_tasks(path).with_context(|| format!("loading tasks {}", path.display()))?;
    }

    println!("Timeline (CLI) - type 'help' for commands\n");
    print!("{}", session.render());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => break,
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.as_slice() {
            ["help"] => print_help(),
            ["quit"] | ["exit"] => break,
            ["show"] => print!("{}", session.render()),
            ["load", format, path] => match load_snapshot(&mut session, format, path) {
                Ok(()) => {
                    println!("Loaded {} tasks from {}.", session.tasks.len(), path);
                    print!("{}", session.render());
                }
                Err(err) => println!("Failed to load tasks: {err}"),
            },
            ["month"] | ["week"] => {
                let mode = if parts[0] == "month" {
                    ViewMode::Month
                } else {
                    ViewMode::Week
                };
                session.view = session.view.with_mode(mode);
                session.screen = Screen::Calendar;
                print!("{}", session.render());
            }
            ["gantt"] => {
                session.screen = Screen::Gantt;
                print!("{}", session.render());
            }
            ["prev"] | ["next"] | ["today"] => {
                if session.screen != Screen::Calendar {
                    println!("Navigation applies to the calendar views.");
                    continue;
                }
                session.view = match parts[0] {
                    "prev" => session.view.previous(),
                    "next" => session.view.next(),
                    _ => session.view.today(session.today),
                };
                print!("{}", session.render());
            }
            ["zoom", direction] => {
                let changed = match *direction {
                    "in" => session.zoom.zoom_in(),
                    "out" => session.zoom.zoom_out(),
                    other => {
                        println!("Unknown zoom direction '{other}' (use in or out).");
                        continue;
                    }
                };
                if changed {
                    println!("Zoom level is now {}.", session.zoom.level());
                } else {
                    println!("Zoom level unchanged ({}).", session.zoom.level());
                }
                if session.screen == Screen::Gantt {
                    print!("{}", session.render());
                }
            }
            ["select", id] => {
                session.selected = Some((*id).to_string());
                println!("Selected task {id}.");
            }
            ["clear"] => {
                session.selected = None;
                println!("Selection cleared.");
            }
            ["json"] => match session.render_json() {
                Ok(json) => println!("{json}"),
                Err(err) => println!("Failed to serialize layout: {err}"),
            },
            ["diagnostics"] => {
                let diagnostics = session.diagnostics();
                if diagnostics.is_empty() {
                    println!("No diagnostics.");
                }
                for diagnostic in diagnostics {
                    println!("  {}: {}", diagnostic.task_id, diagnostic.message);
                }
            }
            _ => println!("Unknown command. Type 'help' for the list of commands."),
        }
    }

    Ok(())
}

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use medgraph_story::{
    Diagram as _, Millis, Script, SessionSnapshot, StepDom, StepIndex, StoryConfig, StoryEvent,
    StorySession,
};

#[derive(Parser, Debug)]
#[command(name = "medgraph-story", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the built-in article configuration as JSON.
    Config(ConfigArgs),
    /// Replay a script of timed inputs and print the resulting events.
    Replay(ReplayArgs),
    /// Print a diagram's reveal plan for one step.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Write to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Story config JSON. Defaults to the built-in article.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append the final session snapshot.
    #[arg(long, default_value_t = false)]
    snapshot: bool,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Diagram id from the config.
    #[arg(long)]
    diagram: String,

    /// Step index (0-based).
    #[arg(long, default_value_t = 0)]
    step: usize,

    /// Story config JSON. Defaults to the built-in article.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct Logged {
    at: Millis,
    event: StoryEvent,
}

#[derive(serde::Serialize)]
struct ReplayOutput<'a> {
    events: Vec<Logged>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot: Option<SessionSnapshot<'a, StepDom>>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Config(args) => cmd_config(args),
        Command::Replay(args) => cmd_replay(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<StoryConfig> {
    match path {
        Some(p) => StoryConfig::from_path(p)
            .with_context(|| format!("load story config '{}'", p.display())),
        None => Ok(StoryConfig::article()),
    }
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("write json to stdout")?;
    writeln!(stdout).context("write json to stdout")?;
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = StoryConfig::article();
    let Some(out) = args.out else {
        return print_json(&config);
    };
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&config).context("serialize story config")?;
    std::fs::write(&out, json).with_context(|| format!("write config '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let script = Script::from_path(&args.script)
        .with_context(|| format!("load script '{}'", args.script.display()))?;
    let mut session = StorySession::new(config, StepDom::new()).context("create story session")?;

    let mut events = Vec::new();
    for step in script.steps {
        let at = step.at;
        events.extend(
            session
                .handle(step.input, at)
                .into_iter()
                .map(|event| Logged { at, event }),
        );
    }
    tracing::debug!(events = events.len(), "replay finished");

    let output = ReplayOutput {
        events,
        snapshot: args.snapshot.then(|| session.snapshot()),
    };
    print_json(&output)
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let entry = config
        .diagram(&args.diagram)
        .with_context(|| format!("no diagram '{}' in config", args.diagram))?;
    let diagram = entry.kind.build(entry.id.clone());
    let plan = diagram
        .reveal_plan(StepIndex(args.step))
        .with_context(|| format!("diagram '{}' has no reveal plan for step {}", args.diagram, args.step))?;
    print_json(&plan)
}

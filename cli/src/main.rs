use clap::{Arg, ArgAction, ArgMatches, Command};
use factgraph_core::{
    create_graph, generate_graph, load_fact_sets, FactGraphErrorExt, NodeGraph, NodeSetPolicy,
    RenderConfig, WriteError,
};
use log::LevelFilter;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

mod output;

use output::{graph_summary, stats_table, Report, ReportCollector};

fn main() {
    let cli = Command::new("factgraph")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render static-analysis fact tables as an annotated control-flow graph");

    let cli = setup_cli(cli);
    let matches = cli.get_matches();
    init_logging(matches.get_count("verbose"));

    let mut reports = ReportCollector::new();
    if let Err(e) = dispatch_commands(&matches, &mut reports) {
        reports.push(Report::from_error(e.as_ref()));
    }
    reports.print_all();
    std::process::exit(reports.exit_code());
}

/// `-v` raises the default `warn` filter; `RUST_LOG` still wins when set.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn fact_dir_args(cmd: Command, first: &'static str, second: &'static str) -> Command {
    cmd.arg(
        Arg::new(first)
            .help("Directory of input relations (*.facts)")
            .required(true)
            .value_parser(clap::value_parser!(PathBuf))
            .index(1),
    )
    .arg(
        Arg::new(second)
            .help("Directory of analysis output relations (*.csv)")
            .required(true)
            .value_parser(clap::value_parser!(PathBuf))
            .index(2),
    )
}

/// Sets up the CLI with subcommands and arguments.
/// `print` and `stats` read two fact directories, `render` reads a fact root
/// containing `facts/` and `output/`.
fn setup_cli(cli: Command) -> Command {
    cli.arg(
        Arg::new("config")
            .help("JSON render configuration")
            .short('c')
            .long("config")
            .global(true)
            .value_parser(clap::value_parser!(PathBuf))
            .value_name("FILE"),
    )
    .arg(
        Arg::new("nodes")
            .help("Which nodes get a block in the graph")
            .long("nodes")
            .global(true)
            .value_parser(["union", "input_facts", "node_text"])
            .value_name("POLICY"),
    )
    .arg(
        Arg::new("label-node-ids")
            .help("Prefix each node's text with its id")
            .long("label-node-ids")
            .global(true)
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("verbose")
            .help("Increase log verbosity (-v info, -vv debug)")
            .short('v')
            .long("verbose")
            .global(true)
            .action(ArgAction::Count),
    )
    .subcommand_required(true)
    .subcommand(fact_dir_args(
        Command::new("print").about("Print the DOT graph for two fact directories to stdout"),
        "input",
        "output",
    ))
    .subcommand(
        Command::new("render")
            .about("Write the DOT graph for a fact root to a file and lay it out")
            .arg(
                Arg::new("root")
                    .help("Fact root containing facts/ and output/")
                    .required(true)
                    .value_parser(clap::value_parser!(PathBuf))
                    .index(1),
            )
            .arg(
                Arg::new("file")
                    .help("Output DOT file; a bare name is placed inside the fact root")
                    .required(true)
                    .value_parser(clap::value_parser!(PathBuf))
                    .index(2),
            )
            .arg(
                Arg::new("no-layout")
                    .help("Skip the external layout step")
                    .long("no-layout")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("format")
                    .help("Image format passed to the layout tool")
                    .short('T')
                    .long("format")
                    .value_name("FORMAT"),
            ),
    )
    .subcommand(fact_dir_args(
        Command::new("stats").about("Summarize the relations and nodes of two fact directories"),
        "input",
        "output",
    ))
}

/// Defaults, then the config file, then the environment, then flags.
fn resolve_config(matches: &ArgMatches) -> Result<RenderConfig, Box<dyn FactGraphErrorExt>> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => RenderConfig::load_from_file(path)?,
        None => RenderConfig::default(),
    };
    config.apply_env();

    if let Some(policy) = matches
        .get_one::<String>("nodes")
        .and_then(|n| NodeSetPolicy::from_name(n))
    {
        config.node_set = policy;
    }
    if matches.get_flag("label-node-ids") {
        config.label_node_ids = true;
    }
    Ok(config)
}

fn path_arg<'a>(matches: &'a ArgMatches, id: &str) -> &'a PathBuf {
    matches
        .get_one::<PathBuf>(id)
        .expect("required argument")
}

/// Dispatches the command based on the parsed arguments.
fn dispatch_commands(
    matches: &ArgMatches,
    reports: &mut ReportCollector,
) -> Result<(), Box<dyn FactGraphErrorExt>> {
    match matches.subcommand() {
        Some(("print", sub_m)) => {
            let config = resolve_config(sub_m)?;
            let dot = generate_graph(path_arg(sub_m, "input"), path_arg(sub_m, "output"), &config)?;
            let mut stdout = std::io::stdout().lock();
            match stdout.write_all(dot.as_bytes()).and_then(|_| stdout.flush()) {
                // A closed pipe (e.g. `| head`) is not worth a diagnostic.
                Err(e) if e.kind() != ErrorKind::BrokenPipe => {
                    return Err(WriteError::new(Path::new("<stdout>"), e).into());
                }
                _ => {}
            }
        }
        Some(("render", sub_m)) => {
            let mut config = resolve_config(sub_m)?;
            if sub_m.get_flag("no-layout") {
                config.layout.enabled = false;
            }
            if let Some(format) = sub_m.get_one::<String>("format") {
                config.layout.format = format.clone();
            }
            config.validate()?;

            let artifact = create_graph(path_arg(sub_m, "root"), path_arg(sub_m, "file"), &config)?;
            println!("{}", artifact.document.display());
            if let Some(rendered) = &artifact.rendered {
                println!("{}", rendered.display());
            }
            if let Some(e) = &artifact.layout_error {
                reports.push(Report::from_error(e));
            }
        }
        Some(("stats", sub_m)) => {
            let config = resolve_config(sub_m)?;
            let (input, output) =
                load_fact_sets(path_arg(sub_m, "input"), path_arg(sub_m, "output"), &config)?;
            let graph = NodeGraph::from_facts(&input, &output, &config)?;
            println!("{}", stats_table(&input, &output));
            println!("{}", graph_summary(&graph));
        }
        _ => unreachable!("subcommand_required is set"),
    }
    Ok(())
}

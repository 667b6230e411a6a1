#![deny(clippy::all)]
use bds_cli::clap::Parser;
use bds_cli::cli::extra::{get_servers, resolve_server};
use bds_cli::cli::search::run_search;
use bds_cli::cli::Cli;
use bds_cli::output::write_lines;
use color_eyre::eyre::Result;
use log::warn;
use owo_colors::OwoColorize;
use std::process::exit;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    env_logger::builder()
        .format_timestamp(None)
        .filter_level(args.log_level)
        .parse_default_env()
        .init();
    color_eyre::install()?;

    if args.servers {
        print_servers()?;
    }

    let server = resolve_server(&args)?;
    let output = run_search(&args, server).await?;

    if output.report.is_empty() {
        warn!("No posts found for {}", args.tags.join(" "));
    }

    print_results(output.report.total, output.lines.len(), &output.report.stats);

    if args.bell {
        eprint!("\x07");
    }

    if !write_lines(&output.lines, args.output.as_deref(), args.overwrite).await? {
        eprintln!("{}", "Output file left untouched".bold().blue());
    }

    Ok(())
}

fn print_results(total: u64, steps: usize, stats: &bds_core::deep_search::RequestStats) {
    eprintln!(
        "{} {} {} {} {}",
        total.to_string().bold().blue(),
        "posts split into".bold(),
        steps.to_string().bold().blue(),
        "searches".bold(),
        format!(
            "(Done in {} requests with avg of {:.3}s)",
            stats.requests,
            stats.average().as_secs_f64()
        )
        .italic()
    );
}

fn print_servers() -> Result<()> {
    println!(
        "{}\n----------------",
        "Available Servers:".underline().bold().blue()
    );

    let servers = get_servers()?;
    let mut names: Vec<&String> = servers.keys().collect();
    names.sort();

    for (srv, data) in names.into_iter().filter_map(|name| servers.get_key_value(name)) {
        println!(
            "{:<16} - {}:\n - {} {}\n - {} {}\n - {} {}\n - {} {}\n",
            format!("[{}]", srv),
            data.pretty_name.bold().green(),
            "API Type:".bold().blue(),
            data.server.to_string().bold().purple().underline(),
            "Base URL:".bold().blue(),
            data.base_url.bold().purple().underline(),
            "Max Posts per Search:".bold().blue(),
            data.max_posts_per_search.bold().yellow(),
            "Max Posts per Page:".bold().blue(),
            data.max_posts_per_page.bold().yellow(),
        )
    }

    exit(0)
}

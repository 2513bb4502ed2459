use anyhow::Result;
use clap::Parser;
use log::info;
use std::collections::BTreeSet;

use pathview::model::Diagram;
use pathview::search::SearchArguments;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect & search pathway diagram layout files", long_about = None)]
struct Cli {
    /// Diagram layout JSON file
    #[arg(value_name = "LAYOUT_JSON")]
    layout: String,

    /// Search query matched against node display names
    #[arg(short, long)]
    query: Option<String>,

    /// Species recorded in the search arguments
    #[arg(short, long, default_value = "Homo sapiens")]
    species: String,

    /// Print the normalized layout as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let diagram = Diagram::from_json_file(&cli.layout)?;
    info!("loaded {} ({} nodes)", diagram.st_id, diagram.nodes.len());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&diagram)?);
        return Ok(());
    }

    println!("{} — {}", diagram.st_id, diagram.display_name);
    let mut kinds: Vec<(&str, usize)> = Vec::new();
    for node in &diagram.nodes {
        let name = node.kind.name();
        match kinds.iter_mut().find(|(k, _)| *k == name) {
            Some((_, count)) => *count += 1,
            None => kinds.push((name, 1)),
        }
    }
    for (kind, count) in &kinds {
        println!("  {kind}: {count}");
    }

    if let Some(query) = &cli.query {
        let arguments =
            SearchArguments::new(query, &diagram.st_id, &cli.species, BTreeSet::new());
        if !arguments.has_valid_query() {
            anyhow::bail!("Empty search query");
        }
        let mut hits = 0usize;
        for node in &diagram.nodes {
            if arguments.matches(&node.display_name) {
                hits += 1;
                // Underline matches, keeping the casing of the layout text.
                let label = arguments
                    .highlight_with(&node.display_name, |m| format!("\x1b[1;4m{m}\x1b[0m"));
                println!("  [{}] {}", node.kind.name(), label);
            }
        }
        println!("{hits} node(s) matched \"{}\"", arguments.query());
    }

    Ok(())
}

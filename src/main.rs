use anyhow::{bail, Context, Result};
use clap::Parser;
use csv::{ReaderBuilder, Writer};
use std::fs;
use std::io::Read;
use std::time::Instant;

mod dijkstra;
mod error;
mod graph;
mod indexed_heap;
mod relation;

use error::Error;
use graph::Graph;

#[derive(Parser, Debug)]
#[command(name = "kindist")]
#[command(about = "Build a relationship graph from pairwise declarations and answer shortest-distance queries between named members.", long_about = None)]
struct Cli {
    /// Read input from a file instead of stdin
    #[arg(short, long)]
    input: Option<String>,

    /// Also write results as CSV (from, to, distance; 'inf' when unreachable)
    #[arg(short, long)]
    out: Option<String>,

    /// Print the member chain of each shortest path
    #[arg(long, default_value_t = false)]
    show_path: bool,
}

#[derive(Debug, PartialEq)]
struct Declaration {
    a: String,
    relation: String,
    b: String,
}

#[derive(Debug, PartialEq)]
struct Query {
    from: String,
    to: String,
}

/// The input is two line blocks separated by the first blank line:
/// relationship declarations, then queries. Extra blank lines are ignored.
fn split_blocks(text: &str) -> (String, String) {
    let mut declarations = Vec::new();
    let mut queries = Vec::new();
    let mut in_queries = false;
    for line in text.lines() {
        if line.trim().is_empty() {
            in_queries = true;
            continue;
        }
        if in_queries {
            queries.push(line);
        } else {
            declarations.push(line);
        }
    }
    (declarations.join("\n"), queries.join("\n"))
}

fn parse_declarations(block: &str) -> Result<Vec<Declaration>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(block.as_bytes());
    let mut declarations = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        if record.len() != 3 {
            bail!(
                "declaration {} has {} fields, expected name,relationship,name",
                i + 1,
                record.len()
            );
        }
        declarations.push(Declaration {
            a: record[0].to_string(),
            relation: record[1].to_string(),
            b: record[2].to_string(),
        });
    }
    Ok(declarations)
}

fn parse_queries(block: &str) -> Result<Vec<Query>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(block.as_bytes());
    let mut queries = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        if record.len() != 2 {
            bail!("query {} has {} fields, expected name,name", i + 1, record.len());
        }
        queries.push(Query {
            from: record[0].to_string(),
            to: record[1].to_string(),
        });
    }
    Ok(queries)
}

fn build_graph(declarations: &[Declaration]) -> Result<Graph> {
    let mut graph = Graph::new();
    for (i, d) in declarations.iter().enumerate() {
        let weight = relation::relation_weight(&d.relation)
            .with_context(|| format!("declaration {} ({},{},{})", i + 1, d.a, d.relation, d.b))?;
        graph.add_edge(&d.a, &d.b, weight);
    }
    Ok(graph)
}

/// Answers one query: the distance and the line to print after `a,b: `.
fn answer(graph: &Graph, query: &Query, show_path: bool) -> Result<(Option<u64>, String), Error> {
    let distance = dijkstra::shortest_distance(graph, &query.from, &query.to)?;
    let rendered = match distance {
        Some(d) if show_path => {
            let source = dijkstra::resolve(graph, &query.from)?;
            let target = dijkstra::resolve(graph, &query.to)?;
            let sp = dijkstra::shortest_paths_to(graph, source, target);
            match sp.path_to(target) {
                Some(path) => {
                    let names: Vec<&str> = path.iter().map(|&id| graph.name(id)).collect();
                    format!("{} ({})", d, names.join(" -> "))
                }
                None => d.to_string(),
            }
        }
        Some(d) => d.to_string(),
        None => String::from("unreachable"),
    };
    Ok((distance, rendered))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let text = match &cli.input {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };

    let (declaration_block, query_block) = split_blocks(&text);
    let declarations = parse_declarations(&declaration_block)?;
    let queries = parse_queries(&query_block)?;
    let graph = build_graph(&declarations)?;
    log::debug!(
        "graph: {} members, {} adjacency records, {} queries",
        graph.len(),
        graph.edge_count(),
        queries.len()
    );

    let mut out = match &cli.out {
        Some(path) => {
            let mut wtr =
                Writer::from_path(path).with_context(|| format!("creating CSV {}", path))?;
            wtr.write_record(["from", "to", "distance"])?;
            Some(wtr)
        }
        None => None,
    };

    for query in &queries {
        let started = Instant::now();
        match answer(&graph, query, cli.show_path) {
            Ok((distance, rendered)) => {
                println!("{},{}: {}", query.from, query.to, rendered);
                if let Some(wtr) = out.as_mut() {
                    let value = match distance {
                        Some(d) => d.to_string(),
                        None => String::from("inf"),
                    };
                    wtr.write_record([query.from.as_str(), query.to.as_str(), value.as_str()])?;
                }
            }
            Err(e) => {
                log::warn!("query {},{}: {}", query.from, query.to, e);
                println!("{},{}: {}", query.from, query.to, e);
            }
        }
        log::debug!(
            "query {},{} answered in {:.3} ms",
            query.from,
            query.to,
            started.elapsed().as_secs_f64() * 1000.0
        );
    }

    if let Some(mut wtr) = out {
        wtr.flush()?;
    }

    Ok(())
}

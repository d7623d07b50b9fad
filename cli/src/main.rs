//! spatial-graph CLI: inspect, convert and prune saved spatial graph files

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use spatial_graph::{persistence, GeometryMode, Graph, GraphConfig, SnapshotOptions, COORDINATES};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spatial-graph", version, about = "Spatial graph file tool")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// YAML graph configuration (controls compression of written files)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a graph file
    Info {
        input: PathBuf,
    },
    /// Switch the edge geometry layout
    Convert {
        input: PathBuf,
        /// Target layout: graph (packed) or edge (scattered)
        #[arg(long)]
        mode: String,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Keep only the largest connected component
    LargestComponent {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Remove isolated vertices, isolated edges and self loops
    Prune {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long)]
        self_loops: bool,
        #[arg(long)]
        isolated_edges: bool,
    },
    /// Check that edge geometry starts and ends at its vertices
    Check {
        input: PathBuf,
    },
    /// List connected component sizes
    Components {
        input: PathBuf,
        /// Show at most this many components, largest first
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

#[derive(Serialize)]
struct GraphSummary {
    vertices: usize,
    edges: usize,
    directed: bool,
    edge_geometry_mode: String,
    shape: Option<Vec<usize>>,
    vertex_properties: Vec<String>,
    edge_properties: Vec<String>,
    graph_properties: Vec<String>,
    edge_geometry: Vec<String>,
    components: usize,
}

impl GraphSummary {
    fn of(graph: &Graph) -> Self {
        GraphSummary {
            vertices: graph.n_vertices(),
            edges: graph.n_edges(),
            directed: graph.is_directed(),
            edge_geometry_mode: graph.edge_geometry_mode().to_string(),
            shape: graph.shape(),
            vertex_properties: graph.vertex_property_names(),
            edge_properties: graph.edge_property_names(),
            graph_properties: graph.graph_property_names(),
            edge_geometry: graph.edge_geometry_names(),
            components: graph.label_components().component_count(),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => GraphConfig::from_yaml_file(path)?,
        None => GraphConfig::default(),
    };
    let options = config.snapshot_options();

    match cli.command {
        Commands::Info { input } => run_info(&load(&input)?, &cli.format),
        Commands::Convert { input, mode, output } => {
            let mut graph = load(&input)?;
            let mode: GeometryMode = mode.parse()?;
            graph.set_edge_geometry_mode(mode)?;
            save(&graph, &output, &options)
        }
        Commands::LargestComponent { input, output } => {
            let graph = load(&input)?;
            let largest = graph.largest_component()?;
            info!(
                "Largest component keeps {} of {} vertices",
                largest.n_vertices(),
                graph.n_vertices()
            );
            save(&largest, &output, &options)
        }
        Commands::Prune {
            input,
            output,
            self_loops,
            isolated_edges,
        } => {
            let mut graph = load(&input)?;
            if self_loops {
                graph.remove_self_loops()?;
            }
            if isolated_edges {
                graph.remove_isolated_edges()?;
            } else {
                graph.remove_isolated_vertices()?;
            }
            save(&graph, &output, &options)
        }
        Commands::Check { input } => run_check(&load(&input)?, &cli.format),
        Commands::Components { input, top } => run_components(&load(&input)?, top, &cli.format),
    }
}

fn load(path: &Path) -> Result<Graph> {
    persistence::load(path).with_context(|| format!("loading {}", path.display()))
}

fn save(graph: &Graph, path: &Path, options: &SnapshotOptions) -> Result<()> {
    persistence::save_with(path, graph, options).with_context(|| format!("saving {}", path.display()))
}

fn run_info(graph: &Graph, format: &OutputFormat) -> Result<()> {
    let summary = GraphSummary::of(graph);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["field", "value"]);
            table.add_row(vec!["vertices".to_string(), summary.vertices.to_string()]);
            table.add_row(vec!["edges".to_string(), summary.edges.to_string()]);
            table.add_row(vec!["directed".to_string(), summary.directed.to_string()]);
            table.add_row(vec!["edge geometry mode".to_string(), summary.edge_geometry_mode]);
            table.add_row(vec![
                "shape".to_string(),
                summary.shape.map(|s| format!("{:?}", s)).unwrap_or_else(|| "-".to_string()),
            ]);
            table.add_row(vec!["vertex properties".to_string(), summary.vertex_properties.join(", ")]);
            table.add_row(vec!["edge properties".to_string(), summary.edge_properties.join(", ")]);
            table.add_row(vec!["graph properties".to_string(), summary.graph_properties.join(", ")]);
            table.add_row(vec!["edge geometry".to_string(), summary.edge_geometry.join(", ")]);
            table.add_row(vec!["components".to_string(), summary.components.to_string()]);
            println!("{}", table);
        }
    }
    Ok(())
}

fn run_check(graph: &Graph, format: &OutputFormat) -> Result<()> {
    if !graph.has_edge_geometry(COORDINATES) {
        bail!("graph has no '{}' edge geometry", COORDINATES);
    }
    let inconsistent = graph.inconsistent_edge_geometries()?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&inconsistent)?),
        OutputFormat::Table => {
            if inconsistent.is_empty() {
                println!("edge geometry is consistent with vertex coordinates");
            } else {
                let mut table = Table::new();
                table.set_header(vec!["edge", "source", "target"]);
                for &edge in &inconsistent {
                    let (s, t) = graph.endpoints(edge)?;
                    table.add_row(vec![edge.to_string(), s.to_string(), t.to_string()]);
                }
                println!("{}", table);
                println!("{} inconsistent edge(s)", inconsistent.len());
            }
        }
    }
    Ok(())
}

fn run_components(graph: &Graph, top: usize, format: &OutputFormat) -> Result<()> {
    let components = graph.label_components();
    let mut sizes: Vec<(usize, usize)> = components.counts.iter().copied().enumerate().collect();
    sizes.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    sizes.truncate(top);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sizes)?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["label", "vertices"]);
            for (label, count) in &sizes {
                table.add_row(vec![label.to_string(), count.to_string()]);
            }
            println!("{}", table);
            println!("{} component(s)", components.component_count());
        }
    }
    Ok(())
}

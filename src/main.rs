use clap::{Parser, Subcommand};
use scaffold_md::{batch, output, tree::ContentTree};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "scaffold-md")]
#[command(about = "Scaffold markdown content trees from YAML outlines")]
#[command(long_about = "\
Scaffold markdown content trees from YAML outlines

A YAML outline describes folders, sections, and files; scaffold-md turns it
into directories, markdown stubs, and a routesMeta.json manifest.

Outline shape:

  title: Guides                # display name, source of the folder slug
  icon: book                   # optional icon identifier
  isRoute: true                # route-bearing folders get an index.md stub
  folderSet:                   # ordered groups of child folders
    - sectionHeader: Basics    # optional group label
      folders:
        - title: Setup
          files:               # markdown stubs owned by this folder
            - title: Install
            - title: Upgrade
              shortcut: up     # preferred slug source over the title

Output:

  content/
  ├── index.md                 # landing stub (front-matter title only)
  ├── setup/
  │   ├── index.md
  │   ├── install.md           # write-once — edits survive re-runs
  │   └── up.md
  └── routesMeta.json          # full route/metadata manifest

Batch mode scans a routes/ directory; routes/docs/guides.yml scaffolds
directories under content/docs/guides/.")]
#[command(version = version_string())]
struct Cli {
    /// Directory the content root is created in
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    /// Name of the content root directory
    #[arg(long, default_value = "content", global = true)]
    root: String,

    /// Outline directory for batch mode
    #[arg(long, default_value = "routes", global = true)]
    routes: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Full generation: folders, markdown stubs, and the routes manifest
    Gen {
        /// Outline YAML file
        outline: PathBuf,
    },
    /// Directory-only scaffold, no files and no manifest
    Dirs {
        /// Outline YAML file
        outline: PathBuf,
    },
    /// Scaffold directories for every outline under the routes directory
    Batch,
    /// Print the navigation menu projection as JSON
    Nav {
        /// Outline YAML file
        outline: PathBuf,
        /// Maximum menu depth (0 emits nothing)
        #[arg(long, default_value_t = 2)]
        depth: usize,
    },
    /// Parse an outline and display its tree without writing anything
    Check {
        /// Outline YAML file
        outline: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Gen { outline } => {
            let tree = ContentTree::from_yaml_file(&outline)?;
            let meta = tree.generate(&cli.output, &cli.root)?;
            output::print_generate_summary(&meta, &cli.output.join(&cli.root));
        }
        Command::Dirs { outline } => {
            let tree = ContentTree::from_yaml_file(&outline)?;
            tree.create_dirs(&cli.output, &cli.root)?;
            println!("Scaffolded {}", cli.output.join(&cli.root).display());
        }
        Command::Batch => {
            let base = cli.output.join(&cli.root);
            let summary = batch::process_outlines(&cli.routes, &base);
            for (path, error) in &summary.failed {
                eprintln!("{path}: {error}");
            }
            output::print_batch_summary(&summary);
        }
        Command::Nav { outline, depth } => {
            let tree = ContentTree::from_yaml_file(&outline)?;
            match tree.navigation(depth) {
                Some(nav) => println!("{}", serde_json::to_string_pretty(&nav)?),
                None => println!("null"),
            }
        }
        Command::Check { outline } => {
            let tree = ContentTree::from_yaml_file(&outline)?;
            output::print_outline(&tree);
            println!("Outline is valid");
        }
    }

    Ok(())
}

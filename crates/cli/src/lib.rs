//! # `sqlgen` Library Crate
//!
//! This crate contains the command-line surface of `sqlgen`: argument parsing,
//! configuration loading and one handler per command. The binary in `main.rs`
//! only sets up logging and calls [`run`].

pub mod config;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sqlgen::providers::factory::{create_ai_provider, create_embedder};
use sqlgen::{
    detect, render, Artifact, ContextProvider, IndexOutcome, OutputTarget, ResetOutcome,
    RetrievalContext, Schema, SchemaRetriever, SchemaTextContext, Session, SqlGeneratorBuilder,
};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::{get_config, AppConfig, ContextMode};

// --- CLI Argument Structs ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a YAML configuration file. Defaults to `config.yml` if present.
    #[arg(long, global = true, env = "SQLGEN_CONFIG")]
    pub config: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the textual description of a schema
    Render(RenderArgs),
    /// List the tables mentioned in a question
    Detect(DetectArgs),
    /// Embed one document per table into a persistent collection
    Index(IndexArgs),
    /// Print the table documents most similar to a question
    Retrieve(RetrieveArgs),
    /// Delete a persisted collection
    Reset(CollectionArgs),
    /// Generate SQL or SQLAlchemy code for a question
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Path to the schema JSON document.
    #[arg(long, short)]
    pub schema: PathBuf,
    /// SQL schema name used to qualify table names.
    #[arg(long, short, default_value = "")]
    pub namespace: String,
}

#[derive(Args, Debug)]
pub struct CollectionArgs {
    /// The collection id. Defaults to the configured collection.
    #[arg(long)]
    pub collection: Option<String>,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,
    /// Tables to include, in order. All tables when omitted.
    #[arg(long, short, value_delimiter = ',')]
    pub tables: Option<Vec<String>>,
}

#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Path to the schema JSON document.
    #[arg(long, short)]
    pub schema: PathBuf,
    /// The question to scan for table names.
    pub question: String,
}

#[derive(Args, Debug)]
pub struct IndexArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,
    #[command(flatten)]
    pub collection: CollectionArgs,
    /// Delete the collection first so schema changes are picked up.
    #[arg(long)]
    pub reindex: bool,
}

#[derive(Args, Debug)]
pub struct RetrieveArgs {
    /// The question to find context for.
    pub question: String,
    #[command(flatten)]
    pub collection: CollectionArgs,
    /// Number of documents to return. Defaults to the configured `top_k`.
    #[arg(short)]
    pub k: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TargetArg {
    Sql,
    Sqlalchemy,
}

impl From<TargetArg> for OutputTarget {
    fn from(value: TargetArg) -> Self {
        match value {
            TargetArg::Sql => OutputTarget::Sql,
            TargetArg::Sqlalchemy => OutputTarget::SqlAlchemy,
        }
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,
    /// The question, in natural language.
    #[arg(long, short, default_value = "")]
    pub question: String,
    /// Tables to use. Detected from the question when omitted.
    #[arg(long, short, value_delimiter = ',')]
    pub tables: Option<Vec<String>>,
    /// Columns to display for a table, as `table=col1,col2`. Repeatable.
    #[arg(long = "columns", value_parser = parse_column_selection)]
    pub columns: Vec<(String, Vec<String>)>,
    /// What to generate.
    #[arg(long, value_enum, default_value_t = TargetArg::Sql)]
    pub target: TargetArg,
    /// Overrides the configured context mode.
    #[arg(long, value_enum)]
    pub context: Option<ContextMode>,
    #[command(flatten)]
    pub collection: CollectionArgs,
    /// Where to save the result; a directory receives `consulta.sql`.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Parses `table=col1,col2` into its table and column names.
pub fn parse_column_selection(value: &str) -> Result<(String, Vec<String>), String> {
    let (table, columns) = value
        .split_once('=')
        .ok_or_else(|| format!("expected `table=col1,col2`, got '{value}'"))?;
    let table = table.trim();
    if table.is_empty() {
        return Err(format!("missing table name in '{value}'"));
    }
    let columns = columns
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect();
    Ok((table.to_string(), columns))
}

// --- Public Entrypoint ---

/// Loads configuration and runs the command.
pub async fn run(cli: Cli) -> Result<()> {
    let config = get_config(cli.config.as_deref())?;
    run_with_config(cli, config).await
}

/// Runs the command with an already loaded configuration.
pub async fn run_with_config(cli: Cli, config: AppConfig) -> Result<()> {
    match cli.command {
        Commands::Render(args) => handle_render(args),
        Commands::Detect(args) => handle_detect(args),
        Commands::Index(args) => handle_index(args, &config).await,
        Commands::Retrieve(args) => handle_retrieve(args, &config).await,
        Commands::Reset(args) => handle_reset(args, &config).await,
        Commands::Generate(args) => handle_generate(args, &config).await,
    }
}

// --- Command Handlers ---

fn load_schema(path: &PathBuf) -> Result<Schema> {
    Schema::from_path(path)
        .with_context(|| format!("Failed to load schema from '{}'", path.display()))
}

fn build_retriever(config: &AppConfig) -> SchemaRetriever {
    SchemaRetriever::new(
        &config.context.persist_dir,
        create_embedder(&config.embedding),
    )
}

fn collection_id<'a>(args: &'a CollectionArgs, config: &'a AppConfig) -> &'a str {
    args.collection
        .as_deref()
        .unwrap_or(&config.context.collection)
}

fn handle_render(args: RenderArgs) -> Result<()> {
    let schema = load_schema(&args.schema.schema)?;
    let tables = args.tables.unwrap_or_else(|| schema.table_names());
    print!("{}", render(&schema, &tables, args.schema.namespace.trim()));
    Ok(())
}

fn handle_detect(args: DetectArgs) -> Result<()> {
    let schema = load_schema(&args.schema)?;
    let tables = detect(&args.question, &schema);
    if tables.is_empty() {
        println!("Nenhuma tabela detectada.");
    }
    for table in tables {
        println!("{table}");
    }
    Ok(())
}

async fn handle_index(args: IndexArgs, config: &AppConfig) -> Result<()> {
    let schema = load_schema(&args.schema.schema)?;
    let retriever = build_retriever(config);
    let collection = collection_id(&args.collection, config);

    if args.reindex && retriever.reset(collection).await? == ResetOutcome::Deleted {
        println!("🧹 Removed existing collection '{collection}'.");
    }

    match retriever
        .index(&schema, args.schema.namespace.trim(), collection)
        .await?
    {
        IndexOutcome::Indexed(count) => {
            println!("✅ Indexed {count} tables into collection '{collection}'.");
        }
        IndexOutcome::AlreadyIndexed => {
            println!(
                "ℹ️ Collection '{collection}' is already indexed; nothing was embedded. \
                 Schema changes are ignored until you run `sqlgen reset` or `sqlgen index --reindex`."
            );
        }
    }
    Ok(())
}

async fn handle_retrieve(args: RetrieveArgs, config: &AppConfig) -> Result<()> {
    let retriever = build_retriever(config);
    let collection = collection_id(&args.collection, config);
    let k = args.k.unwrap_or(config.context.top_k);

    let context = retriever.retrieve(&args.question, collection, k).await?;
    println!("{context}");
    Ok(())
}

async fn handle_reset(args: CollectionArgs, config: &AppConfig) -> Result<()> {
    let retriever = build_retriever(config);
    let collection = collection_id(&args, config);
    match retriever.reset(collection).await? {
        ResetOutcome::Deleted => println!("🧹 Deleted collection '{collection}'."),
        ResetOutcome::NotFound => {
            println!("ℹ️ Collection '{collection}' does not exist; nothing to delete.")
        }
    }
    Ok(())
}

async fn handle_generate(args: GenerateArgs, config: &AppConfig) -> Result<()> {
    let schema = load_schema(&args.schema.schema)?;

    let mut session = Session::new();
    session.set_namespace(&args.schema.namespace);
    if let Some(tables) = args.tables {
        session.set_selection(tables);
    }
    session.set_question(args.question, &schema);
    for (table, columns) in args.columns {
        session.set_columns(table, columns);
    }

    let request = match session.request(args.target.into()) {
        Ok(request) => request,
        Err(e) => {
            warn!("Generation skipped: {e}");
            eprintln!("❗ {e}");
            return Ok(());
        }
    };
    info!("Generating for tables {:?}", request.tables);

    let mode = args.context.unwrap_or(config.context.mode);
    let context_provider: Box<dyn ContextProvider> = match mode {
        ContextMode::Schema => Box::new(SchemaTextContext),
        ContextMode::Retrieval => Box::new(RetrievalContext::new(
            build_retriever(config),
            collection_id(&args.collection, config),
            config.context.top_k,
        )),
    };

    let generator = SqlGeneratorBuilder::new()
        .ai_provider(create_ai_provider(&config.llm).map_err(|e| {
            anyhow!("{e}. Set {} in your .env file.", sqlgen::constants::API_KEY_ENV)
        })?)
        .context_provider(context_provider)
        .build()?;

    let generation = generator.generate(&schema, &request).await?;

    println!("📖 Schema contextualizado:\n{}\n", generation.context);
    println!("{}", generation.code);

    if let Some(output) = args.output {
        let path = Artifact::from_code(&generation.code)
            .write_to(&output)
            .await?;
        println!("💾 Saved to '{}'.", path.display());
    }
    Ok(())
}

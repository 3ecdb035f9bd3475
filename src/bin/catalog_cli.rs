//! Catalog CLI - JSON bridge for the admin and site frontends
//!
//! Commands: resolve, project, select-image, reorder, featured, validate
//! Outputs JSON to stdout, logs to stderr
//! Returns 2 on validation failure, 1 on bad input

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use catalog_core::{
    Catalog, CatalogConfig, FeaturedSlot, FeaturedSlotCurator, GalleryImage, ImageRequest,
    MultilingualField, Product, Project,
};

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(version = catalog_core::ENGINE_VERSION)]
#[command(about = "Catalog CLI - multilingual content and gallery curation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the JSON config file
    #[arg(short, long, default_value = "catalog.json")]
    config: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum EntityKind {
    Product,
    Project,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a multilingual field
    Resolve {
        /// JSON payload (MultilingualField)
        #[arg(short, long)]
        payload: String,

        #[arg(short, long)]
        language: String,

        /// Override the fallback language
        #[arg(short, long)]
        fallback: Option<String>,

        /// Resolve as a list field (tags)
        #[arg(long)]
        list: bool,
    },

    /// Build a localized view of an entity
    Project {
        #[arg(short, long, value_enum)]
        kind: EntityKind,

        /// JSON payload (Product or Project)
        #[arg(short, long)]
        payload: String,

        #[arg(short, long)]
        language: String,
    },

    /// Pick the gallery image for a color/category selection
    SelectImage {
        /// JSON payload (Product)
        #[arg(short, long)]
        payload: String,

        /// JSON selection (ImageRequest)
        #[arg(short, long)]
        selection: String,
    },

    /// Move a gallery image and print the save request
    Reorder {
        /// JSON payload (GalleryImage array)
        #[arg(short, long)]
        payload: String,

        #[arg(long)]
        from: usize,

        #[arg(long)]
        to: usize,
    },

    /// Check a featured-slot list before saving
    Featured {
        /// JSON payload (FeaturedSlot array)
        #[arg(short, long)]
        payload: String,
    },

    /// Validate an entity as the admin form would
    Validate {
        #[arg(short, long, value_enum)]
        kind: EntityKind,

        /// JSON payload (Product or Project)
        #[arg(short, long)]
        payload: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("catalog_core=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match CatalogConfig::load(&cli.config).and_then(CatalogConfig::with_env_overrides) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            print_json(&json!({"error": format!("Failed to load config: {}", e)}));
            return ExitCode::FAILURE;
        }
    };

    let catalog = match Catalog::new(config) {
        Ok(c) => c,
        Err(e) => {
            print_json(&json!({"error": e.to_string()}));
            return ExitCode::FAILURE;
        }
    };

    match run(&catalog, cli.command) {
        Ok(code) => code,
        Err(message) => {
            print_json(&json!({"error": message}));
            ExitCode::FAILURE
        }
    }
}

fn run(catalog: &Catalog, command: Commands) -> Result<ExitCode, String> {
    match command {
        Commands::Resolve { payload, language, fallback, list } => {
            let field: MultilingualField = parse(&payload)?;
            let resolver = catalog.resolver();
            let fallback = fallback.unwrap_or_else(|| resolver.default_language().code().to_string());

            let resolved = if list {
                json!(resolver.resolve_array_with_fallback(&field, &language, &fallback))
            } else {
                json!(resolver.resolve_with_fallback(&field, &language, &fallback))
            };
            print_json(&json!({"resolved": resolved}));
            Ok(ExitCode::SUCCESS)
        }

        Commands::Project { kind, payload, language } => {
            match kind {
                EntityKind::Product => {
                    let product: Product = parse(&payload)?;
                    print_json(&catalog.project_product(&product, &language));
                }
                EntityKind::Project => {
                    let project: Project = parse(&payload)?;
                    print_json(&catalog.project_project(&project, &language));
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::SelectImage { payload, selection } => {
            let product: Product = parse(&payload)?;
            let request: ImageRequest = parse(&selection)?;
            print_json(&catalog.choose_image(&product, &request));
            Ok(ExitCode::SUCCESS)
        }

        Commands::Reorder { payload, from, to } => {
            let gallery: Vec<GalleryImage> = parse(&payload)?;
            let request = catalog
                .reorder_gallery(&gallery, from, to)
                .map_err(|e| e.to_string())?;
            print_json(&request);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Featured { payload } => {
            let slots: Vec<FeaturedSlot> = parse(&payload)?;
            let curator = FeaturedSlotCurator::new(slots);

            match catalog.featured_save_request(&curator) {
                Ok(request) => {
                    info!(slots = request.slots.len(), "featured list valid");
                    print_json(&json!({"valid": true, "request": request}));
                    Ok(ExitCode::SUCCESS)
                }
                Err(catalog_core::CatalogError::Curation(e)) => {
                    print_json(&json!({"valid": false, "code": e.code(), "error": e.to_string()}));
                    Ok(ExitCode::from(2))
                }
                Err(e) => Err(e.to_string()),
            }
        }

        Commands::Validate { kind, payload } => {
            let result = match kind {
                EntityKind::Product => catalog.validate_product(&parse::<Product>(&payload)?),
                EntityKind::Project => catalog.validate_project(&parse::<Project>(&payload)?),
            };
            print_json(&result);
            if result.valid {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(2))  // Validation failure
            }
        }
    }
}

fn parse<T: serde::de::DeserializeOwned>(payload: &str) -> Result<T, String> {
    serde_json::from_str(payload).map_err(|e| format!("Invalid payload: {}", e))
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => error!("failed to encode output: {}", e),
    }
}

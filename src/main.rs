use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use cloudlabel::api::{ApiConfig, ApiError, HttpTemplateClient, ImageUpload, ListQuery, TemplateService};
use cloudlabel::consts::{CANVAS_PRESETS, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use cloudlabel::designer::{Designer, DesignerError};
use cloudlabel::document::{Document, DocumentError};
use cloudlabel::element::PaletteItem;
use cloudlabel::services::template::{self as template_service, RenderMode, TemplateError};
use cloudlabel::template::{LabelData, OutputFormat, TemplateCategory, TemplateId, TemplateMeta};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("unknown canvas preset `{0}`")]
    UnknownPreset(String),
    #[error("invalid data binding `{0}`; expected FIELD=VALUE")]
    InvalidBinding(String),
    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Designer(#[from] DesignerError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "cloudlabel", about = "Label template designer CLI")]
struct Cli {
    #[arg(long, env = "LABEL_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Layout(LayoutCommand),
    Templates(TemplatesCommand),
    Images(ImagesCommand),
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct LayoutCommand {
    #[command(subcommand)]
    command: LayoutSubcommand,
}

#[derive(Subcommand, Debug)]
enum LayoutSubcommand {
    /// Print a new layout, optionally seeded with palette elements.
    New {
        #[arg(long, conflicts_with_all = ["width", "height"])]
        preset: Option<String>,
        #[arg(long, default_value_t = DEFAULT_CANVAS_WIDTH)]
        width: f64,
        #[arg(long, default_value_t = DEFAULT_CANVAS_HEIGHT)]
        height: f64,
        /// Palette items to add, in order (`text`, `dynamic-text`, `logo`, ...).
        #[arg(long = "element")]
        elements: Vec<PaletteItem>,
    },
    /// Summarize a layout file.
    Inspect { path: PathBuf },
}

#[derive(Args, Debug)]
struct TemplatesCommand {
    #[command(subcommand)]
    command: TemplatesSubcommand,
}

#[derive(Subcommand, Debug)]
enum TemplatesSubcommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
        #[arg(long, default_value = "All")]
        category: TemplateCategory,
        /// Only show templates whose name or description contains this text.
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        template_id: TemplateId,
    },
    /// Save a layout file as a template (new, or over an existing one).
    Save {
        path: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "Custom")]
        category: TemplateCategory,
        #[arg(long, default_value_t = false)]
        public: bool,
        /// Update this template instead of creating a new one.
        #[arg(long)]
        template_id: Option<TemplateId>,
    },
    Delete {
        template_id: TemplateId,
    },
    Duplicate {
        template_id: TemplateId,
    },
}

#[derive(Args, Debug)]
struct ImagesCommand {
    #[command(subcommand)]
    command: ImagesSubcommand,
}

#[derive(Subcommand, Debug)]
enum ImagesSubcommand {
    /// Upload an image file and print its URL.
    Upload { path: PathBuf },
    /// Upload an image into an image element of a layout file, rewriting the file.
    Attach {
        layout: PathBuf,
        #[arg(long)]
        element: String,
        image: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    template_id: TemplateId,
    /// Field binding, repeatable.
    #[arg(long = "data", value_name = "FIELD=VALUE")]
    data: Vec<String>,
    /// Render a preview in this format instead of a print PDF.
    #[arg(long)]
    preview: Option<OutputFormat>,
    #[arg(long, short)]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "failed to load .env");
        }
    }

    let cli = Cli::parse();
    let mut config = ApiConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config.base_url = cloudlabel::api::config::normalize_base_url(&url);
    }

    match cli.command {
        Command::Layout(layout) => run_layout(&config, layout).await,
        Command::Templates(templates) => {
            let client = HttpTemplateClient::from_config(&config)?;
            run_templates(&client, &config, templates).await
        }
        Command::Images(images) => {
            let client = HttpTemplateClient::from_config(&config)?;
            run_images(&client, &config, images).await
        }
        Command::Render(args) => {
            let client = HttpTemplateClient::from_config(&config)?;
            run_render(&client, args).await
        }
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

async fn run_layout(config: &ApiConfig, layout: LayoutCommand) -> Result<(), CliError> {
    match layout.command {
        LayoutSubcommand::New { preset, width, height, elements } => {
            let (width, height) = match preset {
                Some(name) => preset_size(&name)?,
                None => (width, height),
            };
            let mut designer = Designer::with_history_limit(config.history_limit);
            designer.new_template(width, height);
            for item in elements {
                designer.add(item.draft())?;
            }
            let doc = designer.document().ok_or(DesignerError::NoActiveDocument)?;
            println!("{}", serde_json::to_string_pretty(doc)?);
            Ok(())
        }
        LayoutSubcommand::Inspect { path } => {
            let doc = Document::from_layout_json(&read_file(&path).await?)?;
            print_summary(&doc);
            Ok(())
        }
    }
}

fn preset_size(name: &str) -> Result<(f64, f64), CliError> {
    CANVAS_PRESETS
        .iter()
        .find(|(preset, _, _)| preset.eq_ignore_ascii_case(name))
        .map(|&(_, w, h)| (w, h))
        .ok_or_else(|| CliError::UnknownPreset(name.to_owned()))
}

fn print_summary(doc: &Document) {
    println!("canvas: {} x {} ({})", doc.width, doc.height, doc.background_color);
    println!("elements: {}", doc.len());
    for el in doc.paint_order() {
        println!(
            "  z={:<4} {:<10} {:<32} at ({}, {}) size {} x {}",
            el.z_index,
            el.kind().as_str(),
            el.id,
            el.x,
            el.y,
            el.width,
            el.height
        );
    }
    let fields = doc.required_fields();
    if !fields.is_empty() {
        println!("required fields: {}", fields.join(", "));
    }
}

// =============================================================================
// TEMPLATES
// =============================================================================

async fn run_templates(
    client: &dyn TemplateService,
    config: &ApiConfig,
    templates: TemplatesCommand,
) -> Result<(), CliError> {
    match templates.command {
        TemplatesSubcommand::List { page, limit, category, search } => {
            let mut listing = client.list_templates(ListQuery { page, limit, category }).await?;
            if let Some(query) = search {
                listing = listing.search(&query);
            }
            for t in &listing.data {
                println!("{:>6}  {:<10} {}", t.template_id, t.category, t.name);
            }
            eprintln!("page {}/{} ({} total)", listing.page, listing.total_pages, listing.total);
            Ok(())
        }
        TemplatesSubcommand::Show { template_id } => {
            let mut designer = Designer::with_history_limit(config.history_limit);
            let (template, warning) = template_service::open_template(client, template_id, &mut designer).await?;
            println!("{} (#{}) [{}]", template.name, template.template_id, template.category);
            if let Some(e) = warning {
                eprintln!("warning: layout unreadable ({e}); showing a blank canvas");
            }
            if let Some(doc) = designer.document() {
                print_summary(doc);
            }
            Ok(())
        }
        TemplatesSubcommand::Save { path, name, description, category, public, template_id } => {
            let doc = Document::from_layout_json(&read_file(&path).await?)?;
            let mut designer = Designer::with_history_limit(config.history_limit);
            designer.load(doc);
            let meta = TemplateMeta { name, description, category, is_public: public };
            let saved = template_service::save_template(client, &mut designer, &meta, template_id).await?;
            println!("{}", saved.template_id);
            Ok(())
        }
        TemplatesSubcommand::Delete { template_id } => {
            client.delete_template(template_id).await?;
            Ok(())
        }
        TemplatesSubcommand::Duplicate { template_id } => {
            let copy = client.duplicate_template(template_id).await?;
            println!("{}", copy.template_id);
            Ok(())
        }
    }
}

// =============================================================================
// IMAGES
// =============================================================================

async fn run_images(client: &dyn TemplateService, config: &ApiConfig, images: ImagesCommand) -> Result<(), CliError> {
    match images.command {
        ImagesSubcommand::Upload { path } => {
            let url = client.upload_image(&read_image(&path).await?).await?;
            println!("{url}");
            Ok(())
        }
        ImagesSubcommand::Attach { layout, element, image } => {
            let doc = Document::from_layout_json(&read_file(&layout).await?)?;
            let mut designer = Designer::with_history_limit(config.history_limit);
            designer.load(doc);
            let upload = read_image(&image).await?;
            let url = template_service::attach_image(client, &mut designer, &element, &upload).await?;
            let doc = designer.document().ok_or(DesignerError::NoActiveDocument)?;
            tokio::fs::write(&layout, doc.to_layout_json()?)
                .await
                .map_err(|source| CliError::Io { path: layout.clone(), source })?;
            println!("{url}");
            Ok(())
        }
    }
}

async fn read_image(path: &Path) -> Result<ImageUpload, CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
    let file_name = path
        .file_name()
        .map_or_else(|| "image".to_owned(), |n| n.to_string_lossy().into_owned());
    Ok(ImageUpload { file_name, bytes })
}

// =============================================================================
// RENDER
// =============================================================================

async fn run_render(client: &dyn TemplateService, args: RenderArgs) -> Result<(), CliError> {
    let data = parse_bindings(&args.data)?;
    let template = client.get_template(args.template_id).await?;
    let mode = match args.preview {
        Some(format) => RenderMode::Preview(format),
        None => RenderMode::Generate,
    };
    let rendered = template_service::render_label(client, &template, data, mode).await?;
    tokio::fs::write(&args.output, &rendered.bytes)
        .await
        .map_err(|source| CliError::Io { path: args.output.clone(), source })?;
    eprintln!("wrote {} bytes to {}", rendered.bytes.len(), args.output.display());
    Ok(())
}

fn parse_bindings(raw: &[String]) -> Result<LabelData, CliError> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .filter(|(field, _)| !field.trim().is_empty())
                .map(|(field, value)| (field.trim().to_owned(), value.to_owned()))
                .ok_or_else(|| CliError::InvalidBinding(pair.clone()))
        })
        .collect()
}

async fn read_file(path: &Path) -> Result<String, CliError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Io { path: path.to_path_buf(), source })
}

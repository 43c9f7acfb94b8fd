//! undeck CLI - presentation model to text markup

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use undeck::{Dialect, JsonFormat, RenderOptions, Undeck};

#[derive(Parser)]
#[command(name = "undeck")]
#[command(version)]
#[command(about = "Render slide presentations to Markdown, wikitext, Quarto, Marp, and Beamer", long_about = None)]
struct Cli {
    /// Input presentation model (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render to one or more dialects and write output files
    Convert {
        /// Input presentation model (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Target dialect (repeatable; all dialects if omitted)
        #[arg(short, long, value_name = "DIALECT")]
        dialect: Vec<Dialect>,

        #[command(flatten)]
        flags: RenderFlags,
    },

    /// Render one dialect to stdout or a file
    Render {
        /// Input presentation model (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Target dialect
        #[arg(short, long, value_name = "DIALECT", default_value = "markdown")]
        dialect: Dialect,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        flags: RenderFlags,
    },

    /// Re-serialize the presentation model as JSON
    Json {
        /// Input presentation model (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show presentation information
    Info {
        /// Input presentation model (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone, Default)]
struct RenderFlags {
    /// Disable dialect-specific character escaping
    #[arg(long)]
    no_escaping: bool,

    /// Disable color markup for colored text runs
    #[arg(long)]
    no_color: bool,

    /// Omit presenter notes
    #[arg(long)]
    no_notes: bool,

    /// Emit a separator between slides
    #[arg(long)]
    slides: bool,

    /// Keep near-duplicate consecutive titles with a " (cont.)" suffix
    #[arg(long)]
    keep_similar_titles: bool,

    /// Default image display width in pixels
    #[arg(long, value_name = "PX")]
    image_width: Option<u32>,

    /// Source slide canvas size, e.g. "1600x900"
    #[arg(long, value_name = "WxH")]
    slide_size: Option<String>,

    /// Emit image captions from alt text (Beamer)
    #[arg(long)]
    captions: bool,

    /// Do not float left/right images in wrap environments (Beamer)
    #[arg(long)]
    no_image_wrapping: bool,

    /// Use lstlisting instead of verbatim for code blocks (Beamer)
    #[arg(long)]
    listings: bool,
}

impl RenderFlags {
    fn to_options(&self) -> Result<RenderOptions, Box<dyn std::error::Error>> {
        let mut options = RenderOptions::new()
            .with_escaping(!self.no_escaping)
            .with_color(!self.no_color)
            .with_notes(!self.no_notes)
            .with_slide_separators(self.slides)
            .with_similar_titles(self.keep_similar_titles);

        if let Some(width) = self.image_width {
            options = options.with_image_width(width);
        }
        if let Some(ref size) = self.slide_size {
            let (w, h) = parse_slide_size(size)?;
            options = options.with_slide_size(w, h);
        }
        options.disable_captions = !self.captions;
        options.disable_image_wrapping = self.no_image_wrapping;
        options.use_listings = self.listings;

        Ok(options)
    }
}

fn parse_slide_size(text: &str) -> Result<(u32, u32), String> {
    let parse = |part: Option<&str>| {
        part.and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
    };
    let mut parts = text.splitn(2, 'x');
    match (parse(parts.next()), parse(parts.next())) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(format!(
            "Invalid slide size '{text}', expected WIDTHxHEIGHT like 1600x900"
        )),
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            dialect,
            flags,
        }) => cmd_convert(&input, output.as_deref(), &dialect, &flags),
        Some(Commands::Render {
            input,
            dialect,
            output,
            flags,
        }) => cmd_render(&input, dialect, output.as_deref(), &flags),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &[], &RenderFlags::default())
            } else {
                println!("{}", "Usage: undeck <FILE> [OUTPUT]".yellow());
                println!("       undeck --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    dialects: &[Dialect],
    flags: &RenderFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    let stem = input
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(format!("{}_output", stem)));

    let deck = undeck::load_json(input)?;

    let targets = if dialects.is_empty() {
        &Dialect::ALL[..]
    } else {
        dialects
    };
    let undeck = Undeck::new()
        .with_dialects(targets)
        .with_options(flags.to_options()?);

    let written = undeck.write_to(&deck, &output_dir, &stem)?;

    println!("\n{}", "Output files:".green().bold());
    for (i, path) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        println!("  {} {}", branch.dimmed(), name);
    }

    Ok(())
}

fn cmd_render(
    input: &Path,
    dialect: Dialect,
    output: Option<&Path>,
    flags: &RenderFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    let deck = undeck::load_json(input)?;
    let text = undeck::render::render_dialect(&deck, dialect, &flags.to_options()?)?;

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let deck = undeck::load_json(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = undeck::to_json(&deck, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let deck = undeck::load_json(input)?;

    println!("{}", "Presentation Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Slides".bold(), deck.slide_count());

    let mut titles = 0usize;
    let mut paragraphs = 0usize;
    let mut list_items = 0usize;
    let mut images = 0usize;
    let mut tables = 0usize;
    let mut code_blocks = 0usize;
    let mut formulas = 0usize;
    let mut notes = 0usize;

    for slide in &deck.slides {
        notes += slide.notes().len();
        for element in slide.flattened_elements() {
            match element.type_name() {
                "Title" => titles += 1,
                "Paragraph" => paragraphs += 1,
                "ListItem" => list_items += 1,
                "Image" => images += 1,
                "Table" => tables += 1,
                "CodeBlock" => code_blocks += 1,
                "Formula" => formulas += 1,
                _ => {}
            }
        }
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Titles".bold(), titles);
    println!("{}: {}", "Paragraphs".bold(), paragraphs);
    println!("{}: {}", "List items".bold(), list_items);
    println!("{}: {}", "Images".bold(), images);
    println!("{}: {}", "Tables".bold(), tables);
    println!("{}: {}", "Code blocks".bold(), code_blocks);
    println!("{}: {}", "Formulas".bold(), formulas);
    println!("{}: {}", "Note lines".bold(), notes);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "undeck".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Slide presentation rendering tool");
    println!();
    println!("{}", "Supported dialects:".bold());
    for dialect in Dialect::ALL {
        println!("  {} ({})", dialect, dialect.extension());
    }
}

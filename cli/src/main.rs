//! pdfword CLI - PDF to Word conversion with Arabic OCR fallback

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfword::{
    sniff_path, ErrorMode, PageGallery, PageSegmentationMode, PageSelection, PdfDocument,
    Pdfword, ResolveOptions, TextSource,
};

#[derive(Parser)]
#[command(name = "pdfword")]
#[command(version)]
#[command(about = "Convert PDFs to Word with Arabic shaping and OCR fallback", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalOpts {
    /// Tesseract executable
    #[arg(long, global = true, env = "PDFWORD_TESSERACT", value_name = "PATH")]
    tesseract: Option<PathBuf>,

    /// OCR language model(s), e.g. "ara" or "ara+eng"
    #[arg(long, global = true, default_value = "ara")]
    lang: String,

    /// Tesseract page segmentation mode
    #[arg(long, global = true, default_value_t = 6)]
    psm: u8,

    /// Directory containing the PDFium library
    #[arg(long, global = true, env = "PDFIUM_LIB_DIR", value_name = "DIR")]
    pdfium_lib: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the text of every page (text layer or OCR)
    Text {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print per-page JSON including the text source
        #[arg(long)]
        json: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Convert PDF to a Word document
    Convert {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output .docx file (defaults to <FILE stem>.docx)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Font for the document and every run
        #[arg(long, default_value = "Arial")]
        font: String,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Abort on the first page that fails instead of skipping it
        #[arg(long)]
        strict: bool,
    },

    /// Render every page to PNG images
    View {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory (defaults to <FILE stem>_pages)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Rendering resolution
        #[arg(long, default_value_t = 72.0)]
        dpi: f32,
    },

    /// Write edited text into <FILE stem>_edited.pdf
    Edit {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Read the edited text from this file (stdin if not specified)
        #[arg(long, value_name = "FILE")]
        text_file: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

impl GlobalOpts {
    fn builder(&self) -> Result<Pdfword, Box<dyn std::error::Error>> {
        let psm = PageSegmentationMode::from_value(self.psm)
            .ok_or_else(|| format!("Unsupported page segmentation mode: {}", self.psm))?;

        let mut builder = Pdfword::new().with_language(&self.lang).with_psm(psm);
        if let Some(ref program) = self.tesseract {
            builder = builder.with_tesseract(program);
        }
        if let Some(ref dir) = self.pdfium_lib {
            builder = builder.with_library_dir(dir);
        }
        log::debug!("OCR language {}, psm {}", self.lang, self.psm);
        Ok(builder)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let global = &cli.global;

    let result = match cli.command {
        Commands::Text {
            input,
            output,
            json,
            pages,
        } => cmd_text(global, &input, output.as_deref(), json, pages.as_deref()),
        Commands::Convert {
            input,
            output,
            font,
            pages,
            strict,
        } => cmd_convert(
            global,
            &input,
            output.as_deref(),
            &font,
            pages.as_deref(),
            strict,
        ),
        Commands::View { input, output, dpi } => cmd_view(global, &input, output.as_deref(), dpi),
        Commands::Edit { input, text_file } => cmd_edit(global, &input, text_file.as_deref()),
        Commands::Info { input } => cmd_info(&input),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_pages(pages: Option<&str>) -> Result<PageSelection, Box<dyn std::error::Error>> {
    match pages {
        Some(p) => Ok(PageSelection::parse(p)?),
        None => Ok(PageSelection::All),
    }
}

fn cmd_text(
    global: &GlobalOpts,
    input: &Path,
    output: Option<&Path>,
    json: bool,
    pages: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    sniff_path(input)?;
    let page_selection = parse_pages(pages)?;

    // Lenient: a page that fails OCR should not hide the others
    let resolver = global
        .builder()?
        .lenient()
        .with_pages(page_selection)
        .resolver();
    let document = PdfDocument::open(input)?;

    let content = if json {
        serde_json::to_string_pretty(&resolver.resolve_document(&document)?)?
    } else {
        resolver.preview_text(&document)?
    };

    if let Some(path) = output {
        fs::write(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn cmd_convert(
    global: &GlobalOpts,
    input: &Path,
    output: Option<&Path>,
    font: &str,
    pages: Option<&str>,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    sniff_path(input)?;
    let page_selection = parse_pages(pages)?;
    let dest = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| input.with_extension("docx"));

    let error_mode = if strict {
        ErrorMode::Strict
    } else {
        ErrorMode::Lenient
    };
    let builder = global.builder()?.with_font(font);
    let resolver = builder.resolver().with_options(
        ResolveOptions::new()
            .with_error_mode(error_mode)
            .with_pages(page_selection.clone()),
    );

    let document = PdfDocument::open(input)?;
    let total = document
        .page_numbers()
        .filter(|page| page_selection.includes(*page))
        .count();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let report = builder
        .exporter()
        .export_document(&resolver, &document, &dest, |page| {
            pb.set_message(format!("page {}", page.page));
            pb.inc(1);
        })?;
    pb.finish_with_message("Done!");

    println!(
        "\n{} {}",
        "Converted successfully:".green().bold(),
        report.path.display()
    );
    println!("  {} {} paragraphs", "├─".dimmed(), report.paragraphs);
    println!(
        "  {} {} pages from text layer",
        "├─".dimmed(),
        report.count(TextSource::TextLayer)
    );
    println!(
        "  {} {} pages by OCR",
        "├─".dimmed(),
        report.count(TextSource::Ocr)
    );
    println!(
        "  {} {} pages without text",
        "└─".dimmed(),
        report.count(TextSource::Empty) + report.count(TextSource::Failed)
    );

    Ok(())
}

fn cmd_view(
    global: &GlobalOpts,
    input: &Path,
    output: Option<&Path>,
    dpi: f32,
) -> Result<(), Box<dyn std::error::Error>> {
    sniff_path(input)?;
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_pages", stem))
    });

    let renderer = global.builder()?.with_dpi(dpi).renderer();
    let document = PdfDocument::open(input)?;

    let mut gallery = PageGallery::new();
    renderer.render_into(&document, &mut gallery)?;

    for path in gallery.save_png_dir(&output_dir)? {
        println!("{} {}", "Rendered".green(), path.display());
    }
    println!(
        "\n{} {} pages rendered",
        "Done!".green().bold(),
        gallery.len()
    );

    Ok(())
}

fn cmd_edit(
    global: &GlobalOpts,
    input: &Path,
    text_file: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    sniff_path(input)?;
    let text = match text_file {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    };

    let path = global.builder()?.rewriter().save(input, &text)?;
    println!("{} {}", "Saved edited PDF to".green().bold(), path.display());

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let document = PdfDocument::open(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), document.version());
    println!("{}: {}", "Pages".bold(), document.page_count());
    println!(
        "{}: {}",
        "Encrypted".bold(),
        if document.is_encrypted() { "Yes" } else { "No" }
    );

    println!();
    println!("{}", "Text Layer".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let mut needs_ocr = 0;
    for page in document.page_numbers() {
        let status = match document.has_text_layer(page) {
            Ok(true) => "text".green(),
            Ok(false) => {
                needs_ocr += 1;
                "OCR".yellow()
            }
            Err(_) => {
                needs_ocr += 1;
                "unreadable".red()
            }
        };
        println!("{} {}: {}", "Page".bold(), page, status);
    }

    println!();
    println!("{}: {}", "Pages needing OCR".bold(), needs_ocr);

    Ok(())
}

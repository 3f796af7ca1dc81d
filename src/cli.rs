//! Command-line front end.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use labelkit_core::{BarcodeSymbology, Product, SizePreset};
use labelkit_designer::renderer::DEFAULT_PRINT_TITLE;
use labelkit_designer::{
    read_logo, render_preview, BarcodeImage, BarcodeSource, HtmlFileSurface, LabelDesignFile, LabelDocument,
    PreviewOptions, PrintOptions, ProductLabel, SvgBarcodeGenerator, TemplateStore,
};
use labelkit_settings::{default_config_path, Config};

/// LabelKit - product label designer
#[derive(Parser, Debug)]
#[command(name = "labelkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (.toml or .json)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Template store, overriding the configured one
    #[arg(long, global = true, value_name = "FILE")]
    pub templates: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty design file
    New {
        /// Design name
        #[arg(long)]
        name: String,

        /// small, medium, large or custom; the configured default when omitted
        #[arg(long)]
        preset: Option<SizePreset>,

        /// PNG or JPEG logo to show on the label
        #[arg(long, value_name = "FILE")]
        logo: Option<PathBuf>,

        /// Output design file
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Render a label design as a print page
    Print {
        /// Design file; the product's attached design when omitted
        #[arg(long, value_name = "FILE")]
        design: Option<PathBuf>,

        /// Product record (JSON)
        #[arg(long, value_name = "FILE")]
        product: PathBuf,

        /// Output HTML file
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Do not open the print dialog when the page loads
        #[arg(long)]
        no_auto_print: bool,
    },

    /// Render the interactive editor canvas for a design
    Preview {
        /// Design file
        #[arg(long, value_name = "FILE")]
        design: PathBuf,

        /// Output HTML file (stdout when omitted)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Manage label templates
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Render a barcode as SVG
    Barcode {
        /// Value to encode
        #[arg(long)]
        value: String,

        /// CODE128, EAN13 or UPC
        #[arg(long, default_value = "CODE128")]
        symbology: BarcodeSymbology,

        /// Output SVG file (stdout when omitted)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TemplateAction {
    /// List template names
    List,

    /// Save the layout of a design file as a template
    Save {
        #[arg(long)]
        name: String,

        #[arg(long, value_name = "FILE")]
        design: PathBuf,
    },

    /// Build a design for a product from a template
    Apply {
        #[arg(long)]
        name: String,

        /// Product record (JSON)
        #[arg(long, value_name = "FILE")]
        product: PathBuf,

        /// Output design file (stdout when omitted)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Delete a template
    Remove {
        #[arg(long)]
        name: String,
    },
}

/// Runs a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let template_path = cli
        .templates
        .clone()
        .unwrap_or_else(|| config.templates.resolved_path());

    match cli.command {
        Commands::New {
            name,
            preset,
            logo,
            out,
        } => {
            let preset = preset.unwrap_or(config.designer.default_preset);
            let mut document = LabelDocument::with_preset(preset);
            if let Some(path) = logo {
                let data_uri = read_logo(&path)
                    .await
                    .with_context(|| format!("Failed to load logo {}", path.display()))?;
                document = document.set_logo(data_uri);
            }
            let mut file = LabelDesignFile::new(name, document);
            file.save_to_file(&out)?;
            println!("{}", out.display());
        }

        Commands::Print {
            design,
            product,
            out,
            no_auto_print,
        } => {
            let product = load_product(&product)?;
            let document = match design {
                Some(path) => load_design(&path)?,
                None => ProductLabel::design_of(&product),
            };
            let out = out.unwrap_or_else(|| {
                config
                    .print
                    .output_directory
                    .join(format!("{}.html", file_stem_for(&product)))
            });
            let options = PrintOptions {
                title: if config.print.page_title.trim().is_empty() {
                    DEFAULT_PRINT_TITLE.to_string()
                } else {
                    config.print.page_title.clone()
                },
                auto_print: config.print.auto_print && !no_auto_print,
            };
            let mut surface = HtmlFileSurface::new(&out);
            labelkit_designer::print_label(&document, &options, &mut surface)?;
            println!("{}", out.display());
        }

        Commands::Preview { design, out } => {
            let document = load_design(&design)?;
            let html = render_preview(&document, &PreviewOptions::default());
            write_output(out.as_deref(), &html)?;
        }

        Commands::Template { action } => run_template(action, &template_path)?,

        Commands::Barcode {
            value,
            symbology,
            out,
        } => {
            let image = SvgBarcodeGenerator::new().render(&value, symbology)?;
            write_output(out.as_deref(), image.as_content())?;
        }
    }

    Ok(())
}

fn run_template(action: TemplateAction, template_path: &Path) -> Result<()> {
    match action {
        TemplateAction::List => {
            let store = TemplateStore::new(template_path)?;
            for name in store.list() {
                println!("{}", name);
            }
        }
        TemplateAction::Save { name, design } => {
            let document = load_design(&design)?;
            let mut store = TemplateStore::new(template_path)?;
            store.save(&name, &document)?;
            println!("Saved template '{}'", name.trim());
        }
        TemplateAction::Apply { name, product, out } => {
            let product = load_product(&product)?;
            let store = TemplateStore::new(template_path)?;
            let barcode = product_barcode(&product);
            let logo = ProductLabel::design_of(&product).logo;
            let document = store
                .get(&name)?
                .instantiate(&product, barcode.as_ref(), logo);
            let mut file = LabelDesignFile::new(name, document);
            match out {
                Some(path) => {
                    file.save_to_file(&path)?;
                    println!("{}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&file)?),
            }
        }
        TemplateAction::Remove { name } => {
            let mut store = TemplateStore::new(template_path)?;
            store.remove(&name)?;
            println!("Removed template '{}'", name);
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            let path = default_config_path();
            Config::load_or_default(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
    }
}

fn load_product(path: &Path) -> Result<Product> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read product {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid product record {}", path.display()))
}

fn load_design(path: &Path) -> Result<LabelDocument> {
    let file = LabelDesignFile::load_from_file(path)?;
    info!(
        "Loaded design '{}' ({} elements)",
        file.metadata.name,
        file.design.element_count()
    );
    Ok(file.design)
}

/// Barcode for the product's own value, if it has a valid one.
fn product_barcode(product: &Product) -> Option<BarcodeImage> {
    let value = product.barcode()?;
    match SvgBarcodeGenerator::new().render(value, product.barcode_type) {
        Ok(image) => Some(image),
        Err(e) => {
            warn!("Skipping barcode for product: {}", e);
            None
        }
    }
}

fn file_stem_for(product: &Product) -> String {
    let stem: String = product
        .name()
        .unwrap_or("label")
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "label".to_string()
    } else {
        stem
    }
}

fn write_output(out: Option<&Path>, content: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_print() {
        let cli = Cli::parse_from([
            "labelkit",
            "print",
            "--design",
            "d.json",
            "--product",
            "p.json",
            "--out",
            "label.html",
        ]);
        match cli.command {
            Commands::Print {
                design,
                product,
                out,
                no_auto_print,
            } => {
                assert_eq!(design, Some(PathBuf::from("d.json")));
                assert_eq!(product, PathBuf::from("p.json"));
                assert_eq!(out, Some(PathBuf::from("label.html")));
                assert!(!no_auto_print);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_barcode_symbology() {
        let cli = Cli::parse_from(["labelkit", "barcode", "--value", "036000291452", "--symbology", "upc"]);
        match cli.command {
            Commands::Barcode { symbology, .. } => assert_eq!(symbology, BarcodeSymbology::Upc),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem_for(&Product::named("Oat Milk 1L")), "Oat_Milk_1L");
        assert_eq!(file_stem_for(&Product::default()), "label");
    }
}

use clap::{Args, Parser, Subcommand};
use log::info;
use signgen::config::{CONFIG_FILE_NAME, default_output_path};
use signgen::preview::{DEFAULT_COLUMNS, render_ascii};
use signgen::request::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use signgen::{
    AppConfig, Background, CanvasSize, FontChoice, FontLibrary, InkColor, Signature,
    SignatureError, SignatureForm,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Creates signature images from a typed name.")]
struct Cli {
    #[clap(long, default_value = CONFIG_FILE_NAME, help = "Path of the TOML config file.")]
    config: PathBuf,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the signature and show it in the terminal.
    Preview {
        #[clap(flatten)]
        style: StyleArgs,
        #[clap(long, help = "Width of the terminal preview in characters.")]
        columns: Option<u32>,
    },
    /// Render the signature and write it as a PNG file.
    Save {
        #[clap(flatten)]
        style: StyleArgs,
        #[clap(short, long, help = "Output PNG path (.png is added when missing).")]
        output: Option<PathBuf>,
    },
    /// List the fonts in the catalog.
    Fonts,
    /// List the preset ink colors.
    Colors,
}

#[derive(Args, Debug)]
struct StyleArgs {
    #[clap(short, long, help = "Name to render as a signature.")]
    name: Option<String>,
    #[clap(short, long, conflicts_with = "font_file", help = "Catalog font key or label.")]
    font: Option<String>,
    #[clap(long, help = "Path to a custom .ttf/.otf font file.")]
    font_file: Option<PathBuf>,
    #[clap(short, long, help = "Font size (30-150).")]
    size: Option<f32>,
    #[clap(short, long, value_parser = parse_color_arg, help = "Ink color, e.g. black or #1e40af.")]
    color: Option<InkColor>,
    #[clap(short, long, value_parser = parse_background_arg, help = "white, transparent or a color.")]
    background: Option<Background>,
    #[clap(long)]
    bold: bool,
    #[clap(long)]
    shadow: bool,
    #[clap(long)]
    underline: bool,
    #[clap(long, help = "Canvas width in pixels.")]
    width: Option<u32>,
    #[clap(long, help = "Canvas height in pixels.")]
    height: Option<u32>,
}

fn parse_color_arg(s: &str) -> Result<InkColor, String> {
    s.parse().map_err(|e: SignatureError| e.to_string())
}

fn parse_background_arg(s: &str) -> Result<Background, String> {
    s.parse().map_err(|e: SignatureError| e.to_string())
}

/// Fills the form from config values first, then lets the flags override them.
fn build_form(style: StyleArgs, config: &AppConfig, config_path: &Path) -> SignatureForm {
    let mut form = SignatureForm::new();
    form.name = style.name.unwrap_or_default();

    form.font = match (style.font_file, style.font, config.font.clone()) {
        (Some(path), _, _) => FontChoice::File(path),
        (None, Some(name), _) | (None, None, Some(name)) => FontChoice::Catalog(name),
        (None, None, None) => FontChoice::default(),
    };

    if let Some(size) = style.size.or(config.font_size) {
        form.size = size;
    }
    form.ink = style.color.unwrap_or_else(|| config.ink_color(config_path));
    form.background = style
        .background
        .unwrap_or_else(|| config.background(config_path));
    form.effects.bold = style.bold;
    form.effects.shadow = style.shadow;
    form.effects.underline = style.underline;

    let default_canvas = CanvasSize::default();
    form.canvas = CanvasSize::new(
        style.width.or(config.canvas_width).unwrap_or(default_canvas.width),
        style.height.or(config.canvas_height).unwrap_or(default_canvas.height),
    );
    form
}

fn report_fallback(signature: &Signature) {
    if let Some(fallback) = &signature.fallback {
        eprintln!(
            "⚠️ Could not load font {} ({}), using the bundled font instead.",
            fallback.path.display(),
            fallback.reason
        );
    }
}

fn run(cli: Cli) -> Result<(), SignatureError> {
    let config = AppConfig::load_or_default(&cli.config);
    let fonts = FontLibrary::new(config.catalog(), config.fonts_dir())?;

    match cli.command {
        Command::Preview { style, columns } => {
            let mut form = build_form(style, &config, &cli.config);
            let columns = columns.or(config.preview_columns).unwrap_or(DEFAULT_COLUMNS);
            let signature = form.preview(&fonts)?;
            report_fallback(signature);
            print!("{}", render_ascii(&signature.image, columns));
            let p = signature.placement;
            println!(
                "Signature {}x{} at ({}, {}) on a {}x{} canvas, ink {}, background {}",
                p.width,
                p.height,
                p.left,
                p.top,
                form.canvas.width,
                form.canvas.height,
                form.ink.label(),
                form.background
            );
        }
        Command::Save { style, output } => {
            let form = build_form(style, &config, &cli.config);
            let output = output
                .or_else(|| config.output.clone())
                .unwrap_or_else(|| default_output_path(&form.name));
            let saved = form.save(&fonts, &output)?;
            report_fallback(&saved.signature);
            println!("✅ Signature saved as {}", saved.path.display());
        }
        Command::Fonts => {
            println!(
                "Fonts in {} (sizes {}-{}):",
                fonts.fonts_dir().display(),
                MIN_FONT_SIZE,
                MAX_FONT_SIZE
            );
            for entry in fonts.catalog() {
                let missing = if fonts.entry_path(entry).is_file() {
                    ""
                } else {
                    "  [missing, bundled font will be used]"
                };
                println!("  {:<16} {:<20} {}{}", entry.key, entry.label, entry.file, missing);
            }
        }
        Command::Colors => {
            for color in InkColor::presets() {
                println!("  {}", color);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    info!("Using config file: {}", cli.config.display());
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("⚠️ {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signgen::request::DEFAULT_FONT_SIZE;

    const CONFIG_PATH: &str = "signgen.toml";

    fn config(content: &str) -> AppConfig {
        AppConfig::from_toml(Path::new(CONFIG_PATH), content).unwrap()
    }

    fn form(args: &[&str], config: &AppConfig) -> SignatureForm {
        let argv = ["signgen", "preview", "--name", "Ada"]
            .into_iter()
            .chain(args.iter().copied());
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Preview { style, .. } => build_form(style, config, Path::new(CONFIG_PATH)),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn font_file_beats_font_beats_config() {
        let allura = config("font = \"allura\"");
        assert_eq!(
            form(&["--font-file", "mine.otf"], &allura).font,
            FontChoice::File(PathBuf::from("mine.otf"))
        );
        assert_eq!(
            form(&["--font", "parisienne"], &allura).font,
            FontChoice::Catalog("parisienne".into())
        );
        assert_eq!(form(&[], &allura).font, FontChoice::Catalog("allura".into()));
        assert_eq!(form(&[], &AppConfig::default()).font, FontChoice::default());
    }

    #[test]
    fn font_and_font_file_conflict() {
        let parsed = Cli::try_parse_from([
            "signgen", "save", "--name", "Ada", "--font", "allura", "--font-file", "mine.ttf",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn size_flag_beats_config_size() {
        let big = config("font_size = 120");
        assert_eq!(form(&["--size", "40"], &big).size, 40.0);
        assert_eq!(form(&[], &big).size, 120.0);
        assert_eq!(form(&[], &AppConfig::default()).size, DEFAULT_FONT_SIZE);
    }

    #[test]
    fn canvas_falls_back_per_side() {
        let small = config("canvas_width = 600\ncanvas_height = 200");
        assert_eq!(form(&["--width", "700"], &small).canvas, CanvasSize::new(700, 200));
        assert_eq!(form(&["--height", "250"], &small).canvas, CanvasSize::new(600, 250));
        assert_eq!(form(&[], &small).canvas, CanvasSize::new(600, 200));
        assert_eq!(
            form(&["--width", "1000"], &AppConfig::default()).canvas,
            CanvasSize::new(1000, 300)
        );
        assert_eq!(form(&[], &AppConfig::default()).canvas, CanvasSize::default());
    }

    #[test]
    fn color_flags_beat_config_colors() {
        let styled = config("ink_color = \"#1e40af\"\nbackground = \"transparent\"");
        let from_config = form(&[], &styled);
        assert_eq!(from_config.ink, InkColor::rgb(0x1e, 0x40, 0xaf));
        assert_eq!(from_config.background, Background::Transparent);

        let from_flags = form(&["--color", "red", "--background", "white"], &styled);
        assert_eq!(from_flags.ink, InkColor::rgb(255, 0, 0));
        assert_eq!(from_flags.background, Background::White);
    }

    #[test]
    fn bad_config_colors_use_defaults() {
        let broken = config("ink_color = \"sparkly\"\nbackground = \"striped\"");
        let form = form(&["--bold"], &broken);
        assert_eq!(form.ink, InkColor::default());
        assert_eq!(form.background, Background::default());
        assert!(form.effects.bold);
        assert!(!form.effects.underline);
    }
}

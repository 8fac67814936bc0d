use clap::Parser;
use pinmap::generate;
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pinmap")]
#[command(about = "Compile a YAML map description into a self-contained HTML map")]
#[command(long_about = "\
Compile a YAML map description into a self-contained HTML map

Reads a declarative YAML document describing markers, icons, popups and
display settings, and writes one HTML file with everything inlined: the
mapping library, styles, scripts, and every icon as a data: URL. Only map
tile imagery is fetched when the page is viewed.

Input structure:

  map_settings:                  # all optional
    title: Coffee in Lisbon
    language: pt
    show_zoom_control: true
    zoom_control_position: top right
    center: [38.7169, -9.1399]   # omit to fit markers
    zoom: 13
    external_css: [extra.css]    # inlined in order
    external_js: [extra.js]
  default_marker_settings:       # fallbacks for any marker attribute
    icon: star                   # bundled name or file path
    icon_color: \"#8800cc\"        # vector icons only
    icon_size: [40, 40]
  markers:
    - latitude: 38.7169          # required, unique pair per marker
      longitude: -9.1399
      popup: \"<b>Fábrica</b>\"
      selected_icon: flag        # icon while the popup is open

Bundled icons: placeholder, circle, star, flag, home.")]
#[command(version)]
struct Cli {
    /// Input map description (YAML); reads standard input when omitted
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Output HTML file; writes standard output when omitted
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

const ERROR_BANNER: &str = "============================================================";

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("{ERROR_BANNER}");
        eprintln!("pinmap: {err}");
        eprintln!("{ERROR_BANNER}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let source = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read input file '{}': {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let document = generate::generate(&source)?;

    match &cli.output {
        Some(path) => std::fs::write(path, &document)
            .map_err(|e| format!("failed to write output file '{}': {e}", path.display()))?,
        None => std::io::stdout().write_all(document.as_bytes())?,
    }

    Ok(())
}

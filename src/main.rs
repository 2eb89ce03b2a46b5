use clap::{Parser, Subcommand};
use liascript_img_macros::{config, generate, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "liascript-img-macros")]
#[command(about = "Generate LiaScript image macros from a directory tree")]
#[command(long_about = "\
Generate LiaScript image macros from a directory tree

Your filesystem is the data source. Directories below the image folder become
categories, image files become macros, and each category gets a showcase
table in the generated markdown file.

Image structure:

  img/
  ├── Maler/                       # Category `Maler`
  │   ├── Pinsel.png               # @Maler.Pinsel, @Maler.Pinsel.src
  │   └── Taetigkeiten/            # Category `Maler_Taetigkeiten`
  │       └── Koje-farbig.png      # @Maler_Taetigkeiten.Koje_farbig
  └── Collections/                 # Skipped when listed in ignore_dirs

Macro names: directory path joined with `_`, then `.`, then the file name
without extension. Umlauts are transliterated (ä → ae, ß → ss) and any other
character outside [A-Za-z0-9_] becomes `_`.

Run 'liascript-img-macros gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Configuration file (.toml, .yaml or .yml)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Directory that image_folder and makro_file are relative to
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the image folder and write the macro file (default)
    Generate,
    /// Scan the image folder and list what would be generated
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Command::Generate) {
        Command::Generate => {
            let config = config::load_config(&cli.config)?;
            println!(
                "==> Generating {} from {}",
                config.makro_file,
                cli.root.join(&config.image_folder).display()
            );
            let report = generate::run(&config, &cli.root)?;
            output::print_generate_output(&report);
        }
        Command::Check => {
            let config = config::load_config(&cli.config)?;
            println!(
                "==> Checking {}",
                cli.root.join(&config.image_folder).display()
            );
            let report = generate::MacroGenerator::new(&config, &cli.root).check()?;
            output::print_check_output(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

use clap::Parser;

/// List the glyph alternates a font's GSUB features can reach
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Font model (JSON) to read
    pub font_path: String,

    /// Only report alternates for this exact source text
    #[arg(short, long)]
    pub text: Option<String>,

    /// Include display labels for each feature setting
    #[arg(long)]
    pub labels: bool,

    /// Include the list of features the font offers
    #[arg(long)]
    pub features: bool,

    /// Include the inventory of the font's characters
    #[arg(long)]
    pub inventory: bool,

    /// Write the report here instead of standard output
    #[arg(short, long)]
    pub output: Option<String>,

    #[command(flatten)]
    pub verbosity: clap_verbosity_flag::Verbosity,
}

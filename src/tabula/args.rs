use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "tabula")]
#[command(about = "Interactive terminal console for browsing and editing record collections")]
#[command(long_about = None)]
pub struct Cli {
    /// Screen to open at launch (dashboard, users, products, reports,
    /// documents, settings, login)
    #[arg(short, long)]
    pub screen: Option<String>,

    /// Override the configured line width for tables
    #[arg(short, long)]
    pub width: Option<usize>,
}

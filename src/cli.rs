use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// One-shot prompt; omit to start an interactive session
    pub query: Option<String>,

    /// LLM provider id (see /providers for the catalog)
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Model to use (must be listed for the provider)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Override the provider's default endpoint
    #[arg(long)]
    pub base_url: Option<String>,

    /// API key; falls back to the provider's environment variable
    #[arg(long)]
    pub api_key: Option<String>,
}

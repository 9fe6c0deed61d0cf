use anyhow::Result;

fn main() -> Result<()> {
    let args = gather::cli::parse();
    gather::app::run(args)
}

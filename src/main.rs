use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = photo_copier::cli::parse();
    app::run(args)
}

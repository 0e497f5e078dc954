use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = desktop_release::cli::parse();
    app::run(args)
}

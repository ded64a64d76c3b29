use clap::Parser;
use vignette::{
    app,
    cli::WindowArgs,
    config::init_logging,
    demos::materials,
    frame::Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "materials")]
#[command(about = "Basic, Lambert, Phong and standard materials side by side", long_about = None)]
struct Cli {
    #[command(flatten)]
    window: WindowArgs,

    /// Start with the material labels hidden
    #[arg(long = "hide-labels", default_value = "false")]
    hide_labels: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.window.logging());

    let config = cli.window.app_config("materials");
    let demo = materials::build(
        Viewport::new(config.width, config.height),
        !cli.hide_labels,
    );
    app::run(config, demo)?;
    Ok(())
}

use clap::Parser;
use vignette::{
    app,
    cli::WindowArgs,
    config::init_logging,
    demos::cube,
    frame::Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "cube")]
#[command(about = "Wireframe cube with rotation and camera sliders", long_about = None)]
struct Cli {
    #[command(flatten)]
    window: WindowArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.window.logging());

    let config = cli.window.app_config("cube");
    let demo = cube::build(Viewport::new(config.width, config.height));
    app::run(config, demo)?;
    Ok(())
}

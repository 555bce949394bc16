use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use touch_trails::cli::{Cli, SceneKind};
use touch_trails::core::{
    Canvas, CursorGuard, DisplayContext, ShutdownToken, SplatterGenerator, TouchDecoder,
};
use touch_trails::display::{Display, Framebuffer};
use touch_trails::scenes::{BouncingBall, Scene, TrailsScene};
use touch_trails::RenderLoop;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let shutdown = ShutdownToken::new();
    let handler_token = shutdown.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .context("installing interrupt handler")?;

    let context = DisplayContext::reference();

    let scene: Box<dyn Scene> = match cli.scene {
        SceneKind::Trails => {
            let splatter = SplatterGenerator::new(context, StdRng::from_entropy(), cli.splat_rate());
            Box::new(TrailsScene::new(splatter))
        }
        SceneKind::Ball => Box::new(BouncingBall::new(context)),
    };

    let framebuffer = Framebuffer::open(&cli.framebuffer, &context)
        .with_context(|| format!("opening display {}", cli.framebuffer.display()))?;

    let input: Option<TouchDecoder<File>> = if scene.uses_touch() {
        match TouchDecoder::open(&cli.touch) {
            Ok(decoder) => Some(decoder),
            Err(e) => {
                warn!("{}; touch disabled", e);
                None
            }
        }
    } else {
        None
    };

    info!("Press Ctrl+C to exit");

    // Restores the cursor on every exit path below
    let _cursor = CursorGuard::acquire(&cli.tty);

    let mut render_loop = RenderLoop::new(
        Canvas::new(context),
        Display::new(framebuffer, cli.max_write_failures),
        input,
        scene,
        shutdown,
    )
    .with_frame_cap(cli.frame_cap());

    // A fatal display error surfaces once, through main's error return
    let frames = render_loop.run().context("render loop aborted")?;
    info!("done, {} frames", frames);
    Ok(())
}

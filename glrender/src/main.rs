use anyhow::Context as _;
use glrender::{
    Camera, FrameControl, Platform, Scene, ShaderProgram, ViewerConfig, Window, logging, shader,
};
use std::rc::Rc;

fn main() -> anyhow::Result<()> {
    let config = ViewerConfig::default();
    logging::init_logging(config.logging.clone());

    let platform = Platform::init()?;
    let mut window =
        Window::create(platform, &config.window).context("failed to set up the window")?;

    let vertex = shader::load_source(&config.shaders.vertex);
    let fragment = shader::load_source(&config.shaders.fragment);

    let program = match ShaderProgram::link(window.gpu(), &vertex, &fragment) {
        Ok(program) => Rc::new(program),
        Err(err) => {
            // Already logged by the builder; nothing to render.
            log::debug!("shutting down: {err}");
            window.destroy();
            return Ok(());
        }
    };

    let mut scene = Scene::new(program, Camera::new(&config.camera));

    while window.poll_and_swap() {
        if scene.update(&window) == FrameControl::Quit {
            break;
        }
        scene.render();
    }

    scene.destroy();
    window.destroy();
    Ok(())
}

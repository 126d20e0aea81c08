use crate::{
    config::WindowConfig,
    error::WindowError,
    gpu::{ClearMask, Gpu, opengl::GlGpu},
    input::{Key, KeyInput},
};
use glfw::Context as _;
use std::rc::Rc;

/// GLFW's process-wide state.
///
/// Obtained once from [`Platform::init`] and handed to [`Window::create`]; it
/// is torn down by [`Window::destroy`].
pub struct Platform {
    glfw: glfw::Glfw,
}

impl Platform {
    pub fn init() -> Result<Self, WindowError> {
        let glfw = glfw::init(glfw::log_errors).map_err(WindowError::Init)?;
        log::info!("GLFW initialized");
        Ok(Self { glfw })
    }
}

/// A fixed-size window with a current OpenGL context.
pub struct Window {
    glfw: glfw::Glfw,
    handle: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    gpu: Rc<GlGpu>,
}

impl Window {
    /// Creates the window hidden, sets up the context and shows it once the
    /// first clear has been issued.
    pub fn create(platform: Platform, config: &WindowConfig) -> Result<Self, WindowError> {
        let Platform { mut glfw } = platform;

        let (major, minor) = config.context_version;
        glfw.window_hint(glfw::WindowHint::ContextVersion(major, minor));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::Resizable(false));
        glfw.window_hint(glfw::WindowHint::Visible(false));
        glfw.window_hint(glfw::WindowHint::Samples(config.samples));

        let (mut handle, events) = glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(WindowError::Create {
                width: config.width,
                height: config.height,
            })?;

        handle.make_current();

        library_opened(gl_loader::init_gl())?;
        let gpu = GlGpu::load(|symbol| gl_loader::get_proc_address(symbol) as *const _)?;
        gpu.set_clear_color(config.clear_color);
        gpu.clear(ClearMask::COLOR);

        handle.show();
        log::info!(
            "created {}x{} window \"{}\"",
            config.width,
            config.height,
            config.title
        );

        Ok(Self {
            glfw,
            handle,
            events,
            gpu: Rc::new(gpu),
        })
    }

    pub fn gpu(&self) -> &Rc<GlGpu> {
        &self.gpu
    }

    /// Presents the last frame, clears for the next one and processes pending
    /// events. Returns `false` once a close was requested.
    pub fn poll_and_swap(&mut self) -> bool {
        self.handle.swap_buffers();
        self.gpu.clear(ClearMask::COLOR_DEPTH);
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            log::trace!("{event:?}");
        }
        !self.handle.should_close()
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.handle.get_key(key.to_glfw()) == glfw::Action::Press
    }

    /// Destroys the window and its context, then terminates GLFW.
    ///
    /// The OpenGL library is only unloaded when no GPU object created through
    /// [`Window::gpu`] is still alive; otherwise it stays loaded so their
    /// release calls still land in mapped code.
    pub fn destroy(self) {
        let Window {
            glfw,
            handle,
            events,
            gpu,
        } = self;

        let unload = release_last(gpu);
        drop(events);
        drop(handle);
        if unload {
            gl_loader::end_gl();
        } else {
            log::warn!("destroying the window while GPU resources are still alive");
        }
        // The last `Glfw` handle terminates the library.
        drop(glfw);
        log::info!("window destroyed");
    }
}

/// `gl_loader::init_gl` returns 0 when the system GL library cannot be opened.
fn library_opened(status: i32) -> Result<(), WindowError> {
    if status == 0 {
        return Err(WindowError::GlOpen);
    }
    Ok(())
}

/// Drops the window's handle on the GPU and reports whether it was the last.
fn release_last<G>(gpu: Rc<G>) -> bool {
    Rc::try_unwrap(gpu).is_ok()
}

impl KeyInput for Window {
    fn is_key_down(&self, key: Key) -> bool {
        Window::is_key_down(self, key)
    }
}

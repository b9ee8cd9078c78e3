use std::error::Error;

use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::SurfaceSize;

pub struct AppConfig {
    pub title: String,
    pub desired_size: PhysicalSize<u32>,
    pub clamp_to_monitor: bool,
    pub vsync: Option<bool>,
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
    pub surface_size: SurfaceSize,
}

/// One frame's worth of pointer input.
///
/// Mouse and touch feed the same fields: a touch start is a press at the
/// touch location, a touch end is a release there. Downstream gesture code
/// never needs to know which modality produced the frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputFrame {
    pub pointer_pos: Option<(u32, u32)>,
    pub pressed: bool,
    pub released: bool,
}

impl InputFrame {
    /// Folds a window event into this frame. Returns true if the event was
    /// a pointer event.
    pub fn apply_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_pos = Some((position.x.max(0.0) as u32, position.y.max(0.0) as u32));
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if *button == MouseButton::Left {
                    match state {
                        ElementState::Pressed => self.pressed = true,
                        ElementState::Released => self.released = true,
                    }
                }
                true
            }
            WindowEvent::Touch(touch) => {
                let pos = (
                    touch.location.x.max(0.0) as u32,
                    touch.location.y.max(0.0) as u32,
                );
                self.pointer_pos = Some(pos);
                match touch.phase {
                    TouchPhase::Started => self.pressed = true,
                    TouchPhase::Moved => {}
                    TouchPhase::Ended => self.released = true,
                    TouchPhase::Cancelled => {
                        self.pressed = false;
                        self.released = false;
                    }
                }
                true
            }
            _ => false,
        }
    }

    /// Clears the edge-triggered fields at the end of a frame.
    pub fn end_frame(&mut self) {
        self.pressed = false;
        self.released = false;
    }
}

pub trait AppHandler {
    fn init(&mut self, _ctx: &mut AppContext) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    fn handle_event(
        &mut self,
        event: Event<()>,
        control_flow: &mut ControlFlow,
        ctx: &mut AppContext,
    );
}

pub fn run_app<H: AppHandler + 'static>(
    config: AppConfig,
    mut handler: H,
) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let monitor_size = if config.clamp_to_monitor {
        event_loop.primary_monitor().map(|m| m.size())
    } else {
        None
    };
    let initial_size = if let Some(monitor) = monitor_size {
        PhysicalSize::new(
            config.desired_size.width.min(monitor.width),
            config.desired_size.height.min(monitor.height),
        )
    } else {
        config.desired_size
    };
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(initial_size)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_size = SurfaceSize::new(window_size.width, window_size.height);

    let surface_texture = SurfaceTexture::new(surface_size.width, surface_size.height, &window);
    let mut pixels_builder =
        PixelsBuilder::new(surface_size.width, surface_size.height, surface_texture);
    if let Some(vsync) = config.vsync {
        pixels_builder = pixels_builder.enable_vsync(vsync);
    }
    let pixels: Pixels = pixels_builder.build()?;

    let renderer = PixelsRenderer2d::new(pixels, surface_size)?;

    let mut ctx = AppContext {
        window,
        renderer,
        surface_size,
    };
    handler.init(&mut ctx)?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        handler.handle_event(event, control_flow, &mut ctx);
    });

    #[allow(unreachable_code)]
    Ok(())
}

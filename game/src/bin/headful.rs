use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use engine::app::{run_app, AppConfig, AppContext, AppHandler, InputFrame};
use engine::audio::{render_melody, render_tone, Melody, Tone};
use engine::surface::SurfaceSize;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::ControlFlow;

use game::headful::input_adapter::DragGesture;
use game::settings::Settings;
use game::state::{GameEffect, GameInput, GameState};
use game::ui::{self, Layout};

const SAMPLE_RATE: u32 = 44_100;

struct Sfx {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl Sfx {
    fn new() -> Result<Self, Box<dyn Error>> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }

    fn play_samples(&self, samples: Vec<f32>, volume: f32) {
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        sink.set_volume(volume);
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
        sink.detach();
    }

    fn play_tone(&self, tone: Tone, volume: f32) {
        self.play_samples(render_tone(tone, SAMPLE_RATE), volume);
    }

    fn play_melody(&self, melody: &Melody, volume: f32) {
        self.play_samples(render_melody(melody, SAMPLE_RATE), volume);
    }
}

struct RevealApp {
    state: GameState,
    gesture: DragGesture,
    input: InputFrame,
    layout: Layout,
    sfx: Option<Sfx>,
    settings_path: Option<PathBuf>,
    last_frame: Instant,
    next_redraw: Instant,
    frame_interval: Duration,
}

impl RevealApp {
    fn new(seed: u64, size: SurfaceSize) -> Self {
        let settings_path = Settings::default_path();
        let settings = settings_path
            .as_deref()
            .map(Settings::load_from)
            .unwrap_or_default();

        // No audio device is fine; effects are simply dropped.
        let sfx = Sfx::new()
            .map_err(|e| eprintln!("audio unavailable: {e}"))
            .ok();

        Self {
            state: GameState::new(seed, size, settings),
            gesture: DragGesture::new(),
            input: InputFrame::default(),
            layout: ui::layout(size),
            sfx,
            settings_path,
            last_frame: Instant::now(),
            next_redraw: Instant::now(),
            frame_interval: Duration::from_secs_f64(1.0 / 60.0),
        }
    }

    fn apply_effects(&self, effects: &[GameEffect]) {
        let Some(sfx) = self.sfx.as_ref() else {
            return;
        };
        for effect in effects {
            match effect {
                GameEffect::PlayTone { tone, volume } => sfx.play_tone(*tone, *volume),
                GameEffect::PlayMelody { melody, volume } => sfx.play_melody(melody, *volume),
                // Fireworks visibility is state; the draw path already
                // skips a hidden session.
                GameEffect::HideFireworksCanvas => {}
            }
        }
    }

    fn save_settings(&self) {
        let Some(path) = self.settings_path.as_ref() else {
            return;
        };
        if let Err(e) = self.state.settings.save_to(path) {
            eprintln!("failed saving settings to {}: {e}", path.display());
        }
    }

    fn resize(&mut self, size: SurfaceSize, ctx: &mut AppContext) {
        if size.is_empty() {
            return;
        }
        if let Err(e) = ctx.renderer.resize(size) {
            eprintln!("resize failed: {e}");
            return;
        }
        ctx.surface_size = size;
        self.state.resize(size);
        self.layout = ui::layout(size);
    }
}

impl AppHandler for RevealApp {
    fn init(&mut self, ctx: &mut AppContext) -> Result<(), Box<dyn Error>> {
        // The window may have been clamped to the monitor.
        self.state.resize(ctx.surface_size);
        self.layout = ui::layout(ctx.surface_size);
        Ok(())
    }

    fn handle_event(
        &mut self,
        event: Event<()>,
        control_flow: &mut ControlFlow,
        ctx: &mut AppContext,
    ) {
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    self.resize(SurfaceSize::new(size.width, size.height), ctx);
                }
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    self.resize(
                        SurfaceSize::new(new_inner_size.width, new_inner_size.height),
                        ctx,
                    );
                }
                other => {
                    self.input.apply_window_event(&other);
                }
            },
            Event::MainEventsCleared => {
                // Cap the redraw rate; uncapped polling just burns CPU.
                let now = Instant::now();
                if now >= self.next_redraw {
                    ctx.window.request_redraw();
                    self.next_redraw = now + self.frame_interval;
                }
            }
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_frame);
                self.last_frame = now;

                let inputs = self.gesture.apply(&self.input, &self.layout, &self.state);
                for input in inputs {
                    let effects = self.state.handle_input(input);
                    self.apply_effects(&effects);
                    if input == GameInput::ToggleSound {
                        self.save_settings();
                    }
                }

                let effects = self.state.update(dt);
                self.apply_effects(&effects);

                let state = &self.state;
                let layout = &self.layout;
                let pointer = self.input.pointer_pos;
                ctx.renderer
                    .draw_frame(|gfx| ui::draw_scene(gfx, state, layout, pointer));
                if let Err(e) = ctx.renderer.present() {
                    eprintln!("present failed: {e}");
                    *control_flow = ControlFlow::Exit;
                }

                self.input.end_frame();
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;

    let desired = PhysicalSize::new(960u32, 720u32);
    let config = AppConfig {
        title: "Reveal Party".to_string(),
        desired_size: desired,
        clamp_to_monitor: true,
        vsync: None,
    };

    let app = RevealApp::new(seed, SurfaceSize::new(desired.width, desired.height));
    run_app(config, app)
}

mod hud;
mod keys;

use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use ferris_input::{Action, KeyMap};
use ferris_render::{Frame, ProjectionConfig, WheelConfig};
use ferris_render_wgpu::{GpuContext, WgpuRenderer};
use ferris_sim::{AnimationClock, SimConfig, SimState};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const WINDOW_SIZE: u32 = 800;

#[derive(Parser)]
#[command(name = "ferris-desktop", about = "Animated ferris wheel")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Start with the wheel already turning
    #[arg(long)]
    animate: bool,

    /// Hide the HUD panel at startup (F1 shows it)
    #[arg(long)]
    no_hud: bool,

    /// Milliseconds between animation ticks
    #[arg(long, default_value = "16")]
    tick_ms: u64,
}

/// Application state.
struct AppState {
    sim: SimState,
    clock: AnimationClock,
    keymap: KeyMap,
    wheel: WheelConfig,
    projection: ProjectionConfig,
    show_hud: bool,
    last_update: Instant,
}

impl AppState {
    fn new(cli: &Cli) -> Self {
        let config = SimConfig {
            tick_interval: Duration::from_millis(cli.tick_ms),
            ..SimConfig::default()
        };
        let clock = AnimationClock::new(config.tick_interval);
        let mut sim = SimState::with_config(config);
        if cli.animate {
            sim.apply(Action::ToggleAnimation);
        }

        Self {
            sim,
            clock,
            keymap: KeyMap::default(),
            wheel: WheelConfig::default(),
            projection: ProjectionConfig::default(),
            show_hud: !cli.no_hud,
            last_update: Instant::now(),
        }
    }

    /// Run clock ticks that became due. Returns true if any did.
    fn update(&mut self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.last_update);
        self.last_update = now;
        let ticks = self.clock.advance(elapsed);
        self.sim.run_ticks(ticks);
        ticks > 0
    }

    /// Apply an action. Returns false if the application should exit.
    fn perform(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::ToggleHud => {
                self.show_hud = !self.show_hud;
                tracing::debug!("hud {}", if self.show_hud { "shown" } else { "hidden" });
            }
            _ => {
                self.sim.apply(action);
            }
        }
        true
    }

    fn frame(&self) -> Frame {
        Frame::compose(&self.sim, &self.wheel, self.projection)
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            window: None,
            gpu: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Ferris Wheel")
            .with_inner_size(PhysicalSize::new(WINDOW_SIZE, WINDOW_SIZE))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height)?;
        self.state.projection.aspect = gpu.aspect();

        let renderer = WgpuRenderer::new(&gpu.device, gpu.format(), size.width, size.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.format(), None, 1, false);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: Action) {
        if self.state.perform(action) {
            self.request_redraw();
        } else {
            tracing::info!("quit requested");
            event_loop.exit();
        }
    }

    fn redraw(&mut self) {
        let Self {
            state,
            window,
            gpu,
            renderer,
            egui_ctx,
            egui_winit,
            egui_renderer,
        } = self;
        let (Some(window), Some(gpu), Some(renderer), Some(egui_winit), Some(egui_renderer)) = (
            window.as_ref(),
            gpu.as_ref(),
            renderer.as_ref(),
            egui_winit.as_mut(),
            egui_renderer.as_mut(),
        ) else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        renderer.render(&gpu.device, &gpu.queue, &view, &state.frame());

        let raw_input = egui_winit.take_egui_input(window);
        let mut hud_actions = Vec::new();
        let full_output = egui_ctx.run(raw_input, |ctx| {
            if state.show_hud {
                hud_actions = hud::draw(ctx, &state.sim);
            }
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = gpu.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("hud_encoder"),
            });
        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("hud_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();

        // button clicks take effect on the next frame
        let mut dirty = false;
        for action in hud_actions {
            dirty |= state.sim.apply(action);
        }
        if dirty {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_gpu(event_loop) {
            tracing::error!("failed to initialize graphics: {e:#}");
            event_loop.exit();
            return;
        }
        self.state.last_update = Instant::now();
        self.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.repaint {
                window.request_redraw();
            }
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                    self.state.projection.aspect = gpu.aspect();
                    if let Some(renderer) = &mut self.renderer {
                        let (width, height) = gpu.size();
                        renderer.resize(&gpu.device, width, height);
                    }
                }
                self.request_redraw();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                let action = keys::scene_key(&logical_key)
                    .and_then(|key| self.state.keymap.action_for(key));
                if let Some(action) = action {
                    self.handle_action(event_loop, action);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if self.state.update(now) {
            self.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.state.clock.next_deadline(now)));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("ferris-desktop starting");

    let event_loop = EventLoop::new()?;
    let mut app = GpuApp::new(AppState::new(&cli));
    event_loop.run_app(&mut app)?;

    Ok(())
}

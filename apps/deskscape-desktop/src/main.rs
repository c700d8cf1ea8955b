use anyhow::Result;
use clap::Parser;
use deskscape_assets::TextureImage;
use deskscape_camera::{CameraRig, ProjectionMode};
use deskscape_input::{Action, InputState, Key, KeyBindings};
use deskscape_render_wgpu::SceneRenderer;
use deskscape_scene::{
    LightRig, MaterialBank, TextureBank, build_lights, desk_scene, update_rgb_light,
};
use egui::Context as EguiContext;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

const WINDOW_WIDTH: u32 = 1000;
const WINDOW_HEIGHT: u32 = 800;
/// One wheel line maps to one scroll unit; pixel deltas are scaled down to
/// roughly line-sized steps.
const PIXELS_PER_SCROLL_LINE: f32 = 20.0;

#[derive(Parser)]
#[command(name = "deskscape-desktop", about = "Desk scene viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding the scene's texture bitmaps
    #[arg(long, default_value = "./textures")]
    textures: String,
}

/// Application state outside the GPU bring-up.
struct AppState {
    rig: CameraRig,
    bindings: KeyBindings,
    input: InputState,
    materials: MaterialBank,
    textures: TextureBank,
    lights: LightRig,
    start: Instant,
    last_frame: Instant,
    last_dt: f32,
    show_hud: bool,
}

impl AppState {
    fn new(textures: TextureBank) -> Self {
        Self {
            rig: CameraRig::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32),
            bindings: KeyBindings::default(),
            input: InputState::new(),
            materials: MaterialBank::desk_presets(),
            textures,
            lights: build_lights(),
            start: Instant::now(),
            last_frame: Instant::now(),
            last_dt: 0.0,
            show_hud: true,
        }
    }

    /// Route one key transition through the binding table. Returns true when
    /// the application should exit.
    fn handle_key(&mut self, key: Key, pressed: bool, repeat: bool) -> bool {
        let Some(action) = self.bindings.resolve(key) else {
            return false;
        };

        if action.is_continuous() {
            self.input.set(action, pressed);
            return false;
        }
        if !pressed || repeat {
            return false;
        }

        match action {
            Action::ToggleLayout => {
                self.bindings.toggle_layout();
                // Keys held across the swap would resolve differently on
                // release, so drop them rather than leave motion stuck on.
                self.input.clear();
            }
            Action::SetPerspective => self.rig.set_mode(ProjectionMode::Perspective),
            Action::SetOrthographic => self.rig.set_mode(ProjectionMode::Orthographic),
            Action::Quit => return true,
            _ => {}
        }
        false
    }

    fn draw_hud(&self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }

        egui::Window::new("deskscape")
            .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                let mode = match self.rig.mode() {
                    ProjectionMode::Perspective => "perspective",
                    ProjectionMode::Orthographic => "orthographic",
                };
                ui.label(format!("Projection: {mode} (P/O)"));
                ui.label(format!("FOV: {:.0}\u{b0}", self.rig.fov_degrees));
                ui.label(format!("Layout: {:?}", self.bindings.layout()));
                ui.label(format!(
                    "Look x{:.2}  Pan x{:.2}",
                    self.rig.look_scale, self.rig.pan_scale
                ));
                if self.last_dt > 0.0 {
                    ui.label(format!("{:.0} fps", 1.0 / self.last_dt));
                }
                ui.small("F1: toggle overlay");
            });
    }
}

/// Map the event loop's key codes onto the application's key set, once, at
/// the edge. Everything downstream is windowing-agnostic.
fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyC => Some(Key::C),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::KeyE => Some(Key::E),
        KeyCode::KeyF => Some(Key::F),
        KeyCode::KeyO => Some(Key::O),
        KeyCode::KeyP => Some(Key::P),
        KeyCode::KeyQ => Some(Key::Q),
        KeyCode::KeyR => Some(Key::R),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyT => Some(Key::T),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::Space => Some(Key::Space),
        KeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}

struct GpuApp {
    state: AppState,
    images: Vec<TextureImage>,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<SceneRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(state: AppState, images: Vec<TextureImage>) -> Self {
        Self {
            state,
            images,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("deskscape")
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        // FPS-style navigation: confine and hide the cursor. Some platforms
        // only support one grab mode, so fall back before giving up.
        if let Err(e) = window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
        {
            tracing::warn!("cursor grab unavailable: {e}");
        }
        window.set_cursor_visible(false);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("deskscape_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state
            .rig
            .set_viewport(size.width as f32, size.height as f32);

        let mut renderer =
            SceneRenderer::new(&device, &queue, surface_format, size.width, size.height);
        renderer.upload_textures(&device, &queue, &self.images);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(egui_winit) = &mut self.egui_winit {
            let response = egui_winit.on_window_event(self.window.as_ref().unwrap(), &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state
                        .rig
                        .set_viewport(config.width as f32, config.height as f32);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let pressed = key_state == ElementState::Pressed;
                if code == KeyCode::F1 && pressed && !repeat {
                    self.state.show_hud = !self.state.show_hud;
                    return;
                }
                if let Some(key) = map_key(code) {
                    if self.state.handle_key(key, pressed, repeat) {
                        event_loop.exit();
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (dx, dy) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (x, y),
                    MouseScrollDelta::PixelDelta(p) => (
                        p.x as f32 / PIXELS_PER_SCROLL_LINE,
                        p.y as f32 / PIXELS_PER_SCROLL_LINE,
                    ),
                };
                self.state.rig.apply_scroll(dx, dy);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
                self.state.last_frame = now;
                self.state.last_dt = dt;

                let frame = self.state.rig.update(dt, &self.state.input);
                let t = self.state.start.elapsed().as_secs_f32();
                let commands = desk_scene(t);
                update_rgb_light(&mut self.state.lights, t);

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
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

                if let Some(renderer) = &mut self.renderer {
                    renderer.render(
                        device,
                        queue,
                        &view,
                        &frame,
                        &commands,
                        &self.state.materials,
                        &mut self.state.textures,
                        &self.state.lights,
                    );
                }

                let raw_input = self
                    .egui_winit
                    .as_mut()
                    .unwrap()
                    .take_egui_input(self.window.as_ref().unwrap());
                let full_output = self.egui_ctx.run(raw_input, |ctx| {
                    self.state.draw_hud(ctx);
                });

                self.egui_winit.as_mut().unwrap().handle_platform_output(
                    self.window.as_ref().unwrap(),
                    full_output.platform_output,
                );

                let paint_jobs = self
                    .egui_ctx
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [
                        self.config.as_ref().unwrap().width,
                        self.config.as_ref().unwrap().height,
                    ],
                    pixels_per_point: full_output.pixels_per_point,
                };

                {
                    let egui_renderer = self.egui_renderer.as_mut().unwrap();
                    for (id, image_delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(device, queue, *id, image_delta);
                    }
                    let mut encoder =
                        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui_encoder"),
                        });
                    egui_renderer.update_buffers(
                        device,
                        queue,
                        &mut encoder,
                        &paint_jobs,
                        &screen_descriptor,
                    );
                    {
                        let mut pass = encoder
                            .begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("egui_pass"),
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
                    queue.submit(std::iter::once(encoder.finish()));
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state
                .rig
                .apply_mouse_delta(delta.0 as f32, delta.1 as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("deskscape-desktop starting");

    // Required textures are loaded up front; a missing bitmap is fatal.
    let mut texture_bank = TextureBank::new();
    let images =
        deskscape_assets::load_scene_textures(Path::new(&cli.textures), &mut texture_bank)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(AppState::new(texture_bank), images);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskscape_input::Layout;

    #[test]
    fn key_mapping_covers_both_layouts() {
        for code in [
            KeyCode::KeyW,
            KeyCode::KeyS,
            KeyCode::KeyA,
            KeyCode::KeyD,
            KeyCode::KeyQ,
            KeyCode::KeyE,
            KeyCode::KeyC,
            KeyCode::KeyF,
            KeyCode::KeyR,
            KeyCode::KeyT,
            KeyCode::Space,
            KeyCode::KeyP,
            KeyCode::KeyO,
            KeyCode::Escape,
        ] {
            assert!(map_key(code).is_some(), "unmapped key {code:?}");
        }
        assert!(map_key(KeyCode::KeyZ).is_none());
    }

    #[test]
    fn escape_requests_exit() {
        let mut state = AppState::new(TextureBank::new());
        assert!(state.handle_key(Key::Escape, true, false));
        assert!(!state.handle_key(Key::Escape, false, false));
    }

    #[test]
    fn layout_toggle_clears_held_motion() {
        let mut state = AppState::new(TextureBank::new());
        state.handle_key(Key::W, true, false);
        assert!(state.input.holds(Action::MoveForward));

        state.handle_key(Key::C, true, false);
        assert_eq!(state.bindings.layout(), Layout::Colemak);
        assert!(!state.input.holds(Action::MoveForward));
    }

    #[test]
    fn projection_keys_switch_mode() {
        let mut state = AppState::new(TextureBank::new());
        state.handle_key(Key::O, true, false);
        assert_eq!(state.rig.mode(), ProjectionMode::Orthographic);
        state.handle_key(Key::P, true, false);
        assert_eq!(state.rig.mode(), ProjectionMode::Perspective);

        // Key repeats must not re-fire the discrete action path.
        state.handle_key(Key::O, true, true);
        assert_eq!(state.rig.mode(), ProjectionMode::Perspective);
    }
}

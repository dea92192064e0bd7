//! Wrap Chimes entry point
//!
//! Handles platform-specific initialization and drives the tick timer.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use wrap_chimes::Settings;
    use wrap_chimes::audio::WebAudio;
    use wrap_chimes::renderer::CanvasSink;
    use wrap_chimes::sim::{Sinks, Surface, World, seed_demo_scene, tick};

    /// App instance holding all state
    struct App {
        world: World,
        canvas: CanvasSink,
        audio: WebAudio,
    }

    impl App {
        fn step(&mut self) {
            let mut sinks = Sinks {
                render: &mut self.canvas,
                audio: &mut self.audio,
            };
            tick(&mut self.world, &mut sinks);
        }
    }

    fn window_size() -> (f32, f32) {
        let Some(window) = web_sys::window() else {
            return (0.0, 0.0);
        };
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        (width as f32, (height - 2.0).max(0.0) as f32)
    }

    fn event_pos(event: &MouseEvent) -> Vec2 {
        Vec2::new(event.offset_x() as f32, event.offset_y() as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Wrap Chimes starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .expect("create canvas")
            .dyn_into()
            .expect("not a canvas");
        let (width, height) = window_size();
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let _ = canvas.set_attribute("style", "position: absolute; border: 1px solid");
        document
            .body()
            .expect("no body")
            .append_child(&canvas)
            .expect("append canvas");

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();
        let interval = settings.tick_interval_ms as i32;
        let mut world = World::new(Surface::new(width, height), settings);
        seed_demo_scene(&mut world.registry);

        let app = Rc::new(RefCell::new(App {
            world,
            canvas: CanvasSink::new(ctx),
            audio: WebAudio::new(),
        }));

        setup_pointer_handlers(&canvas, app.clone());
        setup_resize_handler(&canvas, app.clone());
        setup_keyboard_handler(app.clone());

        let closure = Closure::<dyn FnMut()>::new(move || {
            app.borrow_mut().step();
        });
        let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval,
        );
        closure.forget();

        log::info!("Wrap Chimes running ({}x{})", width, height);
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Pointer down - start charging
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                // Browsers only allow audio after a user gesture
                a.audio.resume();
                a.world.pointer_down(event_pos(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move - hover picking or drag
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut().world.pointer_move(event_pos(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up - launch
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if let Some(id) = app.borrow_mut().world.pointer_up(event_pos(&event)) {
                    log::info!("Launched {}", id);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer leave - cancel
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().world.pointer_leave();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard_handler(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut a = app.borrow_mut();
            if a.world.settings.apply_hotkey(&event.key()) {
                let settings = &a.world.settings;
                log::info!(
                    "muted={} chimes={} wrap={} basis={:?}",
                    settings.muted,
                    settings.chime.enabled,
                    settings.wrap_collisions,
                    settings.basis
                );
                settings.save();
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = window_size();
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);
            let mut a = app.borrow_mut();
            a.world.resize(width, height);
            // Redraw immediately rather than waiting for the next tick
            let App { world, canvas: sink, .. } = &mut *a;
            wrap_chimes::sim::tick::render_system(world, sink);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Wrap Chimes (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 for the canvas version");

    let ticks = env_number("WRAP_CHIMES_TICKS", 600u64);
    let seed = env_number("WRAP_CHIMES_SEED", 42u64);
    let summary = headless::run(ticks, seed);

    println!(
        "\n{} ticks: {} entities, {} launched, {} collisions, {} tones, {} draw calls",
        summary.ticks,
        summary.entities,
        summary.launched,
        summary.collisions,
        summary.tones,
        summary.draw_calls
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn env_number<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring {}={:?}: not a number", name, value);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use wrap_chimes::Settings;
    use wrap_chimes::audio::ToneLog;
    use wrap_chimes::settings::SETTINGS_PATH_VAR;
    use wrap_chimes::renderer::CommandRecorder;
    use wrap_chimes::sim::{SimEvent, Sinks, Surface, World, scatter_circles, seed_demo_scene, tick};

    pub struct Summary {
        pub ticks: u64,
        pub entities: usize,
        pub launched: usize,
        pub collisions: usize,
        pub tones: usize,
        pub draw_calls: usize,
    }

    /// Demo scene plus random circles, with one scripted drag-to-launch
    pub fn run(ticks: u64, seed: u64) -> Summary {
        let settings = Settings::load();
        // A settings path that does not exist yet gets the defaults as a template
        if let Ok(path) = std::env::var(SETTINGS_PATH_VAR) {
            if !std::path::Path::new(&path).exists() {
                log::info!("Writing default settings to {}", path);
                settings.save();
            }
        }
        let chime = settings.chime.enabled;
        let max_radius = settings.max_circle_size * 0.4;
        let mut world = World::new(Surface::new(800.0, 600.0), settings);
        seed_demo_scene(&mut world.registry);
        let circles = scatter_circles(
            &mut world.registry,
            world.surface,
            12,
            max_radius,
            chime,
            &mut Pcg32::seed_from_u64(seed),
        );
        log::info!("Seeded {} entities (seed {})", world.entity_count(), seed);

        let mut render = CommandRecorder::new();
        let mut audio = ToneLog::new();
        let mut collisions = 0;
        let mut launched = 0;

        // Hover the first circle so it gets picked, then drag away from it and release
        let target = circles
            .first()
            .and_then(|id| world.registry.position_of(*id));
        let launch_at = Vec2::new(400.0, 300.0);

        for t in 0..ticks {
            match (t, target) {
                (0, Some(pos)) => world.pointer_move(pos),
                (1, Some(pos)) => world.pointer_down(pos),
                (2, _) => world.pointer_move(launch_at),
                (3, _) => {
                    world.pointer_up(launch_at);
                }
                _ => {}
            }

            tick(
                &mut world,
                &mut Sinks {
                    render: &mut render,
                    audio: &mut audio,
                },
            );
            for event in &world.events {
                match event {
                    SimEvent::Collision { .. } => collisions += 1,
                    SimEvent::Launched { entity } => {
                        log::info!("Launched {} at tick {}", entity, world.time_ticks);
                        launched += 1;
                    }
                    _ => {}
                }
            }
        }

        Summary {
            ticks: world.time_ticks,
            entities: world.entity_count(),
            launched,
            collisions,
            tones: audio.len(),
            draw_calls: render.commands.len(),
        }
    }
}

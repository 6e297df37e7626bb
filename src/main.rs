//! Flappy Canvas entry point
//!
//! Browser: draws on `#canvas` with the 2D context, driven by requestAnimationFrame.
//! Native: runs the simulation headless with the autopilot and reports scores.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

    use flappy_canvas::renderer::{DrawSurface, Renderer, SpriteDraw, SpriteSet, TextStyle};
    use flappy_canvas::sim::{GameState, Rect};
    use flappy_canvas::{PlayArea, Session, Settings, Tuning};

    /// DrawSurface over a canvas 2D context
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        offset: Vec2,
    }

    impl DrawSurface for CanvasSurface {
        type Image = HtmlImageElement;

        fn fill_rect(&mut self, rect: Rect, color: &str) {
            let r = rect.translate(self.offset);
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(
                r.left() as f64,
                r.top() as f64,
                r.width() as f64,
                r.height() as f64,
            );
        }

        fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f32) {
            let r = rect.translate(self.offset);
            self.ctx.set_stroke_style_str(color);
            self.ctx.set_line_width(line_width as f64);
            self.ctx.stroke_rect(
                r.left() as f64,
                r.top() as f64,
                r.width() as f64,
                r.height() as f64,
            );
        }

        fn draw_image(&mut self, image: &HtmlImageElement, sprite: &SpriteDraw) {
            // Still loading (or failed); skip rather than draw garbage
            if !image.complete() || image.natural_width() == 0 {
                return;
            }
            let dest = sprite.dest.translate(self.offset);
            let center = dest.center();
            let (w, h) = (dest.width() as f64, dest.height() as f64);

            self.ctx.save();
            let _ = self.ctx.translate(center.x as f64, center.y as f64);
            let _ = self.ctx.rotate(sprite.rotation as f64);
            let result = match sprite.src {
                Some(src) => self
                    .ctx
                    .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                        image,
                        src.left() as f64,
                        src.top() as f64,
                        src.width() as f64,
                        src.height() as f64,
                        -w / 2.0,
                        -h / 2.0,
                        w,
                        h,
                    ),
                None => self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    image,
                    -w / 2.0,
                    -h / 2.0,
                    w,
                    h,
                ),
            };
            if let Err(e) = result {
                log::warn!("drawImage failed: {:?}", e);
            }
            self.ctx.restore();
        }

        fn draw_text(&mut self, text: &str, anchor: Vec2, style: &TextStyle) {
            let weight = if style.bold { "bold " } else { "" };
            self.ctx
                .set_font(&format!("{}{}px Arial", weight, style.size_px));
            self.ctx.set_text_align("center");
            let p = anchor + self.offset;
            if let Some((color, width)) = style.stroke {
                self.ctx.set_stroke_style_str(color);
                self.ctx.set_line_width(width as f64);
                let _ = self.ctx.stroke_text(text, p.x as f64, p.y as f64);
            }
            self.ctx.set_fill_style_str(style.fill);
            let _ = self.ctx.fill_text(text, p.x as f64, p.y as f64);
        }

        fn set_offset(&mut self, offset: Vec2) {
            self.offset = offset;
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session<HtmlImageElement>,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        fn resize(&mut self, area: PlayArea) {
            self.canvas.set_width(area.width as u32);
            self.canvas.set_height(area.height as u32);
            self.session.state.resize(area);
        }
    }

    fn viewport_area(window: &web_sys::Window) -> PlayArea {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(400.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        PlayArea::fit(w as f32, h as f32)
    }

    fn load_image(path: &'static str) -> HtmlImageElement {
        let img = HtmlImageElement::new().expect("failed to create image element");

        let onload = Closure::<dyn FnMut()>::new(move || {
            log::info!("Successfully loaded: {}", path);
        });
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let onerror = Closure::<dyn FnMut()>::new(move || {
            log::error!("Failed to load image: {}", path);
        });
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        img.set_src(path);
        img
    }

    pub fn run() {
        let window = web_sys::window().expect("no global window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("missing #canvas element")
            .dyn_into()
            .expect("#canvas is not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("2d context unavailable")
            .dyn_into()
            .expect("unexpected context type");

        let mut settings = Settings::default();
        if let Ok(query) = window.location().search() {
            settings.apply_query(&query);
        }
        log::info!("Settings: {:?}", settings);

        let area = viewport_area(&window);
        let seed = js_sys::Date::now() as u64;
        let tuning = Tuning::default();
        let renderer = Renderer::new(SpriteSet::load_with(load_image), &tuning, seed);
        let state = GameState::new(seed, area, tuning);

        let mut game = Game {
            session: Session::new(state, renderer, settings),
            surface: CanvasSurface {
                ctx,
                offset: Vec2::ZERO,
            },
            canvas: canvas.clone(),
        };
        game.resize(area);
        log::info!("Game started with seed: {}", seed);

        let game = Rc::new(RefCell::new(game));
        setup_input_handlers(&canvas, game.clone());
        setup_resize(game.clone());
        request_animation_frame(game);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no global window");

        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().session.interact();
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch (suppresses the synthetic click that would follow)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                event.prevent_default();
                game.borrow_mut().session.interact();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" | "ArrowUp" => {
                        event.prevent_default();
                        g.session.interact();
                    }
                    "i" | "I" => {
                        let idle = !g.session.idle_mode();
                        g.session.set_idle_mode(idle);
                        log::info!("Idle mode: {}", idle);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no global window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                let area = viewport_area(&window);
                game.borrow_mut().resize(area);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no global window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut guard = game.borrow_mut();
            let g = &mut *guard;
            g.session.frame(time, &mut g.surface);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use clap::Parser;

    use flappy_canvas::consts::SIM_DT_MS;
    use flappy_canvas::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use flappy_canvas::{PlayArea, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "flappy-canvas")]
    #[command(about = "Headless autopilot run of Flappy Canvas (the game itself runs in the browser)")]
    pub struct Cli {
        /// Seed for obstacle placement and spawn timing
        #[arg(long, default_value_t = 0xF1A9)]
        pub seed: u64,
        /// Simulation ticks to run (60 per second)
        #[arg(long, default_value_t = 7200)]
        pub ticks: u64,
        /// JSON file overriding gameplay tuning
        #[arg(long)]
        pub tuning: Option<PathBuf>,
        /// Print the effective tuning as JSON and exit
        #[arg(long)]
        pub print_tuning: bool,
    }

    pub fn read_tuning(path: &Path) -> Result<Tuning> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let tuning = Tuning::from_json(&json)
            .with_context(|| format!("invalid tuning in {}", path.display()))?;
        Ok(tuning)
    }

    fn load_tuning(path: Option<&Path>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        match read_tuning(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::error!("{:#} (using defaults)", e);
                Tuning::default()
            }
        }
    }

    pub struct RunSummary {
        pub rounds: u32,
        pub last_score: u32,
        pub best: u32,
    }

    /// Play with the autopilot for a fixed number of ticks
    pub fn run_headless(seed: u64, ticks: u64, tuning: Tuning) -> RunSummary {
        let mut state = GameState::new(seed, PlayArea::default(), tuning);
        let mut rounds = 0u32;

        for _ in 0..ticks {
            let input = TickInput {
                // Acknowledge the game-over screen straight away
                interact: state.phase == GamePhase::GameOver,
                idle_mode: true,
            };
            tick(&mut state, &input, SIM_DT_MS);

            for event in &state.events {
                match event {
                    GameEvent::Scored { score, new_best: true } => {
                        log::debug!("New best: {}", score);
                    }
                    GameEvent::GameOver { .. } => rounds += 1,
                    _ => {}
                }
            }
        }

        RunSummary {
            rounds,
            last_score: state.score.current,
            best: state.score.best,
        }
    }

    pub fn run(cli: Cli) -> Result<()> {
        let tuning = load_tuning(cli.tuning.as_deref());
        if cli.print_tuning {
            println!("{}", tuning.to_json());
            return Ok(());
        }

        let summary = run_headless(cli.seed, cli.ticks, tuning);
        println!(
            "seed {}: {} ticks, {} finished rounds, last score {}, best {}",
            cli.seed, cli.ticks, summary.rounds, summary.last_score, summary.best
        );
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_cli_defaults() {
            let cli = Cli::try_parse_from(["flappy-canvas"]).unwrap();
            assert_eq!(cli.seed, 0xF1A9);
            assert_eq!(cli.ticks, 7200);
            assert!(cli.tuning.is_none());
            assert!(!cli.print_tuning);
        }

        #[test]
        fn test_cli_accepts_both_value_forms() {
            let cli = Cli::try_parse_from([
                "flappy-canvas",
                "--seed=5",
                "--ticks",
                "600",
                "--tuning",
                "fast.json",
            ])
            .unwrap();
            assert_eq!(cli.seed, 5);
            assert_eq!(cli.ticks, 600);
            assert_eq!(cli.tuning, Some(PathBuf::from("fast.json")));
        }

        #[test]
        fn test_cli_rejects_bad_values() {
            assert!(Cli::try_parse_from(["flappy-canvas", "--seed", "abc"]).is_err());
            assert!(Cli::try_parse_from(["flappy-canvas", "--bogus"]).is_err());
        }

        #[test]
        fn test_cli_help_is_not_a_parse_failure() {
            let err = Cli::try_parse_from(["flappy-canvas", "--help"]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        }

        #[test]
        fn test_missing_tuning_file_is_an_error() {
            let err = read_tuning(Path::new("/nonexistent/tuning.json")).unwrap_err();
            assert!(format!("{:#}", err).contains("failed to read"));
        }

        #[test]
        fn test_headless_run_is_deterministic() {
            let a = run_headless(42, 3000, Tuning::default());
            let b = run_headless(42, 3000, Tuning::default());
            assert_eq!((a.rounds, a.last_score, a.best), (b.rounds, b.last_score, b.best));
            assert!(a.best >= a.last_score);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Flappy Canvas (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    native::run(native::Cli::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

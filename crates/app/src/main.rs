mod frame_input;
mod graph_render;
mod window_config;

use std::env;
use std::process;
use std::rc::Rc;

use app::seed::{SeedChoice, ViewerArgs, generate_runtime_seed, parse_viewer_args};
use app::viewer::ViewerState;
use levelgen::{GeneratorConfig, LevelGenerator, StepperFactories, Template, TemplateStore};
use macroquad::input::KeyCode;
use macroquad::window::{Conf, next_frame, screen_height, screen_width};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

fn window_conf() -> Conf {
    window_config::build_window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let mut viewer_args = match parse_viewer_args(&args, generate_runtime_seed()) {
        Ok(parsed) => parsed,
        Err(err) => {
            error!("{err}");
            eprintln!("usage: app [--seed N] [--target-nodes N]");
            process::exit(2);
        }
    };

    let factories = Rc::new(StepperFactories::standard());
    let templates = match TemplateStore::standard() {
        Ok(store) => store.templates().to_vec(),
        Err(err) => {
            error!("built-in templates are invalid: {err}");
            process::exit(1);
        }
    };

    let mut generator = start_generation(&factories, &templates, viewer_args);
    let mut viewer = ViewerState::new();

    loop {
        let keys_pressed = frame_input::capture_keys_pressed();
        if keys_pressed.contains(&KeyCode::Escape) {
            break;
        }

        let range = f64::from(screen_width().min(screen_height()));
        viewer.tick(&mut generator, &keys_pressed, range);
        if viewer.restart_requested {
            viewer_args.seed = SeedChoice::Generated(generate_runtime_seed());
            generator = start_generation(&factories, &templates, viewer_args);
            viewer = ViewerState::new();
        }

        graph_render::draw_frame(&generator, &viewer, range);
        next_frame().await;
    }
}

fn start_generation(
    factories: &Rc<StepperFactories>,
    templates: &[Rc<Template>],
    args: ViewerArgs,
) -> LevelGenerator {
    let config = GeneratorConfig {
        target_node_count: args.target_nodes,
        ..GeneratorConfig::with_seed(args.seed.value())
    };
    info!(seed = config.seed, source = ?args.seed, "starting generation");
    LevelGenerator::new(Rc::clone(factories), config, templates.to_vec())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_target(false).compact().init();
}

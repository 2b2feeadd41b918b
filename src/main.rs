use log::{error, info};
use std::env;

use fishing_derby_bot::config::Config;
use fishing_derby_bot::controller::{HumanController, MinimaxController, PlayerController};
use fishing_derby_bot::game_tree::GridProvider;
use fishing_derby_bot::protocol::JsonLinesTransport;

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("starting fishing-derby agent...");

    // Load configuration once at startup
    let config = Config::load_or_default();
    let provider = GridProvider::new(&config.game);

    // The runner launches us with the controller kind as the only argument
    let kind = env::args().nth(1).unwrap_or_else(|| "minimax".to_string());
    let mut controller: Box<dyn PlayerController> = match kind.as_str() {
        "human" => Box::new(HumanController),
        _ => Box::new(MinimaxController::new(config, provider)),
    };

    let mut transport = JsonLinesTransport::stdio();
    match controller.player_loop(&mut transport) {
        Ok(()) => info!("player loop finished"),
        Err(e) => {
            error!("player loop terminated: {}", e);
            std::process::exit(1);
        }
    }
}

use clap::Parser;
use snappaste::cli::{handle_config_action, run_ping, run_send, Args, Command, SendOptions};
use snappaste::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    config.apply_env();
    if let Some(server) = args.server {
        config.server.url = server;
    }

    let result = match args.command {
        Command::Send {
            input,
            zoom,
            rotate,
            crop,
            viewport,
            quick,
            output,
        } => {
            let options = SendOptions {
                input,
                zoom,
                rotate,
                crop,
                viewport,
                quick,
                output,
            };
            run_send(&config, options).await
        }
        Command::Ping => run_ping(&config).await,
        Command::Config { action } => {
            handle_config_action(action, &config, args.config.as_deref());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

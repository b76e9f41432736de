use anyhow::{Context, bail};
use dioxus::prelude::*;
use std::env;
use std::process;
use std::sync::OnceLock;

mod ui;

use machikado_config::Config;
use ui::App;

static CONFIG: OnceLock<Config> = OnceLock::new();

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("machikado starting up");

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("startup failed: {e:#}");
            eprintln!("Error: {e:#}");
            let program_name = env::args()
                .next()
                .unwrap_or_else(|| "machikado".to_string());
            eprintln!("Usage: {program_name} [content-folder-path]");
            eprintln!("Or set [content] root in {}", Config::config_path().display());
            process::exit(1);
        }
    };

    let window_title = config.site.title.clone();
    let _ = CONFIG.set(config);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_window_config(&window_title))
        .launch(app_root);
}

/// Config file (or defaults), with the content root optionally taken from
/// the single CLI argument.
fn load_config() -> anyhow::Result<Config> {
    let config_path = Config::config_path();
    log::info!("Config path: {}", config_path.display());

    let config = Config::load()
        .with_context(|| format!("failed to load {}", config_path.display()))?
        .unwrap_or_else(|| {
            log::info!("no config file found, using defaults");
            Config::default()
        });

    let args: Vec<String> = env::args().skip(1).collect();
    let config = match args.as_slice() {
        [] => config,
        [root] => {
            log::info!("Using content root from CLI argument: {root}");
            config.with_content_root(root)
        }
        _ => bail!("expected at most one argument"),
    };

    if !config.content.root.is_dir() {
        bail!(
            "content root '{}' is not a directory",
            config.content.root.display()
        );
    }
    Ok(config)
}

fn app_root() -> Element {
    let config = CONFIG.get().cloned().unwrap_or_default();

    rsx! {
        App { config }
    }
}

fn make_window_config(title: &str) -> dioxus::desktop::Config {
    use dioxus::desktop::{Config, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title(title)
        .with_always_on_top(false);

    Config::default().with_window(window)
}

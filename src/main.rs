// src/main.rs
use std::env;

use tracing::error;
use tracing_subscriber::EnvFilter;

use moviehub::api::ApiClient;
use moviehub::app::HubApp;
use moviehub::config::load_config;

fn pick_renderer() -> eframe::Renderer {
    match env::var("MOVIEHUB_RENDERER").as_deref() {
        Ok("glow") => eframe::Renderer::Glow,
        Ok("wgpu") => eframe::Renderer::Wgpu,
        _ => {
            // Default: Windows = WGPU (DX12), Others = Glow (GL)
            #[cfg(target_os = "windows")]
            {
                eframe::Renderer::Wgpu
            }
            #[cfg(not(target_os = "windows"))]
            {
                eframe::Renderer::Glow
            }
        }
    }
}

fn main() -> eframe::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let cfg = load_config();
    let api = match ApiClient::new(&cfg) {
        Ok(api) => api,
        Err(e) => {
            error!("http client init failed: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        renderer: pick_renderer(),
        multisampling: 0,
        ..Default::default()
    };

    match eframe::run_native(
        "MovieHub",
        options,
        Box::new(move |_cc| Ok(Box::new(HubApp::new(api)))),
    ) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("eframe failed to start: {e:?}");
            error!("Hint: try MOVIEHUB_RENDERER=wgpu or glow.");
            Err(e)
        }
    }
}

use clap::Parser;
use onair_core::Config;
use onair_device::sim::SimBoard;
use onair_device::{actor, Indicator};
use onair_server::state::AppState;

/// Serve the Zoom webhook endpoint and drive the on-air indicator.
///
/// The board connection is the deployment's concern; this binary wires the
/// bundled simulator, which traces pin writes (`RUST_LOG=onair_device=debug`).
/// Swap in a real `Board` implementation to drive hardware.
#[derive(Parser)]
#[command(
    name = "onair",
    about = "Drive an RGB on-air light from Zoom webhook events",
    version
)]
struct Cli {
    /// Shared secret for the endpoint validation challenge
    #[arg(long, env = "ZOOM_SECRET_TOKEN", hide_env_values = true)]
    zoom_secret_token: String,

    /// Participant whose join/leave events drive the indicator
    #[arg(long, env = "ZOOM_USERNAME")]
    zoom_username: String,

    /// Pin names in red,green,blue order
    #[arg(long, env = "RGB_PINS", value_delimiter = ',', default_value = "18,5,19")]
    rgb_pins: Vec<String>,

    /// PWM frequency configured on each pin at setup
    #[arg(long, env = "PWM_FREQUENCY_HZ", default_value_t = 3000)]
    pwm_frequency_hz: u32,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8090)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let pin_names = pin_array(cli.rgb_pins)?;

    // Device setup is fatal: refuse to accept traffic if a pin is missing.
    let board = SimBoard::new();
    let indicator = Indicator::setup(&board, &pin_names, cli.pwm_frequency_hz).await?;
    let (actuation, actor_task) = actor::spawn(indicator);

    let state = AppState::new(
        Config::new(cli.zoom_secret_token, cli.zoom_username),
        actuation,
    );

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cli.port)).await?;
    onair_server::serve(listener, state).await?;

    // `serve` returned on Ctrl-C and dropped the last actuation handle;
    // wait for the actor to force the indicator back to idle before exiting.
    actor_task.await?;
    Ok(())
}

fn pin_array(pins: Vec<String>) -> anyhow::Result<[String; 3]> {
    pins.try_into().map_err(|pins: Vec<String>| {
        anyhow::anyhow!("expected exactly three pins (red,green,blue), got {pins:?}")
    })
}

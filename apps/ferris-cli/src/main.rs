use clap::{Parser, Subcommand};
use ferris_input::Action;
use ferris_render::{DebugTextRenderer, Frame, ProjectionConfig, Renderer, WheelConfig};
use ferris_sim::state::wrap_degrees;
use ferris_sim::SimState;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ferris-cli", about = "Headless ferris wheel tools")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the animation clock for a number of ticks and print the final state
    Simulate {
        /// Number of clock ticks to run
        #[arg(short, long, default_value = "10")]
        ticks: u32,
        /// Start with the animation running
        #[arg(short, long)]
        animate: bool,
        /// Print the state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a text rendering of the composed scene
    Scene {
        /// Wheel angle in degrees
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        angle: f32,
        /// Camera azimuth in radians
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        azimuth: f32,
        /// Camera height
        #[arg(long, default_value = "3", allow_hyphen_values = true)]
        height: f32,
        /// Switch the directional light off
        #[arg(long)]
        no_sun: bool,
        /// Switch the point light off
        #[arg(long)]
        no_lamp: bool,
        /// Include the lit color of each item
        #[arg(long)]
        shade: bool,
    },
}

fn simulate(ticks: u32, animate: bool) -> SimState {
    let mut sim = SimState::new();
    if animate {
        sim.apply(Action::ToggleAnimation);
    }
    sim.run_ticks(ticks);
    sim
}

fn scene_state(angle: f32, azimuth: f32, height: f32, no_sun: bool, no_lamp: bool) -> SimState {
    let mut sim = SimState::new();
    sim.animation.angle = wrap_degrees(angle);
    sim.camera.azimuth = azimuth;
    sim.camera.height = height;
    sim.lighting.directional = !no_sun;
    sim.lighting.point = !no_lamp;
    sim
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("ferris-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("sim: {}", ferris_sim::crate_info());
            println!("input: {}", ferris_input::crate_info());
            println!("render: {}", ferris_render::crate_info());
        }
        Commands::Simulate {
            ticks,
            animate,
            json,
        } => {
            tracing::debug!(ticks, animate, "simulating");
            let sim = simulate(ticks, animate);
            if json {
                println!("{}", serde_json::to_string_pretty(&sim)?);
            } else {
                let a = &sim.animation;
                println!(
                    "ticks={ticks} angle={:.1} animating={} sun={} lamp={}",
                    a.angle, a.animating, sim.lighting.directional, sim.lighting.point
                );
            }
        }
        Commands::Scene {
            angle,
            azimuth,
            height,
            no_sun,
            no_lamp,
            shade,
        } => {
            let sim = scene_state(angle, azimuth, height, no_sun, no_lamp);
            let frame = Frame::compose(&sim, &WheelConfig::default(), ProjectionConfig::default());
            let renderer = DebugTextRenderer { shade };
            print!("{}", renderer.render(&frame));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_simulation_keeps_angle() {
        let sim = simulate(100, false);
        assert_eq!(sim.animation.angle, 0.0);
    }

    #[test]
    fn long_simulation_wraps() {
        // 200 ticks * 2 degrees = 400 -> 40
        let sim = simulate(200, true);
        assert!((sim.animation.angle - 40.0).abs() < 1e-3);
    }

    #[test]
    fn scene_state_wraps_angle_and_sets_lights() {
        let sim = scene_state(-90.0, 1.0, 2.0, true, false);
        assert!((sim.animation.angle - 270.0).abs() < 1e-5);
        assert!(!sim.lighting.directional);
        assert!(sim.lighting.point);
        assert_eq!(sim.camera.height, 2.0);
    }

    #[test]
    fn cli_parses_negative_angle() {
        let cli = Cli::parse_from(["ferris-cli", "scene", "--angle", "-45"]);
        match cli.command {
            Commands::Scene { angle, .. } => assert_eq!(angle, -45.0),
            _ => panic!("expected scene command"),
        }
    }
}

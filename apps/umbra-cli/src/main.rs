use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use umbra_render::{DebugTextRenderer, FlyCamera, RenderSettings, Renderer, ShadowFrame};
use umbra_shadows::{cascade_splits, split_view_depth};

#[derive(Parser)]
#[command(name = "umbra-cli", about = "Inspect cascaded shadow map configurations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Print normalized and camera-space cascade splits
    Splits {
        #[arg(long, default_value = "0.1")]
        near: f32,
        #[arg(long, default_value = "1000")]
        far: f32,
        /// Number of cascades
        #[arg(short, long, default_value = "4")]
        cascades: usize,
        /// 0 = uniform, 1 = logarithmic
        #[arg(short, long, default_value = "0.5")]
        blend: f32,
    },
    /// Compute one frame of cascades and print them
    Cascades {
        /// Render settings file (.yaml, .yml or .json)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the number of cascades
        #[arg(short, long)]
        cascades: Option<usize>,
        /// Override the split blend factor
        #[arg(short, long)]
        blend: Option<f32>,
        /// Use the stable (reference-point anchored) fit
        #[arg(long)]
        stable: bool,
        /// Derive the light up vector from the view direction
        #[arg(long)]
        cross_up: bool,
        /// Camera yaw in degrees
        #[arg(long, default_value = "-90", allow_hyphen_values = true)]
        yaw: f32,
        /// Camera pitch in degrees
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        pitch: f32,
        #[arg(long, default_value = "1.7777778")]
        aspect: f32,
        /// Print full view-projection matrices
        #[arg(short, long)]
        matrices: bool,
    },
    /// Print the default render settings as YAML
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("umbra-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", umbra_common::crate_info());
            println!("shadows: {}", umbra_shadows::crate_info());
            println!("render: {}", umbra_render::crate_info());
            println!("max cascades: {}", umbra_shadows::MAX_CASCADES);
        }
        Commands::Splits {
            near,
            far,
            cascades,
            blend,
        } => {
            println!("Splits: near={near}, far={far}, cascades={cascades}, blend={blend}");
            let splits = cascade_splits(near, far, cascades, blend)?;
            for (i, split) in splits.iter().enumerate() {
                println!(
                    "  [{i}] normalized={split:.5} depth={:.3}",
                    split_view_depth(near, far - near, *split)
                );
            }
        }
        Commands::Cascades {
            config,
            cascades,
            blend,
            stable,
            cross_up,
            yaw,
            pitch,
            aspect,
            matrices,
        } => {
            let mut settings = match config {
                Some(path) => RenderSettings::load(path)?,
                None => RenderSettings::default(),
            };
            if let Some(count) = cascades {
                settings.shadows.number_cascades = count;
            }
            if let Some(blend) = blend {
                settings.shadows.cascade_splits_blend_factor = blend;
            }
            settings.shadows.new_cascade_calculation |= stable;
            settings.shadows.cross_product_up |= cross_up;
            settings.validate()?;

            let camera = FlyCamera {
                yaw: yaw.to_radians(),
                pitch: pitch.to_radians(),
                ..FlyCamera::looking_down_neg_z(settings.perspective, aspect)
            };
            tracing::debug!(?camera, "camera");

            let frame = ShadowFrame::prepare(&camera, &settings)?;
            let renderer = if matrices {
                DebugTextRenderer::with_matrices()
            } else {
                DebugTextRenderer::new()
            };
            print!("{}", renderer.render(&frame));
        }
        Commands::Config => {
            print!("{}", RenderSettings::default().to_yaml_string()?);
        }
    }

    Ok(())
}

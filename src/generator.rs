use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::IconError;
use crate::export::{self, ICO_SIZES};
use crate::strategy::Strategy;

/// Files written by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifacts {
    pub png: PathBuf,
    pub ico: PathBuf,
}

/// Render the icon with `strategy` and write the PNG and ICO artifacts.
///
/// The canvas is fully rendered before anything touches the filesystem, so
/// a missing logo leaves the output directory untouched.
pub fn generate_icon(config: &AppConfig, strategy: Strategy) -> Result<OutputArtifacts, IconError> {
    info!("Generating icon ({} strategy)", strategy.name());
    let canvas = strategy.render(config)?;
    debug!("Canvas ready: {0}x{0} {1:?}", canvas.side(), canvas.image.color());

    export::ensure_dir(&config.output_dir)?;

    let artifacts = OutputArtifacts {
        png: config.png_path(),
        ico: config.ico_path(),
    };
    export::write_png(&canvas, &artifacts.png)?;
    export::write_ico(&canvas, &artifacts.ico, &ICO_SIZES)?;

    info!(
        "Icon written: {} and {}",
        artifacts.png.display(),
        artifacts.ico.display()
    );
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn config_in(dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.output_dir = dir.join("desktop").join("assets");
        config.logo_path = dir.join("logo.png");
        config.procedural.font = "no-such-font-for-tests.ttf".into();
        config
    }

    fn ico_sizes(path: &std::path::Path) -> Vec<u32> {
        let icon = ico::IconDir::read(std::fs::File::open(path).unwrap()).unwrap();
        icon.entries().iter().map(|e| e.width()).collect()
    }

    #[test]
    fn test_procedural_run_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let out = generate_icon(&config, Strategy::Procedural).unwrap();

        assert_eq!(out.png, config.output_dir.join("icon.png"));
        let png = image::open(&out.png).unwrap();
        assert_eq!((png.width(), png.height()), (512, 512));
        assert_eq!(ico_sizes(&out.ico), ICO_SIZES.to_vec());
    }

    #[test]
    fn test_logo_run_produces_rgba_png() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        RgbImage::from_pixel(300, 300, Rgb([200, 30, 30]))
            .save(&config.logo_path)
            .unwrap();

        let out = generate_icon(&config, Strategy::Logo).unwrap();

        let png = image::open(&out.png).unwrap();
        assert_eq!(png.color(), image::ColorType::Rgba8);
        let png = png.to_rgba8();
        assert_eq!(*png.get_pixel(10, 10), image::Rgba([255, 255, 255, 255]));
        assert_eq!(*png.get_pixel(256, 256), image::Rgba([200, 30, 30, 255]));
        assert_eq!(ico_sizes(&out.ico), ICO_SIZES.to_vec());
    }

    #[test]
    fn test_missing_logo_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let err = generate_icon(&config, Strategy::Logo).unwrap_err();

        assert!(matches!(err, IconError::MissingAsset { ref path } if *path == config.logo_path));
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn test_rerun_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        generate_icon(&config, Strategy::Procedural).unwrap();

        RgbImage::from_pixel(64, 64, Rgb([0, 0, 0]))
            .save(&config.logo_path)
            .unwrap();
        let out = generate_icon(&config, Strategy::Logo).unwrap();

        let png = image::open(&out.png).unwrap();
        assert_eq!(png.color(), image::ColorType::Rgba8);
    }
}

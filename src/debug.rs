use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::debug;

use crate::detection::ExtractionStages;
use crate::error::{Error, Result};

/// Where intermediate extraction images are written
#[derive(Clone, Debug)]
pub struct DebugConfig {
    output_dir: PathBuf,
}

impl DebugConfig {
    /// The directory must be empty or non-existent; it is created if missing
    pub fn new(output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let mut entries = std::fs::read_dir(&output_dir)?;
            if entries.next().is_some() {
                return Err(Error::DebugOutput {
                    path: output_dir,
                    reason: "directory is not empty".to_string(),
                });
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `NN_<step_name>.png`
    pub fn save_stage(&self, index: usize, step_name: &str, img: &DynamicImage) -> Result<PathBuf> {
        let filename = format!(
            "{:02}_{}.png",
            index,
            step_name.to_lowercase().replace(' ', "_")
        );
        let path = self.output_dir.join(&filename);
        img.save(&path)?;
        debug!("Debug: saved {}", filename);
        Ok(path)
    }

    /// Dump the input and every intermediate image of one extraction
    pub fn save_extraction(&self, input: &DynamicImage, stages: &ExtractionStages) -> Result<()> {
        self.save_stage(0, "Input", input)?;
        self.save_stage(1, "Grayscale", &DynamicImage::ImageLuma8(stages.grayscale.clone()))?;
        self.save_stage(2, "Gaussian Blur", &DynamicImage::ImageLuma8(stages.blurred.clone()))?;
        self.save_stage(3, "Edge Detection", &DynamicImage::ImageLuma8(stages.edges.clone()))?;
        Ok(())
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::ImageFormat;
use rayon::prelude::*;

use crate::settings::{Mode, Settings};
use lineart_rendr::{LuminosityField, render_dots, render_lines};

/// Recognized image extensions (compared case-insensitively).
const IMAGE_EXTS: &[&str] = &["jpg", "jpeg", "png", "bmp"];

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, anyhow::Error)>,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.written.len()
    }

    /// "1 image processed." / "3 images processed."
    pub fn summary(&self) -> String {
        let count = self.processed();
        format!("{count} image{} processed.", if count < 2 { "" } else { "s" })
    }
}

/// List the images directly inside `dir`, sorted by path.
///
/// # Errors
/// Returns an error if the folder cannot be read.
pub fn collect_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("cannot read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && is_image(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| IMAGE_EXTS.contains(&ext.to_lowercase().as_str()))
}

/// `<output_dir>/<input stem>.png`
pub fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".png");
    output_dir.join(name)
}

/// Render a single image and write it as PNG.
///
/// # Errors
/// Returns an error if decoding, rendering or writing fails.
pub fn render_file(input: &Path, output: &Path, settings: &Settings) -> Result<()> {
    let source = LuminosityField::open(input)
        .with_context(|| format!("cannot load {}", input.display()))?;

    let canvas = match settings.mode {
        Mode::Lines => render_lines(&source, &settings.lines),
        Mode::Dots => render_dots(&source, &settings.dots),
    }
    .with_context(|| format!("cannot render {}", input.display()))?;

    canvas
        .save_with_format(output, ImageFormat::Png)
        .with_context(|| format!("cannot write {}", output.display()))?;
    Ok(())
}

/// Render every input into `output_dir`.
///
/// A failing image is recorded in the report and does not stop the others.
///
/// # Errors
/// Returns an error only if `output_dir` cannot be created.
pub fn run(
    inputs: &[PathBuf],
    output_dir: &Path,
    settings: &Settings,
    parallel: bool,
) -> Result<BatchReport> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("cannot create {}", output_dir.display()))?;

    let render_one = |input: &PathBuf| {
        let output = output_path(output_dir, input);
        let result = render_file(input, &output, settings);
        (input.clone(), output, result)
    };
    let outcomes: Vec<_> = if parallel {
        inputs.par_iter().map(render_one).collect()
    } else {
        inputs.iter().map(render_one).collect()
    };

    let mut report = BatchReport::default();
    for (input, output, result) in outcomes {
        match result {
            Ok(()) => {
                log::info!("{} -> {}", input.display(), output.display());
                report.written.push(output);
            }
            Err(e) => {
                log::warn!("skipping {}: {e:#}", input.display());
                report.failed.push((input, e));
            }
        }
    }
    Ok(report)
}

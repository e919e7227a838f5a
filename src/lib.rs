pub mod color;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod mask;
pub mod persist;
pub mod surface;
pub mod wheel;
pub use error::{AppError, AppResult};

use std::path::{Path, PathBuf};

use editor::MaskEditor;
use geometry::SurfaceSize;
use persist::PersistedMaskSet;

const DEFAULT_SURFACE_SIZE: u32 = 400;
const DEFAULT_OUTPUT: &str = "gamut-mask.png";

/// Renders the wheel, optionally with a saved mask set, and writes it as PNG.
///
/// Arguments are recognised by shape: a `.json` path is the preset, a
/// `.png` path is the output (extensions in any case) and a bare integer is
/// the surface edge length. Returns the path written.
pub fn run<I>(args: I) -> AppResult<PathBuf>
where
    I: IntoIterator<Item = String>,
{
    logging::init();
    render_with_config(args, config::load_engine_config())
}

fn render_with_config<I>(args: I, config: config::EngineConfig) -> AppResult<PathBuf>
where
    I: IntoIterator<Item = String>,
{
    let mut preset = None;
    let mut output = PathBuf::from(DEFAULT_OUTPUT);
    let mut edge = DEFAULT_SURFACE_SIZE;
    for arg in args {
        if has_extension(&arg, "json") {
            preset = Some(PathBuf::from(arg));
        } else if has_extension(&arg, "png") {
            output = PathBuf::from(arg);
        } else {
            edge = arg
                .parse()
                .ok()
                .filter(|edge| *edge > 0)
                .ok_or(AppError::InvalidSize(arg))?;
        }
    }

    let mut editor = MaskEditor::new(SurfaceSize::new(edge, edge), config)?;
    tracing::info!(size = edge, "starting gamut-mask render");

    if let Some(path) = preset.as_deref() {
        let set = read_preset(path)?;
        editor.load_persisted(&set)?;
    }

    let bytes = editor.export_raster()?;
    std::fs::write(&output, bytes).map_err(|source| AppError::Io {
        path: output.clone(),
        source,
    })?;
    tracing::info!(path = %output.display(), masks = editor.masks().len(), "raster written");
    Ok(output)
}

fn has_extension(arg: &str, extension: &str) -> bool {
    Path::new(arg)
        .extension()
        .is_some_and(|found| found.eq_ignore_ascii_case(extension))
}

fn read_preset(path: &Path) -> AppResult<PersistedMaskSet> {
    let json = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(PersistedMaskSet::from_json(&json)?)
}

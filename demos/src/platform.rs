//! Platform services implementation.

use crate::CLIOpts;
use image::DynamicImage;
use learngl::texture::{load_image, TextureError};
use learngl_demos::PlatformServices;
use std::{
  collections::{hash_map::Entry, HashMap},
  error::Error,
  fmt,
  path::{Path, PathBuf},
};

/// Desktop implementation of the [`PlatformServices`] API.
///
/// Textures are loaded lazily, the first time they’re asked for, and kept around afterwards.
#[derive(Debug)]
pub struct DesktopPlatformServices {
  shader_root: PathBuf,
  texture_root: PathBuf,
  textures: HashMap<String, DynamicImage>,
}

impl DesktopPlatformServices {
  pub fn new(cli_opts: &CLIOpts) -> Self {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let shader_root = cli_opts
      .shaders
      .clone()
      .unwrap_or_else(|| manifest_dir.join("shaders"));
    let texture_root = cli_opts
      .textures
      .clone()
      .unwrap_or_else(|| manifest_dir.join("textures"));

    log::debug!(
      "shaders: {}, textures: {}",
      shader_root.display(),
      texture_root.display()
    );

    Self {
      shader_root,
      texture_root,
      textures: HashMap::new(),
    }
  }
}

#[derive(Debug)]
pub enum DesktopFetchError {
  TextureError(PathBuf, TextureError),
}

impl fmt::Display for DesktopFetchError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      DesktopFetchError::TextureError(ref path, ref e) => {
        write!(f, "cannot fetch texture {}: {}", path.display(), e)
      }
    }
  }
}

impl Error for DesktopFetchError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      DesktopFetchError::TextureError(_, e) => Some(e),
    }
  }
}

impl PlatformServices for DesktopPlatformServices {
  type FetchError = DesktopFetchError;

  fn shader_path(&self, name: &str) -> PathBuf {
    self.shader_root.join(name)
  }

  fn fetch_texture(&mut self, name: &str) -> Result<&DynamicImage, Self::FetchError> {
    match self.textures.entry(name.to_owned()) {
      Entry::Occupied(entry) => Ok(entry.into_mut()),

      Entry::Vacant(entry) => {
        let path = self.texture_root.join(name);
        let img = load_image(&path).map_err(|e| DesktopFetchError::TextureError(path, e))?;
        Ok(entry.insert(img))
      }
    }
  }
}

//! Layout documents and images.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::rc::Rc;

use vitrine::layout::Layouts;
use vitrine::Config;
use vitrine::Error;

/// Layout documents compiled into the binary, by name.
const BUILTIN_LAYOUTS: &[(&str, &str)] = &[
  ("activity/main", include_str!("../../res/layout/activity/main.json")),
  ("tabs/components", include_str!("../../res/layout/tabs/components.json")),
  ("tabs/settings", include_str!("../../res/layout/tabs/settings.json")),
  ("tabs/text_test", include_str!("../../res/layout/tabs/text_test.json")),
  ("tabs/transform", include_str!("../../res/layout/tabs/transform.json")),
  (
    "tabs/recycling_list",
    include_str!("../../res/layout/tabs/recycling_list.json"),
  ),
  (
    "views/captioned_image",
    include_str!("../../res/layout/views/captioned_image.json"),
  ),
  ("views/pokemon", include_str!("../../res/layout/views/pokemon.json")),
];

/// Everything the UI loads from disk or from the binary.
pub struct Resources {
  layouts: Layouts,
  search_path: Vec<PathBuf>,
  images: RefCell<HashMap<String, Option<Rc<image::RgbaImage>>>>,
}

impl Resources {
  /// Returns the built-in resources only.
  pub fn builtin() -> Result<Self, Error> {
    let mut layouts = Layouts::new();
    for (name, json) in BUILTIN_LAYOUTS {
      layouts.insert_json(*name, json)?;
    }

    Ok(Self {
      layouts,
      search_path: vec![PathBuf::from("res")],
      images: RefCell::new(HashMap::new()),
    })
  }

  /// Returns the built-in resources, overridden by whatever the configured
  /// resource directory holds.
  pub fn load(config: &Config) -> Result<Self, Error> {
    let mut resources = Self::builtin()?;
    if let Some(dir) = &config.resource_dir {
      let layouts = dir.join("layout");
      if layouts.is_dir() {
        let count = resources.layouts.load_dir(&layouts)?;
        log::info!("loaded {} layouts from {}", count, layouts.display());
      }
      resources.search_path.insert(0, dir.clone());
    }
    Ok(resources)
  }

  pub fn layouts(&self) -> &Layouts {
    &self.layouts
  }

  /// Loads the PNG at the resource path `path`, caching the result. Missing
  /// or undecodable images yield `None`, once per path.
  pub fn image(&self, path: &str) -> Option<Rc<image::RgbaImage>> {
    if let Some(image) = self.images.borrow().get(path) {
      return image.clone();
    }

    let image = self
      .search_path
      .iter()
      .map(|dir| dir.join(path))
      .find(|p| p.is_file())
      .and_then(|p| decode(&p))
      .map(Rc::new);
    if image.is_none() {
      log::debug!("no image at {}", path);
    }

    self
      .images
      .borrow_mut()
      .insert(path.to_string(), image.clone());
    image
  }
}

fn decode(path: &Path) -> Option<image::RgbaImage> {
  match image::open(path) {
    Ok(image) => Some(image.into_rgba8()),
    Err(e) => {
      log::warn!("could not decode {}: {}", path.display(), e);
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_layouts_parse() {
    let resources = Resources::builtin().unwrap();
    let names = resources.layouts().names().collect::<Vec<_>>();
    assert_eq!(names.len(), BUILTIN_LAYOUTS.len());
    assert!(resources.layouts().get("activity/main").is_ok());
  }

  #[test]
  fn missing_images_are_remembered() {
    let resources = Resources::builtin().unwrap();
    assert!(resources.image("img/nope.png").is_none());
    assert!(resources.images.borrow().contains_key("img/nope.png"));
  }
}

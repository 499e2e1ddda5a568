//! Pokemon, the items of the recycling list.

use serde::Deserialize;
use serde::Serialize;

/// A Pokemon entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
  /// This Pokemon's National Pokedex number, zero-padded to three digits.
  pub id: String,
  /// This Pokemon's display name.
  pub name: String,
}

impl Pokemon {
  /// Creates a new [`Pokemon`].
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
    }
  }

  /// Returns the resource path of this Pokemon's list thumbnail.
  pub fn thumbnail_path(&self) -> String {
    format!("img/pokemon/thumbnails/{}.png", self.id)
  }

  /// Returns the resource path of this Pokemon's full-size artwork.
  pub fn image_path(&self) -> String {
    format!("img/pokemon/{}.png", self.id)
  }

  /// Returns the flavor text shown on this Pokemon's detail page.
  pub fn description(&self) -> String {
    format!(
      "这是一只名叫 {} 的宝可梦\n收集所有宝可梦来成为萨满王!",
      self.name
    )
  }
}

impl Default for Pokemon {
  fn default() -> Self {
    Self::new("001", "默认宝可梦")
  }
}

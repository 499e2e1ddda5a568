//! Ordered collections of [`Pokemon`].

use std::fs;
use std::iter::FromIterator;
use std::ops::Deref;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Pokemon;
use crate::Error;

const BUILTIN: &str = include_str!("../../res/pokemon.json");

/// A flat, ordered list of Pokemon.
///
/// A `Roster` is the backing collection of a list data source. It is only
/// mutated between layout passes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
  pokemon: Vec<Pokemon>,
}

impl Roster {
  /// Creates an empty roster.
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the nine Pokemon the showcase ships with.
  pub fn builtin() -> Result<Self, Error> {
    Self::from_json(BUILTIN)
  }

  /// Parses a roster from a JSON array of `{ "id", "name" }` objects.
  pub fn from_json(json: &str) -> Result<Self, Error> {
    Ok(serde_json::from_str(json)?)
  }

  /// Loads a roster from a JSON file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
    Self::from_json(&fs::read_to_string(path)?)
  }

  /// Appends a Pokemon to the end of the roster.
  pub fn push(&mut self, pokemon: Pokemon) {
    self.pokemon.push(pokemon)
  }

  /// Removes every Pokemon from the roster.
  pub fn clear(&mut self) {
    self.pokemon.clear()
  }
}

impl Deref for Roster {
  type Target = [Pokemon];
  fn deref(&self) -> &[Pokemon] {
    &self.pokemon
  }
}

impl From<Vec<Pokemon>> for Roster {
  fn from(pokemon: Vec<Pokemon>) -> Self {
    Self { pokemon }
  }
}

impl FromIterator<Pokemon> for Roster {
  fn from_iter<T>(iter: T) -> Self
  where
    T: IntoIterator<Item = Pokemon>,
  {
    Vec::from_iter(iter).into()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_roster() {
    let roster = Roster::builtin().unwrap();
    assert_eq!(roster.len(), 9);
    assert_eq!(roster[0], Pokemon::new("001", "妙蛙种子"));
    assert_eq!(roster[8], Pokemon::new("027", "穿山鼠"));
  }

  #[test]
  fn malformed_json_is_an_error() {
    assert!(matches!(
      Roster::from_json("[{\"id\": 1}]"),
      Err(Error::Json(_))
    ));
  }
}

//! Layout resources: named JSON trees describing how views nest.
//!
//! A layout document is a tree of nodes shaped like
//!
//! ```json
//! {
//!   "type": "Box",
//!   "id": "optional-id",
//!   "attributes": { "axis": "column" },
//!   "children": [ ... ]
//! }
//! ```
//!
//! `type` names a view in a [`ViewRegistry`][crate::registry::ViewRegistry];
//! everything else is optional.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::Error;

/// One node of a layout document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
  /// The registered view type to create for this node.
  #[serde(rename = "type")]
  pub kind: String,
  /// The name other code uses to find this node's view.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub attributes: BTreeMap<String, Value>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<Node>,
}

impl Node {
  /// Creates a bare node of the given type.
  pub fn new(kind: impl Into<String>) -> Self {
    Self {
      kind: kind.into(),
      id: None,
      attributes: BTreeMap::new(),
      children: Vec::new(),
    }
  }

  /// Finds the node with the given id, searching depth-first from (and
  /// including) this one.
  pub fn find(&self, id: &str) -> Option<&Node> {
    if self.id.as_deref() == Some(id) {
      return Some(self);
    }
    self.children.iter().find_map(|c| c.find(id))
  }

  /// Returns the ids of every node in this tree, in depth-first order.
  pub fn ids(&self) -> Vec<&str> {
    let mut ids = Vec::new();
    self.collect_ids(&mut ids);
    ids
  }

  fn collect_ids<'a>(&'a self, ids: &mut Vec<&'a str>) {
    if let Some(id) = &self.id {
      ids.push(id);
    }
    for child in &self.children {
      child.collect_ids(ids);
    }
  }

  pub fn attr_str(&self, name: &str) -> Option<&str> {
    self.attributes.get(name)?.as_str()
  }

  pub fn attr_f64(&self, name: &str) -> Option<f64> {
    self.attributes.get(name)?.as_f64()
  }

  pub fn attr_i64(&self, name: &str) -> Option<i64> {
    self.attributes.get(name)?.as_i64()
  }

  pub fn attr_bool(&self, name: &str) -> Option<bool> {
    self.attributes.get(name)?.as_bool()
  }
}

/// A set of named layout documents.
#[derive(Clone, Debug, Default)]
pub struct Layouts {
  documents: BTreeMap<String, Node>,
}

impl Layouts {
  /// Creates an empty set.
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a document, replacing any existing document with the same name.
  pub fn insert(&mut self, name: impl Into<String>, root: Node) {
    self.documents.insert(name.into(), root);
  }

  /// Parses and adds a document.
  pub fn insert_json(
    &mut self,
    name: impl Into<String>,
    json: &str,
  ) -> Result<(), Error> {
    let root = serde_json::from_str(json)?;
    self.insert(name, root);
    Ok(())
  }

  /// Adds every `.json` file under `dir`, recursively. A file at
  /// `dir/tabs/settings.json` becomes the document `tabs/settings`.
  ///
  /// Returns how many documents were loaded.
  pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, Error> {
    self.load_dir_with_prefix(dir.as_ref(), "")
  }

  fn load_dir_with_prefix(
    &mut self,
    dir: &Path,
    prefix: &str,
  ) -> Result<usize, Error> {
    let mut count = 0;
    for entry in fs::read_dir(dir)? {
      let path = entry?.path();
      let stem = match path.file_stem().and_then(|s| s.to_str()) {
        Some(stem) => stem,
        None => continue,
      };

      if path.is_dir() {
        let name = match path.file_name().and_then(|s| s.to_str()) {
          Some(name) => name,
          None => continue,
        };
        let prefix = format!("{}{}/", prefix, name);
        count += self.load_dir_with_prefix(&path, &prefix)?;
      } else if path.extension().map_or(false, |e| e == "json") {
        let name = format!("{}{}", prefix, stem);
        log::debug!("loading layout {} from {}", name, path.display());
        self.insert_json(name, &fs::read_to_string(&path)?)?;
        count += 1;
      }
    }
    Ok(count)
  }

  /// Looks up a document by name.
  pub fn get(&self, name: &str) -> Result<&Node, Error> {
    self
      .documents
      .get(name)
      .ok_or_else(|| Error::UnknownLayout(name.to_string()))
  }

  /// Looks up a document by name, checking that it declares every id in
  /// `ids`.
  pub fn require(&self, name: &str, ids: &[&str]) -> Result<&Node, Error> {
    let root = self.get(name)?;
    for &id in ids {
      if root.find(id).is_none() {
        return Err(Error::MissingView {
          layout: name.to_string(),
          id: id.to_string(),
        });
      }
    }
    Ok(root)
  }

  /// Returns the names of every document, in sorted order.
  pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
    self.documents.keys().map(String::as_str)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SETTINGS: &str = r#"{
    "type": "Box",
    "attributes": { "axis": "column", "grow": 2 },
    "children": [
      { "type": "BooleanCell", "id": "fps", "attributes": { "title": "FPS" } },
      { "type": "Box", "children": [
        { "type": "Slider", "id": "brightness", "attributes": { "progress": 0.5 } }
      ] }
    ]
  }"#;

  #[test]
  fn parse_and_find() {
    let mut layouts = Layouts::new();
    layouts.insert_json("tabs/settings", SETTINGS).unwrap();

    let root = layouts.get("tabs/settings").unwrap();
    assert_eq!(root.kind, "Box");
    assert_eq!(root.attr_str("axis"), Some("column"));
    assert_eq!(root.attr_i64("grow"), Some(2));
    assert_eq!(root.ids(), vec!["fps", "brightness"]);

    let slider = root.find("brightness").unwrap();
    assert_eq!(slider.kind, "Slider");
    assert_eq!(slider.attr_f64("progress"), Some(0.5));
    assert!(slider.children.is_empty());
  }

  #[test]
  fn missing_ids_are_reported() {
    let mut layouts = Layouts::new();
    layouts.insert_json("tabs/settings", SETTINGS).unwrap();

    assert!(layouts.require("tabs/settings", &["fps"]).is_ok());
    match layouts.require("tabs/settings", &["fps", "vsync"]) {
      Err(Error::MissingView { layout, id }) => {
        assert_eq!(layout, "tabs/settings");
        assert_eq!(id, "vsync");
      }
      other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(
      layouts.get("tabs/nope"),
      Err(Error::UnknownLayout(_))
    ));
  }

  #[test]
  fn load_nested_directories() {
    let dir = std::env::temp_dir()
      .join(format!("vitrine-layouts-{}", std::process::id()));
    fs::create_dir_all(dir.join("tabs")).unwrap();
    fs::write(dir.join("tabs/settings.json"), SETTINGS).unwrap();
    fs::write(dir.join("tabs/notes.txt"), "ignored").unwrap();

    let mut layouts = Layouts::new();
    let count = layouts.load_dir(&dir).unwrap();
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(count, 1);
    assert_eq!(layouts.names().collect::<Vec<_>>(), vec!["tabs/settings"]);
  }
}

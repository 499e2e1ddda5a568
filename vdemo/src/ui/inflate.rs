//! Turning layout documents into component trees.

use vitrine::layout::Node;
use vitrine::registry::ViewRegistry;
use vitrine::Error;

use crate::ui::component::Component;
use crate::ui::resources::Resources;

/// Attributes that place a node within its parent, which the parent reads.
const PLACEMENT_ATTRIBUTES: &[&str] = &[
  "width", "height", "grow", "visible", "tab",
];

/// The registry every view type is created through.
pub type Views = ViewRegistry<Box<dyn Component>>;

/// Builds component trees out of layout documents.
pub struct Inflater<'a> {
  resources: &'a Resources,
  views: &'a Views,
}

impl<'a> Inflater<'a> {
  pub fn new(resources: &'a Resources, views: &'a Views) -> Self {
    Self { resources, views }
  }

  /// Inflates the layout document `name`, after checking that it declares
  /// every id in `ids`.
  pub fn inflate_layout(
    &self,
    name: &str,
    ids: &[&str],
  ) -> Result<Box<dyn Component>, Error> {
    let root = self.resources.layouts().require(name, ids)?;
    log::debug!("inflating {}", name);
    self.inflate(root)
  }

  /// Inflates a single node and everything below it.
  ///
  /// The view is created, then asked to inflate its own content, then given
  /// its attributes, and finally its children.
  pub fn inflate(&self, node: &Node) -> Result<Box<dyn Component>, Error> {
    let mut view = self.views.create(&node.kind)?;
    view.inflate(self)?;

    for (name, value) in &node.attributes {
      if PLACEMENT_ATTRIBUTES.contains(&name.as_str()) {
        continue;
      }
      if !view.apply_attribute(name, value) {
        log::warn!("{} ignores attribute `{}`", node.kind, name);
      }
    }

    for child in &node.children {
      let component = self.inflate(child)?;
      view.add_child(child, component);
    }
    Ok(view)
  }
}

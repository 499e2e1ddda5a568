//! Every view type layout documents can name.

use vitrine::Error;

use crate::ui::component::applet_frame::AppletFrame;
use crate::ui::component::button::Button;
use crate::ui::component::cell::BooleanCell;
use crate::ui::component::cell::DetailCell;
use crate::ui::component::cell::RadioCell;
use crate::ui::component::container::Container;
use crate::ui::component::image::Image;
use crate::ui::component::input::InputCell;
use crate::ui::component::input::InputNumericCell;
use crate::ui::component::label::Label;
use crate::ui::component::recycler::RecyclerView;
use crate::ui::component::selector::SelectorCell;
use crate::ui::component::slider::Slider;
use crate::ui::component::slider::SliderCell;
use crate::ui::component::tab_frame::TabFrame;
use crate::ui::component::Component;
use crate::ui::inflate::Views;
use crate::ui::tab::components::ComponentsTab;
use crate::ui::tab::recycling_list::RecyclingListTab;
use crate::ui::tab::settings::SettingsTab;
use crate::ui::tab::text_test::TextTestTab;
use crate::ui::tab::transform::TransformTab;
use crate::ui::view::captioned_image::CaptionedImage;
use crate::ui::view::pokemon::PokemonView;
use crate::ui::view::transform_box::TransformBox;

fn make<C: Component + Default + 'static>() -> Box<dyn Component> {
  Box::new(C::default())
}

/// Registers the stock widgets.
pub fn register_widgets(views: &mut Views) -> Result<(), Error> {
  views.register("Box", make::<Container>)?;
  views.register("Label", make::<Label>)?;
  views.register("Button", make::<Button>)?;
  views.register("Slider", make::<Slider>)?;
  views.register("SliderCell", make::<SliderCell>)?;
  views.register("DetailCell", make::<DetailCell>)?;
  views.register("RadioCell", make::<RadioCell>)?;
  views.register("BooleanCell", make::<BooleanCell>)?;
  views.register("SelectorCell", make::<SelectorCell>)?;
  views.register("InputCell", make::<InputCell>)?;
  views.register("InputNumericCell", make::<InputNumericCell>)?;
  views.register("Image", make::<Image>)?;
  views.register("TabFrame", make::<TabFrame>)?;
  views.register("AppletFrame", make::<AppletFrame>)?;
  views.register("RecyclerFrame", make::<RecyclerView>)?;
  Ok(())
}

/// Registers the showcase's own views and tabs.
pub fn register_custom(views: &mut Views) -> Result<(), Error> {
  views.register("CaptionedImage", make::<CaptionedImage>)?;
  views.register("PokemonView", make::<PokemonView>)?;
  views.register("TransformBox", make::<TransformBox>)?;

  views.register("ComponentsTab", make::<ComponentsTab>)?;
  views.register("SettingsTab", make::<SettingsTab>)?;
  views.register("TextTestTab", make::<TextTestTab>)?;
  views.register("TransformTab", make::<TransformTab>)?;
  views.register("RecyclingListTab", make::<RecyclingListTab>)?;
  Ok(())
}

/// Returns a registry holding every view.
pub fn all() -> Result<Views, Error> {
  let mut views = Views::new();
  register_widgets(&mut views)?;
  register_custom(&mut views)?;
  Ok(views)
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::ui::component::testing::Harness;
  use crate::ui::inflate::Inflater;

  #[test]
  fn registering_twice_fails() {
    let mut views = all().unwrap();
    assert!(matches!(
      register_custom(&mut views),
      Err(Error::DuplicateView(name)) if name == "CaptionedImage"
    ));
  }

  #[test]
  fn every_builtin_layout_inflates() {
    let h = Harness::new();
    let views = all().unwrap();
    let inflater = Inflater::new(&h.resources, &views);
    for name in h.resources.layouts().names() {
      let root = h.resources.layouts().get(name).unwrap();
      assert!(inflater.inflate(root).is_ok(), "{} failed to inflate", name);
    }
  }

  #[test]
  fn unknown_types_fail_to_inflate() {
    let h = Harness::new();
    let views = all().unwrap();
    let inflater = Inflater::new(&h.resources, &views);
    let node = vitrine::layout::Node::new("Nope");
    assert!(matches!(
      inflater.inflate(&node),
      Err(Error::UnknownView(name)) if name == "Nope"
    ));
  }
}

use crate::config::OptionConfig;
use crate::gui::menu::ICON_SIZE;
use crate::sys::{icon, launch};
use gdk_pixbuf::Pixbuf;
use radial::menu::Subscribers;
use radial::option::{IconHandle, MenuOption};
use radial::resources::FontHandle;
use std::cell::RefCell;
use std::collections::HashMap;

/// Decoded icons and the label font, shared between the component and the draw function.
pub struct MenuAssets {
    font: RefCell<FontHandle>,
    icons: RefCell<HashMap<IconHandle, Option<Pixbuf>>>,
}

impl MenuAssets {
    pub fn new(font: FontHandle) -> Self {
        Self {
            font: RefCell::new(font),
            icons: RefCell::new(HashMap::new()),
        }
    }

    pub fn font(&self) -> FontHandle {
        self.font.borrow().clone()
    }

    pub fn set_font(&self, font: FontHandle) {
        *self.font.borrow_mut() = font;
    }

    /// Decodes every icon the options reference, so drawing never touches the disk.
    pub fn preload(&self, options: &[MenuOption]) {
        let mut icons = self.icons.borrow_mut();
        for handle in options.iter().filter_map(|o| o.icon.as_ref()) {
            icons
                .entry(handle.clone())
                .or_insert_with(|| load_icon(handle));
        }
    }

    pub fn icon(&self, handle: &IconHandle) -> Option<Pixbuf> {
        self.icons.borrow().get(handle).cloned().flatten()
    }

    pub fn clear_icons(&self) {
        self.icons.borrow_mut().clear();
    }
}

fn load_icon(handle: &IconHandle) -> Option<Pixbuf> {
    let path = icon::find_icon_path(handle)?;
    Pixbuf::from_file_at_scale(&path, ICON_SIZE, ICON_SIZE, true)
        .inspect_err(|e| log::warn!("Failed to load icon {}: {}", path.display(), e))
        .ok()
}

pub fn build_option(cfg: &OptionConfig) -> MenuOption {
    let mut option = MenuOption::new(cfg.name.to_string());
    if let Some(description) = &cfg.description {
        option = option.with_description(description.to_string());
    }
    if let Some(icon) = &cfg.icon {
        option = option.with_icon(icon.clone());
    }

    let name = cfg.name.clone();
    let exec = cfg.exec.clone();
    option.on_select(move || match &exec {
        Some(exec) => {
            if let Err(e) = launch::spawn(exec) {
                log::error!("Failed to run action '{}': {:#}", name, e);
            }
        }
        None => log::info!("Action: {}", name),
    })
}

pub fn build_options(configs: &[OptionConfig]) -> Vec<MenuOption> {
    configs.iter().map(build_option).collect()
}

pub fn session_subscribers() -> Subscribers {
    Subscribers::new()
        .on_selected(|index| log::info!("Radial menu option {} selected", index))
        .on_dismissed(|| log::info!("Radial menu dismissed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use radial::option::{Description, OptionName};

    fn cfg(name: &str, description: Option<&str>) -> OptionConfig {
        OptionConfig {
            name: OptionName::new(name),
            description: description.map(Description::new),
            icon: None,
            exec: None,
        }
    }

    #[test]
    fn test_build_options_keeps_order_and_text() {
        let options = build_options(&[
            cfg("Use", Some("Consume the selected item immediately.")),
            cfg("Inspect", Some("")),
            cfg("Drop", None),
        ]);
        let names: Vec<&str> = options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Use", "Inspect", "Drop"]);
        assert!(options[0].description.is_some());
        assert!(options[1].description.is_none());
        assert!(options.iter().all(|o| o.on_select.is_some() && o.icon.is_none()));
    }
}

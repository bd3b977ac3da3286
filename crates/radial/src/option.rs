use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct OptionName(String);

crate::impl_string_newtype!(OptionName);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Description(String);

crate::impl_string_newtype!(Description);

/// Opaque reference to an image: either a file path or an icon-theme name.
/// Resolving and decoding it is up to the host.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconHandle(String);

crate::impl_string_newtype!(IconHandle);

pub type SelectCallback = Rc<dyn Fn()>;

#[derive(Clone)]
pub struct MenuOption {
    pub name: OptionName,
    pub description: Option<Description>,
    pub icon: Option<IconHandle>,
    pub on_select: Option<SelectCallback>,
}

impl MenuOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: OptionName::new(name),
            description: None,
            icon: None,
            on_select: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Description::new(description)).filter(|d| !d.is_empty());
        self
    }

    pub fn with_icon(mut self, icon: IconHandle) -> Self {
        self.icon = Some(icon).filter(|i| !i.is_empty());
        self
    }

    pub fn on_select(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_select = Some(Rc::new(callback));
        self
    }

    /// Text shown on the slice and in the center label.
    pub fn title(&self) -> String {
        self.name.to_uppercase()
    }

    pub(crate) fn invoke(&self) {
        if let Some(callback) = &self.on_select {
            callback();
        }
    }
}

impl fmt::Debug for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuOption")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("icon", &self.icon)
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_empty_description_and_icon_are_dropped() {
        let option = MenuOption::new("Drop")
            .with_description("")
            .with_icon(IconHandle::new(""));
        assert!(option.description.is_none());
        assert!(option.icon.is_none());
        assert_eq!(option.title(), "DROP");
    }

    #[test]
    fn test_invoke_runs_callback() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let option = MenuOption::new("Use").on_select(move || counter.set(counter.get() + 1));
        option.invoke();
        MenuOption::new("Inspect").invoke();
        assert_eq!(hits.get(), 1);
    }
}

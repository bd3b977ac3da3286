use crate::geometry::{Point, Radii, SectorLayout, SliceBounds};
use crate::option::MenuOption;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// What the escape key does to an open menu. `Cancel` closes silently,
/// `Dismiss` closes and notifies the dismiss subscriber like a click outside.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    #[default]
    #[strum(serialize = "cancel")]
    Cancel,
    #[strum(serialize = "dismiss")]
    Dismiss,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Closed,
    Open {
        hover: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange {
    /// The menu is closed, the event was dropped.
    Ignored,
    Unchanged,
    Changed {
        previous: Option<usize>,
        current: Option<usize>,
    },
}

impl HoverChange {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Selected(usize),
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeOutcome {
    Ignored,
    Cancelled,
    Dismissed,
}

/// Per-session listeners. Each open replaces the whole set, so a listener
/// from an earlier session can never fire again.
#[derive(Default)]
pub struct Subscribers {
    on_selected: Option<Box<dyn FnMut(usize)>>,
    on_dismissed: Option<Box<dyn FnMut()>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_selected(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.on_selected = Some(Box::new(f));
        self
    }

    pub fn on_dismissed(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_dismissed = Some(Box::new(f));
        self
    }

    fn selected(&mut self, index: usize) {
        if let Some(f) = self.on_selected.as_mut() {
            f(index);
        }
    }

    fn dismissed(&mut self) {
        if let Some(f) = self.on_dismissed.as_mut() {
            f();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub index: usize,
    pub bounds: SliceBounds,
    pub radii: Radii,
    pub hovered: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CenterLabel {
    pub visible: bool,
    pub title: String,
    pub description: Option<String>,
    pub separator_visible: bool,
}

impl CenterLabel {
    fn for_option(option: &MenuOption) -> Self {
        let description = option.description.as_ref().map(|d| d.to_string());
        Self {
            visible: true,
            title: option.title(),
            separator_visible: description.is_some(),
            description,
        }
    }
}

pub struct RadialMenu {
    layout: SectorLayout,
    options: Vec<MenuOption>,
    slices: Vec<Slice>,
    label: CenterLabel,
    phase: Phase,
    subscribers: Subscribers,
    revision: u64,
}

impl RadialMenu {
    pub fn new(radii: Radii) -> Self {
        Self {
            layout: SectorLayout::empty(Point::default(), radii),
            options: Vec::new(),
            slices: Vec::new(),
            label: CenterLabel::default(),
            phase: Phase::Closed,
            subscribers: Subscribers::default(),
            revision: 0,
        }
    }

    pub fn open(&mut self, center: Point, options: Vec<MenuOption>, subscribers: Subscribers) {
        log::debug!("Populating radial menu with {} options", options.len());
        self.subscribers = subscribers;
        self.options = options;
        self.layout = SectorLayout::new(center, self.layout.radii, self.options.len());
        self.rebuild_slices();
        self.label = CenterLabel::default();
        self.phase = Phase::Open { hover: None };
        self.revision += 1;
    }

    /// Applies new radii to the current options. The hovered slice is kept,
    /// since the slice count does not change.
    pub fn reconfigure(&mut self, radii: Radii) {
        self.layout = SectorLayout::new(self.layout.center, radii, self.options.len());
        let hover = self.hover_index();
        self.rebuild_slices();
        for slice in &mut self.slices {
            slice.hovered = hover == Some(slice.index);
        }
        self.revision += 1;
    }

    fn rebuild_slices(&mut self) {
        let radii = self.layout.radii;
        self.slices = self
            .layout
            .bounds()
            .iter()
            .enumerate()
            .map(|(index, &bounds)| Slice {
                index,
                bounds,
                radii,
                hovered: false,
            })
            .collect();
    }

    pub fn update_hover(&mut self, point: Point) -> HoverChange {
        if !self.is_open() {
            return HoverChange::Ignored;
        }
        let index = self.layout.hit_test(point);
        self.set_hover(index)
    }

    pub fn clear_hover(&mut self) -> HoverChange {
        if !self.is_open() {
            return HoverChange::Ignored;
        }
        self.set_hover(None)
    }

    fn set_hover(&mut self, current: Option<usize>) -> HoverChange {
        let previous = self.hover_index();
        if previous == current {
            return HoverChange::Unchanged;
        }

        if let Some(slice) = previous.and_then(|i| self.slices.get_mut(i)) {
            slice.hovered = false;
        }
        if let Some(slice) = current.and_then(|i| self.slices.get_mut(i)) {
            slice.hovered = true;
        }
        self.label = current
            .and_then(|i| self.options.get(i))
            .map(CenterLabel::for_option)
            .unwrap_or_default();

        self.phase = Phase::Open { hover: current };
        self.revision += 1;
        HoverChange::Changed { previous, current }
    }

    pub fn click(&mut self, point: Point) -> ClickOutcome {
        if !self.is_open() {
            return ClickOutcome::Ignored;
        }
        let outcome = match self.layout.hit_test(point) {
            Some(index) => {
                log::debug!("Radial menu selected option {}", index);
                self.options[index].invoke();
                self.subscribers.selected(index);
                ClickOutcome::Selected(index)
            }
            None => {
                log::debug!("Radial menu dismissed by click outside");
                self.subscribers.dismissed();
                ClickOutcome::Dismissed
            }
        };
        self.close();
        outcome
    }

    pub fn escape(&mut self, mode: EscapeMode) -> EscapeOutcome {
        if !self.is_open() {
            return EscapeOutcome::Ignored;
        }
        let outcome = match mode {
            EscapeMode::Cancel => EscapeOutcome::Cancelled,
            EscapeMode::Dismiss => {
                self.subscribers.dismissed();
                EscapeOutcome::Dismissed
            }
        };
        self.close();
        outcome
    }

    /// Returns whether the menu was open.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.subscribers = Subscribers::default();
        self.options.clear();
        self.slices.clear();
        self.layout = SectorLayout::empty(self.layout.center, self.layout.radii);
        self.label = CenterLabel::default();
        self.phase = Phase::Closed;
        self.revision += 1;
        true
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Open { .. })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hover_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Open { hover } => hover,
            Phase::Closed => None,
        }
    }

    pub fn hovered_option(&self) -> Option<&MenuOption> {
        self.hover_index().and_then(|i| self.options.get(i))
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn layout(&self) -> &SectorLayout {
        &self.layout
    }

    pub fn radii(&self) -> Radii {
        self.layout.radii
    }

    pub fn center_label(&self) -> &CenterLabel {
        &self.label
    }

    /// Bumped on every visual change; a host can skip repaints when it is unchanged.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn at_degrees(center: Point, degrees: f64, radius: f64) -> Point {
        center.polar(degrees.to_radians(), radius)
    }

    fn options(names: &[&str]) -> Vec<MenuOption> {
        names.iter().map(|n| MenuOption::new(*n)).collect()
    }

    fn menu() -> RadialMenu {
        RadialMenu::new(Radii::new(150.0, 340.0).unwrap())
    }

    #[test]
    fn test_initial_state_is_closed() {
        let mut menu = menu();
        assert_eq!(menu.phase(), Phase::Closed);
        assert_eq!(menu.update_hover(Point::new(200.0, 0.0)), HoverChange::Ignored);
        assert_eq!(menu.click(Point::new(200.0, 0.0)), ClickOutcome::Ignored);
        assert_eq!(menu.escape(EscapeMode::Dismiss), EscapeOutcome::Ignored);
        assert!(!menu.close());
    }

    #[test]
    fn test_use_inspect_drop_click_at_200_degrees() {
        let center = Point::new(960.0, 540.0);
        let selected = Rc::new(RefCell::new(Vec::new()));
        let inspected = Rc::new(Cell::new(false));

        let mut opts = options(&["Use", "Inspect", "Drop"]);
        let flag = inspected.clone();
        opts[1] = MenuOption::new("Inspect").on_select(move || flag.set(true));

        let log = selected.clone();
        let mut menu = menu();
        menu.open(
            center,
            opts,
            Subscribers::new().on_selected(move |i| log.borrow_mut().push(i)),
        );
        assert_eq!(menu.slices().len(), 3);

        let outcome = menu.click(at_degrees(center, 200.0, 250.0));
        assert_eq!(outcome, ClickOutcome::Selected(1));
        assert!(inspected.get());
        assert_eq!(*selected.borrow(), vec![1]);
        assert_eq!(menu.phase(), Phase::Closed);
    }

    #[test]
    fn test_zero_options_click_dismisses() {
        let dismissed = Rc::new(Cell::new(0));
        let counter = dismissed.clone();
        let mut menu = menu();
        menu.open(
            Point::default(),
            Vec::new(),
            Subscribers::new().on_dismissed(move || counter.set(counter.get() + 1)),
        );
        assert!(menu.is_open());
        assert!(menu.slices().is_empty());
        assert_eq!(menu.update_hover(Point::new(200.0, 0.0)), HoverChange::Unchanged);
        assert_eq!(menu.click(Point::new(200.0, 0.0)), ClickOutcome::Dismissed);
        assert_eq!(dismissed.get(), 1);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_escape_does_not_select() {
        let fired = Rc::new(Cell::new(0));
        let (s, d) = (fired.clone(), fired.clone());
        let names: Vec<String> = (0..10).map(|i| format!("Option {i}")).collect();
        let opts = names.iter().map(MenuOption::new).collect();

        let mut menu = menu();
        menu.open(
            Point::default(),
            opts,
            Subscribers::new()
                .on_selected(move |_| s.set(s.get() + 1))
                .on_dismissed(move || d.set(d.get() + 10)),
        );
        menu.update_hover(Point::new(200.0, 1.0));
        assert_eq!(menu.escape(EscapeMode::Cancel), EscapeOutcome::Cancelled);
        assert_eq!(menu.phase(), Phase::Closed);
        assert_eq!(menu.hover_index(), None);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_escape_dismiss_mode_fires_dismissed() {
        let dismissed = Rc::new(Cell::new(false));
        let flag = dismissed.clone();
        let mut menu = menu();
        menu.open(
            Point::default(),
            options(&["A", "B"]),
            Subscribers::new().on_dismissed(move || flag.set(true)),
        );
        assert_eq!(menu.escape(EscapeMode::Dismiss), EscapeOutcome::Dismissed);
        assert!(dismissed.get());
    }

    #[test]
    fn test_hover_update_is_idempotent() {
        let mut menu = menu();
        menu.open(Point::default(), options(&["Use", "Inspect", "Drop"]), Subscribers::new());
        let point = at_degrees(Point::default(), 60.0, 200.0);

        let before = menu.revision();
        assert_eq!(
            menu.update_hover(point),
            HoverChange::Changed { previous: None, current: Some(0) }
        );
        assert_eq!(menu.revision(), before + 1);
        assert_eq!(menu.update_hover(point), HoverChange::Unchanged);
        assert_eq!(menu.revision(), before + 1);
    }

    #[test]
    fn test_hover_moves_highlight_and_label() {
        let mut menu = menu();
        let opts = vec![
            MenuOption::new("Use").with_description("Consume the selected item immediately."),
            MenuOption::new("Inspect"),
        ];
        menu.open(Point::default(), opts, Subscribers::new());

        menu.update_hover(Point::new(200.0, 10.0));
        assert!(menu.slices()[0].hovered);
        let label = menu.center_label();
        assert!(label.visible);
        assert_eq!(label.title, "USE");
        assert!(label.separator_visible);

        let change = menu.update_hover(Point::new(-200.0, -10.0));
        assert_eq!(change, HoverChange::Changed { previous: Some(0), current: Some(1) });
        assert!(!menu.slices()[0].hovered);
        assert!(menu.slices()[1].hovered);
        assert_eq!(menu.center_label().title, "INSPECT");
        assert_eq!(menu.hovered_option().map(|o| o.name.as_str()), Some("Inspect"));
        assert_eq!(menu.center_label().description, None);
        assert!(!menu.center_label().separator_visible);

        // into the dead zone
        menu.update_hover(Point::new(10.0, 10.0));
        assert_eq!(menu.hover_index(), None);
        assert!(menu.hovered_option().is_none());
        assert!(menu.slices().iter().all(|s| !s.hovered));
        assert_eq!(*menu.center_label(), CenterLabel::default());
    }

    #[test]
    fn test_repeated_open_does_not_accumulate_subscribers() {
        let fired = Rc::new(Cell::new(0));
        let mut menu = menu();
        for _ in 0..2 {
            let counter = fired.clone();
            menu.open(
                Point::default(),
                options(&["Use", "Inspect", "Drop"]),
                Subscribers::new().on_selected(move |_| counter.set(counter.get() + 1)),
            );
        }
        menu.click(Point::new(200.0, 10.0));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_reopen_resets_hover() {
        let mut menu = menu();
        menu.open(Point::default(), options(&["A", "B", "C", "D"]), Subscribers::new());
        menu.update_hover(Point::new(-10.0, 200.0));
        assert_eq!(menu.hover_index(), Some(1));

        menu.open(Point::default(), options(&["A"]), Subscribers::new());
        assert_eq!(menu.hover_index(), None);
        assert!(menu.slices().iter().all(|s| !s.hovered));
    }

    #[test]
    fn test_reconfigure_keeps_hover() {
        let mut menu = menu();
        menu.open(Point::default(), options(&["A", "B"]), Subscribers::new());
        menu.update_hover(Point::new(-200.0, -10.0));
        menu.reconfigure(Radii::new(50.0, 100.0).unwrap());

        assert_eq!(menu.hover_index(), Some(1));
        assert!(menu.slices()[1].hovered);
        assert_eq!(menu.slices()[1].radii.outer(), 100.0);
        assert_eq!(menu.layout().hit_test(Point::new(-200.0, -10.0)), None);
    }

    #[test]
    fn test_close_is_idempotent_and_drops_session() {
        let mut menu = menu();
        menu.open(Point::default(), options(&["A", "B"]), Subscribers::new());
        assert!(menu.close());
        assert!(!menu.close());
        assert!(menu.options().is_empty());
        assert!(menu.layout().is_empty());
        assert_eq!(menu.update_hover(Point::new(200.0, 0.0)), HoverChange::Ignored);
    }

    #[test]
    fn test_escape_mode_deserialization() {
        let cases = vec![
            ("\"cancel\"", EscapeMode::Cancel),
            ("\"Cancel\"", EscapeMode::Cancel),
            ("\"DISMISS\"", EscapeMode::Dismiss),
        ];

        for (json, expected) in cases {
            let deserialized: EscapeMode = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<EscapeMode>("\"explode\"").is_err());
    }
}

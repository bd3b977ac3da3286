use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::host::{GtkSurface, LayerShellFocus, PangoFonts};
use crate::gui::menu::{self, MenuAssets};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use crate::sys::icon;
use gtk::prelude::*;
use gtk4 as gtk;
use radial::geometry::Point;
use radial::host::{EscapeResult, PointerButton};
use radial::mediator::{Mediator, MenuSettings};
use radial::resources::resolve_label_font;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub type MenuMediator = Mediator<GtkSurface, LayerShellFocus>;

pub struct AppModel {
    pub mediator: Rc<RefCell<MenuMediator>>,
    pub assets: Rc<MenuAssets>,
    pub config: Config,
    pub root: gtk::ApplicationWindow,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Escape,
    PointerMove(Point),
    PointerLeave,
    PointerDown(u32, Point),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Funky"),
            add_css_class: "funky-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Escape);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[local_ref]
            overlay -> gtk::Overlay {
                set_hexpand: true,
                set_vexpand: true,

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::PointerMove(Point::new(x, y)));
                    },
                    connect_leave[sender] => move |_| {
                        sender.input(AppMsg::PointerLeave);
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: 0, // Listen to all buttons
                    connect_pressed[sender] => move |gesture, _, x, y| {
                        sender.input(AppMsg::PointerDown(gesture.current_button(), Point::new(x, y)));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let overlay = gtk::Overlay::new();
        let canvas = gtk::DrawingArea::default();
        canvas.set_hexpand(true);
        canvas.set_vexpand(true);
        canvas.add_css_class("funky-drawing-area");

        let settings = config.menu_settings().unwrap_or_else(|e| {
            log::error!("{}, using default geometry", e);
            MenuSettings::default()
        });
        let surface = GtkSurface::new(root.clone(), overlay.clone(), canvas.clone());
        let focus = LayerShellFocus::new(root.clone());
        let mediator = Rc::new(RefCell::new(Mediator::new(settings, surface, focus)));

        let font = resolve_label_font(&PangoFonts::new(&root, config.font.clone()));
        let assets = Rc::new(MenuAssets::new(font));

        // the canvas is owned by the mediator's surface, so hold the mediator weakly
        let (mediator_draw, assets_draw) = (Rc::downgrade(&mediator), assets.clone());
        canvas.set_draw_func(move |canvas, cr, _, _| {
            let Some(mediator) = mediator_draw.upgrade() else {
                return;
            };
            let style_context = canvas.style_context();
            let colors = ThemeColors::from_context(&style_context);
            if let Err(e) = menu::draw(cr, mediator.borrow().menu(), &colors, &assets_draw) {
                log::error!("Drawing error: {}", e);
            }
        });

        let model = AppModel {
            mediator,
            assets,
            config,
            root: root.clone(),
        };

        let widgets = view_output!();

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => {
                let options = menu::build_options(&self.config.options);
                self.assets.preload(&options);
                self.mediator
                    .borrow_mut()
                    .notify_open_requested(options, menu::session_subscribers());
            }
            AppMsg::Hide => {
                self.mediator.borrow_mut().close();
            }
            AppMsg::Escape => {
                if self.mediator.borrow_mut().on_escape_key() == EscapeResult::PassThrough {
                    log::debug!("Escape ignored, menu is not open");
                }
            }
            AppMsg::PointerMove(point) => {
                self.mediator.borrow_mut().on_pointer_move(point);
            }
            AppMsg::PointerLeave => {
                self.mediator.borrow_mut().on_pointer_leave();
            }
            AppMsg::PointerDown(button, point) => {
                self.mediator
                    .borrow_mut()
                    .on_pointer_down(PointerButton::from(button), point);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => match new_config.menu_settings() {
                    Ok(settings) => {
                        self.mediator.borrow_mut().reconfigure(settings);
                        let fonts = PangoFonts::new(&self.root, new_config.font.clone());
                        self.assets.set_font(resolve_label_font(&fonts));
                        icon::clear_cache();
                        self.assets.clear_icons();
                        self.assets.preload(self.mediator.borrow().menu().options());
                        self.config = new_config;
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Rejected reloaded config: {}", e),
                },
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

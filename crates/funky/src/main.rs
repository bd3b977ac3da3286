use funky::config;
use funky::gui::app::AppModel;
use funky::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.funkyui.funky");

    app.run::<AppModel>((config, rx));
}

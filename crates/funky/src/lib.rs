pub mod config;
pub mod events;

pub mod gui {
    pub mod app;
    pub mod host;
    pub mod menu;
    pub mod theme;
    pub mod window;
}

pub mod sys {
    pub mod icon;
    pub mod launch;
    pub mod runtime;
    pub mod server;
}

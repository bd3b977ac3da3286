#[derive(Debug, Clone)]
pub enum AppEvent {
    Show,
    Hide,
    ConfigReload,
}

pub mod control_panel;
pub mod slot_editor;
pub mod style_settings;

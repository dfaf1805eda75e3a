pub mod banners;
pub mod diagnostics_panel;
pub mod help_panel;
pub mod settings_panel;
pub mod survey_panel;

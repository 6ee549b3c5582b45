pub mod app;
pub mod card_view;

pub mod editor_view;
pub mod highlight;
pub mod key_strip;
pub mod menu;

pub mod form_field;
pub mod sub_tabs;

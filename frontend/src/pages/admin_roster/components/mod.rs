pub mod add_form;
pub mod edit_dialog;
pub mod list;
pub mod tabs;

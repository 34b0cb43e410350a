pub mod form;
pub mod hints;
pub mod table;
pub mod tabs;
pub mod toast;

pub mod curl;
pub mod list;
pub mod view;

pub mod catalog;
pub mod mark;
pub mod recipe;
pub mod shopping_list;
pub mod short_link;
pub mod subscription;
pub mod user;
pub mod view;

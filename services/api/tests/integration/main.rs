mod helpers;

mod mark_test;
mod short_link_test;
mod subscription_test;
mod user_test;
